//! Error types for the Homeboard client
//!
//! This module provides the error taxonomy shared by both service clients:
//! transport failures, API-level failures carrying the server-provided
//! `detail` message, client-side validation, and storage errors.

use thiserror::Error;

/// Result type alias for Homeboard operations
pub type Result<T> = std::result::Result<T, HomeboardError>;

/// Error types for Homeboard client operations
#[derive(Error, Debug)]
pub enum HomeboardError {
    /// Connection errors
    #[error("Connection error: {0}")]
    Connection(String),

    /// Authentication errors
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// HTTP client errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing errors
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// API errors with a server-provided message
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code returned by the server
        status: u16,
        /// Message from the error body `detail` field, or a generic fallback
        message: String,
    },

    /// Credential storage errors
    #[error("Credential error: {0}")]
    Credentials(String),

    /// Client-side validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Invalid input errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Not found errors (devices, dates, etc.)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Payload parsing errors (shape or invariant violations)
    #[error("Parsing error: {0}")]
    Parsing(String),

    /// Generic I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors
    #[error("Generic error: {0}")]
    Generic(#[from] anyhow::Error),
}

impl HomeboardError {
    /// Create a connection error
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Create an authentication error
    pub fn authentication(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    /// Create an API error from a status code and message
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a credential error
    pub fn credentials(msg: impl Into<String>) -> Self {
        Self::Credentials(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a parsing error
    pub fn parsing(msg: impl Into<String>) -> Self {
        Self::Parsing(msg.into())
    }

    /// Check if this error indicates rejected or missing credentials
    pub fn is_auth_error(&self) -> bool {
        match self {
            Self::Authentication(_) | Self::Credentials(_) => true,
            Self::Api { status, .. } => *status == 401 || *status == 403,
            _ => false,
        }
    }

    /// Check if the operation can be retried (the periodic poll relies on this)
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Connection(_) | Self::Http(_) => true,
            Self::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}
