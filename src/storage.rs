//! Persisted session state
//!
//! One JSON file (`~/.homeboard/session.json` by default) holding the
//! saved credential, the theme preference, and the authenticated flag.
//! Absence of the file or any key means the defaults: unauthenticated,
//! light theme. The credential is persisted in plaintext; that matches the
//! source system and is a documented limitation for a local tool, not
//! something this crate adds a security model for.

use crate::auth::Credential;
use crate::error::{HomeboardError, Result};
use crate::view::Theme;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// On-disk session file shape
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct SessionData {
    /// Saved credential, if the user is logged in
    #[serde(skip_serializing_if = "Option::is_none")]
    credentials: Option<Credential>,
    /// Theme preference, stored as the string `"true"`/`"false"`
    #[serde(rename = "darkMode", skip_serializing_if = "Option::is_none")]
    dark_mode: Option<String>,
    /// Flag written by the explicit-login flow
    #[serde(skip_serializing_if = "Option::is_none")]
    authenticated: Option<String>,
}

/// Key-value session store backed by a JSON file
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Create a store at an explicit path (tests point this at a temp dir)
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default session file location
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".homeboard")
            .join("session.json")
    }

    /// Create a store at the default location
    pub fn open_default() -> Self {
        Self::new(Self::default_path())
    }

    /// Path of the backing file
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn load(&self) -> Result<SessionData> {
        if !self.path.exists() {
            return Ok(SessionData::default());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| {
            HomeboardError::credentials(format!("Failed to read session file: {e}"))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            HomeboardError::credentials(format!("Failed to parse session file: {e}"))
        })
    }

    fn save(&self, data: &SessionData) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                HomeboardError::credentials(format!("Failed to create session directory: {e}"))
            })?;
        }

        let content = serde_json::to_string_pretty(data).map_err(|e| {
            HomeboardError::credentials(format!("Failed to serialize session: {e}"))
        })?;

        fs::write(&self.path, content).map_err(|e| {
            HomeboardError::credentials(format!("Failed to write session file: {e}"))
        })?;

        debug!("session saved to {}", self.path.display());
        Ok(())
    }

    /// Load the saved credential, if any
    pub fn credential(&self) -> Result<Option<Credential>> {
        Ok(self.load()?.credentials)
    }

    /// Persist a credential
    pub fn save_credential(&self, credential: &Credential) -> Result<()> {
        let mut data = self.load()?;
        data.credentials = Some(credential.clone());
        data.authenticated = Some("true".to_string());
        self.save(&data)
    }

    /// Remove the saved credential (logout)
    pub fn clear_credential(&self) -> Result<()> {
        let mut data = self.load()?;
        data.credentials = None;
        data.authenticated = None;
        self.save(&data)
    }

    /// Load the theme preference; absence means light
    pub fn theme(&self) -> Result<Theme> {
        Ok(self
            .load()?
            .dark_mode
            .map(|value| Theme::from_storage_value(&value))
            .unwrap_or_default())
    }

    /// Persist the theme preference
    pub fn save_theme(&self, theme: Theme) -> Result<()> {
        let mut data = self.load()?;
        data.dark_mode = Some(theme.storage_value().to_string());
        self.save(&data)
    }

    /// Whether a previous session completed a login
    pub fn authenticated(&self) -> Result<bool> {
        let data = self.load()?;
        Ok(data.authenticated.as_deref() == Some("true") || data.credentials.is_some())
    }
}
