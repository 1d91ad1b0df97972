//! Homeboard client library
//!
//! Async Rust client for the two Homeboard dashboard services: the spot
//! electricity price service (calendar of available dates plus hourly price
//! detail) and the WiFi device inventory service (basic-auth device CRUD,
//! network statistics, credential rotation).
//!
//! The crate is headless. Two controllers own all client-side state:
//!
//! - [`calendar::CalendarController`] tracks the displayed month, the
//!   availability set, and the selected date, and loads price detail.
//! - [`devices::SyncController`] holds the credential, the device table,
//!   and the add/edit form mode, and keeps server state in sync with a
//!   periodic poll.
//!
//! Render state is a deterministic projection of controller state (see
//! [`view`]); front-ends draw those projections and feed user events back
//! into controller methods.

// Core modules
pub mod auth;
pub mod calendar;
pub mod client;
pub mod config;
pub mod devices;
pub mod error;
pub mod logging;
pub mod models;
pub mod storage;
pub mod view;

// Test support - available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

// Re-export main types for convenience
pub use auth::Credential;
pub use calendar::CalendarController;
pub use config::ClientConfig;
pub use devices::SyncController;
pub use error::{HomeboardError, Result};
