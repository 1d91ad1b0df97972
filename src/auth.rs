//! Basic-auth credentials
//!
//! Every call against the device inventory service carries a basic-auth
//! `Authorization` header. The credential is held in memory plus one
//! persisted copy in the session store (see [`crate::storage`]); the
//! persisted form is plaintext, a documented limitation of the source
//! system rather than something this crate papers over.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An in-memory basic-auth credential
///
/// Serializes as `{ "username": ..., "auth": ... }`, the exact shape the
/// session file uses.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credential {
    /// Username the token was built from
    pub username: String,
    /// Base64 `username:password` payload
    #[serde(rename = "auth")]
    token: String,
}

impl Credential {
    /// Build a credential from a username/password pair
    pub fn basic(username: impl Into<String>, password: &str) -> Self {
        let username = username.into();
        let token = BASE64.encode(format!("{username}:{password}"));
        Self { username, token }
    }

    /// The raw base64 token
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Value for the `Authorization` header
    pub fn authorization_value(&self) -> String {
        format!("Basic {}", self.token)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("token", &"<redacted>")
            .finish()
    }
}
