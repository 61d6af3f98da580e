//! Credential records and the vault document that holds them.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The decrypted vault contents: service identifier -> record.
///
/// Ordered by service name so listings are stable between runs.
pub type VaultDocument = BTreeMap<String, CredentialRecord>;

/// Login details stored for one service.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    /// Username or email for the service.
    pub username: String,

    /// The stored secret.
    pub password: String,

    /// When this record was written.
    #[serde(rename = "created")]
    pub created_at: DateTime<Utc>,
}

impl CredentialRecord {
    /// Build a record stamped with the current time.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            created_at: Utc::now(),
        }
    }

    /// `created_at` formatted for display (`YYYY-MM-DD HH:MM:SS`).
    pub fn created_display(&self) -> String {
        self.created_at.format("%Y-%m-%d %H:%M:%S").to_string()
    }

    /// Case-insensitive substring match on the service name or username.
    pub fn matches(&self, service: &str, needle_lower: &str) -> bool {
        service.to_lowercase().contains(needle_lower)
            || self.username.to_lowercase().contains(needle_lower)
    }
}

// Keep the password out of debug output and panic messages.
impl fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("created_at", &self.created_at)
            .finish()
    }
}
