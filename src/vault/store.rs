//! High-level vault operations used by CLI commands.
//!
//! `VaultStore` ties the codec and the cipher to the vault data file.
//! Every operation borrows an unlocked `VaultSession` for the key.
//! Mutations are whole-document load → change → save round trips, so
//! no decrypted document outlives a single call.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::crypto::encryption::{decrypt, encrypt};
use crate::errors::{PassVaultError, Result};

use super::atomic::write_atomic;
use super::codec;
use super::record::{CredentialRecord, VaultDocument};
use super::session::VaultSession;

/// Longest accepted service identifier, in characters.
const MAX_SERVICE_LEN: usize = 256;

/// Whether `put` created a new entry or replaced one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutOutcome {
    Added,
    Updated,
}

/// Handle on the encrypted vault data file.
#[derive(Debug, Clone)]
pub struct VaultStore {
    path: PathBuf,
}

impl VaultStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Decrypt and decode the whole vault.
    ///
    /// A missing or empty data file is an empty vault.  If the blob fails
    /// authentication or does not decode, `VaultReadFailed` is returned
    /// and no document at all is handed out.
    pub fn load(&self, session: &VaultSession) -> Result<VaultDocument> {
        let key = session.key()?;

        let blob = match fs::read(&self.path) {
            Ok(blob) => blob,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no vault file yet, starting empty");
                return Ok(VaultDocument::new());
            }
            Err(e) => return Err(e.into()),
        };
        if blob.is_empty() {
            return Ok(VaultDocument::new());
        }

        let plaintext = Zeroizing::new(decrypt(key.as_bytes(), &blob).map_err(|e| {
            warn!(path = %self.path.display(), "vault blob failed authentication");
            PassVaultError::VaultReadFailed(e.to_string())
        })?);

        codec::decode(&plaintext).map_err(|e| {
            warn!(path = %self.path.display(), "vault plaintext did not decode");
            PassVaultError::VaultReadFailed(e.to_string())
        })
    }

    /// Encode, encrypt and replace the data file wholesale.
    pub fn save(&self, session: &VaultSession, doc: &VaultDocument) -> Result<()> {
        let key = session.key()?;

        let plaintext = Zeroizing::new(codec::encode(doc)?);
        let blob = encrypt(key.as_bytes(), &plaintext)?;
        write_atomic(&self.path, &blob)?;

        debug!(entries = doc.len(), "vault saved");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Credential operations
    // ------------------------------------------------------------------

    /// Add or overwrite the record for `service`.
    pub fn put(
        &self,
        session: &VaultSession,
        service: &str,
        username: &str,
        password: &str,
    ) -> Result<PutOutcome> {
        let service = normalize_service(service)?;

        let mut doc = self.load(session)?;
        let outcome = match doc.insert(
            service.to_string(),
            CredentialRecord::new(username, password),
        ) {
            Some(_) => PutOutcome::Updated,
            None => PutOutcome::Added,
        };
        self.save(session, &doc)?;

        debug!(service, ?outcome, "credential stored");
        Ok(outcome)
    }

    /// Remove the record for `service` and return it.
    ///
    /// An unknown service is `CredentialNotFound` and the file is not
    /// rewritten.
    pub fn delete(&self, session: &VaultSession, service: &str) -> Result<CredentialRecord> {
        let service = normalize_service(service)?;

        let mut doc = self.load(session)?;
        let removed = doc
            .remove(service)
            .ok_or_else(|| PassVaultError::CredentialNotFound(service.to_string()))?;
        self.save(session, &doc)?;

        debug!(service, "credential deleted");
        Ok(removed)
    }

    /// Fetch the record for exactly `service`.
    pub fn get(&self, session: &VaultSession, service: &str) -> Result<CredentialRecord> {
        let service = normalize_service(service)?;
        let mut doc = self.load(session)?;
        doc.remove(service)
            .ok_or_else(|| PassVaultError::CredentialNotFound(service.to_string()))
    }

    /// `true` if a record exists for `service`.
    pub fn contains(&self, session: &VaultSession, service: &str) -> Result<bool> {
        let service = normalize_service(service)?;
        Ok(self.load(session)?.contains_key(service))
    }

    /// Records whose service name or username contains `query`,
    /// ignoring case, in service order.  An empty query matches all.
    pub fn search(
        &self,
        session: &VaultSession,
        query: &str,
    ) -> Result<Vec<(String, CredentialRecord)>> {
        let needle = query.trim().to_lowercase();
        Ok(self
            .load(session)?
            .into_iter()
            .filter(|(service, record)| record.matches(service, &needle))
            .collect())
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Path to the encrypted data file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// The canonical form of a service identifier: surrounding whitespace
/// dropped, non-blank, printable and at most 256 characters.  Any script
/// is fine.
fn normalize_service(service: &str) -> Result<&str> {
    let service = service.trim();
    if service.is_empty() {
        return Err(PassVaultError::InvalidInput(
            "service name cannot be empty".into(),
        ));
    }
    if service.chars().count() > MAX_SERVICE_LEN {
        return Err(PassVaultError::InvalidInput(format!(
            "service name cannot exceed {MAX_SERVICE_LEN} characters"
        )));
    }
    if service.chars().any(char::is_control) {
        return Err(PassVaultError::InvalidInput(
            "service name cannot contain control characters".into(),
        ));
    }
    Ok(service)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_normalization() {
        assert_eq!(normalize_service("example.com").unwrap(), "example.com");
        assert_eq!(normalize_service("  example.com \n").unwrap(), "example.com");
        assert_eq!(normalize_service("bücher.de").unwrap(), "bücher.de");
        assert!(normalize_service("").is_err());
        assert!(normalize_service("   ").is_err());
        assert!(normalize_service("tab\there").is_err());
        assert!(normalize_service(&"a".repeat(257)).is_err());
    }
}
