//! Key metadata file: salt, password verifier and KDF parameters.
//!
//! ```text
//! {"salt": "<base64>", "password_hash": "<hex sha256>", "kdf": {...}}
//! ```
//!
//! Written exactly once, by setup, and only read afterwards.  A file
//! without `kdf` is read as PBKDF2-HMAC-SHA256 with 100 000 rounds.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::atomic;
use crate::crypto::kdf::{KdfParams, SALT_LEN};
use crate::errors::{PassVaultError, Result};

/// Length of a hex-encoded SHA-256 digest.
const VERIFIER_HEX_LEN: usize = 64;

/// Contents of the key metadata file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyMetadata {
    /// Random per-vault salt for key derivation (base64 in JSON).
    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    pub salt: Vec<u8>,

    /// Hex SHA-256 digest of the master password.
    pub password_hash: String,

    /// KDF used at setup.  Optional for files written without it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kdf: Option<KdfParams>,
}

impl KeyMetadata {
    pub fn new(salt: &[u8], password_hash: String, kdf: KdfParams) -> Self {
        Self {
            salt: salt.to_vec(),
            password_hash,
            kdf: Some(kdf),
        }
    }

    /// The KDF parameters to re-derive the key with.
    pub fn kdf_params(&self) -> KdfParams {
        self.kdf.unwrap_or_default()
    }

    /// Read and validate the metadata file.
    ///
    /// A missing file is an `Io` error (`NotFound`); anything that does
    /// not parse or fails validation is `CorruptMetadata`.  Nothing here
    /// ever falls back to defaults or rewrites the file.
    pub fn read(path: &Path) -> Result<Self> {
        let data = fs::read(path)?;

        let meta: KeyMetadata = serde_json::from_slice(&data)
            .map_err(|e| PassVaultError::CorruptMetadata(format!("{}: {e}", path.display())))?;

        meta.validate()?;
        Ok(meta)
    }

    /// Write the metadata file, refusing to replace an existing one.
    ///
    /// The file is created exclusively, so even a key file that shows up
    /// between the caller's checks and this write is left untouched.
    pub fn write_new(&self, path: &Path) -> Result<()> {
        let data = serde_json::to_vec(self)
            .map_err(|e| PassVaultError::SerializationError(format!("key metadata: {e}")))?;

        atomic::write_new(path, &data).map_err(|e| match e.kind() {
            ErrorKind::AlreadyExists => PassVaultError::VaultAlreadyExists(path.to_path_buf()),
            _ => e.into(),
        })
    }

    fn validate(&self) -> Result<()> {
        if self.salt.len() != SALT_LEN {
            return Err(PassVaultError::CorruptMetadata(format!(
                "salt must be {SALT_LEN} bytes, got {}",
                self.salt.len()
            )));
        }
        if self.password_hash.len() != VERIFIER_HEX_LEN
            || !self.password_hash.bytes().all(|b| b.is_ascii_hexdigit())
        {
            return Err(PassVaultError::CorruptMetadata(
                "password_hash is not a hex SHA-256 digest".into(),
            ));
        }
        if let Some(kdf) = &self.kdf {
            kdf.validate()
                .map_err(|e| PassVaultError::CorruptMetadata(e.to_string()))?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Serde helpers for base64-encoded Vec<u8> fields
// ---------------------------------------------------------------------------

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

fn base64_encode<S>(data: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&BASE64.encode(data))
}

fn base64_decode<'de, D>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    BASE64.decode(&s).map_err(serde::de::Error::custom)
}
