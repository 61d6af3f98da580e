//! Password-based key derivation.
//!
//! The default is PBKDF2-HMAC-SHA256 with 100 000 rounds.  Argon2id is
//! available as a memory-hard alternative.  Whichever algorithm a vault
//! was set up with is recorded in its key metadata file so unlock always
//! re-derives with the same parameters.

use argon2::{Algorithm, Argon2, Params, Version};
use rand::TryRngCore;
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::errors::{PassVaultError, Result};

/// Length of the salt in bytes (128 bits).
pub const SALT_LEN: usize = 16;

/// Length of the derived key in bytes (256 bits, for AES-256).
pub const KEY_LEN: usize = 32;

/// Minimum PBKDF2 round count.
pub const MIN_PBKDF2_ITERATIONS: u32 = 100_000;

/// Minimum safe Argon2 memory cost in KiB (8 MB).
const MIN_MEMORY_KIB: u32 = 8_192;

/// Key-derivation algorithm and cost parameters.
///
/// Serialized into the key metadata file as
/// `{"algorithm": "pbkdf2-sha256", "iterations": 100000}` or
/// `{"algorithm": "argon2id", "memory_kib": .., "iterations": .., "parallelism": ..}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "algorithm", rename_all = "kebab-case")]
pub enum KdfParams {
    Pbkdf2Sha256 {
        iterations: u32,
    },
    Argon2id {
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
    },
}

impl Default for KdfParams {
    fn default() -> Self {
        Self::Pbkdf2Sha256 {
            iterations: MIN_PBKDF2_ITERATIONS,
        }
    }
}

impl KdfParams {
    /// Reject parameters that would make brute-forcing the master
    /// password cheap.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::Pbkdf2Sha256 { iterations } => {
                if iterations < MIN_PBKDF2_ITERATIONS {
                    return Err(PassVaultError::KeyDerivationFailed(format!(
                        "PBKDF2 iterations must be at least {MIN_PBKDF2_ITERATIONS} (got {iterations})"
                    )));
                }
            }
            Self::Argon2id {
                memory_kib,
                iterations,
                parallelism,
            } => {
                if memory_kib < MIN_MEMORY_KIB {
                    return Err(PassVaultError::KeyDerivationFailed(format!(
                        "Argon2 memory_kib must be at least {MIN_MEMORY_KIB} (got {memory_kib})"
                    )));
                }
                if iterations < 1 {
                    return Err(PassVaultError::KeyDerivationFailed(
                        "Argon2 iterations must be at least 1".into(),
                    ));
                }
                if parallelism < 1 {
                    return Err(PassVaultError::KeyDerivationFailed(
                        "Argon2 parallelism must be at least 1".into(),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Short human-readable name, used by `status`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pbkdf2Sha256 { .. } => "PBKDF2-HMAC-SHA256",
            Self::Argon2id { .. } => "Argon2id",
        }
    }
}

/// Derive a 32-byte key from a password and a 16-byte salt.
///
/// The same password + salt + params always produce the same key.
pub fn derive_key(password: &[u8], salt: &[u8], params: &KdfParams) -> Result<[u8; KEY_LEN]> {
    if salt.len() != SALT_LEN {
        return Err(PassVaultError::KeyDerivationFailed(format!(
            "salt must be exactly {SALT_LEN} bytes, got {}",
            salt.len()
        )));
    }
    params.validate()?;

    let mut key = [0u8; KEY_LEN];
    match *params {
        KdfParams::Pbkdf2Sha256 { iterations } => {
            pbkdf2::pbkdf2_hmac::<Sha256>(password, salt, iterations, &mut key);
        }
        KdfParams::Argon2id {
            memory_kib,
            iterations,
            parallelism,
        } => {
            let argon2_params = Params::new(memory_kib, iterations, parallelism, Some(KEY_LEN))
                .map_err(|e| {
                    PassVaultError::KeyDerivationFailed(format!("invalid Argon2 params: {e}"))
                })?;
            let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, argon2_params);
            argon2
                .hash_password_into(password, salt, &mut key)
                .map_err(|e| {
                    PassVaultError::KeyDerivationFailed(format!("Argon2id hashing failed: {e}"))
                })?;
        }
    }

    Ok(key)
}

/// Generate a random 16-byte salt from the OS CSPRNG.
pub fn generate_salt() -> Result<[u8; SALT_LEN]> {
    let mut salt = [0u8; SALT_LEN];
    rand::rngs::OsRng.try_fill_bytes(&mut salt).map_err(|e| {
        PassVaultError::KeyDerivationFailed(format!("failed to generate random salt: {e}"))
    })?;
    Ok(salt)
}
