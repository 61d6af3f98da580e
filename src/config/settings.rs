use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::crypto::kdf::KdfParams;
use crate::errors::{PassVaultError, Result};
use crate::vault::session::{
    SessionPolicy, DEFAULT_KEY_FILE, DEFAULT_VAULT_FILE, MIN_MASTER_PASSWORD_LENGTH,
};
use crate::vault::VaultPaths;

/// Vault-level configuration, loaded from `passvault.toml`.
///
/// Every field has a sensible default so PassVault works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// File name (relative to the vault directory) of the encrypted data.
    #[serde(default = "default_vault_file")]
    pub vault_file: String,

    /// File name (relative to the vault directory) of the salt + verifier.
    #[serde(default = "default_key_file")]
    pub key_file: String,

    /// KDF for new vaults: "pbkdf2" or "argon2id".
    #[serde(default = "default_kdf")]
    pub kdf: String,

    /// PBKDF2 round count (default and minimum: 100 000).
    #[serde(default = "default_pbkdf2_iterations")]
    pub pbkdf2_iterations: u32,

    /// Argon2 memory cost in KiB (default: 64 MB).
    #[serde(default = "default_argon2_memory_kib")]
    pub argon2_memory_kib: u32,

    /// Argon2 iteration count (default: 3).
    #[serde(default = "default_argon2_iterations")]
    pub argon2_iterations: u32,

    /// Argon2 parallelism degree (default: 4).
    #[serde(default = "default_argon2_parallelism")]
    pub argon2_parallelism: u32,

    /// Wrong master-password guesses allowed per session (default: 3).
    #[serde(default = "default_max_unlock_attempts")]
    pub max_unlock_attempts: u32,

    /// Shortest accepted master password (default and minimum: 6).
    #[serde(default = "default_min_password_length")]
    pub min_password_length: usize,

    /// Length used by `generate` and `add --generate` (default: 12).
    #[serde(default = "default_generated_length")]
    pub generated_length: usize,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_vault_file() -> String {
    DEFAULT_VAULT_FILE.to_string()
}

fn default_key_file() -> String {
    DEFAULT_KEY_FILE.to_string()
}

fn default_kdf() -> String {
    "pbkdf2".to_string()
}

fn default_pbkdf2_iterations() -> u32 {
    100_000
}

fn default_argon2_memory_kib() -> u32 {
    65_536 // 64 MB
}

fn default_argon2_iterations() -> u32 {
    3
}

fn default_argon2_parallelism() -> u32 {
    4
}

fn default_max_unlock_attempts() -> u32 {
    3
}

fn default_min_password_length() -> usize {
    MIN_MASTER_PASSWORD_LENGTH
}

fn default_generated_length() -> usize {
    12
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            vault_file: default_vault_file(),
            key_file: default_key_file(),
            kdf: default_kdf(),
            pbkdf2_iterations: default_pbkdf2_iterations(),
            argon2_memory_kib: default_argon2_memory_kib(),
            argon2_iterations: default_argon2_iterations(),
            argon2_parallelism: default_argon2_parallelism(),
            max_unlock_attempts: default_max_unlock_attempts(),
            min_password_length: default_min_password_length(),
            generated_length: default_generated_length(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the vault directory.
    pub const FILE_NAME: &'static str = "passvault.toml";

    /// Load settings from `<vault_dir>/passvault.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(vault_dir: &Path) -> Result<Self> {
        let config_path = vault_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            PassVaultError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// Full paths of the vault files inside `vault_dir`.
    pub fn vault_paths(&self, vault_dir: &Path) -> VaultPaths {
        VaultPaths {
            key_file: vault_dir.join(&self.key_file),
            vault_file: vault_dir.join(&self.vault_file),
        }
    }

    /// Convert the KDF settings into crypto-layer params.
    pub fn kdf_params(&self) -> Result<KdfParams> {
        let params = match self.kdf.to_ascii_lowercase().as_str() {
            "pbkdf2" | "pbkdf2-sha256" => KdfParams::Pbkdf2Sha256 {
                iterations: self.pbkdf2_iterations,
            },
            "argon2" | "argon2id" => KdfParams::Argon2id {
                memory_kib: self.argon2_memory_kib,
                iterations: self.argon2_iterations,
                parallelism: self.argon2_parallelism,
            },
            other => {
                return Err(PassVaultError::ConfigError(format!(
                    "unknown kdf '{other}' — supported: pbkdf2, argon2id"
                )))
            }
        };
        params
            .validate()
            .map_err(|e| PassVaultError::ConfigError(e.to_string()))?;
        Ok(params)
    }

    /// Build the session policy (retry budget, password length, KDF).
    pub fn session_policy(&self) -> Result<SessionPolicy> {
        if self.max_unlock_attempts == 0 {
            return Err(PassVaultError::ConfigError(
                "max_unlock_attempts must be at least 1".into(),
            ));
        }
        if self.min_password_length < MIN_MASTER_PASSWORD_LENGTH {
            return Err(PassVaultError::ConfigError(format!(
                "min_password_length must be at least {MIN_MASTER_PASSWORD_LENGTH} (got {})",
                self.min_password_length
            )));
        }
        Ok(SessionPolicy {
            max_unlock_attempts: self.max_unlock_attempts,
            min_password_length: self.min_password_length,
            kdf: self.kdf_params()?,
        })
    }
}

// ── Tests ────────────────────────────────────────────────────────────
