use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in PassVault.
#[derive(Debug, Error)]
pub enum PassVaultError {
    // --- Validation errors ---
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Password must be at least {0} characters long")]
    PasswordTooShort(usize),

    #[error("Password mismatch — passwords do not match")]
    PasswordMismatch,

    // --- Authentication errors ---
    #[error("Incorrect master password")]
    WrongPassword,

    #[error("Too many failed attempts — restart passvault to try again")]
    TooManyAttempts,

    #[error("Decryption failed — wrong key or corrupted data")]
    DecryptionFailed,

    #[error("Vault is locked — unlock it with the master password first")]
    VaultLocked,

    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Persistence errors ---
    #[error("Vault already exists at {0}")]
    VaultAlreadyExists(PathBuf),

    #[error("Key metadata file is corrupt: {0}")]
    CorruptMetadata(String),

    #[error("Could not read vault: {0}")]
    VaultReadFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- Lookup errors ---
    #[error("No entry for '{0}'")]
    CredentialNotFound(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- Audit errors ---
    #[error("Audit error: {0}")]
    AuditError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("User cancelled operation")]
    UserCancelled,
}

impl PassVaultError {
    /// True for the authentication failures: a wrong password, an
    /// exhausted retry budget, or ciphertext that failed its integrity check.
    pub fn is_authentication_failure(&self) -> bool {
        matches!(
            self,
            Self::WrongPassword | Self::TooManyAttempts | Self::DecryptionFailed
        )
    }
}

/// Convenience type alias for PassVault results.
pub type Result<T> = std::result::Result<T, PassVaultError>;
