//! Authentication gate for one vault.
//!
//! A `VaultSession` is an explicit value owned by the caller.  It starts
//! `Locked`, moves to `Unlocked` once the master password checks out, and
//! falls to `Exhausted` after the retry budget is spent.  Exhaustion lasts
//! for the life of the value; nothing about it is written to disk, so a
//! fresh process gets a fresh budget.
//!
//! Two different digests of the password are in play:
//! - the stored verifier (plain SHA-256) answers "is this the password?";
//! - the stretched KDF output is the actual vault key and is only
//!   computed after the verifier matched.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::crypto::kdf::{generate_salt, KdfParams};
use crate::crypto::keys::DerivedKey;
use crate::crypto::verifier::{password_verifier, verify_password};
use crate::errors::{PassVaultError, Result};

use super::metadata::KeyMetadata;
use super::record::VaultDocument;
use super::store::VaultStore;

/// Default key metadata file name.
pub const DEFAULT_KEY_FILE: &str = "vault.key";

/// Default encrypted data file name.
pub const DEFAULT_VAULT_FILE: &str = "passvault.vault";

/// Shortest master password any policy may allow.
pub const MIN_MASTER_PASSWORD_LENGTH: usize = 6;

/// Where a vault lives on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultPaths {
    /// Salt + verifier record, written once at setup.
    pub key_file: PathBuf,
    /// Encrypted vault document, replaced on every save.
    pub vault_file: PathBuf,
}

impl VaultPaths {
    /// Default file names inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            key_file: dir.join(DEFAULT_KEY_FILE),
            vault_file: dir.join(DEFAULT_VAULT_FILE),
        }
    }
}

/// Knobs that control setup and unlock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionPolicy {
    /// Wrong guesses allowed before the session locks for good.
    pub max_unlock_attempts: u32,
    /// Shortest master password accepted by `setup`.  Values below
    /// `MIN_MASTER_PASSWORD_LENGTH` are raised to it.
    pub min_password_length: usize,
    /// KDF recorded for new vaults.
    pub kdf: KdfParams,
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Self {
            max_unlock_attempts: 3,
            min_password_length: MIN_MASTER_PASSWORD_LENGTH,
            kdf: KdfParams::default(),
        }
    }
}

/// Observable authentication state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Locked,
    Unlocked,
    /// Retry budget spent; only a new session can unlock.
    Exhausted,
}

enum State {
    Locked { attempts_remaining: u32 },
    Unlocked { key: DerivedKey },
    Exhausted,
}

/// Size and count snapshot used by `passvault status`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultStatus {
    pub state: AuthState,
    /// Number of entries, only known while unlocked.
    pub entries: Option<usize>,
    pub key_file_size: Option<u64>,
    pub vault_file_size: Option<u64>,
}

/// One authenticated (or not yet authenticated) session against a vault.
pub struct VaultSession {
    paths: VaultPaths,
    policy: SessionPolicy,
    state: State,
}

impl VaultSession {
    /// Start a locked session with a full retry budget.
    pub fn new(paths: VaultPaths, policy: SessionPolicy) -> Self {
        Self {
            paths,
            policy,
            state: State::Locked {
                attempts_remaining: policy.max_unlock_attempts,
            },
        }
    }

    // ------------------------------------------------------------------
    // Authentication
    // ------------------------------------------------------------------

    /// First-time setup: create the key metadata file and an empty vault.
    ///
    /// Refuses to run when a key metadata file already exists.  On
    /// success the session is unlocked and the returned store is ready.
    pub fn setup(&mut self, password: &str) -> Result<VaultStore> {
        if self.is_initialized() {
            return Err(PassVaultError::VaultAlreadyExists(
                self.paths.key_file.clone(),
            ));
        }
        let min_len = self.min_password_length();
        if password.chars().count() < min_len {
            return Err(PassVaultError::PasswordTooShort(min_len));
        }

        let salt = generate_salt()?;
        // Derive before touching disk so a KDF error leaves no half-made vault.
        let key = DerivedKey::derive(password.as_bytes(), &salt, &self.policy.kdf)?;

        let metadata = KeyMetadata::new(
            &salt,
            password_verifier(password.as_bytes()),
            self.policy.kdf,
        );
        metadata.write_new(&self.paths.key_file)?;

        if self.paths.vault_file.exists() {
            warn!(
                path = %self.paths.vault_file.display(),
                "replacing vault data file left over without key metadata"
            );
        }

        self.state = State::Unlocked { key };

        let store = self.store();
        store.save(self, &VaultDocument::new())?;

        info!(
            path = %self.paths.key_file.display(),
            kdf = self.policy.kdf.name(),
            "vault created"
        );
        Ok(store)
    }

    /// Check a candidate master password.
    ///
    /// - Already unlocked: `Ok(true)`.
    /// - No vault yet: runs `setup` with this password.
    /// - Budget spent: `Err(TooManyAttempts)`, the password is not looked at.
    /// - Match: derives the key and unlocks, `Ok(true)`.
    /// - Mismatch: spends one attempt, `Ok(false)`.
    pub fn unlock(&mut self, password: &str) -> Result<bool> {
        let attempts_remaining = match self.state {
            State::Unlocked { .. } => return Ok(true),
            State::Exhausted => return Err(PassVaultError::TooManyAttempts),
            State::Locked { attempts_remaining } => attempts_remaining,
        };

        if !self.is_initialized() {
            debug!("no key metadata found, running first-time setup");
            return self.setup(password).map(|_| true);
        }

        let metadata = KeyMetadata::read(&self.paths.key_file)?;

        if verify_password(password.as_bytes(), &metadata.password_hash) {
            let key = DerivedKey::derive(
                password.as_bytes(),
                &metadata.salt,
                &metadata.kdf_params(),
            )?;
            self.state = State::Unlocked { key };
            debug!("vault unlocked");
            return Ok(true);
        }

        let attempts_remaining = attempts_remaining.saturating_sub(1);
        info!(attempts_remaining, "incorrect master password");
        self.state = if attempts_remaining == 0 {
            State::Exhausted
        } else {
            State::Locked { attempts_remaining }
        };
        Ok(false)
    }

    /// Drop the key.  An exhausted session stays exhausted.
    pub fn lock(&mut self) {
        if let State::Unlocked { .. } = self.state {
            self.state = State::Locked {
                attempts_remaining: self.policy.max_unlock_attempts,
            };
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// `true` once setup has written the key metadata file.
    pub fn is_initialized(&self) -> bool {
        self.paths.key_file.exists()
    }

    pub fn is_unlocked(&self) -> bool {
        matches!(self.state, State::Unlocked { .. })
    }

    pub fn state(&self) -> AuthState {
        match self.state {
            State::Locked { .. } => AuthState::Locked,
            State::Unlocked { .. } => AuthState::Unlocked,
            State::Exhausted => AuthState::Exhausted,
        }
    }

    /// Guesses left before the session locks for good.  Zero when
    /// exhausted; the full budget while unlocked.
    pub fn attempts_remaining(&self) -> u32 {
        match self.state {
            State::Locked { attempts_remaining } => attempts_remaining,
            State::Unlocked { .. } => self.policy.max_unlock_attempts,
            State::Exhausted => 0,
        }
    }

    pub fn paths(&self) -> &VaultPaths {
        &self.paths
    }

    pub fn policy(&self) -> &SessionPolicy {
        &self.policy
    }

    /// Effective minimum master-password length for `setup`.
    pub fn min_password_length(&self) -> usize {
        self.policy
            .min_password_length
            .max(MIN_MASTER_PASSWORD_LENGTH)
    }

    /// A store handle for this session's vault data file.
    pub fn store(&self) -> VaultStore {
        VaultStore::new(self.paths.vault_file.clone())
    }

    /// Read the key metadata file (for display; never rewritten).
    pub fn metadata(&self) -> Result<KeyMetadata> {
        KeyMetadata::read(&self.paths.key_file)
    }

    /// The live key, or `VaultLocked`.
    pub(crate) fn key(&self) -> Result<&DerivedKey> {
        match &self.state {
            State::Unlocked { key } => Ok(key),
            _ => Err(PassVaultError::VaultLocked),
        }
    }

    /// File sizes and, when unlocked, the entry count.
    pub fn status(&self) -> VaultStatus {
        let file_size = |p: &Path| fs::metadata(p).ok().map(|m| m.len());

        let entries = if self.is_unlocked() {
            match self.store().load(self) {
                Ok(doc) => Some(doc.len()),
                Err(e) => {
                    warn!(error = %e, "could not count vault entries");
                    None
                }
            }
        } else {
            None
        };

        VaultStatus {
            state: self.state(),
            entries,
            key_file_size: file_size(&self.paths.key_file),
            vault_file_size: file_size(&self.paths.vault_file),
        }
    }
}

impl std::fmt::Debug for VaultSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultSession")
            .field("paths", &self.paths)
            .field("state", &self.state())
            .finish()
    }
}
