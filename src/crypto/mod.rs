//! Cryptographic primitives for PassVault.
//!
//! This module provides:
//! - PBKDF2 / Argon2id password-based key derivation (`kdf`)
//! - The zeroize-on-drop session key (`keys`)
//! - The SHA-256 master-password verifier (`verifier`)
//! - AES-256-GCM encryption and decryption (`encryption`)

pub mod encryption;
pub mod kdf;
pub mod keys;
pub mod verifier;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{encrypt, decrypt, derive_key, ...};
pub use encryption::{decrypt, encrypt};
pub use kdf::{derive_key, generate_salt, KdfParams};
pub use keys::DerivedKey;
pub use verifier::{password_verifier, verify_password};
