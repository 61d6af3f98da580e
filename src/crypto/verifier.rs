//! Master-password verifier.
//!
//! The verifier is the lowercase hex SHA-256 digest of the password.
//! It is stored in the key metadata file and lets `unlock` reject a wrong
//! password before paying for key derivation.  It is deliberately a
//! different primitive from the stretched KDF that produces the vault key.

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Compute the hex-encoded SHA-256 verifier for `password`.
pub fn password_verifier(password: &[u8]) -> String {
    hex::encode(Sha256::digest(password))
}

/// Check `password` against a stored verifier.
///
/// Compares in constant time so a mismatch reveals nothing about how
/// many leading characters matched.  Stored hex is matched
/// case-insensitively.
pub fn verify_password(password: &[u8], stored_verifier: &str) -> bool {
    let candidate = password_verifier(password);
    let stored = stored_verifier.to_ascii_lowercase();

    candidate.as_bytes().ct_eq(stored.as_bytes()).into()
}
