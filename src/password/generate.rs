//! Random password generation.

use rand::Rng;

use crate::errors::{PassVaultError, Result};

/// ASCII letters and digits, always part of the alphabet.
pub const ALPHANUMERIC: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Symbols added when `include_symbols` is set.
pub const SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Longest password `generate_password` will produce.
pub const MAX_LENGTH: usize = 1024;

/// The alphabet `generate_password` draws from.
pub fn alphabet(include_symbols: bool) -> Vec<char> {
    let mut chars: Vec<char> = ALPHANUMERIC.chars().collect();
    if include_symbols {
        chars.extend(SYMBOLS.chars());
    }
    chars
}

/// Generate a `length`-character password, each character drawn
/// uniformly from the alphabet with the thread-local CSPRNG.
pub fn generate_password(length: usize, include_symbols: bool) -> Result<String> {
    if length == 0 || length > MAX_LENGTH {
        return Err(PassVaultError::InvalidInput(format!(
            "password length must be between 1 and {MAX_LENGTH}"
        )));
    }

    let chars = alphabet(include_symbols);
    let mut rng = rand::rng();
    Ok((0..length)
        .map(|_| chars[rng.random_range(0..chars.len())])
        .collect())
}
