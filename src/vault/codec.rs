//! JSON encoding of the vault document.
//!
//! This is the only place that knows the plaintext document shape:
//!
//! ```text
//! {
//!   "example.com": {
//!     "username": "alice",
//!     "password": "s3cret",
//!     "created": "2026-10-19T08:30:00.123456789Z"
//!   }
//! }
//! ```
//!
//! The cipher and the store treat the encoded bytes as opaque.

use crate::errors::{PassVaultError, Result};

use super::record::VaultDocument;

/// Serialize a document to pretty-printed JSON bytes.
pub fn encode(doc: &VaultDocument) -> Result<Vec<u8>> {
    serde_json::to_vec_pretty(doc)
        .map_err(|e| PassVaultError::SerializationError(format!("vault document: {e}")))
}

/// Parse JSON bytes back into a document.
pub fn decode(bytes: &[u8]) -> Result<VaultDocument> {
    serde_json::from_slice(bytes)
        .map_err(|e| PassVaultError::SerializationError(format!("vault document: {e}")))
}
