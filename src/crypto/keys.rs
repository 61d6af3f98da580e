//! The in-memory session key.

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::kdf::{derive_key, KdfParams, KEY_LEN};
use crate::errors::Result;

/// A 32-byte key derived from the master password.
///
/// Lives only inside an unlocked `VaultSession` and is wiped from
/// memory when dropped.  Never serialized.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    bytes: [u8; KEY_LEN],
}

impl DerivedKey {
    /// Wrap raw key bytes.
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Run the KDF and wrap the result, wiping the temporary copy.
    pub fn derive(password: &[u8], salt: &[u8], params: &KdfParams) -> Result<Self> {
        let mut bytes = derive_key(password, salt, params)?;
        let key = Self::new(bytes);
        bytes.zeroize();
        Ok(key)
    }

    /// Raw key bytes, for handing to the cipher.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DerivedKey(<redacted>)")
    }
}
