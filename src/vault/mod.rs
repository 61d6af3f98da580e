//! Vault module — authenticated access to the encrypted credential store.
//!
//! This module provides:
//! - `CredentialRecord` and `VaultDocument` types (`record`)
//! - JSON encoding of the document (`codec`)
//! - The key metadata file: salt + verifier (`metadata`)
//! - `VaultSession`, the lock/unlock gate (`session`)
//! - `VaultStore` for load / save / put / delete (`store`)

mod atomic;
pub mod codec;
pub mod metadata;
pub mod record;
pub mod session;
pub mod store;

// Re-export the most commonly used items.
pub use metadata::KeyMetadata;
pub use record::{CredentialRecord, VaultDocument};
pub use session::{
    AuthState, SessionPolicy, VaultPaths, VaultSession, VaultStatus, MIN_MASTER_PASSWORD_LENGTH,
};
pub use store::{PutOutcome, VaultStore};
