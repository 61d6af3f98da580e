//! Configuration loaded from `passvault.toml` in the vault directory.

pub mod settings;

pub use settings::Settings;
