//! Stateless password helpers: generation and strength scoring.
//!
//! Neither function needs a vault or a session.

pub mod generate;
pub mod strength;

pub use generate::generate_password;
pub use strength::{score_strength, StrengthLabel, StrengthReport};
