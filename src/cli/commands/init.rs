//! `passvault init` — set the master password and create an empty vault.

use crate::cli::output;
use crate::cli::{open_session, run_setup, Cli};
use crate::errors::{PassVaultError, Result};

/// Execute the `init` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let (dir, _settings, mut session) = open_session(cli)?;

    if session.is_initialized() {
        output::tip("Use `passvault add <SERVICE>` to add logins to the existing vault.");
        return Err(PassVaultError::VaultAlreadyExists(
            session.paths().key_file.clone(),
        ));
    }

    run_setup(&dir, &mut session)?;

    output::info(&format!("Vault created in {}", dir.display()));
    output::tip("Run `passvault add <SERVICE>` to add a login.");
    output::tip("Run `passvault backup-info` to see which files to back up.");

    Ok(())
}
