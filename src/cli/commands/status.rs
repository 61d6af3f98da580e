//! `passvault status` — show vault files and lock state.

use crate::cli::output;
use crate::cli::{open_session, unlock_session, Cli};
use crate::errors::Result;
use crate::vault::{AuthState, VaultSession};

/// Execute the `status` command.
///
/// Without `--count` no password is asked for and the entry count is
/// not shown.
pub fn execute(cli: &Cli, count: bool) -> Result<()> {
    let (dir, _settings, session) = if count {
        unlock_session(cli)?
    } else {
        open_session(cli)?
    };

    output::info(&format!("Vault directory: {}", dir.display()));

    if !session.is_initialized() {
        output::info("No vault set up yet.");
        output::tip("Run `passvault init` to create one.");
        return Ok(());
    }

    print_status(&session)
}

fn print_status(session: &VaultSession) -> Result<()> {
    let status = session.status();
    let metadata = session.metadata()?;

    let state = match status.state {
        AuthState::Unlocked => "unlocked",
        AuthState::Locked => "locked",
        AuthState::Exhausted => "locked (too many attempts)",
    };
    println!("State:          {state}");
    println!("Key derivation: {}", metadata.kdf_params().name());

    if let Some(n) = status.entries {
        println!("Total entries:  {n}");
    }

    let size = |s: Option<u64>| s.map_or_else(|| "missing".to_string(), |n| format!("{n} bytes"));
    println!(
        "Key file:       {} ({})",
        session.paths().key_file.display(),
        size(status.key_file_size)
    );
    println!(
        "Vault file:     {} ({})",
        session.paths().vault_file.display(),
        size(status.vault_file_size)
    );

    Ok(())
}
