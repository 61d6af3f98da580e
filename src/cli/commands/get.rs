//! `passvault get` — search logins by service name or username.

use crate::cli::output;
use crate::cli::{unlock_session, Cli};
use crate::errors::{PassVaultError, Result};

/// Execute the `get` command.
pub fn execute(cli: &Cli, query: &str, show: bool, copy: bool) -> Result<()> {
    let (_dir, _settings, session) = unlock_session(cli)?;
    let matches = session.store().search(&session, query)?;

    if matches.is_empty() {
        return Err(PassVaultError::CredentialNotFound(query.to_string()));
    }

    output::info(&format!("Found {} match(es)", matches.len()));
    output::print_credentials_table(&matches, show);

    if copy {
        let [(service, record)] = matches.as_slice() else {
            return Err(PassVaultError::InvalidInput(
                "--copy needs exactly one match — narrow the search".into(),
            ));
        };
        copy_to_clipboard(&record.password)?;
        output::success(&format!("Password for '{service}' copied to clipboard."));
    } else if !show {
        output::tip("Pass --show to print passwords or --copy to copy one.");
    }

    Ok(())
}

fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = arboard::Clipboard::new()
        .map_err(|e| PassVaultError::CommandFailed(format!("clipboard unavailable: {e}")))?;
    clipboard
        .set_text(text.to_string())
        .map_err(|e| PassVaultError::CommandFailed(format!("clipboard write: {e}")))
}
