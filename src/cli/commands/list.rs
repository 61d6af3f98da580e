//! `passvault list` — display all logins in a table.

use crate::cli::output;
use crate::cli::{unlock_session, Cli};
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let (_dir, _settings, session) = unlock_session(cli)?;
    let doc = session.store().load(&session)?;

    output::info(&format!("Total accounts: {}", doc.len()));

    let entries: Vec<_> = doc.into_iter().collect();
    output::print_credentials_table(&entries, false);

    Ok(())
}
