//! `passvault delete` — remove a login from the vault.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{unlock_session, Cli};
use crate::errors::{PassVaultError, Result};

/// Execute the `delete` command.
pub fn execute(cli: &Cli, service: &str, force: bool) -> Result<()> {
    let service = service.trim();
    let (dir, _settings, session) = unlock_session(cli)?;
    let store = session.store();

    // Show what would go before asking.
    let record = store.get(&session, service)?;

    if !force {
        output::info(&format!(
            "Entry to delete: {service} (username: {})",
            if record.username.is_empty() {
                "N/A"
            } else {
                record.username.as_str()
            }
        ));
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete login for '{service}'?"))
            .default(false)
            .interact()
            .map_err(|e| PassVaultError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Deletion cancelled.");
            return Ok(());
        }
    }

    store.delete(&session, service)?;

    crate::audit::log_audit(&dir, "delete", Some(service), None);
    output::success(&format!("Deleted login for '{service}'"));

    Ok(())
}
