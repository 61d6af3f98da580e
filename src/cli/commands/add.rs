//! `passvault add` — add or overwrite a login.

use std::io::{self, IsTerminal, Read};

use dialoguer::{Confirm, Input};
use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{unlock_session, Cli};
use crate::errors::{PassVaultError, Result};
use crate::password::{generate_password, score_strength};
use crate::vault::PutOutcome;

/// Options for the `add` command, straight from the CLI flags.
pub struct AddArgs<'a> {
    pub service: &'a str,
    pub username: Option<&'a str>,
    pub generate: bool,
    pub length: Option<usize>,
    pub no_symbols: bool,
    pub force: bool,
}

/// Execute the `add` command.
pub fn execute(cli: &Cli, args: &AddArgs<'_>) -> Result<()> {
    let service = args.service.trim();
    if service.is_empty() {
        return Err(PassVaultError::InvalidInput(
            "service name cannot be empty".into(),
        ));
    }

    let (dir, settings, session) = unlock_session(cli)?;
    let store = session.store();

    let username = match args.username {
        Some(u) => u.trim().to_string(),
        None => Input::<String>::new()
            .with_prompt("Username/Email")
            .allow_empty(true)
            .interact_text()
            .map_err(|e| PassVaultError::CommandFailed(format!("input prompt: {e}")))?
            .trim()
            .to_string(),
    };

    let password = if args.generate {
        let length = args.length.unwrap_or(settings.generated_length);
        let pw = Zeroizing::new(generate_password(length, !args.no_symbols)?);
        output::info(&format!("Generated password: {}", pw.as_str()));
        pw
    } else {
        read_password(service)?
    };

    output::print_strength(&score_strength(&password));

    if !args.force && store.contains(&session, service)? {
        let overwrite = Confirm::new()
            .with_prompt(format!("Entry for '{service}' exists. Overwrite?"))
            .default(false)
            .interact()
            .map_err(|e| PassVaultError::CommandFailed(format!("confirm prompt: {e}")))?;
        if !overwrite {
            output::info("Operation cancelled.");
            return Ok(());
        }
    }

    let outcome = store.put(&session, service, &username, &password)?;
    let detail = match outcome {
        PutOutcome::Added => "added",
        PutOutcome::Updated => "updated",
    };
    crate::audit::log_audit(&dir, "add", Some(service), Some(detail));

    output::success(&format!("Password for '{service}' {detail}."));
    Ok(())
}

/// Password from piped stdin, or a hidden prompt on a terminal.
fn read_password(service: &str) -> Result<Zeroizing<String>> {
    if !io::stdin().is_terminal() {
        let mut buf = Zeroizing::new(String::new());
        io::stdin().read_to_string(&mut buf)?;
        let trimmed = Zeroizing::new(buf.trim_end_matches(['\r', '\n']).to_string());
        return Ok(trimmed);
    }

    let pw = dialoguer::Password::new()
        .with_prompt(format!("Password for {service}"))
        .interact()
        .map_err(|e| PassVaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}
