//! CLI module — Clap argument parser, prompts, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{PassVaultError, Result};
use crate::vault::VaultSession;

/// Environment variable checked before prompting for the master password.
pub const PASSWORD_ENV: &str = "PASSVAULT_PASSWORD";

/// PassVault CLI: local encrypted password vault.
#[derive(Parser)]
#[command(name = "passvault", about = "Local encrypted password vault", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault directory (default: .passvault)
    #[arg(long, env = "PASSVAULT_DIR", default_value = ".passvault", global = true)]
    pub vault_dir: String,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Set up the master password and create an empty vault
    Init,

    /// Add or overwrite a login
    Add {
        /// Website or service name (e.g. example.com)
        service: String,
        /// Username or email (prompted if omitted)
        #[arg(short, long)]
        username: Option<String>,
        /// Generate a random password instead of typing one
        #[arg(short, long)]
        generate: bool,
        /// Length of the generated password
        #[arg(short, long)]
        length: Option<usize>,
        /// Leave symbols out of the generated password
        #[arg(long)]
        no_symbols: bool,
        /// Overwrite an existing entry without asking
        #[arg(short, long)]
        force: bool,
    },

    /// Find logins by service name or username
    Get {
        /// Search text (case-insensitive substring)
        query: String,
        /// Print the matching passwords
        #[arg(long)]
        show: bool,
        /// Copy the password of a single match to the clipboard
        #[arg(short, long)]
        copy: bool,
    },

    /// List all stored logins
    List,

    /// Delete a login
    Delete {
        /// Service name, exactly as stored
        service: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Generate a random password without saving it
    Generate {
        /// Password length
        #[arg(short, long)]
        length: Option<usize>,
        /// Leave symbols out
        #[arg(long)]
        no_symbols: bool,
    },

    /// Show vault files and lock state
    Status {
        /// Unlock the vault to count entries
        #[arg(long)]
        count: bool,
    },

    /// Explain which files to back up
    BackupInfo {
        /// Also write the instructions to BACKUP_INFO.txt in the vault directory
        #[arg(long)]
        write: bool,
    },

    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },

    /// View the audit log of vault operations
    Audit {
        /// Number of entries to show (default: 50)
        #[arg(long, default_value = "50")]
        last: usize,
        /// Show entries since a duration ago (e.g. 7d, 24h, 30m)
        #[arg(long)]
        since: Option<String>,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Resolve `--vault-dir` against the current directory.
pub fn vault_dir(cli: &Cli) -> Result<PathBuf> {
    let dir = PathBuf::from(&cli.vault_dir);
    if dir.is_absolute() {
        return Ok(dir);
    }
    Ok(std::env::current_dir()?.join(dir))
}

/// Load settings and build a locked session for the vault directory.
pub fn open_session(cli: &Cli) -> Result<(PathBuf, Settings, VaultSession)> {
    let dir = vault_dir(cli)?;
    let settings = Settings::load(&dir)?;
    let session = VaultSession::new(settings.vault_paths(&dir), settings.session_policy()?);
    Ok((dir, settings, session))
}

/// Build a session and unlock it.
///
/// A vault that does not exist yet is set up on the spot (first-run
/// convenience).  Otherwise the user gets the session's retry budget
/// of password prompts.
pub fn unlock_session(cli: &Cli) -> Result<(PathBuf, Settings, VaultSession)> {
    let (dir, settings, mut session) = open_session(cli)?;

    if !session.is_initialized() {
        output::info("No vault found — setting up your master password.");
        run_setup(&dir, &mut session)?;
        return Ok((dir, settings, session));
    }

    // Non-interactive: one try, no retries.
    if let Some(password) = env_password() {
        if session.unlock(&password)? {
            return Ok((dir, settings, session));
        }
        crate::audit::log_audit(&dir, "unlock-failed", None, Some(PASSWORD_ENV));
        return Err(PassVaultError::WrongPassword);
    }

    loop {
        let password = prompt_password()?;
        if session.unlock(&password)? {
            return Ok((dir, settings, session));
        }

        crate::audit::log_audit(&dir, "unlock-failed", None, None);
        match session.attempts_remaining() {
            0 => return Err(PassVaultError::TooManyAttempts),
            n => output::warning(&format!("Incorrect password! {n} attempt(s) remaining.")),
        }
    }
}

/// Prompt for a new master password and run `setup`.
pub fn run_setup(dir: &std::path::Path, session: &mut VaultSession) -> Result<()> {
    let password = prompt_new_password(session.min_password_length())?;
    session.setup(&password)?;
    crate::audit::log_audit(dir, "setup", None, Some("vault created"));
    output::success("Master password set successfully!");
    Ok(())
}

/// `PASSVAULT_PASSWORD`, if set and non-empty (CI/scripts).
fn env_password() -> Option<Zeroizing<String>> {
    match std::env::var(PASSWORD_ENV) {
        Ok(pw) if !pw.is_empty() => Some(Zeroizing::new(pw)),
        _ => None,
    }
}

/// Prompt for the master password.
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password() -> Result<Zeroizing<String>> {
    let pw = dialoguer::Password::new()
        .with_prompt("Enter master password")
        .interact()
        .map_err(|e| PassVaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new master password with confirmation.
///
/// Also respects `PASSVAULT_PASSWORD` for scripted/CI usage.
/// Enforces the minimum password length.
pub fn prompt_new_password(min_len: usize) -> Result<Zeroizing<String>> {
    if let Some(pw) = env_password() {
        check_new_password(&pw, &pw, min_len)?;
        return Ok(pw);
    }

    loop {
        let password = Zeroizing::new(
            dialoguer::Password::new()
                .with_prompt(format!("Create a master password (min {min_len} chars)"))
                .interact()
                .map_err(|e| PassVaultError::CommandFailed(format!("password prompt: {e}")))?,
        );
        let confirm = Zeroizing::new(
            dialoguer::Password::new()
                .with_prompt("Confirm master password")
                .interact()
                .map_err(|e| PassVaultError::CommandFailed(format!("password prompt: {e}")))?,
        );

        match check_new_password(&password, &confirm, min_len) {
            Ok(()) => return Ok(password),
            Err(e) => output::warning(&format!("{e}. Try again.")),
        }
    }
}

/// Validate a new master password and its confirmation.
pub fn check_new_password(password: &str, confirm: &str, min_len: usize) -> Result<()> {
    if password.chars().count() < min_len {
        return Err(PassVaultError::PasswordTooShort(min_len));
    }
    if password != confirm {
        return Err(PassVaultError::PasswordMismatch);
    }
    Ok(())
}
