//! `passvault backup-info` — explain which files make up a vault backup.

use std::fs;

use crate::cli::output;
use crate::cli::{open_session, Cli};
use crate::errors::Result;
use crate::vault::VaultPaths;

/// Name of the file written by `--write`.
pub const BACKUP_INFO_FILE: &str = "BACKUP_INFO.txt";

/// Execute the `backup-info` command.  Needs no master password.
pub fn execute(cli: &Cli, write: bool) -> Result<()> {
    let (dir, _settings, session) = open_session(cli)?;
    let text = backup_instructions(session.paths());

    print!("{text}");

    if write {
        fs::create_dir_all(&dir)?;
        let path = dir.join(BACKUP_INFO_FILE);
        fs::write(&path, &text)?;
        output::success(&format!("Wrote backup instructions to {}", path.display()));
    }

    Ok(())
}

/// The backup instructions for a vault at `paths`.
pub fn backup_instructions(paths: &VaultPaths) -> String {
    let name = |p: &std::path::Path| {
        p.file_name()
            .map_or_else(|| p.display().to_string(), |n| n.to_string_lossy().into_owned())
    };

    format!(
        "PassVault Backup Files\n\
         ==============================\n\
         Files to back up:\n\
         1. {} (encrypted passwords)\n\
         2. {} (salt and password check)\n\
         \n\
         To restore:\n\
         1. Copy both files into the vault directory\n\
         2. Run any passvault command\n\
         3. Use your master password to unlock\n\
         \n\
         Both files are needed: neither is useful without the other,\n\
         and neither contains your master password.\n",
        name(&paths.vault_file),
        name(&paths.key_file),
    )
}
