//! `passvault generate` — print a random password without saving it.

use crate::cli::output;
use crate::cli::{vault_dir, Cli};
use crate::config::Settings;
use crate::errors::Result;
use crate::password::{generate_password, score_strength};

/// Execute the `generate` command.  Needs no master password.
pub fn execute(cli: &Cli, length: Option<usize>, no_symbols: bool) -> Result<()> {
    let length = match length {
        Some(n) => n,
        None => Settings::load(&vault_dir(cli)?)?.generated_length,
    };

    let password = generate_password(length, !no_symbols)?;
    println!("{password}");
    output::print_strength(&score_strength(&password));

    Ok(())
}
