//! `passvault audit` — display the audit log.
//!
//! Usage:
//!   passvault audit               # show last 50 entries
//!   passvault audit --last 20     # show last 20
//!   passvault audit --since 7d    # entries from last 7 days

use chrono::{DateTime, TimeDelta, Utc};

use crate::cli::Cli;
use crate::errors::{PassVaultError, Result};

/// Execute the `audit` command.
#[cfg(feature = "audit-log")]
pub fn execute(cli: &Cli, last: usize, since: Option<&str>) -> Result<()> {
    use crate::audit::AuditLog;
    use crate::cli::{output, vault_dir};

    let dir = vault_dir(cli)?;
    let audit = AuditLog::open(&dir)
        .ok_or_else(|| PassVaultError::AuditError("failed to open audit database".into()))?;

    let since_dt = since.map(parse_duration).transpose()?;
    let entries = audit.query(last, since_dt)?;

    if entries.is_empty() {
        output::info("No audit entries found.");
        return Ok(());
    }

    print_audit_table(&entries);
    Ok(())
}

#[cfg(not(feature = "audit-log"))]
pub fn execute(cli: &Cli, last: usize, since: Option<&str>) -> Result<()> {
    let _ = (cli, last, since);
    Err(PassVaultError::AuditError(
        "audit log not compiled — rebuild with `--features audit-log`".into(),
    ))
}

/// Parse a human-friendly duration string like "7d", "24h", "30m" into
/// the point in time that far back.
#[cfg_attr(not(feature = "audit-log"), allow(dead_code))]
fn parse_duration(input: &str) -> Result<DateTime<Utc>> {
    let input = input.trim();

    let (num_str, unit) = if let Some(s) = input.strip_suffix('d') {
        (s, 'd')
    } else if let Some(s) = input.strip_suffix('h') {
        (s, 'h')
    } else if let Some(s) = input.strip_suffix('m') {
        (s, 'm')
    } else {
        return Err(PassVaultError::CommandFailed(format!(
            "invalid duration '{input}' — use format like 7d, 24h, or 30m"
        )));
    };

    let num: i64 = num_str.parse().map_err(|_| {
        PassVaultError::CommandFailed(format!(
            "invalid duration '{input}' — number part is not valid"
        ))
    })?;
    if num < 0 {
        return Err(PassVaultError::CommandFailed(format!(
            "invalid duration '{input}' — must not be negative"
        )));
    }

    let duration = match unit {
        'd' => TimeDelta::try_days(num),
        'h' => TimeDelta::try_hours(num),
        _ => TimeDelta::try_minutes(num),
    };

    duration
        .and_then(|d| Utc::now().checked_sub_signed(d))
        .ok_or_else(|| {
            PassVaultError::CommandFailed(format!("invalid duration '{input}' — too large"))
        })
}

/// Print audit entries in a formatted table.
#[cfg(feature = "audit-log")]
fn print_audit_table(entries: &[crate::audit::AuditEntry]) {
    use comfy_table::{ContentArrangement, Table};
    use console::style;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Time", "Operation", "Service", "Details"]);

    for entry in entries {
        table.add_row(vec![
            entry.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            colorize_operation(&entry.operation),
            entry.service.as_deref().unwrap_or("-").to_string(),
            entry.details.as_deref().unwrap_or("-").to_string(),
        ]);
    }

    println!(
        "{}",
        style(format!("{} audit entries:", entries.len())).bold()
    );
    println!("{table}");
}

/// Colorize operation names for display.
#[cfg(feature = "audit-log")]
fn colorize_operation(op: &str) -> String {
    use console::style;

    match op {
        "setup" => style(op).green().to_string(),
        "add" => style(op).blue().to_string(),
        "delete" => style(op).red().to_string(),
        "unlock-failed" => style(op).yellow().to_string(),
        _ => op.to_string(),
    }
}
