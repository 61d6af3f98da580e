//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::password::{StrengthLabel, StrengthReport};
use crate::vault::CredentialRecord;

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print a table of logins (Service, Username, Created), optionally
/// with the password column.
pub fn print_credentials_table(entries: &[(String, CredentialRecord)], show_passwords: bool) {
    if entries.is_empty() {
        info("No passwords stored yet.");
        tip("Run `passvault add <SERVICE>` to add your first login.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    if show_passwords {
        table.set_header(vec!["Service", "Username", "Password", "Created"]);
    } else {
        table.set_header(vec!["Service", "Username", "Created"]);
    }

    for (service, record) in entries {
        let mut row = vec![service.clone(), display_username(record)];
        if show_passwords {
            row.push(record.password.clone());
        }
        row.push(record.created_display());
        table.add_row(row);
    }

    println!("{table}");
}

/// Print a strength label (colored by level) and any suggestions.
pub fn print_strength(report: &StrengthReport) {
    let label = match report.label {
        StrengthLabel::VeryWeak | StrengthLabel::Weak => style(report.label.as_str()).red(),
        StrengthLabel::Fair => style(report.label.as_str()).yellow(),
        StrengthLabel::Good | StrengthLabel::Strong => style(report.label.as_str()).green(),
    };
    println!("Password strength: {}", label.bold());

    if !report.suggestions.is_empty() {
        tip(&format!("Suggestions: {}", report.suggestions.join(", ")));
    }
}

fn display_username(record: &CredentialRecord) -> String {
    if record.username.is_empty() {
        "N/A".to_string()
    } else {
        record.username.clone()
    }
}
