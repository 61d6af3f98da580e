//! One module per subcommand.  Each exposes an `execute` function.

pub mod add;
pub mod audit_cmd;
pub mod backup_info;
pub mod completions;
pub mod delete;
pub mod generate;
pub mod get;
pub mod init;
pub mod list;
pub mod status;
