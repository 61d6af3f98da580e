use clap::Parser;
use passvault::cli::commands::add::AddArgs;
use passvault::cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    init_tracing();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => passvault::cli::commands::init::execute(&cli),
        Commands::Add {
            ref service,
            ref username,
            generate,
            length,
            no_symbols,
            force,
        } => passvault::cli::commands::add::execute(
            &cli,
            &AddArgs {
                service,
                username: username.as_deref(),
                generate,
                length,
                no_symbols,
                force,
            },
        ),
        Commands::Get {
            ref query,
            show,
            copy,
        } => passvault::cli::commands::get::execute(&cli, query, show, copy),
        Commands::List => passvault::cli::commands::list::execute(&cli),
        Commands::Delete { ref service, force } => {
            passvault::cli::commands::delete::execute(&cli, service, force)
        }
        Commands::Generate { length, no_symbols } => {
            passvault::cli::commands::generate::execute(&cli, length, no_symbols)
        }
        Commands::Status { count } => passvault::cli::commands::status::execute(&cli, count),
        Commands::BackupInfo { write } => {
            passvault::cli::commands::backup_info::execute(&cli, write)
        }
        Commands::Completions { shell } => passvault::cli::commands::completions::execute(shell),
        Commands::Audit { last, ref since } => {
            passvault::cli::commands::audit_cmd::execute(&cli, last, since.as_deref())
        }
    };

    if let Err(e) = result {
        passvault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}

/// Diagnostics go to stderr, filtered by `PASSVAULT_LOG` (default: warn).
fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("PASSVAULT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
