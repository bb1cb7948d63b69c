//! Ticket Ledger CLI Entry Point
//!
//! Configuration is loaded from environment variables (via .env file).
//! Command-line arguments override environment variables.

use clap::Parser;
use std::io;
use std::process::ExitCode;
use ticket_ledger_cli::{Cli, Config};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const QUIET_FILTER: &str = "ticket_ledger_core=warn,ticket_ledger_cli=warn";
const VERBOSE_FILTER: &str = "ticket_ledger_core=debug,ticket_ledger_cli=debug";

fn main() -> ExitCode {
    // Load .env file (ignore if not found)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::from_env().with_cli(&cli);
    debug!(?config, "Configuration loaded");

    match ticket_ledger_cli::run(cli.command, &config, io::stdin().lock(), io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(e.exit_code())
        }
    }
}

/// Initialize logging with tracing. Logs go to stderr so they never mix with
/// menu output.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(QUIET_FILTER))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}
