//! # Ticket Ledger CLI
//!
//! Terminal front end for browsing the bus ticket catalog, buying tickets
//! and reviewing the purchase ledger.
//!
//! Configuration is loaded from environment variables (via .env file).
//! Command-line arguments override environment variables.
//!
//! Usage:
//!   ticket-ledger           - Interactive menu
//!   ticket-ledger stats     - Print purchases by category
//!   ticket-ledger history   - Print purchase history

use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use ticket_ledger_core::environment::SystemClock;
use ticket_ledger_core::{Catalog, FileLedger};
use tracing::info;

pub mod commands;
pub mod config;
pub mod console;
pub mod error;
pub mod input;
pub mod render;
pub mod session;

pub use config::Config;
pub use console::Console;
pub use error::{CliError, CliResult};
pub use session::Session;

/// Bus ticket catalog and purchase ledger
#[derive(Parser, Debug, Clone)]
#[command(name = "ticket-ledger", version, about)]
pub struct Cli {
    /// Ticket catalog CSV (overrides `TICKET_CATALOG_PATH`)
    #[arg(long, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Purchase ledger file (overrides `TICKET_LEDGER_PATH`)
    #[arg(long, value_name = "PATH")]
    pub ledger: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Run a one-shot command instead of the interactive menu
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// One-shot commands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Print purchases by category
    Stats,
    /// Print purchase history
    History,
}

/// Runs the requested command against the configured files.
///
/// # Errors
///
/// - [`CliError::EmptyCatalog`] if the interactive menu has no tickets to
///   offer
/// - [`CliError::Ledger`] if a one-shot command cannot read the ledger
/// - [`CliError::Io`] if the terminal fails
pub fn run(
    command: Option<Command>,
    config: &Config,
    input: impl BufRead,
    mut output: impl Write,
) -> CliResult<()> {
    let ledger = FileLedger::new(&config.ledger_path);

    match command {
        Some(Command::Stats) => commands::print_stats(&ledger, &mut output, config.bar_width),
        Some(Command::History) => commands::print_history(&ledger, &mut output),
        None => {
            writeln!(output, "Loading ticket data...")?;
            let catalog = Catalog::load(&config.catalog_path);
            if catalog.is_empty() {
                return Err(CliError::EmptyCatalog {
                    path: config.catalog_path.clone(),
                });
            }
            writeln!(output, "Successfully loaded {} tickets", catalog.ticket_count())?;
            info!(ledger = %ledger.path().display(), "Starting session");

            Session::new(
                catalog,
                ledger,
                Arc::new(SystemClock),
                Console::new(input, output),
            )
            .with_admin_password(config.admin_password.clone())
            .with_bar_width(config.bar_width)
            .run()
        }
    }
}
