//! CLI Error Types

use std::io;
use std::path::PathBuf;
use thiserror::Error;
use ticket_ledger_core::LedgerError;

/// Fatal CLI errors. Everything else is reported inside the session and
/// the session carries on.
#[derive(Error, Debug)]
pub enum CliError {
    /// The catalog could not be loaded or has no tickets.
    #[error("Cannot run without ticket data. Exiting.")]
    EmptyCatalog {
        /// Catalog file that was tried
        path: PathBuf,
    },

    /// The ledger could not be read for a non-interactive command.
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    /// Terminal input or output failed.
    #[error("Terminal I/O error: {0}")]
    Io(#[from] io::Error),
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get exit code for this error
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::EmptyCatalog { .. } => 1,
            Self::Ledger(_) => 3,
            Self::Io(_) => 5,
        }
    }
}
