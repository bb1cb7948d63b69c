//! Append-only purchase ledger.
//!
//! The ledger is the only state that outlives a session. It is a plain text
//! file with one encoded [`Purchase`] per line, written by appending and read
//! back whole.
//!
//! # Implementations
//!
//! - [`FileLedger`]: the production file-backed ledger
//! - `InMemoryLedger` (in `ticket-ledger-testing`): for tests
//!
//! No locking is performed. Only one process should write a ledger file at a
//! time.

use crate::purchase::Purchase;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Default ledger location, relative to the working directory.
pub const DEFAULT_LEDGER_PATH: &str = "data/purchases.txt";

/// Errors that can occur during ledger operations.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Reading or writing the ledger file failed.
    #[error("Ledger I/O error at {}: {source}", path.display())]
    Io {
        /// Ledger file path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },

    /// The line contains a line break and would corrupt the ledger.
    #[error("Ledger entries must be a single line")]
    MultiLine,

    /// Storage failure in a non-file ledger.
    #[error("Ledger storage error: {0}")]
    Storage(String),
}

/// Storage for encoded purchase lines.
pub trait Ledger {
    /// Appends one encoded line.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::MultiLine`] if `line` contains `\n` or `\r`
    /// - [`LedgerError::Io`] / [`LedgerError::Storage`] if the write fails
    fn append(&self, line: &str) -> Result<(), LedgerError>;

    /// Returns every stored line, oldest first.
    ///
    /// A ledger that has never been written to is empty, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Io`] / [`LedgerError::Storage`] if the ledger
    /// exists but cannot be read.
    fn read_all(&self) -> Result<Vec<String>, LedgerError>;

    /// Encodes and appends a purchase.
    ///
    /// # Errors
    ///
    /// Same as [`Ledger::append`].
    fn record(&self, purchase: &Purchase) -> Result<(), LedgerError> {
        self.append(&purchase.encode())
    }
}

/// Rejects lines that would split into several ledger entries.
///
/// # Errors
///
/// Returns [`LedgerError::MultiLine`] if `line` contains a line break.
pub fn ensure_single_line(line: &str) -> Result<(), LedgerError> {
    if line.contains(['\n', '\r']) {
        return Err(LedgerError::MultiLine);
    }
    Ok(())
}

/// File-backed ledger.
#[derive(Clone, Debug)]
pub struct FileLedger {
    path: PathBuf,
}

impl FileLedger {
    /// Creates a ledger at `path`. Nothing is touched until the first append.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Ledger file path
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> LedgerError {
        LedgerError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl Default for FileLedger {
    fn default() -> Self {
        Self::new(DEFAULT_LEDGER_PATH)
    }
}

impl Ledger for FileLedger {
    fn append(&self, line: &str) -> Result<(), LedgerError> {
        ensure_single_line(line)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                warn!(path = %self.path.display(), error = %e, "Failed to open ledger");
                self.io_error(e)
            })?;

        writeln!(file, "{line}").map_err(|e| {
            warn!(path = %self.path.display(), error = %e, "Failed to append to ledger");
            self.io_error(e)
        })?;

        debug!(path = %self.path.display(), "Ledger entry appended");
        Ok(())
    }

    fn read_all(&self) -> Result<Vec<String>, LedgerError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No ledger yet");
                return Ok(Vec::new());
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read ledger");
                return Err(self.io_error(e));
            }
        };

        // Invalid UTF-8 is confined to the lines it appears on.
        let content = String::from_utf8_lossy(&bytes);
        Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }
}
