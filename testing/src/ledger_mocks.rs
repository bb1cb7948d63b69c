//! In-memory ledger implementations for tests.
//!
//! - [`InMemoryLedger`]: shared, vector-backed ledger
//! - [`FailingLedger`]: every operation fails, for error-path tests

use std::sync::{Arc, RwLock};
use ticket_ledger_core::ledger::{Ledger, LedgerError, ensure_single_line};

/// Vector-backed ledger.
///
/// Clones share the same storage, so a test can hand one clone to the code
/// under test and inspect the other.
///
/// # Example
///
/// ```
/// use ticket_ledger_core::Ledger;
/// use ticket_ledger_testing::InMemoryLedger;
///
/// let ledger = InMemoryLedger::with_lines(["t|Adult|Single|1|2.5"]);
/// ledger.append("t|Child|Single|1|1.0").unwrap();
/// assert_eq!(ledger.len(), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct InMemoryLedger {
    lines: Arc<RwLock<Vec<String>>>,
}

impl InMemoryLedger {
    /// Create an empty ledger
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a ledger pre-filled with raw lines (which are not validated)
    #[must_use]
    pub fn with_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: Arc::new(RwLock::new(lines.into_iter().map(Into::into).collect())),
        }
    }

    /// Snapshot of the stored lines
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .read()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }

    /// Number of stored lines
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.read().map_or(0, |lines| lines.len())
    }

    /// Returns `true` if nothing has been stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Ledger for InMemoryLedger {
    fn append(&self, line: &str) -> Result<(), LedgerError> {
        ensure_single_line(line)?;
        self.lines
            .write()
            .map_err(|e| LedgerError::Storage(format!("Lock poisoned: {e}")))?
            .push(line.to_string());
        Ok(())
    }

    fn read_all(&self) -> Result<Vec<String>, LedgerError> {
        self.lines
            .read()
            .map(|lines| lines.clone())
            .map_err(|e| LedgerError::Storage(format!("Lock poisoned: {e}")))
    }
}

/// Ledger whose every operation fails with [`LedgerError::Storage`].
#[derive(Clone, Copy, Debug, Default)]
pub struct FailingLedger;

impl Ledger for FailingLedger {
    fn append(&self, _line: &str) -> Result<(), LedgerError> {
        Err(LedgerError::Storage("ledger is read-only".to_string()))
    }

    fn read_all(&self) -> Result<Vec<String>, LedgerError> {
        Err(LedgerError::Storage("ledger is unavailable".to_string()))
    }
}
