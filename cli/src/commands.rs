//! One-shot commands that read the ledger and exit.

use crate::error::CliResult;
use crate::render;
use std::io::Write;
use ticket_ledger_core::{Ledger, LedgerStats};
use tracing::debug;

/// Prints the purchases-by-category chart.
///
/// # Errors
///
/// Returns [`crate::CliError::Ledger`] if the ledger exists but cannot be
/// read, or [`crate::CliError::Io`] if writing fails.
pub fn print_stats(ledger: &impl Ledger, out: &mut impl Write, bar_width: usize) -> CliResult<()> {
    let lines = ledger.read_all()?;
    if lines.is_empty() {
        writeln!(out, "No purchase data to analyze.")?;
        return Ok(());
    }

    let stats = LedgerStats::from_lines(&lines);
    debug!(
        purchases = stats.purchase_count(),
        malformed = stats.malformed(),
        "Ledger aggregated"
    );
    render::stats_chart(out, &stats, bar_width)?;
    Ok(())
}

/// Prints every purchase and the total spent.
///
/// # Errors
///
/// Same as [`print_stats`].
pub fn print_history(ledger: &impl Ledger, out: &mut impl Write) -> CliResult<()> {
    let lines = ledger.read_all()?;
    if lines.is_empty() {
        writeln!(out, "No purchases found.")?;
        return Ok(());
    }

    render::purchase_history(out, &lines)?;
    Ok(())
}
