//! Screen rendering.
//!
//! Pure output: every function writes to the given stream and never reads
//! input, so the same screens serve the interactive session and the
//! one-shot `stats` / `history` commands.

use rust_decimal::Decimal;
use std::io::{self, Write};
use ticket_ledger_core::money::format_pounds;
use ticket_ledger_core::purchase::DecodeError;
use ticket_ledger_core::{Catalog, Category, LedgerStats, Purchase, PurchaseRecord, Ticket};

/// Width of the standard `=` rule.
pub const RULE_WIDTH: usize = 40;

/// Width of the `=` rule on admin reports.
pub const WIDE_RULE_WIDTH: usize = 50;

const BAR_GLYPH: &str = "█";
const CATEGORY_COLUMN: usize = 20;
const DESCRIPTION_PREVIEW: usize = 50;
const ID_PREVIEW: usize = 8;

/// Totals over the readable entries of a purchase listing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ListingSummary {
    /// Entries shown
    pub count: usize,
    /// Sum of their totals, in pounds
    pub total: Decimal,
}

/// A line of `=` characters.
///
/// # Errors
///
/// Propagates write failures.
pub fn rule(out: &mut impl Write, width: usize) -> io::Result<()> {
    writeln!(out, "{}", "=".repeat(width))
}

/// A blank line, then a title between two rules.
///
/// # Errors
///
/// Propagates write failures.
pub fn banner(out: &mut impl Write, title: &str, width: usize) -> io::Result<()> {
    writeln!(out)?;
    rule(out, width)?;
    writeln!(out, "   {title}")?;
    rule(out, width)
}

/// Customer menu.
///
/// # Errors
///
/// Propagates write failures.
pub fn main_menu(out: &mut impl Write) -> io::Result<()> {
    banner(out, "BUS TICKET PURCHASE SYSTEM", RULE_WIDTH)?;
    for line in [
        "1. View Ticket Categories",
        "2. Search Top-ups",
        "3. Purchase Ticket",
        "4. View My Purchases",
        "5. View Purchase Statistics",
        "6. Admin Panel",
        "7. Exit",
    ] {
        writeln!(out, "{line}")?;
    }
    rule(out, RULE_WIDTH)
}

/// Admin menu.
///
/// # Errors
///
/// Propagates write failures.
pub fn admin_menu(out: &mut impl Write) -> io::Result<()> {
    banner(out, "ADMIN PANEL", RULE_WIDTH)?;
    for line in [
        "1. View All Tickets",
        "2. Add New Ticket",
        "3. Edit Ticket Price",
        "4. Delete Ticket",
        "5. View All Purchases",
        "6. View System Statistics",
        "7. Back to Main Menu",
    ] {
        writeln!(out, "{line}")?;
    }
    rule(out, RULE_WIDTH)
}

/// Numbered list of category names.
///
/// # Errors
///
/// Propagates write failures.
pub fn category_names(out: &mut impl Write, catalog: &Catalog) -> io::Result<()> {
    for (number, category) in catalog.categories().iter().enumerate() {
        writeln!(out, "{}. {}", number + 1, category.name())?;
    }
    Ok(())
}

/// Numbered list of a category's tickets with prices.
///
/// # Errors
///
/// Propagates write failures.
pub fn ticket_prices(out: &mut impl Write, category: &Category) -> io::Result<()> {
    writeln!(out, "\nTickets in {}:", category.name())?;
    for (number, ticket) in category.tickets().iter().enumerate() {
        writeln!(out, "{}. {} - {}", number + 1, ticket.topup_type(), ticket.price())?;
    }
    Ok(())
}

/// Full description of one ticket.
///
/// # Errors
///
/// Propagates write failures.
pub fn ticket_details(out: &mut impl Write, ticket: &Ticket) -> io::Result<()> {
    writeln!(out, "\nCategory: {}", ticket.category())?;
    writeln!(out, "Type: {}", ticket.topup_type())?;
    writeln!(out, "Price: {}", ticket.price())?;
    writeln!(out, "Description: {}", ticket.topup_description())?;
    writeln!(out, "Entitlement: {}", ticket.entitlement().kind)?;
    if let Some(value) = ticket.entitlement().describe_value() {
        writeln!(out, "Value: {value}")?;
    }
    if let Some(window) = ticket.validity().describe() {
        writeln!(out, "Valid: {window}")?;
    }
    writeln!(out, "Passenger Class: {}", ticket.passenger_class())?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))
}

/// Category header followed by every ticket's details.
///
/// # Errors
///
/// Propagates write failures.
pub fn category_details(out: &mut impl Write, category: &Category) -> io::Result<()> {
    writeln!(out, "\nCategory: {}", category.name())?;
    writeln!(out, "Available tickets: {}", category.count())?;
    rule(out, RULE_WIDTH)?;
    for (number, ticket) in category.tickets().iter().enumerate() {
        write!(out, "\n{}. {ticket}", number + 1)?;
        ticket_details(out, ticket)?;
    }
    Ok(())
}

/// Search results with price and a description preview.
///
/// # Errors
///
/// Propagates write failures.
pub fn search_results(out: &mut impl Write, term: &str, catalog: &Catalog) -> io::Result<()> {
    let hits = catalog.search(term);
    if hits.is_empty() {
        return writeln!(out, "\nNo tickets found matching '{}'", term.trim());
    }

    writeln!(out, "\nFound {} results:", hits.len())?;
    rule(out, RULE_WIDTH)?;
    for (number, hit) in hits.iter().enumerate() {
        writeln!(out, "\n{}. {} - {}", number + 1, hit.category, hit.ticket.topup_type())?;
        writeln!(out, "   Price: {}", hit.ticket.price())?;
        let description = hit.ticket.topup_description();
        if !description.is_empty() {
            let preview: String = description.chars().take(DESCRIPTION_PREVIEW).collect();
            writeln!(out, "   Description: {preview}...")?;
        }
    }
    Ok(())
}

/// Receipt for a recorded purchase.
///
/// # Errors
///
/// Propagates write failures.
pub fn receipt(out: &mut impl Write, purchase: &Purchase) -> io::Result<()> {
    banner(out, "PURCHASE RECEIPT", RULE_WIDTH)?;
    writeln!(out, "Date: {}", purchase.formatted_timestamp())?;
    writeln!(out, "Category: {}", purchase.category())?;
    writeln!(out, "Ticket: {}", purchase.topup_type())?;
    writeln!(out, "Quantity: {}", purchase.quantity())?;
    writeln!(out, "Unit price: {}", purchase.unit_price())?;
    writeln!(out, "Total: {}", purchase.total())?;
    rule(out, RULE_WIDTH)
}

/// Decodes a line and folds it into `stats`; `stats` is untouched on error.
fn fold_entry(
    stats: &mut LedgerStats,
    line: &str,
) -> Result<(PurchaseRecord, Decimal), DecodeError> {
    let record = PurchaseRecord::decode(line)?;
    let total = record.total_amount()?;
    stats.add(&record)?;
    Ok((record, total))
}

impl From<&LedgerStats> for ListingSummary {
    fn from(stats: &LedgerStats) -> Self {
        Self {
            count: stats.purchase_count(),
            total: stats.revenue(),
        }
    }
}

/// Customer purchase history. Unreadable lines are reported and skipped.
///
/// # Errors
///
/// Propagates write failures.
pub fn purchase_history(out: &mut impl Write, lines: &[String]) -> io::Result<ListingSummary> {
    banner(out, "YOUR PURCHASE HISTORY", RULE_WIDTH)?;

    let mut stats = LedgerStats::new();
    for (number, line) in lines.iter().enumerate() {
        match fold_entry(&mut stats, line) {
            Ok((record, total)) => {
                writeln!(out, "\n{}. Date: {}", number + 1, record.timestamp)?;
                writeln!(out, "   Ticket: {}", record.topup_type)?;
                writeln!(out, "   Quantity: {}", record.quantity)?;
                writeln!(out, "   Total: {}", format_pounds(total))?;
            }
            Err(e) => writeln!(out, "Error reading purchase: {e}")?,
        }
    }

    let summary = ListingSummary::from(&stats);
    writeln!(out)?;
    rule(out, RULE_WIDTH)?;
    writeln!(out, "Total spent: {}", format_pounds(summary.total))?;
    rule(out, RULE_WIDTH)?;
    Ok(summary)
}

/// Admin listing of every purchase with a revenue summary.
///
/// # Errors
///
/// Propagates write failures.
pub fn all_purchases(out: &mut impl Write, lines: &[String]) -> io::Result<ListingSummary> {
    let mut stats = LedgerStats::new();
    for (number, line) in lines.iter().enumerate() {
        match fold_entry(&mut stats, line) {
            Ok((record, total)) => {
                writeln!(out, "\nPurchase #{}:", number + 1)?;
                writeln!(out, "  Date: {}", record.timestamp)?;
                writeln!(out, "  Category: {}", record.category)?;
                writeln!(out, "  Ticket: {}", record.topup_type)?;
                writeln!(out, "  Quantity: {}", record.quantity)?;
                writeln!(out, "  Total: {}", format_pounds(total))?;
            }
            Err(e) => writeln!(out, "Error reading purchase: {e}")?,
        }
    }

    let summary = ListingSummary::from(&stats);
    writeln!(out)?;
    rule(out, WIDE_RULE_WIDTH)?;
    writeln!(out, "SUMMARY:")?;
    writeln!(out, "  Total purchases: {}", summary.count)?;
    writeln!(out, "  Total revenue: {}", format_pounds(summary.total))?;
    rule(out, WIDE_RULE_WIDTH)?;
    Ok(summary)
}

/// Ranked bar chart of purchases per category.
///
/// # Errors
///
/// Propagates write failures.
pub fn stats_chart(out: &mut impl Write, stats: &LedgerStats, width: usize) -> io::Result<()> {
    if stats.purchase_count() == 0 {
        return writeln!(out, "No valid purchase data to analyze.");
    }

    banner(out, "PURCHASES BY CATEGORY", RULE_WIDTH)?;
    for row in stats.bar_chart(width) {
        writeln!(
            out,
            "{:<CATEGORY_COLUMN$} {} ({})",
            row.category,
            BAR_GLYPH.repeat(row.bar_len),
            row.purchases
        )?;
    }
    rule(out, RULE_WIDTH)?;
    writeln!(out, "Total purchases: {}", stats.purchase_count())
}

/// Every ticket by category, with shortened identifiers.
///
/// # Errors
///
/// Propagates write failures.
pub fn all_tickets(out: &mut impl Write, catalog: &Catalog) -> io::Result<()> {
    banner(out, "ALL TICKETS IN SYSTEM", WIDE_RULE_WIDTH)?;
    for category in catalog.categories() {
        writeln!(out, "\n--- {} ---", category.name())?;
        for (number, ticket) in category.tickets().iter().enumerate() {
            let id: String = ticket.topup_id().chars().take(ID_PREVIEW).collect();
            writeln!(out, "  {}. {}", number + 1, ticket.topup_type())?;
            writeln!(out, "     Price: {}", ticket.price())?;
            writeln!(out, "     ID: {id}...")?;
        }
    }
    writeln!(out)?;
    rule(out, WIDE_RULE_WIDTH)?;
    writeln!(out, "Total tickets in system: {}", catalog.ticket_count())?;
    rule(out, WIDE_RULE_WIDTH)
}

/// Catalog sizes plus purchase totals.
///
/// # Errors
///
/// Propagates write failures.
pub fn system_statistics(
    out: &mut impl Write,
    catalog: &Catalog,
    stats: &LedgerStats,
) -> io::Result<()> {
    banner(out, "SYSTEM STATISTICS", WIDE_RULE_WIDTH)?;

    writeln!(out, "\nTICKET INFORMATION:")?;
    writeln!(out, "  Total categories: {}", catalog.len())?;
    writeln!(out, "  Total tickets: {}", catalog.ticket_count())?;

    writeln!(out, "\nTICKETS BY CATEGORY:")?;
    for category in catalog.categories() {
        writeln!(out, "  {}: {} tickets", category.name(), category.count())?;
    }

    writeln!(out, "\nPURCHASE INFORMATION:")?;
    match stats.average() {
        Some(average) => {
            writeln!(out, "  Total purchases: {}", stats.purchase_count())?;
            writeln!(out, "  Total revenue: {}", format_pounds(stats.revenue()))?;
            writeln!(out, "  Average purchase: {}", format_pounds(average))?;
        }
        None => writeln!(out, "  No purchases yet")?,
    }
    if stats.malformed() > 0 {
        writeln!(out, "  Unreadable entries: {}", stats.malformed())?;
    }

    writeln!(out)?;
    rule(out, WIDE_RULE_WIDTH)
}
