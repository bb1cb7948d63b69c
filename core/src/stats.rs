//! Purchase statistics derived from the ledger.
//!
//! [`LedgerStats`] folds a snapshot of ledger lines into counts, revenue and
//! per-category tallies. A line that cannot be decoded, or whose total is not
//! a number, is skipped and counted as malformed; it never aborts the rest of
//! the aggregation.
//!
//! ```
//! use ticket_ledger_core::stats::LedgerStats;
//!
//! let stats = LedgerStats::from_lines([
//!     "2025-01-01 09:00:00|Adult|Single|3|7.5",
//!     "2025-01-01 09:05:00|Student|Single|1|1.5",
//!     "not a purchase",
//! ]);
//! assert_eq!(stats.purchase_count(), 2);
//! assert_eq!(stats.malformed(), 1);
//! assert_eq!(stats.revenue().to_string(), "9.0");
//! ```

use crate::ledger::{Ledger, LedgerError};
use crate::purchase::{DecodeError, PurchaseRecord};
use rust_decimal::Decimal;
use tracing::debug;

/// Default maximum bar length for [`LedgerStats::bar_chart`].
pub const DEFAULT_BAR_WIDTH: usize = 30;

/// Widest bar a configured chart may draw.
pub const MAX_BAR_WIDTH: usize = 200;

/// Purchases and revenue for one category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryTally {
    /// Category name as recorded in the ledger
    pub category: String,
    /// Number of purchases
    pub purchases: usize,
    /// Sum of purchase totals in pounds
    pub revenue: Decimal,
}

/// One row of the purchases-by-category bar chart.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BarRow<'a> {
    /// Category name
    pub category: &'a str,
    /// Number of purchases
    pub purchases: usize,
    /// Bar length, proportional to `purchases` relative to the busiest
    /// category
    pub bar_len: usize,
}

/// Aggregated ledger statistics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LedgerStats {
    purchase_count: usize,
    malformed: usize,
    revenue: Decimal,
    tickets_sold: u64,
    by_category: Vec<CategoryTally>,
}

impl LedgerStats {
    /// Creates empty statistics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregates a sequence of raw ledger lines.
    #[must_use]
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut stats = Self::new();
        for (index, line) in lines.into_iter().enumerate() {
            let outcome = PurchaseRecord::decode(line.as_ref())
                .and_then(|record| stats.add(&record));
            if let Err(reason) = outcome {
                debug!(line = index + 1, %reason, "Skipping malformed ledger line");
                stats.malformed += 1;
            }
        }
        stats
    }

    /// Reads the whole ledger and aggregates it.
    ///
    /// # Errors
    ///
    /// Propagates [`Ledger::read_all`] failures.
    pub fn from_ledger<L: Ledger + ?Sized>(ledger: &L) -> Result<Self, LedgerError> {
        Ok(Self::from_lines(ledger.read_all()?))
    }

    /// Folds one decoded record into the statistics.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::InvalidTotal`] if the total is not a number, or
    /// would overflow the running revenue or its category's revenue. The
    /// statistics are unchanged in that case.
    pub fn add(&mut self, record: &PurchaseRecord) -> Result<(), DecodeError> {
        let total = record.total_amount()?;
        let overflow = || DecodeError::InvalidTotal(record.total.clone());

        let revenue = self.revenue.checked_add(total).ok_or_else(overflow)?;
        let slot = self
            .by_category
            .iter()
            .position(|tally| tally.category == record.category);
        let category_revenue = match slot {
            Some(index) => self.by_category[index]
                .revenue
                .checked_add(total)
                .ok_or_else(overflow)?,
            None => total,
        };

        self.revenue = revenue;
        self.purchase_count += 1;
        if let Ok(quantity) = record.quantity_value() {
            self.tickets_sold = self.tickets_sold.saturating_add(u64::from(quantity));
        }

        match slot {
            Some(index) => {
                let tally = &mut self.by_category[index];
                tally.purchases += 1;
                tally.revenue = category_revenue;
            }
            None => self.by_category.push(CategoryTally {
                category: record.category.clone(),
                purchases: 1,
                revenue: category_revenue,
            }),
        }
        Ok(())
    }

    /// Number of valid purchases
    #[must_use]
    pub const fn purchase_count(&self) -> usize {
        self.purchase_count
    }

    /// Number of skipped lines
    #[must_use]
    pub const fn malformed(&self) -> usize {
        self.malformed
    }

    /// Sum of all valid purchase totals, in pounds
    #[must_use]
    pub const fn revenue(&self) -> Decimal {
        self.revenue
    }

    /// Sum of quantities over purchases with a readable quantity
    #[must_use]
    pub const fn tickets_sold(&self) -> u64 {
        self.tickets_sold
    }

    /// Mean purchase value, or `None` when there are no purchases.
    #[must_use]
    pub fn average(&self) -> Option<Decimal> {
        if self.purchase_count == 0 {
            return None;
        }
        self.revenue.checked_div(Decimal::from(self.purchase_count))
    }

    /// Per-category tallies in first-seen order.
    #[must_use]
    pub fn by_category(&self) -> &[CategoryTally] {
        &self.by_category
    }

    /// Purchase count for one category.
    #[must_use]
    pub fn category_count(&self, category: &str) -> Option<usize> {
        self.by_category
            .iter()
            .find(|tally| tally.category == category)
            .map(|tally| tally.purchases)
    }

    /// Tallies sorted by descending purchase count. Ties keep first-seen
    /// order.
    #[must_use]
    pub fn ranked_categories(&self) -> Vec<&CategoryTally> {
        let mut ranked: Vec<&CategoryTally> = self.by_category.iter().collect();
        ranked.sort_by(|a, b| b.purchases.cmp(&a.purchases));
        ranked
    }

    /// Ranked bar chart rows, with the busiest category at `width`.
    #[must_use]
    pub fn bar_chart(&self, width: usize) -> Vec<BarRow<'_>> {
        let ranked = self.ranked_categories();
        let max = ranked.first().map_or(0, |tally| tally.purchases);

        ranked
            .into_iter()
            .map(|tally| BarRow {
                category: &tally.category,
                purchases: tally.purchases,
                bar_len: scale(tally.purchases, width, max),
            })
            .collect()
    }
}

/// `count * width / max` without intermediate overflow. `count <= max`, so
/// the result never exceeds `width`.
fn scale(count: usize, width: usize, max: usize) -> usize {
    if max == 0 {
        return 0;
    }
    let widen = |n: usize| u128::try_from(n).unwrap_or(u128::MAX);
    let scaled = widen(count).saturating_mul(widen(width)) / widen(max);
    usize::try_from(scaled).unwrap_or(width)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINES: [&str; 5] = [
        "2025-01-01 09:00:00|Adult|Single|3|7.5",
        "2025-01-01 09:05:00|Student|Single|1|1.5",
        "2025-01-01 09:10:00|Adult|Day Rider|1|4.5",
        "2025-01-01 09:15:00|Adult|Single",
        "2025-01-01 09:20:00|Student|Weekly|1|free",
    ];

    #[test]
    fn test_counts_valid_lines_and_skips_malformed() {
        let stats = LedgerStats::from_lines(LINES);
        assert_eq!(stats.purchase_count(), 3);
        assert_eq!(stats.malformed(), 2);
        assert_eq!(stats.revenue(), Decimal::new(135, 1));
        assert_eq!(stats.tickets_sold(), 5);
        assert_eq!(stats.average(), Some(Decimal::new(45, 1)));
    }

    #[test]
    fn test_per_category_tallies() {
        let stats = LedgerStats::from_lines(LINES);
        assert_eq!(stats.category_count("Adult"), Some(2));
        assert_eq!(stats.category_count("Student"), Some(1));
        assert_eq!(stats.category_count("Child"), None);

        let adult = &stats.by_category()[0];
        assert_eq!(adult.revenue, Decimal::new(120, 1));
    }

    #[test]
    fn test_empty_ledger() {
        let stats = LedgerStats::from_lines(Vec::<String>::new());
        assert_eq!(stats.purchase_count(), 0);
        assert_eq!(stats.revenue(), Decimal::ZERO);
        assert_eq!(stats.average(), None);
        assert!(stats.by_category().is_empty());
        assert!(stats.bar_chart(DEFAULT_BAR_WIDTH).is_empty());
    }

    #[test]
    fn test_bar_chart_scales_to_busiest_category() {
        let stats = LedgerStats::from_lines([
            "t|Student|Single|1|1.5",
            "t|Adult|Single|1|2.5",
            "t|Adult|Single|1|2.5",
            "t|Adult|Single|1|2.5",
            "t|Child|Single|1|1.0",
        ]);

        let rows: Vec<(&str, usize, usize)> = stats
            .bar_chart(30)
            .iter()
            .map(|row| (row.category, row.purchases, row.bar_len))
            .collect();
        assert_eq!(
            rows,
            vec![("Adult", 3, 30), ("Student", 1, 10), ("Child", 1, 10)]
        );
    }

    #[test]
    fn test_add_rejects_non_numeric_total_without_side_effects() {
        let mut stats = LedgerStats::new();
        let record = PurchaseRecord {
            timestamp: "t".to_string(),
            category: "Adult".to_string(),
            topup_type: "Single".to_string(),
            quantity: "1".to_string(),
            total: "n/a".to_string(),
        };
        assert!(stats.add(&record).is_err());
        assert_eq!(stats, LedgerStats::new());
    }

    #[test]
    fn test_category_revenue_overflow_counts_as_malformed() {
        let big = "70000000000000000000000000000";
        let stats = LedgerStats::from_lines([
            format!("t|Adult|Single|1|{big}"),
            format!("t|Student|Single|1|-{big}"),
            format!("t|Adult|Single|1|{big}"),
        ]);

        assert_eq!(stats.purchase_count(), 2);
        assert_eq!(stats.malformed(), 1);
        assert_eq!(stats.revenue(), Decimal::ZERO);
        assert_eq!(stats.category_count("Adult"), Some(1));
        assert_eq!(
            stats.by_category()[0].revenue,
            Decimal::from_str_exact(big).unwrap()
        );
    }

    #[test]
    fn test_bar_chart_with_huge_width() {
        let stats = LedgerStats::from_lines([
            "t|Adult|Single|1|2.5",
            "t|Adult|Single|1|2.5",
            "t|Child|Single|1|1.0",
        ]);
        let lengths: Vec<usize> = stats
            .bar_chart(usize::MAX)
            .iter()
            .map(|row| row.bar_len)
            .collect();
        assert_eq!(lengths, vec![usize::MAX, usize::MAX / 2]);
    }
}
