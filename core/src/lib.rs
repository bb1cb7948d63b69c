//! # Ticket Ledger Core
//!
//! Domain types and storage for a bus ticket catalog and its purchase ledger.
//!
//! ## Core Concepts
//!
//! - **Ticket**: A purchasable product loaded from the catalog CSV
//! - **Category**: A named, ordered group of tickets (e.g. "Adult")
//! - **Catalog**: All categories, in first-seen order
//! - **Purchase**: An immutable record of one sale, priced at purchase time
//! - **Ledger**: Append-only storage for encoded purchases
//! - **Stats**: Aggregates derived from a snapshot of the ledger
//!
//! ## Example
//!
//! ```
//! use ticket_ledger_core::{Catalog, Purchase};
//! use ticket_ledger_core::environment::SystemClock;
//!
//! let csv = "category_title,topup_title,topup_price_in_pence\nAdult,Single,250\n";
//! let catalog = Catalog::from_reader(csv.as_bytes()).unwrap();
//! let ticket = &catalog.categories()[0].tickets()[0];
//!
//! let purchase = Purchase::new(ticket, 3, &SystemClock).unwrap();
//! assert_eq!(purchase.total().to_string(), "£7.50");
//! assert!(purchase.encode().ends_with("|Adult|Single|3|7.5"));
//! ```

pub mod catalog;
pub mod category;
pub mod ledger;
pub mod money;
pub mod purchase;
pub mod stats;
pub mod ticket;

pub use chrono::{DateTime, Utc};

pub use catalog::{Catalog, CatalogError, SearchHit};
pub use category::Category;
pub use ledger::{FileLedger, Ledger, LedgerError};
pub use money::{Price, PriceError};
pub use purchase::{DecodeError, Purchase, PurchaseError, PurchaseRecord};
pub use stats::LedgerStats;
pub use ticket::{NewTicket, Ticket, TicketRecord};

/// Environment module - injected dependencies
///
/// Anything that reads the outside world at runtime sits behind a trait here
/// so tests can substitute a deterministic implementation.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    ///
    /// # Examples
    ///
    /// ```
    /// use ticket_ledger_core::environment::{Clock, SystemClock};
    ///
    /// let before = chrono::Utc::now();
    /// assert!(SystemClock.now() >= before);
    /// ```
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Production clock backed by the system time
    #[derive(Clone, Copy, Debug, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }
}
