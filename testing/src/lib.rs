//! # Ticket Ledger Testing
//!
//! Deterministic stand-ins and fixtures for testing ticket ledger code.
//!
//! ## Example
//!
//! ```
//! use ticket_ledger_core::{Ledger, Purchase};
//! use ticket_ledger_testing::{InMemoryLedger, fixtures, test_clock};
//!
//! let catalog = fixtures::sample_catalog();
//! let ticket = &catalog.categories()[0].tickets()[0];
//! let ledger = InMemoryLedger::new();
//!
//! let purchase = Purchase::new(ticket, 3, &test_clock()).unwrap();
//! ledger.record(&purchase).unwrap();
//!
//! assert_eq!(ledger.lines(), vec!["2025-01-01 00:00:00|Adult|Single|3|7.5"]);
//! ```

use ticket_ledger_core::environment::Clock;
use ticket_ledger_core::{DateTime, Utc};

mod ledger_mocks;

pub mod fixtures;

/// Mock implementations for testing.
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making ledger timestamps reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use ticket_ledger_testing::mocks::FixedClock;
    /// use ticket_ledger_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// Panics if the hardcoded timestamp fails to parse, which cannot happen.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

/// Property-based testing utilities using proptest.
pub mod properties {
    use proptest::prelude::*;

    /// Names that survive the ledger line format: no delimiter, no line
    /// breaks, no surrounding whitespace.
    pub fn ledger_safe_name() -> impl Strategy<Value = String> {
        "[A-Za-z0-9][A-Za-z0-9 '&()-]{0,18}[A-Za-z0-9]"
    }

    /// Catalog prices in whole pence.
    pub fn pence() -> impl Strategy<Value = u32> {
        0u32..1_000_000
    }

    /// Purchase quantities.
    pub fn quantity() -> impl Strategy<Value = u32> {
        1u32..1_000
    }
}

/// Installs a `tracing` subscriber that writes through the test harness.
///
/// Respects `RUST_LOG`. Safe to call from every test; only the first call
/// installs anything.
pub fn init_test_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

// Re-export commonly used items
pub use ledger_mocks::{FailingLedger, InMemoryLedger};
pub use mocks::{FixedClock, test_clock};
