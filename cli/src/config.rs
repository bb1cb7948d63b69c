//! Configuration management for the ticket ledger CLI.
//!
//! Loads configuration from environment variables with sensible defaults.
//! Command-line flags are applied on top with [`Config::with_cli`].

use crate::Cli;
use std::env;
use std::fmt;
use std::path::PathBuf;
use ticket_ledger_core::ledger::DEFAULT_LEDGER_PATH;
use ticket_ledger_core::stats::{DEFAULT_BAR_WIDTH, MAX_BAR_WIDTH};
use tracing::warn;

/// Default catalog location, relative to the working directory.
pub const DEFAULT_CATALOG_PATH: &str = "data/bus_tickets.csv";

/// Default admin panel password.
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Application configuration loaded from environment variables.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    /// Ticket catalog CSV (`TICKET_CATALOG_PATH`)
    pub catalog_path: PathBuf,
    /// Purchase ledger file (`TICKET_LEDGER_PATH`)
    pub ledger_path: PathBuf,
    /// Admin panel password (`TICKET_ADMIN_PASSWORD`)
    pub admin_password: String,
    /// Longest bar in the statistics chart (`TICKET_STATS_BAR_WIDTH`)
    pub bar_width: usize,
}

impl Config {
    /// Load configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// Unset or empty variables take their defaults. A bar width outside
    /// `1..=MAX_BAR_WIDTH` is ignored with a warning.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let bar_width = var("TICKET_STATS_BAR_WIDTH").map_or(DEFAULT_BAR_WIDTH, |raw| {
            match raw.trim().parse::<usize>() {
                Ok(width) if (1..=MAX_BAR_WIDTH).contains(&width) => width,
                _ => {
                    warn!(value = %raw, default = DEFAULT_BAR_WIDTH, "Invalid TICKET_STATS_BAR_WIDTH, using default");
                    DEFAULT_BAR_WIDTH
                }
            }
        });

        Self {
            catalog_path: var("TICKET_CATALOG_PATH")
                .map_or_else(|| PathBuf::from(DEFAULT_CATALOG_PATH), PathBuf::from),
            ledger_path: var("TICKET_LEDGER_PATH")
                .map_or_else(|| PathBuf::from(DEFAULT_LEDGER_PATH), PathBuf::from),
            admin_password: var("TICKET_ADMIN_PASSWORD")
                .unwrap_or_else(|| DEFAULT_ADMIN_PASSWORD.to_string()),
            bar_width,
        }
    }

    /// Applies command-line overrides.
    #[must_use]
    pub fn with_cli(mut self, cli: &Cli) -> Self {
        if let Some(path) = &cli.catalog {
            self.catalog_path.clone_from(path);
        }
        if let Some(path) = &cli.ledger {
            self.ledger_path.clone_from(path);
        }
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("catalog_path", &self.catalog_path)
            .field("ledger_path", &self.ledger_path)
            .field("admin_password", &"<redacted>")
            .field("bar_width", &self.bar_width)
            .finish()
    }
}
