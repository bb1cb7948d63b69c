//! Purchase records and the pipe-delimited ledger line format.
//!
//! A purchase is written to the ledger as a single line:
//!
//! ```text
//! timestamp|category|topup_type|quantity|total
//! 2025-01-01 09:30:00|Adult|Single|3|7.5
//! ```
//!
//! Fields are positional. Delimiter characters inside names are **not**
//! escaped, so a category or ticket name containing `|` produces a line that
//! decodes with shifted fields. This matches existing ledger files and is
//! kept for compatibility.

use crate::environment::Clock;
use crate::money::{self, Price};
use crate::ticket::Ticket;
use crate::{DateTime, Utc};
use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

/// Separator between ledger fields.
pub const FIELD_DELIMITER: char = '|';

/// Number of fields in a ledger line.
pub const FIELD_COUNT: usize = 5;

/// `strftime` pattern for ledger timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Errors raised when creating a purchase.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PurchaseError {
    /// Quantity must be at least one.
    #[error("Quantity must be positive, got {0}")]
    InvalidQuantity(u32),

    /// Unit price × quantity does not fit in a decimal.
    #[error("Purchase total overflows for quantity {0}")]
    TotalOverflow(u32),
}

/// Errors raised when decoding a ledger line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The line has fewer than [`FIELD_COUNT`] fields.
    #[error("Expected {} fields, found {found}", FIELD_COUNT)]
    MissingFields {
        /// Number of fields present.
        found: usize,
    },

    /// The total field is not a number.
    #[error("Invalid total: '{0}'")]
    InvalidTotal(String),

    /// The quantity field is not a positive whole number.
    #[error("Invalid quantity: '{0}'")]
    InvalidQuantity(String),
}

/// A confirmed purchase.
///
/// Holds a copy of the ticket's category and type name and a total computed
/// once at creation. Later changes to the ticket do not affect it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Purchase {
    timestamp: DateTime<Utc>,
    category: String,
    topup_type: String,
    quantity: u32,
    unit_price: Price,
    total: Price,
}

impl Purchase {
    /// Creates a purchase timestamped with `clock.now()`.
    ///
    /// # Errors
    ///
    /// - [`PurchaseError::InvalidQuantity`] if `quantity` is zero
    /// - [`PurchaseError::TotalOverflow`] if the total cannot be represented
    pub fn new(ticket: &Ticket, quantity: u32, clock: &dyn Clock) -> Result<Self, PurchaseError> {
        Self::at(ticket, quantity, clock.now())
    }

    /// Creates a purchase with an explicit timestamp.
    ///
    /// # Errors
    ///
    /// Same as [`Purchase::new`].
    pub fn at(
        ticket: &Ticket,
        quantity: u32,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, PurchaseError> {
        if quantity == 0 {
            return Err(PurchaseError::InvalidQuantity(quantity));
        }

        let unit_price = ticket.price();
        let total = unit_price
            .checked_mul(quantity)
            .ok_or(PurchaseError::TotalOverflow(quantity))?;

        Ok(Self {
            timestamp,
            category: ticket.category().to_string(),
            topup_type: ticket.topup_type().to_string(),
            quantity,
            unit_price,
            total,
        })
    }

    /// When the purchase was made
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Category name at the time of purchase
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Ticket type name at the time of purchase
    #[must_use]
    pub fn topup_type(&self) -> &str {
        &self.topup_type
    }

    /// Number of tickets bought
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price at the time of purchase
    #[must_use]
    pub const fn unit_price(&self) -> Price {
        self.unit_price
    }

    /// Total paid
    #[must_use]
    pub const fn total(&self) -> Price {
        self.total
    }

    /// Timestamp formatted as it appears in the ledger.
    #[must_use]
    pub fn formatted_timestamp(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }

    /// Encodes the purchase as a single ledger line (without newline).
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use ticket_ledger_core::purchase::Purchase;
    /// use ticket_ledger_core::ticket::{Ticket, TicketRecord};
    ///
    /// let ticket = Ticket::from_record(TicketRecord {
    ///     category_title: Some("Adult".to_string()),
    ///     topup_title: Some("Single".to_string()),
    ///     topup_price_in_pence: Some("250".to_string()),
    ///     ..TicketRecord::default()
    /// });
    /// let at = Utc.with_ymd_and_hms(2025, 1, 1, 9, 30, 0).unwrap();
    /// let purchase = Purchase::at(&ticket, 3, at)?;
    ///
    /// assert_eq!(purchase.encode(), "2025-01-01 09:30:00|Adult|Single|3|7.5");
    /// # Ok::<(), ticket_ledger_core::purchase::PurchaseError>(())
    /// ```
    #[must_use]
    pub fn encode(&self) -> String {
        PurchaseRecord::from(self).encode()
    }
}

/// A decoded ledger line.
///
/// Fields are kept as the strings found in the file; use
/// [`PurchaseRecord::total_amount`] and [`PurchaseRecord::quantity_value`]
/// to parse the numeric ones.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PurchaseRecord {
    /// Purchase time as written
    pub timestamp: String,
    /// Category name
    pub category: String,
    /// Ticket type name
    pub topup_type: String,
    /// Quantity as written
    pub quantity: String,
    /// Total in pounds as written
    pub total: String,
}

impl PurchaseRecord {
    /// Splits a ledger line into its positional fields.
    ///
    /// A trailing line terminator is ignored. Fields past the fifth are
    /// ignored; numeric fields are not validated here.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::MissingFields`] if the line has fewer than
    /// [`FIELD_COUNT`] fields.
    pub fn decode(line: &str) -> Result<Self, DecodeError> {
        let line = line.trim_end_matches(['\r', '\n']);
        let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();

        match fields.as_slice() {
            [timestamp, category, topup_type, quantity, total, ..] => Ok(Self {
                timestamp: (*timestamp).to_string(),
                category: (*category).to_string(),
                topup_type: (*topup_type).to_string(),
                quantity: (*quantity).to_string(),
                total: (*total).to_string(),
            }),
            _ => Err(DecodeError::MissingFields {
                found: fields.len(),
            }),
        }
    }

    /// Joins the fields back into a ledger line (without newline).
    #[must_use]
    pub fn encode(&self) -> String {
        [
            self.timestamp.as_str(),
            self.category.as_str(),
            self.topup_type.as_str(),
            self.quantity.as_str(),
            self.total.as_str(),
        ]
        .join(&FIELD_DELIMITER.to_string())
    }

    /// Parses the total field as pounds.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::InvalidTotal`] if the field is not a number.
    pub fn total_amount(&self) -> Result<Decimal, DecodeError> {
        money::parse_decimal(self.total.trim())
            .ok_or_else(|| DecodeError::InvalidTotal(self.total.clone()))
    }

    /// Parses the quantity field.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::InvalidQuantity`] unless the field is a
    /// positive whole number.
    pub fn quantity_value(&self) -> Result<u32, DecodeError> {
        self.quantity
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|q| *q > 0)
            .ok_or_else(|| DecodeError::InvalidQuantity(self.quantity.clone()))
    }
}

impl FromStr for PurchaseRecord {
    type Err = DecodeError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        Self::decode(line)
    }
}

impl From<&Purchase> for PurchaseRecord {
    fn from(purchase: &Purchase) -> Self {
        Self {
            timestamp: purchase.formatted_timestamp(),
            category: purchase.category.clone(),
            topup_type: purchase.topup_type.clone(),
            quantity: purchase.quantity.to_string(),
            total: purchase.total.to_ledger_string(),
        }
    }
}
