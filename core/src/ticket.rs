//! Ticket entity and the catalog row it is built from.

use crate::money::Price;
use serde::Deserialize;
use std::fmt;

/// Placeholder for a missing category or ticket type name.
pub const UNKNOWN: &str = "Unknown";

/// Placeholder for missing entitlement, validity and passenger class fields.
pub const NOT_AVAILABLE: &str = "N/A";

/// One row of the catalog source, exactly as it appears in the file.
///
/// Every column is optional. Empty cells deserialize to `None` and are
/// treated the same as absent columns. Unknown columns are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TicketRecord {
    /// Category display name
    pub category_title: Option<String>,
    /// Category identifier
    pub category_id: Option<String>,
    /// Category description
    pub category_description: Option<String>,
    /// Ticket type display name
    pub topup_title: Option<String>,
    /// Ticket type identifier
    pub topup_id: Option<String>,
    /// Ticket type description
    pub topup_description: Option<String>,
    /// Price in pence
    pub topup_price_in_pence: Option<String>,
    /// Entitlement type (e.g. "fixed")
    pub topup_entitlement_type: Option<String>,
    /// Entitlement unit (e.g. "journey")
    pub topup_entitlement_unit: Option<String>,
    /// Entitlement value
    pub topup_entitlement_value: Option<String>,
    /// Entitlement quantity
    pub topup_entitlement_quantity: Option<String>,
    /// First day of validity
    pub topup_entitlement_start_date: Option<String>,
    /// Last day of validity
    pub topup_entitlement_end_date: Option<String>,
    /// Passenger class (e.g. "Adult", "Student")
    pub topup_passenger_class_name: Option<String>,
}

/// What a ticket entitles the holder to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entitlement {
    /// Entitlement type
    pub kind: String,
    /// Unit the value is measured in
    pub unit: String,
    /// Amount of `unit`
    pub value: String,
    /// Number of entitlements granted
    pub quantity: String,
}

impl Entitlement {
    /// Returns `"<value> <unit>"` when the value is known.
    #[must_use]
    pub fn describe_value(&self) -> Option<String> {
        (self.value != NOT_AVAILABLE).then(|| format!("{} {}", self.value, self.unit))
    }
}

/// Validity window. Dates are kept as opaque strings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Validity {
    /// Start date
    pub start: String,
    /// End date
    pub end: String,
}

impl Validity {
    /// Returns `"<start> to <end>"` when both ends are known.
    #[must_use]
    pub fn describe(&self) -> Option<String> {
        (self.start != NOT_AVAILABLE && self.end != NOT_AVAILABLE)
            .then(|| format!("{} to {}", self.start, self.end))
    }
}

/// A purchasable ticket or top-up.
///
/// Built once per catalog row with [`Ticket::from_record`]. The price is the
/// only field that can change afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ticket {
    category: String,
    category_id: String,
    category_description: String,
    topup_type: String,
    topup_id: String,
    topup_description: String,
    price: Price,
    entitlement: Entitlement,
    validity: Validity,
    passenger_class: String,
}

impl Ticket {
    /// Builds a ticket from a catalog row, filling in defaults for missing
    /// fields.
    ///
    /// # Examples
    ///
    /// ```
    /// use ticket_ledger_core::ticket::{Ticket, TicketRecord};
    ///
    /// let ticket = Ticket::from_record(TicketRecord {
    ///     category_title: Some("Adult".to_string()),
    ///     topup_title: Some("Single".to_string()),
    ///     topup_price_in_pence: Some("250".to_string()),
    ///     ..TicketRecord::default()
    /// });
    /// assert_eq!(ticket.to_string(), "Single (£2.50)");
    /// assert_eq!(ticket.passenger_class(), "N/A");
    /// ```
    #[must_use]
    pub fn from_record(record: TicketRecord) -> Self {
        let price = record
            .topup_price_in_pence
            .as_deref()
            .map_or(Price::ZERO, Price::from_minor_units);

        Self {
            category: or_default(record.category_title, UNKNOWN),
            category_id: or_default(record.category_id, ""),
            category_description: or_default(record.category_description, ""),
            topup_type: or_default(record.topup_title, UNKNOWN),
            topup_id: or_default(record.topup_id, ""),
            topup_description: or_default(record.topup_description, ""),
            price,
            entitlement: Entitlement {
                kind: or_default(record.topup_entitlement_type, NOT_AVAILABLE),
                unit: or_default(record.topup_entitlement_unit, NOT_AVAILABLE),
                value: or_default(record.topup_entitlement_value, NOT_AVAILABLE),
                quantity: or_default(record.topup_entitlement_quantity, NOT_AVAILABLE),
            },
            validity: Validity {
                start: or_default(record.topup_entitlement_start_date, NOT_AVAILABLE),
                end: or_default(record.topup_entitlement_end_date, NOT_AVAILABLE),
            },
            passenger_class: or_default(record.topup_passenger_class_name, NOT_AVAILABLE),
        }
    }

    /// Category name
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Category identifier
    #[must_use]
    pub fn category_id(&self) -> &str {
        &self.category_id
    }

    /// Category description
    #[must_use]
    pub fn category_description(&self) -> &str {
        &self.category_description
    }

    /// Ticket type name
    #[must_use]
    pub fn topup_type(&self) -> &str {
        &self.topup_type
    }

    /// Ticket type identifier
    #[must_use]
    pub fn topup_id(&self) -> &str {
        &self.topup_id
    }

    /// Ticket type description
    #[must_use]
    pub fn topup_description(&self) -> &str {
        &self.topup_description
    }

    /// Current unit price in pounds.
    #[must_use]
    pub const fn price(&self) -> Price {
        self.price
    }

    /// Replaces the unit price. Existing purchases are unaffected.
    pub const fn set_price(&mut self, price: Price) {
        self.price = price;
    }

    /// Entitlement details
    #[must_use]
    pub const fn entitlement(&self) -> &Entitlement {
        &self.entitlement
    }

    /// Validity window
    #[must_use]
    pub const fn validity(&self) -> &Validity {
        &self.validity
    }

    /// Passenger class
    #[must_use]
    pub fn passenger_class(&self) -> &str {
        &self.passenger_class
    }

    /// Case-insensitive match of `term` against the ticket type or category.
    #[must_use]
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.topup_type.to_lowercase().contains(&term)
            || self.category.to_lowercase().contains(&term)
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.topup_type, self.price)
    }
}

/// Operator input for a ticket created from the admin panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewTicket {
    /// Category to file the ticket under (created if new)
    pub category: String,
    /// Ticket type name
    pub topup_type: String,
    /// Unit price
    pub price: Price,
    /// Optional description
    pub description: Option<String>,
    /// Passenger class, `"Adult"` when not given
    pub passenger_class: Option<String>,
}

impl NewTicket {
    /// Synthesizes the catalog row for this ticket.
    ///
    /// Identifiers are derived from the names (`"new-day-rider"`), the price
    /// goes through whole pence, and the entitlement is a single fixed
    /// journey.
    #[must_use]
    pub fn into_record(self) -> TicketRecord {
        let description = self
            .description
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| format!("{} ticket", self.topup_type));
        let passenger_class = self
            .passenger_class
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| "Adult".to_string());

        TicketRecord {
            category_id: Some(format!("new-{}", slug(&self.category))),
            category_description: Some(format!("Tickets for {}", self.category)),
            topup_id: Some(format!("new-{}", slug(&self.topup_type))),
            topup_description: Some(description),
            topup_price_in_pence: self.price.to_minor_units().map(|pence| pence.to_string()),
            topup_entitlement_type: Some("fixed".to_string()),
            topup_entitlement_unit: Some("journey".to_string()),
            topup_entitlement_value: Some("1".to_string()),
            topup_passenger_class_name: Some(passenger_class),
            category_title: Some(self.category),
            topup_title: Some(self.topup_type),
            ..TicketRecord::default()
        }
    }
}

fn or_default(value: Option<String>, default: &str) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn slug(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}
