//! Pounds-and-pence money values.
//!
//! The catalog source stores prices as integer pence; everything in memory is
//! held in pounds as a fixed-point [`Decimal`] so that `£2.50 × 3` is exactly
//! `£7.50`. Rounding to two decimals happens only when a value is displayed.

use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Pence per pound.
const MINOR_UNITS_PER_MAJOR: u32 = 100;

/// Errors produced when parsing operator-supplied prices.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The text is not a number.
    #[error("Invalid price: '{0}' is not a number")]
    NotANumber(String),

    /// The amount is below zero.
    #[error("Price cannot be negative: {0}")]
    Negative(Decimal),

    /// The amount cannot be expressed in pence.
    #[error("Price is too large: {0}")]
    TooLarge(Decimal),
}

/// A non-negative amount of money in pounds.
///
/// Construct from pence with [`Price::from_minor_units`] (lenient, used for
/// catalog data) or from pounds with [`Price::parse_major`] (strict, used for
/// operator input).
///
/// # Examples
///
/// ```
/// use ticket_ledger_core::money::Price;
///
/// let single = Price::from_minor_units("250");
/// assert_eq!(single.to_string(), "£2.50");
/// assert_eq!(Price::from_minor_units("free").to_string(), "£0.00");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(Decimal);

impl Price {
    /// Zero pounds.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Converts a pence amount taken from the catalog source into pounds.
    ///
    /// Accepts plain (`"250"`, `"250.0"`) and scientific (`"2.5e2"`) notation,
    /// ignoring surrounding whitespace. Anything unparseable becomes zero; a
    /// negative amount is clamped to zero.
    #[must_use]
    pub fn from_minor_units(text: &str) -> Self {
        let trimmed = text.trim();
        let Some(pence) = parse_decimal(trimmed) else {
            tracing::debug!(value = %trimmed, "Unparseable price, defaulting to 0.00");
            return Self::ZERO;
        };

        let pounds = pence
            .checked_div(Decimal::from(MINOR_UNITS_PER_MAJOR))
            .unwrap_or(Decimal::ZERO);

        if pounds < Decimal::ZERO {
            tracing::warn!(value = %trimmed, "Negative price in catalog, clamping to 0.00");
            return Self::ZERO;
        }

        Self::from_non_negative(pounds)
    }

    /// Creates a price from a pounds amount.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `pounds` is below zero and
    /// [`PriceError::TooLarge`] if it has no whole-pence representation.
    pub fn from_major_units(pounds: Decimal) -> Result<Self, PriceError> {
        if pounds < Decimal::ZERO {
            return Err(PriceError::Negative(pounds));
        }
        let price = Self::from_non_negative(pounds);
        if price.to_minor_units().is_none() {
            return Err(PriceError::TooLarge(pounds));
        }
        Ok(price)
    }

    /// Parses an operator-typed pounds amount such as `"5.50"`.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::NotANumber`] for non-numeric text,
    /// [`PriceError::Negative`] for amounts below zero and
    /// [`PriceError::TooLarge`] for amounts beyond the pence range.
    pub fn parse_major(text: &str) -> Result<Self, PriceError> {
        let trimmed = text.trim();
        let pounds =
            parse_decimal(trimmed).ok_or_else(|| PriceError::NotANumber(trimmed.to_string()))?;
        Self::from_major_units(pounds)
    }

    /// Returns the amount in pounds, unrounded.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns the amount in whole pence, truncating fractions of a penny,
    /// or `None` if the amount is too large to scale.
    #[must_use]
    pub fn to_minor_units(&self) -> Option<Decimal> {
        self.0
            .checked_mul(Decimal::from(MINOR_UNITS_PER_MAJOR))
            .map(|pence| pence.trunc())
    }

    /// Multiplies the price by a quantity with overflow checking.
    #[must_use]
    pub fn checked_mul(self, quantity: u32) -> Option<Self> {
        self.0.checked_mul(Decimal::from(quantity)).map(Self)
    }

    /// Renders the amount the way the purchase ledger stores totals.
    ///
    /// Trailing zeros are dropped but at least one fractional digit is kept:
    /// `7.50` becomes `"7.5"` and `7` becomes `"7.0"`.
    #[must_use]
    pub fn to_ledger_string(&self) -> String {
        let normalized = self.0.normalize();
        if normalized.scale() == 0 {
            format!("{normalized}.0")
        } else {
            normalized.to_string()
        }
    }

    fn from_non_negative(pounds: Decimal) -> Self {
        // Keeps "-0" out of the value so it never displays as "£-0.00".
        if pounds.is_zero() {
            Self::ZERO
        } else {
            Self(pounds)
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_pounds(self.0))
    }
}

/// Formats a pounds amount for display, e.g. `£7.50`.
///
/// Rounds half away from zero to two decimal places.
#[must_use]
pub fn format_pounds(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded < Decimal::ZERO {
        format!("-£{:.2}", rounded.abs())
    } else {
        format!("£{:.2}", rounded.abs())
    }
}

/// Parses a decimal in plain or scientific notation.
pub(crate) fn parse_decimal(text: &str) -> Option<Decimal> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}
