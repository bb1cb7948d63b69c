//! Operator input validation.
//!
//! Every parser returns an [`InputError`] whose message is ready to show to
//! the operator. A failed parse aborts the current action only.

use thiserror::Error;
use ticket_ledger_core::money::PriceError;
use ticket_ledger_core::Price;

/// Rejected operator input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// A number was expected.
    #[error("Invalid input! Please enter numbers only.")]
    NotANumber,

    /// A menu number outside the listed range.
    #[error("Invalid {item}!")]
    OutOfRange {
        /// What was being selected ("category", "ticket")
        item: &'static str,
    },

    /// Quantity of zero or less.
    #[error("Quantity must be positive!")]
    NonPositiveQuantity,

    /// Quantity larger than can be recorded.
    #[error("Quantity is too large!")]
    QuantityTooLarge,

    /// Price text that is not a number.
    #[error("Invalid price! Please enter a number.")]
    InvalidPrice,

    /// Price below zero.
    #[error("Price cannot be negative!")]
    NegativePrice,

    /// Price beyond what the catalog can store.
    #[error("Price is too large!")]
    PriceTooLarge,

    /// A required text field was left blank.
    #[error("{field} cannot be empty!")]
    Empty {
        /// Field label shown to the operator
        field: &'static str,
    },
}

impl From<PriceError> for InputError {
    fn from(err: PriceError) -> Self {
        match err {
            PriceError::NotANumber(_) => Self::InvalidPrice,
            PriceError::Negative(_) => Self::NegativePrice,
            PriceError::TooLarge(_) => Self::PriceTooLarge,
        }
    }
}

/// Parses a 1-based menu selection into a 0-based index below `len`.
///
/// # Errors
///
/// [`InputError::NotANumber`] or [`InputError::OutOfRange`].
pub fn parse_selection(text: &str, len: usize, item: &'static str) -> Result<usize, InputError> {
    let number: i64 = text.trim().parse().map_err(|_| InputError::NotANumber)?;
    usize::try_from(number)
        .ok()
        .and_then(|n| n.checked_sub(1))
        .filter(|index| *index < len)
        .ok_or(InputError::OutOfRange { item })
}

/// Parses a purchase quantity.
///
/// # Errors
///
/// [`InputError::NotANumber`], [`InputError::NonPositiveQuantity`] or
/// [`InputError::QuantityTooLarge`].
pub fn parse_quantity(text: &str) -> Result<u32, InputError> {
    let number: i64 = text.trim().parse().map_err(|_| InputError::NotANumber)?;
    if number <= 0 {
        return Err(InputError::NonPositiveQuantity);
    }
    u32::try_from(number).map_err(|_| InputError::QuantityTooLarge)
}

/// Parses a price typed in pounds.
///
/// # Errors
///
/// [`InputError::InvalidPrice`] or [`InputError::NegativePrice`].
pub fn parse_price(text: &str) -> Result<Price, InputError> {
    Ok(Price::parse_major(text)?)
}

/// Trims a required text field.
///
/// # Errors
///
/// [`InputError::Empty`] if nothing but whitespace was entered.
pub fn required(text: &str, field: &'static str) -> Result<String, InputError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(InputError::Empty { field });
    }
    Ok(trimmed.to_string())
}

/// Trims an optional text field; blank means `None`.
#[must_use]
pub fn optional(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// `true` for "yes" or "y" in any case.
#[must_use]
pub fn is_confirmation(text: &str) -> bool {
    matches!(text.trim().to_lowercase().as_str(), "yes" | "y")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_selection() {
        assert_eq!(parse_selection("1", 3, "category"), Ok(0));
        assert_eq!(parse_selection(" 3 ", 3, "category"), Ok(2));
        assert_eq!(
            parse_selection("4", 3, "category"),
            Err(InputError::OutOfRange { item: "category" })
        );
        assert_eq!(
            parse_selection("0", 3, "ticket"),
            Err(InputError::OutOfRange { item: "ticket" })
        );
        assert_eq!(
            parse_selection("-1", 3, "ticket"),
            Err(InputError::OutOfRange { item: "ticket" })
        );
        assert_eq!(parse_selection("two", 3, "ticket"), Err(InputError::NotANumber));
        assert_eq!(
            parse_selection("1", 0, "ticket"),
            Err(InputError::OutOfRange { item: "ticket" })
        );
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("3"), Ok(3));
        assert_eq!(parse_quantity("0"), Err(InputError::NonPositiveQuantity));
        assert_eq!(parse_quantity("-2"), Err(InputError::NonPositiveQuantity));
        assert_eq!(parse_quantity("1.5"), Err(InputError::NotANumber));
        assert_eq!(parse_quantity("99999999999"), Err(InputError::QuantityTooLarge));
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("5.50").map(|p| p.to_string()), Ok("£5.50".to_string()));
        assert_eq!(parse_price("0").map(|p| p.to_string()), Ok("£0.00".to_string()));
        assert_eq!(parse_price("-1"), Err(InputError::NegativePrice));
        assert_eq!(parse_price("five"), Err(InputError::InvalidPrice));
        assert_eq!(
            parse_price("79228162514264337593543950335"),
            Err(InputError::PriceTooLarge)
        );
        assert_eq!(
            InputError::NegativePrice.to_string(),
            "Price cannot be negative!"
        );
    }

    #[test]
    fn test_text_fields() {
        assert_eq!(required("  Senior ", "Category name"), Ok("Senior".to_string()));
        assert_eq!(
            required("   ", "Category name").map_err(|e| e.to_string()),
            Err("Category name cannot be empty!".to_string())
        );
        assert_eq!(optional(""), None);
        assert_eq!(optional(" Student "), Some("Student".to_string()));
    }

    #[test]
    fn test_is_confirmation() {
        assert!(is_confirmation("yes"));
        assert!(is_confirmation("Y"));
        assert!(is_confirmation(" YES "));
        assert!(!is_confirmation("no"));
        assert!(!is_confirmation(""));
        assert!(!is_confirmation("yep"));
    }
}
