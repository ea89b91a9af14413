use chrono::{DateTime, SubsecRound, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::errors::{StoreError, StoreResult};

/// Maximum length of every bounded character column in the schema.
pub const MAX_CHAR_LENGTH: usize = 255;

/// Current time truncated to the microsecond precision of `TIMESTAMPTZ`,
/// so a stored timestamp reads back equal to the one written.
pub(crate) fn timestamp_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Validates a required, length-limited character field
///
/// Length is counted in characters, matching `VARCHAR(n)` semantics.
pub(crate) fn bounded_text(field: &str, value: impl Into<String>, max: usize) -> StoreResult<String> {
    let value = value.into();
    if value.trim().is_empty() {
        return Err(StoreError::Validation(format!("{field} cannot be empty")));
    }
    let length = value.chars().count();
    if length > max {
        return Err(StoreError::Validation(format!(
            "{field} must be at most {max} characters (got {length})"
        )));
    }
    Ok(value)
}

/// Monetary amount stored as `NUMERIC(6, 2)`
///
/// # Invariants
/// - At most 2 decimal places
/// - At most 6 digits in total, so the magnitude stays below 10 000
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Money(Decimal);

impl Money {
    pub const MAX_DIGITS: u32 = 6;
    pub const DECIMAL_PLACES: u32 = 2;

    /// Creates a new amount
    ///
    /// # Example
    /// ```
    /// use retrogo_store::domain::value_objects::Money;
    /// use rust_decimal::Decimal;
    ///
    /// assert!(Money::new(Decimal::new(999_999, 2)).is_ok());
    /// assert!(Money::new(Decimal::new(1_000_000, 2)).is_err());
    /// assert!(Money::new(Decimal::new(1_001, 3)).is_err());
    /// ```
    pub fn new(amount: Decimal) -> StoreResult<Self> {
        let normalized = amount.normalize();
        if normalized.scale() > Self::DECIMAL_PLACES {
            return Err(StoreError::Validation(format!(
                "amount {amount} has more than {} decimal places",
                Self::DECIMAL_PLACES
            )));
        }

        let integer_digits = Self::MAX_DIGITS - Self::DECIMAL_PLACES;
        let limit = Decimal::from(10_i64.pow(integer_digits));
        if normalized.abs() >= limit {
            return Err(StoreError::Validation(format!(
                "amount {amount} exceeds {} digits",
                Self::MAX_DIGITS
            )));
        }

        let mut stored = normalized;
        stored.rescale(Self::DECIMAL_PLACES);
        Ok(Money(stored))
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Money {
    type Error = StoreError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Line-item quantity stored as `SMALLINT CHECK (quantity > 0)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i16", into = "i16")]
pub struct Quantity(i16);

impl Quantity {
    pub fn new(value: i16) -> StoreResult<Self> {
        if value <= 0 {
            return Err(StoreError::Validation(format!(
                "quantity must be a positive integer (got {value})"
            )));
        }
        Ok(Quantity(value))
    }

    pub fn get(&self) -> i16 {
        self.0
    }
}

impl TryFrom<i16> for Quantity {
    type Error = StoreError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for i16 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounded_text_accepts_max_length() {
        let value = "a".repeat(MAX_CHAR_LENGTH);
        assert!(bounded_text("title", value, MAX_CHAR_LENGTH).is_ok());
    }

    #[test]
    fn bounded_text_counts_characters_not_bytes() {
        let value = "é".repeat(MAX_CHAR_LENGTH);
        assert!(bounded_text("title", value, MAX_CHAR_LENGTH).is_ok());
    }

    #[test]
    fn bounded_text_rejects_too_long() {
        let value = "a".repeat(MAX_CHAR_LENGTH + 1);
        let err = bounded_text("title", value, MAX_CHAR_LENGTH).unwrap_err();
        assert!(err.to_string().contains("at most 255"));
    }

    #[test]
    fn bounded_text_rejects_blank() {
        assert!(bounded_text("city", "   ", MAX_CHAR_LENGTH).is_err());
        assert!(bounded_text("city", "", MAX_CHAR_LENGTH).is_err());
    }

    #[test]
    fn money_accepts_two_decimal_places() {
        let money = Money::new(Decimal::new(1999, 2)).unwrap();
        assert_eq!(money.amount(), Decimal::new(1999, 2));
        assert_eq!(money.to_string(), "19.99");
    }

    #[test]
    fn money_normalizes_trailing_zeros() {
        let money = Money::new(Decimal::new(15000, 3)).unwrap();
        assert_eq!(money.amount(), Decimal::new(1500, 2));
    }

    #[test]
    fn money_rejects_three_decimal_places() {
        assert!(Money::new(Decimal::new(1999, 3)).is_err());
    }

    #[test]
    fn money_range_boundaries() {
        assert!(Money::new(Decimal::new(999_999, 2)).is_ok());
        assert!(Money::new(Decimal::new(-999_999, 2)).is_ok());
        assert!(Money::new(Decimal::from(10_000)).is_err());
        assert!(Money::new(Decimal::from(-10_000)).is_err());
    }

    #[test]
    fn quantity_must_be_positive() {
        assert!(Quantity::new(1).is_ok());
        assert!(Quantity::new(i16::MAX).is_ok());
        assert!(Quantity::new(0).is_err());
        assert!(Quantity::new(-3).is_err());
    }

    #[test]
    fn quantity_try_from() {
        let quantity = Quantity::try_from(4).unwrap();
        assert_eq!(quantity.get(), 4);
        assert!(Quantity::try_from(0).is_err());
    }

    #[test]
    fn deserializing_validates_like_new() {
        assert!(serde_json::from_str::<Quantity>("0").is_err());
        assert!(serde_json::from_str::<Quantity>("-2").is_err());
        assert_eq!(serde_json::from_str::<Quantity>("3").unwrap().get(), 3);

        assert!(serde_json::from_str::<Money>("\"123456.789\"").is_err());
        assert!(serde_json::from_str::<Money>("\"0.125\"").is_err());
    }

    #[test]
    fn quantity_serializes_as_integer() {
        let quantity = Quantity::new(7).unwrap();
        assert_eq!(serde_json::to_string(&quantity).unwrap(), "7");
    }
}
