//! Prices

use std::{num::TryFromIntError, ops::Deref};

use rust_decimal::{
    Decimal,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de, ser};
use thiserror::Error;

/// Errors that can occur while parsing a price.
#[derive(Debug, Error, PartialEq)]
pub enum PriceError {
    /// The amount could not be parsed as a decimal number.
    #[error("invalid price: {0}")]
    Invalid(String),

    /// Prices cannot be negative.
    #[error("negative price: {0}")]
    Negative(Decimal),

    /// The amount does not fit into minor units.
    #[error("price out of range: {0}")]
    OutOfRange(Decimal),
}

/// Represents a price in pence/cents.
///
/// On the wire a price is a plain JSON number in major units (`12.5` for
/// 1250 cents), which is what the storefront persists and what the order API
/// expects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price {
    value: u64,
}

impl Price {
    /// A zero price.
    pub const ZERO: Self = Self { value: 0 };

    /// Creates a new Price from minor units.
    pub const fn new(value: u64) -> Self {
        Price { value }
    }

    /// Creates a price from an amount in major units, rounded to the nearest
    /// minor unit.
    ///
    /// # Errors
    ///
    /// Returns a [`PriceError`] if the amount is negative or too large.
    pub fn from_major(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }

        amount
            .checked_mul(Decimal::new(100, 0))
            .and_then(|value| value.round_dp(0).to_u64())
            .map(Price::new)
            .ok_or(PriceError::OutOfRange(amount))
    }

    /// Parse a price string in major units (e.g., "12.50").
    ///
    /// # Errors
    ///
    /// Returns a [`PriceError`] if the string is not a decimal number, or if
    /// the amount is negative or too large.
    pub fn parse_major(s: &str) -> Result<Self, PriceError> {
        let amount = s
            .trim()
            .parse::<Decimal>()
            .map_err(|_err| PriceError::Invalid(s.to_string()))?;

        Self::from_major(amount)
    }

    /// The price in major units.
    pub fn to_major(self) -> Decimal {
        Decimal::from_i128_with_scale(i128::from(self.value), 2)
    }

    /// Multiply by a quantity, saturating at the numeric bound.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Price::new(self.value.saturating_mul(u64::from(quantity)))
    }

    /// Add two prices, saturating at the numeric bound.
    #[must_use]
    pub fn plus(self, other: Self) -> Self {
        Price::new(self.value.saturating_add(other.value))
    }

    /// Express the price as money in the given currency.
    ///
    /// # Errors
    ///
    /// Returns an error if the minor units do not fit into an `i64`.
    pub fn to_money(
        self,
        currency: &'static Currency,
    ) -> Result<Money<'static, Currency>, TryFromIntError> {
        Ok(Money::from_minor(i64::try_from(self.value)?, currency))
    }
}

impl Deref for Price {
    type Target = u64;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let major = self.to_major().to_f64().ok_or_else(|| {
            ser::Error::custom(format!("price {} is not representable", self.value))
        })?;

        serializer.serialize_f64(major)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let number = serde_json::Number::deserialize(deserializer)?;

        let amount = if let Some(value) = number.as_u64() {
            Decimal::from(value)
        } else if let Some(value) = number.as_i64() {
            Decimal::from(value)
        } else {
            number
                .to_string()
                .parse::<Decimal>()
                .or_else(|_err| {
                    number
                        .as_f64()
                        .and_then(Decimal::from_f64)
                        .ok_or(PriceError::Invalid(number.to_string()))
                })
                .map_err(de::Error::custom)?
        };

        Price::from_major(amount).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::EUR;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn new_price() {
        let price = Price::new(1000);

        assert_eq!(price.value, 1000);
    }

    #[test]
    fn price_derefs_to_u64() {
        let price = Price { value: 100 };

        assert_eq!(*price, 100);
    }

    #[test]
    fn parse_major_rounds_to_minor_units() -> TestResult {
        assert_eq!(Price::parse_major("12.50")?, Price::new(1250));
        assert_eq!(Price::parse_major("0.105")?, Price::new(10));
        assert_eq!(Price::parse_major(" 3 ")?, Price::new(300));

        Ok(())
    }

    #[test]
    fn parse_major_rejects_garbage_and_negatives() {
        assert!(matches!(
            Price::parse_major("twelve"),
            Err(PriceError::Invalid(_))
        ));
        assert!(matches!(
            Price::parse_major("-1.00"),
            Err(PriceError::Negative(_))
        ));
    }

    #[test]
    fn serializes_as_major_unit_number() -> TestResult {
        let json = serde_json::to_string(&Price::new(1999))?;

        assert_eq!(json, "19.99");

        Ok(())
    }

    #[test]
    fn deserializes_integers_and_floats() -> TestResult {
        let whole: Price = serde_json::from_str("10")?;
        let fractional: Price = serde_json::from_str("9.9")?;

        assert_eq!(whole, Price::new(1000));
        assert_eq!(fractional, Price::new(990));

        Ok(())
    }

    #[test]
    fn deserialize_rejects_negative_and_strings() {
        assert!(serde_json::from_str::<Price>("-5").is_err());
        assert!(serde_json::from_str::<Price>("\"5\"").is_err());
    }

    #[test]
    fn times_and_plus_accumulate() {
        let total = Price::new(250).times(3).plus(Price::new(50));

        assert_eq!(total, Price::new(800));
    }

    #[test]
    fn to_money_uses_minor_units() -> TestResult {
        let money = Price::new(1250).to_money(EUR)?;

        assert_eq!(money, Money::from_minor(1250, EUR));

        Ok(())
    }
}
