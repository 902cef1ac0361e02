//! Fixed-precision decimal used for quantities and unit prices.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ValidationError;

/// A non-negative decimal with at most two fraction digits.
///
/// Mirrors a `NUMERIC(10, 2)` column: the absolute value stays below 10^8.
/// Serialized as a JSON number; deserialization accepts numbers and numeric
/// strings and rejects anything outside the range above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(Decimal);

impl Amount {
    pub const MAX_SCALE: u32 = 2;

    /// Validates `value` for the input field `field`.
    pub fn parse(field: &str, value: Decimal) -> Result<Self, ValidationError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(ValidationError::Negative {
                field: field.to_string(),
            });
        }
        if value.normalize().scale() > Self::MAX_SCALE {
            return Err(ValidationError::TooPrecise {
                field: field.to_string(),
            });
        }
        if value >= Decimal::from(100_000_000u64) {
            return Err(ValidationError::OutOfRange {
                field: field.to_string(),
            });
        }
        Ok(Self(value.normalize()))
    }

    /// Returns the underlying decimal.
    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = ValidationError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Amount::parse("amount", value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = <Decimal as Deserialize>::deserialize(deserializer)?;
        Amount::try_from(value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_accepts_two_fraction_digits() {
        let amount = Amount::parse("quantity", dec("3.50")).unwrap();
        assert_eq!(amount.value(), dec("3.5"));
        assert_eq!(amount.to_string(), "3.50");
    }

    #[test]
    fn test_zero_is_allowed() {
        assert_eq!(
            Amount::parse("quantity", dec("0")).unwrap().value(),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_rejects_negative() {
        assert_eq!(
            Amount::parse("unit_price", dec("-0.01")),
            Err(ValidationError::Negative {
                field: "unit_price".to_string()
            })
        );
    }

    #[test]
    fn test_rejects_third_fraction_digit() {
        assert!(matches!(
            Amount::parse("quantity", dec("1.125")),
            Err(ValidationError::TooPrecise { .. })
        ));
        // Trailing zeros do not count.
        assert!(Amount::parse("quantity", dec("1.100")).is_ok());
    }

    #[test]
    fn test_rejects_values_outside_numeric_10_2() {
        assert!(Amount::parse("quantity", dec("99999999.99")).is_ok());
        assert!(matches!(
            Amount::parse("quantity", dec("100000000")),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_json_number_roundtrip() {
        let amount: Amount = serde_json::from_str("3.5").unwrap();
        assert_eq!(amount.value(), dec("3.5"));
        assert_eq!(serde_json::to_string(&amount).unwrap(), "3.5");

        let whole: Amount = serde_json::from_str("95").unwrap();
        assert_eq!(serde_json::to_value(whole).unwrap(), serde_json::json!(95.0));
    }

    #[test]
    fn test_deserialize_as_struct_field() {
        #[derive(Deserialize)]
        struct Line {
            quantity: Amount,
        }

        let line: Line = serde_json::from_str(r#"{"quantity": 12.25}"#).unwrap();
        assert_eq!(line.quantity.value(), dec("12.25"));
        assert!(serde_json::from_str::<Line>(r#"{"quantity": 1.125}"#).is_err());
    }

    #[test]
    fn test_json_rejects_invalid_amount() {
        assert!(serde_json::from_str::<Amount>("-1").is_err());
    }
}
