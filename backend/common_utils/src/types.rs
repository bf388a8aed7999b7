//! Amount types.
//!
//! Amounts are held as [`MinorUnit`] (paise) inside the service and converted
//! to a single canonical [`StringMajorUnit`] wherever they leave it. The
//! gateway hash and the payload field must use the very same string, so no
//! other formatting path exists.

use std::{fmt::Display, str::FromStr};

use error_stack::{report, ResultExt};
use rust_decimal::{prelude::ToPrimitive, Decimal};

use crate::errors::ParsingError;

/// Number of fractional digits of INR
const CURRENCY_EXPONENT: u32 = 2;

/// This Unit struct represents MinorUnit in which core amount works
#[derive(
    Default,
    Debug,
    serde::Deserialize,
    serde::Serialize,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
)]
pub struct MinorUnit(pub i64);

impl MinorUnit {
    /// forms a new minor unit from amount
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// gets amount as i64 value
    pub fn get_amount_as_i64(self) -> i64 {
        self.0
    }

    /// checks if the amount is greater than the given value
    pub fn is_greater_than(&self, value: i64) -> bool {
        self.get_amount_as_i64() > value
    }

    /// Parses a major unit amount such as `500`, `500.5` or `"500.50"`.
    /// More than two significant fractional digits is rejected rather than rounded.
    pub fn from_major_unit_str(amount: &str) -> Result<Self, error_stack::Report<ParsingError>> {
        let decimal = Decimal::from_str(amount.trim())
            .change_context(ParsingError::DecimalParsingFailure)
            .attach_printable_lazy(|| format!("amount: {amount}"))?;

        if decimal.normalize().scale() > CURRENCY_EXPONENT {
            return Err(report!(ParsingError::PrecisionExceeded));
        }

        decimal
            .checked_mul(Decimal::from(10_i64.pow(CURRENCY_EXPONENT)))
            .and_then(|minor| minor.to_i64())
            .map(Self)
            .ok_or_else(|| report!(ParsingError::AmountOutOfRange))
    }

    /// Canonical major unit string, always with two decimals
    pub fn to_major_unit_as_string(self) -> StringMajorUnit {
        StringMajorUnit(Decimal::new(self.0, CURRENCY_EXPONENT).to_string())
    }
}

impl Display for MinorUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Amount in major units as sent to the gateway, e.g. `"500.00"`
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct StringMajorUnit(String);

impl StringMajorUnit {
    pub fn get_amount_as_string(&self) -> &str {
        &self.0
    }
}

impl Display for StringMajorUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
