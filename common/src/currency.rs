//! Currency identifier and record types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a currency code fails validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid currency code: {0:?}")]
pub struct InvalidCurrencyCode(pub String);

/// ISO 4217 currency code.
///
/// Codes are trimmed and normalized to uppercase on construction; empty or
/// non-alphabetic input is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Create a new currency code, validating and normalizing the input.
    pub fn new(code: impl AsRef<str>) -> Result<Self, InvalidCurrencyCode> {
        let code = code.as_ref().trim();
        if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(InvalidCurrencyCode(code.to_string()));
        }
        Ok(Self(code.to_ascii_uppercase()))
    }

    /// Get the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CurrencyCode {
    type Err = InvalidCurrencyCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// A tracked currency: its code plus a human-readable name.
///
/// Created once when the currency is registered and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    /// Unique currency code.
    pub code: CurrencyCode,
    /// Display name, e.g. "Euro".
    pub name: String,
}

impl Currency {
    /// Create a new currency record.
    pub fn new(code: CurrencyCode, name: impl Into<String>) -> Self {
        Self {
            code,
            name: name.into(),
        }
    }
}

/// Mapping from currency code to its rate against the base currency.
pub type RateMap = HashMap<CurrencyCode, Decimal>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_is_normalized_to_uppercase() {
        let code = CurrencyCode::new("eur").unwrap();
        assert_eq!(code.as_str(), "EUR");
        assert_eq!(code, CurrencyCode::new(" EUR ").unwrap());
    }

    #[test]
    fn empty_code_is_rejected() {
        assert!(CurrencyCode::new("").is_err());
        assert!(CurrencyCode::new("   ").is_err());
    }

    #[test]
    fn non_alphabetic_code_is_rejected() {
        assert!(CurrencyCode::new("US1").is_err());
        assert!(CurrencyCode::new("U-D").is_err());
    }

    #[test]
    fn code_parses_from_str() {
        let code: CurrencyCode = "gbp".parse().unwrap();
        assert_eq!(code.as_str(), "GBP");
    }

    #[test]
    fn code_serializes_as_plain_string() {
        let code = CurrencyCode::new("USD").unwrap();
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"USD\"");

        let back: CurrencyCode = serde_json::from_str("\"USD\"").unwrap();
        assert_eq!(back, code);
    }

    #[test]
    fn currency_round_trips_through_json() {
        let currency = Currency::new(CurrencyCode::new("JPY").unwrap(), "Japanese Yen");
        let json = serde_json::to_string(&currency).unwrap();
        let back: Currency = serde_json::from_str(&json).unwrap();
        assert_eq!(back, currency);
    }
}
