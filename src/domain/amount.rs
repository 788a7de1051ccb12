use crate::error::KhqrError;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// A non-negative transaction amount.
///
/// Rendered in the payload with exactly two fractional digits.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct TransactionAmount(Decimal);

impl TransactionAmount {
    pub fn new(value: Decimal) -> Result<Self, KhqrError> {
        if value.is_zero() {
            return Ok(Self(Decimal::ZERO));
        }
        if value.is_sign_negative() {
            return Err(KhqrError::InvalidAmount(value.to_string()));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Two-decimal rendering of the amount as a binary double (`12` -> `12.00`).
    ///
    /// The value is rounded as the nearest `f64`, so `1.005` renders as `1.00`
    /// and `2.675` as `2.67`. Exact ties such as `0.125` round up.
    pub fn formatted(&self) -> String {
        let float: f64 = self.0.to_string().parse().unwrap_or_default();
        let rounded = Decimal::from_f64_retain(float)
            .unwrap_or(self.0)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        format!("{rounded:.2}")
    }

    /// Parses a caller-supplied amount the way request bodies carry it.
    ///
    /// Accepts JSON numbers and numeric strings. Missing, empty, non-numeric
    /// and negative amounts are rejected, as is the JSON number `0`. The
    /// string `"0"` is a valid zero amount.
    pub fn from_json(value: &Value) -> Result<Self, KhqrError> {
        let parsed = match value {
            Value::Number(n) => parse_decimal(&n.to_string()).filter(|d| !d.is_zero()),
            Value::String(s) => parse_decimal(s.trim()),
            _ => None,
        };
        parsed
            .and_then(|d| Self::new(d).ok())
            .ok_or_else(|| KhqrError::InvalidAmount(value.to_string()))
    }
}

impl FromStr for TransactionAmount {
    type Err = KhqrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_json(&Value::String(s.to_string()))
    }
}

impl TryFrom<Decimal> for TransactionAmount {
    type Error = KhqrError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TransactionAmount> for Decimal {
    fn from(amount: TransactionAmount) -> Self {
        amount.0
    }
}

impl fmt::Display for TransactionAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    if s.is_empty() {
        return None;
    }
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}
