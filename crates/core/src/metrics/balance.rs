//! Open balance normalization.

use std::str::FromStr;

use num_traits::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::MAX_ABS_BALANCE;

/// A monetary value as it arrived: a JSON number or a formatted string
/// such as `"1,234.50"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BalanceValue {
    Amount(f64),
    Text(String),
}

impl BalanceValue {
    /// Textual form used when the value has to be stored as a string.
    pub fn as_text(&self) -> String {
        match self {
            BalanceValue::Amount(value) => value.to_string(),
            BalanceValue::Text(text) => text.clone(),
        }
    }
}

impl From<&str> for BalanceValue {
    fn from(value: &str) -> Self {
        BalanceValue::Text(value.to_string())
    }
}

impl From<f64> for BalanceValue {
    fn from(value: f64) -> Self {
        BalanceValue::Amount(value)
    }
}

/// Converts a balance to a decimal.
///
/// Thousands separators and dollar signs are stripped from text; anything
/// non-numeric, empty, non-finite or larger in magnitude than
/// [`MAX_ABS_BALANCE`] becomes zero. The sign is preserved.
pub fn normalize_balance(value: &BalanceValue) -> Decimal {
    let balance = match value {
        BalanceValue::Amount(amount) => {
            if amount.is_finite() {
                Decimal::from_f64(*amount).unwrap_or(Decimal::ZERO)
            } else {
                Decimal::ZERO
            }
        }
        BalanceValue::Text(text) => parse_text(text),
    };
    if balance.abs() > MAX_ABS_BALANCE {
        Decimal::ZERO
    } else {
        balance
    }
}

/// Same as [`normalize_balance`], with a missing value counted as zero.
pub fn normalize_optional_balance(value: Option<&BalanceValue>) -> Decimal {
    value.map_or(Decimal::ZERO, normalize_balance)
}

fn parse_text(text: &str) -> Decimal {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| *c != ',' && *c != '$')
        .collect();
    if cleaned.is_empty() {
        return Decimal::ZERO;
    }

    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .ok()
        .or_else(|| {
            cleaned
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .and_then(Decimal::from_f64)
        })
        .unwrap_or(Decimal::ZERO)
}
