use serde::{Deserialize, Serialize};
use std::fmt;

/// Monetary value as the backend sends it: sometimes a JSON number, sometimes a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Number(f64),
    Text(String),
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Amount::Number(value) => write!(f, "{}", value),
            Amount::Text(value) => write!(f, "{}", value),
        }
    }
}

/// Renders an optional amount, empty when absent.
pub fn display_amount(amount: &Option<Amount>) -> String {
    amount.as_ref().map(|a| a.to_string()).unwrap_or_default()
}

/// `Some(trimmed)` for non-blank input.
pub(crate) fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
