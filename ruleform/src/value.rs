//! Operand values and field-value records
//!
//! Every operand a rule touches is one of a small closed set of variants.
//! Operator functions never see raw strings; they ask a value for its
//! numeric or text view and decide from there.

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Field-value record a rule is executed against
pub type Record = HashMap<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Number(Decimal),
    Text(String),
    Boolean(bool),
    List(Vec<String>),
    /// What a missing field resolves to
    Null,
}

impl Value {
    pub fn text(text: impl Into<String>) -> Self {
        Value::Text(text.into())
    }

    pub fn number(n: impl Into<Decimal>) -> Self {
        Value::Number(n.into())
    }

    /// Numeric view: numbers as is, text when its trimmed content parses as a decimal.
    pub fn as_number(&self) -> Option<Decimal> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Text(s) => parse_decimal(s.trim()),
            _ => None,
        }
    }

    /// Text view used by comparisons and `contains`. `Null` has none.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Value::Number(n) => Some(n.normalize().to_string()),
            Value::Text(s) => Some(s.clone()),
            Value::Boolean(b) => Some(b.to_string()),
            Value::List(items) => Some(items.join(",")),
            Value::Null => None,
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Boolean(b) => *b,
            Value::Number(n) => !n.is_zero(),
            Value::Text(s) => !s.is_empty(),
            Value::List(items) => !items.is_empty(),
            Value::Null => false,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Provides a descriptive string for error messages and debugging
    pub fn describe(&self) -> String {
        match self {
            Value::Number(n) => format!("number {}", n.normalize()),
            Value::Text(s) => format!("text value \"{}\"", s),
            Value::Boolean(b) => format!("boolean {}", b),
            Value::List(items) => format!("list of {} item(s)", items.len()),
            Value::Null => "undefined value".to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n.normalize()),
            Value::Text(s) => write!(f, "{}", s),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::List(items) => write!(f, "[{}]", items.join(", ")),
            Value::Null => write!(f, "null"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Decimal> for Value {
    fn from(n: Decimal) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(Decimal::from(n))
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Value::List(items)
    }
}

/// Plain and scientific notation; anything else is not a number.
pub(crate) fn parse_decimal(s: &str) -> Option<Decimal> {
    if s.is_empty() {
        return None;
    }
    Decimal::from_str(s)
        .ok()
        .or_else(|| Decimal::from_scientific(s).ok())
}
