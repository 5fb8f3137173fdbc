//! Rule identifiers and expression parts
//!
//! This module contains the types shared by the segmenter, the converter and
//! the evaluator:
//! - `RuleName` for keying compiled rules in the engine cache
//! - `ExpressionPart` for one token of a rule
//! - `PrefixSequence` for the compiled, evaluation-ready token order

use serde::Serialize;
use std::fmt;

/// Identifier a compiled rule is cached under.
///
/// Callers may key rules by name or by number. The action registry uses
/// numeric ids as synthetic keys so they never collide with user names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum RuleName {
    Name(String),
    Id(i64),
}

impl fmt::Display for RuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleName::Name(name) => write!(f, "{}", name),
            RuleName::Id(id) => write!(f, "#{}", id),
        }
    }
}

impl From<&str> for RuleName {
    fn from(name: &str) -> Self {
        RuleName::Name(name.to_string())
    }
}

impl From<String> for RuleName {
    fn from(name: String) -> Self {
        RuleName::Name(name)
    }
}

impl From<&String> for RuleName {
    fn from(name: &String) -> Self {
        RuleName::Name(name.clone())
    }
}

impl From<i64> for RuleName {
    fn from(id: i64) -> Self {
        RuleName::Id(id)
    }
}

impl From<&RuleName> for RuleName {
    fn from(name: &RuleName) -> Self {
        name.clone()
    }
}

/// One token of a rule expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ExpressionPart {
    /// Single-quoted literal with `''` already collapsed to `'`
    Text(String),
    /// Field name taken from `[...]`, inner spaces kept
    Variable(String),
    /// Operator symbol or parenthesis, in the casing it was written with
    Operator(String),
    /// Trimmed bare literal: a number or an unquoted word
    Other(String),
}

impl ExpressionPart {
    pub fn is_operator(&self) -> bool {
        matches!(self, ExpressionPart::Operator(_))
    }

    pub fn as_variable(&self) -> Option<&str> {
        match self {
            ExpressionPart::Variable(name) => Some(name),
            _ => None,
        }
    }

    /// `Some(true)` for `(`, `Some(false)` for `)`, `None` for anything else.
    pub fn paren(&self) -> Option<bool> {
        match self {
            ExpressionPart::Operator(symbol) | ExpressionPart::Other(symbol) => {
                match symbol.as_str() {
                    "(" => Some(true),
                    ")" => Some(false),
                    _ => None,
                }
            }
            _ => None,
        }
    }
}

impl fmt::Display for ExpressionPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpressionPart::Text(text) => write!(f, "'{}'", text.replace('\'', "''")),
            ExpressionPart::Variable(name) => write!(f, "[{}]", name),
            ExpressionPart::Operator(symbol) => write!(f, "{}", symbol.trim()),
            ExpressionPart::Other(literal) => write!(f, "{}", literal),
        }
    }
}

/// Tokens of a compiled rule in prefix (operator-before-operands) order.
pub type PrefixSequence = Vec<ExpressionPart>;

/// Field names referenced by a token sequence, first occurrence first.
pub fn variables_of(parts: &[ExpressionPart]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for name in parts.iter().filter_map(ExpressionPart::as_variable) {
        if !names.iter().any(|seen| seen == name) {
            names.push(name.to_string());
        }
    }
    names
}
