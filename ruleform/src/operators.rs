//! Operator registry
//!
//! Maps case-insensitive symbols to a priority and a binary function. The
//! table also owns the regex the segmenter splits on; any mutation marks it
//! stale and it is rebuilt on the next `matcher()` call.

use crate::ast::ExpressionPart;
use crate::error::OperatorError;
use crate::evaluator::operations;
use crate::value::Value;
use crate::{RuleError, RuleResult};
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Binary operator function
pub type OperatorFn = Arc<dyn Fn(&Value, &Value) -> Result<Value, OperatorError> + Send + Sync>;

/// Priority plus evaluation function. Lower priority binds tighter.
#[derive(Clone)]
pub struct Operator {
    priority: i32,
    operate: OperatorFn,
}

impl Operator {
    pub fn new<F>(priority: i32, operate: F) -> Self
    where
        F: Fn(&Value, &Value) -> Result<Value, OperatorError> + Send + Sync + 'static,
    {
        Self {
            priority,
            operate: Arc::new(operate),
        }
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn apply(&self, left: &Value, right: &Value) -> Result<Value, OperatorError> {
        (self.operate)(left, right)
    }
}

impl fmt::Debug for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operator")
            .field("priority", &self.priority)
            .finish_non_exhaustive()
    }
}

/// Operators keyed by lower-cased symbol
pub type OperatorSet = BTreeMap<String, Operator>;

#[derive(Debug, Clone)]
struct Entry {
    symbol: String,
    operator: Operator,
}

pub struct OperatorTable {
    entries: BTreeMap<String, Entry>,
    /// `None` when the table changed since the last build
    matcher: Option<Regex>,
}

impl Default for OperatorTable {
    fn default() -> Self {
        let mut table = Self::empty();
        for (symbol, operator) in default_operators() {
            table.entries.insert(
                key(symbol),
                Entry {
                    symbol: symbol.to_string(),
                    operator,
                },
            );
        }
        table
    }
}

impl OperatorTable {
    /// Table seeded with the built-in operators
    pub fn new() -> Self {
        Self::default()
    }

    /// Table with no operators at all; only parentheses are recognized
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
            matcher: None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.entries.contains_key(&key(symbol))
    }

    pub fn get(&self, symbol: &str) -> Option<&Operator> {
        self.entries.get(&key(symbol)).map(|entry| &entry.operator)
    }

    /// Priority of `symbol`, 0 when it is not registered
    pub fn priority(&self, symbol: &str) -> i32 {
        self.get(symbol).map(Operator::priority).unwrap_or(0)
    }

    /// Symbols as configured, in key order
    pub fn symbols(&self) -> Vec<&str> {
        self.entries.values().map(|e| e.symbol.as_str()).collect()
    }

    /// Add or replace an operator.
    pub fn insert(&mut self, symbol: &str, operator: Operator) -> RuleResult<()> {
        if symbol.is_empty() {
            return Err(RuleError::InvalidOperator(symbol.to_string()));
        }
        debug!(symbol, priority = operator.priority, "operator registered");
        self.entries.insert(
            key(symbol),
            Entry {
                symbol: symbol.to_string(),
                operator,
            },
        );
        self.matcher = None;
        Ok(())
    }

    pub fn remove(&mut self, symbol: &str) -> Option<Operator> {
        let removed = self.entries.remove(&key(symbol)).map(|e| e.operator);
        if removed.is_some() {
            debug!(symbol, "operator removed");
            self.matcher = None;
        }
        removed
    }

    pub fn clear(&mut self) {
        debug!(count = self.entries.len(), "operators cleared");
        self.entries.clear();
        self.matcher = None;
    }

    /// Register the definition of `current` under `new`, dropping `current`
    /// unless `keep_current` is set. On error the table is unchanged.
    pub fn rename(&mut self, current: &str, new: &str, keep_current: bool) -> RuleResult<()> {
        let operator = self
            .get(current)
            .cloned()
            .ok_or_else(|| RuleError::OperatorNotFound(current.to_string()))?;
        if new.is_empty() {
            return Err(RuleError::InvalidOperator(new.to_string()));
        }
        if !keep_current {
            self.entries.remove(&key(current));
            self.matcher = None;
        }
        self.insert(new, operator)
    }

    /// Regex matching any operator symbol or a parenthesis.
    pub fn matcher(&mut self) -> RuleResult<&Regex> {
        if self.matcher.is_none() {
            let pattern = self.pattern();
            debug!(%pattern, "rebuilding operator matcher");
            let regex = Regex::new(&pattern)
                .map_err(|e| RuleError::Engine(format!("Cannot build operator pattern: {}", e)))?;
            self.matcher = Some(regex);
        }
        self.matcher
            .as_ref()
            .ok_or_else(|| RuleError::Engine("Operator pattern unavailable".to_string()))
    }

    fn pattern(&self) -> String {
        let mut symbols: Vec<&str> = self.symbols();
        // Longest first, so `!=` wins over a registered `!`.
        symbols.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then(a.cmp(b)));
        let mut alternatives: Vec<String> = symbols
            .iter()
            .map(|symbol| symbol.chars().map(|c| regex::escape(&c.to_string())).collect())
            .collect();
        alternatives.push(r"\(".to_string());
        alternatives.push(r"\)".to_string());
        format!("(?i){}", alternatives.join("|"))
    }

    /// The operators `parts` refers to, for binding into a compiled rule.
    pub fn bindings_for(&self, parts: &[ExpressionPart]) -> OperatorSet {
        let mut set = OperatorSet::new();
        for part in parts {
            if let ExpressionPart::Operator(symbol) = part {
                if let Some(operator) = self.get(symbol) {
                    set.insert(key(symbol), operator.clone());
                }
            }
        }
        set
    }
}

impl fmt::Debug for OperatorTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperatorTable")
            .field("symbols", &self.symbols())
            .field("matcher_built", &self.matcher.is_some())
            .finish()
    }
}

pub(crate) fn key(symbol: &str) -> String {
    symbol.to_lowercase()
}

fn default_operators() -> Vec<(&'static str, Operator)> {
    vec![
        ("*", Operator::new(-1, operations::multiply)),
        ("/", Operator::new(-1, operations::divide)),
        ("+", Operator::new(0, operations::add)),
        ("-", Operator::new(0, operations::subtract)),
        ("=", Operator::new(1, operations::equal)),
        ("!=", Operator::new(1, operations::not_equal)),
        (">", Operator::new(1, operations::greater_than)),
        ("<", Operator::new(1, operations::less_than)),
        (" contains ", Operator::new(1, operations::contains)),
        (" and ", Operator::new(2, operations::and)),
        (" or ", Operator::new(2, operations::or)),
    ]
}
