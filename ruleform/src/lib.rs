//! # Ruleform Engine
//!
//! **Rules written by people, evaluated by machines**
//!
//! Ruleform compiles short, human-readable conditions such as
//! `[age] > 18 and [state] = 'TX'` into a prefix sequence, caches it under a
//! rule name, and evaluates it against a record of field values whenever
//! asked. It is meant for form validation and business rules authored by end
//! users rather than programmers.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ruleform::{Engine, Record, RuleResult, Value};
//!
//! fn main() -> RuleResult<()> {
//!     let mut engine = Engine::new();
//!
//!     engine.parse("adult texan", "[age] > 18 and [state] = 'TX'")?;
//!
//!     let mut record = Record::new();
//!     record.insert("age".to_string(), Value::from(30_i64));
//!     record.insert("state".to_string(), Value::from("TX"));
//!
//!     let result = engine.execute("adult texan", &record)?;
//!     assert_eq!(result, Value::Boolean(true));
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Rule Text
//!
//! ### Fields
//! Field names go between square brackets and may contain spaces:
//! `[day of birth]`.
//!
//! ### Literals
//! Anything between single quotes is text; double a quote to write one:
//! `'Wendy''s'`. Unquoted numbers and words are literals too.
//!
//! ### Operators
//! `* /` bind tightest, then `+ -`, then `= != > < contains`, then
//! `and or`. Parentheses group. Operators live in a per-engine table and can
//! be added, removed or renamed at runtime.

pub mod actions;
pub mod ast;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod operators;
pub mod parser;
pub mod resource_limits;
pub mod serializers;
pub mod value;

pub use actions::ActionRules;
pub use ast::{ExpressionPart, PrefixSequence, RuleName};
pub use engine::{CompiledRule, Engine};
pub use error::{EvalError, OperatorError, RuleError};
pub use operators::{Operator, OperatorFn, OperatorSet, OperatorTable};
pub use parser::{segment, to_prefix};
pub use resource_limits::ResourceLimits;
pub use serializers::{record_from_json, record_from_json_str, value_to_json};
pub use value::{Record, Value};

/// Result type for ruleform operations
pub type RuleResult<T> = Result<T, RuleError>;

#[cfg(test)]
mod tests;
