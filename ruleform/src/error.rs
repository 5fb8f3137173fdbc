use crate::ast::RuleName;
use thiserror::Error;

/// Errors surfaced by the public engine and registry operations.
///
/// Low-level evaluation causes (`EvalError`) never leave the engine; they are
/// logged and reported as `InvalidExpression` so rule authors get one
/// actionable message.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuleError {
    #[error("Expression {expression} is not valid.")]
    InvalidExpression { expression: String },

    #[error("Rule name {0} already exists. Please use another name or call update.")]
    RuleAlreadyExists(RuleName),

    #[error("Rule {0} doesn't exist. Please call parse first.")]
    RuleNotFound(RuleName),

    #[error("Operator '{0}' doesn't exist.")]
    OperatorNotFound(String),

    #[error("Invalid operator symbol '{0}'")]
    InvalidOperator(String),

    #[error("Action '{action}' is already registered for input {input}.")]
    ActionAlreadyRegistered { input: RuleName, action: String },

    #[error("Action '{action}' is not registered for input {input}.")]
    ActionNotRegistered { input: RuleName, action: String },

    #[error("Input {0} has no registered actions.")]
    InputNotRegistered(RuleName),

    #[error("Resource limit exceeded: {limit_name} (limit: {limit_value}, actual: {actual_value})")]
    ResourceLimitExceeded {
        limit_name: String,
        limit_value: String,
        actual_value: String,
    },

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Engine error: {0}")]
    Engine(String),
}

impl RuleError {
    pub fn invalid_expression(expression: impl Into<String>) -> Self {
        RuleError::InvalidExpression {
            expression: expression.into(),
        }
    }

    /// Stable machine-readable code, one per variant
    pub fn code(&self) -> &'static str {
        match self {
            RuleError::InvalidExpression { .. } => "INVALID_EXP",
            RuleError::RuleAlreadyExists(_) => "RULE_EXISTS",
            RuleError::RuleNotFound(_) => "RULE_NOT_EXISTS",
            RuleError::OperatorNotFound(_) => "OPERATOR_NOT_EXISTS",
            RuleError::InvalidOperator(_) => "INVALID_OPERATOR",
            RuleError::ActionAlreadyRegistered { .. } => "ACTION_EXISTS",
            RuleError::ActionNotRegistered { .. } => "ACTION_NOT_EXISTS",
            RuleError::InputNotRegistered(_) => "INPUT_NOT_EXISTS",
            RuleError::ResourceLimitExceeded { .. } => "LIMIT_EXCEEDED",
            RuleError::InvalidRecord(_) => "INVALID_RECORD",
            RuleError::Engine(_) => "ENGINE",
        }
    }
}

/// Why a prefix sequence could not be reduced to a single value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("operand expected but the stack was empty")]
    MissingOperand,

    #[error("operator expected before operand")]
    MissingOperator,

    #[error("operator '{0}' is not bound for this rule")]
    UnknownOperator(String),

    #[error("expression did not reduce to a single value")]
    Incomplete,

    #[error(transparent)]
    Operator(#[from] OperatorError),
}

/// Failure of a single operator function.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OperatorError {
    #[error("{0} is not a number")]
    NotANumber(String),

    #[error("division by zero")]
    DivisionByZero,

    #[error("arithmetic overflow")]
    Overflow,

    #[error("cannot compare {left} with {right}")]
    Incomparable { left: String, right: String },

    #[error("operand is undefined")]
    Undefined,
}
