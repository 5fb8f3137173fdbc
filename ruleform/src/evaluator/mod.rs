//! Prefix sequence evaluation
//!
//! Evaluates a compiled rule with a single left-to-right scan:
//! 1. Operators, and any operand that directly follows an operator, are pushed
//! 2. An operand that follows a finished operand completes a triple, which is
//!    applied and collapsed together with every finished triple beneath it
//! 3. When the stack empties the pending value is the result

pub mod operations;

use crate::ast::ExpressionPart;
use crate::error::EvalError;
use crate::operators::{self, OperatorSet};
use crate::value::{Record, Value};

enum Slot<'a> {
    Operator(&'a str),
    Operand(Value),
}

/// Resolve an operand token. Missing fields become `Value::Null`.
fn resolve(part: &ExpressionPart, record: &Record) -> Value {
    match part {
        ExpressionPart::Variable(name) => record.get(name).cloned().unwrap_or(Value::Null),
        ExpressionPart::Text(text) | ExpressionPart::Other(text) => Value::Text(text.clone()),
        ExpressionPart::Operator(symbol) => Value::Text(symbol.clone()),
    }
}

/// Evaluate `sequence` against `record` using the operator definitions in
/// `operators`.
pub fn evaluate(
    sequence: &[ExpressionPart],
    record: &Record,
    operators: &OperatorSet,
) -> Result<Value, EvalError> {
    let mut stack: Vec<Slot> = Vec::with_capacity(sequence.len());

    for part in sequence {
        if let ExpressionPart::Operator(symbol) = part {
            stack.push(Slot::Operator(symbol));
            continue;
        }

        let value = resolve(part, record);
        if matches!(stack.last(), Some(Slot::Operator(_))) {
            stack.push(Slot::Operand(value));
            continue;
        }

        let mut right = value;
        loop {
            let left = match stack.pop() {
                Some(Slot::Operand(left)) => left,
                _ => return Err(EvalError::MissingOperand),
            };
            let symbol = match stack.pop() {
                Some(Slot::Operator(symbol)) => symbol,
                _ => return Err(EvalError::MissingOperator),
            };
            let operator = operators
                .get(&operators::key(symbol))
                .ok_or_else(|| EvalError::UnknownOperator(symbol.to_string()))?;
            right = operator.apply(&left, &right)?;

            match stack.last() {
                None => return Ok(right),
                Some(Slot::Operator(_)) => break,
                Some(Slot::Operand(_)) => {}
            }
        }
        stack.push(Slot::Operand(right));
    }

    Err(EvalError::Incomplete)
}
