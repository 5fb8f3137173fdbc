//! Built-in operator functions
//!
//! Every function here has the `Fn(&Value, &Value) -> Result<Value, OperatorError>`
//! shape the operator table stores, so callers can register them under other
//! symbols or mix them with their own closures.

use crate::error::OperatorError;
use crate::value::Value;
use rust_decimal::Decimal;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy)]
enum ArithmeticOperation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

pub fn add(left: &Value, right: &Value) -> Result<Value, OperatorError> {
    arithmetic_operation(left, ArithmeticOperation::Add, right)
}

pub fn subtract(left: &Value, right: &Value) -> Result<Value, OperatorError> {
    arithmetic_operation(left, ArithmeticOperation::Subtract, right)
}

pub fn multiply(left: &Value, right: &Value) -> Result<Value, OperatorError> {
    arithmetic_operation(left, ArithmeticOperation::Multiply, right)
}

pub fn divide(left: &Value, right: &Value) -> Result<Value, OperatorError> {
    arithmetic_operation(left, ArithmeticOperation::Divide, right)
}

pub fn equal(left: &Value, right: &Value) -> Result<Value, OperatorError> {
    Ok(Value::Boolean(values_equal(left, right)))
}

pub fn not_equal(left: &Value, right: &Value) -> Result<Value, OperatorError> {
    Ok(Value::Boolean(!values_equal(left, right)))
}

pub fn greater_than(left: &Value, right: &Value) -> Result<Value, OperatorError> {
    Ok(Value::Boolean(compare(left, right)? == Ordering::Greater))
}

pub fn less_than(left: &Value, right: &Value) -> Result<Value, OperatorError> {
    Ok(Value::Boolean(compare(left, right)? == Ordering::Less))
}

/// Membership for lists, substring inclusion for everything else.
pub fn contains(left: &Value, right: &Value) -> Result<Value, OperatorError> {
    let needle = right.as_text().ok_or(OperatorError::Undefined)?;
    match left {
        Value::List(items) => Ok(Value::Boolean(items.iter().any(|item| *item == needle))),
        Value::Null => Err(OperatorError::Undefined),
        other => {
            let haystack = other.as_text().ok_or(OperatorError::Undefined)?;
            Ok(Value::Boolean(haystack.contains(&needle)))
        }
    }
}

pub fn and(left: &Value, right: &Value) -> Result<Value, OperatorError> {
    Ok(Value::Boolean(left.is_truthy() && right.is_truthy()))
}

pub fn or(left: &Value, right: &Value) -> Result<Value, OperatorError> {
    Ok(Value::Boolean(left.is_truthy() || right.is_truthy()))
}

/// Both sides must have a numeric view.
fn arithmetic_operation(
    left: &Value,
    op: ArithmeticOperation,
    right: &Value,
) -> Result<Value, OperatorError> {
    let l = left
        .as_number()
        .ok_or_else(|| OperatorError::NotANumber(left.describe()))?;
    let r = right
        .as_number()
        .ok_or_else(|| OperatorError::NotANumber(right.describe()))?;
    Ok(Value::Number(number_arithmetic(l, op, r)?))
}

fn number_arithmetic(
    left: Decimal,
    op: ArithmeticOperation,
    right: Decimal,
) -> Result<Decimal, OperatorError> {
    let result = match op {
        ArithmeticOperation::Add => left.checked_add(right),
        ArithmeticOperation::Subtract => left.checked_sub(right),
        ArithmeticOperation::Multiply => left.checked_mul(right),
        ArithmeticOperation::Divide => {
            if right.is_zero() {
                return Err(OperatorError::DivisionByZero);
            }
            left.checked_div(right)
        }
    };
    result.ok_or(OperatorError::Overflow)
}

/// `Null` only equals `Null`; otherwise numbers when both sides are numeric,
/// text views when not.
fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Null, Value::Null) => true,
        (Value::Null, _) | (_, Value::Null) => false,
        _ => matches!(compare(left, right), Ok(Ordering::Equal)),
    }
}

/// Numeric ordering when both sides parse as numbers, lexicographic ordering
/// of the text views otherwise. A number against a non-numeric string is
/// compared as text.
fn compare(left: &Value, right: &Value) -> Result<Ordering, OperatorError> {
    if let (Some(l), Some(r)) = (left.as_number(), right.as_number()) {
        return Ok(l.cmp(&r));
    }
    match (left.as_text(), right.as_text()) {
        (Some(l), Some(r)) => Ok(l.cmp(&r)),
        _ if left.is_null() || right.is_null() => Err(OperatorError::Undefined),
        _ => Err(OperatorError::Incomparable {
            left: left.describe(),
            right: right.describe(),
        }),
    }
}
