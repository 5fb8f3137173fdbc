use crate::error::OperatorError;
use crate::evaluator::operations::*;
use crate::value::Value;
use rust_decimal::Decimal;
use std::str::FromStr;

fn number(s: &str) -> Value {
    Value::Number(Decimal::from_str(s).unwrap())
}

#[test]
fn test_arithmetic_parses_text_operands() {
    assert_eq!(add(&Value::from("2"), &number("3")).unwrap(), number("5"));
    assert_eq!(subtract(&Value::from(" 10 "), &Value::from("4")).unwrap(), number("6"));
    assert_eq!(multiply(&number("1.5"), &Value::from("2")).unwrap(), number("3"));
    assert_eq!(divide(&Value::from("23"), &Value::from("2")).unwrap(), number("11.5"));
}

#[test]
fn test_arithmetic_rejects_non_numbers() {
    assert!(matches!(
        add(&Value::from("abc"), &number("1")),
        Err(OperatorError::NotANumber(_))
    ));
    assert!(matches!(
        multiply(&Value::Null, &number("1")),
        Err(OperatorError::NotANumber(_))
    ));
    assert!(matches!(
        subtract(&number("1"), &Value::Boolean(true)),
        Err(OperatorError::NotANumber(_))
    ));
}

#[test]
fn test_division_by_zero() {
    assert_eq!(
        divide(&number("1"), &Value::from("0")).unwrap_err(),
        OperatorError::DivisionByZero
    );
}

#[test]
fn test_overflow_is_an_error() {
    let max = Value::Number(Decimal::MAX);
    assert_eq!(add(&max, &max).unwrap_err(), OperatorError::Overflow);
}

#[test]
fn test_equality_compares_numbers_numerically() {
    assert_eq!(equal(&Value::from("25"), &number("25.00")).unwrap(), Value::Boolean(true));
    assert_eq!(equal(&Value::from("1e2"), &number("100")).unwrap(), Value::Boolean(true));
    assert_eq!(not_equal(&number("1"), &number("2")).unwrap(), Value::Boolean(true));
}

#[test]
fn test_equality_falls_back_to_text() {
    assert_eq!(equal(&Value::from("TX"), &Value::from("TX")).unwrap(), Value::Boolean(true));
    assert_eq!(equal(&Value::from("TX"), &Value::from("tx")).unwrap(), Value::Boolean(false));
    assert_eq!(equal(&Value::from(true), &Value::from("true")).unwrap(), Value::Boolean(true));
}

#[test]
fn test_equality_with_null() {
    assert_eq!(equal(&Value::Null, &Value::Null).unwrap(), Value::Boolean(true));
    assert_eq!(equal(&Value::Null, &Value::from("")).unwrap(), Value::Boolean(false));
    assert_eq!(not_equal(&Value::from("x"), &Value::Null).unwrap(), Value::Boolean(true));
}

#[test]
fn test_ordering_numeric_when_both_sides_are_numbers() {
    // As text "10" < "9"; as numbers it is the other way round.
    assert_eq!(greater_than(&Value::from("10"), &Value::from("9")).unwrap(), Value::Boolean(true));
    assert_eq!(less_than(&number("-1"), &Value::from("0")).unwrap(), Value::Boolean(true));
}

#[test]
fn test_ordering_mixed_operands_compare_as_text() {
    assert_eq!(greater_than(&Value::from("abc"), &number("5")).unwrap(), Value::Boolean(true));
    assert_eq!(less_than(&Value::from("apple"), &Value::from("banana")).unwrap(), Value::Boolean(true));
}

#[test]
fn test_ordering_with_null_is_undefined() {
    assert_eq!(
        greater_than(&Value::Null, &number("1")).unwrap_err(),
        OperatorError::Undefined
    );
}

#[test]
fn test_contains_substring_and_membership() {
    assert_eq!(
        contains(&Value::from("San Jose"), &Value::from("Jose")).unwrap(),
        Value::Boolean(true)
    );
    assert_eq!(
        contains(&number("12345"), &Value::from("234")).unwrap(),
        Value::Boolean(true)
    );
    let list = Value::List(vec!["1".to_string(), "22".to_string()]);
    assert_eq!(contains(&list, &number("22")).unwrap(), Value::Boolean(true));
    assert_eq!(contains(&list, &number("2")).unwrap(), Value::Boolean(false));
    assert_eq!(contains(&Value::Null, &number("2")).unwrap_err(), OperatorError::Undefined);
}

#[test]
fn test_logical_operators_use_truthiness() {
    assert_eq!(and(&Value::from(true), &Value::from("1")).unwrap(), Value::Boolean(true));
    assert_eq!(and(&Value::from(true), &number("0")).unwrap(), Value::Boolean(false));
    assert_eq!(or(&Value::Null, &Value::from("")).unwrap(), Value::Boolean(false));
    assert_eq!(or(&Value::Null, &Value::List(vec!["a".to_string()])).unwrap(), Value::Boolean(true));
}
