use crate::ast::ExpressionPart;
use crate::error::{EvalError, OperatorError};
use crate::evaluator::evaluate;
use crate::operators::{OperatorSet, OperatorTable};
use crate::parser::{segment, to_prefix};
use crate::value::{Record, Value};
use crate::ResourceLimits;
use rust_decimal::Decimal;
use std::str::FromStr;

fn compile(rule: &str) -> (Vec<ExpressionPart>, OperatorSet) {
    let mut operators = OperatorTable::new();
    let parts = segment(rule, &mut operators).unwrap();
    let sequence = to_prefix(parts, &operators, rule, &ResourceLimits::default()).unwrap();
    let bindings = operators.bindings_for(&sequence);
    (sequence, bindings)
}

fn eval(rule: &str, record: &Record) -> Result<Value, EvalError> {
    let (sequence, bindings) = compile(rule);
    evaluate(&sequence, record, &bindings)
}

fn record(fields: &[(&str, Value)]) -> Record {
    fields
        .iter()
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect()
}

fn number(s: &str) -> Value {
    Value::Number(Decimal::from_str(s).unwrap())
}

#[test]
fn test_arithmetic_precedence() {
    let data = record(&[("x", Value::from(23_i64))]);
    assert_eq!(eval("(2 + [x]/2 - 1)*2", &data).unwrap(), number("25"));
}

#[test]
fn test_chained_subtraction_is_left_associative() {
    assert_eq!(eval("10 - 4 - 3", &Record::new()).unwrap(), number("3"));
    assert_eq!(eval("16 / 4 / 2", &Record::new()).unwrap(), number("2"));
}

#[test]
fn test_boolean_composition_without_short_circuit() {
    let data = record(&[("x", Value::from(23_i64)), ("state", Value::from("TX"))]);
    assert_eq!(
        eval("((2 + [x]/2 - 1)*2 > 24) or ([state] = CA)", &data).unwrap(),
        Value::Boolean(true)
    );
    assert_eq!(
        eval("((2 + [x]/2 - 1)*2 > 25) or ([state] = CA)", &data).unwrap(),
        Value::Boolean(false)
    );
}

#[test]
fn test_collapses_chain_of_completed_triples() {
    let data = record(&[("a", Value::from(1_i64)), ("b", Value::from(2_i64))]);
    assert_eq!(
        eval("[a] = 1 and [b] = 2", &data).unwrap(),
        Value::Boolean(true)
    );
    assert_eq!(
        eval("[a] = 1 and [b] = 3 or [a] = 1", &data).unwrap(),
        Value::Boolean(true)
    );
}

#[test]
fn test_quoted_literal_round_trip() {
    let data = record(&[("name", Value::from("Wendy's"))]);
    assert_eq!(
        eval("[name] = 'Wendy''s'", &data).unwrap(),
        Value::Boolean(true)
    );
}

#[test]
fn test_missing_field_resolves_to_null() {
    assert_eq!(
        eval("[missing] = 1", &Record::new()).unwrap(),
        Value::Boolean(false)
    );
    assert_eq!(
        eval("[missing] > 1", &Record::new()).unwrap_err(),
        EvalError::Operator(OperatorError::Undefined)
    );
}

#[test]
fn test_lone_operand_does_not_reduce() {
    assert_eq!(eval("[a]", &Record::new()).unwrap_err(), EvalError::MissingOperand);
}

#[test]
fn test_dangling_operator_is_incomplete() {
    let data = record(&[("a", Value::from(1_i64))]);
    assert_eq!(eval("[a] =", &data).unwrap_err(), EvalError::Incomplete);
}

#[test]
fn test_leading_operator_is_incomplete() {
    let data = record(&[("state", Value::from("TX"))]);
    let err = eval(" and ([state] = TX) or ([state] = CA)", &data).unwrap_err();
    assert_eq!(err, EvalError::Incomplete);
}

#[test]
fn test_unbound_operator_is_reported() {
    let sequence = vec![
        ExpressionPart::Operator("^".to_string()),
        ExpressionPart::Other("1".to_string()),
        ExpressionPart::Other("2".to_string()),
    ];
    assert_eq!(
        evaluate(&sequence, &Record::new(), &OperatorSet::new()).unwrap_err(),
        EvalError::UnknownOperator("^".to_string())
    );
}

#[test]
fn test_operator_casing_does_not_matter_at_evaluation() {
    let data = record(&[("a", Value::from(true)), ("b", Value::from(false))]);
    assert_eq!(eval("[a] OR [b]", &data).unwrap(), Value::Boolean(true));
    assert_eq!(eval("[a] And [b]", &data).unwrap(), Value::Boolean(false));
}

#[test]
fn test_contains_on_list_field() {
    let data = record(&[(
        "tags",
        Value::List(vec!["red".to_string(), "blue".to_string()]),
    )]);
    assert_eq!(eval("[tags] contains blue", &data).unwrap(), Value::Boolean(true));
    assert_eq!(eval("[tags] contains re", &data).unwrap(), Value::Boolean(false));
}
