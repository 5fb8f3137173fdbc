use crate::value::{Record, Value};
use crate::{RuleError, RuleResult};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::Value as JsonValue;

/// Build a record from a JSON object.
///
/// Values must be flat: scalars, `null`, or arrays of scalars. Nested objects
/// are rejected since rules only do flat field lookup.
pub fn record_from_json(json: &JsonValue) -> RuleResult<Record> {
    let object = json.as_object().ok_or_else(|| {
        RuleError::InvalidRecord(format!("Expected a JSON object, got {}", kind(json)))
    })?;

    let mut record = Record::with_capacity(object.len());
    for (field, value) in object {
        record.insert(field.clone(), field_value(field, value)?);
    }
    Ok(record)
}

/// Parse JSON text and build a record from it.
pub fn record_from_json_str(json: &str) -> RuleResult<Record> {
    let value: JsonValue = serde_json::from_str(json)
        .map_err(|e| RuleError::InvalidRecord(format!("Invalid JSON: {}", e)))?;
    record_from_json(&value)
}

fn field_value(field: &str, value: &JsonValue) -> RuleResult<Value> {
    match value {
        JsonValue::Null => Ok(Value::Null),
        JsonValue::Bool(b) => Ok(Value::Boolean(*b)),
        JsonValue::Number(n) => Ok(Value::Number(json_number(field, n)?)),
        JsonValue::String(s) => Ok(Value::Text(s.clone())),
        JsonValue::Array(items) => items
            .iter()
            .map(|item| list_item(field, item))
            .collect::<RuleResult<Vec<String>>>()
            .map(Value::List),
        JsonValue::Object(_) => Err(RuleError::InvalidRecord(format!(
            "Field '{}' holds a nested object",
            field
        ))),
    }
}

fn list_item(field: &str, item: &JsonValue) -> RuleResult<String> {
    match item {
        JsonValue::String(s) => Ok(s.clone()),
        JsonValue::Bool(b) => Ok(b.to_string()),
        JsonValue::Number(n) => Ok(json_number(field, n)?.normalize().to_string()),
        other => Err(RuleError::InvalidRecord(format!(
            "Field '{}' holds a list containing {}",
            field,
            kind(other)
        ))),
    }
}

fn json_number(field: &str, n: &serde_json::Number) -> RuleResult<Decimal> {
    crate::value::parse_decimal(&n.to_string()).ok_or_else(|| {
        RuleError::InvalidRecord(format!("Field '{}' holds an unrepresentable number {}", field, n))
    })
}

/// Render an evaluation result as JSON.
pub fn value_to_json(value: &Value) -> JsonValue {
    match value {
        Value::Number(n) => {
            let n = n.normalize();
            if n.scale() == 0 {
                if let Some(i) = n.to_i64() {
                    return JsonValue::from(i);
                }
            }
            n.to_f64()
                .and_then(serde_json::Number::from_f64)
                .map(JsonValue::Number)
                .unwrap_or_else(|| JsonValue::String(n.to_string()))
        }
        Value::Text(s) => JsonValue::String(s.clone()),
        Value::Boolean(b) => JsonValue::Bool(*b),
        Value::List(items) => JsonValue::Array(items.iter().cloned().map(JsonValue::String).collect()),
        Value::Null => JsonValue::Null,
    }
}

fn kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
