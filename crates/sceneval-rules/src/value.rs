//! Measuring JSON values for the built-in predicates.

use serde_json::Value;

/// How a value is measured, which also selects the message variant
/// (`min-string`, `min-number`, `min-items`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueClass {
    /// Measured in characters.
    String,
    /// Measured by value.
    Number,
    /// Arrays and objects, measured in elements.
    Items,
    /// Null and booleans.
    Other,
}

impl ValueClass {
    /// Classify a value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::String(_) => ValueClass::String,
            Value::Number(_) => ValueClass::Number,
            Value::Array(_) | Value::Object(_) => ValueClass::Items,
            Value::Null | Value::Bool(_) => ValueClass::Other,
        }
    }

    /// Catalog key suffix, if the class has one.
    pub fn suffix(self) -> Option<&'static str> {
        match self {
            ValueClass::String => Some("string"),
            ValueClass::Number => Some("number"),
            ValueClass::Items => Some("items"),
            ValueClass::Other => None,
        }
    }
}

/// The measure compared against numeric rule parameters.
pub fn measure(value: &Value) -> Option<f64> {
    match value {
        Value::String(s) => Some(s.chars().count() as f64),
        Value::Number(n) => n.as_f64(),
        Value::Array(items) => Some(items.len() as f64),
        Value::Object(map) => Some(map.len() as f64),
        Value::Null | Value::Bool(_) => None,
    }
}

/// True when `required` is satisfied: not null, not an empty string, not
/// zero, not `false`. Arrays and objects only need to be present.
pub fn has_value(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// True when `omitempty` should stop the chain.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        other => !has_value(other),
    }
}

/// Text form used by `eq`, `ne`, and `oneof` for scalar values.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
