//! Comparison strategies for JSON values.
//!
//! Collections hold [`serde_json::Value`] elements, so every comparison is
//! made between dynamically typed values. Two strategies are provided:
//!
//! - **Exact**: same JSON type and same value. Numbers compare by numeric
//!   value, so `1` and `1.0` are exactly equal. Arrays and records compare
//!   structurally.
//! - **Coercing**: like exact within a type. Across scalar types, strings
//!   are trimmed and parsed as numbers (the empty string is `0`) and booleans
//!   become `1`/`0`. `null` only equals `null`; arrays and records never
//!   equal a scalar.
//!
//! Sorting needs a total order, which neither strategy provides across
//! types, so [`sort_cmp`] ranks values by type first, with numeric strings
//! ranked as numbers.

use std::cmp::Ordering;

use serde_json::{Number, Value};

/// Returns the JSON type name of a value.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Compares two numbers, handling mixed integer and float representations.
pub fn compare_numbers(a: &Number, b: &Number) -> Option<Ordering> {
    if let (Some(a), Some(b)) = (a.as_i64(), b.as_i64()) {
        return Some(a.cmp(&b));
    }
    if let (Some(a), Some(b)) = (a.as_u64(), b.as_u64()) {
        return Some(a.cmp(&b));
    }
    // Mixed representations - convert to f64
    a.as_f64()?.partial_cmp(&b.as_f64()?)
}

/// Exact equality: same JSON type and value.
pub fn exact_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => compare_numbers(a, b) == Some(Ordering::Equal),
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(a, b)| exact_eq(a, b))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(key, left)| b.get(key).is_some_and(|right| exact_eq(left, right)))
        }
        _ => a == b,
    }
}

/// Coercing equality.
pub fn coercing_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Null, _) | (_, Value::Null) => false,
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => compare_numbers(a, b) == Some(Ordering::Equal),
        (Value::Array(_) | Value::Object(_), _) | (_, Value::Array(_) | Value::Object(_)) => {
            exact_eq(a, b)
        }
        _ => match (coerce_number(a), coerce_number(b)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        },
    }
}

/// Coercing ordering.
///
/// Returns `None` when the values cannot be ordered: `null`, arrays,
/// records, or a string that does not parse as a number compared against a
/// number.
pub fn coercing_cmp(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Number(a), Value::Number(b)) => compare_numbers(a, b),
        (Value::Null | Value::Array(_) | Value::Object(_), _)
        | (_, Value::Null | Value::Array(_) | Value::Object(_)) => None,
        _ => coerce_number(a)?.partial_cmp(&coerce_number(b)?),
    }
}

/// Converts a scalar to a number for coercing comparison.
fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::String(s) if s.trim().is_empty() => Some(0.0),
        other => numeric(other),
    }
}

/// Extracts a numeric value for aggregation.
///
/// Numbers, numeric strings (surrounding whitespace ignored) and booleans
/// (`1`/`0`) are numeric. Everything else, including the empty string, is
/// not.
pub fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

// Numbers and numeric strings share the number class when sorting
fn sort_number(value: Option<&Value>) -> Option<f64> {
    match value {
        Some(Value::Number(n)) => Some(n.as_f64().unwrap_or(f64::NAN)),
        Some(text @ Value::String(_)) => numeric(text),
        _ => None,
    }
}

fn sort_rank(value: Option<&Value>) -> u8 {
    if sort_number(value).is_some() {
        return 0;
    }
    match value {
        Some(Value::Number(_)) => 0,
        Some(Value::String(_)) => 1,
        Some(Value::Bool(_)) => 2,
        Some(Value::Array(_)) => 3,
        Some(Value::Object(_)) => 4,
        Some(Value::Null) | None => 5,
    }
}

/// Total order used for sorting.
///
/// Numbers and numeric strings < other strings < booleans < arrays < records
/// < null/missing. Numeric strings compare by their numeric value, so `"21"`
/// sorts between `20` and `22`, matching the coercing `<`/`>` operators.
/// Other strings and booleans compare naturally; arrays and records are all
/// equal to each other.
pub fn sort_cmp(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    if let (Some(x), Some(y)) = (sort_number(a), sort_number(b)) {
        return x.total_cmp(&y);
    }
    match (a, b) {
        (Some(Value::String(a)), Some(Value::String(b))) => a.cmp(b),
        (Some(Value::Bool(a)), Some(Value::Bool(b))) => a.cmp(b),
        _ => sort_rank(a).cmp(&sort_rank(b)),
    }
}

/// Stringifies a value for use as a group key.
///
/// Strings are used as-is, `null` becomes `"null"`, and everything else is
/// its compact JSON text. A missing value is the empty string.
pub fn group_key(value: Option<&Value>) -> String {
    match value {
        None => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Hash key for de-duplication.
///
/// Exactly equal values always produce the same key. Distinct values may
/// share one, so callers confirm with [`exact_eq`].
pub(crate) fn bucket_key(value: &Value) -> String {
    match value {
        Value::Number(n) => n.as_f64().map_or_else(|| n.to_string(), |f| f.to_string()),
        Value::Array(items) => format!("[{}]", items.len()),
        Value::Object(map) => format!("{{{}}}", map.len()),
        other => group_key(Some(other)),
    }
}
