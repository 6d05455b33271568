//! Clause types for `where` predicates.
//!
//! A [`Clause`] is a single filter predicate: a key path, an operator, and
//! the value(s) to compare against. The collection's `where` family builds
//! clauses and retains the elements they match.

use std::borrow::Cow;

use serde_json::Value;

use crate::op::Op;
use crate::path::resolve_field;
use crate::pattern::LikePattern;
use crate::value::{coercing_cmp, coercing_eq, exact_eq};

/// A single filter predicate.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use standout_collect::{Clause, Op};
///
/// let clause = Clause::new("age", Op::Gte, 18);
/// assert!(clause.matches(&json!({"age": 21})));
/// assert!(clause.matches(&json!({"age": "18"})));
/// assert!(!clause.matches(&json!({"name": "no age"})));
/// ```
#[derive(Debug, Clone)]
pub struct Clause {
    /// The key path to compare.
    pub field: String,
    /// The comparison operator.
    pub op: Op,
    /// The value to compare against.
    pub value: ClauseValue,
}

impl Clause {
    /// Creates a new clause.
    ///
    /// The value is shaped for the operator:
    /// - set operators take an array of candidates (a scalar is a set of one)
    /// - range operators take a two-element `[min, max]` array
    /// - pattern operators take a string (numbers and booleans use their text)
    ///
    /// A value that cannot be shaped yields a clause that matches nothing
    /// (or, for `not between`, every element that has the field).
    pub fn new(field: impl Into<String>, op: Op, value: impl Into<Value>) -> Self {
        let value = value.into();
        let value = if op.is_set_op() {
            match value {
                Value::Array(values) => ClauseValue::Set(values),
                other => ClauseValue::Set(vec![other]),
            }
        } else if op.is_range_op() {
            ClauseValue::range(value, None)
        } else if op.is_pattern_op() {
            ClauseValue::pattern(&value, matches!(op, Op::ILike | Op::NotILike))
        } else {
            ClauseValue::Single(value)
        };

        Clause {
            field: field.into(),
            op,
            value,
        }
    }

    /// Creates an inclusive range clause.
    ///
    /// If `min` is a two-element array it is used as the `[min, max]` pair
    /// and `max` is ignored. Otherwise `max` is required; without it the
    /// clause matches nothing.
    pub fn between(field: impl Into<String>, min: impl Into<Value>, max: Option<Value>) -> Self {
        Clause {
            field: field.into(),
            op: Op::Between,
            value: ClauseValue::range(min.into(), max),
        }
    }

    /// Creates the negation of [`Clause::between`].
    ///
    /// With malformed bounds every element that has the field matches.
    pub fn not_between(
        field: impl Into<String>,
        min: impl Into<Value>,
        max: Option<Value>,
    ) -> Self {
        Clause {
            field: field.into(),
            op: Op::NotBetween,
            value: ClauseValue::range(min.into(), max),
        }
    }

    /// Evaluates this clause against a collection element.
    ///
    /// Elements that are not records, or in which the key path does not
    /// resolve, never match.
    pub fn matches(&self, item: &Value) -> bool {
        match resolve_field(item, &self.field) {
            Some(field_value) => self.matches_value(field_value),
            None => false,
        }
    }

    /// Evaluates this clause against an already-resolved field value.
    pub fn matches_value(&self, field_value: &Value) -> bool {
        match (&self.value, self.op) {
            // Equality
            (ClauseValue::Single(target), Op::Eq) => coercing_eq(field_value, target),
            (ClauseValue::Single(target), Op::Ne) => !coercing_eq(field_value, target),
            (ClauseValue::Single(target), Op::StrictEq) => exact_eq(field_value, target),
            (ClauseValue::Single(target), Op::StrictNe) => !exact_eq(field_value, target),

            // Ordering
            (ClauseValue::Single(target), Op::Gt | Op::Gte | Op::Lt | Op::Lte) => {
                self.op.eval_ordering(coercing_cmp(field_value, target))
            }

            // Sets
            (ClauseValue::Set(candidates), Op::In) => {
                candidates.iter().any(|c| coercing_eq(field_value, c))
            }
            (ClauseValue::Set(candidates), Op::NotIn) => {
                !candidates.iter().any(|c| coercing_eq(field_value, c))
            }

            // Ranges
            (ClauseValue::Range(min, max), Op::Between) => in_range(field_value, min, max),
            (ClauseValue::Range(min, max), Op::NotBetween) => !in_range(field_value, min, max),

            // Patterns
            (ClauseValue::Pattern(pattern), Op::Like | Op::ILike) => {
                pattern_text(field_value).is_some_and(|text| pattern.is_match(&text))
            }
            (ClauseValue::Pattern(pattern), Op::NotLike | Op::NotILike) => {
                pattern_text(field_value).is_some_and(|text| !pattern.is_match(&text))
            }

            (ClauseValue::Malformed, op) => op == Op::NotBetween,

            // Value shape doesn't fit the operator
            _ => false,
        }
    }
}

fn in_range(value: &Value, min: &Value, max: &Value) -> bool {
    Op::Gte.eval_ordering(coercing_cmp(value, min))
        && Op::Lte.eval_ordering(coercing_cmp(value, max))
}

/// Text a `LIKE` pattern is matched against.
fn pattern_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s)),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Bool(b) => Some(Cow::Owned(b.to_string())),
        _ => None,
    }
}

/// Owned comparison operand stored in a clause.
#[derive(Debug, Clone)]
pub enum ClauseValue {
    /// A single value (equality and ordering operators).
    Single(Value),
    /// Candidate set (for `In` / `NotIn`).
    Set(Vec<Value>),
    /// Inclusive `[min, max]` bounds (for `Between` / `NotBetween`).
    Range(Value, Value),
    /// Compiled `LIKE` pattern.
    Pattern(LikePattern),
    /// The operand could not be shaped for the operator.
    Malformed,
}

impl ClauseValue {
    fn range(min: Value, max: Option<Value>) -> Self {
        match (min, max) {
            (Value::Array(pair), _) if pair.len() == 2 => {
                let mut bounds = pair.into_iter();
                match (bounds.next(), bounds.next()) {
                    (Some(min), Some(max)) => ClauseValue::Range(min, max),
                    _ => ClauseValue::Malformed,
                }
            }
            (min, Some(max)) => ClauseValue::Range(min, max),
            (min, None) => {
                tracing::debug!(
                    min = %min,
                    "range bounds need a [min, max] pair or an explicit max"
                );
                ClauseValue::Malformed
            }
        }
    }

    fn pattern(value: &Value, case_insensitive: bool) -> Self {
        let Some(text) = pattern_text(value) else {
            tracing::debug!(pattern = %value, "LIKE pattern must be a scalar");
            return ClauseValue::Malformed;
        };
        let compiled = if case_insensitive {
            LikePattern::case_insensitive(&text)
        } else {
            LikePattern::new(&text)
        };
        match compiled {
            Ok(pattern) => ClauseValue::Pattern(pattern),
            Err(err) => {
                tracing::debug!(pattern = %text, error = %err, "LIKE pattern failed to compile");
                ClauseValue::Malformed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(v: Value) -> Value {
        json!({ "v": v })
    }

    #[test]
    fn coercing_eq_and_ne() {
        let eq = Clause::new("v", Op::Eq, 1);
        assert!(eq.matches(&row(json!(1))));
        assert!(eq.matches(&row(json!("1"))));
        assert!(!eq.matches(&row(json!(2))));

        let ne = Clause::new("v", Op::Ne, 1);
        assert!(!ne.matches(&row(json!("1"))));
        assert!(ne.matches(&row(json!(2))));
    }

    #[test]
    fn strict_eq_and_ne() {
        let eq = Clause::new("v", Op::StrictEq, 1);
        assert!(eq.matches(&row(json!(1))));
        assert!(eq.matches(&row(json!(1.0))));
        assert!(!eq.matches(&row(json!("1"))));

        let ne = Clause::new("v", Op::StrictNe, 1);
        assert!(ne.matches(&row(json!("1"))));
        assert!(!ne.matches(&row(json!(1))));
    }

    #[test]
    fn ordering_ops() {
        let gt = Clause::new("v", Op::Gt, 10);
        assert!(gt.matches(&row(json!(11))));
        assert!(!gt.matches(&row(json!(10))));
        assert!(gt.matches(&row(json!("11"))));
        assert!(!gt.matches(&row(json!("eleven"))));

        let lte = Clause::new("v", Op::Lte, "m");
        assert!(lte.matches(&row(json!("apple"))));
        assert!(lte.matches(&row(json!("m"))));
        assert!(!lte.matches(&row(json!("zebra"))));
    }

    #[test]
    fn set_ops() {
        let is_in = Clause::new("v", Op::In, json!([1, "3"]));
        assert!(is_in.matches(&row(json!(1))));
        assert!(is_in.matches(&row(json!(3))));
        assert!(!is_in.matches(&row(json!(2))));

        // A scalar is a set of one
        let single = Clause::new("v", Op::In, "a");
        assert!(single.matches(&row(json!("a"))));

        let not_in = Clause::new("v", Op::NotIn, json!([1, 2]));
        assert!(not_in.matches(&row(json!(3))));
        assert!(!not_in.matches(&row(json!(2))));
    }

    #[test]
    fn range_ops() {
        let between = Clause::new("v", Op::Between, json!([2, 4]));
        assert!(between.matches(&row(json!(2))));
        assert!(between.matches(&row(json!(3.5))));
        assert!(between.matches(&row(json!(4))));
        assert!(!between.matches(&row(json!(5))));

        let explicit = Clause::between("v", 2, Some(json!(4)));
        assert!(explicit.matches(&row(json!(3))));

        let not_between = Clause::not_between("v", json!([2, 4]), None);
        assert!(not_between.matches(&row(json!(1))));
        assert!(!not_between.matches(&row(json!(3))));
    }

    #[test]
    fn malformed_range() {
        let between = Clause::between("v", 2, None);
        assert!(matches!(between.value, ClauseValue::Malformed));
        assert!(!between.matches(&row(json!(2))));

        let not_between = Clause::not_between("v", 2, None);
        assert!(not_between.matches(&row(json!(2))));
        assert!(not_between.matches(&row(json!("anything"))));
        // Still requires the field
        assert!(!not_between.matches(&json!({"other": 1})));
    }

    #[test]
    fn pattern_ops() {
        let like = Clause::new("v", Op::Like, "Ada%");
        assert!(like.matches(&row(json!("Ada Lovelace"))));
        assert!(!like.matches(&row(json!("ada lovelace"))));

        let ilike = Clause::new("v", Op::ILike, "ada%");
        assert!(ilike.matches(&row(json!("ADA LOVELACE"))));

        let not_like = Clause::new("v", Op::NotLike, "%x%");
        assert!(not_like.matches(&row(json!("abc"))));
        assert!(!not_like.matches(&row(json!("xyz"))));
        assert!(!not_like.matches(&row(json!(null))));

        let not_ilike = Clause::new("v", Op::NotILike, "%X%");
        assert!(!not_ilike.matches(&row(json!("xyz"))));
    }

    #[test]
    fn patterns_match_number_text() {
        let like = Clause::new("v", Op::Like, "20%");
        assert!(like.matches(&row(json!(2024))));
        assert!(!like.matches(&row(json!(1999))));

        let numeric_pattern = Clause::new("v", Op::Like, 42);
        assert!(numeric_pattern.matches(&row(json!("42"))));
    }

    #[test]
    fn non_scalar_pattern_matches_nothing() {
        let like = Clause::new("v", Op::Like, json!(["a"]));
        assert!(matches!(like.value, ClauseValue::Malformed));
        assert!(!like.matches(&row(json!("a"))));

        let not_like = Clause::new("v", Op::NotLike, Value::Null);
        assert!(!not_like.matches(&row(json!("a"))));
    }

    #[test]
    fn missing_fields_and_scalars_never_match() {
        let ne = Clause::new("v", Op::Ne, 1);
        assert!(!ne.matches(&json!({"other": 2})));
        assert!(!ne.matches(&json!(2)));
        assert!(!ne.matches(&json!([2])));

        let not_in = Clause::new("v", Op::NotIn, json!([1]));
        assert!(!not_in.matches(&json!({})));
    }

    #[test]
    fn nested_paths() {
        let clause = Clause::new("address.city", Op::Eq, "Paris");
        assert!(clause.matches(&json!({"address": {"city": "Paris"}})));
        assert!(!clause.matches(&json!({"address": "Paris"})));
    }

    #[test]
    fn mismatched_shape_never_matches() {
        let clause = Clause {
            field: "v".to_string(),
            op: Op::In,
            value: ClauseValue::Single(json!(1)),
        };
        assert!(!clause.matches(&row(json!(1))));
    }
}
