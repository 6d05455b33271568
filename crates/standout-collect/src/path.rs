//! Dot-separated key-path resolution.
//!
//! Every `field` argument taken by a [`Collection`](crate::Collection) is a
//! key path: `"name"` reads a top-level field, `"address.city"` walks into a
//! nested record and `"tags.0"` indexes into an array.

use serde_json::Value;

/// Resolves a dotted path in a JSON value.
///
/// Supports:
/// - Simple keys: `name`
/// - Nested objects: `user.profile.name`
/// - Array indices: `items.0` or `items.0.name`
///
/// Returns `None` as soon as a segment is missing or is applied to a scalar.
/// An empty path resolves to nothing.
pub fn resolve<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return None;
    }

    let mut current = value;

    for part in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(part)?,
            Value::Array(arr) => {
                let index: usize = part.parse().ok()?;
                arr.get(index)?
            }
            _ => return None,
        };
    }

    Some(current)
}

/// Resolves a path only when the element is a record.
///
/// The `where` family uses this: scalars and arrays at the top level are
/// never matched, even by a numeric path.
pub fn resolve_field<'a>(item: &'a Value, path: &str) -> Option<&'a Value> {
    match item {
        Value::Object(_) => resolve(item, path),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn top_level_field() {
        let item = json!({"name": "Ada", "age": 36});
        assert_eq!(resolve(&item, "name"), Some(&json!("Ada")));
        assert_eq!(resolve(&item, "missing"), None);
    }

    #[test]
    fn nested_fields() {
        let item = json!({"address": {"city": "London", "geo": {"lat": 51.5}}});
        assert_eq!(resolve(&item, "address.city"), Some(&json!("London")));
        assert_eq!(resolve(&item, "address.geo.lat"), Some(&json!(51.5)));
        assert_eq!(resolve(&item, "address.zip"), None);
        assert_eq!(resolve(&item, "address.city.name"), None);
    }

    #[test]
    fn array_indices() {
        let item = json!({"tags": ["a", "b"], "items": [{"id": 7}]});
        assert_eq!(resolve(&item, "tags.1"), Some(&json!("b")));
        assert_eq!(resolve(&item, "items.0.id"), Some(&json!(7)));
        assert_eq!(resolve(&item, "tags.2"), None);
        assert_eq!(resolve(&item, "tags.first"), None);
    }

    #[test]
    fn null_is_a_value() {
        let item = json!({"deleted_at": null});
        assert_eq!(resolve(&item, "deleted_at"), Some(&Value::Null));
        assert_eq!(resolve(&item, "deleted_at.day"), None);
    }

    #[test]
    fn empty_path_and_scalars() {
        assert_eq!(resolve(&json!({"": 1}), ""), None);
        assert_eq!(resolve(&json!(42), "value"), None);
    }

    #[test]
    fn field_requires_a_record() {
        assert_eq!(resolve_field(&json!(["x"]), "0"), None);
        assert_eq!(resolve_field(&json!({"0": "x"}), "0"), Some(&json!("x")));
    }
}
