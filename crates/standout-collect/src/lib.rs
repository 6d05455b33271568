//! Collect - Fluent in-memory collections of JSON values.
//!
//! Collect wraps an ordered list of [`serde_json::Value`] elements and gives
//! it one consistent vocabulary for the ad hoc querying usually written by
//! hand with loops. It supports:
//!
//! - Filtering with a small operator language (`=`, `==`, `>=`, `like`, ...)
//! - Nested field access through dot-separated key paths (`address.city`)
//! - Aggregates: count, sum, avg, min, max
//! - Reshaping: pluck, chunk, group by, unique, diff, merge
//! - Stable sorting by key
//!
//! # Quick Start
//!
//! ```rust
//! use serde_json::json;
//! use standout_collect::collect;
//!
//! let mut orders = collect(vec![
//!     json!({"id": 1, "status": "paid", "total": 30.0, "customer": {"city": "Lisbon"}}),
//!     json!({"id": 2, "status": "open", "total": 12.5, "customer": {"city": "Porto"}}),
//!     json!({"id": 3, "status": "paid", "total": 99.0, "customer": {"city": "Lisbon"}}),
//! ]);
//!
//! let cities = orders
//!     .where_eq("status", "paid")
//!     .where_op("total", ">=", 50)
//!     .pluck("customer.city");
//!
//! assert_eq!(cities.all(), &[json!("Lisbon")]);
//! assert_eq!(orders.sum("total"), 99.0);
//! ```
//!
//! # Mutators and Derivations
//!
//! Methods that reshape the sequence in place (`push`, `map`, `filter`, the
//! `where*` family, the sorts, `reverse`) take `&mut self` and return
//! `&mut Self`, so they chain. Methods that derive something new (`take`,
//! `chunk`, `pluck`, `unique`, `diff`, `merge`, `group_by`) take `&self` and
//! return an independent collection.
//!
//! # Operators
//!
//! | Symbol | Meaning |
//! |--------|---------|
//! | `=` / `!=` (`<>`) | coercing equality (`1` equals `"1"`) |
//! | `==` / `!==` | exact equality (same JSON type and value) |
//! | `<` `<=` `>` `>=` | coercing ordering |
//! | `like` / `not like` | SQL `LIKE`, case-sensitive |
//! | `ilike` / `not ilike` | SQL `LIKE`, case-insensitive |
//! | `in` / `not in` | coercing set membership |
//! | `between` / `not between` | inclusive range |
//!
//! Unknown operators match nothing. Elements that are not records, or that
//! lack the field, never match any operator.

mod clause;
mod collection;
mod error;
mod op;
mod path;
mod pattern;
mod value;

// Re-export public API
pub use clause::{Clause, ClauseValue};
pub use collection::{Collection, Groups};
pub use error::{CollectError, Result};
pub use op::{Op, UnknownOp};
pub use path::resolve;
pub use pattern::LikePattern;
pub use value::{coercing_cmp, coercing_eq, exact_eq, sort_cmp};

use serde_json::Value;

/// Wraps a sequence of values in a [`Collection`].
///
/// ```
/// use serde_json::json;
/// use standout_collect::collect;
///
/// let c = collect([1, 2, 3]);
/// assert_eq!(c.first(), Some(&json!(1)));
/// ```
pub fn collect<I>(items: I) -> Collection
where
    I: IntoIterator,
    I::Item: Into<Value>,
{
    items.into_iter().map(Into::into).collect()
}
