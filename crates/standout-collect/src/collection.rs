//! The [`Collection`] container.
//!
//! A `Collection` owns an ordered `Vec` of [`serde_json::Value`] elements and
//! offers a chainable vocabulary over it. Every method states which of two
//! contracts it follows:
//!
//! - **Mutators** take `&mut self`, rewrite the sequence in place and return
//!   `&mut Self` so calls chain: `push`, `map`, `filter`, the whole `where*`
//!   family, `sort`, `sort_by`, `sort_by_desc`, `reverse`, `set`.
//! - **Derivations** take `&self` and return a new, independent collection:
//!   `take`, `chunk`, `pluck`, `unique`, `unique_by`, `diff`, `merge`,
//!   `group_by`.
//!
//! Lookups never fail. A missing field, an out-of-range index or an empty
//! collection yields `None` (or `Value::Null` where the absent value has to
//! live inside a sequence, as with [`Collection::pluck`]).
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use standout_collect::collect;
//!
//! let mut people = collect(vec![
//!     json!({"name": "Ada", "age": 36, "team": "core"}),
//!     json!({"name": "Grace", "age": 45, "team": "infra"}),
//!     json!({"name": "Linus", "age": 21, "team": "core"}),
//! ]);
//!
//! let names = people
//!     .where_op("age", ">", 30)
//!     .sort_by_desc("age")
//!     .pluck("name");
//!
//! assert_eq!(names.all(), &[json!("Grace"), json!("Ada")]);
//! assert_eq!(people.count(), 2);
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::clause::Clause;
use crate::error::{CollectError, Result};
use crate::op::Op;
use crate::path::{resolve, resolve_field};
use crate::value::{bucket_key, coercing_eq, exact_eq, group_key, numeric, sort_cmp, type_name};

static NULL: Value = Value::Null;

/// Groups produced by [`Collection::group_by`], keyed by the stringified
/// field value in order of first occurrence.
pub type Groups = IndexMap<String, Collection>;

/// An ordered, index-addressable collection of JSON values.
///
/// Serializes transparently as a JSON array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection {
    items: Vec<Value>,
}

impl Collection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Collection::default()
    }

    /// Decodes a collection from a JSON array.
    ///
    /// Malformed JSON is a [`CollectError::Serialization`]; any JSON document
    /// other than an array is [`CollectError::NotAnArray`].
    pub fn from_json(json: &str) -> Result<Self> {
        match serde_json::from_str::<Value>(json)? {
            Value::Array(items) => Ok(Collection { items }),
            other => Err(CollectError::NotAnArray {
                found: type_name(&other),
            }),
        }
    }

    /// Builds a collection from any serializable items.
    ///
    /// Fails without producing a collection if any item cannot be
    /// represented as JSON (for instance a map with non-string keys).
    pub fn from_serialize<I, T>(items: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Serialize,
    {
        let items = items
            .into_iter()
            .map(serde_json::to_value)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Collection { items })
    }

    // ========================================================================
    // Access and conversion
    // ========================================================================

    /// Returns the live sequence.
    pub fn all(&self) -> &[Value] {
        &self.items
    }

    /// Returns the live sequence for in-place editing.
    pub fn all_mut(&mut self) -> &mut Vec<Value> {
        &mut self.items
    }

    /// Returns `(index, element)` pairs in order.
    pub fn entries(&self) -> Vec<(usize, &Value)> {
        self.items.iter().enumerate().collect()
    }

    /// Returns an independent copy of the sequence.
    pub fn to_array(&self) -> Vec<Value> {
        self.items.clone()
    }

    /// Encodes the sequence as a compact JSON array.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.items)?)
    }

    /// Encodes the sequence as an indented JSON array.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.items)?)
    }

    /// Returns the element at `index`, or `None` if out of range.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    /// Returns a mutable reference to the element at `index`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Value> {
        self.items.get_mut(index)
    }

    /// Writes the element at `index`.
    ///
    /// Writing at `index == count()` appends. Anything further out is an
    /// error and leaves the sequence untouched, so sequences never become
    /// sparse.
    pub fn set(&mut self, index: usize, value: impl Into<Value>) -> Result<&mut Self> {
        let len = self.items.len();
        match index.cmp(&len) {
            std::cmp::Ordering::Less => self.items[index] = value.into(),
            std::cmp::Ordering::Equal => self.items.push(value.into()),
            std::cmp::Ordering::Greater => {
                return Err(CollectError::IndexOutOfBounds { index, len });
            }
        }
        Ok(self)
    }

    /// Iterates over the elements in their current order.
    ///
    /// Each call starts over at index 0. The borrow held by the iterator
    /// rules out mutating the collection mid-iteration.
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }

    // ========================================================================
    // Mutators
    // ========================================================================

    /// Appends one element.
    pub fn push(&mut self, item: impl Into<Value>) -> &mut Self {
        self.items.push(item.into());
        self
    }

    /// Replaces every element with `transform(element)`.
    pub fn map<F>(&mut self, transform: F) -> &mut Self
    where
        F: FnMut(Value) -> Value,
    {
        self.items = std::mem::take(&mut self.items)
            .into_iter()
            .map(transform)
            .collect();
        self
    }

    /// Keeps only the elements for which `predicate` returns `true`,
    /// preserving their relative order.
    pub fn filter<F>(&mut self, mut predicate: F) -> &mut Self
    where
        F: FnMut(&Value) -> bool,
    {
        let before = self.items.len();
        self.items.retain(|item| predicate(item));
        tracing::trace!(before, after = self.items.len(), "filtered collection");
        self
    }

    /// Folds the elements left to right and returns the accumulator.
    ///
    /// The collection itself is left unchanged.
    pub fn reduce<A, F>(&self, accumulate: F, initial: A) -> A
    where
        F: FnMut(A, &Value) -> A,
    {
        self.items.iter().fold(initial, accumulate)
    }

    /// Sorts the elements themselves in ascending order.
    ///
    /// Numbers and numeric strings sort first, by numeric value, then other
    /// strings, booleans, arrays, records and finally nulls. The sort is
    /// stable.
    pub fn sort(&mut self) -> &mut Self {
        self.items.sort_by(|a, b| sort_cmp(Some(a), Some(b)));
        self
    }

    /// Sorts ascending by the value at `key`.
    ///
    /// Uses the same cross-type order as [`Collection::sort`]; elements
    /// missing the key sort last. The sort is stable, so elements with equal
    /// keys keep their relative order.
    pub fn sort_by(&mut self, key: &str) -> &mut Self {
        self.items.sort_by(|a, b| sort_cmp(resolve(a, key), resolve(b, key)));
        self
    }

    /// Sorts ascending by `key`, then reverses.
    pub fn sort_by_desc(&mut self, key: &str) -> &mut Self {
        self.sort_by(key).reverse()
    }

    /// Reverses the order of the elements.
    pub fn reverse(&mut self) -> &mut Self {
        self.items.reverse();
        self
    }

    // ========================================================================
    // Where family
    // ========================================================================

    /// Keeps the elements matching `clause`.
    pub fn where_clause(&mut self, clause: &Clause) -> &mut Self {
        self.filter(|item| clause.matches(item))
    }

    /// Keeps records whose `field` is coercing-equal to `value`.
    pub fn where_eq(&mut self, field: &str, value: impl Into<Value>) -> &mut Self {
        self.where_cmp(field, Op::Eq, value)
    }

    /// Keeps records where `field <op> value` holds.
    ///
    /// `op` is an operator symbol such as `">="` or `"not like"` (see
    /// [`Op::from_symbol`]). An unknown symbol matches nothing.
    pub fn where_op(&mut self, field: &str, op: &str, value: impl Into<Value>) -> &mut Self {
        match parse_op(field, op) {
            Some(op) => self.where_cmp(field, op, value),
            None => self.filter(|_| false),
        }
    }

    /// Keeps records where `field <op> value` holds.
    pub fn where_cmp(&mut self, field: &str, op: Op, value: impl Into<Value>) -> &mut Self {
        let clause = Clause::new(field, op, value);
        self.where_clause(&clause)
    }

    /// Keeps records whose `field` is not coercing-equal to `value`.
    pub fn where_not(&mut self, field: &str, value: impl Into<Value>) -> &mut Self {
        self.where_cmp(field, Op::Ne, value)
    }

    /// Keeps records whose `field` equals one of `values`.
    pub fn where_in<I, V>(&mut self, field: &str, values: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.where_cmp(field, Op::In, to_array_value(values))
    }

    /// Keeps records whose `field` equals none of `values`.
    pub fn where_not_in<I, V>(&mut self, field: &str, values: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.where_cmp(field, Op::NotIn, to_array_value(values))
    }

    /// Keeps records whose `field` lies in an inclusive range.
    ///
    /// Pass either a `[min, max]` array as `min`, or a scalar `min` with an
    /// explicit `max`. A scalar `min` without `max` matches nothing.
    pub fn where_between(
        &mut self,
        field: &str,
        min: impl Into<Value>,
        max: Option<Value>,
    ) -> &mut Self {
        let clause = Clause::between(field, min, max);
        self.where_clause(&clause)
    }

    /// Keeps records whose `field` lies outside an inclusive range.
    ///
    /// A scalar `min` without `max` keeps every record that has the field.
    pub fn where_not_between(
        &mut self,
        field: &str,
        min: impl Into<Value>,
        max: Option<Value>,
    ) -> &mut Self {
        let clause = Clause::not_between(field, min, max);
        self.where_clause(&clause)
    }

    /// Keeps records where `field` is missing or `null`.
    pub fn where_null(&mut self, field: &str) -> &mut Self {
        self.filter(|item| item.is_object() && resolve(item, field).map_or(true, Value::is_null))
    }

    /// Keeps records where `field` is present and not `null`.
    pub fn where_not_null(&mut self, field: &str) -> &mut Self {
        self.filter(|item| resolve_field(item, field).is_some_and(|value| !value.is_null()))
    }

    // ========================================================================
    // Lookup and slicing
    // ========================================================================

    /// Returns the first element.
    pub fn first(&self) -> Option<&Value> {
        self.items.first()
    }

    /// Returns the last element.
    pub fn last(&self) -> Option<&Value> {
        self.items.last()
    }

    /// Returns the first record where `field <op> value` holds.
    ///
    /// Read-only counterpart of [`Collection::where_op`].
    pub fn first_where(&self, field: &str, op: &str, value: impl Into<Value>) -> Option<&Value> {
        let clause = Clause::new(field, parse_op(field, op)?, value);
        self.items.iter().find(|item| clause.matches(item))
    }

    /// Returns the first record whose `field` is coercing-equal to `value`.
    pub fn first_where_eq(&self, field: &str, value: impl Into<Value>) -> Option<&Value> {
        let clause = Clause::new(field, Op::Eq, value);
        self.items.iter().find(|item| clause.matches(item))
    }

    /// Returns a new collection holding the first `n` elements.
    pub fn take(&self, n: usize) -> Collection {
        self.items.iter().take(n).cloned().collect()
    }

    /// Returns a new collection of the values found at `key_path`.
    ///
    /// Elements where the path does not resolve contribute `null`.
    pub fn pluck(&self, key_path: &str) -> Collection {
        self.items
            .iter()
            .map(|item| resolve(item, key_path).cloned().unwrap_or(Value::Null))
            .collect()
    }

    /// Splits the sequence into arrays of `size` elements.
    ///
    /// The last chunk may be shorter. A `size` of zero is rejected before
    /// anything is touched.
    pub fn chunk(&self, size: usize) -> Result<Collection> {
        if size == 0 {
            return Err(CollectError::invalid_argument(
                "size",
                "chunk size must be greater than zero",
            ));
        }
        Ok(self
            .items
            .chunks(size)
            .map(|chunk| Value::Array(chunk.to_vec()))
            .collect())
    }

    // ========================================================================
    // Aggregation
    // ========================================================================

    /// Returns the number of elements.
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Sums the numeric values found at `field`.
    ///
    /// Numbers, numeric strings and booleans count; anything else is
    /// skipped. An empty collection sums to `0`.
    pub fn sum(&self, field: &str) -> f64 {
        self.numbers(field).sum()
    }

    /// Averages `field` over every element: `sum(field) / count()`.
    pub fn avg(&self, field: &str) -> Result<f64> {
        if self.items.is_empty() {
            return Err(CollectError::empty("avg"));
        }
        Ok(self.sum(field) / self.items.len() as f64)
    }

    /// Returns the smallest numeric value found at `field`.
    pub fn min(&self, field: &str) -> Result<f64> {
        self.numbers(field)
            .reduce(f64::min)
            .ok_or_else(|| CollectError::empty("min"))
    }

    /// Returns the largest numeric value found at `field`.
    pub fn max(&self, field: &str) -> Result<f64> {
        self.numbers(field)
            .reduce(f64::max)
            .ok_or_else(|| CollectError::empty("max"))
    }

    fn numbers<'a>(&'a self, field: &'a str) -> impl Iterator<Item = f64> + 'a {
        self.items
            .iter()
            .filter_map(move |item| resolve(item, field).and_then(numeric))
    }

    /// Groups elements by the stringified value at `field`.
    ///
    /// Groups appear in order of first occurrence and keep their elements in
    /// collection order. Elements missing the field share the `""` group.
    pub fn group_by(&self, field: &str) -> Groups {
        let mut groups = Groups::new();
        for item in &self.items {
            groups
                .entry(group_key(resolve(item, field)))
                .or_default()
                .items
                .push(item.clone());
        }
        groups
    }

    // ========================================================================
    // Set-like operations
    // ========================================================================

    /// Returns the elements with exact duplicates removed, first occurrence
    /// first.
    pub fn unique(&self) -> Collection {
        self.dedupe(|item| item)
    }

    /// Returns the elements with duplicate `key` values removed.
    ///
    /// Keys compare exactly; a missing key counts as `null`.
    pub fn unique_by(&self, key: &str) -> Collection {
        self.dedupe(|item| resolve(item, key).unwrap_or(&NULL))
    }

    fn dedupe<'a, K>(&'a self, key: K) -> Collection
    where
        K: Fn(&'a Value) -> &'a Value,
    {
        // Exactly equal keys always share a bucket
        let mut seen: IndexMap<String, Vec<&Value>> = IndexMap::new();
        let mut unique = Vec::new();
        for item in &self.items {
            let k = key(item);
            let bucket = seen.entry(bucket_key(k)).or_default();
            if !bucket.iter().any(|s| exact_eq(s, k)) {
                bucket.push(k);
                unique.push(item.clone());
            }
        }
        Collection { items: unique }
    }

    /// Returns the elements not coercing-equal to any of `others`.
    pub fn diff(&self, others: impl AsRef<[Value]>) -> Collection {
        let others = others.as_ref();
        self.items
            .iter()
            .filter(|item| !others.iter().any(|other| coercing_eq(item, other)))
            .cloned()
            .collect()
    }

    /// Returns this sequence followed by `others`, duplicates kept.
    pub fn merge(&self, others: impl AsRef<[Value]>) -> Collection {
        let mut items = self.items.clone();
        items.extend_from_slice(others.as_ref());
        Collection { items }
    }

    /// Returns `true` if any element is coercing-equal to `value`.
    pub fn contains(&self, value: impl Into<Value>) -> bool {
        let value = value.into();
        self.items.iter().any(|item| coercing_eq(item, &value))
    }

    /// Returns `true` if there are no elements.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns `true` if there is at least one element.
    pub fn is_not_empty(&self) -> bool {
        !self.items.is_empty()
    }
}

fn parse_op(field: &str, symbol: &str) -> Option<Op> {
    let op = Op::from_symbol(symbol);
    if op.is_none() {
        tracing::debug!(field, op = symbol, "unknown where operator, nothing matches");
    }
    op
}

fn to_array_value<I, V>(values: I) -> Value
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    Value::Array(values.into_iter().map(Into::into).collect())
}

impl From<Vec<Value>> for Collection {
    fn from(items: Vec<Value>) -> Self {
        Collection { items }
    }
}

impl From<Collection> for Vec<Value> {
    fn from(collection: Collection) -> Self {
        collection.items
    }
}

impl AsRef<[Value]> for Collection {
    fn as_ref(&self) -> &[Value] {
        &self.items
    }
}

impl FromIterator<Value> for Collection {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Collection {
            items: iter.into_iter().collect(),
        }
    }
}

impl Extend<Value> for Collection {
    fn extend<I: IntoIterator<Item = Value>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl IntoIterator for Collection {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
