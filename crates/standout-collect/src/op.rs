//! Comparison operators for `where` clauses.
//!
//! The [`Op`] enum is the closed set of operators understood by the `where`
//! family. String symbols such as `">="` or `"not like"` are parsed with
//! [`Op::from_symbol`]; anything unrecognised parses to `None`, which the
//! collection treats as "matches nothing".

use std::cmp::Ordering;
use std::str::FromStr;

/// Comparison operator for a `where` clause.
///
/// Operators are grouped by the comparison strategy they use:
/// - **Coercing**: `Eq`, `Ne`, `Gt`, `Gte`, `Lt`, `Lte`, `In`, `NotIn`,
///   `Between`, `NotBetween` - numeric strings compare against numbers
/// - **Exact**: `StrictEq`, `StrictNe` - same JSON type and value
/// - **Pattern**: `Like`, `ILike`, `NotLike`, `NotILike` - SQL `LIKE`
///   wildcards, `ILike` ignores case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    // Equality
    /// Coercing equality (`=`).
    Eq,
    /// Exact equality (`==`).
    StrictEq,
    /// Coercing inequality (`!=`, `<>`).
    Ne,
    /// Exact inequality (`!==`).
    StrictNe,

    // Ordering
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Gte,
    /// Less than.
    Lt,
    /// Less than or equal.
    Lte,

    // Patterns
    /// Case-sensitive SQL `LIKE`.
    Like,
    /// Case-insensitive SQL `ILIKE`.
    ILike,
    /// Negated [`Op::Like`].
    NotLike,
    /// Negated [`Op::ILike`].
    NotILike,

    // Sets and ranges
    /// Value is one of the given set.
    In,
    /// Value is none of the given set.
    NotIn,
    /// Value lies in an inclusive range.
    Between,
    /// Value lies outside an inclusive range.
    NotBetween,
}

impl Op {
    /// Parses an operator symbol.
    ///
    /// Matching ignores surrounding whitespace and ASCII case (`" LIKE "`
    /// parses as [`Op::Like`]). Two-word operators need exactly one space
    /// between the words.
    pub fn from_symbol(symbol: &str) -> Option<Op> {
        let symbol = symbol.trim().to_ascii_lowercase();
        let op = match symbol.as_str() {
            "=" => Op::Eq,
            "==" => Op::StrictEq,
            "!=" | "<>" => Op::Ne,
            "!==" => Op::StrictNe,
            ">" => Op::Gt,
            ">=" => Op::Gte,
            "<" => Op::Lt,
            "<=" => Op::Lte,
            "like" => Op::Like,
            "ilike" => Op::ILike,
            "not like" => Op::NotLike,
            "not ilike" => Op::NotILike,
            "in" => Op::In,
            "not in" => Op::NotIn,
            "between" => Op::Between,
            "not between" => Op::NotBetween,
            _ => return None,
        };
        Some(op)
    }

    /// Returns `true` if this operator compares with SQL `LIKE` patterns.
    pub fn is_pattern_op(self) -> bool {
        matches!(self, Op::Like | Op::ILike | Op::NotLike | Op::NotILike)
    }

    /// Returns `true` if this operator compares against a set of values.
    pub fn is_set_op(self) -> bool {
        matches!(self, Op::In | Op::NotIn)
    }

    /// Returns `true` if this operator compares against a range.
    pub fn is_range_op(self) -> bool {
        matches!(self, Op::Between | Op::NotBetween)
    }

    /// Evaluates an ordering-based comparison.
    ///
    /// `None` means the operands could not be ordered; no ordering operator
    /// matches in that case.
    pub fn eval_ordering(self, ordering: Option<Ordering>) -> bool {
        let Some(ordering) = ordering else {
            return false;
        };
        match self {
            Op::Gt => ordering == Ordering::Greater,
            Op::Gte => ordering != Ordering::Less,
            Op::Lt => ordering == Ordering::Less,
            Op::Lte => ordering != Ordering::Greater,
            _ => false, // Not an ordering-based operator
        }
    }

    /// Returns the canonical symbol of this operator.
    pub fn as_str(self) -> &'static str {
        match self {
            Op::Eq => "=",
            Op::StrictEq => "==",
            Op::Ne => "!=",
            Op::StrictNe => "!==",
            Op::Gt => ">",
            Op::Gte => ">=",
            Op::Lt => "<",
            Op::Lte => "<=",
            Op::Like => "like",
            Op::ILike => "ilike",
            Op::NotLike => "not like",
            Op::NotILike => "not ilike",
            Op::In => "in",
            Op::NotIn => "not in",
            Op::Between => "between",
            Op::NotBetween => "not between",
        }
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when parsing an unknown operator symbol through [`FromStr`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown operator '{0}'")]
pub struct UnknownOp(pub String);

impl FromStr for Op {
    type Err = UnknownOp;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Op::from_symbol(s).ok_or_else(|| UnknownOp(s.to_string()))
    }
}
