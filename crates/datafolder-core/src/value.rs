//! Runtime cell values and text coercion.
//!
//! Every cell of a loaded table is one of five variants. Query parameters
//! arrive as text, so filters and id lookups go through [`try_coerce`] to
//! obtain a value of the column's declared type. Coercion failure is an
//! explicit `None`, and the caller decides how to degrade.

use std::cmp::Ordering;

use serde::{Serialize, Serializer};

use crate::schema::ColumnType;

/// Texts that coerce to `true` for boolean columns (compared ASCII
/// case-insensitively). Anything else coerces to `false`.
pub const TRUTHY: [&str; 3] = ["true", "1", "yes"];

/// A single cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integral value (all integer storage widths widen to `i64`).
    Int(i64),
    /// Floating-point value.
    Float(f64),
    /// Text value. Non-scalar storage types are rendered to text as well.
    String(String),
}

impl Value {
    /// Returns true if this value is `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    fn type_rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Int(_) | Value::Float(_) => 2,
            Value::String(_) => 3,
        }
    }

    /// Total order used for sorting.
    ///
    /// Numbers compare numerically across `Int` and `Float` (NaN sorts after
    /// every other number). Values of different kinds order by kind:
    /// `Null < Bool < number < String`. Columns have a uniform storage type,
    /// so the cross-kind branch only decides where nulls land.
    pub fn sort_cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Float(a), Value::Float(b)) => a.total_cmp(b),
            (Value::Int(a), Value::Float(b)) => (*a as f64).total_cmp(b),
            (Value::Float(a), Value::Int(b)) => a.total_cmp(&(*b as f64)),
            (Value::String(a), Value::String(b)) => a.cmp(b),
            _ => self.type_rank().cmp(&other.type_rank()),
        }
    }

    /// Equality used by id lookup: an `Int` key also matches a `Float` cell
    /// holding the same number.
    pub fn lookup_eq(&self, key: &Value) -> bool {
        match (self, key) {
            (Value::Float(cell), Value::Int(k)) => *cell == *k as f64,
            _ => self == key,
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            // JSON has no NaN/inf.
            Value::Float(f) if !f.is_finite() => serializer.serialize_unit(),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::String(s) => serializer.serialize_str(s),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// Parse `text` as an integer, ignoring surrounding whitespace.
pub fn parse_int(text: &str) -> Option<i64> {
    text.trim().parse().ok()
}

/// Coerce request text to a value of the declared column type.
///
/// Returns `None` when `text` cannot represent the target type (only possible
/// for `integer` and `number`). Boolean coercion never fails: text outside
/// [`TRUTHY`] is `false`.
pub fn try_coerce(text: &str, target: ColumnType) -> Option<Value> {
    match target {
        ColumnType::Integer => parse_int(text).map(Value::Int),
        ColumnType::Number => text.trim().parse::<f64>().ok().map(Value::Float),
        ColumnType::Boolean => Some(Value::Bool(
            TRUTHY.iter().any(|t| t.eq_ignore_ascii_case(text)),
        )),
        ColumnType::String => Some(Value::String(text.to_string())),
    }
}
