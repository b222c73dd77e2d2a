//! Schema inference.
//!
//! Each column's declared type is derived once, at load time, from the
//! storage type the loader decoded it as. Values are never sampled: a column
//! is `integer` because its storage is integral, not because its cells look
//! like integers. Unknown storage types fall back to `string`.

use std::fmt;

use arrow::datatypes::DataType;
use serde::{Serialize, Serializer, ser::SerializeMap};

use crate::table::Table;

/// Declared semantic type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Text, mixed, null-only or unrecognized storage.
    String,
    /// Integral numeric storage.
    Integer,
    /// Floating-point numeric storage.
    Number,
    /// Boolean storage.
    Boolean,
}

impl ColumnType {
    /// Name used in rendered schemas.
    pub fn as_str(self) -> &'static str {
        match self {
            ColumnType::String => "string",
            ColumnType::Integer => "integer",
            ColumnType::Number => "number",
            ColumnType::Boolean => "boolean",
        }
    }

    /// Classify an Arrow storage type.
    pub fn from_storage(storage: &DataType) -> Self {
        match storage {
            DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64 => ColumnType::Integer,
            DataType::Float16 | DataType::Float32 | DataType::Float64 => ColumnType::Number,
            DataType::Boolean => ColumnType::Boolean,
            DataType::Dictionary(_, value) => ColumnType::from_storage(value),
            _ => ColumnType::String,
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Column name to declared type, in column declaration order.
///
/// Serializes as a JSON object `{column: type}` preserving that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableSchema {
    columns: Vec<(String, ColumnType)>,
}

impl TableSchema {
    /// Declared type of `column`, if the table has it.
    pub fn get(&self, column: &str) -> Option<ColumnType> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, ty)| *ty)
    }

    /// True if the schema declares `column`.
    pub fn contains(&self, column: &str) -> bool {
        self.get(column).is_some()
    }

    /// Iterate `(column, type)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, ColumnType)> + '_ {
        self.columns.iter().map(|(name, ty)| (name.as_str(), *ty))
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// True if the schema has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl FromIterator<(String, ColumnType)> for TableSchema {
    fn from_iter<I: IntoIterator<Item = (String, ColumnType)>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().collect(),
        }
    }
}

impl Serialize for TableSchema {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (name, ty) in &self.columns {
            map.serialize_entry(name, ty)?;
        }
        map.end()
    }
}

/// Infer the schema of a loaded table.
pub fn infer(table: &Table) -> TableSchema {
    table
        .columns()
        .iter()
        .map(|col| (col.name.clone(), ColumnType::from_storage(&col.storage)))
        .collect()
}
