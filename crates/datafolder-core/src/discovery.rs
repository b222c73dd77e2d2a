//! Read-only views rendered from the catalog and from query results.
//!
//! These types only borrow; they exist to give each response its external
//! shape when serialized:
//!
//! - [`ResourceList`]: `{"resources": [names]}`
//! - [`SchemaDocument`]: `{"type": "object", "properties": {col: {"type": T}}}`
//! - [`RowObject`]: one row as a JSON object in column order
//!
//! plus the plain-text [`help_text`].

use std::collections::BTreeMap;
use std::fmt::Write;

use serde::{Serialize, Serializer, ser::SerializeMap};

use crate::{
    catalog::Catalog,
    schema::{ColumnType, TableSchema},
    table::{Column, Row, Table},
};

/// Catalog listing.
#[derive(Debug, Serialize)]
pub struct ResourceList<'a> {
    /// Table names, ascending.
    pub resources: Vec<&'a str>,
}

/// List every table in the catalog.
pub fn resource_list(catalog: &Catalog) -> ResourceList<'_> {
    ResourceList {
        resources: catalog.names().collect(),
    }
}

#[derive(Serialize)]
struct PropertyType {
    #[serde(rename = "type")]
    ty: ColumnType,
}

/// A table schema rendered as a JSON Schema object.
#[derive(Debug, Clone, Copy)]
pub struct SchemaDocument<'a>(pub &'a TableSchema);

impl Serialize for SchemaDocument<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        struct Properties<'a>(&'a TableSchema);

        impl Serialize for Properties<'_> {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                let mut map = serializer.serialize_map(Some(self.0.len()))?;
                for (name, ty) in self.0.iter() {
                    map.serialize_entry(name, &PropertyType { ty })?;
                }
                map.end()
            }
        }

        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("type", "object")?;
        map.serialize_entry("properties", &Properties(self.0))?;
        map.end()
    }
}

/// Every table's schema document, keyed by table name.
pub fn all_schemas(catalog: &Catalog) -> BTreeMap<&str, SchemaDocument<'_>> {
    catalog
        .iter()
        .map(|res| (res.name(), SchemaDocument(res.schema())))
        .collect()
}

/// A row paired with its table's columns, serialized as a JSON object.
#[derive(Debug, Clone, Copy)]
pub struct RowObject<'a> {
    columns: &'a [Column],
    row: &'a Row,
}

impl<'a> RowObject<'a> {
    /// Pair `row` with the columns of `table`.
    pub fn new(table: &'a Table, row: &'a Row) -> Self {
        Self {
            columns: table.columns(),
            row,
        }
    }
}

impl Serialize for RowObject<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (col, value) in self.columns.iter().zip(self.row.values()) {
            map.serialize_entry(&col.name, value)?;
        }
        map.end()
    }
}

/// Render query results as row objects.
pub fn row_objects<'a>(table: &'a Table, rows: Vec<&'a Row>) -> Vec<RowObject<'a>> {
    rows.into_iter().map(|row| RowObject::new(table, row)).collect()
}

/// Human-readable description of the API for this catalog.
pub fn help_text(catalog: &Catalog) -> String {
    let mut out = String::from("datafolder api\n\nresources:\n");
    for name in catalog.names() {
        // Writing to a String cannot fail.
        let _ = writeln!(out, "  - /{name}");
    }

    out.push_str(
        "
endpoints per resource:
  GET /{resource}          list all rows
  GET /{resource}/{id}     get row by id
  GET /{resource}/_schema  get schema
  GET /{resource}/_sample  get random sample

query parameters:
  ?field=value   filter by field
  ?_limit=N      limit results (default 100)
  ?_offset=N     skip first N results
  ?_sort=field   sort ascending
  ?_sort=-field  sort descending
  ?n=N           sample size (for /_sample)

global endpoints:
  GET /          list all resources
  GET /_schema   all schemas
  GET /_help     this help text
",
    );
    out
}
