//! The process-wide catalog of loaded tables.
//!
//! Built once at startup, before any request is served, and immutable
//! afterwards. Handlers share it behind an `Arc` and never lock.

use std::collections::{BTreeMap, btree_map::Entry};
use std::path::Path;

use log::{info, warn};

use crate::{
    loader::{self, LoadResult},
    schema::{self, TableSchema},
    table::Table,
};

/// A table together with the schema inferred for it at load time.
#[derive(Debug, Clone)]
pub struct Resource {
    table: Table,
    schema: TableSchema,
}

impl Resource {
    /// Wrap a table, inferring its schema once.
    pub fn new(table: Table) -> Self {
        let schema = schema::infer(&table);
        Self { table, schema }
    }

    /// Resource name.
    pub fn name(&self) -> &str {
        self.table.name()
    }

    /// The loaded table.
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// The inferred schema.
    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }
}

/// All loaded resources, keyed and iterated by name in ascending order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    resources: BTreeMap<String, Resource>,
}

impl Catalog {
    /// Build a catalog from tables. When two tables share a name the first
    /// one is kept and the later one is skipped with a warning.
    pub fn from_tables<I>(tables: I) -> Self
    where
        I: IntoIterator<Item = Table>,
    {
        let mut resources = BTreeMap::new();
        for table in tables {
            match resources.entry(table.name().to_string()) {
                Entry::Occupied(existing) => {
                    warn!(
                        "skipping duplicate table {}: a table with that name is already loaded",
                        existing.key()
                    );
                }
                Entry::Vacant(slot) => {
                    let resource = Resource::new(table);
                    info!(
                        "loaded table {}: {} rows, {} columns",
                        resource.name(),
                        resource.table().len(),
                        resource.schema().len()
                    );
                    slot.insert(resource);
                }
            }
        }
        Self { resources }
    }

    /// Scan `folder` for data files and load every table in it.
    pub fn load(folder: &Path) -> LoadResult<Self> {
        let tables = loader::load_folder(folder)?;
        if tables.is_empty() {
            warn!("no data files found in {}", folder.display());
        }
        Ok(Self::from_tables(tables))
    }

    /// Look up a resource by name.
    pub fn get(&self, name: &str) -> Option<&Resource> {
        self.resources.get(name)
    }

    /// Resource names in ascending order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.resources.keys().map(String::as_str)
    }

    /// Resources in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Resource> + '_ {
        self.resources.values()
    }

    /// Number of resources.
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// True if no tables were loaded.
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use arrow::datatypes::DataType;

    use super::*;
    use crate::{schema::ColumnType, table::Column, value::Value};

    fn one_col(name: &str, storage: DataType, value: Value) -> Table {
        Table::new(name, vec![Column::new("v", storage)], vec![vec![value]])
            .expect("valid table")
    }

    #[test]
    fn names_are_sorted_and_first_duplicate_wins() {
        let catalog = Catalog::from_tables([
            one_col("users", DataType::Int64, Value::Int(1)),
            one_col("orders", DataType::Utf8, Value::from("x")),
            one_col("users", DataType::Utf8, Value::from("dup")),
        ]);

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.names().collect::<Vec<_>>(), vec!["orders", "users"]);

        let users = catalog.get("users").expect("users loaded");
        assert_eq!(users.schema().get("v"), Some(ColumnType::Integer));
        assert!(catalog.get("missing").is_none());
    }

    #[test]
    fn empty_catalog() {
        let catalog = Catalog::from_tables(Vec::new());
        assert!(catalog.is_empty());
        assert_eq!(catalog.names().count(), 0);
    }
}
