//! Immutable in-memory tables.
//!
//! A [`Table`] is built once by the loader and never mutated afterwards.
//! Rows are stored row-major as `Vec<Value>` aligned with the table's column
//! list, so the query engine can filter, sort and page by handing out
//! borrowed rows without copying cells.

mod convert;

use std::collections::HashSet;

use arrow::{array::RecordBatch, datatypes::DataType, datatypes::Schema, error::ArrowError};
use snafu::prelude::*;

use crate::value::Value;

/// Errors raised while assembling a table.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum TableError {
    /// Two columns share a name.
    #[snafu(display("Duplicate column name {column}"))]
    DuplicateColumn {
        /// The repeated column name.
        column: String,
    },

    /// A row does not have one value per column.
    #[snafu(display("Row {row} has {actual} values, expected {expected}"))]
    RowWidth {
        /// Zero-based row index.
        row: usize,
        /// Number of columns in the table.
        expected: usize,
        /// Number of values found in the row.
        actual: usize,
    },

    /// Converting an Arrow column to cell values failed.
    #[snafu(display("Arrow error while converting column {column}: {source}"))]
    Convert {
        /// Column being converted.
        column: String,
        /// Underlying Arrow error.
        source: ArrowError,
    },
}

/// Convenience alias for table construction results.
pub type TableResult<T> = Result<T, TableError>;

/// A named column and the storage type the loader decoded it as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Column name, unique within its table.
    pub name: String,
    /// Arrow type of the decoded column. Schema inference reads this, not
    /// the cell values.
    pub storage: DataType,
}

impl Column {
    /// Creates a column description.
    pub fn new(name: impl Into<String>, storage: DataType) -> Self {
        Self {
            name: name.into(),
            storage,
        }
    }
}

/// One table row; values are aligned with [`Table::columns`].
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    values: Vec<Value>,
}

impl Row {
    /// Value at column position `idx`.
    pub fn get(&self, idx: usize) -> Option<&Value> {
        self.values.get(idx)
    }

    /// All values in column order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

/// A named, ordered, immutable sequence of uniformly shaped rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    name: String,
    columns: Vec<Column>,
    rows: Vec<Row>,
}

impl Table {
    /// Builds a table, checking that column names are unique and every row
    /// has one value per column.
    pub fn new(
        name: impl Into<String>,
        columns: Vec<Column>,
        rows: Vec<Vec<Value>>,
    ) -> TableResult<Self> {
        let mut seen = HashSet::with_capacity(columns.len());
        for col in &columns {
            ensure!(
                seen.insert(col.name.as_str()),
                DuplicateColumnSnafu {
                    column: col.name.clone(),
                }
            );
        }

        let expected = columns.len();
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(row, values)| {
                ensure!(
                    values.len() == expected,
                    RowWidthSnafu {
                        row,
                        expected,
                        actual: values.len(),
                    }
                );
                Ok(Row { values })
            })
            .collect::<TableResult<Vec<_>>>()?;

        Ok(Self {
            name: name.into(),
            columns,
            rows,
        })
    }

    /// A table with no columns and no rows.
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Materializes Arrow record batches into a table.
    ///
    /// Column storage types come from `schema`; every batch must share it.
    pub fn from_record_batches(
        name: impl Into<String>,
        schema: &Schema,
        batches: &[RecordBatch],
    ) -> TableResult<Self> {
        let columns: Vec<Column> = schema
            .fields()
            .iter()
            .map(|f| Column::new(f.name().clone(), f.data_type().clone()))
            .collect();

        let total: usize = batches.iter().map(RecordBatch::num_rows).sum();
        let mut rows: Vec<Vec<Value>> = Vec::with_capacity(total);

        for batch in batches {
            let start = rows.len();
            rows.extend((0..batch.num_rows()).map(|_| Vec::with_capacity(columns.len())));

            for (col, array) in columns.iter().zip(batch.columns()) {
                let values = convert::array_values(array).context(ConvertSnafu {
                    column: col.name.clone(),
                })?;
                for (row, value) in rows[start..].iter_mut().zip(values) {
                    row.push(value);
                }
            }
        }

        Self::new(name, columns, rows)
    }

    /// Resource name (the file stem it was loaded from).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Columns in declaration order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Rows in table order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the column called `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use arrow::array::{BooleanArray, Float64Array, Int32Array, StringArray};
    use arrow::datatypes::Field;

    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn new_rejects_ragged_rows() {
        let err = Table::new(
            "t",
            vec![Column::new("a", DataType::Int64), Column::new("b", DataType::Utf8)],
            vec![vec![Value::Int(1), Value::from("x")], vec![Value::Int(2)]],
        )
        .unwrap_err();

        assert!(matches!(
            err,
            TableError::RowWidth {
                row: 1,
                expected: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn new_rejects_duplicate_columns() {
        let err = Table::new(
            "t",
            vec![Column::new("a", DataType::Int64), Column::new("a", DataType::Utf8)],
            vec![],
        )
        .unwrap_err();
        assert!(matches!(err, TableError::DuplicateColumn { .. }));
    }

    #[test]
    fn from_record_batches_concatenates_in_order() -> TestResult {
        let schema = Arc::new(Schema::new(vec![
            Field::new("id", DataType::Int32, false),
            Field::new("name", DataType::Utf8, true),
            Field::new("score", DataType::Float64, true),
            Field::new("ok", DataType::Boolean, true),
        ]));

        let b1 = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(Int32Array::from(vec![1, 2])),
                Arc::new(StringArray::from(vec![Some("a"), None])),
                Arc::new(Float64Array::from(vec![Some(0.5), Some(1.5)])),
                Arc::new(BooleanArray::from(vec![Some(true), Some(false)])),
            ],
        )?;
        let b2 = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(Int32Array::from(vec![3])),
                Arc::new(StringArray::from(vec![Some("c")])),
                Arc::new(Float64Array::from(vec![None])),
                Arc::new(BooleanArray::from(vec![None])),
            ],
        )?;

        let table = Table::from_record_batches("t", &schema, &[b1, b2])?;
        assert_eq!(table.len(), 3);
        assert_eq!(table.columns()[0].storage, DataType::Int32);
        assert_eq!(
            table.rows()[1].values(),
            &[
                Value::Int(2),
                Value::Null,
                Value::Float(1.5),
                Value::Bool(false)
            ]
        );
        assert_eq!(
            table.rows()[2].values(),
            &[Value::Int(3), Value::from("c"), Value::Null, Value::Null]
        );
        assert_eq!(table.column_index("score"), Some(2));
        assert_eq!(table.column_index("missing"), None);
        Ok(())
    }
}
