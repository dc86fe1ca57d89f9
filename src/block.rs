// SPDX-License-Identifier: MIT
//! In-memory model of a binnf data block.
//!
//! A [`Block`] is built once by a producer, handed read-only to the writer,
//! and reconstructed fresh by the reader on every parse. Shape invariants
//! are enforced at construction so a `Block` in hand is always writable.

use crate::error::{BinnfError, Result};
use crate::format::{ColumnType, Value};

/// Name and type of a single matrix column. Order within a block is
/// significant: it is the column order of the matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    name: String,
    ty: ColumnType,
}

impl ColumnSpec {
    pub fn new(name: impl Into<String>, ty: ColumnType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn column_type(&self) -> ColumnType {
        self.ty
    }
}

/// A named, typed, matrix-shaped data block.
///
/// Invariants (checked by [`Block::new`]):
/// - every row has exactly `columns.len()` cells;
/// - every cell's value type matches its column's declared type;
/// - a block with no columns has no rows (zero-column rows occupy no
///   payload bytes on the wire, so their count cannot round-trip safely).
///
/// All cells are 4 bytes wide regardless of logical type, so rows may mix
/// int32 and float32 columns side by side.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    name: String,
    columns: Vec<ColumnSpec>,
    rows: Vec<Vec<Value>>,
}

impl Block {
    /// Builds a block, validating the matrix shape against the column specs.
    pub fn new(
        name: impl Into<String>,
        columns: Vec<ColumnSpec>,
        rows: Vec<Vec<Value>>,
    ) -> Result<Self> {
        if columns.is_empty() && !rows.is_empty() {
            return Err(BinnfError::RowsWithoutColumns {
                rows: rows.len() as u64,
            });
        }
        for (row_index, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(BinnfError::ColumnCountMismatch {
                    expected: columns.len(),
                    actual: row.len(),
                });
            }
            for (cell, column) in row.iter().zip(&columns) {
                if cell.column_type() != column.column_type() {
                    return Err(BinnfError::CellTypeMismatch {
                        row: row_index,
                        column: column.name().to_string(),
                        expected: column.column_type(),
                    });
                }
            }
        }

        Ok(Self {
            name: name.into(),
            columns,
            rows,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    /// Row-major matrix data.
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Index of the column with the given name, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name() == name)
    }

    /// Iterates over one column's cells, top to bottom.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = Value> + '_ {
        assert!(index < self.columns.len(), "column index out of bounds");
        self.rows.iter().map(move |row| row[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spike_columns() -> Vec<ColumnSpec> {
        vec![
            ColumnSpec::new("id", ColumnType::Int32),
            ColumnSpec::new("t", ColumnType::Float32),
        ]
    }

    #[test]
    fn test_block_new_valid() {
        let block = Block::new(
            "spikes",
            spike_columns(),
            vec![
                vec![Value::Int32(0), Value::Float32(0.1)],
                vec![Value::Int32(1), Value::Float32(0.2)],
            ],
        )
        .unwrap();

        assert_eq!(block.name(), "spikes");
        assert_eq!(block.row_count(), 2);
        assert_eq!(block.column_count(), 2);
    }

    #[test]
    fn test_block_new_empty_matrix() {
        let block = Block::new("empty", spike_columns(), vec![]).unwrap();
        assert_eq!(block.row_count(), 0);
        assert_eq!(block.column_count(), 2);
    }

    #[test]
    fn test_block_new_ragged_row() {
        let err = Block::new(
            "spikes",
            spike_columns(),
            vec![vec![Value::Int32(0)]],
        )
        .unwrap_err();

        assert!(matches!(
            err,
            BinnfError::ColumnCountMismatch {
                expected: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn test_block_new_mistyped_cell() {
        let err = Block::new(
            "spikes",
            spike_columns(),
            vec![vec![Value::Float32(0.0), Value::Float32(0.1)]],
        )
        .unwrap_err();

        match err {
            BinnfError::CellTypeMismatch { row, column, expected } => {
                assert_eq!(row, 0);
                assert_eq!(column, "id");
                assert_eq!(expected, ColumnType::Int32);
            }
            other => panic!("expected CellTypeMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_rows_without_columns_rejected() {
        let err = Block::new("ghost", vec![], vec![vec![], vec![]]).unwrap_err();
        assert!(matches!(err, BinnfError::RowsWithoutColumns { rows: 2 }));

        // The fully empty shape remains valid.
        assert!(Block::new("nothing", vec![], vec![]).is_ok());
    }

    #[test]
    fn test_column_lookup() {
        let block = Block::new(
            "spikes",
            spike_columns(),
            vec![
                vec![Value::Int32(3), Value::Float32(0.1)],
                vec![Value::Int32(4), Value::Float32(0.2)],
            ],
        )
        .unwrap();

        assert_eq!(block.column_index("t"), Some(1));
        assert_eq!(block.column_index("missing"), None);

        let ids: Vec<_> = block.column_values(0).collect();
        assert_eq!(ids, vec![Value::Int32(3), Value::Int32(4)]);
    }
}
