//! The in-memory dataset model.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TablecraftError};

/// A tabular dataset: ordered column names plus rows of string cells.
///
/// Invariant: every row has exactly `columns.len()` cells, enforced at
/// construction. Commands treat a `Dataset` as an immutable input and
/// return a fresh one; callers swap in the result before issuing the next
/// command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Column names, in display order.
    pub columns: Vec<String>,
    /// Row data as strings (row-major order).
    pub rows: Vec<Vec<String>>,
}

impl Dataset {
    /// Create a dataset, rejecting any row whose width does not match the
    /// column count.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        let expected = columns.len();
        for (idx, row) in rows.iter().enumerate() {
            if row.len() != expected {
                return Err(TablecraftError::MalformedRow {
                    row: idx,
                    expected,
                    found: row.len(),
                });
            }
        }
        Ok(Self { columns, rows })
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Resolve a column name to its position.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| TablecraftError::UnknownColumn(name.to_string()))
    }

    /// Resolve several column names, failing on the first unknown one.
    pub fn column_indices(&self, names: &[String]) -> Result<Vec<usize>> {
        names.iter().map(|n| self.column_index(n)).collect()
    }

    /// Get all values for a column by index.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .map(move |row| row.get(index).map(|s| s.as_str()).unwrap_or(""))
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row).and_then(|r| r.get(col).map(|s| s.as_str()))
    }

    /// Return a copy of the dataset with one column renamed.
    pub fn rename_column(&self, from: &str, to: &str) -> Result<Dataset> {
        let index = self.column_index(from)?;
        let mut columns = self.columns.clone();
        columns[index] = to.to_string();
        Ok(Dataset {
            columns,
            rows: self.rows.clone(),
        })
    }
}
