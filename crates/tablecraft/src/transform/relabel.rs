//! Relabeling of categorical values by positional correspondence.

use std::collections::HashMap;

use indexmap::IndexMap;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;
use crate::error::Result;
use crate::profile::unique_values;

/// Relabel configuration for one column.
///
/// `unique_values` is a snapshot taken when the mapping was set up; the
/// i-th entry of the comma-separated `new_labels` replaces the i-th unique
/// value. Cells holding values that were not in the snapshot pass through
/// untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelabelMapping {
    /// The column's distinct raw values at capture time.
    pub unique_values: Vec<String>,
    /// Comma-separated replacement labels, one per unique value.
    pub new_labels: String,
    /// Whether the column contained blank cells at capture time.
    #[serde(default)]
    pub has_empty_cells: bool,
}

impl RelabelMapping {
    /// Snapshot a column's unique values, with labels left blank.
    pub fn capture(dataset: &Dataset, column: &str) -> Result<Self> {
        let unique = unique_values(dataset, column)?;
        let has_empty_cells = unique.iter().any(|v| v.trim().is_empty());
        Ok(Self {
            unique_values: unique,
            new_labels: String::new(),
            has_empty_cells,
        })
    }

    /// The split-and-trimmed replacement labels.
    pub fn labels(&self) -> Vec<String> {
        self.new_labels
            .split(',')
            .map(|l| l.trim().to_string())
            .collect()
    }

    /// Whether the mapping can be applied: non-blank labels, one per
    /// unique value.
    pub fn is_applicable(&self) -> bool {
        !self.new_labels.trim().is_empty() && self.labels().len() == self.unique_values.len()
    }
}

/// Apply relabel mappings for several columns in one commit.
///
/// Mappings were captured against the same snapshot, so columns do not
/// affect each other within the batch. A column whose label count does not
/// match its unique-value count is skipped entirely; the other columns
/// still commit. An unknown column name aborts the whole command.
pub fn relabel(dataset: &Dataset, mappings: &IndexMap<String, RelabelMapping>) -> Result<Dataset> {
    // Resolve every column up front so a bad reference changes nothing.
    let columns: Vec<String> = mappings.keys().cloned().collect();
    let indices = dataset.column_indices(&columns)?;

    let mut rows = dataset.rows.clone();
    for (index, (column, mapping)) in indices.iter().zip(mappings) {
        if !mapping.is_applicable() {
            warn!(
                "skipping relabel of '{}': expected {} labels, got {}",
                column,
                mapping.unique_values.len(),
                mapping.labels().len()
            );
            continue;
        }
        let lookup: HashMap<&str, String> = mapping
            .unique_values
            .iter()
            .map(|v| v.as_str())
            .zip(mapping.labels())
            .collect();
        for row in &mut rows {
            if let Some(label) = lookup.get(row[*index].as_str()) {
                row[*index] = label.clone();
            }
        }
    }

    Ok(Dataset {
        columns: dataset.columns.clone(),
        rows,
    })
}
