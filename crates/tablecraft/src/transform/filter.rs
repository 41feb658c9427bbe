//! Row removal by normalized value.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;
use crate::error::Result;
use crate::value::NormalizedValue;

/// Configuration for a row-removal pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowFilter {
    /// Columns whose cells are checked against the removal set.
    pub columns: Vec<String>,
    /// Normalized values that disqualify a row.
    pub remove: Vec<NormalizedValue>,
    /// When set, the output keeps only the target columns (in the
    /// dataset's column order).
    #[serde(default)]
    pub project: bool,
}

/// Drop every row whose normalized value in *any* target column is in the
/// removal set, optionally projecting the result down to the target
/// columns.
pub fn remove_rows(dataset: &Dataset, filter: &RowFilter) -> Result<Dataset> {
    let mut indices = dataset.column_indices(&filter.columns)?;
    let removal: HashSet<&NormalizedValue> = filter.remove.iter().collect();

    let surviving: Vec<Vec<String>> = dataset
        .rows
        .iter()
        .filter(|row| {
            !indices
                .iter()
                .any(|&i| removal.contains(&NormalizedValue::from_raw(&row[i])))
        })
        .cloned()
        .collect();

    if !filter.project {
        return Ok(Dataset {
            columns: dataset.columns.clone(),
            rows: surviving,
        });
    }

    // Projection keeps the dataset's own column order.
    indices.sort_unstable();
    indices.dedup();
    let columns = indices
        .iter()
        .map(|&i| dataset.columns[i].clone())
        .collect();
    let rows = surviving
        .into_iter()
        .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
        .collect();

    Ok(Dataset { columns, rows })
}
