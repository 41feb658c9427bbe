//! Binning of continuous columns into discrete bin-index columns.

use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;
use crate::error::{Result, TablecraftError};
use crate::value::parse_float_prefix;

/// Upper bound on generated bin edges. Scripts can supply arbitrary widths
/// and counts; configs past this produce a `Config` error instead of an
/// enormous edge list.
const MAX_BINS: usize = 10_000;

/// How to derive bin edges for one column.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BinSpec {
    /// Fixed-width bins starting at the column minimum.
    Size { width: f64 },
    /// `n` empirical-quantile bins.
    Count { n: usize },
    /// Explicit ascending boundary list.
    Custom { boundaries: Vec<f64> },
}

/// Replace a column's cells with their bin index under `spec`.
///
/// The column keeps its name and position; cells become the bin index as a
/// string. Values below the first edge (and cells with no numeric prefix)
/// get the underflow label `"-1"`, which callers must treat as a valid bin.
pub fn discretize(dataset: &Dataset, column: &str, spec: &BinSpec) -> Result<Dataset> {
    let index = dataset.column_index(column)?;
    let values: Vec<f64> = dataset
        .column_values(index)
        .map(parse_float_prefix)
        .collect();
    let edges = bin_edges(column, &values, spec)?;

    let rows = dataset
        .rows
        .iter()
        .zip(&values)
        .map(|(row, &v)| {
            let mut row = row.clone();
            row[index] = bin_index(&edges, v).to_string();
            row
        })
        .collect();

    Ok(Dataset {
        columns: dataset.columns.clone(),
        rows,
    })
}

/// Compute bin edges from the parsed column values.
fn bin_edges(column: &str, values: &[f64], spec: &BinSpec) -> Result<Vec<f64>> {
    match spec {
        BinSpec::Size { width } => {
            if *width <= 0.0 || !width.is_finite() {
                return Err(TablecraftError::Config(format!(
                    "bin width for '{column}' must be positive, got {width}"
                )));
            }
            let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
            let Some((min, max)) = extremes(&finite) else {
                return Ok(Vec::new());
            };
            let count = ((max - min) / width).ceil();
            if count > MAX_BINS as f64 {
                return Err(TablecraftError::Config(format!(
                    "bin width {width} for '{column}' would produce {count} bins (limit {MAX_BINS})"
                )));
            }
            let count = count as usize;
            Ok((0..=count).map(|i| min + i as f64 * width).collect())
        }
        BinSpec::Count { n } => {
            if *n == 0 {
                return Err(TablecraftError::Config(format!(
                    "bin count for '{column}' must be at least 1"
                )));
            }
            if *n > MAX_BINS {
                return Err(TablecraftError::Config(format!(
                    "bin count {n} for '{column}' exceeds the limit of {MAX_BINS}"
                )));
            }
            let mut sorted: Vec<f64> =
                values.iter().copied().filter(|v| v.is_finite()).collect();
            if sorted.is_empty() {
                return Ok(Vec::new());
            }
            sorted.sort_by(|a, b| a.total_cmp(b));
            // Quantile cut points; the final rank clamps to the last value.
            Ok((0..=*n)
                .map(|i| sorted[(i * sorted.len() / n).min(sorted.len() - 1)])
                .collect())
        }
        BinSpec::Custom { boundaries } => {
            if boundaries.windows(2).any(|w| w[0] > w[1]) {
                return Err(TablecraftError::UnsortedBoundaries {
                    column: column.to_string(),
                });
            }
            Ok(boundaries.clone())
        }
    }
}

fn extremes(values: &[f64]) -> Option<(f64, f64)> {
    let first = *values.first()?;
    Some(values.iter().fold((first, first), |(min, max), &v| {
        (min.min(v), max.max(v))
    }))
}

/// Assign `v` the smallest bin `k` with `edges[k] <= v < edges[k+1]`; the
/// last bin is unbounded above. No match (underflow or NaN) yields -1.
fn bin_index(edges: &[f64], v: f64) -> i64 {
    for (k, &edge) in edges.iter().enumerate() {
        let below_upper = edges.get(k + 1).is_none_or(|&upper| v < upper);
        if v >= edge && below_upper {
            return k as i64;
        }
    }
    -1
}
