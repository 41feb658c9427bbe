//! Read-only column queries: semantic classification and value profiling.
//!
//! Two profiling modes exist on purpose and must not be conflated:
//! per-column stats are keyed by the *raw* cell text (they describe what is
//! actually in the file), while the multi-column union used by the row
//! filter is keyed by [`NormalizedValue`] (it feeds a removal set matched
//! against normalized cells).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;
use crate::error::Result;
use crate::value::NormalizedValue;

/// Columns with fewer distinct raw values than this are discrete.
pub const DISCRETE_THRESHOLD: usize = 10;

/// Semantic kind of a column, derived from its value distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// Every row holds a distinct value.
    Index,
    /// A small set of distinct values.
    Discrete,
    /// Everything else.
    Continuous,
}

/// Per-column profile: kind plus raw value frequencies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnStats {
    /// Column name.
    pub name: String,
    /// Derived semantic kind.
    pub kind: ColumnKind,
    /// Raw value → occurrence count, in first-appearance order.
    pub value_counts: IndexMap<String, usize>,
}

/// Classify a column from its raw value distribution.
///
/// Distinct count equal to the row count means `Index` (this includes the
/// degenerate empty dataset, where both are zero); below
/// [`DISCRETE_THRESHOLD`] means `Discrete`; otherwise `Continuous`.
pub fn classify(dataset: &Dataset, column: &str) -> Result<ColumnKind> {
    let index = dataset.column_index(column)?;
    Ok(classify_at(dataset, index))
}

/// Classify a column by position. The position must be in range.
pub fn classify_at(dataset: &Dataset, index: usize) -> ColumnKind {
    let mut distinct: IndexMap<&str, ()> = IndexMap::new();
    for value in dataset.column_values(index) {
        distinct.entry(value).or_insert(());
    }
    if distinct.len() == dataset.row_count() {
        ColumnKind::Index
    } else if distinct.len() < DISCRETE_THRESHOLD {
        ColumnKind::Discrete
    } else {
        ColumnKind::Continuous
    }
}

/// Profile a single column: kind plus raw-keyed frequency counts.
pub fn column_stats(dataset: &Dataset, column: &str) -> Result<ColumnStats> {
    let index = dataset.column_index(column)?;
    let mut value_counts: IndexMap<String, usize> = IndexMap::new();
    for value in dataset.column_values(index) {
        *value_counts.entry(value.to_string()).or_insert(0) += 1;
    }

    let kind = if value_counts.len() == dataset.row_count() {
        ColumnKind::Index
    } else if value_counts.len() < DISCRETE_THRESHOLD {
        ColumnKind::Discrete
    } else {
        ColumnKind::Continuous
    };

    Ok(ColumnStats {
        name: column.to_string(),
        kind,
        value_counts,
    })
}

/// Count the union of normalized values across several columns.
///
/// This is the profiling mode behind the row-filter workflow: the keys are
/// candidates for a removal set, so they use normalized identity (a `"3"`
/// cell and a `"3.0"` cell contribute to one entry).
pub fn normalized_value_counts(
    dataset: &Dataset,
    columns: &[String],
) -> Result<IndexMap<NormalizedValue, usize>> {
    let indices = dataset.column_indices(columns)?;
    let mut counts: IndexMap<NormalizedValue, usize> = IndexMap::new();
    for row in &dataset.rows {
        for &index in &indices {
            let normalized = NormalizedValue::from_raw(&row[index]);
            *counts.entry(normalized).or_insert(0) += 1;
        }
    }
    Ok(counts)
}

/// Distinct raw values of a column, in first-appearance order.
pub fn unique_values(dataset: &Dataset, column: &str) -> Result<Vec<String>> {
    let index = dataset.column_index(column)?;
    let mut seen: IndexMap<String, ()> = IndexMap::new();
    for value in dataset.column_values(index) {
        seen.entry(value.to_string()).or_insert(());
    }
    Ok(seen.into_keys().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(columns: &[&str], rows: &[&[&str]]) -> Dataset {
        Dataset::new(
            columns.iter().map(|s| s.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_classify_index_when_all_distinct() {
        let ds = dataset(&["id"], &[&["a"], &["b"], &["c"]]);
        assert_eq!(classify(&ds, "id").unwrap(), ColumnKind::Index);
    }

    #[test]
    fn test_classify_empty_dataset_degenerates_to_index() {
        let ds = dataset(&["id"], &[]);
        assert_eq!(classify(&ds, "id").unwrap(), ColumnKind::Index);
    }

    #[test]
    fn test_classify_discrete_below_threshold() {
        let rows: Vec<Vec<String>> = (0..20).map(|i| vec![format!("g{}", i % 3)]).collect();
        let ds = Dataset::new(vec!["group".to_string()], rows).unwrap();
        assert_eq!(classify(&ds, "group").unwrap(), ColumnKind::Discrete);
    }

    #[test]
    fn test_classify_continuous_at_threshold() {
        // 10 distinct values over 20 rows: not index, not discrete.
        let rows: Vec<Vec<String>> = (0..20).map(|i| vec![format!("v{}", i % 10)]).collect();
        let ds = Dataset::new(vec!["x".to_string()], rows).unwrap();
        assert_eq!(classify(&ds, "x").unwrap(), ColumnKind::Continuous);
    }

    #[test]
    fn test_column_stats_uses_raw_keys() {
        // Raw profiling keeps "3" and "3.0" apart; that is what the file
        // actually contains.
        let ds = dataset(&["v"], &[&["3"], &["3.0"], &["3"]]);
        let stats = column_stats(&ds, "v").unwrap();
        assert_eq!(stats.value_counts.get("3"), Some(&2));
        assert_eq!(stats.value_counts.get("3.0"), Some(&1));
    }

    #[test]
    fn test_normalized_counts_merge_numeric_spellings() {
        let ds = dataset(&["v"], &[&["3"], &["3.0"], &["x"]]);
        let counts = normalized_value_counts(&ds, &["v".to_string()]).unwrap();
        assert_eq!(counts.get(&NormalizedValue::from_raw("3")), Some(&2));
        assert_eq!(counts.get(&NormalizedValue::from_raw("x")), Some(&1));
    }

    #[test]
    fn test_normalized_counts_union_over_columns() {
        let ds = dataset(&["a", "b"], &[&["1", ""], &["", "y"]]);
        let counts =
            normalized_value_counts(&ds, &["a".to_string(), "b".to_string()]).unwrap();
        assert_eq!(counts.get(&NormalizedValue::missing()), Some(&2));
        assert_eq!(counts.get(&NormalizedValue::from_raw("y")), Some(&1));
    }

    #[test]
    fn test_unique_values_first_appearance_order() {
        let ds = dataset(&["v"], &[&["b"], &["a"], &["b"], &["c"]]);
        assert_eq!(unique_values(&ds, "v").unwrap(), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_unknown_column_is_an_error() {
        let ds = dataset(&["v"], &[]);
        assert!(column_stats(&ds, "missing").is_err());
        assert!(normalized_value_counts(&ds, &["missing".to_string()]).is_err());
    }
}
