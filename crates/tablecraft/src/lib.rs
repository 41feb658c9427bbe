//! Tablecraft: an interactive transformation engine for tabular string
//! datasets.
//!
//! A [`Dataset`] is an ordered list of column names plus rows of string
//! cells. On top of it the crate provides read-only queries (column
//! classification and value profiling) and matrix-mutating commands (row
//! filtering, discretization, column arithmetic, relabeling). Commands are
//! pure: each takes the current dataset and returns a new one.
//!
//! # Core Principles
//!
//! - **Functional pipeline**: commands never mutate their input; the caller
//!   swaps in the returned dataset before issuing the next command
//! - **One normalization**: every value-identity check goes through
//!   [`NormalizedValue`], so `"7"`, `"007"`, and `"7.0"` always agree
//! - **Explicit failure**: unknown column names abort a command with the
//!   dataset unchanged; malformed cells degrade per documented fallbacks
//!
//! # Example
//!
//! ```no_run
//! use tablecraft::{BinSpec, Importer};
//!
//! let (dataset, meta) = Importer::new().import_file("data.csv").unwrap();
//! let binned = tablecraft::discretize(&dataset, "age", &BinSpec::Count { n: 4 }).unwrap();
//!
//! println!("{} rows from {}", binned.row_count(), meta.file);
//! ```

pub mod dataset;
pub mod error;
pub mod export;
pub mod input;
pub mod profile;
pub mod transform;
pub mod value;

pub use dataset::Dataset;
pub use error::{Result, TablecraftError};
pub use input::{Importer, ImporterConfig, SourceMetadata};
pub use profile::{
    ColumnKind, ColumnStats, DISCRETE_THRESHOLD, classify, column_stats, normalized_value_counts,
    unique_values,
};
pub use transform::{
    BinSpec, BinaryOp, Command, CombineSpec, RelabelMapping, RowFilter, UnaryFn, UnarySpec,
    apply_all, combine_columns, discretize, load_script, map_column, parse_script, relabel,
    remove_rows,
};
pub use value::{MISSING, NormalizedValue, parse_float_prefix};
