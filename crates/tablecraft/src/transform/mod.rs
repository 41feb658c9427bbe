//! Matrix-mutating commands over a [`Dataset`].
//!
//! Every command is a pure `&Dataset × &Config -> Result<Dataset>`
//! function; nothing mutates in place. The [`Command`] enum gives a
//! serializable, sequenceable form for script-driven batches.

pub mod arithmetic;
pub mod discretize;
pub mod filter;
pub mod relabel;

use std::path::Path;

use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;
use crate::error::{Result, TablecraftError};

pub use arithmetic::{BinaryOp, CombineSpec, UnaryFn, UnarySpec, combine_columns, map_column};
pub use discretize::{BinSpec, discretize};
pub use filter::{RowFilter, remove_rows};
pub use relabel::{RelabelMapping, relabel};

/// A single transformation command, as it appears in a command script.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    /// Remove rows by normalized value, optionally projecting columns.
    RemoveRows(RowFilter),
    /// Bin one continuous column into bin indices.
    Discretize { column: String, spec: BinSpec },
    /// Apply a unary transform to one column in place.
    MapColumn(UnarySpec),
    /// Combine several columns into a new derived column.
    Combine(CombineSpec),
    /// Relabel values in one or more columns.
    Relabel { mappings: IndexMap<String, RelabelMapping> },
    /// Rename a column.
    RenameColumn { from: String, to: String },
}

impl Command {
    /// Apply this command, producing the next dataset.
    pub fn apply(&self, dataset: &Dataset) -> Result<Dataset> {
        match self {
            Command::RemoveRows(filter) => remove_rows(dataset, filter),
            Command::Discretize { column, spec } => discretize(dataset, column, spec),
            Command::MapColumn(spec) => map_column(dataset, spec),
            Command::Combine(spec) => combine_columns(dataset, spec),
            Command::Relabel { mappings } => relabel(dataset, mappings),
            Command::RenameColumn { from, to } => dataset.rename_column(from, to),
        }
    }
}

/// Parse a command script: a JSON array of commands.
pub fn parse_script(json: &str) -> Result<Vec<Command>> {
    Ok(serde_json::from_str(json)?)
}

/// Load a command script from a file.
pub fn load_script(path: impl AsRef<Path>) -> Result<Vec<Command>> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|e| TablecraftError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_script(&contents)
}

/// Apply a command sequence, each command reading the dataset as it exists
/// after its predecessors committed. A failing command aborts the batch
/// with the dataset unchanged from the caller's point of view.
pub fn apply_all(dataset: &Dataset, commands: &[Command]) -> Result<Dataset> {
    let mut current = dataset.clone();
    for (i, command) in commands.iter().enumerate() {
        debug!("applying command {} of {}", i + 1, commands.len());
        current = command.apply(&current)?;
    }
    Ok(current)
}
