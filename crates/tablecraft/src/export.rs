//! Delimited-text export of a dataset.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::dataset::Dataset;
use crate::error::{Result, TablecraftError};

/// Write a dataset as delimited text: header row, then data rows.
pub fn write_delimited<W: Write>(dataset: &Dataset, writer: W, delimiter: u8) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);
    writer.write_record(&dataset.columns)?;
    for row in &dataset.rows {
        writer.write_record(row)?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Write a dataset to a file, comma-delimited.
pub fn write_csv_file(dataset: &Dataset, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| TablecraftError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    write_delimited(dataset, file, b',')
}

/// Render a dataset as a CSV string.
pub fn to_csv_string(dataset: &Dataset) -> Result<String> {
    let mut buffer = Vec::new();
    write_delimited(dataset, &mut buffer, b',')?;
    String::from_utf8(buffer)
        .map_err(|e| TablecraftError::Config(format!("non-UTF-8 output: {e}")))
}
