//! CSV/TSV import with delimiter detection.
//!
//! The importer is the boundary between file decoding and the engine: it
//! guarantees every emitted row has exactly as many cells as there are
//! columns. A ragged row is a hard import rejection, never padded or
//! truncated.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use sha2::{Digest, Sha256};

use super::source::SourceMetadata;
use crate::dataset::Dataset;
use crate::error::{Result, TablecraftError};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Importer configuration.
#[derive(Debug, Clone)]
pub struct ImporterConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Whether the file has a header row.
    pub has_header: bool,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: u8,
}

impl Default for ImporterConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            has_header: true,
            max_rows: None,
            quote: b'"',
        }
    }
}

/// Imports delimited text files into datasets.
pub struct Importer {
    config: ImporterConfig,
}

impl Importer {
    /// Create a new importer with default configuration.
    pub fn new() -> Self {
        Self {
            config: ImporterConfig::default(),
        }
    }

    /// Create an importer with custom configuration.
    pub fn with_config(config: ImporterConfig) -> Self {
        Self { config }
    }

    /// Import a file, returning the dataset and its source metadata.
    pub fn import_file(&self, path: impl AsRef<Path>) -> Result<(Dataset, SourceMetadata)> {
        let path = path.as_ref();

        let mut file = File::open(path).map_err(|e| TablecraftError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut contents = Vec::new();
        file.read_to_end(&mut contents)
            .map_err(|e| TablecraftError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(&contents)?,
        };

        let dataset = self.import_bytes(&contents, delimiter)?;

        let format = match delimiter {
            b'\t' => "tsv",
            b',' => "csv",
            b';' => "csv-semicolon",
            b'|' => "psv",
            _ => "delimited",
        }
        .to_string();

        let metadata = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            contents.len() as u64,
            format,
            dataset.row_count(),
            dataset.column_count(),
        );

        Ok((dataset, metadata))
    }

    /// Import raw bytes with a known delimiter.
    pub fn import_bytes(&self, bytes: &[u8], delimiter: u8) -> Result<Dataset> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(self.config.has_header)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let columns: Vec<String> = if self.config.has_header {
            reader.headers()?.iter().map(|s| s.to_string()).collect()
        } else {
            match reader.records().next() {
                Some(Ok(record)) => (0..record.len())
                    .map(|i| format!("column_{}", i + 1))
                    .collect(),
                Some(Err(e)) => return Err(e.into()),
                None => return Err(TablecraftError::EmptyData("No data rows found".to_string())),
            }
        };

        if columns.is_empty() {
            return Err(TablecraftError::EmptyData("No columns found".to_string()));
        }

        // Re-create the reader; getting headers may have consumed records.
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(self.config.has_header)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let mut rows = Vec::new();
        for (row_idx, result) in reader.records().enumerate() {
            if let Some(max) = self.config.max_rows {
                if row_idx >= max {
                    break;
                }
            }
            let record = result?;
            rows.push(record.iter().map(|s| s.to_string()).collect());
        }

        // Dataset::new enforces the row-width invariant; a short or long
        // row rejects the whole import.
        Dataset::new(columns, rows)
    }
}

impl Default for Importer {
    fn default() -> Self {
        Self::new()
    }
}

/// Detect the delimiter by analyzing the first few lines.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let reader = BufReader::new(bytes);
    let lines: Vec<String> = reader
        .lines()
        .take(10)
        .filter_map(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(TablecraftError::EmptyData("No lines to analyze".to_string()));
    }

    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        // Consistent counts across lines beat raw frequency; tabs get a
        // slight bonus since they rarely appear inside actual data.
        let consistent = counts.iter().all(|&c| c == first_count);
        let score = if consistent {
            first_count * 1000 + (if delim == b'\t' { 100 } else { 0 })
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    Ok(best_delimiter)
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_delimiter_csv() {
        let data = b"a,b,c\n1,2,3\n4,5,6";
        assert_eq!(detect_delimiter(data).unwrap(), b',');
    }

    #[test]
    fn test_detect_delimiter_tsv() {
        let data = b"a\tb\tc\n1\t2\t3\n4\t5\t6";
        assert_eq!(detect_delimiter(data).unwrap(), b'\t');
    }

    #[test]
    fn test_import_csv() {
        let importer = Importer::new();
        let data = b"name,age,city\nAlice,30,NYC\nBob,25,LA";
        let ds = importer.import_bytes(data, b',').unwrap();

        assert_eq!(ds.columns, vec!["name", "age", "city"]);
        assert_eq!(ds.row_count(), 2);
        assert_eq!(ds.get(0, 0), Some("Alice"));
        assert_eq!(ds.get(1, 1), Some("25"));
    }

    #[test]
    fn test_import_without_header_generates_names() {
        let importer = Importer::with_config(ImporterConfig {
            has_header: false,
            ..ImporterConfig::default()
        });
        let ds = importer.import_bytes(b"1,2\n3,4", b',').unwrap();
        assert_eq!(ds.columns, vec!["column_1", "column_2"]);
        assert_eq!(ds.row_count(), 2);
    }

    #[test]
    fn test_ragged_row_rejects_import() {
        let importer = Importer::new();
        let data = b"a,b\n1,2\n3";
        assert!(matches!(
            importer.import_bytes(data, b','),
            Err(TablecraftError::MalformedRow { row: 1, .. })
        ));
    }

    #[test]
    fn test_max_rows_cap() {
        let importer = Importer::with_config(ImporterConfig {
            max_rows: Some(1),
            ..ImporterConfig::default()
        });
        let ds = importer.import_bytes(b"a\n1\n2\n3", b',').unwrap();
        assert_eq!(ds.row_count(), 1);
    }
}
