//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Tablecraft: transformation engine for tabular datasets
#[derive(Parser)]
#[command(name = "tablecraft")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Profile a data file: column kinds and value distributions
    Inspect {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Limit the profile to one column
        #[arg(short, long)]
        column: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Apply a JSON command script to a data file and export the result
    Apply {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Path to the command script (JSON array of commands)
        #[arg(short, long, value_name = "SCRIPT")]
        script: PathBuf,

        /// Output path (default: <file>_transformed.<ext>)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "csv")]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Csv,
    Tsv,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Tsv => "tsv",
        }
    }

    pub fn delimiter(self) -> u8 {
        match self {
            OutputFormat::Csv => b',',
            OutputFormat::Tsv => b'\t',
        }
    }
}
