//! Apply command - run a command script against a data file.

use std::fs::File;
use std::path::PathBuf;

use colored::Colorize;
use tablecraft::{Importer, apply_all, export, load_script};

use crate::cli::OutputFormat;

pub fn run(
    file: PathBuf,
    script: PathBuf,
    output: Option<PathBuf>,
    format: OutputFormat,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }
    if !script.exists() {
        return Err(format!("Script not found: {}", script.display()).into());
    }

    let commands = load_script(&script)?;
    if commands.is_empty() {
        println!("{} Script contains no commands.", "Warning:".yellow().bold());
        return Ok(());
    }

    let (dataset, meta) = Importer::new().import_file(&file)?;

    println!(
        "{} {} commands to {} ({} rows)",
        "Applying".cyan().bold(),
        commands.len().to_string().white().bold(),
        meta.file.white(),
        meta.row_count
    );

    if verbose {
        for (i, command) in commands.iter().enumerate() {
            println!("  {}. {:?}", i + 1, command);
        }
    }

    let transformed = apply_all(&dataset, &commands)?;

    let output_path = output.unwrap_or_else(|| {
        let stem = file.file_stem().unwrap_or_default().to_string_lossy();
        file.with_file_name(format!("{}_transformed.{}", stem, format.extension()))
    });

    let out_file = File::create(&output_path)?;
    export::write_delimited(&transformed, out_file, format.delimiter())?;

    println!(
        "{} {} rows, {} columns → {}",
        "Wrote".green().bold(),
        transformed.row_count().to_string().white().bold(),
        transformed.column_count().to_string().white().bold(),
        output_path.display()
    );

    Ok(())
}
