//! Inspect command - profile a data file's columns.

use std::path::PathBuf;

use colored::Colorize;
use tablecraft::{ColumnStats, Importer, column_stats};

pub fn run(
    file: PathBuf,
    column: Option<String>,
    json: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let (dataset, meta) = Importer::new().import_file(&file)?;

    let stats: Vec<ColumnStats> = match column {
        Some(name) => vec![column_stats(&dataset, &name)?],
        None => dataset
            .columns
            .iter()
            .map(|name| column_stats(&dataset, name))
            .collect::<tablecraft::Result<_>>()?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!(
        "{} {} ({} rows, {} columns, {})",
        "Inspecting".cyan().bold(),
        meta.file.white(),
        meta.row_count.to_string().white().bold(),
        meta.column_count.to_string().white().bold(),
        meta.format
    );
    println!();

    for stat in &stats {
        println!(
            "  {:24} {:12} {} distinct",
            stat.name,
            format!("{:?}", stat.kind).to_lowercase(),
            stat.value_counts.len().to_string().blue()
        );

        if verbose {
            for (value, count) in stat.value_counts.iter().take(10) {
                let shown = if value.is_empty() { "<empty>" } else { value };
                println!("      {:20} {}", shown, count);
            }
            if stat.value_counts.len() > 10 {
                println!("      ... {} more", stat.value_counts.len() - 10);
            }
        }
    }

    Ok(())
}
