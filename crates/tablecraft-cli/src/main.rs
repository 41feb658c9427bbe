//! Tablecraft CLI - transformation engine for tabular datasets.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Inspect { file, column, json } => {
            commands::inspect::run(file, column, json, cli.verbose)
        }

        Commands::Apply {
            file,
            script,
            output,
            format,
        } => commands::apply::run(file, script, output, format, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
