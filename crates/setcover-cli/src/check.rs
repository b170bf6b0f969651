//! Check command - verify that a selection of variables covers an instance.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::collections::BTreeSet;
use std::path::PathBuf;

use setcover::{read_instance, uncovered_rows, zero_rows, VariableId};

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Instance file: one line of 0/1 characters per restriction
    pub file: PathBuf,

    /// Selected variable identifiers (comma separated, 0-based)
    #[arg(short, long, value_delimiter = ',', required = true)]
    pub select: Vec<VariableId>,
}

pub fn execute(args: CheckArgs) -> Result<u8> {
    let matrix = read_instance(&args.file)
        .with_context(|| format!("Failed to load instance {}", args.file.display()))?;
    let selection: BTreeSet<VariableId> = args.select.into_iter().collect();

    let uncovered = uncovered_rows(&matrix, &selection)?;
    let uncoverable = zero_rows(&matrix);
    let missing: Vec<usize> = uncovered
        .into_iter()
        .filter(|row| uncoverable.binary_search(row).is_err())
        .collect();

    if !uncoverable.is_empty() {
        println!(
            "{} restrictions {:?} cannot be covered by any variable",
            "Warning:".yellow().bold(),
            uncoverable
        );
    }

    if missing.is_empty() {
        println!(
            "{} {} variables cover all {} restrictions",
            "Success:".green().bold(),
            selection.len(),
            matrix.nrows() - uncoverable.len()
        );
        Ok(0)
    } else {
        println!(
            "{} {} restrictions are not covered: {:?}",
            "Error:".red().bold(),
            missing.len(),
            missing
        );
        Ok(1)
    }
}
