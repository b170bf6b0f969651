//! Preprocess command - apply the reduction rules only.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use setcover::{read_instance, Solver};

use crate::config::{OutputFormat, SetcoverConfig};
use crate::output::{print_json, print_preprocess_text, InstanceSize};

#[derive(Args, Debug)]
pub struct PreprocessArgs {
    /// Instance file: one line of 0/1 characters per restriction
    #[arg(default_value = "entrada.txt")]
    pub file: PathBuf,

    /// What to do with restrictions no variable covers (reject or drop)
    #[arg(long, value_name = "POLICY")]
    pub zero_rows: Option<String>,

    /// Output format (text or json)
    #[arg(long)]
    pub format: Option<String>,

    /// Print the forced, dominated and kept variable identifiers
    #[arg(short, long)]
    pub list: bool,

    /// Also print the reduced matrix
    #[arg(long)]
    pub show_matrix: bool,
}

pub fn execute(args: PreprocessArgs, config: &SetcoverConfig) -> Result<u8> {
    let solver_config = config.solver_config(false, args.zero_rows.as_deref())?;
    let format = config.output_format(args.format.as_deref())?;

    let mut matrix = read_instance(&args.file)
        .with_context(|| format!("Failed to load instance {}", args.file.display()))?;
    let instance = InstanceSize {
        rows: matrix.nrows(),
        columns: matrix.ncols(),
    };

    let solver = Solver::new(solver_config);
    let policy = solver.config().zero_rows;
    let result = solver
        .preprocess(&mut matrix)
        .context("Preprocessing failed")?;

    match format {
        OutputFormat::Json => print_json(&result)?,
        OutputFormat::Text => {
            print_preprocess_text(instance, policy, &result, args.list || config.output.list);
            if args.show_matrix && !matrix.is_empty() {
                println!();
                print!("{}", matrix);
            }
        }
    }

    Ok(0)
}
