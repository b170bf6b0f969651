//! Solve command - preprocess an instance and cover it greedily.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use setcover::{is_cover, read_instance, Solver};

use crate::config::{OutputFormat, SetcoverConfig};
use crate::output::{print_json, print_solve_text, InstanceSize, SolveReport};

#[derive(Args, Debug)]
pub struct SolveArgs {
    /// Instance file: one line of 0/1 characters per restriction
    #[arg(default_value = "entrada.txt")]
    pub file: PathBuf,

    /// Skip the reduction rules and run the greedy phase directly
    #[arg(long)]
    pub no_preprocess: bool,

    /// What to do with restrictions no variable covers (reject or drop)
    #[arg(long, value_name = "POLICY")]
    pub zero_rows: Option<String>,

    /// Output format (text or json)
    #[arg(long)]
    pub format: Option<String>,

    /// Print the selected variable identifiers
    #[arg(short, long)]
    pub list: bool,
}

pub fn execute(args: SolveArgs, config: &SetcoverConfig) -> Result<u8> {
    let solver_config = config.solver_config(args.no_preprocess, args.zero_rows.as_deref())?;
    let format = config.output_format(args.format.as_deref())?;

    let original = read_instance(&args.file)
        .with_context(|| format!("Failed to load instance {}", args.file.display()))?;
    let instance = InstanceSize {
        rows: original.nrows(),
        columns: original.ncols(),
    };
    log::info!("Loaded {}x{} instance", instance.rows, instance.columns);

    let solver = Solver::new(solver_config);
    log::info!(
        "Solving with zero-row policy '{}', preprocessing {}",
        solver.config().zero_rows.as_str(),
        if solver.config().preprocess { "on" } else { "off" }
    );

    let mut matrix = original.clone();
    let solution = solver
        .solve_greedy(&mut matrix)
        .context("Could not solve instance")?;

    anyhow::ensure!(
        is_cover(&original, &solution.selected)?,
        "Selected variables do not cover the instance"
    );

    let report = SolveReport::new(instance, &solution);
    match format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Text => print_solve_text(&report, args.list || config.output.list),
    }

    Ok(0)
}
