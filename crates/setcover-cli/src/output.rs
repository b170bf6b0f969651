//! Printing of solver results.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use setcover::{Preprocessed, Solution, VariableId, ZeroRowPolicy};

/// Dimensions of the instance as loaded.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct InstanceSize {
    pub rows: usize,
    pub columns: usize,
}

#[derive(Debug, Serialize)]
pub struct SolveReport<'a> {
    pub instance: InstanceSize,
    pub kept_variables: usize,
    pub remaining_restrictions: usize,
    pub solution: &'a Solution,
}

impl<'a> SolveReport<'a> {
    pub fn new(instance: InstanceSize, solution: &'a Solution) -> Self {
        // without preprocessing nothing was reduced
        let (kept_variables, remaining_restrictions) = match &solution.preprocessing {
            Some(p) => (p.kept.len(), p.remaining_rows),
            None => (instance.columns, instance.rows),
        };
        Self {
            instance,
            kept_variables,
            remaining_restrictions,
            solution,
        }
    }
}

/// Format a set of identifiers as `{ 0 2 5 }`.
pub fn format_ids(ids: impl IntoIterator<Item = VariableId>) -> String {
    let mut out = String::from("{ ");
    for id in ids {
        out.push_str(&id.to_string());
        out.push(' ');
    }
    out.push('}');
    out
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_solve_text(report: &SolveReport<'_>, list: bool) {
    println!(
        "{} {}",
        "No. of variables remaining after preprocessing:".bold(),
        report.kept_variables
    );
    println!(
        "{} {}",
        "No. of restrictions remaining after preprocessing:".bold(),
        report.remaining_restrictions
    );
    println!(
        "{} {}",
        "Final No. of selected variables:".bold(),
        report.solution.len().to_string().green()
    );
    if list {
        println!(
            "{} {}",
            "Selected variables:".bold(),
            format_ids(report.solution.selected.iter().copied())
        );
    }
}

pub fn print_preprocess_text(
    instance: InstanceSize,
    policy: ZeroRowPolicy,
    result: &Preprocessed,
    list: bool,
) {
    println!(
        "{} {}x{} -> {}x{} in {} passes",
        "Reduced".green().bold(),
        instance.rows,
        instance.columns,
        result.remaining_rows,
        result.kept.len(),
        result.passes
    );
    println!("{} {}", "Zero-row policy:".bold(), policy.as_str());
    println!("{} {}", "Forced variables:".bold(), result.forced.len());
    println!("{} {}", "Dominated variables:".bold(), result.dominated.len());
    if list {
        println!("  {} {}", "forced".cyan(), format_ids(result.forced.iter().copied()));
        println!("  {} {}", "dominated".yellow(), format_ids(result.dominated.iter().copied()));
        println!("  {} {}", "kept".white(), format_ids(result.kept.iter()));
    }
}
