use anyhow::{Context, Result};
use serde::Deserialize;
use setcover::{SolverConfig, ZeroRowPolicy};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "setcover.toml";

/// The setcover configuration file structure (setcover.toml)
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SetcoverConfig {
    /// Solver settings
    pub solver: SolverConfig,

    /// Output settings
    pub output: OutputConfig,
}

/// How results are printed
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format: "text" or "json"
    pub format: String,

    /// Print the selected variable identifiers, not just their count
    pub list: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "text".to_string(),
            list: false,
        }
    }
}

impl SetcoverConfig {
    /// Load configuration from setcover.toml, searching upward from the given directory
    pub fn load(start_dir: &Path) -> Result<Option<Self>> {
        let mut current = start_dir.to_path_buf();

        loop {
            let config_path = current.join(CONFIG_FILE);

            if config_path.exists() {
                return Self::load_file(&config_path).map(Some);
            }

            // Move to parent directory
            if !current.pop() {
                // Reached filesystem root, no config found
                return Ok(None);
            }
        }
    }

    /// Load a specific configuration file
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: SetcoverConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Resolve the configuration: an explicit path wins, otherwise search
    /// upward from the current working directory, otherwise defaults.
    pub fn resolve(explicit: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_file(path);
        }
        let cwd = std::env::current_dir()?;
        Ok(Self::load(&cwd)?.unwrap_or_default())
    }

    /// Solver settings with command line overrides applied on top of the file
    pub fn solver_config(&self, no_preprocess: bool, zero_rows: Option<&str>) -> Result<SolverConfig> {
        let mut solver = self.solver.clone();
        if no_preprocess {
            solver.preprocess = false;
        }
        if let Some(policy) = zero_rows {
            solver.zero_rows = ZeroRowPolicy::from_str(policy).ok_or_else(|| {
                anyhow::anyhow!("Invalid zero-rows policy '{}': expected 'reject' or 'drop'", policy)
            })?;
        }
        Ok(solver)
    }

    /// Output format with the command line override applied
    pub fn output_format(&self, format: Option<&str>) -> Result<OutputFormat> {
        let format = format.unwrap_or(&self.output.format);
        match format {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => anyhow::bail!("Invalid output format '{}': expected 'text' or 'json'", other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}
