//! Configuration settings for the N-Queens solver

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Largest board the `u64` bitmask state can represent
pub const MAX_BOARD_SIZE: u32 = 64;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub search: SearchConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Boards smaller than this use mirror symmetry; larger ones use the plain search
    pub symmetry_threshold: u32,
    /// Maximum solutions reported for boards at or above the threshold (`None` disables)
    pub solution_cap: Option<u64>,
    pub unsolvable_policy: UnsolvablePolicy,
}

/// Which board sizes are reported as having no solution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum UnsolvablePolicy {
    /// Only 2 and 3; non-positive sizes are rejected as invalid
    TwoAndThree,
    /// Every size below 4 except 1, including zero and negative sizes
    BelowFour,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub input_file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub output_directory: PathBuf,
    /// Explicit summary path; derived from the input file when absent
    pub output_file: Option<PathBuf>,
    /// Bytes buffered before a flush to scratch storage
    pub buffer_capacity: usize,
    pub count_only: bool,
    pub write_report: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            input: InputConfig {
                input_file: PathBuf::from("input/boards/n8.txt"),
            },
            output: OutputConfig {
                output_directory: PathBuf::from("output"),
                output_file: None,
                buffer_capacity: 65536,
                count_only: false,
                write_report: false,
            },
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            symmetry_threshold: 21,
            solution_cap: Some(1_000_000),
            unsolvable_policy: UnsolvablePolicy::TwoAndThree,
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.search.symmetry_threshold == 0 || self.search.symmetry_threshold > MAX_BOARD_SIZE {
            anyhow::bail!(
                "Symmetry threshold must be between 1 and {}, got {}",
                MAX_BOARD_SIZE,
                self.search.symmetry_threshold
            );
        }

        if self.search.solution_cap == Some(0) {
            anyhow::bail!("Solution cap must be positive (use null to disable it)");
        }

        if self.output.buffer_capacity < 64 {
            anyhow::bail!("Output buffer capacity must be at least 64 bytes");
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(ref input_file) = cli_overrides.input_file {
            self.input.input_file = input_file.clone();
        }
        if let Some(ref output_file) = cli_overrides.output_file {
            self.output.output_file = Some(output_file.clone());
        }
        if let Some(cap) = cli_overrides.solution_cap {
            self.search.solution_cap = Some(cap);
        }
        if cli_overrides.no_cap {
            self.search.solution_cap = None;
        }
        if let Some(threshold) = cli_overrides.symmetry_threshold {
            self.search.symmetry_threshold = threshold;
        }
        if let Some(policy) = cli_overrides.unsolvable_policy {
            self.search.unsolvable_policy = policy;
        }
        if cli_overrides.count_only {
            self.output.count_only = true;
        }
        if cli_overrides.write_report {
            self.output.write_report = true;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub input_file: Option<PathBuf>,
    pub output_file: Option<PathBuf>,
    pub solution_cap: Option<u64>,
    pub no_cap: bool,
    pub symmetry_threshold: Option<u32>,
    pub unsolvable_policy: Option<UnsolvablePolicy>,
    pub count_only: bool,
    pub write_report: bool,
}
