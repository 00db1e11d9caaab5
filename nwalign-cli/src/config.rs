//! Configuration handling for the nwalign CLI
//!
//! Supports loading configuration from nwalign.toml files with CLI argument overrides.

use anyhow::{Context, Result};
use nwalign_core::ScoringModel;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::CliError;

/// File looked up in the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "nwalign.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub scoring: ScoringModel,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Worker threads for batch alignment
    #[serde(default = "default_threads")]
    pub threads: usize,

    /// Folder scanned for FASTA files when `align` gets no explicit inputs
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving JSON and text reports
    #[serde(default = "default_output_dir")]
    pub directory: PathBuf,

    /// File stem for single-pair reports
    #[serde(default = "default_base_name")]
    pub base_name: String,

    /// Alignment columns per block in text reports
    #[serde(default = "default_line_width")]
    pub line_width: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Largest full DP matrix (in cells) to allocate; 0 disables the check
    #[serde(default = "default_max_matrix_cells")]
    pub max_matrix_cells: usize,
}

// Default value functions
fn default_threads() -> usize { num_cpus::get() }
fn default_data_dir() -> PathBuf { PathBuf::from("data") }
fn default_output_dir() -> PathBuf { PathBuf::from("output") }
fn default_base_name() -> String { "nw_alignment_result".to_string() }
fn default_line_width() -> usize { 60 }
fn default_max_matrix_cells() -> usize { 400_000_000 }

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            threads: default_threads(),
            data_dir: default_data_dir(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
            base_name: default_base_name(),
            line_width: default_line_width(),
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_matrix_cells: default_max_matrix_cells(),
        }
    }
}

impl LimitsConfig {
    pub fn max_cells(&self) -> Option<usize> {
        (self.max_matrix_cells > 0).then_some(self.max_matrix_cells)
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => {
                log::info!("Loading configuration from: {}", path.display());
                Self::load_from_file(path)?
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    log::info!("Loading configuration from: {}", DEFAULT_CONFIG_FILE);
                    Self::load_from_file(&default_path)?
                } else {
                    log::debug!("Using default configuration");
                    Self::default()
                }
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse configuration file: {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write configuration file: {}", path.display()))?;

        Ok(())
    }

    /// Generate example configuration file content
    pub fn example_toml() -> Result<String> {
        toml::to_string_pretty(&Self::default()).context("Failed to serialize default configuration")
    }

    pub fn validate(&self) -> Result<(), CliError> {
        if self.general.threads == 0 {
            return Err(CliError::config("general.threads must be at least 1"));
        }
        if self.output.line_width == 0 {
            return Err(CliError::config("output.line_width must be at least 1"));
        }
        if self.output.base_name.trim().is_empty() {
            return Err(CliError::config("output.base_name must not be empty"));
        }
        Ok(())
    }
}
