//! ldl.toml handling

use anyhow::{Context, Result};
use ldl_tokens::{GeneratorOptions, OutputFormat};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory
pub const CONFIG_FILE: &str = "ldl.toml";

/// Top-level configuration (ldl.toml)
#[derive(Debug, Default, Deserialize)]
pub struct LdlConfig {
    #[serde(default)]
    pub generator: GeneratorOptions,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Where and what `ldl generate` writes
#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    /// Output directory
    #[serde(default = "default_dir")]
    pub dir: PathBuf,
    /// Formats generated when `--format` is not given
    #[serde(default = "default_formats")]
    pub formats: Vec<String>,
    /// Refuse to generate from documents with validation errors
    #[serde(default = "default_true")]
    pub fail_on_errors: bool,
}

fn default_dir() -> PathBuf {
    PathBuf::from("dist")
}

fn default_formats() -> Vec<String> {
    vec!["css".to_string()]
}

fn default_true() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            formats: default_formats(),
            fail_on_errors: true,
        }
    }
}

impl LdlConfig {
    /// Load `path`, or `ldl.toml` in `dir` when no path is given.
    ///
    /// An explicit path must exist; a missing `ldl.toml` means defaults.
    pub fn load(path: Option<&Path>, dir: &Path) -> Result<Self> {
        let config_path = match path {
            Some(path) => {
                if !path.exists() {
                    anyhow::bail!("Config file {} does not exist", path.display());
                }
                path.to_path_buf()
            }
            None => {
                let path = dir.join(CONFIG_FILE);
                if !path.exists() {
                    tracing::debug!(dir = %dir.display(), "no ldl.toml found, using defaults");
                    return Ok(Self::default());
                }
                path
            }
        };

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        Self::from_toml(&content).with_context(|| format!("Failed to parse {}", config_path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Configured default formats, checked against the supported ones
    pub fn formats(&self) -> Result<Vec<OutputFormat>> {
        self.output
            .formats
            .iter()
            .map(|name| {
                name.parse::<OutputFormat>()
                    .with_context(|| format!("Invalid entry in output.formats: `{name}`"))
            })
            .collect()
    }
}
