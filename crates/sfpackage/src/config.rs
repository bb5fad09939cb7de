//! Project configuration file support for sfpackage.
//!
//! Loads configuration from `sfpackage.toml` in the working directory.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use sfpackage_core::{NestedProperties, DEFAULT_API_VERSION};
use sfpackage_logging::LogFormat;

/// Source root used when neither the CLI nor the config names one
pub const DEFAULT_SOURCE_ROOT: &str = "force-app";

/// The config file name
pub const CONFIG_FILE_NAME: &str = "sfpackage.toml";

/// Project-level configuration loaded from `sfpackage.toml`
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Root source directory
    pub src: Option<String>,
    /// Package version written when `--pversion` is not given
    pub api_version: Option<String>,
    /// Default target directory
    pub target: Option<PathBuf>,
    /// Extra nested property folders on top of the built-in ones
    #[serde(default)]
    pub nested_properties: Vec<String>,
    /// Default log output format
    pub log_format: Option<LogFormat>,
}

impl ProjectConfig {
    /// Load configuration from the working directory.
    ///
    /// Returns:
    /// - `Ok(Some(config))` if file exists and parses successfully
    /// - `Ok(None)` if file does not exist
    /// - `Err(...)` if file exists but fails to parse (hard error)
    pub fn load(working_dir: &Path) -> Result<Option<Self>> {
        let config_path = working_dir.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let config: ProjectConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        Ok(Some(config))
    }

    /// Priority: `--src` > config `src` > `force-app`
    pub fn source_root(&self, cli: Option<&str>) -> String {
        cli.or(self.src.as_deref())
            .unwrap_or(DEFAULT_SOURCE_ROOT)
            .to_string()
    }

    /// Version used when `--pversion` is absent
    pub fn default_version(&self) -> String {
        self.api_version
            .clone()
            .unwrap_or_else(|| DEFAULT_API_VERSION.to_string())
    }

    /// Priority: positional `target` > config `target`
    pub fn target(&self, cli: Option<PathBuf>) -> Option<PathBuf> {
        cli.or_else(|| self.target.clone())
    }

    pub fn nested_properties(&self) -> NestedProperties {
        self.nested_properties
            .iter()
            .fold(NestedProperties::default(), |set, name| set.with(name.as_str()))
    }
}
