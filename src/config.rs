//! Configuration handling for tkn-graph
//!
//! Configuration lives in `~/.config/tkn-graph/config.toml` (platform
//! equivalent via `directories`); the `TKN_GRAPH_CONFIG` environment
//! variable overrides the path. A missing file means defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Default output format for commands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DefaultFormat {
    #[default]
    Text,
    Json,
}

/// Output defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OutputConfig {
    /// Format used when `--format` is not given
    pub format: DefaultFormat,
}

/// Graphviz DOT emission settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DotConfig {
    /// Layout direction: TB, LR, BT or RL
    pub rankdir: String,
}

impl Default for DotConfig {
    fn default() -> Self {
        Self {
            rankdir: "TB".to_string(),
        }
    }
}

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub output: OutputConfig,
    pub dot: DotConfig,
}

impl Config {
    /// Returns the config file path, honoring `TKN_GRAPH_CONFIG`
    pub fn path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("TKN_GRAPH_CONFIG") {
            return Some(PathBuf::from(path));
        }
        ProjectDirs::from("dev", "tkn-graph", "tkn-graph")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Loads configuration from the default location
    pub fn load() -> Result<Self> {
        match Self::path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Loads configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        const RANKDIRS: [&str; 4] = ["TB", "LR", "BT", "RL"];
        if !RANKDIRS.contains(&self.dot.rankdir.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "dot.rankdir must be one of TB, LR, BT, RL; got '{}'",
                self.dot.rankdir
            ))
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn defaults_when_empty() {
        let config = Config::default();
        assert_eq!(config.output.format, DefaultFormat::Text);
        assert_eq!(config.dot.rankdir, "TB");
    }

    #[test]
    fn load_partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "[dot]\nrankdir = \"LR\"\n");

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.dot.rankdir, "LR");
        assert_eq!(config.output.format, DefaultFormat::Text);
    }

    #[test]
    fn load_output_format() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "[output]\nformat = \"json\"\n");

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.output.format, DefaultFormat::Json);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "not [valid toml");

        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse config"));
    }

    #[test]
    fn bad_rankdir_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "[dot]\nrankdir = \"diagonal\"\n");

        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("rankdir"));
    }
}
