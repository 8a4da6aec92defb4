//! Configuration handling for todo-cli
//!
//! Configuration is stored in `~/.config/todo-cli/config.toml` (or the
//! platform equivalent). Set `TODO_CONFIG_DIR` to use another directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable overriding the config directory
pub const CONFIG_DIR_ENV: &str = "TODO_CONFIG_DIR";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    #[error("Could not determine a data directory; pass --data-dir or set data_dir in config")]
    NoDataDir,
}

/// Output format for commands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Directory holding `local_storage.json`
    pub data_dir: Option<PathBuf>,

    /// Output format used when `--format` is not given
    pub default_format: OutputFormat,
}

impl Config {
    /// Loads configuration from the default location
    pub fn load() -> Result<Self> {
        match Self::config_dir() {
            Some(dir) => Self::load_from(&dir.join("config.toml")),
            None => Ok(Self::default()),
        }
    }

    /// Loads configuration from a specific file; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Returns the config directory
    pub fn config_dir() -> Option<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return Some(PathBuf::from(dir));
        }

        project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Resolves the data directory
    ///
    /// An explicit override wins, then `data_dir` from the config file, then
    /// the platform data directory.
    pub fn resolve_data_dir(&self, override_dir: Option<&Path>) -> Result<PathBuf> {
        if let Some(dir) = override_dir {
            return Ok(dir.to_path_buf());
        }

        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }

        project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| ConfigError::NoDataDir.into())
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "todo", "todo-cli")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config() {
        let config = Config::default();

        assert_eq!(config.data_dir, None);
        assert_eq!(config.default_format, OutputFormat::Text);
    }

    #[test]
    fn parse_config() {
        let toml = r#"
data_dir = "/tmp/todos"
default_format = "json"
"#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/todos")));
        assert_eq!(config.default_format, OutputFormat::Json);
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();

        assert_eq!(config, Config::default());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "default_format = [").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse config"));
    }

    #[test]
    fn override_beats_config_data_dir() {
        let config = Config {
            data_dir: Some(PathBuf::from("/from/config")),
            ..Config::default()
        };

        let resolved = config
            .resolve_data_dir(Some(Path::new("/from/flag")))
            .unwrap();
        assert_eq!(resolved, PathBuf::from("/from/flag"));

        let resolved = config.resolve_data_dir(None).unwrap();
        assert_eq!(resolved, PathBuf::from("/from/config"));
    }
}
