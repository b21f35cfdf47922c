//! Configuration handling for tyme
//!
//! Configuration is read from `config.toml` in the user config directory
//! (e.g. `~/.config/tyme/config.toml`), or from an explicit path. Every key
//! is optional:
//!
//! ```toml
//! sheet = "/home/me/.tyme/sheet"
//! editor = "nvim"
//! sentinel_year = 2000
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::{BaseDirs, ProjectDirs};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Clock, DEFAULT_SENTINEL_YEAR};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// User configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path of the sheet file
    pub sheet: PathBuf,

    /// Editor command for `tyme edit`; falls back to `$EDITOR`, then `vi`
    pub editor: Option<String>,

    /// Year every timestamp is normalized to (must be a leap year)
    pub sentinel_year: i32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sheet: default_sheet_path(),
            editor: None,
            sentinel_year: DEFAULT_SENTINEL_YEAR,
        }
    }
}

/// `~/.tyme/sheet`
fn default_sheet_path() -> PathBuf {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .unwrap_or_default()
        .join(".tyme")
        .join("sheet")
}

impl Config {
    /// Returns the user config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "tyme", "tyme").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Loads configuration from `path`, or from the user config directory.
    ///
    /// An explicit path must exist; a missing default file means defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::global_config_dir() {
                Some(dir) => dir.join("config.toml"),
                None => return Ok(Self::default()),
            },
        };

        if path.is_none() && !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config: {}", config_path.display()))?;

        Self::from_toml(&content)
            .with_context(|| format!("Failed to load config: {}", config_path.display()))
    }

    /// Parses configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Builds the clock for the configured sentinel year
    pub fn clock(&self) -> Result<Clock, ConfigError> {
        Clock::new(self.sentinel_year).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Resolves the editor command
    pub fn editor_command(&self) -> String {
        self.editor
            .clone()
            .or_else(|| std::env::var("EDITOR").ok())
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| "vi".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.sentinel_year, 2000);
        assert!(config.editor.is_none());
        assert!(config.sheet.ends_with(".tyme/sheet"));
    }

    #[test]
    fn parse_config() {
        let toml = r#"
sheet = "/tmp/my-sheet"
editor = "nano"
sentinel_year = 2024
"#;

        let config = Config::from_toml(toml).unwrap();
        assert_eq!(config.sheet, PathBuf::from("/tmp/my-sheet"));
        assert_eq!(config.editor_command(), "nano");
        assert_eq!(config.clock().unwrap().year(), 2024);
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let config = Config::from_toml("editor = \"code --wait\"").unwrap();
        assert_eq!(config.sentinel_year, DEFAULT_SENTINEL_YEAR);
        assert_eq!(config.sheet, Config::default().sheet);
    }

    #[test]
    fn invalid_toml_is_parse_error() {
        assert!(matches!(
            Config::from_toml("sentinel_year = \"soon\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn non_leap_year_is_invalid() {
        let config = Config::from_toml("sentinel_year = 2023").unwrap();
        assert!(matches!(config.clock(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn load_explicit_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "sheet = \"elsewhere\"\n").unwrap();

        let config = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(config.sheet, PathBuf::from("elsewhere"));
    }

    #[test]
    fn load_missing_explicit_path_fails() {
        let dir = TempDir::new().unwrap();
        assert!(Config::load(Some(dir.path().join("absent.toml").as_path())).is_err());
    }
}
