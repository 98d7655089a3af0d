//! Configuration file handling.
//!
//! Provides loading and saving of plugtrack configuration from a TOML
//! file. Values here are defaults only; command-line flags override them.
//!
//! # Configuration Location
//!
//! - Linux: `~/.config/plugtrack/config.toml`
//! - macOS: `~/Library/Application Support/plugtrack/config.toml`
//! - Windows: `%APPDATA%\plugtrack\config.toml`
//!
//! # Example Configuration
//!
//! ```toml
//! versions_file = "VERSIONS.md"
//! repo = "vatsim/plugin-tracker"
//! ```

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Versions file checked when no `--versions-file` flag is provided.
    ///
    /// Default: "VERSIONS.md"
    pub versions_file: String,

    /// Default target repository (owner/repo) for filed issues.
    ///
    /// No default; `check` requires `--repo` when this is unset.
    pub repo: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            versions_file: "VERSIONS.md".to_string(),
            repo: None,
        }
    }
}

impl Config {
    /// Loads configuration from the config file.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or
    /// parsed.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Saves the configuration to the config file.
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Returns the path to the configuration file.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("plugtrack")
            .join("config.toml")
    }

    /// Generates a string containing the default configuration.
    pub fn generate_default_config() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.versions_file, "VERSIONS.md");
        assert!(config.repo.is_none());
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config {
            versions_file: "PLUGINS.md".to_string(),
            repo: Some("owner/tracker".to_string()),
        };

        let toml = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.versions_file, "PLUGINS.md");
        assert_eq!(parsed.repo.as_deref(), Some("owner/tracker"));
    }

    #[test]
    fn test_config_partial_file_uses_defaults() {
        let parsed: Config = toml::from_str("repo = \"owner/tracker\"").unwrap();
        assert_eq!(parsed.versions_file, "VERSIONS.md");
        assert_eq!(parsed.repo.as_deref(), Some("owner/tracker"));
    }
}
