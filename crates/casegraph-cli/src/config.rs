//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use casegraph_domain::RiskConfig;
use casegraph_loader::LoaderConfig;
use casegraph_view::{FilterState, DEFAULT_DEGREE_LIMIT};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Where and how to load the datasets
    #[serde(default)]
    pub data: LoaderConfig,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Initial explorer filters
    #[serde(default)]
    pub explorer: ExplorerSettings,

    /// Risk scoring weights
    #[serde(default)]
    pub scoring: RiskConfig,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Command history size
    #[serde(default = "default_history_size")]
    pub history_size: usize,
}

/// Filters the explorer starts with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplorerSettings {
    /// Hop radius around a focused person
    #[serde(default = "default_degree_limit")]
    pub degree_limit: usize,

    /// Minimum risk for non-victims
    #[serde(default)]
    pub risk_min: f64,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (ids only) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".casegraph").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. The default path falls back to defaults
    /// when absent.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (Self::path()?, false),
        };

        if path.exists() {
            let contents = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else if explicit {
            Err(CliError::Config(format!(
                "Config file {} does not exist",
                path.display()
            )))
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a file, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = self.to_toml()?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Check every section.
    pub fn validate(&self) -> Result<()> {
        self.data.validate().map_err(CliError::Config)?;
        self.scoring.validate().map_err(CliError::Config)?;
        if !(0.0..=1.0).contains(&self.explorer.risk_min) {
            return Err(CliError::Config(format!(
                "explorer.risk_min must be in [0, 1], got {}",
                self.explorer.risk_min
            )));
        }
        Ok(())
    }
}

impl ExplorerSettings {
    /// Filter state the explorer starts from
    pub fn initial_state(&self) -> FilterState {
        FilterState {
            risk_min: self.risk_min,
            degree_limit: self.degree_limit,
            ..FilterState::default()
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
            history_size: default_history_size(),
        }
    }
}

impl Default for ExplorerSettings {
    fn default() -> Self {
        Self {
            degree_limit: DEFAULT_DEGREE_LIMIT,
            risk_min: 0.0,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_history_size() -> usize {
    1000
}

fn default_degree_limit() -> usize {
    DEFAULT_DEGREE_LIMIT
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.settings.color);
        assert_eq!(config.settings.format, OutputFormat::Table);
        assert_eq!(config.explorer.degree_limit, DEFAULT_DEGREE_LIMIT);
        assert_eq!(config.data.data_dir, PathBuf::from("assets/data"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
            [data]
            data_dir = "/srv/graph"

            [explorer]
            risk_min = 0.25

            [scoring]
            mention_weight = 2.0
        "#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.data.data_dir, PathBuf::from("/srv/graph"));
        assert_eq!(config.data.people_file, "people.json");
        assert_eq!(config.explorer.risk_min, 0.25);
        assert_eq!(config.explorer.degree_limit, DEFAULT_DEGREE_LIMIT);
        assert_eq!(config.scoring.mention_weight, 2.0);
        assert_eq!(config.scoring.case_weight, RiskConfig::default().case_weight);
        assert_eq!(config.settings.history_size, 1000);
    }

    #[test]
    fn test_initial_state() {
        let settings = ExplorerSettings {
            degree_limit: 3,
            risk_min: 0.4,
        };
        let state = settings.initial_state();
        assert_eq!(state.degree_limit, 3);
        assert_eq!(state.risk_min, 0.4);
        assert!(state.show_victim && state.show_accused && state.show_other);
        assert!(state.focused.is_none());
    }

    #[test]
    fn test_invalid_risk_min() {
        let mut config = Config::default();
        config.explorer.risk_min = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.settings.format = OutputFormat::Json;
        config.explorer.degree_limit = 4;
        config.save(&path).unwrap();

        let loaded = Config::load(Some(&path)).unwrap();
        assert_eq!(loaded.settings.format, OutputFormat::Json);
        assert_eq!(loaded.explorer.degree_limit, 4);
    }

    #[test]
    fn test_missing_explicit_path() {
        let dir = TempDir::new().unwrap();
        let result = Config::load(Some(&dir.path().join("absent.toml")));
        assert!(matches!(result, Err(CliError::Config(_))));
    }
}
