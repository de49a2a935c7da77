//! # Configuration
//!
//! Settings are layered: built-in defaults, then an optional JSON config
//! file, then command-line overrides applied by the binary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{DashboardError, Result};

/// Default number of aggregation results kept by a session cache
pub const DEFAULT_CACHE_CAPACITY: usize = 8;

const APP_DIR: &str = "sales-dashboard";
const CONFIG_FILE: &str = "config.json";

/// How the CLI prints a dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            other => Err(DashboardError::Config(format!(
                "unknown output format '{}', expected 'table' or 'json'",
                other
            ))),
        }
    }
}

/// Dashboard settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Dataset used when none is given on the command line
    pub data_path: Option<PathBuf>,
    /// Results kept by the session cache; 0 disables caching
    pub cache_capacity: usize,
    pub output_format: OutputFormat,
    pub pretty_json: bool,
    /// Rows shown in the country table of the text summary
    pub top_countries: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: None,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            output_format: OutputFormat::Table,
            pretty_json: true,
            top_countries: 10,
        }
    }
}

impl DashboardConfig {
    /// Location of the per-user config file, if the platform has one
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Read a config file. Missing keys fall back to defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| DashboardError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&json).map_err(|source| DashboardError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load the explicit config file if given, otherwise the per-user file
    /// when it exists, otherwise defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            log::debug!("Loading config from {}", path.display());
            return Self::from_file(path);
        }

        match Self::default_path() {
            Some(path) if path.is_file() => {
                log::debug!("Loading config from {}", path.display());
                Self::from_file(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.top_countries == 0 {
            return Err(DashboardError::Config(
                "top_countries must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "cache_capacity": 0, "output_format": "json" }"#).unwrap();

        let config = DashboardConfig::load(Some(&path)).unwrap();

        assert_eq!(config.cache_capacity, 0);
        assert_eq!(config.output_format, OutputFormat::Json);
        assert!(config.pretty_json);
        assert_eq!(config.top_countries, 10);
        assert_eq!(config.data_path, None);
    }

    #[test]
    fn test_invalid_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "top_countries": 0 }"#).unwrap();
        assert!(matches!(
            DashboardConfig::from_file(&path),
            Err(DashboardError::Config(_))
        ));

        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            DashboardConfig::from_file(&path),
            Err(DashboardError::Parse { .. })
        ));
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = TempDir::new().unwrap();
        let result = DashboardConfig::load(Some(&dir.path().join("absent.json")));
        assert!(matches!(result, Err(DashboardError::Io { .. })));
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("table".parse::<OutputFormat>().unwrap(), OutputFormat::Table);
        assert!("csv".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::Json.to_string(), "json");
    }
}
