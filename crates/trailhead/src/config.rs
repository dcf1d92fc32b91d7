// File: src/config.rs
// Purpose: Configuration parsing from trailhead.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use trailhead_history::MemorySource;

/// Router configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub routing: RoutingConfig,

    #[serde(default)]
    pub history: HistoryConfig,
}

/// Routing configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoutingConfig {
    /// Base path every top-level route is relative to (default: "/")
    #[serde(default = "default_path")]
    pub base_path: String,
}

/// History configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryConfig {
    /// Where the in-memory history starts (default: "/")
    #[serde(default = "default_path")]
    pub initial_path: String,

    /// Number of state changes after which the history refuses more
    #[serde(default)]
    pub push_limit: Option<usize>,
}

// Default values
fn default_path() -> String {
    "/".to_string()
}

// Default implementations
impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            base_path: default_path(),
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            initial_path: default_path(),
            push_limit: None,
        }
    }
}

impl HistoryConfig {
    /// In-memory source described by this configuration
    pub fn memory_source(&self) -> MemorySource {
        let source = MemorySource::new(&self.initial_path);
        match self.push_limit {
            Some(limit) => source.with_push_limit(limit),
            None => source,
        }
    }
}

impl Config {
    /// Load configuration from trailhead.toml
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist or is empty, return default config
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Load configuration from default path (./trailhead.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("trailhead.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use trailhead_history::LocationSource;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.routing.base_path, "/");
        assert_eq!(config.history.initial_path, "/");
        assert_eq!(config.history.push_limit, None);
    }

    #[test]
    fn test_empty_config() {
        let config = toml::from_str::<Config>("").unwrap_or_default();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_custom_config() {
        let toml = r#"
            [routing]
            base_path = "/app"

            [history]
            initial_path = "/app/dash?tab=1"
            push_limit = 100
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.routing.base_path, "/app");
        assert_eq!(config.history.push_limit, Some(100));

        let source = config.history.memory_source();
        assert_eq!(source.location().pathname, "/app/dash");
        assert_eq!(source.location().search, "tab=1");
    }

    #[test]
    fn test_load_missing_file() {
        let config = Config::load("does-not-exist/trailhead.toml").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[history]\ninitial_path = \"/start\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.history.initial_path, "/start");
        assert_eq!(config.routing.base_path, "/");
    }

    #[test]
    fn test_load_invalid_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[history]\npush_limit = \"many\"").unwrap();

        let err = Config::load(file.path()).unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse config file"));
    }
}
