//! Tracker configuration.

use super::sheets::SheetSource;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration naming the sheet tabs to pull and the cache TTL.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TrackerConfig {
    /// Google Sheet document id
    pub sheet_id: String,
    /// gid of the holdings tab
    pub holdings_gid: String,
    /// gid of the transactions tab
    pub transactions_gid: String,
    /// Cache time-to-live in seconds
    pub cache_ttl_secs: u64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            sheet_id: String::new(),
            holdings_gid: "0".to_string(),
            transactions_gid: String::new(),
            cache_ttl_secs: 3600,
        }
    }
}

impl TrackerConfig {
    /// Get the default config file path.
    ///
    /// Can be overridden with the `PORTFOLIO_TRACKER_CONFIG`
    /// environment variable.
    pub fn default_path() -> PathBuf {
        if let Ok(path) = env::var("PORTFOLIO_TRACKER_CONFIG") {
            return PathBuf::from(path);
        }

        directories::BaseDirs::new()
            .map(|dirs| dirs.config_dir().join("portfolio-tracker/config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// Load from the default path, falling back to defaults when the
    /// file does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::default_path())
    }

    /// Load from a specific path, falling back to defaults when the
    /// file does not exist. Malformed TOML is an error, not a fallback.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Source for the holdings tab.
    pub fn holdings_source(&self) -> SheetSource {
        SheetSource::new(&self.sheet_id, &self.holdings_gid)
    }

    /// Source for the transactions tab.
    pub fn transactions_source(&self) -> SheetSource {
        SheetSource::new(&self.sheet_id, &self.transactions_gid)
    }

    /// Configured cache TTL.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Whether the config names a sheet to fetch from.
    pub fn has_sheet(&self) -> bool {
        !self.sheet_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = TrackerConfig::default();

        assert_eq!(config.holdings_gid, "0");
        assert_eq!(config.cache_ttl_secs, 3600);
        assert!(!config.has_sheet());
    }

    #[test]
    fn test_load_missing_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let config = TrackerConfig::load_from_path(&dir.path().join("absent.toml")).unwrap();

        assert_eq!(config, TrackerConfig::default());
    }

    #[test]
    fn test_load_from_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "sheet_id = \"abc123\"\ntransactions_gid = \"42\"\ncache_ttl_secs = 120\n",
        )
        .unwrap();

        let config = TrackerConfig::load_from_path(&path).unwrap();

        assert_eq!(config.sheet_id, "abc123");
        assert_eq!(config.holdings_gid, "0"); // default preserved
        assert_eq!(config.transactions_gid, "42");
        assert_eq!(config.cache_ttl(), Duration::from_secs(120));
        assert!(config.has_sheet());
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "sheet_id = [broken\n").unwrap();

        let err = TrackerConfig::load_from_path(&path).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_sources_use_configured_gids() {
        let config = TrackerConfig {
            sheet_id: "abc".to_string(),
            holdings_gid: "0".to_string(),
            transactions_gid: "7".to_string(),
            cache_ttl_secs: 3600,
        };

        assert!(config.holdings_source().csv_export_url().ends_with("gid=0"));
        assert!(config
            .transactions_source()
            .csv_export_url()
            .ends_with("gid=7"));
    }
}
