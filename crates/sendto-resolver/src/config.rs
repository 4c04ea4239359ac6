//! Resolver configuration
//!
//! Stored as pretty JSON. Missing fields fall back to their defaults and a
//! couple of environment variables override the stored values.

use crate::{Error, Result};
use sendto_core::DEFAULT_EVENT_LOG_CAPACITY;
use sendto_net::NetworkConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Quiet period before a resolution starts
pub const DEFAULT_QUIET_PERIOD_MS: u64 = 500;

/// Overrides the RPC endpoint
pub const ENV_RPC_URL: &str = "SENDTO_RPC_URL";

/// Overrides the quiet period (milliseconds)
pub const ENV_QUIET_PERIOD_MS: &str = "SENDTO_QUIET_PERIOD_MS";

/// Resolver configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Quiet period after the last input change, in milliseconds
    pub quiet_period_ms: u64,
    /// Resolution events retained in memory
    pub event_log_capacity: usize,
    /// Network collaborators
    pub network: NetworkConfig,
    /// Foreign-TLD owners served locally (`name.tld -> base58 owner`)
    pub tld_overrides: BTreeMap<String, String>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            quiet_period_ms: DEFAULT_QUIET_PERIOD_MS,
            event_log_capacity: DEFAULT_EVENT_LOG_CAPACITY,
            network: NetworkConfig::default(),
            tld_overrides: BTreeMap::new(),
        }
    }
}

impl ResolverConfig {
    /// Quiet period
    pub fn quiet_period(&self) -> Duration {
        Duration::from_millis(self.quiet_period_ms)
    }

    /// Platform config file location
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "sendto")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Parse from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load from a file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load `path`, else the platform default file if it exists, else defaults;
    /// then apply environment overrides
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => match Self::default_path() {
                Some(default) if default.exists() => Self::load(&default)?,
                _ => {
                    debug!("No config file, using defaults");
                    Self::default()
                }
            },
        };
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Write to a file, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json()?)?;
        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Apply `SENDTO_*` environment overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides_from(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary variable source
    pub fn apply_overrides_from<F>(&mut self, var: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = var(ENV_RPC_URL) {
            debug!("{} overrides rpc_url", ENV_RPC_URL);
            self.network.rpc_url = Some(url);
        }

        if let Some(ms) = var(ENV_QUIET_PERIOD_MS) {
            self.quiet_period_ms = ms
                .trim()
                .parse()
                .map_err(|e| Error::Config(format!("{}={:?}: {}", ENV_QUIET_PERIOD_MS, ms, e)))?;
        }

        self.validate()
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if self.event_log_capacity == 0 {
            return Err(Error::Config("event_log_capacity must be positive".to_string()));
        }
        self.network.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = ResolverConfig::default();
        assert_eq!(config.quiet_period(), Duration::from_millis(500));
        assert!(config.tld_overrides.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = ResolverConfig::from_json(r#"{"quiet_period_ms": 250}"#).unwrap();
        assert_eq!(config.quiet_period_ms, 250);
        assert_eq!(config.event_log_capacity, DEFAULT_EVENT_LOG_CAPACITY);
        assert_eq!(config.network, NetworkConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut config = ResolverConfig::default();
        config.tld_overrides.insert(
            "miester.abc".to_string(),
            "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v".to_string(),
        );
        config.save(&path).unwrap();

        let loaded = ResolverConfig::load(&path).unwrap();
        assert_eq!(loaded, config);

        let explicit = ResolverConfig::load_or_default(Some(&path)).unwrap();
        assert_eq!(explicit.tld_overrides.len(), 1);
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            (ENV_RPC_URL, "http://127.0.0.1:8899"),
            (ENV_QUIET_PERIOD_MS, "120"),
        ]
        .into_iter()
        .collect();

        let mut config = ResolverConfig::default();
        config
            .apply_overrides_from(|name| vars.get(name).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.network.rpc_url(), "http://127.0.0.1:8899");
        assert_eq!(config.quiet_period_ms, 120);
    }

    #[test]
    fn test_bad_override_is_config_error() {
        let mut config = ResolverConfig::default();
        let result = config.apply_overrides_from(|name| {
            (name == ENV_QUIET_PERIOD_MS).then(|| "soon".to_string())
        });
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_invalid_capacity() {
        assert!(ResolverConfig::from_json(r#"{"event_log_capacity": 0}"#).is_err());
    }
}
