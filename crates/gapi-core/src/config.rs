//! Client configuration management.
//!
//! This module handles loading and saving the connection settings: the
//! server base URL, the credentials string, and the request timeout.
//!
//! Configuration is stored at `~/.config/gapi/config.json` and can be
//! overridden with `GRAFANA_URL`, `GRAFANA_AUTH`, and `GRAFANA_TIMEOUT_SECS`.
//! Credentials are never written back to the file; a hand-written `auth`
//! entry is still read.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::api::client::REQUEST_TIMEOUT_SECS;
use crate::api::Credentials;

/// Application name used for the config directory path
const APP_NAME: &str = "gapi";

/// Config file name
const CONFIG_FILE: &str = "config.json";

const DEFAULT_URL: &str = "http://localhost:3000";

pub const URL_ENV: &str = "GRAFANA_URL";
pub const AUTH_ENV: &str = "GRAFANA_AUTH";
pub const TIMEOUT_ENV: &str = "GRAFANA_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub url: String,
    /// `user:password` or an API token
    #[serde(skip_serializing)]
    pub auth: Option<String>,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            auth: None,
            timeout_secs: REQUEST_TIMEOUT_SECS,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            let config: Self = serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config file {}", path.display()))?;
            config
                .validate()
                .with_context(|| format!("Invalid config file {}", path.display()))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }

    /// Override settings from environment-style variables. Empty values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get(URL_ENV) {
            self.url = url;
        }
        if let Some(auth) = get(AUTH_ENV) {
            self.auth = Some(auth);
        }
        if let Some(timeout) = get(TIMEOUT_ENV) {
            let secs: u64 = timeout
                .trim()
                .parse()
                .with_context(|| format!("{} must be a whole number of seconds", TIMEOUT_ENV))?;
            anyhow::ensure!(secs > 0, "{} must be at least 1 second", TIMEOUT_ENV);
            self.timeout_secs = secs;
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        anyhow::ensure!(self.timeout_secs > 0, "timeout_secs must be at least 1 second");
        Ok(())
    }

    /// Overrides from the process environment.
    pub fn apply_process_env(&mut self) -> Result<()> {
        self.apply_env(|key| std::env::var(key).ok())
    }

    pub fn credentials(&self) -> Option<Credentials> {
        self.auth.as_deref().map(Credentials::parse)
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.url, "http://localhost:3000");
        assert_eq!(config.timeout_secs, 30);
        assert!(config.credentials().is_none());
    }

    #[test]
    fn test_apply_env_overrides() {
        let mut config = Config::default();
        config
            .apply_env(env(&[
                (URL_ENV, "https://dash.example.com"),
                (AUTH_ENV, "admin:admin"),
                (TIMEOUT_ENV, " 5 "),
            ]))
            .unwrap();
        assert_eq!(config.url, "https://dash.example.com");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(
            config.credentials(),
            Some(Credentials::Basic {
                username: "admin".to_string(),
                password: "admin".to_string()
            })
        );
    }

    #[test]
    fn test_apply_env_ignores_empty_and_rejects_bad_timeout() {
        let mut config = Config::default();
        config.apply_env(env(&[(URL_ENV, "  ")])).unwrap();
        assert_eq!(config.url, DEFAULT_URL);

        assert!(config.apply_env(env(&[(TIMEOUT_ENV, "soon")])).is_err());

        let err = config.apply_env(env(&[(TIMEOUT_ENV, "0")])).unwrap_err();
        assert!(err.to_string().contains("at least 1 second"));
        assert_eq!(config.timeout_secs, REQUEST_TIMEOUT_SECS);
    }

    #[test]
    fn test_load_rejects_zero_timeout() {
        let dir = std::env::temp_dir().join(format!("gapi-zero-timeout-{}", std::process::id()));
        let path = dir.join(CONFIG_FILE);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(&path, r#"{"url":"http://localhost:3000","timeout_secs":0}"#).unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("at least 1 second"));
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_partial_config_file_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"auth":"token-123"}"#).unwrap();
        assert_eq!(config.url, DEFAULT_URL);
        assert_eq!(config.credentials(), Some(Credentials::Token("token-123".to_string())));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = std::env::temp_dir().join(format!("gapi-config-test-{}", std::process::id()));
        let path = dir.join(CONFIG_FILE);
        let config = Config {
            url: "http://dash.internal:3000".to_string(),
            auth: Some("admin:hunter2".to_string()),
            timeout_secs: 10,
        };
        config.save_to(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(!written.contains("hunter2"));
        assert!(!written.contains("auth"));

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.url, config.url);
        assert_eq!(loaded.timeout_secs, 10);
        assert_eq!(loaded.auth, None);
        std::fs::remove_dir_all(&dir).unwrap();

        // Missing file falls back to defaults
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
    }
}
