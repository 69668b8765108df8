use crate::error::{CourseError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_VERIFY_URL: &str = "https://jp-courses.netlify.app/.netlify/functions/verify";
pub const DEFAULT_PORT: u16 = 3000;

const VERIFY_URL_ENV: &str = "JP_COURSES_VERIFY_URL";
const PORT_ENV: &str = "JP_COURSES_PORT";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct InstallerConfig {
    pub verify_url: String,
    pub port: u16,
    pub content_dir: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}

impl Default for InstallerConfig {
    fn default() -> Self {
        InstallerConfig {
            verify_url: DEFAULT_VERIFY_URL.to_string(),
            port: DEFAULT_PORT,
            content_dir: "content".to_string(),
            request_timeout_secs: 300,
            user_agent: format!("jp-courses/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl InstallerConfig {
    /// Loads `~/.jp-courses/config.json` when it exists, then applies
    /// environment overrides.
    pub fn load() -> Result<Self> {
        let config_path = get_config_path()?;
        let mut config = Self::load_from(&config_path)?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: InstallerConfig = serde_json::from_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(VERIFY_URL_ENV) {
            self.verify_url = url;
        }

        if let Some(port) = lookup(PORT_ENV) {
            self.port = port.parse().map_err(|_| {
                CourseError::config_error(format!("{PORT_ENV} must be a port number, got '{port}'"))
            })?;
        }

        Ok(())
    }

    pub fn content_root(&self, base: &Path) -> PathBuf {
        base.join(&self.content_dir)
    }
}

fn get_config_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(".jp-courses"))
        .ok_or(CourseError::HomeDirectoryNotFound)
}

fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = InstallerConfig::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, InstallerConfig::default());
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "port": 8080 }"#).unwrap();

        let config = InstallerConfig::load_from(&path).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.content_dir, "content");
        assert_eq!(config.verify_url, DEFAULT_VERIFY_URL);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (VERIFY_URL_ENV, "http://localhost:9999/verify"),
            (PORT_ENV, "4000"),
        ]
        .into_iter()
        .collect();

        let mut config = InstallerConfig::default();
        config
            .apply_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.verify_url, "http://localhost:9999/verify");
        assert_eq!(config.port, 4000);
    }

    #[test]
    fn test_bad_port_override() {
        let mut config = InstallerConfig::default();
        let result = config.apply_overrides(|key| (key == PORT_ENV).then(|| "nope".to_string()));
        assert!(matches!(result, Err(CourseError::ConfigError { .. })));
    }
}
