use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;

pub const DEFAULT_USER_AGENT: &str = concat!("mangadl/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub user_agent: String,
    pub timeout_ms: u64,
    /// Built-in services to register, in dispatch order. `None` registers all of them.
    pub services: Option<Vec<String>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            services: None,
        }
    }
}

impl Config {
    /// Load from `path`, or from the platform config dir when `path` is `None`.
    /// An explicit path must exist; a missing default file yields the defaults.
    /// Environment overrides are applied last.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => match default_config_path() {
                Some(p) if p.exists() => Self::from_file(&p)?,
                _ => Self::default(),
            },
        };
        config.apply_env();
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("invalid config: {}", path.display()))
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// `MANGADL_USER_AGENT` and `MANGADL_TIMEOUT_MS`; unparsable values are ignored.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    pub fn apply_overrides<F>(&mut self, lookup: F)
    where F: Fn(&str) -> Option<String> {
        let ua = lookup("MANGADL_USER_AGENT").map(|s| s.trim().to_string());
        if let Some(ua) = ua.filter(|s| !s.is_empty()) {
            self.user_agent = ua;
        }
        if let Some(ms) = lookup("MANGADL_TIMEOUT_MS").and_then(|s| s.trim().parse().ok()) {
            self.timeout_ms = ms;
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("dev", "mangadl", "mangadl").map(|proj| proj.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let cfg = Config::from_toml("timeout_ms = 500\n").unwrap();
        assert_eq!(cfg.timeout(), Duration::from_millis(500));
        assert_eq!(cfg.user_agent, DEFAULT_USER_AGENT);
        assert!(cfg.services.is_none());
    }

    #[test]
    fn services_list_is_read_in_order() {
        let cfg = Config::from_toml("services = [\"mangapanda\", \"mangareader\"]\n").unwrap();
        assert_eq!(cfg.services.unwrap(), vec!["mangapanda", "mangareader"]);
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(Config::from_file(&tmp.path().join("nope.toml")).is_err());
    }

    #[test]
    fn loads_file_from_disk() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "user_agent = \"test-agent\"\n").unwrap();
        assert_eq!(Config::from_file(&path).unwrap().user_agent, "test-agent");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "timeout_ms = \"soon\"\n").unwrap();
        assert!(Config::from_file(&path).is_err());
    }

    #[test]
    fn overrides_replace_valid_values_only() {
        let mut cfg = Config::default();
        cfg.apply_overrides(|key| match key {
            "MANGADL_USER_AGENT" => Some("agent/2".to_string()),
            "MANGADL_TIMEOUT_MS" => Some("not a number".to_string()),
            _ => None,
        });
        assert_eq!(cfg.user_agent, "agent/2");
        assert_eq!(cfg.timeout_ms, DEFAULT_TIMEOUT_MS);
    }
}
