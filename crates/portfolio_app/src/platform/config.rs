use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use portfolio_engine::RelaySettings;
use portfolio_logging::portfolio_info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_CONFIG_FILENAME: &str = "portfolio.ron";
pub const ACCESS_KEY_ENV: &str = "PORTFOLIO_CONTACT_ACCESS_KEY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    pub endpoint: String,
    pub access_key: String,
    pub form_name: String,
    pub subject_prefix: String,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
}

impl Default for RelayConfig {
    fn default() -> Self {
        let settings = RelaySettings::default();
        Self {
            endpoint: settings.endpoint,
            access_key: settings.access_key,
            form_name: settings.form_name,
            subject_prefix: settings.subject_prefix,
            connect_timeout_ms: settings.connect_timeout.as_millis() as u64,
            request_timeout_ms: settings.request_timeout.as_millis() as u64,
        }
    }
}

impl RelayConfig {
    pub fn to_settings(&self) -> RelaySettings {
        RelaySettings {
            endpoint: self.endpoint.clone(),
            access_key: self.access_key.clone(),
            form_name: self.form_name.clone(),
            subject_prefix: self.subject_prefix.clone(),
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            request_timeout: Duration::from_millis(self.request_timeout_ms),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub relay: RelayConfig,
    pub prefs_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            relay: RelayConfig::default(),
            prefs_path: PathBuf::from(".portfolio_prefs.ron"),
        }
    }
}

impl AppConfig {
    /// Loads `path` (or `./portfolio.ron`); a missing file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILENAME));
        let mut config = match fs::read_to_string(&path) {
            Ok(text) => parse(&path, &text)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                portfolio_info!("No config at {:?}; using defaults", path);
                AppConfig::default()
            }
            Err(source) => return Err(ConfigError::Read { path, source }),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = lookup(ACCESS_KEY_ENV).filter(|key| !key.trim().is_empty()) {
            self.relay.access_key = key.trim().to_string();
        }
    }
}

fn parse(path: &Path, text: &str) -> Result<AppConfig, ConfigError> {
    ron::from_str(text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("portfolio.ron");
        fs::write(
            &path,
            r#"(relay: (access_key: "abc", request_timeout_ms: 1500), prefs_path: "prefs.ron")"#,
        )
        .unwrap();

        let mut config = parse(&path, &fs::read_to_string(&path).unwrap()).unwrap();
        config.apply_env(|_| None);

        assert_eq!(config.relay.access_key, "abc");
        assert_eq!(config.prefs_path, PathBuf::from("prefs.ron"));
        let settings = config.relay.to_settings();
        assert_eq!(settings.request_timeout, Duration::from_millis(1500));
        assert_eq!(settings.connect_timeout, Duration::from_secs(10));
        assert_eq!(settings.subject_prefix, "Portfolio Contact: ");
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(Some(&dir.path().join("absent.ron"))).unwrap();
        assert_eq!(config.relay.endpoint, portfolio_engine::DEFAULT_ENDPOINT);
        assert_eq!(config.prefs_path, AppConfig::default().prefs_path);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.ron");
        fs::write(&path, "(relay: (access_key: ").unwrap();

        let err = AppConfig::load(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn env_overrides_access_key_unless_blank() {
        let mut config = AppConfig::default();
        config.apply_env(|key| (key == ACCESS_KEY_ENV).then(|| "  from-env ".to_string()));
        assert_eq!(config.relay.access_key, "from-env");

        config.apply_env(|_| Some("   ".to_string()));
        assert_eq!(config.relay.access_key, "from-env");
    }
}
