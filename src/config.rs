//! Client configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honored for local development.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "http://localhost:5001/api";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Client configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend base URL, without trailing slash (e.g. `http://localhost:5001/api`)
    pub base_url: String,
    /// Directory holding the durable local store
    pub data_dir: PathBuf,
    /// Per-request timeout applied to every backend call
    pub request_timeout: Duration,
}

impl Config {
    /// Config for tests: local backend, temp data dir, short timeout.
    pub fn test_default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            data_dir: env::temp_dir().join("meditrack-test"),
            request_timeout: Duration::from_secs(2),
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let base_url = env::var("MEDITRACK_BASE_URL")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        if base_url.is_empty() {
            return Err(ConfigError::Invalid {
                name: "MEDITRACK_BASE_URL",
                reason: "must not be empty".to_string(),
            });
        }

        let data_dir = match env::var("MEDITRACK_DATA_DIR") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => dirs::data_local_dir()
                .or_else(dirs::home_dir)
                .ok_or(ConfigError::Missing("MEDITRACK_DATA_DIR"))?
                .join("meditrack"),
        };

        let timeout_secs = match env::var("MEDITRACK_TIMEOUT_SECS") {
            Ok(raw) => parse_timeout(&raw)?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            base_url,
            data_dir,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Path of the JSON file backing the local store.
    pub fn store_file(&self) -> PathBuf {
        self.data_dir.join("store.json")
    }
}

fn parse_timeout(raw: &str) -> Result<u64, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(ConfigError::Invalid {
            name: "MEDITRACK_TIMEOUT_SECS",
            reason: format!("expected a positive number of seconds, got {:?}", raw),
        }),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        env::set_var("MEDITRACK_BASE_URL", "http://example.test/api/");
        env::set_var("MEDITRACK_DATA_DIR", "/tmp/meditrack-config-test");
        env::set_var("MEDITRACK_TIMEOUT_SECS", "7");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.base_url, "http://example.test/api");
        assert_eq!(config.data_dir, PathBuf::from("/tmp/meditrack-config-test"));
        assert_eq!(config.request_timeout, Duration::from_secs(7));
        assert_eq!(
            config.store_file(),
            PathBuf::from("/tmp/meditrack-config-test/store.json")
        );
    }

    #[test]
    fn test_parse_timeout_rejects_zero_and_garbage() {
        assert!(parse_timeout("0").is_err());
        assert!(parse_timeout("soon").is_err());
        assert_eq!(parse_timeout(" 15 ").unwrap(), 15);
    }
}
