//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from an optional TOML file; venue credentials and
//! the target base URL come from the environment (`.env` is honored by the
//! binary through `dotenvy`).
//!
//! # Example
//!
//! ```no_run
//! use marketsync::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging(0);
//!     Ok(())
//! }
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use url::Url;

use super::logging::LoggingConfig;
use super::venue::{Credentials, HttpConfig, SourceVenueConfig, TargetVenueConfig};
use crate::error::{ConfigError, Result};

/// Default config file looked up when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

pub const ENV_TARGET_BASE_URL: &str = "OPENDAX_BASE_URL";
pub const ENV_TARGET_API_KEY: &str = "OPENDAX_API_KEY";
pub const ENV_TARGET_API_SECRET: &str = "OPENDAX_API_SECRET";
pub const ENV_SOURCE_API_KEY: &str = "BINANCE_API_KEY";
pub const ENV_SOURCE_SECRET: &str = "BINANCE_SECRET";

/// Reconciliation pass settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ReconcileConfig {
    /// Maximum number of markets planned at once.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    /// File receiving the names of markets updated in auto mode.
    #[serde(default = "default_output_file")]
    pub output_file: PathBuf,
}

const fn default_concurrency() -> usize {
    8
}

fn default_output_file() -> PathBuf {
    PathBuf::from("updated-markets.txt")
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            output_file: default_output_file(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Source venue (exchange) connection.
    #[serde(default)]
    pub source: SourceVenueConfig,

    /// Target venue (trading platform) connection.
    #[serde(default)]
    pub target: TargetVenueConfig,

    /// Market pass settings.
    #[serde(default)]
    pub reconcile: ReconcileConfig,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Parse configuration from TOML content, applying overrides from the
    /// process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        Self::parse_toml_with_env(content, |key| std::env::var(key).ok())
    }

    /// Parse configuration from TOML content with an explicit environment
    /// lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml_with_env<F>(content: &str, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_env(env);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML content is
    /// malformed, or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load configuration, treating a missing file as empty.
    ///
    /// An explicitly requested file must exist. The implicit default path may
    /// be absent, in which case defaults plus environment overrides apply.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit file is missing, or on parse and
    /// validation failures.
    #[allow(clippy::result_large_err)]
    pub fn load_or_default<P: AsRef<Path>>(path: P, explicit: bool) -> Result<Self> {
        let path = path.as_ref();
        if !explicit && !path.exists() {
            return Self::parse_toml("");
        }
        Self::load(path)
    }

    /// Overlay environment values. Credentials only ever come from here.
    fn apply_env<F>(&mut self, env: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = non_empty(ENV_TARGET_BASE_URL) {
            self.target.base_url = url;
        }
        self.target.credentials = Credentials {
            api_key: non_empty(ENV_TARGET_API_KEY),
            secret: non_empty(ENV_TARGET_API_SECRET),
        };
        self.source.credentials = Credentials {
            api_key: non_empty(ENV_SOURCE_API_KEY),
            secret: non_empty(ENV_SOURCE_SECRET),
        };
    }

    /// Validate configuration values.
    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        if self.target.base_url.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "target.base_url",
            }
            .into());
        }
        validate_url("target.base_url", &self.target.base_url)?;

        if self.source.base_url.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "source.base_url",
            }
            .into());
        }
        validate_url("source.base_url", &self.source.base_url)?;

        validate_http("source.http", &self.source.http)?;
        validate_http("target.http", &self.target.http)?;

        if self.reconcile.concurrency == 0 {
            return Err(ConfigError::InvalidValue {
                field: "reconcile.concurrency",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.reconcile.output_file.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "reconcile.output_file",
                reason: "must not be empty".to_string(),
            }
            .into());
        }
        self.logging.validate()?;
        Ok(())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self, verbose: u8) {
        self.logging.init(verbose);
    }
}

#[allow(clippy::result_large_err)]
fn validate_url(field: &'static str, raw: &str) -> Result<()> {
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidValue {
        field,
        reason: e.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidValue {
            field,
            reason: format!("unsupported scheme '{}'", url.scheme()),
        }
        .into());
    }
    Ok(())
}

#[allow(clippy::result_large_err)]
fn validate_http(field: &'static str, http: &HttpConfig) -> Result<()> {
    if http.timeout_ms == 0 || http.connect_timeout_ms == 0 {
        return Err(ConfigError::InvalidValue {
            field,
            reason: "timeouts must be greater than 0".to_string(),
        }
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn with_target() -> impl Fn(&str) -> Option<String> {
        env(&[(ENV_TARGET_BASE_URL, "https://opendax.example")])
    }

    #[test]
    fn empty_file_with_target_url_uses_defaults() {
        let config = Config::parse_toml_with_env("", with_target()).unwrap();

        assert_eq!(config.source.base_url, "https://api.binance.com");
        assert_eq!(config.target.base_url, "https://opendax.example");
        assert_eq!(config.reconcile.concurrency, 8);
        assert_eq!(
            config.reconcile.output_file,
            PathBuf::from("updated-markets.txt")
        );
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.source.http.timeout_ms, 10_000);
    }

    #[test]
    fn missing_target_url_is_rejected() {
        let err = Config::parse_toml_with_env("", env(&[])).unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::MissingField {
                field: "target.base_url"
            })
        ));
    }

    #[test]
    fn environment_overrides_file_url() {
        let toml = r#"
            [target]
            base_url = "https://from-file.example"
        "#;
        let config = Config::parse_toml_with_env(toml, with_target()).unwrap();
        assert_eq!(config.target.base_url, "https://opendax.example");

        let config = Config::parse_toml_with_env(toml, env(&[])).unwrap();
        assert_eq!(config.target.base_url, "https://from-file.example");
    }

    #[test]
    fn credentials_come_from_environment() {
        let config = Config::parse_toml_with_env(
            "",
            env(&[
                (ENV_TARGET_BASE_URL, "https://opendax.example"),
                (ENV_TARGET_API_KEY, "tk"),
                (ENV_TARGET_API_SECRET, "ts"),
                (ENV_SOURCE_API_KEY, "bk"),
                (ENV_SOURCE_SECRET, "  "),
            ]),
        )
        .unwrap();

        assert!(config.target.credentials.is_complete());
        assert_eq!(config.source.credentials.api_key.as_deref(), Some("bk"));
        assert_eq!(config.source.credentials.secret, None);
    }

    #[test]
    fn credentials_in_file_are_ignored() {
        let toml = r#"
            [source]
            credentials = { api_key = "leak", secret = "leak" }
        "#;
        let config = Config::parse_toml_with_env(toml, with_target()).unwrap();
        assert_eq!(config.source.credentials, Credentials::default());
    }

    #[test]
    fn invalid_values_are_rejected() {
        let cases = [
            ("[reconcile]\nconcurrency = 0", "reconcile.concurrency"),
            ("[reconcile]\noutput_file = \"\"", "reconcile.output_file"),
            ("[source.http]\ntimeout_ms = 0", "source.http"),
            ("[target.http]\nconnect_timeout_ms = 0", "target.http"),
            ("[source]\nbase_url = \"not a url\"", "source.base_url"),
            ("[source]\nbase_url = \"ftp://api.example\"", "source.base_url"),
        ];
        for (toml, expected) in cases {
            let err = Config::parse_toml_with_env(toml, with_target()).unwrap_err();
            match err {
                Error::Config(ConfigError::InvalidValue { field, .. }) => {
                    assert_eq!(field, expected, "for {toml:?}");
                }
                other => panic!("unexpected error for {toml:?}: {other}"),
            }
        }
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = Config::parse_toml_with_env("[reconcile", with_target()).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::Parse(_))));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let err = Config::load_or_default("/nonexistent/marketsync.toml", true).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::ReadFile(_))));
    }
}
