//! Logging configuration and initialization.

use serde::Deserialize;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::ConfigError;

/// Accepted values of `logging.format`.
pub const FORMATS: [&str; 2] = ["pretty", "json"];

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_level() -> String {
    "warn".into()
}

fn default_format() -> String {
    "pretty".into()
}

impl LoggingConfig {
    /// Reject formats other than [`FORMATS`] and levels that are not valid
    /// filter directives.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !FORMATS.contains(&self.format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "logging.format",
                reason: format!(
                    "unknown format '{}', expected one of {}",
                    self.format,
                    FORMATS.join(", ")
                ),
            });
        }
        let invalid_level = |reason: String| ConfigError::InvalidValue {
            field: "logging.level",
            reason,
        };
        if self.level.trim().is_empty() {
            return Err(invalid_level("must not be empty".to_string()));
        }
        // A bare word would otherwise be taken as a target name.
        for part in self.level.split(',').filter(|p| !p.trim().is_empty() && !p.contains('=')) {
            part.trim()
                .parse::<LevelFilter>()
                .map_err(|_| invalid_level(format!("unknown level '{}'", part.trim())))?;
        }
        EnvFilter::try_new(&self.level).map_err(|err| invalid_level(err.to_string()))?;
        Ok(())
    }

    /// Filter directive for the given `-v` count.
    ///
    /// Each `-v` raises the configured level by one step.
    #[must_use]
    pub fn directive(&self, verbose: u8) -> String {
        const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

        if verbose == 0 {
            return self.level.clone();
        }
        let base = LEVELS
            .iter()
            .position(|l| l.eq_ignore_ascii_case(&self.level))
            .unwrap_or(1);
        let index = (base + usize::from(verbose)).min(LEVELS.len() - 1);
        LEVELS[index].to_string()
    }

    /// Initialize the tracing subscriber.
    ///
    /// `RUST_LOG` wins over the configured level. Logs go to stderr so that
    /// command output on stdout stays machine-readable.
    pub fn init(&self, verbose: u8) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.directive(verbose)));

        // A subscriber may already be installed (tests, embedding); keep it.
        // The format was validated on load.
        let _ = match self.format.as_str() {
            "json" => fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init(),
            _ => fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init(),
        };
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
        }
    }
}
