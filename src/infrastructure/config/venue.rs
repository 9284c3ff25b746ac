//! Venue connection settings.

use std::fmt;

use serde::Deserialize;

/// Default REST endpoint of the source venue.
pub const DEFAULT_SOURCE_URL: &str = "https://api.binance.com";

/// HTTP client configuration shared by both venues.
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in milliseconds.
    #[serde(default = "default_http_timeout_ms")]
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds.
    #[serde(default = "default_http_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

const fn default_http_timeout_ms() -> u64 {
    10_000
}

const fn default_http_connect_timeout_ms() -> u64 {
    3_000
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_http_timeout_ms(),
            connect_timeout_ms: default_http_connect_timeout_ms(),
        }
    }
}

/// API credentials. Loaded from the environment or prompted for, never
/// read from the config file.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: Option<String>,
    pub secret: Option<String>,
}

impl Credentials {
    /// True when both the key and the secret are present and non-empty.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.is_empty());
        present(&self.api_key) && present(&self.secret)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "<redacted>");
        f.debug_struct("Credentials")
            .field("api_key", &redact(&self.api_key))
            .field("secret", &redact(&self.secret))
            .finish()
    }
}

/// Source venue (exchange) settings.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceVenueConfig {
    #[serde(default = "default_source_url")]
    pub base_url: String,
    #[serde(default)]
    pub http: HttpConfig,
    /// From `BINANCE_API_KEY` / `BINANCE_SECRET`.
    #[serde(skip)]
    pub credentials: Credentials,
}

fn default_source_url() -> String {
    DEFAULT_SOURCE_URL.to_string()
}

impl Default for SourceVenueConfig {
    fn default() -> Self {
        Self {
            base_url: default_source_url(),
            http: HttpConfig::default(),
            credentials: Credentials::default(),
        }
    }
}

/// Target venue (trading platform) settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TargetVenueConfig {
    /// Platform base URL; `OPENDAX_BASE_URL` overrides it.
    #[serde(default)]
    pub base_url: String,
    #[serde(default)]
    pub http: HttpConfig,
    /// From `OPENDAX_API_KEY` / `OPENDAX_API_SECRET`.
    #[serde(skip)]
    pub credentials: Credentials,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_need_both_parts() {
        let mut credentials = Credentials::default();
        assert!(!credentials.is_complete());

        credentials.api_key = Some("key".into());
        assert!(!credentials.is_complete());

        credentials.secret = Some(String::new());
        assert!(!credentials.is_complete());

        credentials.secret = Some("secret".into());
        assert!(credentials.is_complete());
    }

    #[test]
    fn credentials_debug_output_is_redacted() {
        let credentials = Credentials {
            api_key: Some("tr13dt0".into()),
            secret: None,
        };
        let rendered = format!("{credentials:?}");
        assert!(!rendered.contains("tr13dt0"));
        assert!(rendered.contains("<redacted>"));
    }
}
