//! Canonical test configuration.

use crate::infrastructure::config::Config;

/// Target URL used by test configurations.
pub const TARGET_URL: &str = "https://opendax.test";

/// Defaults plus a target URL, independent of the process environment.
pub fn config() -> Config {
    config_from_toml("")
}

/// Parse `toml` with only the target URL set in the environment.
///
/// # Panics
///
/// Panics if the content does not produce a valid configuration.
pub fn config_from_toml(toml: &str) -> Config {
    Config::parse_toml_with_env(toml, |key| {
        (key == "OPENDAX_BASE_URL").then(|| TARGET_URL.to_string())
    })
    .expect("test configuration must be valid")
}
