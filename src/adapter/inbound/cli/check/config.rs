use std::path::Path;

use serde_json::json;

use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::infrastructure::config::{Config, Credentials};

/// Report the effective configuration without contacting any venue.
pub fn execute(config: &Config, path: &Path, loaded_from_file: bool) -> Result<()> {
    let source = if loaded_from_file {
        path.display().to_string()
    } else {
        "defaults + environment".to_string()
    };

    if output::is_json() {
        output::event(
            "config",
            json!({
                "path": source,
                "source_url": config.source.base_url,
                "target_url": config.target.base_url,
                "concurrency": config.reconcile.concurrency,
                "output_file": config.reconcile.output_file.display().to_string(),
                "source_credentials": config.source.credentials.is_complete(),
                "target_credentials": config.target.credentials.is_complete(),
            }),
        );
        return Ok(());
    }

    output::section("Configuration Check");
    output::field("Config", source);
    output::success("Configuration is valid");

    output::section("Summary");
    output::field("Source", &config.source.base_url);
    output::field("Target", &config.target.base_url);
    output::field("Concurrency", config.reconcile.concurrency);
    output::field("Output file", config.reconcile.output_file.display());
    output::field("Log level", &config.logging.level);

    report_credentials(
        "Binance",
        &config.source.credentials,
        "BINANCE_API_KEY / BINANCE_SECRET (prompted for by `fees`)",
    );
    report_credentials(
        "OpenDAX",
        &config.target.credentials,
        "OPENDAX_API_KEY / OPENDAX_API_SECRET (required to update markets)",
    );

    output::success("Configuration check complete");
    Ok(())
}

fn report_credentials(venue: &str, credentials: &Credentials, missing: &str) {
    if credentials.is_complete() {
        output::success(&format!("{venue} credentials detected"));
    } else {
        output::warning(&format!("{venue} credentials not configured: {missing}"));
    }
}
