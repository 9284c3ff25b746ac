//! `marketsync fees`: withdrawal-fee compliance audit.

use std::io::IsTerminal;

use serde_json::json;
use tabled::{Table, Tabled};

use super::output;
use super::prompt::fill_credentials;
use crate::adapter::outbound::binance::BinanceClient;
use crate::adapter::outbound::opendax::OpendaxClient;
use crate::application::fees::run_fee_pass;
use crate::domain::{ComplianceReport, CurrencyCompliance};
use crate::error::Result;
use crate::infrastructure::config::Config;

#[derive(Tabled)]
struct ComplianceRow {
    #[tabled(rename = "Currency")]
    currency: String,
    #[tabled(rename = "Network")]
    network: String,
    #[tabled(rename = "Min withdraw")]
    target_min_withdraw: String,
    #[tabled(rename = "Source min")]
    source_min_withdraw: String,
    #[tabled(rename = "Min check")]
    min_withdraw: String,
    #[tabled(rename = "Fee")]
    target_withdraw_fee: String,
    #[tabled(rename = "Source fee")]
    source_withdraw_fee: String,
    #[tabled(rename = "Fee check")]
    withdraw_fee: String,
}

impl From<&ComplianceReport> for ComplianceRow {
    fn from(report: &ComplianceReport) -> Self {
        Self {
            currency: report.currency.clone(),
            network: report.network.clone(),
            target_min_withdraw: report.target_min_withdraw.to_string(),
            source_min_withdraw: report.source_min_withdraw.to_string(),
            min_withdraw: output::pass_fail(report.min_withdraw_ok),
            target_withdraw_fee: report.target_withdraw_fee.to_string(),
            source_withdraw_fee: report.source_withdraw_fee.to_string(),
            withdraw_fee: output::pass_fail(report.withdraw_fee_ok),
        }
    }
}

/// Render compliance reports as a table.
#[must_use]
pub fn render_table(results: &[CurrencyCompliance]) -> String {
    let rows: Vec<ComplianceRow> = results
        .iter()
        .filter_map(|result| match result {
            CurrencyCompliance::Checked { reports, .. } => Some(reports),
            CurrencyCompliance::AbsentAtSource { .. } => None,
        })
        .flatten()
        .map(ComplianceRow::from)
        .collect();
    Table::new(rows).to_string()
}

/// Run the fee audit against the configured venues.
pub async fn execute(config: &Config) -> Result<()> {
    output::header(env!("CARGO_PKG_VERSION"));

    let mut source_config = config.source.clone();
    if !source_config.credentials.is_complete() {
        if std::io::stdin().is_terminal() {
            fill_credentials("Binance", &mut source_config.credentials)?;
        } else {
            output::warning("Binance credentials incomplete; the coin listing will be rejected");
            output::hint("export BINANCE_API_KEY and BINANCE_SECRET, or run from a terminal");
        }
    }

    let source = BinanceClient::from_config(&source_config);
    let target = OpendaxClient::from_config(&config.target);

    let spinner = output::spinner("Comparing withdrawal fees...");
    let results = match run_fee_pass(&source, &target).await {
        Ok(results) => {
            output::spinner_success(&spinner, "Fees compared");
            results
        }
        Err(err) => {
            output::spinner_fail(&spinner, "Fee comparison failed");
            return Err(err);
        }
    };

    render(&results)
}

fn render(results: &[CurrencyCompliance]) -> Result<()> {
    for result in results {
        output::event("currency", serde_json::to_value(result)?);
    }

    output::section("Withdrawal fees");
    output::lines(&render_table(results));

    let absent: Vec<&str> = results
        .iter()
        .filter(|r| matches!(r, CurrencyCompliance::AbsentAtSource { .. }))
        .map(CurrencyCompliance::code)
        .collect();
    if !absent.is_empty() && !output::is_json() {
        output::warning(&format!("Missing at source: {}", absent.join(", ")));
    }

    let failing = results
        .iter()
        .filter_map(|result| match result {
            CurrencyCompliance::Checked { reports, .. } => Some(reports),
            CurrencyCompliance::AbsentAtSource { .. } => None,
        })
        .flatten()
        .filter(|report| !report.is_compliant())
        .count();

    output::event(
        "summary",
        json!({
            "currencies": results.len(),
            "absent": absent.len(),
            "failing_networks": failing,
        }),
    );
    output::section("Summary");
    output::field("Currencies", results.len());
    output::field("Missing at source", absent.len());
    output::field("Failing networks", failing);
    Ok(())
}
