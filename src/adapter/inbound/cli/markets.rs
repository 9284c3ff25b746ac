//! `marketsync markets`: reconcile market parameters.

use serde_json::json;
use tabled::{Table, Tabled};

use super::command::MarketsArgs;
use super::output;
use super::prompt::PromptApproval;
use crate::adapter::outbound::binance::BinanceClient;
use crate::adapter::outbound::opendax::OpendaxClient;
use crate::adapter::outbound::report::FileReport;
use crate::application::markets::{MarketOutcome, MarketPass, MarketPassReport};
use crate::domain::MarketConfig;
use crate::error::Result;
use crate::infrastructure::config::Config;
use crate::port::outbound::approval::{AutoApprove, MarketApproval};

#[derive(Tabled)]
struct DiffRow {
    #[tabled(rename = "Field")]
    field: &'static str,
    #[tabled(rename = "Current")]
    current: String,
    #[tabled(rename = "Proposed")]
    proposed: String,
}

/// Current and proposed parameters side by side.
#[must_use]
pub fn render_diff(current: &MarketConfig, proposed: &MarketConfig) -> String {
    let row = |field: &'static str, current: String, proposed: String| {
        let proposed = if current == proposed {
            proposed
        } else {
            output::highlight(proposed)
        };
        DiffRow {
            field,
            current,
            proposed,
        }
    };
    let rows = vec![
        row(
            "min_price",
            current.min_price().to_string(),
            proposed.min_price().to_string(),
        ),
        row(
            "max_price",
            current.max_price().to_string(),
            proposed.max_price().to_string(),
        ),
        row(
            "min_amount",
            current.min_amount().to_string(),
            proposed.min_amount().to_string(),
        ),
        row(
            "amount_precision",
            current.amount_precision().to_string(),
            proposed.amount_precision().to_string(),
        ),
        row(
            "price_precision",
            current.price_precision().to_string(),
            proposed.price_precision().to_string(),
        ),
    ];
    Table::new(rows).to_string()
}

/// Run the market pass against the configured venues.
pub async fn execute(config: &Config, args: &MarketsArgs) -> Result<()> {
    output::header(env!("CARGO_PKG_VERSION"));

    if !config.target.credentials.is_complete() {
        output::warning("OpenDAX credentials incomplete; updates will be rejected");
        output::hint("export OPENDAX_API_KEY and OPENDAX_API_SECRET to sign admin requests");
    }

    let source = BinanceClient::from_config(&config.source);
    let target = OpendaxClient::from_config(&config.target);
    let report = FileReport::new(
        args.output
            .clone()
            .unwrap_or_else(|| config.reconcile.output_file.clone()),
    );
    let approval: Box<dyn MarketApproval> = if args.auto {
        Box::new(AutoApprove)
    } else {
        Box::new(PromptApproval)
    };

    let pass = MarketPass::new(&source, &target, approval.as_ref(), &report)
        .with_concurrency(config.reconcile.concurrency);

    let result = if args.auto {
        let spinner = output::spinner("Reconciling markets...");
        match pass.run().await {
            Ok(result) => {
                output::spinner_success(&spinner, "Markets reconciled");
                result
            }
            Err(err) => {
                output::spinner_fail(&spinner, "Market reconciliation failed");
                return Err(err);
            }
        }
    } else {
        pass.run().await?
    };

    render(&result, &report)
}

fn render(result: &MarketPassReport, report: &FileReport) -> Result<()> {
    output::section("Markets");
    for outcome in &result.outcomes {
        output::event("market", serde_json::to_value(outcome)?);
        render_outcome(outcome);
    }

    if let Some(epilogue) = &result.epilogue {
        output::event("epilogue", serde_json::to_value(epilogue)?);
        match &epilogue.report_error {
            None => output::success(&format!(
                "Wrote {} updated market(s) to {}",
                epilogue.updated.len(),
                report.path().display()
            )),
            Some(err) => output::warning(&format!(
                "Could not save updated markets ({err}): {}",
                epilogue.updated.join(", ")
            )),
        }
        match &epilogue.restart_error {
            None => output::success("Matching engine restart requested"),
            Some(err) => output::warning(&format!("Matching engine restart failed: {err}")),
        }
    }

    let updated = result.count(MarketOutcome::is_updated);
    let failed = result.count(|o| matches!(o, MarketOutcome::Failed { .. }));
    output::event(
        "summary",
        json!({
            "total": result.outcomes.len(),
            "updated": updated,
            "failed": failed,
        }),
    );
    output::section("Summary");
    output::field("Target markets", result.outcomes.len());
    output::field("Updated", updated);
    output::field("Failed", failed);
    Ok(())
}

fn render_outcome(outcome: &MarketOutcome) {
    if output::is_json() {
        return;
    }
    match outcome {
        MarketOutcome::InSync { symbol } => {
            output::note(&format!("{symbol}: in sync"));
        }
        MarketOutcome::Updated {
            symbol, applied, ..
        } => output::success(&format!(
            "{symbol}: updated (min_amount {}, amount_precision {}, price_precision {})",
            applied.min_amount(),
            applied.amount_precision(),
            applied.price_precision()
        )),
        MarketOutcome::Declined { symbol, .. } => {
            output::note(&format!("{symbol}: update declined"));
        }
        MarketOutcome::MissingAtSource {
            symbol,
            source_symbol,
        } => output::warning(&format!("{symbol}: {source_symbol} is missing at source")),
        MarketOutcome::Failed { symbol, reason } => {
            output::warning(&format!("{symbol}: {reason}"));
        }
    }
}
