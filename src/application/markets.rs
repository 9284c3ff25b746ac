//! Market reconciliation pass.
//!
//! For every market on the target venue, derive the parameters it should
//! have from the matching source instrument and its current price, and
//! update the ones that drifted.
//!
//! Planning (price fetch + derivation) runs concurrently up to a bound.
//! Approval and writes run one market at a time, in target-venue order.

use futures_util::stream::{self, StreamExt};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::domain::{
    index_by_symbol, min_trade_amount, normalize, Instrument, MarketConfig, ReconcileError,
    UpdateMarketRequest,
};
use crate::error::Result;
use crate::port::outbound::approval::MarketApproval;
use crate::port::outbound::report::UpdateReport;
use crate::port::outbound::venue::{SourceVenue, TargetVenue};

/// Derive the target-venue parameters for `instrument` at `price`.
///
/// # Errors
///
/// Propagates constraint and arithmetic failures, and rejects a zero
/// minimum amount.
pub fn propose_market(
    instrument: &Instrument,
    price: Decimal,
) -> std::result::Result<MarketConfig, ReconcileError> {
    let raw = min_trade_amount(instrument, price)?;
    if raw.is_zero() {
        return Err(ReconcileError::ZeroMinAmount {
            symbol: instrument.symbol().to_string(),
        });
    }
    normalize(instrument, raw)
}

/// Result of planning one market, before any write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarketPlan {
    InSync {
        current: MarketConfig,
    },
    Drifted {
        current: MarketConfig,
        proposed: MarketConfig,
    },
    MissingAtSource {
        current: MarketConfig,
    },
    Failed {
        current: MarketConfig,
        reason: String,
    },
}

/// Final outcome for one target market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MarketOutcome {
    InSync {
        symbol: String,
    },
    Updated {
        symbol: String,
        previous: MarketConfig,
        applied: MarketConfig,
    },
    Declined {
        symbol: String,
        current: MarketConfig,
        proposed: MarketConfig,
    },
    MissingAtSource {
        symbol: String,
        source_symbol: String,
    },
    Failed {
        symbol: String,
        reason: String,
    },
}

impl MarketOutcome {
    #[must_use]
    pub fn symbol(&self) -> &str {
        match self {
            Self::InSync { symbol }
            | Self::Updated { symbol, .. }
            | Self::Declined { symbol, .. }
            | Self::MissingAtSource { symbol, .. }
            | Self::Failed { symbol, .. } => symbol,
        }
    }

    #[must_use]
    pub const fn is_updated(&self) -> bool {
        matches!(self, Self::Updated { .. })
    }
}

/// Result of the post-update steps of an automatic pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Epilogue {
    /// Names of the updated markets, as reported by the target venue.
    pub updated: Vec<String>,
    pub report_error: Option<String>,
    pub restart_error: Option<String>,
}

/// Everything a market pass produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MarketPassReport {
    /// One entry per target market, in target-venue order.
    pub outcomes: Vec<MarketOutcome>,
    /// Present when an automatic pass updated at least one market.
    pub epilogue: Option<Epilogue>,
}

impl MarketPassReport {
    /// Number of outcomes matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&MarketOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| predicate(o)).count()
    }
}

/// The market pass, wired to its ports.
pub struct MarketPass<'a> {
    source: &'a dyn SourceVenue,
    target: &'a dyn TargetVenue,
    approval: &'a dyn MarketApproval,
    report: &'a dyn UpdateReport,
    concurrency: usize,
}

impl<'a> MarketPass<'a> {
    pub fn new(
        source: &'a dyn SourceVenue,
        target: &'a dyn TargetVenue,
        approval: &'a dyn MarketApproval,
        report: &'a dyn UpdateReport,
    ) -> Self {
        Self {
            source,
            target,
            approval,
            report,
            concurrency: 1,
        }
    }

    /// Maximum number of markets planned at once. Zero is treated as one.
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Run the pass.
    ///
    /// # Errors
    ///
    /// Fails only when either venue's listing cannot be fetched or the
    /// approver fails. Per-market problems become [`MarketOutcome::Failed`].
    pub async fn run(&self) -> Result<MarketPassReport> {
        let (instruments, markets) =
            tokio::try_join!(self.source.instruments(), self.target.markets())?;
        debug!(
            instruments = instruments.len(),
            markets = markets.len(),
            "Fetched listings"
        );

        let plans = self.plan_all(&instruments, markets).await;

        let mut outcomes = Vec::with_capacity(plans.len());
        for plan in plans {
            outcomes.push(self.settle(plan).await?);
        }

        let epilogue = self.epilogue(&outcomes).await;
        Ok(MarketPassReport { outcomes, epilogue })
    }

    /// Plan every market concurrently, returning plans in input order.
    pub async fn plan_all(
        &self,
        instruments: &[Instrument],
        markets: Vec<MarketConfig>,
    ) -> Vec<MarketPlan> {
        let index = index_by_symbol(instruments);
        let index = &index;

        let mut plans: Vec<(usize, MarketPlan)> = stream::iter(markets.into_iter().enumerate())
            .map(move |(position, current)| async move {
                let instrument = index.get(current.source_symbol().as_str()).copied();
                (position, self.plan(current, instrument).await)
            })
            .buffer_unordered(self.concurrency)
            .collect()
            .await;

        plans.sort_by_key(|(position, _)| *position);
        plans.into_iter().map(|(_, plan)| plan).collect()
    }

    async fn plan(&self, current: MarketConfig, instrument: Option<&Instrument>) -> MarketPlan {
        let Some(instrument) = instrument else {
            return MarketPlan::MissingAtSource { current };
        };

        let duplicates = instrument.duplicate_tags();
        if !duplicates.is_empty() {
            warn!(
                symbol = instrument.symbol(),
                tags = ?duplicates,
                "Instrument repeats constraint tags, using first occurrence"
            );
        }

        let price = match self.source.ticker_price(instrument.symbol()).await {
            Ok(price) => price,
            Err(err) => {
                return MarketPlan::Failed {
                    current,
                    reason: format!("ticker price fetch failed: {err}"),
                }
            }
        };

        match propose_market(instrument, price) {
            Ok(proposed) if current.is_equivalent(&proposed) => MarketPlan::InSync { current },
            Ok(proposed) => MarketPlan::Drifted { current, proposed },
            Err(err) => MarketPlan::Failed {
                current,
                reason: err.to_string(),
            },
        }
    }

    async fn settle(&self, plan: MarketPlan) -> Result<MarketOutcome> {
        let outcome = match plan {
            MarketPlan::InSync { current } => {
                debug!(symbol = current.symbol(), "Market in sync");
                MarketOutcome::InSync {
                    symbol: current.symbol().to_string(),
                }
            }
            MarketPlan::MissingAtSource { current } => {
                warn!(
                    symbol = current.symbol(),
                    venue = self.source.venue_name(),
                    "Market is missing at source"
                );
                MarketOutcome::MissingAtSource {
                    symbol: current.symbol().to_string(),
                    source_symbol: current.source_symbol(),
                }
            }
            MarketPlan::Failed { current, reason } => {
                warn!(symbol = current.symbol(), error = %reason, "Skipping market");
                MarketOutcome::Failed {
                    symbol: current.symbol().to_string(),
                    reason,
                }
            }
            MarketPlan::Drifted { current, proposed } => {
                if !self.approval.approve(&current, &proposed).await? {
                    info!(symbol = current.symbol(), "Update declined");
                    return Ok(MarketOutcome::Declined {
                        symbol: current.symbol().to_string(),
                        current,
                        proposed,
                    });
                }
                self.apply(current, &proposed).await
            }
        };
        Ok(outcome)
    }

    async fn apply(&self, current: MarketConfig, proposed: &MarketConfig) -> MarketOutcome {
        let symbol = current.symbol().to_string();
        let request = UpdateMarketRequest::new(symbol.clone(), proposed);
        match self.target.update_market(&request).await {
            Ok(applied) => {
                info!(
                    symbol = %symbol,
                    min_amount = %applied.min_amount(),
                    amount_precision = applied.amount_precision(),
                    price_precision = applied.price_precision(),
                    "Market updated"
                );
                MarketOutcome::Updated {
                    symbol,
                    previous: current,
                    applied,
                }
            }
            Err(err) => {
                warn!(
                    symbol = %symbol,
                    venue = self.target.venue_name(),
                    error = %err,
                    "Market update failed"
                );
                MarketOutcome::Failed {
                    symbol,
                    reason: format!("update failed: {err}"),
                }
            }
        }
    }

    async fn epilogue(&self, outcomes: &[MarketOutcome]) -> Option<Epilogue> {
        if !self.approval.is_automatic() {
            return None;
        }
        let updated: Vec<String> = outcomes
            .iter()
            .filter_map(|outcome| match outcome {
                MarketOutcome::Updated { applied, .. } => Some(applied.name().to_string()),
                _ => None,
            })
            .collect();
        if updated.is_empty() {
            return None;
        }

        let report_error = self.report.write(&updated).err().map(|err| {
            warn!(error = %err, updated = ?updated, "Failed to save updated markets");
            err.to_string()
        });
        let restart_error = self.target.request_restart().await.err().map(|err| {
            warn!(
                venue = self.target.venue_name(),
                error = %err,
                "Failed to request matching engine restart"
            );
            err.to_string()
        });

        Some(Epilogue {
            updated,
            report_error,
            restart_error,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::instrument::{
        Constraint, LotSizeConstraint, NotionalConstraint, PriceConstraint,
    };
    use rust_decimal_macros::dec;

    fn ethusdt(min_notional: Decimal) -> Instrument {
        Instrument::new(
            "ETHUSDT",
            "ETH",
            "USDT",
            8,
            vec![
                Constraint::Price(PriceConstraint {
                    min_price: dec!(0.01),
                    max_price: dec!(1000000),
                    tick_size: dec!(0.01),
                }),
                Constraint::LotSize(LotSizeConstraint {
                    min_quantity: dec!(0.0001),
                }),
                Constraint::MinNotional(NotionalConstraint { min_notional }),
            ],
        )
    }

    #[test]
    fn proposes_rounded_amount_and_precisions() {
        let proposed = propose_market(&ethusdt(dec!(10)), dec!(3500)).unwrap();

        assert_eq!(proposed.symbol(), "ethusdt");
        assert_eq!(proposed.name(), "ETH/USDT");
        assert_eq!(proposed.min_amount().to_string(), "0.0030");
        assert_eq!(proposed.amount_precision(), 4);
        assert_eq!(proposed.price_precision(), 2);
        assert_eq!(proposed.max_price().to_string(), "0.00");
    }

    #[test]
    fn zero_notional_is_rejected_before_clamping() {
        let err = propose_market(&ethusdt(dec!(0)), dec!(3500)).unwrap_err();
        assert_eq!(
            err,
            ReconcileError::ZeroMinAmount {
                symbol: "ETHUSDT".into()
            }
        );
    }

    #[test]
    fn outcome_serializes_with_tag() {
        let outcome = MarketOutcome::MissingAtSource {
            symbol: "dogeusdt".into(),
            source_symbol: "DOGEUSDT".into(),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["outcome"], "missing_at_source");
        assert_eq!(json["source_symbol"], "DOGEUSDT");
        assert_eq!(outcome.symbol(), "dogeusdt");
        assert!(!outcome.is_updated());
    }
}
