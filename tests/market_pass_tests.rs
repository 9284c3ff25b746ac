//! Market reconciliation pass against in-memory venues.

use std::time::Duration;

use marketsync::adapter::outbound::binance::dto::ExchangeInfo;
use marketsync::application::markets::{MarketOutcome, MarketPass};
use marketsync::domain::{Instrument, UpdateMarketRequest};
use marketsync::port::outbound::approval::AutoApprove;
use marketsync::testkit::domain::{
    bnbbtc, btcusdt, ethusdt, lot_size, market, min_notional, notional, price_filter,
};
use marketsync::testkit::operator::{MemoryReport, ScriptedApproval};
use marketsync::testkit::venue::{FakeSourceVenue, FakeTargetVenue};
use rust_decimal_macros::dec;

fn pair(base: &str, quote: &str) -> Instrument {
    Instrument::new(
        format!("{base}{quote}"),
        base,
        quote,
        8,
        vec![
            price_filter(dec!(0.01), dec!(1000000), dec!(0.01)),
            lot_size(dec!(0.001)),
            min_notional(dec!(10)),
        ],
    )
}

#[tokio::test]
async fn in_sync_market_is_left_alone() {
    let source = FakeSourceVenue::new()
        .with_instrument(ethusdt())
        .with_price("ETHUSDT", "3500");
    let target = FakeTargetVenue::new().with_market(market("eth", "usdt", dec!(0.003), 4, 2));
    let report = MemoryReport::new();

    let result = MarketPass::new(&source, &target, &AutoApprove, &report)
        .run()
        .await
        .unwrap();

    assert_eq!(
        result.outcomes,
        vec![MarketOutcome::InSync {
            symbol: "ethusdt".into()
        }]
    );
    assert!(target.updates().is_empty());
    assert!(result.epilogue.is_none());
    assert_eq!(target.restarts(), 0);
    assert_eq!(report.written(), None);
}

#[tokio::test]
async fn auto_mode_updates_drifted_market_and_restarts_engine() {
    let source = FakeSourceVenue::new()
        .with_instrument(btcusdt())
        .with_price("BTCUSDT", "50000");
    let target = FakeTargetVenue::new().with_market(market("btc", "usdt", dec!(0.0001), 5, 2));
    let report = MemoryReport::new();

    let result = MarketPass::new(&source, &target, &AutoApprove, &report)
        .run()
        .await
        .unwrap();

    assert_eq!(
        target.updates(),
        vec![UpdateMarketRequest {
            symbol: "btcusdt".into(),
            min_price: dec!(0.01),
            max_price: dec!(0.00),
            min_amount: dec!(0.00021),
            amount_precision: 5,
            price_precision: 2,
        }]
    );
    let [MarketOutcome::Updated {
        symbol, applied, ..
    }] = result.outcomes.as_slice()
    else {
        panic!("expected a single update, got {:?}", result.outcomes);
    };
    assert_eq!(symbol, "btcusdt");
    assert_eq!(applied.min_amount(), dec!(0.00021));

    let epilogue = result.epilogue.expect("auto pass with updates has an epilogue");
    assert_eq!(epilogue.updated, vec!["BTC/USDT".to_string()]);
    assert_eq!(epilogue.report_error, None);
    assert_eq!(epilogue.restart_error, None);
    assert_eq!(report.written(), Some(vec!["BTC/USDT".to_string()]));
    assert_eq!(target.restarts(), 1);
}

#[tokio::test]
async fn half_step_amount_rounds_away_from_zero() {
    let source = FakeSourceVenue::new()
        .with_instrument(bnbbtc())
        .with_price("BNBBTC", "0.01");
    let target = FakeTargetVenue::new().with_market(market("bnb", "btc", dec!(0.01), 3, 6));
    let report = MemoryReport::new();

    MarketPass::new(&source, &target, &AutoApprove, &report)
        .run()
        .await
        .unwrap();

    let updates = target.updates();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].min_amount.to_string(), "0.011");
    assert_eq!(updates[0].amount_precision, 3);
    assert_eq!(updates[0].price_precision, 6);
}

#[tokio::test]
async fn newer_notional_rule_is_used_when_min_notional_is_absent() {
    let instrument = Instrument::new(
        "SOLUSDT",
        "SOL",
        "USDT",
        8,
        vec![
            price_filter(dec!(0.01), dec!(10000), dec!(0.01)),
            lot_size(dec!(0.001)),
            notional(dec!(5)),
        ],
    );
    let source = FakeSourceVenue::new()
        .with_instrument(instrument)
        .with_price("SOLUSDT", "150");
    let target = FakeTargetVenue::new().with_market(market("sol", "usdt", dec!(0.01), 3, 2));
    let report = MemoryReport::new();

    MarketPass::new(&source, &target, &AutoApprove, &report)
        .run()
        .await
        .unwrap();

    // 1.05 * 5 / 150 = 0.035
    let updates = target.updates();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].min_amount, dec!(0.035));
}

#[tokio::test]
async fn declined_update_is_not_written() {
    let source = FakeSourceVenue::new()
        .with_instrument(btcusdt())
        .with_price("BTCUSDT", "50000");
    let target = FakeTargetVenue::new().with_market(market("btc", "usdt", dec!(0.0001), 5, 2));
    let approval = ScriptedApproval::new([false]);
    let report = MemoryReport::new();

    let result = MarketPass::new(&source, &target, &approval, &report)
        .run()
        .await
        .unwrap();

    assert!(matches!(
        result.outcomes.as_slice(),
        [MarketOutcome::Declined { symbol, .. }] if symbol == "btcusdt"
    ));
    assert_eq!(approval.asked(), vec!["btcusdt".to_string()]);
    assert!(target.updates().is_empty());
    assert!(result.epilogue.is_none());
}

#[tokio::test]
async fn interactive_approval_skips_report_and_restart() {
    let source = FakeSourceVenue::new()
        .with_instrument(btcusdt())
        .with_price("BTCUSDT", "50000");
    let target = FakeTargetVenue::new().with_market(market("btc", "usdt", dec!(0.0001), 5, 2));
    let approval = ScriptedApproval::new([true]);
    let report = MemoryReport::new();

    let result = MarketPass::new(&source, &target, &approval, &report)
        .run()
        .await
        .unwrap();

    assert_eq!(result.count(MarketOutcome::is_updated), 1);
    assert!(result.epilogue.is_none());
    assert_eq!(report.written(), None);
    assert_eq!(target.restarts(), 0);
}

#[tokio::test]
async fn only_drifted_markets_reach_the_approver() {
    let source = FakeSourceVenue::new()
        .with_instrument(ethusdt())
        .with_instrument(btcusdt())
        .with_price("ETHUSDT", "3500")
        .with_price("BTCUSDT", "50000");
    let target = FakeTargetVenue::new()
        .with_market(market("eth", "usdt", dec!(0.003), 4, 2))
        .with_market(market("btc", "usdt", dec!(0.0001), 5, 2));
    let approval = ScriptedApproval::new([true]);
    let report = MemoryReport::new();

    MarketPass::new(&source, &target, &approval, &report)
        .run()
        .await
        .unwrap();

    assert_eq!(approval.asked(), vec!["btcusdt".to_string()]);
}

#[tokio::test]
async fn market_missing_at_source_is_reported_without_price_fetch() {
    let source = FakeSourceVenue::new().with_instrument(ethusdt());
    let target = FakeTargetVenue::new().with_market(market("doge", "usdt", dec!(10), 0, 5));
    let report = MemoryReport::new();

    let result = MarketPass::new(&source, &target, &AutoApprove, &report)
        .run()
        .await
        .unwrap();

    assert_eq!(
        result.outcomes,
        vec![MarketOutcome::MissingAtSource {
            symbol: "dogeusdt".into(),
            source_symbol: "DOGEUSDT".into(),
        }]
    );
    assert_eq!(source.ticker_requests(), 0);
}

#[tokio::test]
async fn price_failures_skip_only_the_affected_market() {
    let source = FakeSourceVenue::new()
        .with_instrument(ethusdt())
        .with_instrument(btcusdt())
        .with_instrument(bnbbtc())
        .with_price("ETHUSDT", "0")
        .with_price("BNBBTC", "0.01");
    let target = FakeTargetVenue::new()
        .with_market(market("eth", "usdt", dec!(0.003), 4, 2))
        .with_market(market("btc", "usdt", dec!(0.0001), 5, 2))
        .with_market(market("bnb", "btc", dec!(0.011), 3, 6));
    let report = MemoryReport::new();

    let result = MarketPass::new(&source, &target, &AutoApprove, &report)
        .run()
        .await
        .unwrap();

    let [eth, btc, bnb] = result.outcomes.as_slice() else {
        panic!("expected three outcomes, got {:?}", result.outcomes);
    };
    match eth {
        MarketOutcome::Failed { reason, .. } => {
            assert!(reason.contains("invalid price '0'"), "{reason}");
        }
        other => panic!("expected failure for ethusdt, got {other:?}"),
    }
    match btc {
        MarketOutcome::Failed { reason, .. } => {
            assert!(reason.starts_with("ticker price fetch failed"), "{reason}");
        }
        other => panic!("expected failure for btcusdt, got {other:?}"),
    }
    assert_eq!(
        bnb,
        &MarketOutcome::InSync {
            symbol: "bnbbtc".into()
        }
    );
    assert!(target.updates().is_empty());
}

#[tokio::test]
async fn malformed_source_filter_fails_only_its_market() {
    let listing: ExchangeInfo = serde_json::from_str(
        r#"{"symbols": [
            {
                "symbol": "ETHUSDT", "baseAsset": "ETH", "quoteAsset": "USDT", "quotePrecision": 8,
                "filters": [
                    {"filterType": "PRICE_FILTER", "minPrice": "0.01000000", "maxPrice": "1000000.00000000", "tickSize": "0.01000000"},
                    {"filterType": "LOT_SIZE", "minQty": "0.00010000"},
                    {"filterType": "MIN_NOTIONAL", "minNotional": "10.00000000"}
                ]
            },
            {
                "symbol": "BADUSDT", "baseAsset": "BAD", "quoteAsset": "USDT", "quotePrecision": 8,
                "filters": [
                    {"filterType": "PRICE_FILTER", "minPrice": "0.01", "tickSize": "0.01"},
                    {"filterType": "LOT_SIZE", "minQty": "1"},
                    {"filterType": "MIN_NOTIONAL", "minNotional": "10"}
                ]
            }
        ]}"#,
    )
    .unwrap();
    let mut source = FakeSourceVenue::new()
        .with_price("ETHUSDT", "3500")
        .with_price("BADUSDT", "1");
    for instrument in listing.instruments() {
        source = source.with_instrument(instrument);
    }
    let target = FakeTargetVenue::new()
        .with_market(market("eth", "usdt", dec!(0.003), 4, 2))
        .with_market(market("bad", "usdt", dec!(1), 0, 2));
    let report = MemoryReport::new();

    let result = MarketPass::new(&source, &target, &AutoApprove, &report)
        .run()
        .await
        .unwrap();

    assert_eq!(
        result.outcomes[0],
        MarketOutcome::InSync {
            symbol: "ethusdt".into()
        }
    );
    match &result.outcomes[1] {
        MarketOutcome::Failed { symbol, reason } => {
            assert_eq!(symbol, "badusdt");
            assert!(reason.contains("PRICE_FILTER"), "{reason}");
        }
        other => panic!("expected failure for badusdt, got {other:?}"),
    }
}

#[tokio::test]
async fn rejected_update_becomes_failure_and_others_proceed() {
    let source = FakeSourceVenue::new()
        .with_instrument(btcusdt())
        .with_instrument(bnbbtc())
        .with_price("BTCUSDT", "50000")
        .with_price("BNBBTC", "0.01");
    let target = FakeTargetVenue::new()
        .with_market(market("btc", "usdt", dec!(0.0001), 5, 2))
        .with_market(market("bnb", "btc", dec!(0.01), 3, 6))
        .rejecting_update("btcusdt");
    let report = MemoryReport::new();

    let result = MarketPass::new(&source, &target, &AutoApprove, &report)
        .run()
        .await
        .unwrap();

    match &result.outcomes[0] {
        MarketOutcome::Failed { symbol, reason } => {
            assert_eq!(symbol, "btcusdt");
            assert!(reason.starts_with("update failed"), "{reason}");
        }
        other => panic!("expected failed update, got {other:?}"),
    }
    assert!(result.outcomes[1].is_updated());
    assert_eq!(target.updates().len(), 2);

    let epilogue = result.epilogue.unwrap();
    assert_eq!(epilogue.updated, vec!["BNB/BTC".to_string()]);
}

#[tokio::test]
async fn report_failure_does_not_prevent_restart() {
    let source = FakeSourceVenue::new()
        .with_instrument(btcusdt())
        .with_price("BTCUSDT", "50000");
    let target = FakeTargetVenue::new().with_market(market("btc", "usdt", dec!(0.0001), 5, 2));
    let report = MemoryReport::failing();

    let result = MarketPass::new(&source, &target, &AutoApprove, &report)
        .run()
        .await
        .unwrap();

    let epilogue = result.epilogue.unwrap();
    assert!(epilogue.report_error.unwrap().contains("disk full"));
    assert_eq!(epilogue.restart_error, None);
    assert_eq!(target.restarts(), 1);
}

#[tokio::test]
async fn restart_failure_is_recorded_not_raised() {
    let source = FakeSourceVenue::new()
        .with_instrument(btcusdt())
        .with_price("BTCUSDT", "50000");
    let target = FakeTargetVenue::new()
        .with_market(market("btc", "usdt", dec!(0.0001), 5, 2))
        .rejecting_restart();
    let report = MemoryReport::new();

    let result = MarketPass::new(&source, &target, &AutoApprove, &report)
        .run()
        .await
        .unwrap();

    let epilogue = result.epilogue.unwrap();
    assert_eq!(epilogue.report_error, None);
    assert!(epilogue.restart_error.unwrap().contains("401"));
    assert_eq!(report.written(), Some(vec!["BTC/USDT".to_string()]));
}

#[tokio::test]
async fn concurrent_planning_is_bounded_and_keeps_target_order() {
    let bases = ["aaa", "bbb", "ccc", "ddd", "eee", "fff", "ggg", "hhh"];
    let mut source = FakeSourceVenue::new().with_delay(Duration::from_millis(20));
    let mut target = FakeTargetVenue::new();
    for base in bases {
        let symbol = format!("{}USDT", base.to_uppercase());
        source = source
            .with_instrument(pair(&base.to_uppercase(), "USDT"))
            .with_price(&symbol, "100");
        target = target.with_market(market(base, "usdt", dec!(0.105), 3, 2));
    }
    let report = MemoryReport::new();

    let result = MarketPass::new(&source, &target, &AutoApprove, &report)
        .with_concurrency(4)
        .run()
        .await
        .unwrap();

    let symbols: Vec<&str> = result.outcomes.iter().map(MarketOutcome::symbol).collect();
    let expected: Vec<String> = bases.iter().map(|b| format!("{b}usdt")).collect();
    assert_eq!(symbols, expected);
    assert_eq!(result.count(|o| matches!(o, MarketOutcome::InSync { .. })), 8);

    assert_eq!(source.ticker_requests(), 8);
    assert!(source.peak_in_flight() <= 4);
    assert!(source.peak_in_flight() > 1);
}
