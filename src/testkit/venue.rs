//! In-memory venues.
//!
//! - [`FakeSourceVenue`] - Fixed instruments, currencies and prices; counts
//!   ticker requests and the peak number in flight.
//! - [`FakeTargetVenue`] - Fixed markets and currencies; records updates and
//!   restart requests, and can be told to reject either.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::{
    parse_price, Instrument, MarketConfig, SourceCurrency, TargetCurrency, UpdateMarketRequest,
};
use crate::error::{Result, VenueError};
use crate::port::outbound::venue::{SourceVenue, TargetVenue};

const SOURCE: &str = "FakeSource";
const TARGET: &str = "FakeTarget";

#[derive(Default)]
pub struct FakeSourceVenue {
    instruments: Vec<Instrument>,
    currencies: Vec<SourceCurrency>,
    prices: HashMap<String, String>,
    delay: Option<Duration>,
    ticker_requests: AtomicU32,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl FakeSourceVenue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_instrument(mut self, instrument: Instrument) -> Self {
        self.instruments.push(instrument);
        self
    }

    pub fn with_currency(mut self, currency: SourceCurrency) -> Self {
        self.currencies.push(currency);
        self
    }

    /// Serve `price` for `symbol`. Prices stay raw so invalid ones can be
    /// scripted.
    pub fn with_price(mut self, symbol: &str, price: &str) -> Self {
        self.prices.insert(symbol.to_string(), price.to_string());
        self
    }

    /// Hold every ticker request for `delay`.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn ticker_requests(&self) -> u32 {
        self.ticker_requests.load(Ordering::SeqCst)
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SourceVenue for FakeSourceVenue {
    async fn instruments(&self) -> Result<Vec<Instrument>> {
        Ok(self.instruments.clone())
    }

    async fn currencies(&self) -> Result<Vec<SourceCurrency>> {
        Ok(self.currencies.clone())
    }

    async fn ticker_price(&self, symbol: &str) -> Result<Decimal> {
        self.ticker_requests.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let endpoint = format!("/ticker/{symbol}");
        let raw = self
            .prices
            .get(symbol)
            .ok_or_else(|| VenueError::from_status(SOURCE, endpoint, 404))?;
        Ok(parse_price(symbol, raw)?)
    }

    fn venue_name(&self) -> &'static str {
        SOURCE
    }
}

#[derive(Default)]
pub struct FakeTargetVenue {
    markets: Vec<MarketConfig>,
    currencies: Vec<TargetCurrency>,
    rejected_updates: HashSet<String>,
    reject_restart: bool,
    updates: Mutex<Vec<UpdateMarketRequest>>,
    restarts: AtomicU32,
}

impl FakeTargetVenue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_market(mut self, market: MarketConfig) -> Self {
        self.markets.push(market);
        self
    }

    pub fn with_currency(mut self, currency: TargetCurrency) -> Self {
        self.currencies.push(currency);
        self
    }

    /// Answer updates for `symbol` with 503.
    pub fn rejecting_update(mut self, symbol: &str) -> Self {
        self.rejected_updates.insert(symbol.to_string());
        self
    }

    /// Answer restart requests with 401.
    pub fn rejecting_restart(mut self) -> Self {
        self.reject_restart = true;
        self
    }

    /// Update requests received, including rejected ones.
    pub fn updates(&self) -> Vec<UpdateMarketRequest> {
        match self.updates.lock() {
            Ok(updates) => updates.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn restarts(&self) -> u32 {
        self.restarts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TargetVenue for FakeTargetVenue {
    async fn markets(&self) -> Result<Vec<MarketConfig>> {
        Ok(self.markets.clone())
    }

    async fn currencies(&self) -> Result<Vec<TargetCurrency>> {
        Ok(self.currencies.clone())
    }

    async fn update_market(&self, request: &UpdateMarketRequest) -> Result<MarketConfig> {
        match self.updates.lock() {
            Ok(mut updates) => updates.push(request.clone()),
            Err(poisoned) => poisoned.into_inner().push(request.clone()),
        }

        let endpoint = "/admin/markets/update";
        if self.rejected_updates.contains(&request.symbol) {
            return Err(VenueError::from_status(TARGET, endpoint, 503).into());
        }
        let existing = self
            .markets
            .iter()
            .find(|m| m.symbol() == request.symbol)
            .ok_or_else(|| VenueError::from_status(TARGET, endpoint, 404))?;

        Ok(MarketConfig::new(existing.base_unit(), existing.quote_unit())
            .with_identity(existing.symbol(), existing.name())
            .with_price_limits(request.min_price, request.max_price)
            .with_amount(request.min_amount, request.amount_precision)
            .with_price_precision(request.price_precision))
    }

    async fn request_restart(&self) -> Result<()> {
        self.restarts.fetch_add(1, Ordering::SeqCst);
        if self.reject_restart {
            return Err(VenueError::from_status(TARGET, "/admin/secret", 401).into());
        }
        Ok(())
    }

    fn venue_name(&self) -> &'static str {
        TARGET
    }
}
