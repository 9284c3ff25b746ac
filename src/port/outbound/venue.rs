//! Venue ports.
//!
//! The source venue is the reference exchange whose trading rules and
//! withdrawal fees the target venue must follow. Both are read over REST;
//! only the target venue is ever written to.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::{Instrument, MarketConfig, SourceCurrency, TargetCurrency, UpdateMarketRequest};
use crate::error::Result;

/// Read-only access to the source venue.
///
/// Implementations must be thread-safe (`Send + Sync`); the market pass
/// queries ticker prices concurrently.
#[async_trait]
pub trait SourceVenue: Send + Sync {
    /// All instruments with their trading constraints, in venue order.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload cannot be decoded.
    async fn instruments(&self) -> Result<Vec<Instrument>>;

    /// All currencies with per-network withdrawal parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload cannot be decoded.
    async fn currencies(&self) -> Result<Vec<SourceCurrency>>;

    /// Last traded price for a source symbol (e.g. `ETHUSDT`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the price is not a positive
    /// decimal.
    async fn ticker_price(&self, symbol: &str) -> Result<Decimal>;

    /// Venue name for logging.
    fn venue_name(&self) -> &'static str;
}

/// Read/write access to the target venue.
#[async_trait]
pub trait TargetVenue: Send + Sync {
    /// All configured markets, in venue order.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload cannot be decoded.
    async fn markets(&self) -> Result<Vec<MarketConfig>>;

    /// All configured currencies.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload cannot be decoded.
    async fn currencies(&self) -> Result<Vec<TargetCurrency>>;

    /// Apply new trading parameters to a market and return the stored result.
    ///
    /// # Errors
    ///
    /// Returns an error if the venue rejects the update.
    async fn update_market(&self, request: &UpdateMarketRequest) -> Result<MarketConfig>;

    /// Ask the venue to restart its matching engine so updated markets take
    /// effect.
    ///
    /// # Errors
    ///
    /// Returns an error if the venue rejects the request.
    async fn request_restart(&self) -> Result<()>;

    /// Venue name for logging.
    fn venue_name(&self) -> &'static str;
}
