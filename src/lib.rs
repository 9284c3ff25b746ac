//! Marketsync - keep a trading platform aligned with a reference exchange.
//!
//! The target venue (an OpenDAX platform) lists markets and currencies that
//! settle through a source venue (Binance). This crate derives the trading
//! parameters each target market should have from the source venue's rules
//! and live prices, and audits withdrawal fees so the platform never charges
//! less than it pays.
//!
//! # Architecture
//!
//! - [`domain`] - Pure reconciliation engine: precision inference, constraint
//!   lookup, minimum amounts, market normalization, fee compliance
//! - [`port`] - Traits for venues, operator approval and reports
//! - [`adapter`] - REST clients, the report file and the CLI
//! - [`application`] - The market pass and the fee pass
//! - [`infrastructure`] - Configuration and logging
//! - [`error`] - Error types for the crate
//!
//! # Features
//!
//! - `testkit` - In-memory venues and domain builders for tests
//!
//! # Example
//!
//! ```
//! use marketsync::domain::{normalize, Constraint, Instrument, LotSizeConstraint, PriceConstraint};
//! use rust_decimal_macros::dec;
//!
//! let instrument = Instrument::new(
//!     "BNBBTC",
//!     "BNB",
//!     "BTC",
//!     8,
//!     vec![
//!         Constraint::Price(PriceConstraint {
//!             min_price: dec!(0.000001),
//!             max_price: dec!(100000),
//!             tick_size: dec!(0.000001),
//!         }),
//!         Constraint::LotSize(LotSizeConstraint { min_quantity: dec!(0.001) }),
//!     ],
//! );
//!
//! let market = normalize(&instrument, dec!(0.0112359550561)).unwrap();
//! assert_eq!(market.min_amount().to_string(), "0.011");
//! assert_eq!(market.price_precision(), 6);
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
