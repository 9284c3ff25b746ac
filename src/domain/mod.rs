//! Exchange parameter reconciliation engine.
//!
//! Everything in here is pure and synchronous: it works on data already
//! fetched from the venues and never performs I/O.

pub mod amount;
pub mod compliance;
pub mod currency;
pub mod error;
pub mod instrument;
pub mod market;
pub mod normalize;
pub mod precision;

pub use amount::{min_trade_amount, parse_price, NOTIONAL_SAFETY_MARGIN};
pub use compliance::{
    audit_fees, check_compliance, check_currency, ComplianceReport, CurrencyCompliance,
};
pub use currency::{NetworkRecord, SourceCurrency, TargetCurrency};
pub use error::ReconcileError;
pub use instrument::{
    find_constraint, index_by_symbol, Constraint, Instrument, LotSizeConstraint, NotionalConstraint,
    PriceConstraint,
};
pub use market::{equivalent, MarketConfig, UpdateMarketRequest};
pub use normalize::{normalize, UNBOUNDED_MAX_PRICE};
pub use precision::{precision_of, round_to_precision};
