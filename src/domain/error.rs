//! Reconciliation errors for core domain operations.
//!
//! Every variant carries the symbol of the instrument it was raised for so
//! that the orchestrator can report the item and move on to the next one.
//!
//! # Examples
//!
//! ```
//! use marketsync::domain::error::ReconcileError;
//! use marketsync::domain::instrument::{tags, Instrument};
//! use marketsync::domain::normalize::normalize;
//! use rust_decimal_macros::dec;
//!
//! // An instrument without constraints cannot be normalized.
//! let instrument = Instrument::new("BNBBTC", "BNB", "BTC", 8, vec![]);
//! let result = normalize(&instrument, dec!(0.011));
//!
//! assert!(matches!(
//!     result,
//!     Err(ReconcileError::ConstraintMissing { tag, .. }) if tag == tags::PRICE_FILTER
//! ));
//! ```

use thiserror::Error;

/// Errors raised while deriving a target-venue market from an instrument.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReconcileError {
    /// A required constraint is absent from the instrument.
    #[error("constraint {tag} not found for {symbol}")]
    ConstraintMissing {
        /// Source-venue symbol of the instrument.
        symbol: String,
        /// Tag of the missing constraint.
        tag: String,
    },

    /// Current price is zero, negative or not a decimal number.
    #[error("invalid price '{price}' for {symbol}")]
    InvalidPrice {
        /// Source-venue symbol of the instrument.
        symbol: String,
        /// The rejected price as received.
        price: String,
    },

    /// The computed minimum amount came out as zero.
    #[error("min amount is zero for {symbol}")]
    ZeroMinAmount {
        /// Source-venue symbol of the instrument.
        symbol: String,
    },

    /// Decimal arithmetic left the representable range.
    #[error("decimal overflow while computing min amount for {symbol}")]
    Overflow {
        /// Source-venue symbol of the instrument.
        symbol: String,
    },
}

impl ReconcileError {
    /// Symbol of the instrument the error was raised for.
    #[must_use]
    pub fn symbol(&self) -> &str {
        match self {
            Self::ConstraintMissing { symbol, .. }
            | Self::InvalidPrice { symbol, .. }
            | Self::ZeroMinAmount { symbol }
            | Self::Overflow { symbol } => symbol,
        }
    }
}
