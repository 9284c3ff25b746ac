//! Source-venue instruments and their trading constraints.
//!
//! - [`Instrument`] - A tradable pair with its ordered constraint list
//! - [`Constraint`] - A single rule attached to an instrument, identified by tag
//! - [`find_constraint`] - Tag lookup over an instrument's constraints

use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;

use super::error::ReconcileError;

/// Constraint tags as reported by the source venue.
pub mod tags {
    /// Price bounds and tick size.
    pub const PRICE_FILTER: &str = "PRICE_FILTER";
    /// Minimum order quantity.
    pub const LOT_SIZE: &str = "LOT_SIZE";
    /// Minimum order value (price x quantity).
    pub const MIN_NOTIONAL: &str = "MIN_NOTIONAL";
    /// Newer form of the minimum order value rule.
    pub const NOTIONAL: &str = "NOTIONAL";
}

/// Price bounds and tick size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceConstraint {
    pub min_price: Decimal,
    pub max_price: Decimal,
    pub tick_size: Decimal,
}

/// Minimum order quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LotSizeConstraint {
    pub min_quantity: Decimal,
}

/// Minimum order value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotionalConstraint {
    pub min_notional: Decimal,
}

/// A single rule attached to an instrument.
///
/// Rules this crate does not interpret are kept as [`Constraint::Other`] so
/// the instrument's list stays complete and in venue order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    Price(PriceConstraint),
    LotSize(LotSizeConstraint),
    MinNotional(NotionalConstraint),
    Notional(NotionalConstraint),
    Other { tag: String },
}

impl Constraint {
    /// The venue tag identifying this constraint.
    #[must_use]
    pub fn tag(&self) -> &str {
        match self {
            Self::Price(_) => tags::PRICE_FILTER,
            Self::LotSize(_) => tags::LOT_SIZE,
            Self::MinNotional(_) => tags::MIN_NOTIONAL,
            Self::Notional(_) => tags::NOTIONAL,
            Self::Other { tag } => tag,
        }
    }
}

/// A tradable pair on the source venue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instrument {
    symbol: String,
    base_unit: String,
    quote_unit: String,
    quote_precision: u32,
    constraints: Vec<Constraint>,
}

impl Instrument {
    /// Create a new instrument.
    pub fn new(
        symbol: impl Into<String>,
        base_unit: impl Into<String>,
        quote_unit: impl Into<String>,
        quote_precision: u32,
        constraints: Vec<Constraint>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            base_unit: base_unit.into(),
            quote_unit: quote_unit.into(),
            quote_precision,
            constraints,
        }
    }

    /// Source-venue symbol, e.g. `BNBBTC`.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    #[must_use]
    pub fn base_unit(&self) -> &str {
        &self.base_unit
    }

    #[must_use]
    pub fn quote_unit(&self) -> &str {
        &self.quote_unit
    }

    /// Decimal digits the venue reports for quote amounts.
    #[must_use]
    pub const fn quote_precision(&self) -> u32 {
        self.quote_precision
    }

    /// Constraints in venue order.
    #[must_use]
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Tags that appear more than once, in first-seen order.
    ///
    /// Lookup resolves duplicates to the first occurrence; callers use this
    /// to surface instruments whose metadata is ambiguous.
    #[must_use]
    pub fn duplicate_tags(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for constraint in &self.constraints {
            let tag = constraint.tag();
            if !seen.insert(tag) && !duplicates.contains(&tag) {
                duplicates.push(tag);
            }
        }
        duplicates
    }

    /// The price constraint, required for normalization.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::ConstraintMissing`] if no `PRICE_FILTER` exists.
    pub fn price_constraint(&self) -> Result<&PriceConstraint, ReconcileError> {
        match find_constraint(self, tags::PRICE_FILTER)? {
            Constraint::Price(price) => Ok(price),
            _ => Err(self.missing(tags::PRICE_FILTER)),
        }
    }

    /// The lot-size constraint, required for normalization.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::ConstraintMissing`] if no `LOT_SIZE` exists.
    pub fn lot_size_constraint(&self) -> Result<&LotSizeConstraint, ReconcileError> {
        match find_constraint(self, tags::LOT_SIZE)? {
            Constraint::LotSize(lot) => Ok(lot),
            _ => Err(self.missing(tags::LOT_SIZE)),
        }
    }

    /// The minimum-notional constraint.
    ///
    /// Falls back to the newer `NOTIONAL` rule when `MIN_NOTIONAL` is absent.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::ConstraintMissing`] tagged `MIN_NOTIONAL` if
    /// neither rule exists.
    pub fn notional_constraint(&self) -> Result<&NotionalConstraint, ReconcileError> {
        let found = find_constraint(self, tags::MIN_NOTIONAL)
            .or_else(|_| find_constraint(self, tags::NOTIONAL));
        match found {
            Ok(Constraint::MinNotional(notional) | Constraint::Notional(notional)) => Ok(notional),
            _ => Err(self.missing(tags::MIN_NOTIONAL)),
        }
    }

    fn missing(&self, tag: &str) -> ReconcileError {
        ReconcileError::ConstraintMissing {
            symbol: self.symbol.clone(),
            tag: tag.to_string(),
        }
    }
}

/// Find the first constraint carrying `tag`.
///
/// # Errors
///
/// Returns [`ReconcileError::ConstraintMissing`] when no constraint matches.
/// Callers that treat the constraint as optional should use `.ok()`.
pub fn find_constraint<'a>(
    instrument: &'a Instrument,
    tag: &str,
) -> Result<&'a Constraint, ReconcileError> {
    instrument
        .constraints
        .iter()
        .find(|c| c.tag() == tag)
        .ok_or_else(|| instrument.missing(tag))
}

/// Index instruments by source symbol. Later duplicates replace earlier ones.
#[must_use]
pub fn index_by_symbol(instruments: &[Instrument]) -> HashMap<&str, &Instrument> {
    instruments.iter().map(|i| (i.symbol(), i)).collect()
}
