//! Derivation of a target-venue market from a source-venue instrument.

use std::cmp::min;

use rust_decimal::Decimal;

use super::error::ReconcileError;
use super::instrument::Instrument;
use super::market::MarketConfig;
use super::precision::{precision_of, round_to_precision};

/// Max price sent to the target venue: zero, meaning "no upper bound".
///
/// The source venue's own max price is deliberately not propagated.
pub const UNBOUNDED_MAX_PRICE: Decimal = Decimal::from_parts(0, 0, 0, false, 2);

/// Build the target-venue market for `instrument` given a raw minimum amount.
///
/// - price precision is the tighter of the tick-implied precision and the
///   venue's quote precision
/// - amount precision comes from the lot-size minimum
/// - `min_amount` is rounded half away from zero to the amount precision and
///   never falls below the lot-size minimum
/// - min price passes through, max price is [`UNBOUNDED_MAX_PRICE`]
///
/// # Errors
///
/// Returns [`ReconcileError::ConstraintMissing`] if the instrument has no
/// price or lot-size constraint, and [`ReconcileError::Overflow`] if rounding
/// leaves the decimal range.
pub fn normalize(
    instrument: &Instrument,
    min_amount: Decimal,
) -> Result<MarketConfig, ReconcileError> {
    let price = instrument.price_constraint()?;
    let lot_size = instrument.lot_size_constraint()?;

    let quote_precision = i32::try_from(instrument.quote_precision()).unwrap_or(i32::MAX);
    let price_precision = min(precision_of(price.tick_size), quote_precision);
    let amount_precision = precision_of(lot_size.min_quantity);

    let rounded = round_to_precision(min_amount, amount_precision).ok_or_else(|| {
        ReconcileError::Overflow {
            symbol: instrument.symbol().to_string(),
        }
    })?;
    let min_amount = if rounded < lot_size.min_quantity {
        lot_size.min_quantity
    } else {
        rounded
    };

    Ok(MarketConfig::new(instrument.base_unit(), instrument.quote_unit())
        .with_price_limits(price.min_price, UNBOUNDED_MAX_PRICE)
        .with_amount(min_amount, amount_precision)
        .with_price_precision(price_precision))
}
