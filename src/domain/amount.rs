//! Minimum tradable amount derived from the minimum-notional rule.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::error::ReconcileError;
use super::instrument::Instrument;

/// Margin applied on top of the bare minimum notional.
///
/// Absorbs price movement between the ticker snapshot and order placement.
pub const NOTIONAL_SAFETY_MARGIN: Decimal = dec!(1.05);

/// Parse a ticker price and require it to be strictly positive.
///
/// # Errors
///
/// Returns [`ReconcileError::InvalidPrice`] if `raw` is not a decimal number
/// or is zero or negative.
pub fn parse_price(symbol: &str, raw: &str) -> Result<Decimal, ReconcileError> {
    let invalid = || ReconcileError::InvalidPrice {
        symbol: symbol.to_string(),
        price: raw.to_string(),
    };

    let price = Decimal::from_str(raw.trim()).map_err(|_| invalid())?;
    if price <= Decimal::ZERO {
        return Err(invalid());
    }
    Ok(price)
}

/// Minimum amount that clears the instrument's minimum notional at `current_price`.
///
/// `amount = 1.05 * min_notional / current_price`
///
/// # Errors
///
/// - [`ReconcileError::ConstraintMissing`] when the instrument has no notional rule
/// - [`ReconcileError::InvalidPrice`] when `current_price` is zero or negative
/// - [`ReconcileError::Overflow`] when the result is not representable
pub fn min_trade_amount(
    instrument: &Instrument,
    current_price: Decimal,
) -> Result<Decimal, ReconcileError> {
    let notional = instrument.notional_constraint()?;

    if current_price <= Decimal::ZERO {
        return Err(ReconcileError::InvalidPrice {
            symbol: instrument.symbol().to_string(),
            price: current_price.to_string(),
        });
    }

    NOTIONAL_SAFETY_MARGIN
        .checked_mul(notional.min_notional)
        .and_then(|margin| margin.checked_div(current_price))
        .ok_or_else(|| ReconcileError::Overflow {
            symbol: instrument.symbol().to_string(),
        })
}
