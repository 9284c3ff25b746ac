//! Decimal precision inference for step and tick sizes.
//!
//! Venues describe their resolution as a step (`0.00100000`, `10`, ...).
//! The target venue wants a signed count of decimal places instead. The
//! count is read off the decimal's scaled-integer representation, so no
//! binary float ever touches the value.

use rust_decimal::{Decimal, RoundingStrategy};

/// Signed number of decimal places implied by a step size.
///
/// | step        | precision |
/// |-------------|-----------|
/// | `0`         | `0`       |
/// | `0.001`     | `3`       |
/// | `0.1`       | `1`       |
/// | `1` .. `9`  | `0`       |
/// | `10`        | `-1`      |
/// | `100000`    | `-5`      |
///
/// This classifies the order of magnitude of the step (`-floor(log10(step))`);
/// it does not round. Negative inputs are classified by their magnitude.
#[must_use]
pub fn precision_of(value: Decimal) -> i32 {
    if value.is_zero() {
        return 0;
    }

    // value = mantissa * 10^-scale, so its leading digit sits at
    // 10^(digits - 1 - scale).
    let digits = digit_count(value.mantissa().unsigned_abs());
    value.scale() as i32 + 1 - digits
}

fn digit_count(mut n: u128) -> i32 {
    let mut digits = 1;
    while n >= 10 {
        n /= 10;
        digits += 1;
    }
    digits
}

/// Round `value` half away from zero to `precision` decimal places.
///
/// A non-negative precision also fixes the scale, so `0.0002` at precision 5
/// comes back as `0.00020`. A negative precision rounds to a power of ten
/// (`1234` at `-2` is `1200`). Returns `None` if the power of ten does not fit
/// in a `Decimal`.
#[must_use]
pub fn round_to_precision(value: Decimal, precision: i32) -> Option<Decimal> {
    if precision >= 0 {
        let dp = precision.unsigned_abs().min(Decimal::MAX_SCALE);
        let mut rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(dp);
        return Some(rounded);
    }

    let mut factor = Decimal::ONE;
    for _ in 0..precision.unsigned_abs() {
        factor = factor.checked_mul(Decimal::TEN)?;
    }
    let steps = value
        .checked_div(factor)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    steps.checked_mul(factor)
}
