//! Money rounding
//!
//! Amounts are rounded to two decimal places, ties away from zero
//! (`1.005 -> 1.01`, `-1.005 -> -1.01`). The rounding is applied to exact
//! decimal values, so there are no binary floating-point surprises at the tie.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of fraction digits in a rounded money amount
pub const MONEY_SCALE: u32 = 2;

/// Round an amount to [`MONEY_SCALE`] places, ties away from zero
///
/// A result of zero is always returned as positive zero.
pub fn round_money(value: Decimal) -> Decimal {
    let rounded = value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        Decimal::ZERO
    } else {
        rounded
    }
}
