//! Rounding helpers shared by the engine and the presentation layer.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a monetary amount to the smallest currency unit (two places),
/// halves away from zero.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(1809.505)), dec!(1809.51));
/// assert_eq!(round_half_up(dec!(1809.504)), dec!(1809.50));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Converts a rate fraction to a percentage rounded to `dp` places.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::rate_to_percent;
///
/// assert_eq!(rate_to_percent(dec!(0.13232), 1), dec!(13.2));
/// assert_eq!(rate_to_percent(dec!(0.22), 0), dec!(22));
/// ```
pub fn rate_to_percent(
    rate: Decimal,
    dp: u32,
) -> Decimal {
    (rate * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
}
