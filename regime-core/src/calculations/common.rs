//! Shared numeric helpers for the regime calculators.
//!
//! Monetary amounts are rounded to cents with [`round_half_up`]; rates are
//! left at full [`Decimal`] precision. Every ratio goes through
//! [`ratio_or_zero`] or [`percent_of`] so that zero revenue never produces a
//! division error.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::warn;

const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Largest revenue figure the engine works with (10^24).
///
/// Anything above is clamped down to it. At this size every product and sum
/// the calculators form stays inside the `Decimal` range, and RBT12 is still
/// far above any Simples Nacional ceiling.
pub const MAX_REVENUE: Decimal = dec!(1000000000000000000000000);

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded to 0.01 (away from zero).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use regime_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Divides `numerator` by `denominator`, returning zero when the denominator is zero.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
/// use regime_core::calculations::common::ratio_or_zero;
///
/// assert_eq!(ratio_or_zero(dec!(600), dec!(10000)), dec!(0.06));
/// assert_eq!(ratio_or_zero(dec!(600), Decimal::ZERO), Decimal::ZERO);
/// ```
pub fn ratio_or_zero(
    numerator: Decimal,
    denominator: Decimal,
) -> Decimal {
    if denominator.is_zero() {
        Decimal::ZERO
    } else {
        numerator / denominator
    }
}

/// Expresses `part` as a percentage of `whole`, rounded to two places.
///
/// Returns zero when `whole` is zero.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
/// use regime_core::calculations::common::percent_of;
///
/// assert_eq!(percent_of(dec!(325), dec!(50000)), dec!(0.65));
/// assert_eq!(percent_of(dec!(325), Decimal::ZERO), Decimal::ZERO);
/// ```
pub fn percent_of(
    part: Decimal,
    whole: Decimal,
) -> Decimal {
    round_half_up(ratio_or_zero(part, whole) * ONE_HUNDRED)
}

/// Clamps a revenue figure to `[0, MAX_REVENUE]`.
///
/// Out-of-range revenue is a caller error that the engine recovers from locally.
pub fn clamp_revenue(revenue: Decimal) -> Decimal {
    if revenue.is_sign_negative() && !revenue.is_zero() {
        warn!(revenue = %revenue, "negative revenue clamped to zero");
        return Decimal::ZERO;
    }
    if revenue > MAX_REVENUE {
        warn!(revenue = %revenue, max = %MAX_REVENUE, "revenue above supported maximum; clamped");
        return MAX_REVENUE;
    }
    revenue
}

/// Clamps a percentage to `[0, 100]`.
pub fn clamp_percent(
    field: &'static str,
    percent: Decimal,
) -> Decimal {
    let clamped = percent.clamp(Decimal::ZERO, ONE_HUNDRED);
    if clamped != percent {
        warn!(field, percent = %percent, clamped = %clamped, "percentage out of range; clamped");
    }
    clamped
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_half_up tests
    // =========================================================================

    #[test]
    fn round_half_up_rounds_down_below_midpoint() {
        let result = round_half_up(dec!(123.454));

        assert_eq!(result, dec!(123.45));
    }

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        let result = round_half_up(dec!(123.455));

        assert_eq!(result, dec!(123.46));
    }

    #[test]
    fn round_half_up_handles_negative_values() {
        let result = round_half_up(dec!(-123.455));

        assert_eq!(result, dec!(-123.46));
    }

    #[test]
    fn round_half_up_handles_zero() {
        assert_eq!(round_half_up(dec!(0.00)), dec!(0.00));
    }

    // =========================================================================
    // ratio_or_zero / percent_of tests
    // =========================================================================

    #[test]
    fn ratio_or_zero_divides() {
        assert_eq!(ratio_or_zero(dec!(1155), dec!(38500)), dec!(0.03));
    }

    #[test]
    fn ratio_or_zero_guards_zero_denominator() {
        assert_eq!(ratio_or_zero(dec!(1155), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn percent_of_rounds_to_two_places() {
        let result = percent_of(dec!(1), dec!(3));

        assert_eq!(result, dec!(33.33));
    }

    #[test]
    fn percent_of_zero_whole_is_zero() {
        assert_eq!(percent_of(dec!(10), Decimal::ZERO), Decimal::ZERO);
    }

    // =========================================================================
    // clamp tests
    // =========================================================================

    #[test]
    fn clamp_revenue_keeps_non_negative_values() {
        assert_eq!(clamp_revenue(dec!(50000)), dec!(50000));
        assert_eq!(clamp_revenue(Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn clamp_revenue_zeroes_negative_values() {
        assert_eq!(clamp_revenue(dec!(-1.50)), Decimal::ZERO);
    }

    #[test]
    fn clamp_revenue_caps_huge_values() {
        assert_eq!(clamp_revenue(Decimal::MAX), MAX_REVENUE);
        assert_eq!(clamp_revenue(MAX_REVENUE), MAX_REVENUE);
    }

    #[test]
    fn clamp_percent_bounds_both_ends() {
        assert_eq!(clamp_percent("iss", dec!(-2)), Decimal::ZERO);
        assert_eq!(clamp_percent("iss", dec!(150)), dec!(100));
        assert_eq!(clamp_percent("iss", dec!(3)), dec!(3));
    }
}
