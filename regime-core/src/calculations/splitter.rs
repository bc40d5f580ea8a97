//! Revenue splitter shared by both regimes.
//!
//! Allocates the period's revenue between Serviço and Infoproduto by an
//! integer percentage. Out-of-range inputs are clamped, never rejected.

use rust_decimal::Decimal;
use tracing::warn;

use crate::RevenueSplit;
use crate::calculations::common::clamp_revenue;

/// Clamps a service percentage to `[0, 100]`.
pub fn clamp_service_percent(service_percent: i64) -> u8 {
    let clamped = service_percent.clamp(0, 100);
    if clamped != service_percent {
        warn!(service_percent, clamped, "service percentage out of range; clamped");
    }
    // 0..=100 always fits
    clamped as u8
}

/// Splits `total_revenue` into service and commerce revenue.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use regime_core::calculations::splitter::split;
///
/// let split = split(dec!(50000), 77);
///
/// assert_eq!(split.service_revenue, dec!(38500));
/// assert_eq!(split.commerce_revenue, dec!(11500));
/// assert_eq!(split.commerce_percent, 23);
/// ```
pub fn split(
    total_revenue: Decimal,
    service_percent: i64,
) -> RevenueSplit {
    let total_revenue = clamp_revenue(total_revenue);
    let service_percent = clamp_service_percent(service_percent);
    let commerce_percent = 100 - service_percent;

    RevenueSplit {
        total_revenue,
        service_percent,
        commerce_percent,
        service_revenue: portion(total_revenue, service_percent),
        commerce_revenue: portion(total_revenue, commerce_percent),
    }
}

fn portion(
    total_revenue: Decimal,
    percent: u8,
) -> Decimal {
    total_revenue * Decimal::from(percent) / Decimal::ONE_HUNDRED
}
