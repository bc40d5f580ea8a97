//! RBT12 determination (the annualized revenue base for bracket lookup).
//!
//! | Activity                 | Accumulated revenue | RBT12                               |
//! |--------------------------|---------------------|-------------------------------------|
//! | < 12 months, month 1     | ignored             | period revenue × 12                 |
//! | < 12 months, month n > 1 | optional            | (accumulated or 0) / n × 12         |
//! | 12 months or more        | supplied            | accumulated                         |
//! | 12 months or more        | blank               | period revenue × 12                 |
//!
//! A business in its second to eleventh month that leaves the accumulated
//! figure blank lands on an RBT12 of zero, and therefore on the first bracket.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calculations::common::clamp_revenue;

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// How long the business has been operating.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityDuration {
    #[default]
    TwelveMonthsOrMore,
    /// `months` is the number of months of activity, starting at 1.
    LessThanTwelveMonths { months: u32 },
}

impl ActivityDuration {
    /// Adapts the flag-and-months pair a form collects.
    ///
    /// `months_of_activity` is ignored when the flag is not set, and clamped
    /// to at least 1 when it is.
    pub fn from_flag(
        is_less_than_12_months: bool,
        months_of_activity: u32,
    ) -> Self {
        if !is_less_than_12_months {
            return Self::TwelveMonthsOrMore;
        }
        if months_of_activity == 0 {
            warn!("months of activity must be at least 1; using 1");
        }
        Self::LessThanTwelveMonths {
            months: months_of_activity.max(1),
        }
    }
}

/// Computes RBT12 from the period revenue, an optional accumulated figure
/// and the activity duration.
///
/// In the first month RBT12 is the period revenue times 12. From the second
/// to the eleventh month it is the accumulated revenue averaged over the
/// months of activity, times 12. After twelve months the accumulated figure
/// is used as given, or the period revenue times 12 when it is blank.
///
/// A blank accumulated figure between months 2 and 11 counts as zero, which
/// selects the first bracket whatever the actual revenue.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use regime_core::calculations::rbt12::{ActivityDuration, determine_rbt12};
///
/// let first_month = ActivityDuration::LessThanTwelveMonths { months: 1 };
/// assert_eq!(determine_rbt12(dec!(5000), None, first_month), dec!(60000));
///
/// let steady = ActivityDuration::TwelveMonthsOrMore;
/// assert_eq!(determine_rbt12(dec!(10000), None, steady), dec!(120000));
/// assert_eq!(determine_rbt12(dec!(10000), Some(dec!(300000)), steady), dec!(300000));
/// ```
pub fn determine_rbt12(
    total_revenue: Decimal,
    accumulated_revenue: Option<Decimal>,
    duration: ActivityDuration,
) -> Decimal {
    let total_revenue = clamp_revenue(total_revenue);
    let accumulated_revenue = accumulated_revenue.map(clamp_revenue);

    let rbt12 = match duration {
        ActivityDuration::LessThanTwelveMonths { months: 0 | 1 } => total_revenue * MONTHS_PER_YEAR,
        ActivityDuration::LessThanTwelveMonths { months } => {
            let accumulated = accumulated_revenue.unwrap_or(Decimal::ZERO);
            accumulated / Decimal::from(months) * MONTHS_PER_YEAR
        }
        ActivityDuration::TwelveMonthsOrMore => {
            accumulated_revenue.unwrap_or(total_revenue * MONTHS_PER_YEAR)
        }
    };

    debug!(
        total_revenue = %total_revenue,
        accumulated_revenue = ?accumulated_revenue,
        duration = ?duration,
        rbt12 = %rbt12,
        "determined RBT12"
    );

    rbt12
}
