use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Revenue allocated across the service and commerce categories.
///
/// `service_percent + commerce_percent == 100` and
/// `service_revenue + commerce_revenue == total_revenue`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueSplit {
    pub total_revenue: Decimal,
    pub service_percent: u8,
    pub commerce_percent: u8,
    pub service_revenue: Decimal,
    pub commerce_revenue: Decimal,
}
