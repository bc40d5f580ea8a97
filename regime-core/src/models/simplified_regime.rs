use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ActivityCategory, Annex, RevenueSplit};

/// Per-category outcome of a Simples Nacional calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimplifiedCategoryLine {
    pub category: ActivityCategory,
    pub annex: Annex,

    /// 1-based bracket ("faixa") selected by RBT12.
    pub bracket_number: usize,

    /// Revenue attributed to this category for the period.
    pub revenue_share: Decimal,

    /// Percentage of total revenue attributed to this category.
    pub share_percent: u8,

    pub nominal_rate: Decimal,
    pub deduction_applied: Decimal,
    pub effective_rate: Decimal,

    /// `revenue_share × effective_rate`, rounded to cents.
    pub tax_amount: Decimal,
}

/// The all-service counterfactual for Simples Nacional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimplifiedComparison {
    /// Anexo III effective rate used for the counterfactual.
    pub service_effective_rate: Decimal,

    /// Total revenue taxed at the service effective rate.
    pub full_service_tax: Decimal,
}

/// Result of a Simples Nacional calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimplifiedRegimeResult {
    pub split: RevenueSplit,

    /// Annualized revenue base used for the bracket lookup.
    pub rbt12: Decimal,

    pub service: SimplifiedCategoryLine,
    pub commerce: SimplifiedCategoryLine,

    pub total_tax: Decimal,

    /// `total_tax / total_revenue`, zero when there is no revenue.
    pub overall_effective_rate: Decimal,

    pub comparison: SimplifiedComparison,

    /// `full_service_tax - total_tax`. Positive when the mixed split saves
    /// money compared to invoicing everything as service.
    pub economy_amount: Decimal,
}
