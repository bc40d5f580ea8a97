use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ActivityCategory, RevenueSplit};

/// The taxes levied under Lucro Presumido, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PresumedTax {
    Pis,
    Cofins,
    Irpj,
    Csll,
    Iss,
}

impl PresumedTax {
    pub const ALL: [PresumedTax; 5] = [
        PresumedTax::Pis,
        PresumedTax::Cofins,
        PresumedTax::Irpj,
        PresumedTax::Csll,
        PresumedTax::Iss,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Pis => "PIS",
            Self::Cofins => "COFINS",
            Self::Irpj => "IRPJ",
            Self::Csll => "CSLL",
            Self::Iss => "ISS",
        }
    }
}

/// Per-category tax amounts under Lucro Presumido.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresumedCategoryBreakdown {
    pub category: ActivityCategory,

    /// Revenue attributed to this category.
    pub revenue: Decimal,

    pub pis: Decimal,
    pub cofins: Decimal,
    pub irpj: Decimal,
    pub csll: Decimal,

    /// Municipal service tax. `None` for commerce revenue, which ISS does not reach.
    pub iss: Option<Decimal>,

    /// Sum of every tax above.
    pub subtotal: Decimal,
}

impl PresumedCategoryBreakdown {
    /// Amount of a single tax for this category (zero when not applicable).
    pub fn amount(
        &self,
        tax: PresumedTax,
    ) -> Decimal {
        match tax {
            PresumedTax::Pis => self.pis,
            PresumedTax::Cofins => self.cofins,
            PresumedTax::Irpj => self.irpj,
            PresumedTax::Csll => self.csll,
            PresumedTax::Iss => self.iss.unwrap_or(Decimal::ZERO),
        }
    }
}

/// One row of the per-tax report table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresumedTaxLine {
    pub tax: PresumedTax,
    pub service_amount: Decimal,
    pub commerce_amount: Decimal,
    pub total: Decimal,

    /// `total` as a percentage of total revenue, two decimal places.
    pub revenue_percent: Decimal,
}

/// The "what if 100% of revenue were Serviço" counterfactual.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresumedComparison {
    /// Full breakdown with all revenue treated as service.
    pub service_scenario: PresumedCategoryBreakdown,

    /// Grand total of the scenario (commerce share is zero).
    pub scenario_total: Decimal,

    /// Actual grand total minus the scenario total. Positive means the actual
    /// split costs more than the all-service scenario.
    pub difference: Decimal,

    /// `difference` relative to the scenario total, as a percentage.
    pub difference_percent: Decimal,
}

/// Result of a Lucro Presumido calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresumedProfitResult {
    pub split: RevenueSplit,

    /// ISS percentage actually applied (after clamping).
    pub iss_percent: Decimal,

    pub service: PresumedCategoryBreakdown,
    pub commerce: PresumedCategoryBreakdown,

    /// One line per tax, in [`PresumedTax::ALL`] order.
    pub tax_lines: Vec<PresumedTaxLine>,

    pub grand_total: Decimal,

    /// Grand total as a percentage of total revenue.
    pub grand_total_percent: Decimal,

    pub comparison: PresumedComparison,
}
