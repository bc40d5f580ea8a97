//! Lucro Presumido calculator.
//!
//! Flat statutory rates are applied to each revenue category:
//!
//! | Tax    | Serviço | Infoproduto |
//! |--------|---------|-------------|
//! | PIS    | 0,65%   | 0,65%       |
//! | COFINS | 3,00%   | 3,00%       |
//! | IRPJ   | 4,80%   | 1,20%       |
//! | CSLL   | 2,88%   | 1,08%       |
//! | ISS    | caller  | —           |
//!
//! The result also carries a counterfactual where all revenue is treated as
//! service, so the caller can show what the current split saves or costs.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use regime_core::compute_presumed_profit;
//!
//! let result = compute_presumed_profit(dec!(50000), 77, dec!(3));
//!
//! assert_eq!(result.split.service_revenue, dec!(38500));
//! assert_eq!(result.service.iss, Some(dec!(1155.00)));
//! assert_eq!(result.grand_total, dec!(6199.00));
//! assert_eq!(result.comparison.scenario_total, dec!(7165.00));
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::common::{clamp_percent, percent_of, ratio_or_zero, round_half_up};
use crate::calculations::splitter::split;
use crate::{
    ActivityCategory, PresumedCategoryBreakdown, PresumedComparison, PresumedProfitResult,
    PresumedTax, PresumedTaxLine,
};

/// Statutory Lucro Presumido rates, as fractions of revenue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresumedProfitRates {
    pub pis: Decimal,
    pub cofins: Decimal,
    pub irpj_service: Decimal,
    pub csll_service: Decimal,
    pub irpj_commerce: Decimal,
    pub csll_commerce: Decimal,
}

impl PresumedProfitRates {
    pub const STATUTORY: Self = Self {
        pis: dec!(0.0065),
        cofins: dec!(0.03),
        irpj_service: dec!(0.048),
        csll_service: dec!(0.0288),
        irpj_commerce: dec!(0.012),
        csll_commerce: dec!(0.0108),
    };

    fn irpj(
        &self,
        category: ActivityCategory,
    ) -> Decimal {
        match category {
            ActivityCategory::Servico => self.irpj_service,
            ActivityCategory::Infoproduto => self.irpj_commerce,
        }
    }

    fn csll(
        &self,
        category: ActivityCategory,
    ) -> Decimal {
        match category {
            ActivityCategory::Servico => self.csll_service,
            ActivityCategory::Infoproduto => self.csll_commerce,
        }
    }
}

/// Calculator for the Lucro Presumido regime.
///
/// Holds the municipal ISS percentage, the only rate the caller controls.
#[derive(Debug, Clone)]
pub struct PresumedProfitCalculator {
    rates: PresumedProfitRates,
    iss_percent: Decimal,
}

impl PresumedProfitCalculator {
    /// Creates a calculator for the given ISS percentage (e.g. `3` for 3%).
    ///
    /// Percentages outside `[0, 100]` are clamped.
    pub fn new(iss_percent: Decimal) -> Self {
        Self {
            rates: PresumedProfitRates::STATUTORY,
            iss_percent: clamp_percent("iss_percent", iss_percent),
        }
    }

    pub fn iss_percent(&self) -> Decimal {
        self.iss_percent
    }

    /// Calculates taxes for `total_revenue` split at `service_percent`.
    pub fn calculate(
        &self,
        total_revenue: Decimal,
        service_percent: i64,
    ) -> PresumedProfitResult {
        let split = split(total_revenue, service_percent);

        let service = self.breakdown(ActivityCategory::Servico, split.service_revenue);
        let commerce = self.breakdown(ActivityCategory::Infoproduto, split.commerce_revenue);

        let tax_lines = self.tax_lines(&service, &commerce, split.total_revenue);
        let grand_total = round_half_up(service.subtotal + commerce.subtotal);
        let grand_total_percent = percent_of(grand_total, split.total_revenue);

        let comparison = self.compare_with_full_service(split.total_revenue, grand_total);

        debug!(
            total_revenue = %split.total_revenue,
            service_percent = split.service_percent,
            grand_total = %grand_total,
            scenario_total = %comparison.scenario_total,
            "calculated Lucro Presumido"
        );

        PresumedProfitResult {
            split,
            iss_percent: self.iss_percent,
            service,
            commerce,
            tax_lines,
            grand_total,
            grand_total_percent,
            comparison,
        }
    }

    /// Applies every rate for `category` to `revenue`.
    fn breakdown(
        &self,
        category: ActivityCategory,
        revenue: Decimal,
    ) -> PresumedCategoryBreakdown {
        let pis = round_half_up(revenue * self.rates.pis);
        let cofins = round_half_up(revenue * self.rates.cofins);
        let irpj = round_half_up(revenue * self.rates.irpj(category));
        let csll = round_half_up(revenue * self.rates.csll(category));
        let iss = match category {
            ActivityCategory::Servico => Some(self.iss(revenue)),
            ActivityCategory::Infoproduto => None,
        };

        let subtotal = pis + cofins + irpj + csll + iss.unwrap_or(Decimal::ZERO);

        PresumedCategoryBreakdown {
            category,
            revenue,
            pis,
            cofins,
            irpj,
            csll,
            iss,
            subtotal,
        }
    }

    fn iss(
        &self,
        service_revenue: Decimal,
    ) -> Decimal {
        round_half_up(service_revenue * (self.iss_percent / Decimal::ONE_HUNDRED))
    }

    /// Builds the per-tax report rows.
    fn tax_lines(
        &self,
        service: &PresumedCategoryBreakdown,
        commerce: &PresumedCategoryBreakdown,
        total_revenue: Decimal,
    ) -> Vec<PresumedTaxLine> {
        PresumedTax::ALL
            .iter()
            .map(|&tax| {
                let service_amount = service.amount(tax);
                let commerce_amount = commerce.amount(tax);
                let total = service_amount + commerce_amount;
                PresumedTaxLine {
                    tax,
                    service_amount,
                    commerce_amount,
                    total,
                    revenue_percent: percent_of(total, total_revenue),
                }
            })
            .collect()
    }

    /// Recomputes the breakdown as if all revenue were service.
    fn compare_with_full_service(
        &self,
        total_revenue: Decimal,
        grand_total: Decimal,
    ) -> PresumedComparison {
        let service_scenario = self.breakdown(ActivityCategory::Servico, total_revenue);
        let scenario_total = service_scenario.subtotal;
        let difference = grand_total - scenario_total;

        // An empty scenario divides by one so the percentage stays finite.
        let denominator = if scenario_total.is_zero() {
            Decimal::ONE
        } else {
            scenario_total
        };
        let difference_percent =
            round_half_up(ratio_or_zero(difference, denominator) * Decimal::ONE_HUNDRED);

        PresumedComparison {
            service_scenario,
            scenario_total,
            difference,
            difference_percent,
        }
    }
}

/// Calculates Lucro Presumido taxes for the given revenue split and ISS rate.
///
/// `service_percent` and `iss_percent` are clamped to `[0, 100]`; negative
/// revenue is treated as zero.
pub fn compute_presumed_profit(
    total_revenue: Decimal,
    service_percent: i64,
    iss_percent: Decimal,
) -> PresumedProfitResult {
    PresumedProfitCalculator::new(iss_percent).calculate(total_revenue, service_percent)
}
