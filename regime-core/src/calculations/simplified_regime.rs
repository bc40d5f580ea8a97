//! Simples Nacional calculator.
//!
//! # Calculation Steps
//!
//! 1. Split the period revenue between Serviço and Infoproduto.
//! 2. Determine RBT12 from the activity duration and the accumulated revenue
//!    (see [`crate::calculations::rbt12`]).
//! 3. Resolve the effective rate independently in Anexo III (services) and
//!    Anexo I (infoproduct/commerce).
//! 4. Tax each category's actual revenue at its effective rate.
//! 5. Tax the whole revenue at the Anexo III rate to obtain the all-service
//!    counterfactual, and report the economy of the actual split against it.
//!
//! An RBT12 above the regime ceiling stops the calculation with
//! [`SimplifiedRegimeError::Disqualified`]; no partial result is produced.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use regime_core::compute_simplified_regime;
//!
//! let result = compute_simplified_regime(dec!(10000), 100, None, false, 0).unwrap();
//!
//! assert_eq!(result.rbt12, dec!(120000));
//! assert_eq!(result.service.effective_rate, dec!(0.06));
//! assert_eq!(result.service.tax_amount, dec!(600.00));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::calculations::bracket_resolver::{BracketResolution, resolve};
use crate::calculations::brackets::{ANEXO_I, ANEXO_III, BracketTable, BracketTableError};
use crate::calculations::common::{ratio_or_zero, round_half_up};
use crate::calculations::rbt12::{ActivityDuration, determine_rbt12};
use crate::calculations::splitter::split;
use crate::{
    ActivityCategory, Annex, SimplifiedCategoryLine, SimplifiedComparison, SimplifiedRegimeResult,
};

/// Errors that stop a Simples Nacional calculation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimplifiedRegimeError {
    /// RBT12 exceeds the regime ceiling; the business cannot opt for Simples Nacional.
    #[error("RBT12 of {rbt12} exceeds the Simples Nacional ceiling of {ceiling}")]
    Disqualified { rbt12: Decimal, ceiling: Decimal },

    /// A bracket table handed to the calculator is unusable.
    #[error("invalid bracket table: {0}")]
    InvalidTable(#[from] BracketTableError),
}

/// Input values for a Simples Nacional calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimplifiedRegimeInput {
    /// Revenue invoiced in the period being taxed.
    pub total_revenue: Decimal,

    /// Percentage of revenue that is service; clamped to `[0, 100]`.
    pub service_percent: i64,

    /// Revenue accumulated over the last 12 months (or since opening).
    /// `None` when the field was left blank.
    pub rbt12_input: Option<Decimal>,

    pub duration: ActivityDuration,
}

/// Calculator for the Simples Nacional regime.
///
/// Borrows the two annex tables so custom tables can be supplied without copying.
#[derive(Debug, Clone, Copy)]
pub struct SimplifiedRegimeCalculator<'a> {
    anexo_i: &'a BracketTable,
    anexo_iii: &'a BracketTable,
}

impl SimplifiedRegimeCalculator<'static> {
    /// Calculator backed by the compiled-in statutory tables.
    pub fn statutory() -> Self {
        Self {
            anexo_i: &ANEXO_I,
            anexo_iii: &ANEXO_III,
        }
    }
}

impl<'a> SimplifiedRegimeCalculator<'a> {
    /// Creates a calculator over caller-supplied tables.
    ///
    /// # Errors
    ///
    /// Returns [`BracketTableError::AnnexMismatch`] (wrapped) when a table is
    /// passed in the wrong slot.
    pub fn with_tables(
        anexo_i: &'a BracketTable,
        anexo_iii: &'a BracketTable,
    ) -> Result<Self, SimplifiedRegimeError> {
        for (expected, table) in [(Annex::AnexoI, anexo_i), (Annex::AnexoIII, anexo_iii)] {
            if table.annex() != expected {
                return Err(BracketTableError::AnnexMismatch {
                    expected,
                    found: table.annex(),
                }
                .into());
            }
        }
        Ok(Self { anexo_i, anexo_iii })
    }

    fn table(
        &self,
        category: ActivityCategory,
    ) -> &'a BracketTable {
        match Annex::for_category(category) {
            Annex::AnexoI => self.anexo_i,
            Annex::AnexoIII => self.anexo_iii,
        }
    }

    /// Runs the full calculation.
    ///
    /// # Errors
    ///
    /// Returns [`SimplifiedRegimeError::Disqualified`] when RBT12 exceeds the
    /// ceiling of either annex.
    pub fn calculate(
        &self,
        input: &SimplifiedRegimeInput,
    ) -> Result<SimplifiedRegimeResult, SimplifiedRegimeError> {
        let split = split(input.total_revenue, input.service_percent);
        let rbt12 = determine_rbt12(split.total_revenue, input.rbt12_input, input.duration);

        let service_resolution = self.resolve_category(ActivityCategory::Servico, rbt12)?;
        let commerce_resolution = self.resolve_category(ActivityCategory::Infoproduto, rbt12)?;

        let service = category_line(
            ActivityCategory::Servico,
            service_resolution,
            split.service_revenue,
            split.service_percent,
        );
        let commerce = category_line(
            ActivityCategory::Infoproduto,
            commerce_resolution,
            split.commerce_revenue,
            split.commerce_percent,
        );

        let total_tax = service.tax_amount + commerce.tax_amount;
        let overall_effective_rate = ratio_or_zero(total_tax, split.total_revenue);

        let comparison = SimplifiedComparison {
            service_effective_rate: service_resolution.effective_rate,
            full_service_tax: round_half_up(
                split.total_revenue * service_resolution.effective_rate,
            ),
        };
        let economy_amount = comparison.full_service_tax - total_tax;

        debug!(
            rbt12 = %rbt12,
            total_tax = %total_tax,
            full_service_tax = %comparison.full_service_tax,
            economy_amount = %economy_amount,
            "calculated Simples Nacional"
        );

        Ok(SimplifiedRegimeResult {
            split,
            rbt12,
            service,
            commerce,
            total_tax,
            overall_effective_rate,
            comparison,
            economy_amount,
        })
    }

    fn resolve_category(
        &self,
        category: ActivityCategory,
        rbt12: Decimal,
    ) -> Result<BracketResolution, SimplifiedRegimeError> {
        resolve(self.table(category), rbt12).inspect_err(|err| {
            warn!(category = %category, error = %err, "Simples Nacional calculation blocked");
        })
    }
}

fn category_line(
    category: ActivityCategory,
    resolution: BracketResolution,
    revenue: Decimal,
    share_percent: u8,
) -> SimplifiedCategoryLine {
    SimplifiedCategoryLine {
        category,
        annex: Annex::for_category(category),
        bracket_number: resolution.bracket_number,
        revenue_share: revenue,
        share_percent,
        nominal_rate: resolution.nominal_rate,
        deduction_applied: resolution.deduction,
        effective_rate: resolution.effective_rate,
        tax_amount: round_half_up(revenue * resolution.effective_rate),
    }
}

/// Calculates Simples Nacional taxes with the statutory tables.
///
/// `rbt12_input` is `None` when the accumulated-revenue field was left blank.
/// `months_of_activity` only matters when `is_less_than_12_months` is set.
///
/// # Errors
///
/// Returns [`SimplifiedRegimeError::Disqualified`] when the annualized
/// revenue exceeds R$ 4.800.000,00.
pub fn compute_simplified_regime(
    total_revenue: Decimal,
    service_percent: i64,
    rbt12_input: Option<Decimal>,
    is_less_than_12_months: bool,
    months_of_activity: u32,
) -> Result<SimplifiedRegimeResult, SimplifiedRegimeError> {
    let input = SimplifiedRegimeInput {
        total_revenue,
        service_percent,
        rbt12_input,
        duration: ActivityDuration::from_flag(is_less_than_12_months, months_of_activity),
    };
    SimplifiedRegimeCalculator::statutory().calculate(&input)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::TaxBracket;

    fn steady_input(
        total_revenue: Decimal,
        service_percent: i64,
    ) -> SimplifiedRegimeInput {
        SimplifiedRegimeInput {
            total_revenue,
            service_percent,
            rbt12_input: None,
            duration: ActivityDuration::TwelveMonthsOrMore,
        }
    }

    // =========================================================================
    // first bracket tests
    // =========================================================================

    #[test]
    fn all_service_first_bracket() {
        let result = SimplifiedRegimeCalculator::statutory()
            .calculate(&steady_input(dec!(10000), 100))
            .unwrap();

        assert_eq!(result.rbt12, dec!(120000));
        assert_eq!(
            result.service,
            SimplifiedCategoryLine {
                category: ActivityCategory::Servico,
                annex: Annex::AnexoIII,
                bracket_number: 1,
                revenue_share: dec!(10000),
                share_percent: 100,
                nominal_rate: dec!(0.06),
                deduction_applied: dec!(0),
                effective_rate: dec!(0.06),
                tax_amount: dec!(600.00),
            }
        );
        assert_eq!(result.commerce.tax_amount, Decimal::ZERO);
        assert_eq!(result.total_tax, dec!(600.00));
        assert_eq!(result.overall_effective_rate, dec!(0.06));
        assert_eq!(result.economy_amount, Decimal::ZERO);
    }

    #[test]
    fn new_business_first_month_extrapolates() {
        let result = compute_simplified_regime(dec!(5000), 100, None, true, 1).unwrap();

        assert_eq!(result.rbt12, dec!(60000));
        assert_eq!(result.service.tax_amount, dec!(300.00));
    }

    // =========================================================================
    // mixed split tests
    // =========================================================================

    #[test]
    fn mixed_split_uses_each_annex() {
        // RBT12 = 20000 × 12 = 240000, second bracket in both annexes.
        let result = SimplifiedRegimeCalculator::statutory()
            .calculate(&steady_input(dec!(20000), 50))
            .unwrap();

        assert_eq!(result.service.bracket_number, 2);
        assert_eq!(result.service.effective_rate, dec!(0.073));
        assert_eq!(result.service.tax_amount, dec!(730.00));

        assert_eq!(result.commerce.annex, Annex::AnexoI);
        assert_eq!(result.commerce.bracket_number, 2);
        assert_eq!(result.commerce.deduction_applied, dec!(5940));
        assert_eq!(result.commerce.effective_rate, dec!(0.04825));
        assert_eq!(result.commerce.tax_amount, dec!(482.50));

        assert_eq!(result.total_tax, dec!(1212.50));
        assert_eq!(result.overall_effective_rate, dec!(0.060625));
    }

    #[test]
    fn mixed_split_reports_economy_against_full_service() {
        let result = SimplifiedRegimeCalculator::statutory()
            .calculate(&steady_input(dec!(20000), 50))
            .unwrap();

        assert_eq!(result.comparison.service_effective_rate, dec!(0.073));
        assert_eq!(result.comparison.full_service_tax, dec!(1460.00));
        assert_eq!(result.economy_amount, dec!(247.50));
    }

    #[test]
    fn supplied_rbt12_drives_bracket_not_period_revenue() {
        let input = SimplifiedRegimeInput {
            rbt12_input: Some(dec!(4800000)),
            ..steady_input(dec!(10000), 100)
        };

        let result = SimplifiedRegimeCalculator::statutory()
            .calculate(&input)
            .unwrap();

        assert_eq!(result.service.bracket_number, 6);
        assert_eq!(result.service.effective_rate, dec!(0.195));
        assert_eq!(result.service.tax_amount, dec!(1950.00));
    }

    #[test]
    fn blank_accumulated_in_later_month_forces_first_bracket() {
        let result = compute_simplified_regime(dec!(300000), 100, None, true, 6).unwrap();

        assert_eq!(result.rbt12, Decimal::ZERO);
        assert_eq!(result.service.bracket_number, 1);
        assert_eq!(result.service.effective_rate, dec!(0.06));
    }

    // =========================================================================
    // disqualification tests
    // =========================================================================

    #[test]
    fn rbt12_above_ceiling_is_disqualified() {
        let result = SimplifiedRegimeCalculator::statutory().calculate(&steady_input(dec!(500000), 50));

        assert_eq!(
            result,
            Err(SimplifiedRegimeError::Disqualified {
                rbt12: dec!(6000000),
                ceiling: dec!(4800000),
            })
        );
    }

    #[test]
    fn supplied_rbt12_one_cent_above_ceiling_is_disqualified() {
        let result = compute_simplified_regime(dec!(1000), 100, Some(dec!(4800000.01)), false, 0);

        assert!(matches!(
            result,
            Err(SimplifiedRegimeError::Disqualified { .. })
        ));
    }

    // =========================================================================
    // degenerate input tests
    // =========================================================================

    #[test]
    fn zero_revenue_yields_zero_tax_and_rate() {
        let result = compute_simplified_regime(Decimal::ZERO, 77, None, false, 0).unwrap();

        assert_eq!(result.rbt12, Decimal::ZERO);
        assert_eq!(result.total_tax, Decimal::ZERO);
        assert_eq!(result.overall_effective_rate, Decimal::ZERO);
        assert_eq!(result.economy_amount, Decimal::ZERO);
    }

    #[test]
    fn repeated_calls_are_identical() {
        let first = compute_simplified_regime(dec!(45678.91), 63, Some(dec!(510000)), false, 0);
        let second = compute_simplified_regime(dec!(45678.91), 63, Some(dec!(510000)), false, 0);

        assert_eq!(first, second);
    }

    // =========================================================================
    // custom table tests
    // =========================================================================

    #[test]
    fn with_tables_rejects_swapped_annexes() {
        let result = SimplifiedRegimeCalculator::with_tables(&ANEXO_III, &ANEXO_I);

        assert!(matches!(
            result,
            Err(SimplifiedRegimeError::InvalidTable(
                BracketTableError::AnnexMismatch {
                    expected: Annex::AnexoI,
                    found: Annex::AnexoIII,
                }
            ))
        ));
    }

    #[test]
    fn with_tables_uses_custom_ceiling() {
        let anexo_i = BracketTable::from_brackets(
            Annex::AnexoI,
            vec![TaxBracket {
                lower_bound: dec!(0),
                upper_bound: dec!(100000),
                nominal_rate: dec!(0.04),
                deduction: dec!(0),
            }],
        )
        .unwrap();
        let calculator = SimplifiedRegimeCalculator::with_tables(&anexo_i, &ANEXO_III).unwrap();

        let result = calculator.calculate(&steady_input(dec!(10000), 50));

        assert_eq!(
            result,
            Err(SimplifiedRegimeError::Disqualified {
                rbt12: dec!(120000),
                ceiling: dec!(100000),
            })
        );
    }
}
