//! Effective-rate resolution against a Simples Nacional annex.
//!
//! The bracket is chosen by the annualized revenue base (RBT12), and the
//! resulting effective rate is later applied to the period's actual revenue:
//!
//! ```text
//! effective_rate = (RBT12 × nominal_rate − deduction) / RBT12
//! ```
//!
//! When RBT12 is zero the nominal rate is returned directly.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::brackets::BracketTable;
use crate::calculations::simplified_regime::SimplifiedRegimeError;

/// The bracket selected for a given RBT12 and the rate it yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketResolution {
    /// 1-based bracket number ("faixa").
    pub bracket_number: usize,
    pub nominal_rate: Decimal,
    pub deduction: Decimal,
    pub effective_rate: Decimal,
}

/// Resolves the effective rate that `rbt12` qualifies for in `table`.
///
/// The first bracket whose inclusive upper bound is at least `rbt12` is
/// selected. For a contiguous table that is the bracket containing `rbt12`;
/// sub-cent values between two bounds fall into the lower bracket.
///
/// # Errors
///
/// Returns [`SimplifiedRegimeError::Disqualified`] when `rbt12` exceeds the
/// table ceiling.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use regime_core::calculations::bracket_resolver::resolve;
/// use regime_core::calculations::brackets::ANEXO_III;
///
/// let resolution = resolve(&ANEXO_III, dec!(120000)).unwrap();
///
/// assert_eq!(resolution.bracket_number, 1);
/// assert_eq!(resolution.effective_rate, dec!(0.06));
/// ```
pub fn resolve(
    table: &BracketTable,
    rbt12: Decimal,
) -> Result<BracketResolution, SimplifiedRegimeError> {
    let ceiling = table.ceiling();
    if rbt12 > ceiling {
        return Err(SimplifiedRegimeError::Disqualified { rbt12, ceiling });
    }

    let (index, bracket) = table
        .brackets()
        .iter()
        .enumerate()
        .find(|(_, b)| rbt12 <= b.upper_bound)
        .ok_or(SimplifiedRegimeError::Disqualified { rbt12, ceiling })?;

    let effective_rate = if rbt12.is_zero() {
        bracket.nominal_rate
    } else {
        (rbt12 * bracket.nominal_rate - bracket.deduction) / rbt12
    };

    debug!(
        annex = %table.annex(),
        rbt12 = %rbt12,
        bracket = index + 1,
        effective_rate = %effective_rate,
        "resolved bracket"
    );

    Ok(BracketResolution {
        bracket_number: index + 1,
        nominal_rate: bracket.nominal_rate,
        deduction: bracket.deduction,
        effective_rate,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::brackets::{ANEXO_I, ANEXO_III};

    #[test]
    fn zero_rbt12_uses_first_nominal_rate_exactly() {
        for table in [&ANEXO_I, &ANEXO_III] {
            let resolution = resolve(table, Decimal::ZERO).unwrap();

            assert_eq!(resolution.bracket_number, 1);
            assert_eq!(resolution.effective_rate, table.brackets()[0].nominal_rate);
        }
    }

    #[test]
    fn first_bracket_effective_rate_equals_nominal() {
        let resolution = resolve(&ANEXO_III, dec!(120000)).unwrap();

        assert_eq!(
            resolution,
            BracketResolution {
                bracket_number: 1,
                nominal_rate: dec!(0.06),
                deduction: dec!(0),
                effective_rate: dec!(0.06),
            }
        );
    }

    #[test]
    fn upper_bound_is_inclusive() {
        let resolution = resolve(&ANEXO_I, dec!(180000.00)).unwrap();

        assert_eq!(resolution.bracket_number, 1);
    }

    #[test]
    fn one_cent_above_bound_moves_to_next_bracket() {
        let resolution = resolve(&ANEXO_I, dec!(180000.01)).unwrap();

        assert_eq!(resolution.bracket_number, 2);
        assert_eq!(resolution.nominal_rate, dec!(0.073));
        assert_eq!(resolution.deduction, dec!(5940));
    }

    #[test]
    fn sub_cent_value_between_bounds_stays_in_lower_bracket() {
        let resolution = resolve(&ANEXO_I, dec!(180000.005)).unwrap();

        assert_eq!(resolution.bracket_number, 1);
    }

    #[test]
    fn second_bracket_applies_deduction() {
        // (240000 × 0.112 − 9360) / 240000 = 17520 / 240000 = 0.073
        let resolution = resolve(&ANEXO_III, dec!(240000)).unwrap();

        assert_eq!(resolution.bracket_number, 2);
        assert_eq!(resolution.effective_rate, dec!(0.073));
    }

    #[test]
    fn commerce_and_service_rates_differ_for_same_rbt12() {
        // Anexo I: (240000 × 0.073 − 5940) / 240000 = 11580 / 240000 = 0.04825
        let commerce = resolve(&ANEXO_I, dec!(240000)).unwrap();
        let service = resolve(&ANEXO_III, dec!(240000)).unwrap();

        assert_eq!(commerce.effective_rate, dec!(0.04825));
        assert_eq!(service.effective_rate, dec!(0.073));
    }

    #[test]
    fn ceiling_is_still_eligible() {
        // (4800000 × 0.33 − 648000) / 4800000 = 936000 / 4800000 = 0.195
        let resolution = resolve(&ANEXO_III, dec!(4800000)).unwrap();

        assert_eq!(resolution.bracket_number, 6);
        assert_eq!(resolution.effective_rate, dec!(0.195));
    }

    #[test]
    fn above_ceiling_is_disqualified() {
        for rbt12 in [dec!(4800000.01), dec!(5000000), dec!(99999999)] {
            for table in [&ANEXO_I, &ANEXO_III] {
                let result = resolve(table, rbt12);

                assert_eq!(
                    result,
                    Err(SimplifiedRegimeError::Disqualified {
                        rbt12,
                        ceiling: dec!(4800000),
                    })
                );
            }
        }
    }
}
