use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One bracket ("faixa") of a Simples Nacional annex.
///
/// `upper_bound` is inclusive. `nominal_rate` is a fraction (0.06 for 6%),
/// and `deduction` is the fixed amount subtracted from `RBT12 × nominal_rate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub lower_bound: Decimal,
    pub upper_bound: Decimal,
    pub nominal_rate: Decimal,
    pub deduction: Decimal,
}
