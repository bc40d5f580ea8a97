//! Simples Nacional bracket tables.
//!
//! The statutory tables for Anexo I (commerce) and Anexo III (services) are
//! compiled in as `static` data. Both cover revenue from zero up to the
//! regime ceiling of R$ 4.800.000,00 in six contiguous brackets, where each
//! lower bound sits exactly one cent above the previous upper bound.
//!
//! | Faixa | Up to        | Anexo I rate | Anexo I deduction | Anexo III rate | Anexo III deduction |
//! |-------|--------------|--------------|-------------------|----------------|---------------------|
//! | 1     | 180.000,00   | 4,00%        | 0,00              | 6,00%          | 0,00                |
//! | 2     | 360.000,00   | 7,30%        | 5.940,00          | 11,20%         | 9.360,00            |
//! | 3     | 720.000,00   | 9,50%        | 13.860,00         | 13,50%         | 17.640,00           |
//! | 4     | 1.800.000,00 | 10,70%       | 22.500,00         | 16,00%         | 35.640,00           |
//! | 5     | 3.600.000,00 | 14,30%       | 87.300,00         | 21,00%         | 125.640,00          |
//! | 6     | 4.800.000,00 | 19,00%       | 378.000,00        | 33,00%         | 648.000,00          |
//!
//! Custom tables (e.g. loaded from CSV) go through [`BracketTable::from_brackets`],
//! which applies the same validation as [`validate_statutory_tables`].

use std::borrow::Cow;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use thiserror::Error;

use crate::{Annex, TaxBracket};

/// Distance between one bracket's upper bound and the next one's lower bound.
pub const BRACKET_STEP: Decimal = dec!(0.01);

/// Errors raised when a bracket table breaks its structural invariants.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BracketTableError {
    #[error("{annex} has no brackets")]
    Empty { annex: Annex },

    #[error("{annex} must start at zero, first bracket starts at {lower_bound}")]
    NonZeroStart { annex: Annex, lower_bound: Decimal },

    #[error("{annex} bracket {bracket}: lower bound {lower_bound} exceeds upper bound {upper_bound}")]
    InvertedBounds {
        annex: Annex,
        bracket: usize,
        lower_bound: Decimal,
        upper_bound: Decimal,
    },

    #[error("{annex} bracket {bracket}: expected lower bound {expected}, got {found}")]
    NotContiguous {
        annex: Annex,
        bracket: usize,
        expected: Decimal,
        found: Decimal,
    },

    #[error("{annex} bracket {bracket}: nominal rate must be in (0, 1], got {rate}")]
    InvalidRate {
        annex: Annex,
        bracket: usize,
        rate: Decimal,
    },

    #[error("{annex} bracket {bracket}: nominal rate {rate} is below the previous bracket")]
    DecreasingRate {
        annex: Annex,
        bracket: usize,
        rate: Decimal,
    },

    #[error("{annex} bracket {bracket}: deduction {deduction} is negative or below the previous bracket")]
    InvalidDeduction {
        annex: Annex,
        bracket: usize,
        deduction: Decimal,
    },

    #[error("expected a table for {expected}, got {found}")]
    AnnexMismatch { expected: Annex, found: Annex },
}

/// An ordered, contiguous Simples Nacional bracket table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketTable {
    annex: Annex,
    brackets: Cow<'static, [TaxBracket]>,
}

const fn bracket(
    lower_bound: Decimal,
    upper_bound: Decimal,
    nominal_rate: Decimal,
    deduction: Decimal,
) -> TaxBracket {
    TaxBracket {
        lower_bound,
        upper_bound,
        nominal_rate,
        deduction,
    }
}

const ANEXO_I_BRACKETS: [TaxBracket; 6] = [
    bracket(dec!(0.00), dec!(180000.00), dec!(0.04), dec!(0.00)),
    bracket(dec!(180000.01), dec!(360000.00), dec!(0.073), dec!(5940.00)),
    bracket(dec!(360000.01), dec!(720000.00), dec!(0.095), dec!(13860.00)),
    bracket(dec!(720000.01), dec!(1800000.00), dec!(0.107), dec!(22500.00)),
    bracket(dec!(1800000.01), dec!(3600000.00), dec!(0.143), dec!(87300.00)),
    bracket(dec!(3600000.01), dec!(4800000.00), dec!(0.19), dec!(378000.00)),
];

const ANEXO_III_BRACKETS: [TaxBracket; 6] = [
    bracket(dec!(0.00), dec!(180000.00), dec!(0.06), dec!(0.00)),
    bracket(dec!(180000.01), dec!(360000.00), dec!(0.112), dec!(9360.00)),
    bracket(dec!(360000.01), dec!(720000.00), dec!(0.135), dec!(17640.00)),
    bracket(dec!(720000.01), dec!(1800000.00), dec!(0.16), dec!(35640.00)),
    bracket(dec!(1800000.01), dec!(3600000.00), dec!(0.21), dec!(125640.00)),
    bracket(dec!(3600000.01), dec!(4800000.00), dec!(0.33), dec!(648000.00)),
];

/// Statutory Anexo I table (commerce and infoproduct revenue).
pub static ANEXO_I: BracketTable = BracketTable {
    annex: Annex::AnexoI,
    brackets: Cow::Borrowed(&ANEXO_I_BRACKETS),
};

/// Statutory Anexo III table (service revenue).
pub static ANEXO_III: BracketTable = BracketTable {
    annex: Annex::AnexoIII,
    brackets: Cow::Borrowed(&ANEXO_III_BRACKETS),
};

/// Returns the compiled-in table for `annex`.
pub fn statutory(annex: Annex) -> &'static BracketTable {
    match annex {
        Annex::AnexoI => &ANEXO_I,
        Annex::AnexoIII => &ANEXO_III,
    }
}

/// Checks both compiled-in tables. Front-ends call this once at start-up.
pub fn validate_statutory_tables() -> Result<(), BracketTableError> {
    ANEXO_I.validate()?;
    ANEXO_III.validate()
}

impl BracketTable {
    /// Builds a table from caller-supplied brackets, validating it first.
    ///
    /// # Errors
    ///
    /// Returns [`BracketTableError`] when the brackets are empty, do not start
    /// at zero, overlap or leave gaps, or carry decreasing rates/deductions.
    pub fn from_brackets(
        annex: Annex,
        brackets: Vec<TaxBracket>,
    ) -> Result<Self, BracketTableError> {
        let table = Self {
            annex,
            brackets: Cow::Owned(brackets),
        };
        table.validate()?;
        Ok(table)
    }

    pub fn annex(&self) -> Annex {
        self.annex
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// The highest revenue the table covers. Above it the business is
    /// disqualified from the regime.
    pub fn ceiling(&self) -> Decimal {
        self.brackets
            .last()
            .map_or(Decimal::ZERO, |last| last.upper_bound)
    }

    /// Verifies ordering, contiguity and monotonicity.
    pub fn validate(&self) -> Result<(), BracketTableError> {
        let annex = self.annex;
        let first = self
            .brackets
            .first()
            .ok_or(BracketTableError::Empty { annex })?;

        if !first.lower_bound.is_zero() {
            return Err(BracketTableError::NonZeroStart {
                annex,
                lower_bound: first.lower_bound,
            });
        }

        let mut previous: Option<&TaxBracket> = None;
        for (index, current) in self.brackets.iter().enumerate() {
            let number = index + 1;

            if current.lower_bound > current.upper_bound {
                return Err(BracketTableError::InvertedBounds {
                    annex,
                    bracket: number,
                    lower_bound: current.lower_bound,
                    upper_bound: current.upper_bound,
                });
            }

            if current.nominal_rate <= Decimal::ZERO || current.nominal_rate > Decimal::ONE {
                return Err(BracketTableError::InvalidRate {
                    annex,
                    bracket: number,
                    rate: current.nominal_rate,
                });
            }

            if current.deduction < Decimal::ZERO {
                return Err(BracketTableError::InvalidDeduction {
                    annex,
                    bracket: number,
                    deduction: current.deduction,
                });
            }

            if let Some(prev) = previous {
                let expected = prev.upper_bound.checked_add(BRACKET_STEP);
                if expected != Some(current.lower_bound) {
                    return Err(BracketTableError::NotContiguous {
                        annex,
                        bracket: number,
                        expected: expected.unwrap_or(Decimal::MAX),
                        found: current.lower_bound,
                    });
                }
                if current.nominal_rate < prev.nominal_rate {
                    return Err(BracketTableError::DecreasingRate {
                        annex,
                        bracket: number,
                        rate: current.nominal_rate,
                    });
                }
                if current.deduction < prev.deduction {
                    return Err(BracketTableError::InvalidDeduction {
                        annex,
                        bracket: number,
                        deduction: current.deduction,
                    });
                }
            }

            previous = Some(current);
        }

        Ok(())
    }
}
