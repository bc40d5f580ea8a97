//! Tax calculation modules for the Lucro Presumido and Simples Nacional regimes.
//!
//! Every calculation is a pure function of its inputs: no shared mutable
//! state, no I/O. The only shared data are the read-only bracket tables in
//! [`brackets`].

pub mod bracket_resolver;
pub mod brackets;
pub mod common;
pub mod presumed_profit;
pub mod rbt12;
pub mod simplified_regime;
pub mod splitter;

pub use bracket_resolver::BracketResolution;
pub use brackets::{BracketTable, BracketTableError};
pub use presumed_profit::{PresumedProfitCalculator, PresumedProfitRates, compute_presumed_profit};
pub use rbt12::ActivityDuration;
pub use simplified_regime::{
    SimplifiedRegimeCalculator, SimplifiedRegimeError, SimplifiedRegimeInput,
    compute_simplified_regime,
};
