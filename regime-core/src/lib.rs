pub mod calculations;
pub mod models;

pub use calculations::{
    BracketTableError, SimplifiedRegimeError, compute_presumed_profit, compute_simplified_regime,
};
pub use models::*;
