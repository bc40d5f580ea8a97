mod activity;
mod presumed_profit;
mod revenue_split;
mod simplified_regime;
mod tax_bracket;

pub use activity::{ActivityCategory, Annex};
pub use presumed_profit::{
    PresumedCategoryBreakdown, PresumedComparison, PresumedProfitResult, PresumedTax,
    PresumedTaxLine,
};
pub use revenue_split::RevenueSplit;
pub use simplified_regime::{SimplifiedCategoryLine, SimplifiedComparison, SimplifiedRegimeResult};
pub use tax_bracket::TaxBracket;
