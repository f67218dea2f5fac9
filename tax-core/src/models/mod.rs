mod filing_status;
mod jurisdiction;
mod optimization;
mod tax_bracket;
mod tax_result;
mod taxpayer_input;

pub use filing_status::FilingStatusCode;
pub use jurisdiction::{DigitGrouping, Jurisdiction, JurisdictionDefinition, normalize_code};
pub use optimization::{Difficulty, OptimizationStrategy, StrategyCategory};
pub use tax_bracket::{Bracket, BracketTable, ScheduleRow, UpperBound};
pub use tax_result::TaxResult;
pub use taxpayer_input::TaxpayerInput;
