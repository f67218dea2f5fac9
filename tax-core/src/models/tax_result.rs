use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Outcome of a tax computation. Rates are fractions in `[0, 1]`; monetary
/// fields are in the jurisdiction's own currency units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxResult {
    pub jurisdiction_code: String,
    pub gross_income: Decimal,
    pub tax_liability: Decimal,
    pub net_income: Decimal,
    pub effective_rate: Decimal,
    pub marginal_rate: Decimal,
}
