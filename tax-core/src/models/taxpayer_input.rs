use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::FilingStatusCode;

/// Inputs for one tax computation.
///
/// Only `gross_income` and `jurisdiction_code` feed the arithmetic. The
/// refinement fields are carried for callers that collect them, but no
/// deduction, filing-status, dependent or age rules are applied yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxpayerInput {
    pub gross_income: Decimal,
    pub jurisdiction_code: String,

    pub filing_status: Option<FilingStatusCode>,
    pub deductions_claimed: Option<Decimal>,
    pub dependent_count: Option<u32>,
    pub age: Option<u32>,
}

impl TaxpayerInput {
    pub fn new(
        jurisdiction_code: impl Into<String>,
        gross_income: Decimal,
    ) -> Self {
        Self {
            gross_income,
            jurisdiction_code: jurisdiction_code.into(),
            filing_status: None,
            deductions_claimed: None,
            dependent_count: None,
            age: None,
        }
    }

    /// Whether any refinement field was supplied.
    pub fn has_refinements(&self) -> bool {
        self.filing_status.is_some()
            || self.deductions_claimed.is_some()
            || self.dependent_count.is_some()
            || self.age.is_some()
    }
}
