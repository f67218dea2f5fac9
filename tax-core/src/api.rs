//! Request and response shapes exchanged with presentation-layer callers.
//!
//! Field names are camelCase on the wire. Monetary values are accepted as
//! JSON numbers or strings and written back as decimal strings, so no
//! precision is lost in either direction.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::{OptimizationSelection, StrategyCatalog, TaxEngine};
use crate::error::TaxError;
use crate::models::{FilingStatusCode, TaxResult, TaxpayerInput};
use crate::registry::JurisdictionRegistry;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeRequest {
    pub jurisdiction_code: String,
    pub gross_income: Decimal,
    #[serde(default)]
    pub filing_status: Option<String>,
    #[serde(default)]
    pub deductions_claimed: Option<Decimal>,
    #[serde(default)]
    pub dependent_count: Option<u32>,
    #[serde(default)]
    pub age: Option<u32>,
}

impl TryFrom<ComputeRequest> for TaxpayerInput {
    type Error = TaxError;

    fn try_from(request: ComputeRequest) -> Result<Self, Self::Error> {
        let filing_status = request
            .filing_status
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(|s| {
                FilingStatusCode::parse(s)
                    .ok_or_else(|| TaxError::InvalidInput(format!("unknown filing status '{s}'")))
            })
            .transpose()?;

        Ok(TaxpayerInput {
            gross_income: request.gross_income,
            jurisdiction_code: request.jurisdiction_code,
            filing_status,
            deductions_claimed: request.deductions_claimed,
            dependent_count: request.dependent_count,
            age: request.age,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationRequest {
    #[serde(default)]
    pub selected_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationResponse {
    pub total_savings: Decimal,
    pub selected_ids: Vec<String>,
}

/// Runs a compute request against `registry`.
///
/// # Errors
///
/// Propagates [`TaxError::UnknownJurisdiction`] and
/// [`TaxError::InvalidInput`] from request conversion and computation.
pub fn handle_compute(
    registry: &JurisdictionRegistry,
    request: ComputeRequest,
) -> Result<TaxResult, TaxError> {
    let input = TaxpayerInput::try_from(request)?;
    TaxEngine::new(registry).compute(&input)
}

/// Totals the savings of the requested strategy ids. Duplicate and unknown
/// ids are tolerated.
pub fn handle_optimization(
    catalog: &StrategyCatalog,
    request: OptimizationRequest,
) -> OptimizationResponse {
    let selection: OptimizationSelection = request.selected_ids.into_iter().collect();

    OptimizationResponse {
        total_savings: catalog.total_savings(&selection),
        selected_ids: selection.ids().map(str::to_string).collect(),
    }
}
