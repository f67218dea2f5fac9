//! Progressive (marginal) tax computation over a bracket table.
//!
//! Income is split across brackets and each slice is taxed only at its own
//! bracket's rate, so crossing a threshold never raises the tax on income
//! below it.
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Resolve the jurisdiction's bracket table |
//! | 2    | Reject negative income |
//! | 3    | For each bracket, tax `min(income, hi) - lo` at the bracket rate, stopping once `income <= hi` |
//! | 4    | Marginal rate: rate of the last bracket touched |
//! | 5    | Effective rate: liability / income (zero for zero income) |
//! | 6    | Net income: income - liability |
//!
//! The liability is summed exactly and rounded once, to the smallest
//! currency unit, at the end. Net income is derived from the rounded figure
//! so `net_income + tax_liability == gross_income` always holds.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::calculations::TaxEngine;
//! use tax_core::{JurisdictionRegistry, TaxpayerInput};
//!
//! let registry = JurisdictionRegistry::with_builtin();
//! let engine = TaxEngine::new(&registry);
//!
//! let result = engine.compute(&TaxpayerInput::new("IN", dec!(1200000))).unwrap();
//!
//! assert_eq!(result.tax_liability, dec!(172500));
//! assert_eq!(result.net_income, dec!(1027500));
//! assert_eq!(result.marginal_rate, dec!(0.30));
//! ```

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::round_half_up;
use crate::error::TaxError;
use crate::models::{BracketTable, TaxResult, TaxpayerInput, UpperBound};
use crate::registry::JurisdictionRegistry;

/// Applies one bracket table to an income.
#[derive(Debug, Clone, Copy)]
pub struct ProgressiveTaxCalculator<'a> {
    table: &'a BracketTable,
}

impl<'a> ProgressiveTaxCalculator<'a> {
    pub fn new(table: &'a BracketTable) -> Self {
        Self { table }
    }

    /// Computes liability, net income and rates for `income`.
    ///
    /// # Errors
    ///
    /// Returns [`TaxError::InvalidInput`] when `income` is negative.
    pub fn calculate(
        &self,
        income: Decimal,
    ) -> Result<TaxResult, TaxError> {
        if income < Decimal::ZERO {
            return Err(TaxError::InvalidInput(format!(
                "gross income must not be negative, got {income}"
            )));
        }

        let tax_liability = round_half_up(self.walk(income));
        let marginal_rate = self.table.bracket_for(income).rate;

        let effective_rate = if income > Decimal::ZERO {
            tax_liability / income
        } else {
            Decimal::ZERO
        };

        Ok(TaxResult {
            jurisdiction_code: self.table.jurisdiction_code().to_string(),
            gross_income: income,
            tax_liability,
            net_income: income - tax_liability,
            effective_rate,
            marginal_rate,
        })
    }

    /// Accumulates the unrounded liability, stopping at the bracket the
    /// income ends in.
    fn walk(
        &self,
        income: Decimal,
    ) -> Decimal {
        let mut liability = Decimal::ZERO;
        let mut lower = Decimal::ZERO;

        for bracket in self.table.brackets() {
            match bracket.upper_bound {
                UpperBound::Bounded(upper) if income > upper => {
                    liability += (upper - lower) * bracket.rate;
                    lower = upper;
                }
                _ => {
                    liability += (income - lower) * bracket.rate;
                    break;
                }
            }
        }

        liability
    }
}

/// Resolves jurisdictions through a registry and computes tax for them.
///
/// Holds no state between calls; results belong to the caller.
#[derive(Debug, Clone, Copy)]
pub struct TaxEngine<'a> {
    registry: &'a JurisdictionRegistry,
}

impl<'a> TaxEngine<'a> {
    pub fn new(registry: &'a JurisdictionRegistry) -> Self {
        Self { registry }
    }

    /// Computes the tax result for `input`.
    ///
    /// # Errors
    ///
    /// * [`TaxError::UnknownJurisdiction`] when the code is not registered.
    /// * [`TaxError::InvalidInput`] when the income is negative.
    pub fn compute(
        &self,
        input: &TaxpayerInput,
    ) -> Result<TaxResult, TaxError> {
        let table = self.registry.resolve_table(&input.jurisdiction_code)?;

        if input.has_refinements() {
            debug!(
                jurisdiction = table.jurisdiction_code(),
                filing_status = ?input.filing_status,
                deductions = ?input.deductions_claimed,
                dependents = ?input.dependent_count,
                age = ?input.age,
                "refinement fields are not applied to the computation"
            );
        }

        let result = ProgressiveTaxCalculator::new(table).calculate(input.gross_income)?;

        debug!(
            jurisdiction = %result.jurisdiction_code,
            income = %result.gross_income,
            liability = %result.tax_liability,
            marginal_rate = %result.marginal_rate,
            "computed tax"
        );

        Ok(result)
    }
}
