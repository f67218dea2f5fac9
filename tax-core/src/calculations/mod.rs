//! Tax computation and strategy scoring.
//!
//! [`progressive`] applies a jurisdiction's bracket table to an income;
//! [`optimization`] sums the savings of caller-selected strategies.

pub mod common;
pub mod optimization;
pub mod progressive;

pub use optimization::{OptimizationSelection, StrategyCatalog};
pub use progressive::{ProgressiveTaxCalculator, TaxEngine};
