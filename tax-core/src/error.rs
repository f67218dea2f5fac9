use rust_decimal::Decimal;
use thiserror::Error;

/// Reasons a bracket table is rejected at registration time.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BracketTableError {
    /// The table has no brackets at all.
    #[error("bracket table has no brackets")]
    Empty,

    /// No bracket is unbounded, so incomes above the last bound are not covered.
    #[error("bracket table has no unbounded top bracket")]
    MissingUnboundedBracket,

    /// An unbounded bracket appears before the end of the table.
    #[error("unbounded bracket at index {index} is not the last bracket")]
    UnboundedNotLast { index: usize },

    /// A marginal rate lies outside `[0, 1]`.
    #[error("rate {rate} at index {index} must be between 0 and 1")]
    RateOutOfRange { index: usize, rate: Decimal },

    /// A bounded upper bound is zero or negative.
    #[error("upper bound {bound} at index {index} must be positive")]
    NonPositiveBound { index: usize, bound: Decimal },

    /// Upper bounds are not strictly increasing.
    #[error("upper bound {bound} at index {index} must exceed the previous bound {previous}")]
    NonIncreasingBound {
        index: usize,
        bound: Decimal,
        previous: Decimal,
    },
}

/// Errors reported to callers of the tax engine, the registry, and the
/// optimization scorer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaxError {
    /// Negative or non-numeric income, or an unrecognised refinement value.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// No bracket table is registered for the requested code.
    #[error("unknown jurisdiction '{code}'; available: {available:?}")]
    UnknownJurisdiction {
        code: String,
        available: Vec<String>,
    },

    /// A jurisdiction definition failed validation and was not registered.
    #[error("invalid bracket table for '{code}': {source}")]
    InvalidBracketTable {
        code: String,
        #[source]
        source: BracketTableError,
    },

    /// A strategy catalog failed validation.
    #[error("invalid strategy catalog: {0}")]
    InvalidStrategyCatalog(String),
}
