use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrategyCategory {
    Retirement,
    Healthcare,
    Deductions,
}

/// One entry of the savings-strategy catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationStrategy {
    pub id: String,
    pub title: String,
    pub description: String,
    pub potential_savings: Decimal,
    pub difficulty: Difficulty,
    pub category: StrategyCategory,
}
