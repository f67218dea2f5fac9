//! Jurisdictions and strategies available without any external data.

use rust_decimal::Decimal;

use crate::models::{
    Bracket, DigitGrouping, Difficulty, FilingStatusCode, JurisdictionDefinition,
    OptimizationStrategy, StrategyCategory,
};

/// Whole currency units with a two-place rate, e.g. `rate(22)` = 0.22.
fn rate(percent: i64) -> Decimal {
    Decimal::new(percent, 2)
}

fn amount(units: i64) -> Decimal {
    Decimal::from(units)
}

/// United States, 2024 tax year.
pub fn united_states() -> JurisdictionDefinition {
    JurisdictionDefinition {
        code: "US".to_string(),
        name: "United States".to_string(),
        currency_code: "USD".to_string(),
        currency_symbol: "$".to_string(),
        period_label: "2024 tax year".to_string(),
        digit_grouping: DigitGrouping::Thousands,
        filing_statuses: vec![
            FilingStatusCode::Single,
            FilingStatusCode::MarriedFilingJointly,
            FilingStatusCode::MarriedFilingSeparately,
            FilingStatusCode::HeadOfHousehold,
        ],
        brackets: vec![
            Bracket::bounded(amount(10_275), rate(10)),
            Bracket::bounded(amount(41_775), rate(12)),
            Bracket::bounded(amount(89_450), rate(22)),
            Bracket::bounded(amount(190_750), rate(24)),
            Bracket::bounded(amount(364_200), rate(32)),
            Bracket::bounded(amount(462_500), rate(35)),
            Bracket::unbounded(rate(37)),
        ],
    }
}

/// India, FY 2024-25.
pub fn india() -> JurisdictionDefinition {
    JurisdictionDefinition {
        code: "IN".to_string(),
        name: "India".to_string(),
        currency_code: "INR".to_string(),
        currency_symbol: "₹".to_string(),
        period_label: "FY 2024-25".to_string(),
        digit_grouping: DigitGrouping::Indian,
        filing_statuses: vec![
            FilingStatusCode::Individual,
            FilingStatusCode::HinduUndividedFamily,
            FilingStatusCode::SeniorCitizen,
            FilingStatusCode::SuperSeniorCitizen,
        ],
        brackets: vec![
            Bracket::bounded(amount(250_000), rate(0)),
            Bracket::bounded(amount(500_000), rate(5)),
            Bracket::bounded(amount(1_000_000), rate(20)),
            Bracket::unbounded(rate(30)),
        ],
    }
}

pub fn jurisdictions() -> Vec<JurisdictionDefinition> {
    vec![united_states(), india()]
}

pub fn strategies() -> Vec<OptimizationStrategy> {
    vec![
        OptimizationStrategy {
            id: "retirement".to_string(),
            title: "Maximize Retirement Contributions".to_string(),
            description: "Contribute to 401(k), IRA, or other retirement accounts".to_string(),
            potential_savings: amount(2_450),
            difficulty: Difficulty::Easy,
            category: StrategyCategory::Retirement,
        },
        OptimizationStrategy {
            id: "hsa".to_string(),
            title: "Health Savings Account (HSA)".to_string(),
            description: "Triple tax advantage for medical expenses".to_string(),
            potential_savings: amount(980),
            difficulty: Difficulty::Easy,
            category: StrategyCategory::Healthcare,
        },
        OptimizationStrategy {
            id: "charitable".to_string(),
            title: "Charitable Donations".to_string(),
            description: "Donate to qualified charities for deductions".to_string(),
            potential_savings: amount(1_200),
            difficulty: Difficulty::Medium,
            category: StrategyCategory::Deductions,
        },
    ]
}
