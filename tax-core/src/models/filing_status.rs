use serde::{Deserialize, Serialize};

/// Filing statuses offered by the built-in jurisdictions.
///
/// The engine records these but does not yet apply them to the arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilingStatusCode {
    // United States
    Single,
    #[serde(rename = "married")]
    MarriedFilingJointly,
    #[serde(rename = "married-separate")]
    MarriedFilingSeparately,
    #[serde(rename = "head")]
    HeadOfHousehold,

    // India
    Individual,
    #[serde(rename = "huf")]
    HinduUndividedFamily,
    #[serde(rename = "senior")]
    SeniorCitizen,
    #[serde(rename = "super-senior")]
    SuperSeniorCitizen,
}

impl FilingStatusCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::MarriedFilingJointly => "married",
            Self::MarriedFilingSeparately => "married-separate",
            Self::HeadOfHousehold => "head",
            Self::Individual => "individual",
            Self::HinduUndividedFamily => "huf",
            Self::SeniorCitizen => "senior",
            Self::SuperSeniorCitizen => "super-senior",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" => Some(Self::Single),
            "married" => Some(Self::MarriedFilingJointly),
            "married-separate" => Some(Self::MarriedFilingSeparately),
            "head" => Some(Self::HeadOfHousehold),
            "individual" => Some(Self::Individual),
            "huf" => Some(Self::HinduUndividedFamily),
            "senior" => Some(Self::SeniorCitizen),
            "super-senior" => Some(Self::SuperSeniorCitizen),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Single => "Single",
            Self::MarriedFilingJointly => "Married Filing Jointly",
            Self::MarriedFilingSeparately => "Married Filing Separately",
            Self::HeadOfHousehold => "Head of Household",
            Self::Individual => "Individual",
            Self::HinduUndividedFamily => "Hindu Undivided Family",
            Self::SeniorCitizen => "Senior Citizen (60-80)",
            Self::SuperSeniorCitizen => "Super Senior Citizen (80+)",
        }
    }
}
