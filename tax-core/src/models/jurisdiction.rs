use serde::{Deserialize, Serialize};

use super::{Bracket, BracketTable, FilingStatusCode};
use crate::error::TaxError;

/// How digits are grouped when printing amounts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigitGrouping {
    /// 1,234,567
    #[default]
    Thousands,
    /// 12,34,567 (lakh/crore)
    Indian,
}

/// Unvalidated description of a jurisdiction, as written in source data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JurisdictionDefinition {
    pub code: String,
    pub name: String,
    pub currency_code: String,
    #[serde(default)]
    pub currency_symbol: String,
    #[serde(default)]
    pub period_label: String,
    #[serde(default)]
    pub digit_grouping: DigitGrouping,
    #[serde(default)]
    pub filing_statuses: Vec<FilingStatusCode>,
    pub brackets: Vec<Bracket>,
}

impl JurisdictionDefinition {
    /// A definition carrying only a code and its brackets; descriptive
    /// fields default to the code itself.
    pub fn from_brackets(
        code: impl Into<String>,
        brackets: Vec<Bracket>,
    ) -> Self {
        let code = code.into();
        Self {
            name: code.clone(),
            currency_code: code.clone(),
            currency_symbol: String::new(),
            period_label: String::new(),
            digit_grouping: DigitGrouping::default(),
            filing_statuses: Vec::new(),
            brackets,
            code,
        }
    }

    /// Copies every descriptive field from `existing`, keeping this
    /// definition's code and brackets.
    pub fn inherit_metadata(
        &mut self,
        existing: &Jurisdiction,
    ) {
        self.name = existing.name.clone();
        self.currency_code = existing.currency_code.clone();
        self.currency_symbol = existing.currency_symbol.clone();
        self.period_label = existing.period_label.clone();
        self.digit_grouping = existing.digit_grouping;
        self.filing_statuses = existing.filing_statuses.clone();
    }
}

/// A registered tax authority with its validated bracket table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Jurisdiction {
    pub code: String,
    pub name: String,
    pub currency_code: String,
    pub currency_symbol: String,
    pub period_label: String,
    pub digit_grouping: DigitGrouping,
    pub filing_statuses: Vec<FilingStatusCode>,
    pub table: BracketTable,
}

impl Jurisdiction {
    /// Whether this jurisdiction offers `status`. Jurisdictions that list no
    /// statuses accept any.
    pub fn offers_filing_status(
        &self,
        status: FilingStatusCode,
    ) -> bool {
        self.filing_statuses.is_empty() || self.filing_statuses.contains(&status)
    }
}

impl TryFrom<JurisdictionDefinition> for Jurisdiction {
    type Error = TaxError;

    fn try_from(def: JurisdictionDefinition) -> Result<Self, Self::Error> {
        let code = normalize_code(&def.code);
        if code.is_empty() {
            return Err(TaxError::InvalidInput(
                "jurisdiction code must not be empty".to_string(),
            ));
        }

        let table = BracketTable::new(code.clone(), def.brackets).map_err(|source| {
            TaxError::InvalidBracketTable {
                code: code.clone(),
                source,
            }
        })?;

        Ok(Self {
            code,
            name: def.name,
            currency_code: def.currency_code,
            currency_symbol: def.currency_symbol,
            period_label: def.period_label,
            digit_grouping: def.digit_grouping,
            filing_statuses: def.filing_statuses,
            table,
        })
    }
}

/// Canonical form of a jurisdiction code: trimmed, ASCII upper-case.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}
