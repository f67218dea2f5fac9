use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::BracketTableError;

/// Upper edge of a bracket's income range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<Decimal>", into = "Option<Decimal>")]
pub enum UpperBound {
    Bounded(Decimal),
    Unbounded,
}

impl UpperBound {
    /// The bound as a number, or `None` for the open top bracket.
    pub fn amount(&self) -> Option<Decimal> {
        match self {
            Self::Bounded(amount) => Some(*amount),
            Self::Unbounded => None,
        }
    }

    /// Whether `income` lies at or below this bound.
    pub fn contains(
        &self,
        income: Decimal,
    ) -> bool {
        match self {
            Self::Bounded(amount) => income <= *amount,
            Self::Unbounded => true,
        }
    }
}

impl From<Option<Decimal>> for UpperBound {
    fn from(value: Option<Decimal>) -> Self {
        value.map_or(Self::Unbounded, Self::Bounded)
    }
}

impl From<UpperBound> for Option<Decimal> {
    fn from(value: UpperBound) -> Self {
        value.amount()
    }
}

/// One contiguous income range taxed at a single marginal rate.
///
/// The lower edge is implied by the previous bracket's upper bound (or zero
/// for the first bracket).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bracket {
    pub upper_bound: UpperBound,
    pub rate: Decimal,
}

impl Bracket {
    pub fn bounded(
        upper_bound: Decimal,
        rate: Decimal,
    ) -> Self {
        Self {
            upper_bound: UpperBound::Bounded(upper_bound),
            rate,
        }
    }

    pub fn unbounded(rate: Decimal) -> Self {
        Self {
            upper_bound: UpperBound::Unbounded,
            rate,
        }
    }
}

/// A bracket expressed the way published rate schedules print it:
/// `base_tax + (income - min_income) × rate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub min_income: Decimal,
    pub max_income: Option<Decimal>,
    pub rate: Decimal,
    pub base_tax: Decimal,
}

/// A jurisdiction's validated progressive schedule.
///
/// Brackets are sorted ascending, cover `[0, ∞)` without gaps, and end in
/// exactly one unbounded bracket. The only way to obtain a table is through
/// [`BracketTable::new`], so every value of this type satisfies those rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BracketTable {
    jurisdiction_code: String,
    brackets: Vec<Bracket>,
}

impl BracketTable {
    /// Validates `brackets` and builds a table.
    ///
    /// # Errors
    ///
    /// Returns [`BracketTableError`] describing the first violated rule.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use tax_core::{Bracket, BracketTable, BracketTableError};
    ///
    /// let table = BracketTable::new(
    ///     "IN",
    ///     vec![
    ///         Bracket::bounded(dec!(250000), dec!(0)),
    ///         Bracket::unbounded(dec!(0.05)),
    ///     ],
    /// );
    /// assert!(table.is_ok());
    ///
    /// let missing_top = BracketTable::new("IN", vec![Bracket::bounded(dec!(250000), dec!(0))]);
    /// assert_eq!(missing_top, Err(BracketTableError::MissingUnboundedBracket));
    /// ```
    pub fn new(
        jurisdiction_code: impl Into<String>,
        brackets: Vec<Bracket>,
    ) -> Result<Self, BracketTableError> {
        validate(&brackets)?;
        Ok(Self {
            jurisdiction_code: jurisdiction_code.into(),
            brackets,
        })
    }

    pub fn jurisdiction_code(&self) -> &str {
        &self.jurisdiction_code
    }

    pub fn brackets(&self) -> &[Bracket] {
        &self.brackets
    }

    /// The bracket whose range contains `income`.
    ///
    /// Ranges are closed at the top, so an income exactly on a threshold
    /// belongs to the lower bracket. Zero falls in the first bracket.
    pub fn bracket_for(
        &self,
        income: Decimal,
    ) -> &Bracket {
        self.brackets
            .iter()
            .find(|b| b.upper_bound.contains(income))
            .unwrap_or(&self.brackets[self.brackets.len() - 1])
    }

    /// The table as published schedule rows, each carrying the cumulative
    /// tax owed at its lower edge.
    pub fn schedule(&self) -> Vec<ScheduleRow> {
        let mut base_tax = Decimal::ZERO;
        let mut min_income = Decimal::ZERO;

        self.brackets
            .iter()
            .map(|bracket| {
                let row = ScheduleRow {
                    min_income,
                    max_income: bracket.upper_bound.amount(),
                    rate: bracket.rate,
                    base_tax,
                };
                if let UpperBound::Bounded(hi) = bracket.upper_bound {
                    base_tax += (hi - min_income) * bracket.rate;
                    min_income = hi;
                }
                row
            })
            .collect()
    }
}

fn validate(brackets: &[Bracket]) -> Result<(), BracketTableError> {
    if brackets.is_empty() {
        return Err(BracketTableError::Empty);
    }

    let last = brackets.len() - 1;
    let mut previous: Option<Decimal> = None;

    for (index, bracket) in brackets.iter().enumerate() {
        if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
            return Err(BracketTableError::RateOutOfRange {
                index,
                rate: bracket.rate,
            });
        }

        match bracket.upper_bound {
            UpperBound::Unbounded if index != last => {
                return Err(BracketTableError::UnboundedNotLast { index });
            }
            UpperBound::Unbounded => {}
            UpperBound::Bounded(_) if index == last => {
                return Err(BracketTableError::MissingUnboundedBracket);
            }
            UpperBound::Bounded(bound) => {
                if bound <= Decimal::ZERO {
                    return Err(BracketTableError::NonPositiveBound { index, bound });
                }
                if let Some(previous) = previous
                    && bound <= previous
                {
                    return Err(BracketTableError::NonIncreasingBound {
                        index,
                        bound,
                        previous,
                    });
                }
                previous = Some(bound);
            }
        }
    }

    Ok(())
}
