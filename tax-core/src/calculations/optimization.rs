//! Savings-strategy selection and scoring.
//!
//! The scorer only sums the savings each catalog entry advertises. It does
//! not feed selected strategies back into the tax computation.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::calculations::{OptimizationSelection, StrategyCatalog};
//!
//! let catalog = StrategyCatalog::builtin();
//! let mut selection = OptimizationSelection::new();
//! selection.toggle("retirement");
//! selection.toggle("hsa");
//! selection.toggle("not-in-catalog");
//!
//! assert_eq!(catalog.total_savings(&selection), dec!(3430));
//! ```

use std::collections::{BTreeSet, HashSet};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::TaxError;
use crate::models::OptimizationStrategy;
use crate::registry::builtin;

/// Immutable catalog of savings strategies, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StrategyCatalog {
    strategies: Vec<OptimizationStrategy>,
}

impl StrategyCatalog {
    /// Builds a catalog after checking that ids are unique and non-empty and
    /// that no strategy advertises negative savings.
    ///
    /// # Errors
    ///
    /// Returns [`TaxError::InvalidStrategyCatalog`] naming the offending id.
    pub fn new(strategies: Vec<OptimizationStrategy>) -> Result<Self, TaxError> {
        let mut seen = HashSet::new();
        for strategy in &strategies {
            if strategy.id.trim().is_empty() {
                return Err(TaxError::InvalidStrategyCatalog(
                    "strategy id must not be empty".to_string(),
                ));
            }
            if !seen.insert(strategy.id.as_str()) {
                return Err(TaxError::InvalidStrategyCatalog(format!(
                    "duplicate strategy id '{}'",
                    strategy.id
                )));
            }
            if strategy.potential_savings < Decimal::ZERO {
                return Err(TaxError::InvalidStrategyCatalog(format!(
                    "strategy '{}' has negative savings {}",
                    strategy.id, strategy.potential_savings
                )));
            }
        }

        Ok(Self { strategies })
    }

    /// The sample catalog shipped with the engine.
    pub fn builtin() -> Self {
        Self {
            strategies: builtin::strategies(),
        }
    }

    pub fn strategies(&self) -> &[OptimizationStrategy] {
        &self.strategies
    }

    pub fn get(
        &self,
        id: &str,
    ) -> Option<&OptimizationStrategy> {
        self.strategies.iter().find(|s| s.id == id)
    }

    /// Catalog entries that are currently selected, in catalog order.
    pub fn selected<'a>(
        &'a self,
        selection: &'a OptimizationSelection,
    ) -> impl Iterator<Item = &'a OptimizationStrategy> + 'a {
        self.strategies
            .iter()
            .filter(move |s| selection.is_selected(&s.id))
    }

    /// Sum of advertised savings over selected ids present in the catalog.
    /// Ids the catalog does not know contribute nothing.
    pub fn total_savings(
        &self,
        selection: &OptimizationSelection,
    ) -> Decimal {
        self.selected(selection).map(|s| s.potential_savings).sum()
    }
}

/// Caller-owned set of toggled strategy ids.
///
/// Any id is accepted, including ones the catalog does not contain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizationSelection {
    ids: BTreeSet<String>,
}

impl OptimizationSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips `id` in or out of the selection. Returns whether it is now
    /// selected.
    pub fn toggle(
        &mut self,
        id: &str,
    ) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    /// A copy of this selection with `id` flipped.
    pub fn toggled(
        &self,
        id: &str,
    ) -> Self {
        let mut next = self.clone();
        next.toggle(id);
        next
    }

    pub fn is_selected(
        &self,
        id: &str,
    ) -> bool {
        self.ids.contains(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for OptimizationSelection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::{prop_assert_eq, proptest};
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{Difficulty, StrategyCategory};

    fn strategy(
        id: &str,
        savings: Decimal,
    ) -> OptimizationStrategy {
        OptimizationStrategy {
            id: id.to_string(),
            title: id.to_string(),
            description: String::new(),
            potential_savings: savings,
            difficulty: Difficulty::Easy,
            category: StrategyCategory::Deductions,
        }
    }

    // =========================================================================
    // toggle tests
    // =========================================================================

    #[test]
    fn toggle_adds_then_removes() {
        let mut selection = OptimizationSelection::new();

        assert!(selection.toggle("hsa"));
        assert!(selection.is_selected("hsa"));
        assert!(!selection.toggle("hsa"));
        assert!(selection.is_empty());
    }

    #[test]
    fn toggled_leaves_original_untouched() {
        let selection: OptimizationSelection = ["retirement"].into_iter().collect();

        let next = selection.toggled("hsa");

        assert_eq!(selection.len(), 1);
        assert_eq!(next.ids().collect::<Vec<_>>(), vec!["hsa", "retirement"]);
    }

    #[test]
    fn toggle_accepts_unknown_ids() {
        let mut selection = OptimizationSelection::new();

        assert!(selection.toggle("crypto-loss-harvesting"));
        assert_eq!(selection.len(), 1);
    }

    // =========================================================================
    // total_savings tests
    // =========================================================================

    #[test]
    fn total_savings_of_empty_selection_is_zero() {
        let catalog = StrategyCatalog::builtin();

        assert_eq!(catalog.total_savings(&OptimizationSelection::new()), dec!(0));
    }

    #[test]
    fn total_savings_sums_every_builtin_strategy() {
        let catalog = StrategyCatalog::builtin();
        let selection: OptimizationSelection =
            ["retirement", "hsa", "charitable"].into_iter().collect();

        assert_eq!(catalog.total_savings(&selection), dec!(4630));
    }

    #[test]
    fn total_savings_skips_unknown_ids() {
        let catalog = StrategyCatalog::builtin();
        let selection: OptimizationSelection = ["charitable", "nope"].into_iter().collect();

        assert_eq!(catalog.total_savings(&selection), dec!(1200));
    }

    #[test]
    fn selected_preserves_catalog_order() {
        let catalog = StrategyCatalog::builtin();
        let selection: OptimizationSelection = ["charitable", "retirement"].into_iter().collect();

        let ids: Vec<_> = catalog.selected(&selection).map(|s| s.id.as_str()).collect();

        assert_eq!(ids, vec!["retirement", "charitable"]);
    }

    // =========================================================================
    // catalog validation tests
    // =========================================================================

    #[test]
    fn new_rejects_duplicate_ids() {
        let result = StrategyCatalog::new(vec![
            strategy("hsa", dec!(1)),
            strategy("hsa", dec!(2)),
        ]);

        assert_eq!(
            result,
            Err(TaxError::InvalidStrategyCatalog(
                "duplicate strategy id 'hsa'".to_string()
            ))
        );
    }

    #[test]
    fn new_rejects_negative_savings() {
        let result = StrategyCatalog::new(vec![strategy("hsa", dec!(-5))]);

        assert!(matches!(result, Err(TaxError::InvalidStrategyCatalog(_))));
    }

    #[test]
    fn new_rejects_blank_id() {
        let result = StrategyCatalog::new(vec![strategy(" ", dec!(5))]);

        assert!(matches!(result, Err(TaxError::InvalidStrategyCatalog(_))));
    }

    #[test]
    fn builtin_catalog_passes_validation() {
        let builtin = StrategyCatalog::builtin();

        assert_eq!(
            StrategyCatalog::new(builtin.strategies().to_vec()),
            Ok(builtin)
        );
    }

    proptest! {
        #[test]
        fn prop_double_toggle_is_identity(
            initial in proptest::collection::btree_set("[a-z]{1,8}", 0..6),
            id in "[a-z]{1,8}",
        ) {
            let selection: OptimizationSelection = initial.into_iter().collect();

            let round_trip = selection.toggled(&id).toggled(&id);

            prop_assert_eq!(round_trip, selection);
        }
    }
}
