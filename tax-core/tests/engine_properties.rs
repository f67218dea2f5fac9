//! End-to-end checks over every registered jurisdiction, including ones
//! registered at runtime, and concurrent use of a shared registry.

use std::thread;

use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tax_core::calculations::{OptimizationSelection, StrategyCatalog, TaxEngine};
use tax_core::{Bracket, JurisdictionDefinition, JurisdictionRegistry, TaxError, TaxpayerInput};

fn registry_with_extra() -> JurisdictionRegistry {
    let mut registry = JurisdictionRegistry::with_builtin();
    registry
        .register(JurisdictionDefinition::from_brackets(
            "UK",
            vec![
                Bracket::bounded(dec!(12570), dec!(0)),
                Bracket::bounded(dec!(50270), dec!(0.20)),
                Bracket::bounded(dec!(125140), dec!(0.40)),
                Bracket::unbounded(dec!(0.45)),
            ],
        ))
        .expect("UK table is valid");
    registry
}

#[test]
fn zero_income_owes_nothing_everywhere() {
    let registry = registry_with_extra();
    let engine = TaxEngine::new(&registry);

    for code in registry.available_jurisdictions() {
        let result = engine
            .compute(&TaxpayerInput::new(code, Decimal::ZERO))
            .unwrap();

        assert_eq!(result.tax_liability, Decimal::ZERO, "{code}");
        assert_eq!(result.effective_rate, Decimal::ZERO, "{code}");
    }
}

#[test]
fn marginal_rate_steps_up_across_every_threshold() {
    let registry = registry_with_extra();
    let engine = TaxEngine::new(&registry);

    for jurisdiction in registry.jurisdictions() {
        let mut previous = Decimal::ZERO;
        for row in jurisdiction.table.schedule() {
            let income = row.max_income.unwrap_or(row.min_income + dec!(1));
            let result = engine
                .compute(&TaxpayerInput::new(&jurisdiction.code, income))
                .unwrap();

            assert_eq!(result.marginal_rate, row.rate);
            assert!(result.marginal_rate >= previous);
            previous = result.marginal_rate;
        }
    }
}

#[test]
fn runtime_jurisdiction_uses_the_same_walker() {
    let registry = registry_with_extra();

    let result = TaxEngine::new(&registry)
        .compute(&TaxpayerInput::new("uk", dec!(60000)))
        .unwrap();

    // 37700 * 0.20 + 9730 * 0.40
    assert_eq!(result.tax_liability, dec!(11432.00));
    assert_eq!(result.marginal_rate, dec!(0.40));
}

#[test]
fn errors_are_typed() {
    let registry = registry_with_extra();
    let engine = TaxEngine::new(&registry);

    assert!(matches!(
        registry.resolve("ZZ"),
        Err(TaxError::UnknownJurisdiction { .. })
    ));
    assert!(matches!(
        engine.compute(&TaxpayerInput::new("US", dec!(-1))),
        Err(TaxError::InvalidInput(_))
    ));
}

#[test]
fn shared_registry_serves_concurrent_callers() {
    let registry = registry_with_extra();
    let catalog = StrategyCatalog::builtin();

    let incomes = [dec!(10000), dec!(50000), dec!(1200000), dec!(60000)];
    let codes = ["US", "US", "IN", "UK"];

    let results: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = codes
            .iter()
            .zip(incomes)
            .map(|(code, income)| {
                let registry = &registry;
                let catalog = &catalog;
                scope.spawn(move || {
                    let tax = TaxEngine::new(registry)
                        .compute(&TaxpayerInput::new(*code, income))
                        .unwrap();
                    let selection: OptimizationSelection = ["hsa"].into_iter().collect();
                    (tax.tax_liability, catalog.total_savings(&selection))
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(
        results,
        vec![
            (dec!(1000.00), dec!(980)),
            (dec!(6617.00), dec!(980)),
            (dec!(172500), dec!(980)),
            (dec!(11432.00), dec!(980)),
        ]
    );
}
