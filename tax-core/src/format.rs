//! Display helpers for results and bracket tables.
//!
//! Rates are rounded to percentages here and nowhere else; the engine keeps
//! exact fractions.

use rust_decimal::Decimal;

use crate::calculations::common::{rate_to_percent, round_half_up};
use crate::models::{DigitGrouping, Jurisdiction, TaxResult};

/// Formats `amount` in the jurisdiction's currency, e.g. `$6,617` or
/// `₹1,72,500`. Cents are printed only when present.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::JurisdictionRegistry;
/// use tax_core::format::format_money;
///
/// let registry = JurisdictionRegistry::with_builtin();
/// let india = registry.resolve("IN").unwrap();
///
/// assert_eq!(format_money(dec!(1027500), india), "₹10,27,500");
/// ```
pub fn format_money(
    amount: Decimal,
    jurisdiction: &Jurisdiction,
) -> String {
    let rounded = round_half_up(amount).normalize();
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let abs = rounded.abs();

    let whole = abs.trunc().to_string();
    let cents = if abs.fract().is_zero() {
        String::new()
    } else {
        let fract = format!("{:.2}", abs.fract());
        fract.trim_start_matches('0').to_string()
    };

    format!(
        "{sign}{}{}{cents}",
        jurisdiction.currency_symbol,
        group_digits(&whole, jurisdiction.digit_grouping)
    )
}

/// Inserts separators into a string of ASCII digits.
pub fn group_digits(
    digits: &str,
    grouping: DigitGrouping,
) -> String {
    let len = digits.len();
    if len <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(len - 3);
    let group = match grouping {
        DigitGrouping::Thousands => 3,
        DigitGrouping::Indian => 2,
    };

    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(group);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    groups.push(tail);
    groups.join(",")
}

/// A rate fraction as a percentage with exactly `dp` decimals, e.g. `13.2%`.
pub fn format_percent(
    rate: Decimal,
    dp: u32,
) -> String {
    let percent = rate_to_percent(rate, dp);
    format!("{percent:.prec$}%", prec = dp as usize)
}

/// A rate as the shortest exact percentage, e.g. `10%` or `12.5%`.
fn short_percent(rate: Decimal) -> String {
    format!("{}%", (rate * Decimal::ONE_HUNDRED).normalize())
}

/// One line per bracket, in the style of a printed slab table:
/// `10%: $0 - $10,275`, …, `37%: $462,501+`.
pub fn slab_lines(jurisdiction: &Jurisdiction) -> Vec<String> {
    jurisdiction
        .table
        .schedule()
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let from = if index == 0 {
                row.min_income
            } else {
                row.min_income + Decimal::ONE
            };
            let from = format_money(from, jurisdiction);
            match row.max_income {
                Some(to) => format!(
                    "{}: {from} - {}",
                    short_percent(row.rate),
                    format_money(to, jurisdiction)
                ),
                None => format!("{}: {from}+", short_percent(row.rate)),
            }
        })
        .collect()
}

/// Label/value pairs describing a result, ready for display.
pub fn summary_lines(
    result: &TaxResult,
    jurisdiction: &Jurisdiction,
) -> Vec<(&'static str, String)> {
    vec![
        ("Gross Income", format_money(result.gross_income, jurisdiction)),
        ("Tax Liability", format_money(result.tax_liability, jurisdiction)),
        ("Net Income", format_money(result.net_income, jurisdiction)),
        ("Effective Rate", format_percent(result.effective_rate, 1)),
        ("Marginal Rate", short_percent(result.marginal_rate)),
    ]
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::TaxEngine;
    use crate::models::TaxpayerInput;
    use crate::registry::JurisdictionRegistry;

    fn jurisdiction(code: &str) -> Jurisdiction {
        JurisdictionRegistry::with_builtin()
            .resolve(code)
            .unwrap()
            .clone()
    }

    // =========================================================================
    // group_digits tests
    // =========================================================================

    #[test]
    fn group_digits_thousands() {
        assert_eq!(group_digits("1234567", DigitGrouping::Thousands), "1,234,567");
        assert_eq!(group_digits("123456", DigitGrouping::Thousands), "123,456");
        assert_eq!(group_digits("999", DigitGrouping::Thousands), "999");
    }

    #[test]
    fn group_digits_indian() {
        assert_eq!(group_digits("250000", DigitGrouping::Indian), "2,50,000");
        assert_eq!(group_digits("10000000", DigitGrouping::Indian), "1,00,00,000");
        assert_eq!(group_digits("1000", DigitGrouping::Indian), "1,000");
    }

    // =========================================================================
    // format_money tests
    // =========================================================================

    #[test]
    fn format_money_omits_zero_cents() {
        assert_eq!(format_money(dec!(6617.00), &jurisdiction("US")), "$6,617");
    }

    #[test]
    fn format_money_pads_cents() {
        assert_eq!(format_money(dec!(4807.5), &jurisdiction("US")), "$4,807.50");
    }

    #[test]
    fn format_money_rounds_to_cents() {
        assert_eq!(format_money(dec!(0.125), &jurisdiction("US")), "$0.13");
    }

    #[test]
    fn format_money_negative() {
        assert_eq!(format_money(dec!(-1500), &jurisdiction("US")), "-$1,500");
    }

    // =========================================================================
    // format_percent tests
    // =========================================================================

    #[test]
    fn format_percent_keeps_fixed_places() {
        assert_eq!(format_percent(dec!(0.30), 1), "30.0%");
        assert_eq!(format_percent(dec!(0.13232), 1), "13.2%");
        assert_eq!(format_percent(Decimal::ZERO, 1), "0.0%");
    }

    // =========================================================================
    // slab_lines tests
    // =========================================================================

    #[test]
    fn slab_lines_us() {
        assert_eq!(
            slab_lines(&jurisdiction("US")),
            vec![
                "10%: $0 - $10,275",
                "12%: $10,276 - $41,775",
                "22%: $41,776 - $89,450",
                "24%: $89,451 - $190,750",
                "32%: $190,751 - $364,200",
                "35%: $364,201 - $462,500",
                "37%: $462,501+",
            ]
        );
    }

    #[test]
    fn slab_lines_india() {
        assert_eq!(
            slab_lines(&jurisdiction("IN")),
            vec![
                "0%: ₹0 - ₹2,50,000",
                "5%: ₹2,50,001 - ₹5,00,000",
                "20%: ₹5,00,001 - ₹10,00,000",
                "30%: ₹10,00,001+",
            ]
        );
    }

    // =========================================================================
    // summary_lines tests
    // =========================================================================

    #[test]
    fn summary_lines_for_us_result() {
        let registry = JurisdictionRegistry::with_builtin();
        let us = registry.resolve("US").unwrap();
        let result = TaxEngine::new(&registry)
            .compute(&TaxpayerInput::new("US", dec!(50000)))
            .unwrap();

        assert_eq!(
            summary_lines(&result, us),
            vec![
                ("Gross Income", "$50,000".to_string()),
                ("Tax Liability", "$6,617".to_string()),
                ("Net Income", "$43,383".to_string()),
                ("Effective Rate", "13.2%".to_string()),
                ("Marginal Rate", "22%".to_string()),
            ]
        );
    }
}
