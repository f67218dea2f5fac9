use rust_decimal::Decimal;
use tax_core::TaxError;

/// Normalizes input for decimal parsing: trims whitespace and removes commas (thousands separator).
fn normalize_amount_input(s: &str) -> String {
    s.trim().replace(',', "")
}

/// Parses a monetary amount typed by a user.
///
/// Handles comma as thousands separator (e.g. `"1,234.56"`). Empty input
/// is an error, not zero. Negative amounts parse; the engine rejects them.
pub fn parse_amount(
    field: &str,
    s: &str,
) -> Result<Decimal, TaxError> {
    let normalized = normalize_amount_input(s);
    if normalized.is_empty() {
        return Err(TaxError::InvalidInput(format!("{field} is required")));
    }
    normalized.parse().map_err(|e| {
        tracing::error!(input = %s, field, "invalid amount: {}", e);
        TaxError::InvalidInput(format!("{field} '{s}' is not a number"))
    })
}

/// Like [`parse_amount`], but `None` and blank input mean "not given".
pub fn parse_optional_amount(
    field: &str,
    s: Option<&str>,
) -> Result<Option<Decimal>, TaxError> {
    match s {
        Some(s) if !s.trim().is_empty() => parse_amount(field, s).map(Some),
        _ => Ok(None),
    }
}
