//! Command implementations for `tax-calc`. Each returns the text to print so
//! the binary stays a thin shell around them.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;
use tax_core::api::{ComputeRequest, OptimizationRequest, handle_compute, handle_optimization};
use tax_core::calculations::StrategyCatalog;
use tax_core::format::{format_money, slab_lines, summary_lines};
use tax_core::{Difficulty, Jurisdiction, JurisdictionRegistry, ScheduleRow, TaxpayerInput};
use tax_data::BracketTableLoader;
use tracing::{info, warn};

use crate::config::AppConfig;

/// Built-in jurisdictions plus every bracket file named in `config` and
/// then in `extra_files`. Later files replace earlier definitions of the
/// same code.
///
/// A CSV table carries no names or currency. A replaced jurisdiction keeps
/// the descriptive fields it had; `[jurisdictions.<CODE>]` entries in the
/// config then override them.
pub fn build_registry(
    config: &AppConfig,
    extra_files: &[PathBuf],
) -> Result<JurisdictionRegistry> {
    let mut registry = JurisdictionRegistry::with_builtin();

    for path in config.engine.bracket_files.iter().chain(extra_files) {
        let in_file = || format!("in bracket file '{}'", path.display());

        let records = BracketTableLoader::parse_file(path).with_context(in_file)?;
        BracketTableLoader::load_with(&mut registry, &records, |definition| {
            if let Some(metadata) = config.metadata_for(&definition.code) {
                metadata.apply(definition);
            }
        })
        .with_context(in_file)?;
        info!(file = %path.display(), "loaded bracket file");
    }

    Ok(registry)
}

/// Runs `request` and renders the result, as JSON or as a labelled summary.
pub fn render_compute(
    registry: &JurisdictionRegistry,
    request: ComputeRequest,
    json: bool,
) -> Result<String> {
    let input = TaxpayerInput::try_from(request.clone())?;
    let jurisdiction = registry.resolve(&input.jurisdiction_code)?;
    if let Some(status) = input.filing_status
        && !jurisdiction.offers_filing_status(status)
    {
        warn!(
            code = %jurisdiction.code,
            filing_status = status.as_str(),
            "filing status is not offered by this jurisdiction"
        );
    }

    let result = handle_compute(registry, request)?;
    if json {
        return Ok(serde_json::to_string_pretty(&result)?);
    }

    let mut lines = vec![heading(jurisdiction)];
    if let Some(status) = input.filing_status {
        lines.push(format!("  {:<15} {}", "Filing Status", status.label()));
    }
    lines.extend(
        summary_lines(&result, jurisdiction)
            .into_iter()
            .map(|(label, value)| format!("  {label:<15} {value}")),
    );
    Ok(lines.join("\n"))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BracketListing<'a> {
    jurisdiction_code: &'a str,
    name: &'a str,
    period_label: &'a str,
    schedule: Vec<ScheduleRow>,
}

/// The bracket table of `code`: slab lines, or the schedule as JSON.
pub fn render_brackets(
    registry: &JurisdictionRegistry,
    code: &str,
    json: bool,
) -> Result<String> {
    let jurisdiction = registry.resolve(code)?;

    if json {
        let listing = BracketListing {
            jurisdiction_code: &jurisdiction.code,
            name: &jurisdiction.name,
            period_label: &jurisdiction.period_label,
            schedule: jurisdiction.table.schedule(),
        };
        return Ok(serde_json::to_string_pretty(&listing)?);
    }

    let mut lines = vec![heading(jurisdiction)];
    lines.extend(slab_lines(jurisdiction).into_iter().map(|line| format!("  {line}")));
    Ok(lines.join("\n"))
}

/// One line per registered jurisdiction, sorted by code.
pub fn render_jurisdictions(registry: &JurisdictionRegistry) -> String {
    registry
        .jurisdictions()
        .into_iter()
        .map(|j| {
            format!(
                "{:<4} {:<16} {:<4} {}",
                j.code, j.name, j.currency_code, j.period_label
            )
            .trim_end()
            .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The strategy catalog with the selected entries marked, and the total.
/// Amounts are shown in the currency of `currency`.
pub fn render_optimization(
    catalog: &StrategyCatalog,
    selected_ids: Vec<String>,
    currency: &Jurisdiction,
    json: bool,
) -> Result<String> {
    let response = handle_optimization(catalog, OptimizationRequest { selected_ids });
    if json {
        return Ok(serde_json::to_string_pretty(&response)?);
    }

    let mut lines: Vec<String> = catalog
        .strategies()
        .iter()
        .map(|strategy| {
            let mark = if response.selected_ids.contains(&strategy.id) {
                "x"
            } else {
                " "
            };
            format!(
                "[{mark}] {:<11} {:<34} {:>8}  {}",
                strategy.id,
                strategy.title,
                format_money(strategy.potential_savings, currency),
                difficulty_label(strategy.difficulty)
            )
        })
        .collect();

    let unknown: Vec<&str> = response
        .selected_ids
        .iter()
        .filter(|id| catalog.get(id).is_none())
        .map(String::as_str)
        .collect();
    if !unknown.is_empty() {
        warn!(ids = ?unknown, "ignoring unknown strategy ids");
    }

    lines.push(format!(
        "Total potential savings: {}",
        format_money(response.total_savings, currency)
    ));
    Ok(lines.join("\n"))
}

fn heading(jurisdiction: &Jurisdiction) -> String {
    if jurisdiction.period_label.is_empty() {
        jurisdiction.name.clone()
    } else {
        format!("{} ({})", jurisdiction.name, jurisdiction.period_label)
    }
}

fn difficulty_label(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Easy => "easy",
        Difficulty::Medium => "medium",
        Difficulty::Hard => "hard",
    }
}
