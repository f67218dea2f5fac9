use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::{Bracket, JurisdictionDefinition, JurisdictionRegistry, TaxError};
use thiserror::Error;
use tracing::info;

/// Errors that can occur when loading bracket tables.
#[derive(Debug, Error)]
pub enum BracketTableLoaderError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("row {row}: jurisdiction code is empty")]
    EmptyJurisdictionCode { row: usize },

    #[error("Registry error: {0}")]
    Registry(#[from] TaxError),
}

impl From<csv::Error> for BracketTableLoaderError {
    fn from(err: csv::Error) -> Self {
        BracketTableLoaderError::CsvParse(err.to_string())
    }
}

/// A single row of a bracket-table CSV file.
///
/// - `jurisdiction`: the jurisdiction code (e.g. `UK`)
/// - `upper_bound`: top of the bracket; empty for the open top bracket
/// - `rate`: marginal rate as a decimal fraction (e.g. 0.20 for 20%)
///
/// Rows of one jurisdiction are listed lowest bracket first.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BracketRecord {
    pub jurisdiction: String,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub upper_bound: Option<Decimal>,
    pub rate: Decimal,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse::<Decimal>().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Loader for bracket tables stored as CSV.
///
/// The loader never sorts or repairs rows: tables are registered exactly as
/// written, and the registry rejects any that break the bracket rules.
pub struct BracketTableLoader;

impl BracketTableLoader {
    /// Parse bracket records from any reader (a file, a byte slice, ...).
    pub fn parse<R: Read>(reader: R) -> Result<Vec<BracketRecord>, BracketTableLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        csv_reader
            .deserialize()
            .map(|result| result.map_err(BracketTableLoaderError::from))
            .collect()
    }

    /// Parse bracket records from a file on disk.
    pub fn parse_file(path: &Path) -> Result<Vec<BracketRecord>, BracketTableLoaderError> {
        let file = File::open(path).map_err(|source| BracketTableLoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(file)
    }

    /// Group records into one definition per jurisdiction, in order of first
    /// appearance. Codes are compared after trimming and upper-casing.
    pub fn definitions(
        records: &[BracketRecord],
    ) -> Result<Vec<JurisdictionDefinition>, BracketTableLoaderError> {
        let mut definitions: Vec<JurisdictionDefinition> = Vec::new();

        for (idx, record) in records.iter().enumerate() {
            let code = record.jurisdiction.trim().to_ascii_uppercase();
            if code.is_empty() {
                return Err(BracketTableLoaderError::EmptyJurisdictionCode { row: idx + 1 });
            }

            let bracket = Bracket {
                upper_bound: record.upper_bound.into(),
                rate: record.rate,
            };

            match definitions.iter_mut().find(|d| d.code == code) {
                Some(definition) => definition.brackets.push(bracket),
                None => definitions.push(JurisdictionDefinition::from_brackets(code, vec![bracket])),
            }
        }

        Ok(definitions)
    }

    /// Register every jurisdiction found in `records`.
    ///
    /// A CSV table carries no names or currency, so a table replacing a
    /// registered code keeps that jurisdiction's descriptive fields.
    /// Stops at the first table the registry rejects; jurisdictions before
    /// it stay registered. Returns the number of jurisdictions registered.
    pub fn load(
        registry: &mut JurisdictionRegistry,
        records: &[BracketRecord],
    ) -> Result<usize, BracketTableLoaderError> {
        Self::load_with(registry, records, |_| {})
    }

    /// Like [`load`](Self::load), but runs `customize` on each definition
    /// after inherited fields are applied and before it is registered.
    pub fn load_with<F>(
        registry: &mut JurisdictionRegistry,
        records: &[BracketRecord],
        mut customize: F,
    ) -> Result<usize, BracketTableLoaderError>
    where
        F: FnMut(&mut JurisdictionDefinition),
    {
        let definitions = Self::definitions(records)?;
        let count = definitions.len();

        for mut definition in definitions {
            if let Ok(existing) = registry.resolve(&definition.code) {
                definition.inherit_metadata(existing);
            }
            customize(&mut definition);

            let code = definition.code.clone();
            let brackets = definition.brackets.len();
            registry.register(definition)?;
            info!(%code, brackets, "loaded bracket table");
        }

        Ok(count)
    }
}
