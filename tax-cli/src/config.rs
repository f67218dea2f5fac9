//! TOML configuration for `tax-calc`.
//!
//! Every table and key is optional:
//!
//! ```toml
//! [logging]
//! level = "info"
//! file = "tax-calc.log"
//!
//! [engine]
//! default_jurisdiction = "US"
//! bracket_files = ["extra_brackets.csv"]
//!
//! [jurisdictions.UK]
//! name = "United Kingdom"
//! currency_code = "GBP"
//! currency_symbol = "£"
//! period_label = "2024/25"
//! ```
//!
//! Relative paths are resolved against the directory holding the file.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tax_core::{DigitGrouping, JurisdictionDefinition, normalize_code};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub engine: EngineConfig,
    pub jurisdictions: BTreeMap<String, JurisdictionMetadata>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub default_jurisdiction: String,
    pub bracket_files: Vec<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_jurisdiction: "US".to_string(),
            bracket_files: Vec::new(),
        }
    }
}

/// Descriptive fields for a jurisdiction whose brackets come from a CSV
/// file, which carries only codes and rates.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JurisdictionMetadata {
    pub name: Option<String>,
    pub currency_code: Option<String>,
    pub currency_symbol: Option<String>,
    pub period_label: Option<String>,
    pub digit_grouping: Option<DigitGrouping>,
}

impl JurisdictionMetadata {
    /// Overwrites the fields of `definition` that this entry sets.
    pub fn apply(
        &self,
        definition: &mut JurisdictionDefinition,
    ) {
        if let Some(name) = &self.name {
            definition.name = name.clone();
        }
        if let Some(currency_code) = &self.currency_code {
            definition.currency_code = currency_code.clone();
        }
        if let Some(currency_symbol) = &self.currency_symbol {
            definition.currency_symbol = currency_symbol.clone();
        }
        if let Some(period_label) = &self.period_label {
            definition.period_label = period_label.clone();
        }
        if let Some(digit_grouping) = self.digit_grouping {
            definition.digit_grouping = digit_grouping;
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Reads and parses the file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        Ok(config)
    }

    fn resolve_paths(
        &mut self,
        base: &Path,
    ) {
        for file in &mut self.engine.bracket_files {
            if file.is_relative() {
                *file = base.join(&*file);
            }
        }
        if let Some(file) = &mut self.logging.file
            && file.is_relative()
        {
            *file = base.join(&*file);
        }
    }

    /// Metadata configured for `code`; table keys match case-insensitively.
    pub fn metadata_for(
        &self,
        code: &str,
    ) -> Option<&JurisdictionMetadata> {
        let code = normalize_code(code);
        self.jurisdictions
            .iter()
            .find(|(key, _)| normalize_code(key) == code)
            .map(|(_, metadata)| metadata)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;

    use super::*;

    // =========================================================================
    // parsing
    // =========================================================================

    #[test]
    fn empty_file_gives_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();

        assert_eq!(config, AppConfig::default());
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.engine.default_jurisdiction, "US");
    }

    #[test]
    fn parses_every_section() {
        let config = AppConfig::from_toml_str(
            r#"
[logging]
level = "debug"
file = "/var/log/tax-calc.log"

[engine]
default_jurisdiction = "IN"
bracket_files = ["/data/uk.csv"]

[jurisdictions.uk]
name = "United Kingdom"
currency_symbol = "£"
"#,
        )
        .unwrap();

        assert_eq!(config.logging.level, "debug");
        assert_eq!(
            config.logging.file,
            Some(PathBuf::from("/var/log/tax-calc.log"))
        );
        assert_eq!(config.engine.default_jurisdiction, "IN");
        assert_eq!(config.engine.bracket_files, vec![PathBuf::from("/data/uk.csv")]);

        let uk = config.metadata_for("UK").unwrap();
        assert_eq!(uk.name.as_deref(), Some("United Kingdom"));
        assert_eq!(uk.currency_code, None);
    }

    #[test]
    fn unknown_key_is_rejected() {
        let result = AppConfig::from_toml_str("[engine]\ndefault_jurisdicton = \"IN\"\n");

        assert!(result.is_err());
    }

    // =========================================================================
    // loading from disk
    // =========================================================================

    #[test]
    fn load_resolves_relative_paths_against_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tax-calc.toml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[logging]\nfile = \"run.log\"\n\n[engine]\nbracket_files = [\"uk.csv\", \"/abs/au.csv\"]"
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();

        assert_eq!(config.logging.file, Some(dir.path().join("run.log")));
        assert_eq!(
            config.engine.bracket_files,
            vec![dir.path().join("uk.csv"), PathBuf::from("/abs/au.csv")]
        );
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let err = AppConfig::load(&path).unwrap_err();

        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn load_bad_toml_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[engine\n").unwrap();

        let err = AppConfig::load(&path).unwrap_err();

        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }

    // =========================================================================
    // metadata
    // =========================================================================

    #[test]
    fn metadata_overwrites_only_set_fields() {
        let metadata = JurisdictionMetadata {
            name: Some("United Kingdom".to_string()),
            currency_symbol: Some("£".to_string()),
            ..Default::default()
        };
        let mut definition = JurisdictionDefinition::from_brackets("UK", vec![]);

        metadata.apply(&mut definition);

        assert_eq!(definition.name, "United Kingdom");
        assert_eq!(definition.currency_symbol, "£");
        assert_eq!(definition.currency_code, "UK");
        assert_eq!(definition.digit_grouping, DigitGrouping::Thousands);
    }
}
