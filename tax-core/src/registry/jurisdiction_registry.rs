use std::collections::HashMap;

use tracing::{debug, error, warn};

use super::builtin;
use crate::error::TaxError;
use crate::models::{BracketTable, Jurisdiction, JurisdictionDefinition, normalize_code};

/// Registry of jurisdictions, keyed by normalized code.
///
/// Typical lifetime:
/// 1. Create with [`JurisdictionRegistry::with_builtin`] (or `new()` for an
///    empty one).
/// 2. Call `register` for any additional definitions loaded at startup.
/// 3. Share it read-only and call `resolve` per request.
#[derive(Debug, Clone, Default)]
pub struct JurisdictionRegistry {
    jurisdictions: HashMap<String, Jurisdiction>,
}

impl JurisdictionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            jurisdictions: HashMap::new(),
        }
    }

    /// A registry holding the built-in US and IN schedules.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        for definition in builtin::jurisdictions() {
            let code = definition.code.clone();
            if let Err(error) = registry.register(definition) {
                error!(%code, %error, "built-in jurisdiction rejected");
            }
        }
        registry
    }

    /// Validate `definition` and register it.
    ///
    /// If a jurisdiction with the same code is already present it is
    /// replaced, which lets loaded data override a built-in schedule.
    ///
    /// # Errors
    /// * [`TaxError::InvalidBracketTable`]: the bracket table breaks an
    ///   ordering, coverage or rate rule. Nothing is registered.
    /// * [`TaxError::InvalidInput`]: the code is blank.
    pub fn register(
        &mut self,
        definition: JurisdictionDefinition,
    ) -> Result<(), TaxError> {
        let jurisdiction = Jurisdiction::try_from(definition)?;

        debug!(
            code = %jurisdiction.code,
            brackets = jurisdiction.table.brackets().len(),
            "registering jurisdiction"
        );

        if let Some(previous) = self
            .jurisdictions
            .insert(jurisdiction.code.clone(), jurisdiction)
        {
            warn!(code = %previous.code, "replaced previously registered jurisdiction");
        }

        Ok(())
    }

    /// Codes of every registered jurisdiction, sorted alphabetically.
    pub fn available_jurisdictions(&self) -> Vec<&str> {
        let mut codes: Vec<_> = self.jurisdictions.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    /// Registered jurisdictions sorted by code.
    pub fn jurisdictions(&self) -> Vec<&Jurisdiction> {
        let mut all: Vec<_> = self.jurisdictions.values().collect();
        all.sort_unstable_by(|a, b| a.code.cmp(&b.code));
        all
    }

    /// Look up a jurisdiction. Codes are matched case-insensitively.
    ///
    /// # Errors
    /// * [`TaxError::UnknownJurisdiction`]: nothing is registered under
    ///   `code`; the error lists the codes that are.
    pub fn resolve(
        &self,
        code: &str,
    ) -> Result<&Jurisdiction, TaxError> {
        self.jurisdictions
            .get(&normalize_code(code))
            .ok_or_else(|| TaxError::UnknownJurisdiction {
                code: code.trim().to_string(),
                available: self
                    .available_jurisdictions()
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
            })
    }

    /// Look up just the bracket table for `code`.
    pub fn resolve_table(
        &self,
        code: &str,
    ) -> Result<&BracketTable, TaxError> {
        self.resolve(code).map(|j| &j.table)
    }
}
