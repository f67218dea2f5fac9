pub mod api;
pub mod calculations;
pub mod error;
pub mod format;
pub mod models;
pub mod registry;

pub use error::{BracketTableError, TaxError};
pub use models::*;
pub use registry::JurisdictionRegistry;
