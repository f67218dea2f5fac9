//! Loading bracket tables from data files into a
//! [`JurisdictionRegistry`](tax_core::JurisdictionRegistry).

mod loader;

pub use loader::{BracketRecord, BracketTableLoader, BracketTableLoaderError};
