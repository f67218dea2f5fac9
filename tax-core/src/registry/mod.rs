pub mod builtin;
mod jurisdiction_registry;

pub use jurisdiction_registry::JurisdictionRegistry;
