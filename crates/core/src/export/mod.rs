//! Payment file export: generation, CSV reshaping, and independent
//! structural validation.
//!
//! # Modules
//!
//! - `error` - Export-specific error types
//! - `generator` - Wire-format serialization of approved batches
//! - `structure` - Structural validation of candidate files

pub mod error;
pub mod generator;
pub mod structure;

#[cfg(test)]
mod generator_props;

pub use error::ExportError;
pub use generator::FileGenerator;
pub use structure::{StructureError, validate_structure};
