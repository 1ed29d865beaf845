//! Reference data entities consulted by the batch and export pipelines.
//!
//! Banks, zones, schemes, suppliers, and debit accounts are maintained by
//! the surrounding system; the core reads them through the [`ReferenceData`]
//! trait and never mutates them.
//!
//! # Modules
//!
//! - `types` - Entity definitions and the `ReferenceData` lookup trait
//! - `validation` - SWIFT/BIC and currency code validation
//! - `error` - Reference data error types

pub mod error;
pub mod types;
pub mod validation;

pub use error::RefDataError;
pub use types::{Bank, DebitAccount, ReferenceData, Scheme, Supplier, Zone};
pub use validation::{is_valid_currency_code, is_valid_swift_code};
