//! In-memory persistence and application services for Eftgate.
//!
//! This crate implements the persistence contracts the core expects
//! (reference data lookups, batch aggregates, the append-only audit
//! trail) and the application service facade that wires authorization,
//! workflow, export, and auditing together.
//!
//! # Modules
//!
//! - `refstore` - Reference data store with unique-code indexes
//! - `batches` - Batch store with per-aggregate locking
//! - `audit` - Append-only audit trail store
//! - `service` - Application service facade
//! - `error` - Store error types

pub mod audit;
pub mod batches;
pub mod error;
pub mod refstore;
pub mod service;

pub use audit::AuditStore;
pub use batches::BatchStore;
pub use error::StoreError;
pub use refstore::RefDataStore;
pub use service::{Actor, EftService, ExportFormat};
