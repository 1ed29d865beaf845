//! The EFT batch aggregate.
//!
//! A batch owns an ordered collection of transaction lines and caches
//! `total_amount`/`record_count` over them. Every mutation recomputes the
//! cached totals from the full live set and keeps sequence numbers dense
//! (1..N, no gaps), so the exported file always reconciles.
//!
//! # Modules
//!
//! - `types` - Batch and transaction line definitions
//! - `error` - Batch-specific error types
//! - `service` - Aggregate mutation logic (add/remove lines, renumbering)

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::BatchError;
pub use service::BatchService;
pub use types::{BatchStatus, EftBatch, EftTransaction, GeneratedFile, NewTransaction, SequenceNumber};
