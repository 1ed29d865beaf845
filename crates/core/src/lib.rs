//! Core business logic for Eftgate.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and the payment-file generator live here.
//!
//! # Modules
//!
//! - `refdata` - Reference data entities (banks, zones, schemes, suppliers, debit accounts)
//! - `batch` - The EFT batch aggregate: line items, sequencing, cached totals
//! - `workflow` - Batch lifecycle state machine and authorization policy
//! - `audit` - Append-only approval audit trail types
//! - `export` - Wire-format file generator and structural validator

pub mod audit;
pub mod batch;
pub mod export;
pub mod refdata;
pub mod workflow;
