//! Batch lifecycle workflow for Eftgate.
//!
//! This module implements the batch state machine (Draft → Pending →
//! Approved/Rejected), the self-approval rule, and the role-based
//! authorization policy.
//!
//! # Modules
//!
//! - `error` - Workflow-specific error types
//! - `service` - State transition logic
//! - `authorize` - Static role/operation authorization policy

pub mod authorize;
pub mod error;
pub mod service;

#[cfg(test)]
mod service_props;

pub use authorize::{Operation, Role};
pub use error::WorkflowError;
pub use service::WorkflowService;
