//! Store error types.

use thiserror::Error;

use eftgate_core::batch::BatchError;
use eftgate_core::export::ExportError;
use eftgate_core::refdata::RefDataError;
use eftgate_core::workflow::WorkflowError;

/// Errors surfaced by the stores and application services.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A referenced record does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A uniqueness constraint was violated.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A batch aggregate rule failed.
    #[error(transparent)]
    Batch(#[from] BatchError),

    /// A workflow or authorization rule failed.
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    /// File generation failed.
    #[error(transparent)]
    Export(#[from] ExportError),

    /// A reference data validation rule failed.
    #[error(transparent)]
    RefData(#[from] RefDataError),
}

impl StoreError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::Conflict(_) => 409,
            Self::Batch(e) => e.status_code(),
            Self::Workflow(e) => e.status_code(),
            Self::Export(e) => e.status_code(),
            Self::RefData(e) => e.status_code(),
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::Batch(e) => e.error_code(),
            Self::Workflow(e) => e.error_code(),
            Self::Export(e) => e.error_code(),
            Self::RefData(e) => e.error_code(),
        }
    }
}
