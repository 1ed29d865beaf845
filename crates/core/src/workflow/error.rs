//! Workflow error types for the batch lifecycle.

use thiserror::Error;

use crate::batch::types::BatchStatus;

/// Errors that can occur during workflow operations.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Attempted an invalid status transition.
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: BatchStatus,
        /// The attempted target status.
        to: BatchStatus,
    },

    /// Batch has no transactions and cannot be submitted.
    #[error("Cannot submit an empty batch")]
    EmptyBatch,

    /// The batch creator attempted to approve or reject their own batch.
    #[error("A batch cannot be approved or rejected by its creator")]
    SelfApprovalForbidden,

    /// Rejection reason is required but not provided.
    #[error("Rejection reason is required")]
    RejectionReasonRequired,

    /// The actor's role or ownership does not permit the operation.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),
}

impl WorkflowError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidTransition { .. }
            | Self::EmptyBatch
            | Self::RejectionReasonRequired => 400,
            Self::SelfApprovalForbidden | Self::PermissionDenied(_) => 403,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::EmptyBatch => "EMPTY_BATCH",
            Self::SelfApprovalForbidden => "SELF_APPROVAL_FORBIDDEN",
            Self::RejectionReasonRequired => "REJECTION_REASON_REQUIRED",
            Self::PermissionDenied(_) => "PERMISSION_DENIED",
        }
    }
}
