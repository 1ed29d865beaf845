//! Export error types for file generation and validation.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::batch::types::{BatchStatus, SequenceNumber};
use crate::export::structure::StructureError;

/// Errors that can occur while generating or reshaping a payment file.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The batch is not in a status that permits export.
    #[error("Cannot export a batch in status {status}")]
    InvalidStatus {
        /// The batch's current status.
        status: BatchStatus,
    },

    /// The batch has no transactions to serialize.
    #[error("Cannot export an empty batch")]
    EmptyBatch,

    /// The live amount sum disagrees with the cached total beyond tolerance.
    #[error("Batch total {cached} does not match computed sum {computed}")]
    AmountMismatch {
        /// Sum recomputed over the live transactions.
        computed: Decimal,
        /// The batch's cached total.
        cached: Decimal,
    },

    /// The live transaction count disagrees with the cached record count.
    #[error("Batch record count {cached} does not match computed count {computed}")]
    CountMismatch {
        /// Count recomputed over the live transactions.
        computed: u32,
        /// The batch's cached record count.
        cached: u32,
    },

    /// A transaction references a record the lookup could not resolve.
    #[error("Transaction {sequence} is missing required reference: {missing}")]
    IncompleteTransaction {
        /// The offending line's sequence number.
        sequence: SequenceNumber,
        /// Which reference could not be resolved.
        missing: &'static str,
    },

    /// A candidate file failed the independent structural check.
    #[error(transparent)]
    Structure(#[from] StructureError),

    /// The CSV reshape pass failed to re-emit the file.
    #[error("Failed to reshape file as CSV: {0}")]
    Reshape(String),
}

impl ExportError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidStatus { .. } | Self::EmptyBatch | Self::Structure(_) => 400,
            Self::AmountMismatch { .. }
            | Self::CountMismatch { .. }
            | Self::IncompleteTransaction { .. } => 409,
            Self::Reshape(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidStatus { .. } => "INVALID_STATUS",
            Self::EmptyBatch => "EMPTY_BATCH",
            Self::AmountMismatch { .. } | Self::CountMismatch { .. } => "RECONCILIATION_ERROR",
            Self::IncompleteTransaction { .. } => "INCOMPLETE_TRANSACTION",
            Self::Structure(_) => "STRUCTURAL_ERROR",
            Self::Reshape(_) => "RESHAPE_ERROR",
        }
    }
}
