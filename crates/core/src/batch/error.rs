//! Batch aggregate error types.

use rust_decimal::Decimal;
use thiserror::Error;

use eftgate_shared::types::TransactionId;

use crate::batch::types::BatchStatus;

/// Errors that can occur while mutating a batch aggregate.
#[derive(Debug, Error)]
pub enum BatchError {
    /// Operation attempted from a disallowed batch status.
    #[error("Operation requires status {expected}, batch is {actual}")]
    InvalidStatus {
        /// The status the operation requires.
        expected: BatchStatus,
        /// The batch's current status.
        actual: BatchStatus,
    },

    /// Transaction amount is below the minimum of 0.01.
    #[error("Transaction amount must be at least 0.01, got {amount}")]
    InvalidAmount {
        /// The rejected amount.
        amount: Decimal,
    },

    /// Currency code is not three uppercase ASCII letters.
    #[error("Invalid currency code: {0}")]
    InvalidCurrency(String),

    /// Batch name is empty.
    #[error("Batch name must not be empty")]
    EmptyName,

    /// The referenced transaction line does not exist in this batch.
    #[error("Transaction {0} not found in batch")]
    TransactionNotFound(TransactionId),

    /// The batch already holds the maximum number of lines (9999).
    #[error("Batch already holds the maximum of 9999 transactions")]
    SequenceExhausted,
}

impl BatchError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidStatus { .. }
            | Self::InvalidAmount { .. }
            | Self::InvalidCurrency(_)
            | Self::EmptyName
            | Self::SequenceExhausted => 400,
            Self::TransactionNotFound(_) => 404,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidStatus { .. } => "INVALID_STATUS",
            Self::InvalidAmount { .. } => "INVALID_AMOUNT",
            Self::InvalidCurrency(_) => "INVALID_CURRENCY",
            Self::EmptyName => "EMPTY_NAME",
            Self::TransactionNotFound(_) => "TRANSACTION_NOT_FOUND",
            Self::SequenceExhausted => "SEQUENCE_EXHAUSTED",
        }
    }
}
