//! State transition logic for the batch lifecycle.
//!
//! Valid transitions:
//! - Draft → Pending (submit, non-empty batches only)
//! - Pending → Approved (approve, never by the creator)
//! - Pending → Rejected (reject, never by the creator, reason required)
//!
//! Rejected is terminal; there is no path back to Draft or Pending.
//! Approved batches stay Approved after export and remain re-exportable.

use chrono::Utc;

use eftgate_shared::types::UserId;

use crate::batch::types::{BatchStatus, EftBatch};
use crate::workflow::error::WorkflowError;

/// Stateless service applying workflow transitions to a batch aggregate.
///
/// Callers persist the mutated aggregate together with the matching audit
/// entry in one atomic commit; on error the aggregate is unchanged.
pub struct WorkflowService;

impl WorkflowService {
    /// Submits a draft batch for authorization.
    ///
    /// # Errors
    ///
    /// * `WorkflowError::InvalidTransition` if the batch is not in Draft
    /// * `WorkflowError::EmptyBatch` if the batch has no transactions
    pub fn submit(batch: &mut EftBatch, _actor: UserId) -> Result<(), WorkflowError> {
        if batch.status != BatchStatus::Draft {
            return Err(WorkflowError::InvalidTransition {
                from: batch.status,
                to: BatchStatus::Pending,
            });
        }
        if batch.record_count == 0 {
            return Err(WorkflowError::EmptyBatch);
        }
        batch.status = BatchStatus::Pending;
        Ok(())
    }

    /// Approves a pending batch, recording the approver and timestamp.
    ///
    /// The self-approval check runs before the status check so a creator
    /// is always answered with `SelfApprovalForbidden`, whatever the
    /// batch's state.
    ///
    /// # Errors
    ///
    /// * `WorkflowError::SelfApprovalForbidden` if the actor created the batch
    /// * `WorkflowError::InvalidTransition` if the batch is not Pending
    pub fn approve(batch: &mut EftBatch, actor: UserId) -> Result<(), WorkflowError> {
        if actor == batch.created_by {
            return Err(WorkflowError::SelfApprovalForbidden);
        }
        if batch.status != BatchStatus::Pending {
            return Err(WorkflowError::InvalidTransition {
                from: batch.status,
                to: BatchStatus::Approved,
            });
        }
        batch.status = BatchStatus::Approved;
        batch.approved_by = Some(actor);
        batch.approved_at = Some(Utc::now());
        Ok(())
    }

    /// Rejects a pending batch with a mandatory reason. Terminal.
    ///
    /// # Errors
    ///
    /// * `WorkflowError::SelfApprovalForbidden` if the actor created the batch
    /// * `WorkflowError::RejectionReasonRequired` if the reason is blank
    /// * `WorkflowError::InvalidTransition` if the batch is not Pending
    pub fn reject(
        batch: &mut EftBatch,
        actor: UserId,
        reason: String,
    ) -> Result<(), WorkflowError> {
        if actor == batch.created_by {
            return Err(WorkflowError::SelfApprovalForbidden);
        }
        if reason.trim().is_empty() {
            return Err(WorkflowError::RejectionReasonRequired);
        }
        if batch.status != BatchStatus::Pending {
            return Err(WorkflowError::InvalidTransition {
                from: batch.status,
                to: BatchStatus::Rejected,
            });
        }
        batch.status = BatchStatus::Rejected;
        batch.rejection_reason = Some(reason);
        Ok(())
    }
}
