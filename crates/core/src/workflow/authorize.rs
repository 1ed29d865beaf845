//! Static role/operation authorization policy.
//!
//! Authorization is a pure function over four inputs: the operation, the
//! actor's role, whether the actor created the batch, and the batch's
//! current status. No database lookups happen here; callers resolve the
//! actor and batch first and pass the facts in.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::batch::types::BatchStatus;
use crate::workflow::error::WorkflowError;

/// Application role held by an actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Creates, edits, and submits batches; exports approved ones.
    AccountsPersonnel,
    /// Reviews pending batches and approves or rejects them.
    Authorizer,
    /// Read-only oversight across all batches.
    SystemAdmin,
}

impl Role {
    /// Returns the string representation of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AccountsPersonnel => "ACCOUNTS_PERSONNEL",
            Self::Authorizer => "AUTHORIZER",
            Self::SystemAdmin => "SYSTEM_ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACCOUNTS_PERSONNEL" => Ok(Self::AccountsPersonnel),
            "AUTHORIZER" => Ok(Self::Authorizer),
            "SYSTEM_ADMIN" => Ok(Self::SystemAdmin),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// A batch operation subject to authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Create a new draft batch.
    CreateBatch,
    /// Add or remove transactions on a draft batch.
    EditBatch,
    /// Submit a draft batch for authorization.
    SubmitBatch,
    /// Delete a draft batch.
    DeleteBatch,
    /// Read a batch and its transactions.
    ViewBatch,
    /// Approve a pending batch.
    ApproveBatch,
    /// Reject a pending batch.
    RejectBatch,
    /// Generate the payment file for an approved batch.
    ExportBatch,
}

impl Operation {
    /// Returns the string representation of the operation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CreateBatch => "CREATE_BATCH",
            Self::EditBatch => "EDIT_BATCH",
            Self::SubmitBatch => "SUBMIT_BATCH",
            Self::DeleteBatch => "DELETE_BATCH",
            Self::ViewBatch => "VIEW_BATCH",
            Self::ApproveBatch => "APPROVE_BATCH",
            Self::RejectBatch => "REJECT_BATCH",
            Self::ExportBatch => "EXPORT_BATCH",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Operations each role may perform, before ownership and status rules.
const fn role_allows(role: Role, op: Operation) -> bool {
    match role {
        Role::AccountsPersonnel => matches!(
            op,
            Operation::CreateBatch
                | Operation::EditBatch
                | Operation::SubmitBatch
                | Operation::DeleteBatch
                | Operation::ViewBatch
                | Operation::ExportBatch
        ),
        Role::Authorizer => matches!(
            op,
            Operation::ViewBatch
                | Operation::ApproveBatch
                | Operation::RejectBatch
                | Operation::ExportBatch
        ),
        Role::SystemAdmin => matches!(op, Operation::ViewBatch),
    }
}

/// Decides whether `role` may perform `op` against a batch.
///
/// `is_owner` is whether the actor created the batch; `status` is the
/// batch's current status. Checks run in order: role capability, then
/// ownership, then status preconditions specific to the operation. The
/// workflow service still re-validates status on transition, so a stale
/// `status` read cannot slip an invalid transition through.
///
/// # Errors
///
/// * `WorkflowError::PermissionDenied` when the role lacks the capability
///   or an ownership rule fails
/// * `WorkflowError::SelfApprovalForbidden` when a creator attempts to
///   approve or reject their own batch
pub fn authorize(
    op: Operation,
    role: Role,
    is_owner: bool,
    status: BatchStatus,
) -> Result<(), WorkflowError> {
    if !role_allows(role, op) {
        return Err(WorkflowError::PermissionDenied(format!(
            "role {role} may not perform {op}"
        )));
    }

    match op {
        // Makers only act on their own batches.
        Operation::EditBatch | Operation::SubmitBatch | Operation::DeleteBatch => {
            if !is_owner {
                return Err(WorkflowError::PermissionDenied(format!(
                    "{op} is restricted to the batch creator"
                )));
            }
        }
        Operation::ViewBatch => {
            if role == Role::AccountsPersonnel && !is_owner {
                return Err(WorkflowError::PermissionDenied(
                    "accounts personnel may only view their own batches".to_string(),
                ));
            }
        }
        Operation::ApproveBatch | Operation::RejectBatch => {
            if is_owner {
                return Err(WorkflowError::SelfApprovalForbidden);
            }
        }
        Operation::ExportBatch => {
            if status != BatchStatus::Approved {
                return Err(WorkflowError::PermissionDenied(format!(
                    "only approved batches can be exported, batch is {status}"
                )));
            }
        }
        Operation::CreateBatch => {}
    }

    Ok(())
}
