//! Append-only approval audit trail types.
//!
//! One entry is written for every state-changing action against a batch.
//! Entries are never updated or deleted; if an entry cannot be written the
//! enclosing transition must fail as a whole.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;

use eftgate_shared::types::{AuditEntryId, BatchId, UserId};

/// The state-changing action an audit entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuditAction {
    /// Batch submitted for authorization.
    Submitted,
    /// Batch approved by an authorizer.
    Approved,
    /// Batch rejected by an authorizer.
    Rejected,
    /// Batch exported as a payment file.
    Exported,
}

impl AuditAction {
    /// Returns the string representation of the action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Submitted => "SUBMITTED",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::Exported => "EXPORTED",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One immutable row in the approval audit trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Unique identifier.
    pub id: AuditEntryId,
    /// The batch the action was taken against.
    pub batch_id: BatchId,
    /// The recorded action.
    pub action: AuditAction,
    /// The acting user.
    pub actor: UserId,
    /// When the action happened.
    pub timestamp: DateTime<Utc>,
    /// Free-text remarks (approval notes, rejection reason, export format).
    pub remarks: String,
    /// The acting client's network address, when known.
    pub ip_address: Option<IpAddr>,
}

impl AuditEntry {
    /// Creates a new audit entry stamped with the current time.
    #[must_use]
    pub fn new(
        batch_id: BatchId,
        action: AuditAction,
        actor: UserId,
        remarks: impl Into<String>,
        ip_address: Option<IpAddr>,
    ) -> Self {
        Self {
            id: AuditEntryId::new(),
            batch_id,
            action,
            actor,
            timestamp: Utc::now(),
            remarks: remarks.into(),
            ip_address,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_as_str() {
        assert_eq!(AuditAction::Submitted.as_str(), "SUBMITTED");
        assert_eq!(AuditAction::Approved.as_str(), "APPROVED");
        assert_eq!(AuditAction::Rejected.as_str(), "REJECTED");
        assert_eq!(AuditAction::Exported.as_str(), "EXPORTED");
    }

    #[test]
    fn test_entry_captures_actor_and_batch() {
        let batch_id = BatchId::new();
        let actor = UserId::new();
        let entry = AuditEntry::new(batch_id, AuditAction::Submitted, actor, "", None);
        assert_eq!(entry.batch_id, batch_id);
        assert_eq!(entry.actor, actor);
        assert!(entry.remarks.is_empty());
        assert!(entry.ip_address.is_none());
    }
}
