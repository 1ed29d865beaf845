//! Append-only audit trail store.

use std::sync::{Mutex, PoisonError};

use eftgate_core::audit::AuditEntry;
use eftgate_shared::types::BatchId;

/// Thread-safe append-only store for audit entries.
///
/// There is deliberately no update or delete; the only reads are scoped
/// to a single batch's history.
#[derive(Default)]
pub struct AuditStore {
    entries: Mutex<Vec<AuditEntry>>,
}

impl AuditStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry to the trail.
    pub fn append(&self, entry: AuditEntry) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry);
    }

    /// Returns a batch's history in append order.
    #[must_use]
    pub fn for_batch(&self, batch_id: BatchId) -> Vec<AuditEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|entry| entry.batch_id == batch_id)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eftgate_core::audit::AuditAction;
    use eftgate_shared::types::UserId;

    #[test]
    fn test_history_is_scoped_and_ordered() {
        let store = AuditStore::new();
        let batch_a = BatchId::new();
        let batch_b = BatchId::new();
        let actor = UserId::new();

        store.append(AuditEntry::new(batch_a, AuditAction::Submitted, actor, "", None));
        store.append(AuditEntry::new(batch_b, AuditAction::Submitted, actor, "", None));
        store.append(AuditEntry::new(batch_a, AuditAction::Approved, actor, "ok", None));

        let history = store.for_batch(batch_a);
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].action, AuditAction::Submitted);
        assert_eq!(history[1].action, AuditAction::Approved);
    }
}
