//! Property-based tests for workflow transitions.

use proptest::prelude::*;

use eftgate_shared::types::UserId;

use crate::batch::types::{BatchStatus, EftBatch};
use crate::workflow::service::WorkflowService;

fn arb_status() -> impl Strategy<Value = BatchStatus> {
    prop_oneof![
        Just(BatchStatus::Draft),
        Just(BatchStatus::Pending),
        Just(BatchStatus::Approved),
        Just(BatchStatus::Rejected),
    ]
}

fn batch_in(status: BatchStatus) -> EftBatch {
    let mut batch = EftBatch::create("PROP WF", "MWK", UserId::new(), "EFT").unwrap();
    batch.record_count = 1;
    batch.status = status;
    batch
}

proptest! {
    /// The creator is refused approval and rejection from every status,
    /// and the refusal never mutates the batch.
    #[test]
    fn prop_creator_never_approves_own_batch(status in arb_status()) {
        let mut batch = batch_in(status);
        let creator = batch.created_by;

        prop_assert!(WorkflowService::approve(&mut batch, creator).is_err());
        prop_assert!(
            WorkflowService::reject(&mut batch, creator, "dup".to_string()).is_err()
        );
        prop_assert_eq!(batch.status, status);
        prop_assert!(batch.approved_by.is_none());
        prop_assert!(batch.rejection_reason.is_none());
    }

    /// A transition either succeeds exactly when the edge exists in the
    /// state machine, or fails leaving the batch in its prior status.
    #[test]
    fn prop_only_declared_edges_fire(status in arb_status()) {
        let other = UserId::new();

        let mut batch = batch_in(status);
        let submitted = WorkflowService::submit(&mut batch, other).is_ok();
        prop_assert_eq!(submitted, status == BatchStatus::Draft);
        prop_assert_eq!(
            batch.status,
            if submitted { BatchStatus::Pending } else { status }
        );

        let mut batch = batch_in(status);
        let approved = WorkflowService::approve(&mut batch, other).is_ok();
        prop_assert_eq!(approved, status == BatchStatus::Pending);
        prop_assert_eq!(
            batch.status,
            if approved { BatchStatus::Approved } else { status }
        );

        let mut batch = batch_in(status);
        let rejected =
            WorkflowService::reject(&mut batch, other, "bad totals".to_string()).is_ok();
        prop_assert_eq!(rejected, status == BatchStatus::Pending);
        prop_assert_eq!(
            batch.status,
            if rejected { BatchStatus::Rejected } else { status }
        );
    }
}
