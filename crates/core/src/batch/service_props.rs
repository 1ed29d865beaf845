//! Property-based tests for the batch aggregate.
//!
//! These validate the two standing invariants: cached totals always equal
//! the live aggregation, and sequences are always dense 1..N while Draft.

use proptest::prelude::*;
use rust_decimal::Decimal;

use eftgate_shared::types::{BankId, UserId};

use crate::batch::service::BatchService;
use crate::batch::types::{EftBatch, NewTransaction};
use crate::refdata::types::{Scheme, Supplier, Zone};

#[derive(Debug, Clone)]
enum Op {
    /// Add a line with the given amount in hundredths.
    Add(i64),
    /// Remove the line at `index % len`, if any lines exist.
    Remove(usize),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (1i64..100_000_000i64).prop_map(Op::Add),
        (0usize..64usize).prop_map(Op::Remove),
    ]
}

fn fixture() -> (EftBatch, Supplier, Scheme) {
    let zone = Zone::new("CENTRAL", "Central Region");
    let scheme = Scheme::new("3", "Gravity Fed", zone.id);
    let supplier = Supplier::new(
        "0000001",
        "CCSECUR",
        BankId::new(),
        "12345612",
        "CCSECUR",
        UserId::new(),
    );
    let batch = EftBatch::create("PROP RUN", "MWK", UserId::new(), "EFT").unwrap();
    (batch, supplier, scheme)
}

fn assert_invariants(batch: &EftBatch) {
    let live_sum: Decimal = batch.transactions.iter().map(|t| t.amount).sum();
    assert_eq!(batch.total_amount, live_sum, "cached total drifted");
    assert_eq!(
        batch.record_count as usize,
        batch.transactions.len(),
        "cached count drifted"
    );

    let mut seqs: Vec<u16> = batch
        .transactions
        .iter()
        .map(|t| t.sequence.value())
        .collect();
    seqs.sort_unstable();
    let expected: Vec<u16> = (1..=u16::try_from(seqs.len()).unwrap()).collect();
    assert_eq!(seqs, expected, "sequences not dense 1..N");
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// After any committed add/remove the cached totals equal the live
    /// aggregation and sequences are exactly {0001..N}.
    #[test]
    fn prop_totals_and_sequences_hold_under_mutation(
        ops in prop::collection::vec(arb_op(), 1..40)
    ) {
        let (mut batch, supplier, scheme) = fixture();

        for op in ops {
            match op {
                Op::Add(cents) => {
                    let input = NewTransaction {
                        amount: Decimal::new(cents, 2),
                        ..NewTransaction::default()
                    };
                    BatchService::add_transaction(&mut batch, input, &supplier, &scheme)
                        .unwrap();
                }
                Op::Remove(index) => {
                    if !batch.transactions.is_empty() {
                        let id = batch.transactions[index % batch.transactions.len()].id;
                        BatchService::remove_transaction(&mut batch, id).unwrap();
                    }
                }
            }
            assert_invariants(&batch);
        }
    }

    /// Failed mutations leave the aggregate untouched.
    #[test]
    fn prop_rejected_amount_leaves_batch_unchanged(
        cents in -100_000i64..0i64
    ) {
        let (mut batch, supplier, scheme) = fixture();
        let before = batch.clone();

        let input = NewTransaction {
            amount: Decimal::new(cents, 2),
            ..NewTransaction::default()
        };
        let result = BatchService::add_transaction(&mut batch, input, &supplier, &scheme);

        prop_assert!(result.is_err());
        prop_assert_eq!(batch.record_count, before.record_count);
        prop_assert_eq!(batch.total_amount, before.total_amount);
        prop_assert_eq!(batch.transactions.len(), before.transactions.len());
    }
}
