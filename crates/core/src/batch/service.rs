//! Aggregate mutation logic for batches.
//!
//! All mutations recompute the cached totals from the full live line set
//! rather than incrementing them, so the cache can never drift from the
//! lines, and removal immediately closes any sequence gap.

use chrono::Utc;
use rust_decimal::Decimal;

use eftgate_shared::types::TransactionId;

use crate::batch::error::BatchError;
use crate::batch::types::{BatchStatus, EftBatch, EftTransaction, NewTransaction, SequenceNumber};
use crate::refdata::types::{Scheme, Supplier};

/// Smallest accepted line amount.
const MIN_AMOUNT: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Stateless service for mutating a batch aggregate.
///
/// Callers resolve the supplier and scheme through the reference data
/// store and pass them in; the service derives the zone and copies the
/// supplier snapshot fields.
pub struct BatchService;

impl BatchService {
    /// Adds a line to a draft batch.
    ///
    /// The zone is set to the scheme's zone unconditionally, overriding any
    /// caller-supplied zone. Empty snapshot fields are defaulted from the
    /// supplier (a one-time copy, not a live link). The sequence is
    /// `max(existing) + 1`, starting at 1.
    ///
    /// # Errors
    ///
    /// * `BatchError::InvalidStatus` if the batch is not in Draft
    /// * `BatchError::InvalidAmount` if the amount is below 0.01
    /// * `BatchError::SequenceExhausted` if the batch already holds 9999 lines
    pub fn add_transaction(
        batch: &mut EftBatch,
        input: NewTransaction,
        supplier: &Supplier,
        scheme: &Scheme,
    ) -> Result<TransactionId, BatchError> {
        if batch.status != BatchStatus::Draft {
            return Err(BatchError::InvalidStatus {
                expected: BatchStatus::Draft,
                actual: batch.status,
            });
        }
        if input.amount < MIN_AMOUNT {
            return Err(BatchError::InvalidAmount {
                amount: input.amount,
            });
        }

        let sequence = Self::next_sequence(batch)?;
        let id = TransactionId::new();
        batch.transactions.push(EftTransaction {
            id,
            sequence,
            debit_account_id: input.debit_account_id,
            supplier_id: input.supplier_id,
            scheme_id: input.scheme_id,
            // Always the scheme's zone, never the caller's.
            zone_id: scheme.zone_id,
            amount: input.amount,
            narration: input.narration,
            reference_number: input.reference_number,
            employee_number: default_if_empty(input.employee_number, &supplier.employee_number),
            national_id: default_if_empty(input.national_id, &supplier.national_id),
            cost_center: default_if_empty(input.cost_center, &supplier.cost_center),
            source_reference: default_if_empty(
                input.source_reference,
                &supplier.source_reference,
            ),
            created_at: Utc::now(),
        });

        Self::recompute_totals(batch);
        Ok(id)
    }

    /// Removes a line from a draft batch, then renumbers the remaining
    /// lines densely from 1 in insertion order.
    ///
    /// # Errors
    ///
    /// * `BatchError::InvalidStatus` if the batch is not in Draft
    /// * `BatchError::TransactionNotFound` if no line has the given id
    pub fn remove_transaction(
        batch: &mut EftBatch,
        transaction_id: TransactionId,
    ) -> Result<(), BatchError> {
        if batch.status != BatchStatus::Draft {
            return Err(BatchError::InvalidStatus {
                expected: BatchStatus::Draft,
                actual: batch.status,
            });
        }

        let position = batch
            .transactions
            .iter()
            .position(|t| t.id == transaction_id)
            .ok_or(BatchError::TransactionNotFound(transaction_id))?;
        batch.transactions.remove(position);

        Self::renumber(batch)?;
        Self::recompute_totals(batch);
        Ok(())
    }

    /// Recomputes the cached totals from the full live line set.
    pub fn recompute_totals(batch: &mut EftBatch) {
        batch.total_amount = batch.transactions.iter().map(|t| t.amount).sum();
        batch.record_count = u32::try_from(batch.transactions.len()).unwrap_or(u32::MAX);
    }

    /// Next sequence: `max(existing) + 1`, or 1 for an empty batch.
    fn next_sequence(batch: &EftBatch) -> Result<SequenceNumber, BatchError> {
        let max = batch
            .transactions
            .iter()
            .map(|t| t.sequence.value())
            .max()
            .unwrap_or(0);
        if max >= SequenceNumber::MAX {
            return Err(BatchError::SequenceExhausted);
        }
        SequenceNumber::new(max + 1)
    }

    /// Renumbers all lines 1..N in their insertion order.
    ///
    /// Insertion order is the vector order (lines are only ever pushed),
    /// which corresponds to the creation identity, not the old sequence.
    fn renumber(batch: &mut EftBatch) -> Result<(), BatchError> {
        for (index, transaction) in batch.transactions.iter_mut().enumerate() {
            let value = u16::try_from(index + 1).map_err(|_| BatchError::SequenceExhausted)?;
            transaction.sequence = SequenceNumber::new(value)?;
        }
        Ok(())
    }
}

fn default_if_empty(own: String, supplier_value: &str) -> String {
    if own.trim().is_empty() && !supplier_value.is_empty() {
        supplier_value.to_string()
    } else {
        own
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    use eftgate_shared::types::{BankId, UserId};
    use crate::refdata::types::Zone;

    fn fixture() -> (EftBatch, Supplier, Scheme, Zone) {
        let zone = Zone::new("CENTRAL", "Central Region");
        let scheme = Scheme::new("391", "Rural Water", zone.id);
        let mut supplier = Supplier::new(
            "0001234",
            "Anderson Ltd",
            BankId::new(),
            "91000004",
            "Anderson Ltd",
            UserId::new(),
        );
        supplier.employee_number = "EMP001".to_string();
        supplier.cost_center = "CC-77".to_string();
        let batch = EftBatch::create("PAYRUN 07", "MWK", UserId::new(), "EFT").unwrap();
        (batch, supplier, scheme, zone)
    }

    fn line(amount: Decimal) -> NewTransaction {
        NewTransaction {
            amount,
            narration: "July gratuity".to_string(),
            ..NewTransaction::default()
        }
    }

    #[test]
    fn test_add_assigns_dense_sequences_from_one() {
        let (mut batch, supplier, scheme, _) = fixture();
        for _ in 0..3 {
            BatchService::add_transaction(&mut batch, line(dec!(100.00)), &supplier, &scheme)
                .unwrap();
        }
        let seqs: Vec<String> = batch
            .transactions
            .iter()
            .map(|t| t.sequence.to_string())
            .collect();
        assert_eq!(seqs, vec!["0001", "0002", "0003"]);
    }

    #[test]
    fn test_add_recomputes_totals() {
        let (mut batch, supplier, scheme, _) = fixture();
        BatchService::add_transaction(&mut batch, line(dec!(1000.00)), &supplier, &scheme)
            .unwrap();
        BatchService::add_transaction(&mut batch, line(dec!(56153000.00)), &supplier, &scheme)
            .unwrap();
        BatchService::add_transaction(&mut batch, line(dec!(11207300.00)), &supplier, &scheme)
            .unwrap();
        assert_eq!(batch.total_amount, dec!(56165300.00));
        assert_eq!(batch.record_count, 3);
    }

    #[test]
    fn test_remove_middle_renumbers_and_recomputes() {
        let (mut batch, supplier, scheme, _) = fixture();
        BatchService::add_transaction(&mut batch, line(dec!(1000.00)), &supplier, &scheme)
            .unwrap();
        let middle =
            BatchService::add_transaction(&mut batch, line(dec!(56153000.00)), &supplier, &scheme)
                .unwrap();
        BatchService::add_transaction(&mut batch, line(dec!(11207300.00)), &supplier, &scheme)
            .unwrap();

        BatchService::remove_transaction(&mut batch, middle).unwrap();

        assert_eq!(batch.total_amount, dec!(11208300.00));
        assert_eq!(batch.record_count, 2);
        let seqs: Vec<String> = batch
            .transactions
            .iter()
            .map(|t| t.sequence.to_string())
            .collect();
        // The third line moves from 0003 to 0002; no gap remains.
        assert_eq!(seqs, vec!["0001", "0002"]);
        assert_eq!(batch.transactions[1].amount, dec!(11207300.00));
    }

    #[test]
    fn test_zone_always_derived_from_scheme() {
        let (mut batch, supplier, scheme, zone) = fixture();
        let other_zone = Zone::new("SL_ZONE", "Southern Lakeshore");
        let mut input = line(dec!(250.00));
        input.zone_id = Some(other_zone.id);

        BatchService::add_transaction(&mut batch, input, &supplier, &scheme).unwrap();

        assert_eq!(batch.transactions[0].zone_id, zone.id);
        assert_ne!(batch.transactions[0].zone_id, other_zone.id);
    }

    #[test]
    fn test_snapshot_fields_defaulted_only_when_empty() {
        let (mut batch, supplier, scheme, _) = fixture();
        let mut input = line(dec!(250.00));
        input.national_id = "AB123456".to_string();

        BatchService::add_transaction(&mut batch, input, &supplier, &scheme).unwrap();

        let t = &batch.transactions[0];
        // Empty fields pick up the supplier values.
        assert_eq!(t.employee_number, "EMP001");
        assert_eq!(t.cost_center, "CC-77");
        // Caller-supplied values win.
        assert_eq!(t.national_id, "AB123456");
        // Supplier had nothing to offer here.
        assert_eq!(t.source_reference, "");
    }

    #[test]
    fn test_snapshot_is_not_a_live_link() {
        let (mut batch, mut supplier, scheme, _) = fixture();
        BatchService::add_transaction(&mut batch, line(dec!(250.00)), &supplier, &scheme)
            .unwrap();

        supplier.employee_number = "CHANGED".to_string();

        assert_eq!(batch.transactions[0].employee_number, "EMP001");
    }

    #[test]
    fn test_add_rejects_non_positive_amounts() {
        let (mut batch, supplier, scheme, _) = fixture();
        for amount in [dec!(0), dec!(-5.00), dec!(0.009)] {
            let result =
                BatchService::add_transaction(&mut batch, line(amount), &supplier, &scheme);
            assert!(matches!(result, Err(BatchError::InvalidAmount { .. })));
        }
        assert_eq!(batch.record_count, 0);
    }

    #[test]
    fn test_add_rejects_non_draft_batch() {
        let (mut batch, supplier, scheme, _) = fixture();
        batch.status = BatchStatus::Pending;
        let result =
            BatchService::add_transaction(&mut batch, line(dec!(100.00)), &supplier, &scheme);
        assert!(matches!(
            result,
            Err(BatchError::InvalidStatus {
                expected: BatchStatus::Draft,
                actual: BatchStatus::Pending,
            })
        ));
    }

    #[test]
    fn test_remove_rejects_non_draft_batch() {
        let (mut batch, supplier, scheme, _) = fixture();
        let id = BatchService::add_transaction(&mut batch, line(dec!(100.00)), &supplier, &scheme)
            .unwrap();
        batch.status = BatchStatus::Approved;
        assert!(matches!(
            BatchService::remove_transaction(&mut batch, id),
            Err(BatchError::InvalidStatus { .. })
        ));
    }

    #[test]
    fn test_remove_unknown_line_fails() {
        let (mut batch, ..) = fixture();
        assert!(matches!(
            BatchService::remove_transaction(&mut batch, TransactionId::new()),
            Err(BatchError::TransactionNotFound(_))
        ));
    }
}
