//! Batch and transaction line definitions.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use eftgate_shared::types::{
    BatchId, DebitAccountId, SchemeId, SupplierId, TransactionId, UserId, ZoneId,
};

use crate::batch::error::BatchError;
use crate::refdata::validation::is_valid_currency_code;

/// Batch status in the approval workflow.
///
/// Batches progress through these states from creation to export.
/// The valid transitions are:
/// - Draft → Pending (submit)
/// - Pending → Approved (approve)
/// - Pending → Rejected (reject)
///
/// `Exported` is declared for completeness but no transition enters it:
/// an approved batch stays `Approved` and remains re-exportable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BatchStatus {
    /// Batch is being drafted and can be modified.
    Draft,
    /// Batch has been submitted for authorization.
    Pending,
    /// Batch has been approved and may be exported.
    Approved,
    /// Batch has been rejected (terminal).
    Rejected,
    /// Declared status for exported batches; never entered in practice.
    Exported,
}

impl BatchStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::Exported => "EXPORTED",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "DRAFT" => Some(Self::Draft),
            "PENDING" => Some(Self::Pending),
            "APPROVED" => Some(Self::Approved),
            "REJECTED" => Some(Self::Rejected),
            "EXPORTED" => Some(Self::Exported),
            _ => None,
        }
    }

    /// Returns true if the batch's lines can be modified.
    #[must_use]
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Draft)
    }

    /// Returns true if the batch is awaiting authorization.
    #[must_use]
    pub fn can_authorize(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Returns true if the batch may be exported.
    #[must_use]
    pub fn can_export(&self) -> bool {
        matches!(self, Self::Approved)
    }
}

impl fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A line's position within its batch, rendered as a 4-digit zero-padded
/// string on the wire (0001-9999).
///
/// Sequences are kept dense: whenever a line is removed, all remaining
/// lines are renumbered from 1 in insertion order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SequenceNumber(u16);

impl SequenceNumber {
    /// The largest sequence the 4-digit wire field can carry.
    pub const MAX: u16 = 9999;

    /// Creates a sequence number; valid values are 1..=9999.
    pub fn new(value: u16) -> Result<Self, BatchError> {
        if value == 0 || value > Self::MAX {
            return Err(BatchError::SequenceExhausted);
        }
        Ok(Self(value))
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn value(self) -> u16 {
        self.0
    }
}

impl fmt::Display for SequenceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

/// One payment instruction within a batch.
///
/// The `employee_number`/`national_id`/`cost_center`/`source_reference`
/// fields are one-time snapshots copied from the supplier at creation;
/// later supplier edits do not reach existing lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EftTransaction {
    /// Unique identifier (also the insertion identity used for renumbering).
    pub id: TransactionId,
    /// Dense position within the batch.
    pub sequence: SequenceNumber,
    /// Payer-side debit account.
    pub debit_account_id: DebitAccountId,
    /// Payee supplier.
    pub supplier_id: SupplierId,
    /// Payment scheme; the zone is derived from it.
    pub scheme_id: SchemeId,
    /// Routing zone, always the scheme's zone.
    pub zone_id: ZoneId,
    /// Payment amount; strictly positive, 2 decimal places at serialization.
    pub amount: Decimal,
    /// Free-text description (truncated to 200 chars on the wire).
    pub narration: String,
    /// Invoice number / payee reference.
    pub reference_number: String,
    /// Snapshot of the supplier's employee number.
    pub employee_number: String,
    /// Snapshot of the supplier's national ID.
    pub national_id: String,
    /// Snapshot of the supplier's cost centre.
    pub cost_center: String,
    /// Snapshot of the supplier's upstream source reference.
    pub source_reference: String,
    /// When the line was created.
    pub created_at: DateTime<Utc>,
}

/// Input for adding a line to a batch.
///
/// `zone_id` is accepted for symmetry with the form layer but is always
/// overridden by the scheme's zone. Empty snapshot fields are defaulted
/// from the supplier.
#[derive(Debug, Clone, Default)]
pub struct NewTransaction {
    /// Payer-side debit account.
    pub debit_account_id: DebitAccountId,
    /// Payee supplier.
    pub supplier_id: SupplierId,
    /// Payment scheme.
    pub scheme_id: SchemeId,
    /// Caller-supplied zone; ignored in favour of the scheme's zone.
    pub zone_id: Option<ZoneId>,
    /// Payment amount.
    pub amount: Decimal,
    /// Free-text description.
    pub narration: String,
    /// Invoice number / payee reference.
    pub reference_number: String,
    /// Employee number; defaulted from the supplier when empty.
    pub employee_number: String,
    /// National ID; defaulted from the supplier when empty.
    pub national_id: String,
    /// Cost centre; defaulted from the supplier when empty.
    pub cost_center: String,
    /// Source reference; defaulted from the supplier when empty.
    pub source_reference: String,
}

/// A generated wire file, persisted onto the batch after export.
///
/// Re-export overwrites the previous content and timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedFile {
    /// The serialized wire-format payload.
    pub content: String,
    /// When the file was generated.
    pub generated_at: DateTime<Utc>,
}

/// The batch aggregate root: header plus its ordered transaction lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EftBatch {
    /// Unique identifier.
    pub id: BatchId,
    /// Generated unique batch reference (timestamp-derived token).
    pub reference: String,
    /// File reference derived from the creation date.
    pub file_reference: String,
    /// Batch display name (truncated to 50 chars on the wire).
    pub name: String,
    /// Transaction currency (ISO 4217).
    pub currency: String,
    /// Cached sum of line amounts; recomputed after every line mutation.
    pub total_amount: Decimal,
    /// Cached line count; recomputed after every line mutation.
    pub record_count: u32,
    /// Current workflow status.
    pub status: BatchStatus,
    /// The accounts person who created the batch.
    pub created_by: UserId,
    /// When the batch was created.
    pub created_at: DateTime<Utc>,
    /// The authorizer who approved the batch (set only on approval).
    pub approved_by: Option<UserId>,
    /// When the batch was approved (set only on approval).
    pub approved_at: Option<DateTime<Utc>>,
    /// Reason for rejection (set only on rejection).
    pub rejection_reason: Option<String>,
    /// The last generated wire file, if any.
    pub generated_file: Option<GeneratedFile>,
    /// The owned transaction lines.
    pub transactions: Vec<EftTransaction>,
}

impl EftBatch {
    /// Creates a new draft batch with zero totals and generated references.
    pub fn create(
        name: impl Into<String>,
        currency: impl Into<String>,
        created_by: UserId,
        reference_prefix: &str,
    ) -> Result<Self, BatchError> {
        let name = name.into();
        let currency = currency.into();
        if name.trim().is_empty() {
            return Err(BatchError::EmptyName);
        }
        if !is_valid_currency_code(&currency) {
            return Err(BatchError::InvalidCurrency(currency));
        }

        let now = Utc::now();
        let suffix = Uuid::new_v4().simple().to_string();
        Ok(Self {
            id: BatchId::new(),
            reference: format!(
                "{reference_prefix}-{}-{}",
                now.format("%Y%m%d-%H%M%S"),
                &suffix[..6]
            ),
            file_reference: format!("{reference_prefix}-{}", now.format("%d.%m.%Y")),
            name,
            currency,
            total_amount: Decimal::ZERO,
            record_count: 0,
            status: BatchStatus::Draft,
            created_by,
            created_at: now,
            approved_by: None,
            approved_at: None,
            rejection_reason: None,
            generated_file: None,
            transactions: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_as_str_roundtrip() {
        for status in [
            BatchStatus::Draft,
            BatchStatus::Pending,
            BatchStatus::Approved,
            BatchStatus::Rejected,
            BatchStatus::Exported,
        ] {
            assert_eq!(BatchStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(BatchStatus::parse("bogus"), None);
    }

    #[test]
    fn test_status_parse_is_case_insensitive() {
        assert_eq!(BatchStatus::parse("draft"), Some(BatchStatus::Draft));
        assert_eq!(BatchStatus::parse("Approved"), Some(BatchStatus::Approved));
    }

    #[test]
    fn test_status_capabilities() {
        assert!(BatchStatus::Draft.is_editable());
        assert!(!BatchStatus::Pending.is_editable());
        assert!(BatchStatus::Pending.can_authorize());
        assert!(!BatchStatus::Approved.can_authorize());
        assert!(BatchStatus::Approved.can_export());
        assert!(!BatchStatus::Rejected.can_export());
    }

    #[test]
    fn test_sequence_number_display_is_zero_padded() {
        assert_eq!(SequenceNumber::new(1).unwrap().to_string(), "0001");
        assert_eq!(SequenceNumber::new(42).unwrap().to_string(), "0042");
        assert_eq!(SequenceNumber::new(9999).unwrap().to_string(), "9999");
    }

    #[test]
    fn test_sequence_number_bounds() {
        assert!(SequenceNumber::new(0).is_err());
        assert!(SequenceNumber::new(10_000).is_err());
    }

    #[test]
    fn test_create_batch_starts_draft_with_zero_totals() {
        let batch = EftBatch::create("PAYRUN 07", "MWK", UserId::new(), "EFT").unwrap();
        assert_eq!(batch.status, BatchStatus::Draft);
        assert_eq!(batch.total_amount, Decimal::ZERO);
        assert_eq!(batch.record_count, 0);
        assert!(batch.transactions.is_empty());
        assert!(batch.reference.starts_with("EFT-"));
        assert!(batch.file_reference.starts_with("EFT-"));
    }

    #[test]
    fn test_create_batch_rejects_bad_currency() {
        assert!(matches!(
            EftBatch::create("PAYRUN 07", "mwk", UserId::new(), "EFT"),
            Err(BatchError::InvalidCurrency(_))
        ));
        assert!(matches!(
            EftBatch::create("PAYRUN 07", "MWKX", UserId::new(), "EFT"),
            Err(BatchError::InvalidCurrency(_))
        ));
    }

    #[test]
    fn test_create_batch_rejects_empty_name() {
        assert!(matches!(
            EftBatch::create("  ", "MWK", UserId::new(), "EFT"),
            Err(BatchError::EmptyName)
        ));
    }

    #[test]
    fn test_batch_references_are_unique() {
        let a = EftBatch::create("A", "MWK", UserId::new(), "EFT").unwrap();
        let b = EftBatch::create("B", "MWK", UserId::new(), "EFT").unwrap();
        assert_ne!(a.reference, b.reference);
    }
}
