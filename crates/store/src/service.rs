//! Application services tying batches, workflow, export, and audit
//! together.
//!
//! Every multi-step state change (transition + audit append, line
//! mutation + total recompute) runs inside the owning batch's lock and
//! commits all-or-nothing; see [`crate::batches::BatchStore`].

use std::net::IpAddr;

use tracing::info;

use eftgate_core::audit::{AuditAction, AuditEntry};
use eftgate_core::batch::{BatchError, BatchService, BatchStatus, EftBatch, NewTransaction};
use eftgate_core::export::FileGenerator;
use eftgate_core::refdata::ReferenceData;
use eftgate_core::workflow::authorize::authorize;
use eftgate_core::workflow::{Operation, Role, WorkflowService};
use eftgate_shared::config::EftConfig;
use eftgate_shared::types::{BatchId, TransactionId, UserId};

use crate::audit::AuditStore;
use crate::batches::BatchStore;
use crate::error::StoreError;
use crate::refstore::RefDataStore;

/// An authenticated caller, as supplied by the identity layer.
///
/// The services never authenticate; they only authorize based on the
/// supplied role and ownership checks.
#[derive(Debug, Clone, Copy)]
pub struct Actor {
    /// Stable user identifier.
    pub id: UserId,
    /// Role classification.
    pub role: Role,
    /// Client network address, recorded on audit entries.
    pub ip: Option<IpAddr>,
}

impl Actor {
    /// Creates an actor without a known network address.
    #[must_use]
    pub fn new(id: UserId, role: Role) -> Self {
        Self { id, role, ip: None }
    }
}

/// Requested payload shape for an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// The raw `;`-delimited switch layout.
    Txt,
    /// The same lines re-emitted with strict CSV quoting.
    Csv,
}

impl ExportFormat {
    /// Returns the string representation of the format.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Txt => "TXT",
            Self::Csv => "CSV",
        }
    }
}

/// The application service facade over all stores.
pub struct EftService {
    refdata: RefDataStore,
    batches: BatchStore,
    audit: AuditStore,
    config: EftConfig,
}

impl EftService {
    /// Creates a service with empty stores.
    #[must_use]
    pub fn new(config: EftConfig) -> Self {
        Self {
            refdata: RefDataStore::new(),
            batches: BatchStore::new(),
            audit: AuditStore::new(),
            config,
        }
    }

    /// Returns the reference data store.
    #[must_use]
    pub fn refdata(&self) -> &RefDataStore {
        &self.refdata
    }

    /// Creates a new draft batch owned by the actor.
    ///
    /// When `currency` is `None` the configured default currency is used.
    pub fn create_batch(
        &self,
        actor: &Actor,
        name: &str,
        currency: Option<&str>,
    ) -> Result<EftBatch, StoreError> {
        authorize(Operation::CreateBatch, actor.role, true, BatchStatus::Draft)?;
        let currency = currency.unwrap_or(&self.config.default_currency);
        let batch = EftBatch::create(name, currency, actor.id, &self.config.reference_prefix)?;
        info!(batch_id = %batch.id, reference = %batch.reference, "Batch created");
        self.batches.insert(batch.clone())?;
        Ok(batch)
    }

    /// Returns a snapshot of a batch the actor is allowed to see.
    pub fn batch(&self, actor: &Actor, batch_id: BatchId) -> Result<EftBatch, StoreError> {
        let batch = self.batches.get(batch_id)?;
        authorize(
            Operation::ViewBatch,
            actor.role,
            batch.created_by == actor.id,
            batch.status,
        )?;
        Ok(batch)
    }

    /// Returns snapshots of the batches the actor is allowed to see,
    /// newest first. Accounts personnel see only their own batches.
    #[must_use]
    pub fn list_batches(&self, actor: &Actor) -> Vec<EftBatch> {
        self.batches
            .list()
            .into_iter()
            .filter(|batch| {
                authorize(
                    Operation::ViewBatch,
                    actor.role,
                    batch.created_by == actor.id,
                    batch.status,
                )
                .is_ok()
            })
            .collect()
    }

    /// Returns a batch's audit history, oldest entry first.
    pub fn history(
        &self,
        actor: &Actor,
        batch_id: BatchId,
    ) -> Result<Vec<AuditEntry>, StoreError> {
        // View rights on the batch imply view rights on its history.
        self.batch(actor, batch_id)?;
        Ok(self.audit.for_batch(batch_id))
    }

    /// Adds a payment line to a draft batch owned by the actor.
    ///
    /// The supplier and scheme are resolved and must be active; the
    /// line's zone and snapshot fields are derived inside the aggregate.
    pub fn add_transaction(
        &self,
        actor: &Actor,
        batch_id: BatchId,
        input: NewTransaction,
    ) -> Result<TransactionId, StoreError> {
        let supplier = self
            .refdata
            .supplier(input.supplier_id)
            .ok_or_else(|| StoreError::NotFound(format!("supplier {}", input.supplier_id)))?;
        if !supplier.active {
            return Err(StoreError::Conflict(format!(
                "supplier {} is inactive",
                supplier.code
            )));
        }
        let scheme = self
            .refdata
            .scheme(input.scheme_id)
            .ok_or_else(|| StoreError::NotFound(format!("scheme {}", input.scheme_id)))?;
        if !scheme.active {
            return Err(StoreError::Conflict(format!(
                "scheme {} is inactive",
                scheme.code
            )));
        }
        if self.refdata.debit_account(input.debit_account_id).is_none() {
            return Err(StoreError::NotFound(format!(
                "debit account {}",
                input.debit_account_id
            )));
        }

        self.batches.with_batch_mut(batch_id, |batch| {
            authorize(
                Operation::EditBatch,
                actor.role,
                batch.created_by == actor.id,
                batch.status,
            )?;
            let id = BatchService::add_transaction(batch, input, &supplier, &scheme)?;
            info!(batch_id = %batch_id, transaction_id = %id, "Transaction added");
            Ok(id)
        })
    }

    /// Removes a payment line from a draft batch owned by the actor.
    ///
    /// Remaining lines are renumbered densely and totals recomputed in
    /// the same committed mutation.
    pub fn delete_transaction(
        &self,
        actor: &Actor,
        batch_id: BatchId,
        transaction_id: TransactionId,
    ) -> Result<(), StoreError> {
        self.batches.with_batch_mut(batch_id, |batch| {
            authorize(
                Operation::EditBatch,
                actor.role,
                batch.created_by == actor.id,
                batch.status,
            )?;
            BatchService::remove_transaction(batch, transaction_id)?;
            info!(batch_id = %batch_id, transaction_id = %transaction_id, "Transaction removed");
            Ok(())
        })
    }

    /// Permanently deletes a draft batch and its lines.
    pub fn delete_batch(&self, actor: &Actor, batch_id: BatchId) -> Result<(), StoreError> {
        self.batches.remove_if(batch_id, |batch| {
            authorize(
                Operation::DeleteBatch,
                actor.role,
                batch.created_by == actor.id,
                batch.status,
            )?;
            if batch.status != BatchStatus::Draft {
                return Err(BatchError::InvalidStatus {
                    expected: BatchStatus::Draft,
                    actual: batch.status,
                }
                .into());
            }
            Ok(())
        })?;
        info!(batch_id = %batch_id, "Batch deleted");
        Ok(())
    }

    /// Submits a draft batch for authorization, appending the SUBMITTED
    /// audit entry in the same commit.
    pub fn submit(&self, actor: &Actor, batch_id: BatchId) -> Result<(), StoreError> {
        self.batches.with_batch_mut(batch_id, |batch| {
            authorize(
                Operation::SubmitBatch,
                actor.role,
                batch.created_by == actor.id,
                batch.status,
            )?;
            WorkflowService::submit(batch, actor.id)?;
            self.audit.append(AuditEntry::new(
                batch_id,
                AuditAction::Submitted,
                actor.id,
                "",
                actor.ip,
            ));
            info!(batch_id = %batch_id, actor = %actor.id, "Batch submitted");
            Ok(())
        })
    }

    /// Approves a pending batch, appending the APPROVED audit entry with
    /// the given remarks in the same commit.
    pub fn approve(
        &self,
        actor: &Actor,
        batch_id: BatchId,
        remarks: Option<String>,
    ) -> Result<(), StoreError> {
        self.batches.with_batch_mut(batch_id, |batch| {
            authorize(
                Operation::ApproveBatch,
                actor.role,
                batch.created_by == actor.id,
                batch.status,
            )?;
            WorkflowService::approve(batch, actor.id)?;
            self.audit.append(AuditEntry::new(
                batch_id,
                AuditAction::Approved,
                actor.id,
                remarks.unwrap_or_default(),
                actor.ip,
            ));
            info!(batch_id = %batch_id, actor = %actor.id, "Batch approved");
            Ok(())
        })
    }

    /// Rejects a pending batch with a mandatory reason, appending the
    /// REJECTED audit entry in the same commit.
    pub fn reject(
        &self,
        actor: &Actor,
        batch_id: BatchId,
        reason: String,
    ) -> Result<(), StoreError> {
        self.batches.with_batch_mut(batch_id, |batch| {
            authorize(
                Operation::RejectBatch,
                actor.role,
                batch.created_by == actor.id,
                batch.status,
            )?;
            WorkflowService::reject(batch, actor.id, reason.clone())?;
            self.audit.append(AuditEntry::new(
                batch_id,
                AuditAction::Rejected,
                actor.id,
                reason,
                actor.ip,
            ));
            info!(batch_id = %batch_id, actor = %actor.id, "Batch rejected");
            Ok(())
        })
    }

    /// Generates the payment file for an approved batch and returns its
    /// content in the requested format.
    ///
    /// The raw wire content and a generation timestamp are persisted on
    /// the batch; re-export overwrites them. On any generation error
    /// (reconciliation, dangling references) nothing is persisted.
    pub fn export(
        &self,
        actor: &Actor,
        batch_id: BatchId,
        format: ExportFormat,
    ) -> Result<String, StoreError> {
        self.batches.with_batch_mut(batch_id, |batch| {
            authorize(
                Operation::ExportBatch,
                actor.role,
                batch.created_by == actor.id,
                batch.status,
            )?;
            let file = FileGenerator::generate(batch, &self.refdata)?;
            let payload = match format {
                ExportFormat::Txt => file.content.clone(),
                ExportFormat::Csv => FileGenerator::reshape_csv(&file.content)?,
            };
            batch.generated_file = Some(file);
            self.audit.append(AuditEntry::new(
                batch_id,
                AuditAction::Exported,
                actor.id,
                format.as_str(),
                actor.ip,
            ));
            info!(batch_id = %batch_id, actor = %actor.id, format = format.as_str(), "Batch exported");
            Ok(payload)
        })
    }
}
