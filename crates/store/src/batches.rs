//! In-memory batch store with per-aggregate serialization.
//!
//! Every batch is wrapped in its own mutex so concurrent mutations of the
//! same batch (line add/delete, transitions) are serialized while
//! operations on different batches proceed in parallel. Mutations use a
//! clone-and-commit scheme: the closure works on a clone and the clone
//! replaces the stored aggregate only on success, so a failed operation
//! never leaves a partially-applied batch behind.

use std::sync::{Arc, Mutex, PoisonError};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use eftgate_core::batch::EftBatch;
use eftgate_shared::types::BatchId;

use crate::error::StoreError;

/// Thread-safe store for batch aggregates.
#[derive(Default)]
pub struct BatchStore {
    batches: DashMap<BatchId, Arc<Mutex<EftBatch>>>,
}

impl BatchStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a new batch.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Conflict` if the id is already present.
    pub fn insert(&self, batch: EftBatch) -> Result<BatchId, StoreError> {
        let id = batch.id;
        if self.batches.contains_key(&id) {
            return Err(StoreError::Conflict(format!("batch {id} already exists")));
        }
        self.batches.insert(id, Arc::new(Mutex::new(batch)));
        Ok(id)
    }

    /// Returns a point-in-time snapshot of a batch.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the batch does not exist.
    pub fn get(&self, id: BatchId) -> Result<EftBatch, StoreError> {
        let cell = self.cell(id)?;
        let guard = cell.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(guard.clone())
    }

    /// Runs a fallible mutation against a batch under its lock.
    ///
    /// The closure receives a clone of the stored aggregate; the clone is
    /// committed back only when the closure returns `Ok`. The closure's
    /// result is handed through, which lets callers produce an audit
    /// entry inside the same critical section as the state change.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the batch does not exist, or the
    /// closure's own error with the stored aggregate untouched.
    pub fn with_batch_mut<T>(
        &self,
        id: BatchId,
        f: impl FnOnce(&mut EftBatch) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let cell = self.cell(id)?;
        let mut guard = cell.lock().unwrap_or_else(PoisonError::into_inner);
        let mut working = guard.clone();
        let outcome = f(&mut working)?;
        *guard = working;
        Ok(outcome)
    }

    /// Removes a batch after a final check under the map's entry lock.
    ///
    /// The check and the removal are atomic with respect to other
    /// operations on the same batch, so a concurrent transition cannot
    /// slip in between validation and deletion.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the batch does not exist, or the
    /// check's own error with the batch left in place.
    pub fn remove_if(
        &self,
        id: BatchId,
        check: impl FnOnce(&EftBatch) -> Result<(), StoreError>,
    ) -> Result<EftBatch, StoreError> {
        match self.batches.entry(id) {
            Entry::Occupied(entry) => {
                {
                    let guard = entry.get().lock().unwrap_or_else(PoisonError::into_inner);
                    check(&guard)?;
                }
                let cell = entry.remove();
                let guard = cell.lock().unwrap_or_else(PoisonError::into_inner);
                Ok(guard.clone())
            }
            Entry::Vacant(_) => Err(StoreError::NotFound(format!("batch {id}"))),
        }
    }

    /// Returns snapshots of all batches, newest first.
    #[must_use]
    pub fn list(&self) -> Vec<EftBatch> {
        let mut all: Vec<EftBatch> = self
            .batches
            .iter()
            .map(|entry| {
                entry
                    .value()
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .clone()
            })
            .collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        all
    }

    fn cell(&self, id: BatchId) -> Result<Arc<Mutex<EftBatch>>, StoreError> {
        self.batches
            .get(&id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| StoreError::NotFound(format!("batch {id}")))
    }
}
