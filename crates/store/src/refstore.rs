//! In-memory reference data store.
//!
//! Uniqueness of the natural codes (SWIFT, zone code, scheme code,
//! supplier code, debit account number) is enforced with secondary
//! indexes; inserting a duplicate code fails with `Conflict`.

use dashmap::DashMap;

use eftgate_core::refdata::{Bank, DebitAccount, ReferenceData, Scheme, Supplier, Zone};
use eftgate_shared::types::{BankId, DebitAccountId, SchemeId, SupplierId, ZoneId};

use crate::error::StoreError;

/// Thread-safe store for reference data records.
#[derive(Default)]
pub struct RefDataStore {
    banks: DashMap<BankId, Bank>,
    banks_by_swift: DashMap<String, BankId>,
    zones: DashMap<ZoneId, Zone>,
    zones_by_code: DashMap<String, ZoneId>,
    schemes: DashMap<SchemeId, Scheme>,
    schemes_by_code: DashMap<String, SchemeId>,
    suppliers: DashMap<SupplierId, Supplier>,
    suppliers_by_code: DashMap<String, SupplierId>,
    debit_accounts: DashMap<DebitAccountId, DebitAccount>,
    debit_accounts_by_number: DashMap<String, DebitAccountId>,
}

impl RefDataStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a bank.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Conflict` if the SWIFT code is already taken.
    pub fn insert_bank(&self, bank: Bank) -> Result<BankId, StoreError> {
        if self.banks_by_swift.contains_key(&bank.swift_code) {
            return Err(StoreError::Conflict(format!(
                "bank with SWIFT code {} already exists",
                bank.swift_code
            )));
        }
        let id = bank.id;
        self.banks_by_swift.insert(bank.swift_code.clone(), id);
        self.banks.insert(id, bank);
        Ok(id)
    }

    /// Inserts a zone.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Conflict` if the zone code is already taken.
    pub fn insert_zone(&self, zone: Zone) -> Result<ZoneId, StoreError> {
        if self.zones_by_code.contains_key(&zone.code) {
            return Err(StoreError::Conflict(format!(
                "zone with code {} already exists",
                zone.code
            )));
        }
        let id = zone.id;
        self.zones_by_code.insert(zone.code.clone(), id);
        self.zones.insert(id, zone);
        Ok(id)
    }

    /// Inserts a scheme after checking its zone exists.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the owning zone is absent, or
    /// `StoreError::Conflict` if the scheme code is already taken.
    pub fn insert_scheme(&self, scheme: Scheme) -> Result<SchemeId, StoreError> {
        if !self.zones.contains_key(&scheme.zone_id) {
            return Err(StoreError::NotFound(format!(
                "zone {} for scheme {}",
                scheme.zone_id, scheme.code
            )));
        }
        if self.schemes_by_code.contains_key(&scheme.code) {
            return Err(StoreError::Conflict(format!(
                "scheme with code {} already exists",
                scheme.code
            )));
        }
        let id = scheme.id;
        self.schemes_by_code.insert(scheme.code.clone(), id);
        self.schemes.insert(id, scheme);
        Ok(id)
    }

    /// Inserts a supplier after checking its bank exists.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the bank is absent, or
    /// `StoreError::Conflict` if the supplier code is already taken.
    pub fn insert_supplier(&self, supplier: Supplier) -> Result<SupplierId, StoreError> {
        if !self.banks.contains_key(&supplier.bank_id) {
            return Err(StoreError::NotFound(format!(
                "bank {} for supplier {}",
                supplier.bank_id, supplier.code
            )));
        }
        if self.suppliers_by_code.contains_key(&supplier.code) {
            return Err(StoreError::Conflict(format!(
                "supplier with code {} already exists",
                supplier.code
            )));
        }
        let id = supplier.id;
        self.suppliers_by_code.insert(supplier.code.clone(), id);
        self.suppliers.insert(id, supplier);
        Ok(id)
    }

    /// Inserts a debit account.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Conflict` if the account number is taken.
    pub fn insert_debit_account(
        &self,
        account: DebitAccount,
    ) -> Result<DebitAccountId, StoreError> {
        if self
            .debit_accounts_by_number
            .contains_key(&account.account_number)
        {
            return Err(StoreError::Conflict(format!(
                "debit account {} already exists",
                account.account_number
            )));
        }
        let id = account.id;
        self.debit_accounts_by_number
            .insert(account.account_number.clone(), id);
        self.debit_accounts.insert(id, account);
        Ok(id)
    }

    /// Replaces an existing supplier record.
    ///
    /// Transactions created before the update keep their snapshot fields;
    /// only future transactions see the new values.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the supplier does not exist.
    pub fn update_supplier(&self, supplier: Supplier) -> Result<(), StoreError> {
        let Some(existing) = self.suppliers.get(&supplier.id).map(|s| s.code.clone()) else {
            return Err(StoreError::NotFound(format!("supplier {}", supplier.id)));
        };
        if existing != supplier.code {
            self.suppliers_by_code.remove(&existing);
            self.suppliers_by_code.insert(supplier.code.clone(), supplier.id);
        }
        self.suppliers.insert(supplier.id, supplier);
        Ok(())
    }

    /// Looks up a zone by its unique code.
    #[must_use]
    pub fn zone_by_code(&self, code: &str) -> Option<Zone> {
        let id = *self.zones_by_code.get(code)?;
        self.zones.get(&id).map(|z| z.clone())
    }

    /// Looks up a scheme by its unique code.
    #[must_use]
    pub fn scheme_by_code(&self, code: &str) -> Option<Scheme> {
        let id = *self.schemes_by_code.get(code)?;
        self.schemes.get(&id).map(|s| s.clone())
    }

    /// Looks up a supplier by its unique code.
    #[must_use]
    pub fn supplier_by_code(&self, code: &str) -> Option<Supplier> {
        let id = *self.suppliers_by_code.get(code)?;
        self.suppliers.get(&id).map(|s| s.clone())
    }

    /// Looks up a bank by its SWIFT code.
    #[must_use]
    pub fn bank_by_swift(&self, swift_code: &str) -> Option<Bank> {
        let id = *self.banks_by_swift.get(swift_code)?;
        self.banks.get(&id).map(|b| b.clone())
    }

    /// Looks up a debit account by its account number.
    #[must_use]
    pub fn debit_account_by_number(&self, account_number: &str) -> Option<DebitAccount> {
        let id = *self.debit_accounts_by_number.get(account_number)?;
        self.debit_accounts.get(&id).map(|a| a.clone())
    }
}

impl ReferenceData for RefDataStore {
    fn bank(&self, id: BankId) -> Option<Bank> {
        self.banks.get(&id).map(|b| b.clone())
    }

    fn zone(&self, id: ZoneId) -> Option<Zone> {
        self.zones.get(&id).map(|z| z.clone())
    }

    fn scheme(&self, id: SchemeId) -> Option<Scheme> {
        self.schemes.get(&id).map(|s| s.clone())
    }

    fn supplier(&self, id: SupplierId) -> Option<Supplier> {
        self.suppliers.get(&id).map(|s| s.clone())
    }

    fn debit_account(&self, id: DebitAccountId) -> Option<DebitAccount> {
        self.debit_accounts.get(&id).map(|a| a.clone())
    }
}
