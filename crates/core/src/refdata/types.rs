//! Reference data entity definitions.
//!
//! These records are master data maintained outside the core. Suppliers
//! carry optional reference fields that are copy-defaulted onto a
//! transaction once, at creation time; later supplier edits never reach
//! existing transactions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use eftgate_shared::types::{BankId, DebitAccountId, SchemeId, SupplierId, UserId, ZoneId};

use crate::refdata::error::RefDataError;
use crate::refdata::validation::is_valid_swift_code;

/// A bank with its SWIFT/BIC routing code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bank {
    /// Unique identifier.
    pub id: BankId,
    /// Bank display name.
    pub name: String,
    /// SWIFT/BIC code (8 or 11 characters, uppercase).
    pub swift_code: String,
    /// Whether the bank may be used on new suppliers.
    pub active: bool,
    /// The user who created the record.
    pub created_by: UserId,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

impl Bank {
    /// Creates a new bank record, validating the SWIFT code format.
    pub fn new(
        name: impl Into<String>,
        swift_code: impl Into<String>,
        created_by: UserId,
    ) -> Result<Self, RefDataError> {
        let name = name.into();
        let swift_code = swift_code.into();
        if name.trim().is_empty() {
            return Err(RefDataError::EmptyField { field: "bank name" });
        }
        if !is_valid_swift_code(&swift_code) {
            return Err(RefDataError::InvalidSwiftCode(swift_code));
        }
        Ok(Self {
            id: BankId::new(),
            name,
            swift_code,
            active: true,
            created_by,
            created_at: Utc::now(),
        })
    }
}

/// An administrative zone used to route transactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Zone {
    /// Unique identifier.
    pub id: ZoneId,
    /// Unique zone code (e.g. "CENTRAL").
    pub code: String,
    /// Zone display name.
    pub name: String,
    /// Optional free-text description.
    pub description: String,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

impl Zone {
    /// Creates a new zone record.
    #[must_use]
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: ZoneId::new(),
            code: code.into(),
            name: name.into(),
            description: String::new(),
            created_at: Utc::now(),
        }
    }
}

/// A payment scheme; belongs to exactly one zone.
///
/// A transaction's zone is always derived from its scheme's zone and never
/// entered independently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scheme {
    /// Unique identifier.
    pub id: SchemeId,
    /// Unique scheme code (e.g. "391").
    pub code: String,
    /// Scheme display name.
    pub name: String,
    /// The owning zone.
    pub zone_id: ZoneId,
    /// Whether the scheme may be used on new transactions.
    pub active: bool,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

impl Scheme {
    /// Creates a new scheme record under the given zone.
    #[must_use]
    pub fn new(code: impl Into<String>, name: impl Into<String>, zone_id: ZoneId) -> Self {
        Self {
            id: SchemeId::new(),
            code: code.into(),
            name: name.into(),
            zone_id,
            active: true,
            created_at: Utc::now(),
        }
    }
}

/// A supplier (payee/beneficiary) with its destination account.
///
/// The optional reference fields are snapshot sources: they are copied onto
/// a transaction at creation time when the transaction's own field is empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Supplier {
    /// Unique identifier.
    pub id: SupplierId,
    /// Unique supplier/vendor code.
    pub code: String,
    /// Supplier display name (truncated to 55 chars at serialization).
    pub name: String,
    /// The supplier's bank.
    pub bank_id: BankId,
    /// Beneficiary bank account number.
    pub account_number: String,
    /// Beneficiary account name.
    pub account_name: String,
    /// Optional employee number.
    pub employee_number: String,
    /// Optional national ID.
    pub national_id: String,
    /// Optional payee reference / invoice number.
    pub credit_reference: String,
    /// Optional originating cost centre.
    pub cost_center: String,
    /// Optional unique upstream source reference.
    pub source_reference: String,
    /// Whether the supplier may be used on new transactions.
    pub active: bool,
    /// The user who created the record.
    pub created_by: UserId,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

impl Supplier {
    /// Creates a new supplier record with empty optional fields.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        bank_id: BankId,
        account_number: impl Into<String>,
        account_name: impl Into<String>,
        created_by: UserId,
    ) -> Self {
        Self {
            id: SupplierId::new(),
            code: code.into(),
            name: name.into(),
            bank_id,
            account_number: account_number.into(),
            account_name: account_name.into(),
            employee_number: String::new(),
            national_id: String::new(),
            credit_reference: String::new(),
            cost_center: String::new(),
            source_reference: String::new(),
            active: true,
            created_by,
            created_at: Utc::now(),
        }
    }
}

/// A payer-side debit account used as the source of a batch's payments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebitAccount {
    /// Unique identifier.
    pub id: DebitAccountId,
    /// Unique account number at the payment switch.
    pub account_number: String,
    /// Debit account display name.
    pub account_name: String,
    /// Optional free-text description.
    pub description: String,
    /// Whether the account may be used on new transactions.
    pub active: bool,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

impl DebitAccount {
    /// Creates a new debit account record.
    #[must_use]
    pub fn new(account_number: impl Into<String>, account_name: impl Into<String>) -> Self {
        Self {
            id: DebitAccountId::new(),
            account_number: account_number.into(),
            account_name: account_name.into(),
            description: String::new(),
            active: true,
            created_at: Utc::now(),
        }
    }
}

/// Read-only lookup contract over reference data.
///
/// Implemented by the persistence layer; the file generator resolves every
/// line through this trait so that a dangling reference surfaces as an
/// incomplete transaction rather than a malformed file.
pub trait ReferenceData {
    /// Looks up a bank by id.
    fn bank(&self, id: BankId) -> Option<Bank>;
    /// Looks up a zone by id.
    fn zone(&self, id: ZoneId) -> Option<Zone>;
    /// Looks up a scheme by id.
    fn scheme(&self, id: SchemeId) -> Option<Scheme>;
    /// Looks up a supplier by id.
    fn supplier(&self, id: SupplierId) -> Option<Supplier>;
    /// Looks up a debit account by id.
    fn debit_account(&self, id: DebitAccountId) -> Option<DebitAccount>;
}
