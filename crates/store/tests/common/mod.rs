//! Shared fixtures for the store integration tests.

use rust_decimal::Decimal;

use eftgate_core::batch::NewTransaction;
use eftgate_core::refdata::{Bank, DebitAccount, Scheme, Supplier, Zone};
use eftgate_core::workflow::Role;
use eftgate_shared::config::EftConfig;
use eftgate_shared::types::{DebitAccountId, SchemeId, SupplierId, UserId};
use eftgate_store::{Actor, EftService};

/// A service with seeded reference data and one actor per role.
pub struct Env {
    pub service: EftService,
    pub maker: Actor,
    pub checker: Actor,
    pub admin: Actor,
    pub supplier_id: SupplierId,
    pub scheme_id: SchemeId,
    pub debit_account_id: DebitAccountId,
}

pub fn env() -> Env {
    let service = EftService::new(EftConfig::default());
    let maker = Actor::new(UserId::new(), Role::AccountsPersonnel);
    let checker = Actor::new(UserId::new(), Role::Authorizer);
    let admin = Actor::new(UserId::new(), Role::SystemAdmin);

    let bank = Bank::new("Standard Bank", "SBICMWMX", admin.id).unwrap();
    let bank_id = service.refdata().insert_bank(bank).unwrap();

    let zone = Zone::new("SL_ZONE", "Southern Lakeshore");
    let zone_id = service.refdata().insert_zone(zone).unwrap();

    let scheme = Scheme::new("391", "Rural Water", zone_id);
    let scheme_id = service.refdata().insert_scheme(scheme).unwrap();

    let mut supplier = Supplier::new(
        "0000001",
        "CCSECUR",
        bank_id,
        "12345612",
        "CCSECUR",
        admin.id,
    );
    supplier.employee_number = "EMP-100".to_string();
    supplier.cost_center = "CC-OPS".to_string();
    let supplier_id = service.refdata().insert_supplier(supplier).unwrap();

    let debit_account = DebitAccount::new("0110023022400", "Operations");
    let debit_account_id = service.refdata().insert_debit_account(debit_account).unwrap();

    Env {
        service,
        maker,
        checker,
        admin,
        supplier_id,
        scheme_id,
        debit_account_id,
    }
}

impl Env {
    /// A well-formed transaction input over the seeded references.
    pub fn line(&self, amount: Decimal) -> NewTransaction {
        NewTransaction {
            debit_account_id: self.debit_account_id,
            supplier_id: self.supplier_id,
            scheme_id: self.scheme_id,
            amount,
            narration: "JULY SECURITY SERVICES".to_string(),
            reference_number: "INV-2024-07".to_string(),
            ..NewTransaction::default()
        }
    }
}
