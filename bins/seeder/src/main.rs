//! Seeds reference data and walks a demo batch through the full
//! lifecycle: create, add lines, submit, approve, export.
//!
//! Seeding is idempotent: records are looked up by their natural codes
//! and only inserted when absent, so the seeder can run repeatedly.

use anyhow::{Context, Result};
use rust_decimal_macros::dec;
use tracing::info;
use tracing_subscriber::EnvFilter;

use eftgate_core::batch::NewTransaction;
use eftgate_core::refdata::{Bank, DebitAccount, Scheme, Supplier, Zone};
use eftgate_core::workflow::Role;
use eftgate_shared::config::AppConfig;
use eftgate_shared::types::{DebitAccountId, SchemeId, SupplierId, UserId};
use eftgate_store::{Actor, EftService, ExportFormat};

struct SeededRefs {
    supplier_id: SupplierId,
    scheme_id: SchemeId,
    debit_account_id: DebitAccountId,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;
    let service = EftService::new(config.eft);

    let admin = Actor::new(UserId::new(), Role::SystemAdmin);
    let refs = seed_reference_data(&service, &admin)?;
    run_demo_lifecycle(&service, &refs)?;

    Ok(())
}

/// Inserts the baseline reference data, skipping records that already
/// exist under the same natural code.
fn seed_reference_data(service: &EftService, admin: &Actor) -> Result<SeededRefs> {
    let refdata = service.refdata();

    let bank_id = match refdata.bank_by_swift("SBICMWMX") {
        Some(bank) => bank.id,
        None => refdata.insert_bank(Bank::new("Standard Bank", "SBICMWMX", admin.id)?)?,
    };

    let zone_id = match refdata.zone_by_code("CENTRAL") {
        Some(zone) => zone.id,
        None => refdata.insert_zone(Zone::new("CENTRAL", "Central Region"))?,
    };

    let scheme_id = match refdata.scheme_by_code("3") {
        Some(scheme) => scheme.id,
        None => refdata.insert_scheme(Scheme::new("3", "Gravity Fed", zone_id))?,
    };

    let supplier_id = match refdata.supplier_by_code("0000001") {
        Some(supplier) => supplier.id,
        None => {
            let mut supplier = Supplier::new(
                "0000001",
                "CCSECUR SERVICES",
                bank_id,
                "12345612",
                "CCSECUR SERVICES",
                admin.id,
            );
            supplier.cost_center = "CC-OPS".to_string();
            refdata.insert_supplier(supplier)?
        }
    };

    let debit_account_id = match refdata.debit_account_by_number("0110023022400") {
        Some(account) => account.id,
        None => {
            refdata.insert_debit_account(DebitAccount::new("0110023022400", "Operations"))?
        }
    };

    info!("Reference data seeded");
    Ok(SeededRefs {
        supplier_id,
        scheme_id,
        debit_account_id,
    })
}

/// Creates a demo batch, runs it through approval, and prints the
/// generated wire file.
fn run_demo_lifecycle(service: &EftService, refs: &SeededRefs) -> Result<()> {
    let maker = Actor::new(UserId::new(), Role::AccountsPersonnel);
    let checker = Actor::new(UserId::new(), Role::Authorizer);

    let batch = service.create_batch(&maker, "JULY PAYRUN", None)?;
    info!(reference = %batch.reference, "Demo batch created");

    for (amount, narration) in [
        (dec!(1000.00), "JULY SECURITY SERVICES"),
        (dec!(56153000.00), "JULY PAYROLL"),
        (dec!(11207300.00), "JULY SUPPLIER SETTLEMENT"),
    ] {
        service.add_transaction(
            &maker,
            batch.id,
            NewTransaction {
                debit_account_id: refs.debit_account_id,
                supplier_id: refs.supplier_id,
                scheme_id: refs.scheme_id,
                amount,
                narration: narration.to_string(),
                reference_number: "INV-2024-07".to_string(),
                ..NewTransaction::default()
            },
        )?;
    }

    service.submit(&maker, batch.id)?;
    service.approve(&checker, batch.id, Some("Totals verified".to_string()))?;
    let content = service.export(&checker, batch.id, ExportFormat::Txt)?;

    info!(batch_id = %batch.id, "Demo batch exported");
    println!("{content}");
    Ok(())
}
