//! Property-based tests for file generation.
//!
//! The standing property is the round trip: any batch that passes
//! `generate`'s own internal validation yields content that the
//! independent structural validator accepts.

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::HashMap;

use eftgate_shared::types::{BankId, DebitAccountId, SchemeId, SupplierId, UserId, ZoneId};

use crate::batch::service::BatchService;
use crate::batch::types::{BatchStatus, EftBatch, NewTransaction};
use crate::export::generator::FileGenerator;
use crate::export::structure::validate_structure;
use crate::refdata::types::{
    Bank, DebitAccount, ReferenceData, Scheme, Supplier, Zone,
};

#[derive(Default)]
struct MapRefData {
    banks: HashMap<BankId, Bank>,
    zones: HashMap<ZoneId, Zone>,
    schemes: HashMap<SchemeId, Scheme>,
    suppliers: HashMap<SupplierId, Supplier>,
    debit_accounts: HashMap<DebitAccountId, DebitAccount>,
}

impl ReferenceData for MapRefData {
    fn bank(&self, id: BankId) -> Option<Bank> {
        self.banks.get(&id).cloned()
    }
    fn zone(&self, id: ZoneId) -> Option<Zone> {
        self.zones.get(&id).cloned()
    }
    fn scheme(&self, id: SchemeId) -> Option<Scheme> {
        self.schemes.get(&id).cloned()
    }
    fn supplier(&self, id: SupplierId) -> Option<Supplier> {
        self.suppliers.get(&id).cloned()
    }
    fn debit_account(&self, id: DebitAccountId) -> Option<DebitAccount> {
        self.debit_accounts.get(&id).cloned()
    }
}

fn arb_text(max: usize) -> impl Strategy<Value = String> {
    // Wire-safe text: anything printable except the delimiter and line
    // terminators, which the raw layout cannot carry.
    proptest::string::string_regex(&format!("[A-Za-z0-9 .,-]{{0,{max}}}"))
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_generated_files_validate(
        name in arb_text(80).prop_filter("name must not be blank", |s| !s.trim().is_empty()),
        amounts in prop::collection::vec(1i64..10_000_000_000i64, 1..25),
        narrations in prop::collection::vec(arb_text(250), 25),
    ) {
        let user = UserId::new();
        let bank = Bank::new("Standard Bank", "SBICMWMX", user).unwrap();
        let zone = Zone::new("CENTRAL", "Central Region");
        let scheme = Scheme::new("3", "Gravity Fed", zone.id);
        let supplier = Supplier::new(
            "0000001", "CCSECUR", bank.id, "12345612", "CCSECUR", user,
        );
        let debit_account = DebitAccount::new("0110023022400", "Operations");

        let mut refdata = MapRefData::default();
        refdata.banks.insert(bank.id, bank);
        refdata.zones.insert(zone.id, zone);
        refdata.schemes.insert(scheme.id, scheme.clone());
        refdata.suppliers.insert(supplier.id, supplier.clone());
        refdata.debit_accounts.insert(debit_account.id, debit_account.clone());

        let mut batch = EftBatch::create(name, "MWK", user, "EFT").unwrap();
        for (cents, narration) in amounts.iter().zip(&narrations) {
            let input = NewTransaction {
                debit_account_id: debit_account.id,
                supplier_id: supplier.id,
                scheme_id: scheme.id,
                amount: Decimal::new(*cents, 2),
                narration: narration.clone(),
                reference_number: "REF".to_string(),
                ..NewTransaction::default()
            };
            BatchService::add_transaction(&mut batch, input, &supplier, &scheme)
                .unwrap();
        }
        batch.status = BatchStatus::Approved;

        let file = FileGenerator::generate(&batch, &refdata).unwrap();
        validate_structure(&file.content).unwrap();

        // The reshaped variant keeps the same line count.
        let reshaped = FileGenerator::reshape_csv(&file.content).unwrap();
        prop_assert_eq!(reshaped.lines().count(), file.content.lines().count());
    }
}
