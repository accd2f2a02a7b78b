use walletlib::{
    error::WalletError,
    model::TransactionKind,
    store::MemoryStore,
    WalletConfig, WalletLedger,
};

fn empty_book() -> WalletLedger<MemoryStore> {
    let cfg = WalletConfig { seed_demo_data: false, ..WalletConfig::default() };
    WalletLedger::open(MemoryStore::new(), cfg).unwrap()
}

#[test]
fn demo_contacts_are_seeded() {
    let ledger = WalletLedger::with_defaults(MemoryStore::new()).unwrap();
    let names: Vec<String> = ledger.contacts().unwrap().into_iter().map(|c| c.name).collect();
    assert_eq!(names, vec!["John Doe", "Jane Smith"]);
}

#[test]
fn added_contact_is_found_by_alias() {
    let mut ledger = empty_book();
    let c = ledger.add_contact("María Pérez", "maria.p", "00112233", "Banco Estado").expect("add");
    assert_eq!(c.account_ref, "00112233");

    let found = ledger.search_contacts("maria.p").unwrap();
    assert_eq!(found, vec![c.clone()]);
    assert_eq!(ledger.contact(&c.id).unwrap(), Some(c));
}

#[test]
fn fields_are_trimmed() {
    let mut ledger = empty_book();
    let c = ledger.add_contact("  Ana ", " ana ", " 123456 ", " Banco ").unwrap();
    assert_eq!((c.name.as_str(), c.alias.as_str()), ("Ana", "ana"));
    assert_eq!((c.account_ref.as_str(), c.bank.as_str()), ("123456", "Banco"));
}

#[test]
fn empty_field_is_a_validation_error() {
    let mut ledger = empty_book();
    let err = ledger.add_contact("", "alias", "123456", "Bank").unwrap_err();
    assert!(matches!(err, WalletError::Validation(_)));
    assert!(matches!(
        ledger.add_contact("Name", "alias", "123456", "   "),
        Err(WalletError::Validation(_))
    ));
    assert!(ledger.contacts().unwrap().is_empty());
}

#[test]
fn account_reference_bounds_default_to_six_through_twenty_two() {
    let mut ledger = empty_book();
    assert!(ledger.add_contact("A", "a", "123456", "B").is_ok());
    assert!(ledger.add_contact("A", "a", &"9".repeat(22), "B").is_ok());

    let too_long = "9".repeat(23);
    for bad in ["12345", "12345a7", "12 3456", "-123456", too_long.as_str()] {
        assert!(
            matches!(ledger.add_contact("A", "a", bad, "B"), Err(WalletError::Validation(_))),
            "{bad} should be rejected"
        );
    }
    assert_eq!(ledger.contacts().unwrap().len(), 2);
}

#[test]
fn minimum_length_is_configurable() {
    let cfg = WalletConfig { account_ref_min_len: 8, seed_demo_data: false, ..WalletConfig::default() };
    let mut ledger = WalletLedger::open(MemoryStore::new(), cfg).unwrap();
    assert!(matches!(ledger.add_contact("A", "a", "1234567", "B"), Err(WalletError::Validation(_))));
    assert!(ledger.add_contact("A", "a", "12345678", "B").is_ok());
}

#[test]
fn search_is_case_insensitive_and_keeps_book_order() {
    let mut ledger = WalletLedger::with_defaults(MemoryStore::new()).unwrap();
    ledger.add_contact("Johanna Ruiz", "jo.ruiz", "55555555", "Banco Sur").unwrap();

    let names = |q: &str| -> Vec<String> {
        ledger.search_contacts(q).unwrap().into_iter().map(|c| c.name).collect()
    };
    assert_eq!(names("JOH"), vec!["John Doe", "Johanna Ruiz"]);
    assert_eq!(names("smith"), vec!["Jane Smith"]);
    assert_eq!(names("RUIZ"), vec!["Johanna Ruiz"]);
    assert!(names("zzz").is_empty());
    assert_eq!(names("  ").len(), 3);
    assert_eq!(names(""), vec!["John Doe", "Jane Smith", "Johanna Ruiz"]);
}

#[test]
fn duplicate_names_get_distinct_ids() {
    let mut ledger = empty_book();
    let a = ledger.add_contact("Ana", "ana", "123456", "B").unwrap();
    let b = ledger.add_contact("Ana", "ana", "123456", "B").unwrap();
    assert_ne!(a.id, b.id);
}

#[test]
fn send_to_added_contact_records_metadata() {
    let mut ledger = empty_book();
    let c = ledger.add_contact("Pedro", "pedro", "87654321", "Banco").unwrap();
    let tx = ledger.send_to(&c.id, 1_500).unwrap();

    assert_eq!(tx.kind, TransactionKind::Send);
    let meta = tx.meta.expect("send meta");
    assert_eq!(meta.contact_id, Some(c.id));
    assert_eq!(meta.contact_name.as_deref(), Some("Pedro"));
    assert_eq!(ledger.balance().unwrap(), 58_500);
}
