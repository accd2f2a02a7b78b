use walletlib::{
    error::WalletError,
    store::{KeyValueStore, MemoryStore},
    WalletConfig, WalletLedger,
};

#[test]
fn toml_overrides_defaults() {
    let cfg = WalletConfig::from_toml_str(
        r#"
starting_balance = 1000
history_cap = 10
account_ref_min_len = 8
seed_demo_data = false

[[credentials]]
email = "ops@example.org"
password = "s3cret"

[keys]
balance = "saldo"
"#,
    )
    .expect("parse config");

    assert_eq!(cfg.starting_balance, 1_000);
    assert_eq!(cfg.history_cap, 10);
    assert_eq!(cfg.account_ref_min_len, 8);
    assert_eq!(cfg.account_ref_max_len, 22);
    assert_eq!(cfg.credentials.len(), 1);
    assert_eq!(cfg.keys.balance, "saldo");
    assert_eq!(cfg.keys.transactions, "walletTransactions");

    let ledger = WalletLedger::open(MemoryStore::new(), cfg).unwrap();
    let store = ledger.into_store();
    assert_eq!(store.get("saldo").unwrap().as_deref(), Some("1000"));
    assert_eq!(store.get("walletBalance").unwrap(), None);
}

#[test]
fn empty_toml_is_default() {
    assert_eq!(WalletConfig::from_toml_str("").unwrap(), WalletConfig::default());
}

#[test]
fn invalid_bounds_are_rejected() {
    for raw in [
        "history_cap = 0",
        "starting_balance = -1",
        "account_ref_min_len = 10\naccount_ref_max_len = 8",
        "account_ref_min_len = 0",
    ] {
        assert!(matches!(WalletConfig::from_toml_str(raw), Err(WalletError::Config(_))), "{raw}");
    }
}

#[test]
fn open_validates_config() {
    let cfg = WalletConfig { history_cap: 0, ..WalletConfig::default() };
    assert!(matches!(WalletLedger::open(MemoryStore::new(), cfg), Err(WalletError::Config(_))));
}
