use walletlib::{error::WalletError, model::Credential, store::MemoryStore, WalletConfig, WalletLedger};

fn ledger() -> WalletLedger<MemoryStore> {
    WalletLedger::with_defaults(MemoryStore::new()).unwrap()
}

#[test]
fn starts_logged_out() {
    let mut ledger = ledger();
    let session = ledger.session();
    assert!(!session.is_logged_in().unwrap());
    assert_eq!(session.current_user().unwrap(), None);
    assert!(matches!(session.require_login(), Err(WalletError::NotLoggedIn)));
}

#[test]
fn login_with_demo_credentials_then_logout() {
    let mut ledger = ledger();
    ledger.session().login(" demo@wallet.com ", "1234").expect("login");
    assert!(ledger.session().is_logged_in().unwrap());
    assert_eq!(ledger.session().require_login().unwrap(), "demo@wallet.com");

    ledger.session().logout().unwrap();
    assert!(!ledger.session().is_logged_in().unwrap());
    assert!(matches!(ledger.session().require_login(), Err(WalletError::NotLoggedIn)));
}

#[test]
fn wrong_password_is_rejected() {
    let mut ledger = ledger();
    let err = ledger.session().login("demo@wallet.com", "4321").unwrap_err();
    assert!(matches!(err, WalletError::InvalidCredentials));
    assert!(!ledger.session().is_logged_in().unwrap());
}

#[test]
fn malformed_input_is_a_validation_error() {
    let mut ledger = ledger();
    for (email, password) in [("demo.wallet.com", "1234"), ("demo@wallet", "1234"), ("demo@wallet.com", "123")] {
        assert!(
            matches!(ledger.session().login(email, password), Err(WalletError::Validation(_))),
            "{email}/{password}"
        );
    }
}

#[test]
fn credentials_come_from_config() {
    let cfg = WalletConfig {
        credentials: vec![Credential::new("ops@example.org", "s3cret")],
        ..WalletConfig::default()
    };
    let mut ledger = WalletLedger::open(MemoryStore::new(), cfg).unwrap();
    assert!(matches!(
        ledger.session().login("demo@wallet.com", "1234"),
        Err(WalletError::InvalidCredentials)
    ));
    ledger.session().login("ops@example.org", "s3cret").unwrap();
    assert_eq!(ledger.session().current_user().unwrap().as_deref(), Some("ops@example.org"));
}
