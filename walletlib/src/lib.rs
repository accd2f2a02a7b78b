//! walletlib — учебный кошелёк: баланс, история операций и контакты поверх key-value хранилища

pub mod config;
pub mod display;
pub mod error;
pub mod ledger;
pub mod model;
pub mod seed;
pub mod session;
pub mod store;
pub mod traits;

pub mod formats {
    pub mod csv;
    pub mod json;
}

pub use config::WalletConfig;
pub use error::{Result, WalletError};
pub use ledger::WalletLedger;
pub use model::{Contact, ContactId, Transaction, TransactionKind};
