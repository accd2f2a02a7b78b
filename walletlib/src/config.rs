//! Настройки кошелька (TOML). Все поля необязательны.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WalletError};
use crate::model::Credential;
use crate::seed;

pub const DEFAULT_STARTING_BALANCE: i64 = 60_000;
pub const DEFAULT_HISTORY_CAP: usize = 50;
pub const DEFAULT_ACCOUNT_REF_MIN_LEN: usize = 6;
pub const DEFAULT_ACCOUNT_REF_MAX_LEN: usize = 22;

/// Имена ключей в хранилище.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageKeys {
    pub logged_in: String,
    pub user_email: String,
    pub balance: String,
    pub transactions: String,
    pub contacts: String,
    pub users: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            logged_in: "walletLoggedIn".into(),
            user_email: "walletUserEmail".into(),
            balance: "walletBalance".into(),
            transactions: "walletTransactions".into(),
            contacts: "walletContacts".into(),
            users: "walletUsers".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletConfig {
    pub starting_balance: i64,
    pub history_cap: usize,
    pub account_ref_min_len: usize,
    pub account_ref_max_len: usize,
    pub seed_demo_data: bool,
    pub credentials: Vec<Credential>,
    pub keys: StorageKeys,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            starting_balance: DEFAULT_STARTING_BALANCE,
            history_cap: DEFAULT_HISTORY_CAP,
            account_ref_min_len: DEFAULT_ACCOUNT_REF_MIN_LEN,
            account_ref_max_len: DEFAULT_ACCOUNT_REF_MAX_LEN,
            seed_demo_data: true,
            credentials: seed::demo_credentials(),
            keys: StorageKeys::default(),
        }
    }
}

impl WalletConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let cfg: WalletConfig = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> Result<()> {
        if self.starting_balance < 0 {
            return Err(WalletError::Config("starting_balance must be >= 0".into()));
        }
        if self.history_cap == 0 {
            return Err(WalletError::Config("history_cap must be >= 1".into()));
        }
        if self.account_ref_min_len == 0 || self.account_ref_min_len > self.account_ref_max_len {
            return Err(WalletError::Config(format!(
                "account reference bounds [{}, {}] are invalid",
                self.account_ref_min_len, self.account_ref_max_len
            )));
        }
        Ok(())
    }
}
