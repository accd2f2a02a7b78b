//! Флаг входа и проверка демо-учёток.
//!
//! Пароли хранятся и сравниваются открытым текстом: это заглушка для демо,
//! а не граница безопасности.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{info, warn};

use crate::{
    config::StorageKeys,
    error::{Result, WalletError},
    formats::json,
    store::{KeyValueStore, WriteBatch},
};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));

pub const MIN_PASSWORD_LEN: usize = 4;

pub struct SessionGate<'a, S: KeyValueStore> {
    store: &'a mut S,
    keys: &'a StorageKeys,
}

impl<'a, S: KeyValueStore> SessionGate<'a, S> {
    pub fn new(store: &'a mut S, keys: &'a StorageKeys) -> Self {
        Self { store, keys }
    }

    pub fn login(&mut self, email: &str, password: &str) -> Result<()> {
        let (email, password) = (email.trim(), password.trim());
        if !EMAIL_RE.is_match(email) || password.chars().count() < MIN_PASSWORD_LEN {
            return Err(WalletError::Validation(format!(
                "check email and password (at least {MIN_PASSWORD_LEN} characters)"
            )));
        }

        let users = match self.store.get(&self.keys.users)? {
            Some(raw) => json::decode_credentials(&raw).map_err(|e| WalletError::Corrupt {
                key: self.keys.users.clone(),
                reason: e.to_string(),
            })?,
            None => Vec::new(),
        };
        if !users.iter().any(|u| u.email == email && u.password == password) {
            warn!(email, "login rejected");
            return Err(WalletError::InvalidCredentials);
        }

        let batch = WriteBatch::new()
            .put(&self.keys.logged_in, "true")
            .put(&self.keys.user_email, email);
        self.store.commit(batch)?;
        info!(email, "logged in");
        Ok(())
    }

    pub fn logout(&mut self) -> Result<()> {
        let batch = WriteBatch::new()
            .put(&self.keys.logged_in, "false")
            .delete(&self.keys.user_email);
        self.store.commit(batch)?;
        info!("logged out");
        Ok(())
    }

    pub fn is_logged_in(&self) -> Result<bool> {
        Ok(self.store.get(&self.keys.logged_in)?.as_deref() == Some("true"))
    }

    pub fn current_user(&self) -> Result<Option<String>> {
        if !self.is_logged_in()? {
            return Ok(None);
        }
        self.store.get(&self.keys.user_email)
    }

    /// Email текущего пользователя или `NotLoggedIn`.
    pub fn require_login(&self) -> Result<String> {
        self.current_user()?.ok_or(WalletError::NotLoggedIn)
    }
}
