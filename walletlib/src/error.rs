//! Единый тип ошибок публичного API.

use thiserror::Error;

use crate::model::ContactId;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds { requested: i64, available: i64 },

    #[error("contact not found: {0}")]
    ContactNotFound(ContactId),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("amount overflow")]
    AmountOverflow,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("not logged in")]
    NotLoggedIn,

    #[error("corrupt value under key `{key}`: {reason}")]
    Corrupt { key: String, reason: String },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl WalletError {
    /// Ошибки, вызванные вводом пользователя (а не состоянием хранилища).
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            WalletError::InvalidAmount(_)
                | WalletError::InsufficientFunds { .. }
                | WalletError::ContactNotFound(_)
                | WalletError::Validation(_)
                | WalletError::AmountOverflow
                | WalletError::InvalidCredentials
                | WalletError::NotLoggedIn
        )
    }
}

pub type Result<T> = std::result::Result<T, WalletError>;
