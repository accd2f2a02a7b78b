//! Доменные модели кошелька: операции, контакты, учётные данные.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::WalletError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(pub String);

impl TransactionId {
    pub fn generate() -> Self {
        TransactionId(uuid::Uuid::new_v4().to_string())
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(pub String);

impl ContactId {
    pub fn generate() -> Self {
        ContactId(uuid::Uuid::new_v4().to_string())
    }
}

impl From<&str> for ContactId {
    fn from(s: &str) -> Self {
        ContactId(s.to_string())
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Deposit,
    Withdraw,
    Send,
    Receive,
    Purchase,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionKind::Deposit => "deposit",
            TransactionKind::Withdraw => "withdraw",
            TransactionKind::Send => "send",
            TransactionKind::Receive => "receive",
            TransactionKind::Purchase => "purchase",
        }
    }

    /// Списание со счёта: сумма такой операции хранится со знаком минус.
    pub fn is_outflow(self) -> bool {
        matches!(
            self,
            TransactionKind::Withdraw | TransactionKind::Send | TransactionKind::Purchase
        )
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "deposit" => Ok(TransactionKind::Deposit),
            "withdraw" => Ok(TransactionKind::Withdraw),
            "send" => Ok(TransactionKind::Send),
            "receive" => Ok(TransactionKind::Receive),
            "purchase" => Ok(TransactionKind::Purchase),
            other => Err(WalletError::Validation(format!("unknown transaction kind: {other}"))),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<ContactId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Запись истории. После создания не меняется.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub description: String,
    pub amount: i64,
    #[serde(rename = "date")]
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<TxMeta>,
}

impl Transaction {
    pub fn new(kind: TransactionKind, description: impl Into<String>, amount: i64) -> Self {
        Transaction {
            id: TransactionId::generate(),
            kind,
            description: description.into(),
            amount,
            timestamp: Utc::now(),
            meta: None,
        }
    }

    pub fn with_meta(mut self, meta: TxMeta) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn contact_id(&self) -> Option<&ContactId> {
        self.meta.as_ref().and_then(|m| m.contact_id.as_ref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub alias: String,
    #[serde(rename = "cbu")]
    pub account_ref: String,
    pub bank: String,
}

impl Contact {
    pub(crate) fn matches(&self, needle_lower: &str) -> bool {
        self.name.to_lowercase().contains(needle_lower)
            || self.alias.to_lowercase().contains(needle_lower)
    }
}

/// Демо-пара логин/пароль. Хранится открытым текстом.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub email: String,
    pub password: String,
}

impl Credential {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Credential { email: email.into(), password: password.into() }
    }
}
