//! JSON-представление истории и контактов в хранилище.
//!
//! Чтение терпимо к написанию полей из разных версий фронтенда
//! (`type`/`tipo`, `amount`/`monto`, числовые id и т.п.), запись всегда
//! в каноническом виде.

use std::io::{BufRead, Write};

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::warn;

use crate::{
    display,
    error::{Result, WalletError},
    model::{Contact, ContactId, Credential, Transaction, TransactionId, TransactionKind, TxMeta},
};

#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum LooseText {
    Int(i64),
    Float(f64),
    Text(String),
}

impl LooseText {
    fn into_string(self) -> String {
        match self {
            LooseText::Int(n) => n.to_string(),
            LooseText::Float(f) => f.to_string(),
            LooseText::Text(s) => s,
        }
    }

    fn to_amount(&self) -> Option<i64> {
        match self {
            LooseText::Int(n) => Some(*n),
            LooseText::Float(f) if f.is_finite() => Some(f.trunc() as i64),
            LooseText::Float(_) => None,
            LooseText::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[derive(Deserialize, Debug)]
struct StoredTransaction {
    #[serde(default)]
    id: Option<LooseText>,
    #[serde(rename = "type", alias = "tipo", alias = "kind")]
    kind: String,
    #[serde(default, alias = "descripcion")]
    description: Option<String>,
    #[serde(alias = "monto")]
    amount: LooseText,
    #[serde(default, alias = "fecha", alias = "timestamp")]
    date: Option<String>,
    #[serde(default)]
    meta: Option<TxMeta>,
}

#[derive(Deserialize, Debug)]
struct StoredContact {
    #[serde(default)]
    id: Option<LooseText>,
    #[serde(alias = "nombre")]
    name: String,
    alias: String,
    #[serde(rename = "cbu", alias = "accountRef", alias = "account_ref")]
    account_ref: LooseText,
    #[serde(alias = "banco")]
    bank: String,
}

/// Имя типа операции в любой из встречавшихся версий.
pub fn parse_kind(raw: &str) -> Option<TransactionKind> {
    let kind = match raw.trim().to_lowercase().as_str() {
        "deposit" | "deposito" | "depósito" => TransactionKind::Deposit,
        "withdraw" | "retiro" => TransactionKind::Withdraw,
        "send" | "envio" | "envío" | "transfer" => TransactionKind::Send,
        "receive" | "recibido" | "recibir" => TransactionKind::Receive,
        "purchase" | "buy" | "compra" => TransactionKind::Purchase,
        _ => return None,
    };
    Some(kind)
}

fn parse_timestamp(raw: Option<&str>) -> DateTime<Utc> {
    raw.and_then(|s| DateTime::parse_from_rfc3339(s.trim()).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_default()
}

fn signed_for(kind: TransactionKind, amount: i64) -> i64 {
    let magnitude = amount.checked_abs().unwrap_or(i64::MAX);
    if kind.is_outflow() { -magnitude } else { magnitude }
}

fn into_transaction(t: StoredTransaction) -> Option<Transaction> {
    let Some(kind) = parse_kind(&t.kind) else {
        warn!(kind = %t.kind, "skipping transaction of unknown kind");
        return None;
    };
    let Some(amount) = t.amount.to_amount() else {
        warn!(amount = ?t.amount, "skipping transaction with non-numeric amount");
        return None;
    };
    Some(Transaction {
        id: t
            .id
            .map(|id| TransactionId(id.into_string()))
            .unwrap_or_else(TransactionId::generate),
        kind,
        description: t
            .description
            .unwrap_or_else(|| display::kind_label(kind).to_string()),
        amount: signed_for(kind, amount),
        timestamp: parse_timestamp(t.date.as_deref()),
        meta: t.meta,
    })
}

fn into_contact(c: StoredContact) -> Contact {
    Contact {
        id: c
            .id
            .map(|id| ContactId(id.into_string()))
            .unwrap_or_else(ContactId::generate),
        name: c.name,
        alias: c.alias,
        account_ref: c.account_ref.into_string(),
        bank: c.bank,
    }
}

/// Записи неизвестного типа или без числовой суммы пропускаются.
pub fn decode_history(raw: &str) -> Result<Vec<Transaction>> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    let stored: Vec<StoredTransaction> = serde_json::from_str(raw)?;
    Ok(stored.into_iter().filter_map(into_transaction).collect())
}

pub fn encode_history(history: &[Transaction]) -> Result<String> {
    Ok(serde_json::to_string(history)?)
}

pub fn decode_contacts(raw: &str) -> Result<Vec<Contact>> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    let stored: Vec<StoredContact> = serde_json::from_str(raw)?;
    Ok(stored.into_iter().map(into_contact).collect())
}

pub fn encode_contacts(contacts: &[Contact]) -> Result<String> {
    Ok(serde_json::to_string(contacts)?)
}

pub fn decode_credentials(raw: &str) -> Result<Vec<Credential>> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(raw)?)
}

pub fn encode_credentials(credentials: &[Credential]) -> Result<String> {
    Ok(serde_json::to_string(credentials)?)
}

pub struct Json;

impl crate::traits::ReadFormat for Json {
    fn read<R: BufRead>(mut r: R) -> Result<Vec<Transaction>> {
        let mut raw = String::new();
        r.read_to_string(&mut raw)?;
        decode_history(&raw)
    }
}

impl crate::traits::WriteFormat for Json {
    fn write<W: Write>(mut w: W, history: &[Transaction]) -> Result<()> {
        serde_json::to_writer_pretty(&mut w, history).map_err(WalletError::from)?;
        w.write_all(b"\n")?;
        Ok(())
    }
}
