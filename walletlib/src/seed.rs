//! Демо-данные, которые подставляются в пустое хранилище.

use chrono::Utc;

use crate::model::{Contact, ContactId, Credential, Transaction, TransactionId, TransactionKind};

pub fn demo_credentials() -> Vec<Credential> {
    vec![
        Credential::new("demo@wallet.com", "1234"),
        Credential::new("alke@wallet.com", "1234"),
    ]
}

pub fn demo_contacts() -> Vec<Contact> {
    vec![
        Contact {
            id: ContactId::from("c1"),
            name: "John Doe".into(),
            alias: "john.doe".into(),
            account_ref: "123456789".into(),
            bank: "ABC Bank".into(),
        },
        Contact {
            id: ContactId::from("c2"),
            name: "Jane Smith".into(),
            alias: "jane.smith".into(),
            account_ref: "987654321".into(),
            bank: "XYZ Bank".into(),
        },
    ]
}

/// Примерная история для экрана движений, пока своих операций нет.
/// В хранилище не записывается.
pub fn demo_history() -> Vec<Transaction> {
    let now = Utc::now();
    [
        ("demo-1", TransactionKind::Purchase, "Compra en línea", -5_000),
        ("demo-2", TransactionKind::Deposit, "Depósito", 25_000),
        ("demo-3", TransactionKind::Receive, "Transferencia recibida", 12_000),
    ]
    .into_iter()
    .map(|(id, kind, description, amount)| Transaction {
        id: TransactionId(id.into()),
        kind,
        description: description.into(),
        amount,
        timestamp: now,
        meta: None,
    })
    .collect()
}
