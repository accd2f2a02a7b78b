//! Кошелёк: баланс, история операций и книга контактов.
//!
//! Всё состояние живёт в [`KeyValueStore`]; каждая операция читает нужные
//! ключи, проверяет инварианты и пишет результат одной пачкой. Отклонённая
//! операция ничего не меняет.

use tracing::{debug, info, warn};

use crate::{
    config::WalletConfig,
    error::{Result, WalletError},
    formats::json,
    model::{Contact, ContactId, Transaction, TransactionKind, TxMeta},
    seed,
    session::SessionGate,
    store::{KeyValueStore, WriteBatch},
};

pub struct WalletLedger<S: KeyValueStore> {
    store: S,
    config: WalletConfig,
}

fn require_positive(amount: i64) -> Result<()> {
    if amount <= 0 {
        return Err(WalletError::InvalidAmount(format!("{amount} must be greater than zero")));
    }
    Ok(())
}

fn corrupt(key: &str, reason: impl ToString) -> WalletError {
    WalletError::Corrupt { key: key.to_string(), reason: reason.to_string() }
}

impl<S: KeyValueStore> WalletLedger<S> {
    /// Открывает кошелёк поверх хранилища и досоздаёт недостающие ключи.
    pub fn open(store: S, config: WalletConfig) -> Result<Self> {
        config.validate()?;
        let mut ledger = Self { store, config };
        ledger.ensure_initialized()?;
        Ok(ledger)
    }

    pub fn with_defaults(store: S) -> Result<Self> {
        Self::open(store, WalletConfig::default())
    }

    /// Идемпотентна: существующие значения не трогает.
    pub fn ensure_initialized(&mut self) -> Result<()> {
        let keys = &self.config.keys;
        let mut batch = WriteBatch::new();

        let users_missing = self
            .store
            .get(&keys.users)?
            .map_or(true, |raw| json::decode_credentials(&raw).map_or(true, |u| u.is_empty()));
        if users_missing && !self.config.credentials.is_empty() {
            batch = batch.put(&keys.users, json::encode_credentials(&self.config.credentials)?);
        }

        let blank = |raw: Option<String>| raw.map_or(true, |v| v.trim().is_empty());

        if blank(self.store.get(&keys.balance)?) {
            batch = batch.put(&keys.balance, self.config.starting_balance.to_string());
        }

        if blank(self.store.get(&keys.transactions)?) {
            batch = batch.put(&keys.transactions, json::encode_history(&[])?);
        }

        if blank(self.store.get(&keys.contacts)?) {
            let contacts = if self.config.seed_demo_data { seed::demo_contacts() } else { Vec::new() };
            batch = batch.put(&keys.contacts, json::encode_contacts(&contacts)?);
        }

        if batch.is_empty() {
            debug!("wallet store already initialized");
            return Ok(());
        }
        debug!(keys = batch.len(), "initializing wallet store");
        self.store.commit(batch)
    }

    pub fn config(&self) -> &WalletConfig {
        &self.config
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn session(&mut self) -> SessionGate<'_, S> {
        SessionGate::new(&mut self.store, &self.config.keys)
    }

    pub fn balance(&self) -> Result<i64> {
        let key = &self.config.keys.balance;
        match self.store.get(key)? {
            Some(raw) if !raw.trim().is_empty() => {
                let value: i64 = raw.trim().parse().map_err(|e| corrupt(key, e))?;
                if value < 0 {
                    return Err(corrupt(key, format!("negative balance {value}")));
                }
                Ok(value)
            }
            _ => Ok(self.config.starting_balance),
        }
    }

    /// Старые хранилища могли копить историю без ограничения: лишний хвост
    /// отрезается уже при чтении.
    fn history(&self) -> Result<Vec<Transaction>> {
        let key = &self.config.keys.transactions;
        let mut history = match self.store.get(key)? {
            Some(raw) => json::decode_history(&raw).map_err(|e| corrupt(key, e))?,
            None => Vec::new(),
        };
        history.truncate(self.config.history_cap);
        Ok(history)
    }

    pub fn contacts(&self) -> Result<Vec<Contact>> {
        let key = &self.config.keys.contacts;
        match self.store.get(key)? {
            Some(raw) => json::decode_contacts(&raw).map_err(|e| corrupt(key, e)),
            None => Ok(Vec::new()),
        }
    }

    pub fn contact(&self, id: &ContactId) -> Result<Option<Contact>> {
        Ok(self.contacts()?.into_iter().find(|c| &c.id == id))
    }

    /// Новая запись встаёт в начало истории, хвост сверх лимита отбрасывается.
    fn record(&mut self, new_balance: i64, tx: Transaction) -> Result<Transaction> {
        let mut history = self.history()?;
        history.insert(0, tx.clone());
        history.truncate(self.config.history_cap);

        let keys = &self.config.keys;
        let batch = WriteBatch::new()
            .put(&keys.balance, new_balance.to_string())
            .put(&keys.transactions, json::encode_history(&history)?);
        self.store.commit(batch)?;

        info!(kind = %tx.kind, amount = tx.amount, balance = new_balance, "recorded transaction");
        Ok(tx)
    }

    fn credit(&mut self, amount: i64, tx: Transaction) -> Result<Transaction> {
        let balance = self.balance()?;
        let Some(next) = balance.checked_add(amount) else {
            warn!(amount, balance, "rejected credit: overflow");
            return Err(WalletError::AmountOverflow);
        };
        self.record(next, tx)
    }

    fn debit(&mut self, amount: i64, tx: Transaction) -> Result<Transaction> {
        let balance = self.balance()?;
        if amount > balance {
            warn!(kind = %tx.kind, amount, balance, "rejected debit: insufficient funds");
            return Err(WalletError::InsufficientFunds { requested: amount, available: balance });
        }
        self.record(balance - amount, tx)
    }

    pub fn deposit(&mut self, amount: i64) -> Result<Transaction> {
        require_positive(amount)?;
        self.credit(amount, Transaction::new(TransactionKind::Deposit, "Depósito", amount))
    }

    pub fn withdraw(&mut self, amount: i64) -> Result<Transaction> {
        require_positive(amount)?;
        self.debit(amount, Transaction::new(TransactionKind::Withdraw, "Retiro", -amount))
    }

    /// Перевод контакту. Контакт ищется в момент отправки.
    pub fn send_to(&mut self, contact_id: &ContactId, amount: i64) -> Result<Transaction> {
        require_positive(amount)?;
        let Some(contact) = self.contact(contact_id)? else {
            warn!(contact = %contact_id, "rejected send: unknown contact");
            return Err(WalletError::ContactNotFound(contact_id.clone()));
        };
        let tx = Transaction::new(TransactionKind::Send, format!("Envío a {}", contact.name), -amount)
            .with_meta(TxMeta {
                contact_id: Some(contact.id.clone()),
                contact_name: Some(contact.name.clone()),
                source: None,
            });
        self.debit(amount, tx)
    }

    /// Зачисление от внешнего источника. Отправитель не проверяется.
    pub fn receive_from(&mut self, source: Option<&str>, amount: i64) -> Result<Transaction> {
        require_positive(amount)?;
        let source = source.map(str::trim).filter(|s| !s.is_empty());
        let description = match source {
            Some(from) => format!("Transferencia recibida: {from}"),
            None => "Transferencia recibida".to_string(),
        };
        let mut tx = Transaction::new(TransactionKind::Receive, description, amount);
        if let Some(from) = source {
            tx = tx.with_meta(TxMeta { source: Some(from.to_string()), ..TxMeta::default() });
        }
        self.credit(amount, tx)
    }

    pub fn add_contact(&mut self, name: &str, alias: &str, account_ref: &str, bank: &str) -> Result<Contact> {
        let (name, alias, account_ref, bank) = (name.trim(), alias.trim(), account_ref.trim(), bank.trim());
        if name.is_empty() || alias.is_empty() || account_ref.is_empty() || bank.is_empty() {
            warn!("rejected contact: empty field");
            return Err(WalletError::Validation("all contact fields are required".into()));
        }
        let (min, max) = (self.config.account_ref_min_len, self.config.account_ref_max_len);
        let digits_only = account_ref.chars().all(|c| c.is_ascii_digit());
        if !digits_only || !(min..=max).contains(&account_ref.len()) {
            warn!(account_ref, "rejected contact: bad account reference");
            return Err(WalletError::Validation(format!(
                "account reference must be {min} to {max} digits"
            )));
        }

        let mut contacts = self.contacts()?;
        let mut id = ContactId::generate();
        while contacts.iter().any(|c| c.id == id) {
            id = ContactId::generate();
        }
        let contact = Contact {
            id,
            name: name.to_string(),
            alias: alias.to_string(),
            account_ref: account_ref.to_string(),
            bank: bank.to_string(),
        };
        contacts.push(contact.clone());

        let batch = WriteBatch::new().put(&self.config.keys.contacts, json::encode_contacts(&contacts)?);
        self.store.commit(batch)?;
        info!(contact = %contact.id, name = %contact.name, "added contact");
        Ok(contact)
    }

    /// Подстрока без учёта регистра по имени или алиасу, порядок книги сохраняется.
    pub fn search_contacts(&self, query: &str) -> Result<Vec<Contact>> {
        let needle = query.trim().to_lowercase();
        let contacts = self.contacts()?;
        if needle.is_empty() {
            return Ok(contacts);
        }
        Ok(contacts.into_iter().filter(|c| c.matches(&needle)).collect())
    }

    pub fn list_transactions(&self, filter: Option<TransactionKind>) -> Result<Vec<Transaction>> {
        let history = self.history()?;
        Ok(match filter {
            Some(kind) => history.into_iter().filter(|t| t.kind == kind).collect(),
            None => history,
        })
    }
}
