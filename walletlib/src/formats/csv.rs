//! Выписка по операциям в CSV. Заголовки:
//! id,kind,description,amount,timestamp,contact_id

use crate::{
    error::{Result, WalletError},
    formats::json::parse_kind,
    model::{ContactId, Transaction, TransactionId, TxMeta},
};
use chrono::{DateTime, Utc};
use csv::{ReaderBuilder, WriterBuilder};
use std::io::{BufRead, Write};

#[derive(serde::Deserialize)]
struct CsvRow {
    id: String,
    kind: String,
    description: String,
    amount: String,
    timestamp: String,
    contact_id: Option<String>,
}

#[derive(serde::Serialize)]
struct CsvOutRow<'a> {
    id: &'a str,
    kind: &'a str,
    description: &'a str,
    amount: i64,
    timestamp: String,
    contact_id: Option<&'a str>,
}

pub struct Csv;

impl crate::traits::ReadFormat for Csv {
    fn read<R: BufRead>(r: R) -> Result<Vec<Transaction>> {
        let mut rdr = ReaderBuilder::new().flexible(true).from_reader(r);
        let mut history = Vec::new();

        for rec in rdr.deserialize::<CsvRow>() {
            let row = rec?;
            let kind = parse_kind(&row.kind)
                .ok_or_else(|| WalletError::Parse(format!("unknown kind: {}", row.kind)))?;
            let amount: i64 = row
                .amount
                .trim()
                .parse()
                .map_err(|e| WalletError::Parse(format!("amount: {e}")))?;
            let timestamp = DateTime::parse_from_rfc3339(&row.timestamp)
                .map_err(|e| WalletError::Parse(format!("timestamp: {e}")))?
                .with_timezone(&Utc);
            let meta = row
                .contact_id
                .filter(|c| !c.is_empty())
                .map(|c| TxMeta { contact_id: Some(ContactId(c)), ..TxMeta::default() });

            history.push(Transaction {
                id: TransactionId(row.id),
                kind,
                description: row.description,
                amount,
                timestamp,
                meta,
            });
        }

        Ok(history)
    }
}

impl crate::traits::WriteFormat for Csv {
    fn write<W: Write>(mut w: W, history: &[Transaction]) -> Result<()> {
        let mut wrt = WriterBuilder::new().from_writer(&mut w);

        for t in history {
            let out = CsvOutRow {
                id: &t.id.0,
                kind: t.kind.as_str(),
                description: &t.description,
                amount: t.amount,
                timestamp: t.timestamp.to_rfc3339(),
                contact_id: t.contact_id().map(|c| c.0.as_str()),
            };
            wrt.serialize(out)?;
        }
        wrt.flush()?;
        Ok(())
    }
}
