//! Хранилище в памяти (тесты, временные сессии).

use std::collections::HashMap;

use super::{KeyValueStore, WriteBatch, WriteOp};
use crate::error::Result;

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            data: entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.data.get(key).cloned())
    }

    fn commit(&mut self, batch: WriteBatch) -> Result<()> {
        apply(&mut self.data, batch);
        Ok(())
    }
}

pub(crate) fn apply(data: &mut HashMap<String, String>, batch: WriteBatch) {
    for op in batch.into_ops() {
        match op {
            WriteOp::Put { key, value } => {
                data.insert(key, value);
            }
            WriteOp::Delete { key } => {
                data.remove(&key);
            }
        }
    }
}
