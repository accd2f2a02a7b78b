//! Строковое key-value хранилище состояния кошелька.
//!
//! Изменения применяются пачкой ([`WriteBatch`]): реализация обязана либо
//! применить все операции пачки, либо не применить ни одной.

pub mod file;
pub mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOp {
    Put { key: String, value: String },
    Delete { key: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteBatch {
    ops: Vec<WriteOp>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.ops.push(WriteOp::Put { key: key.into(), value: value.into() });
        self
    }

    pub fn delete(mut self, key: impl Into<String>) -> Self {
        self.ops.push(WriteOp::Delete { key: key.into() });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn into_ops(self) -> Vec<WriteOp> {
        self.ops
    }
}

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn commit(&mut self, batch: WriteBatch) -> Result<()>;

    fn put(&mut self, key: &str, value: &str) -> Result<()> {
        self.commit(WriteBatch::new().put(key, value))
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        self.commit(WriteBatch::new().delete(key))
    }
}
