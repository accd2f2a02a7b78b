//! Хранилище в одном JSON-файле.
//!
//! Файл содержит один объект `{ "ключ": "значение", ... }`. Каждый commit
//! пишет полный снимок во временный файл рядом с целевым и переименовывает его
//! поверх целевого, так что читатель видит либо старое, либо новое состояние.

use std::collections::{BTreeMap, HashMap};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{memory::apply, KeyValueStore, WriteBatch};
use crate::error::{Result, WalletError};

#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    data: HashMap<String, String>,
}

impl JsonFileStore {
    /// Открывает файл; отсутствующий файл означает пустое хранилище.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let data = match File::open(&path) {
            Ok(f) => {
                let map: BTreeMap<String, String> = serde_json::from_reader(BufReader::new(f))
                    .map_err(|e| WalletError::Corrupt {
                        key: path.display().to_string(),
                        reason: e.to_string(),
                    })?;
                map.into_iter().collect()
            }
            Err(e) if e.kind() == ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };
        debug!(path = %path.display(), keys = data.len(), "opened wallet store");
        Ok(Self { path, data })
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "wallet.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn persist(&self, snapshot: &HashMap<String, String>) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let sorted: BTreeMap<&String, &String> = snapshot.iter().collect();
        let tmp = self.tmp_path();
        {
            let f = File::create(&tmp)?;
            let mut w = BufWriter::new(f);
            serde_json::to_writer_pretty(&mut w, &sorted)?;
            w.flush()?;
            w.get_ref().sync_all()?;
        }
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(WalletError::Storage(format!(
                "rename {} -> {}: {e}",
                tmp.display(),
                self.path.display()
            )));
        }
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.data.get(key).cloned())
    }

    fn commit(&mut self, batch: WriteBatch) -> Result<()> {
        if batch.is_empty() {
            return Ok(());
        }
        let ops = batch.len();
        let mut next = self.data.clone();
        apply(&mut next, batch);
        self.persist(&next)?;
        self.data = next;
        debug!(path = %self.path.display(), ops, "committed batch");
        Ok(())
    }
}
