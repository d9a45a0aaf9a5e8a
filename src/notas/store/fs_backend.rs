use super::backend::{PrefValue, StorageBackend};
use crate::error::{NotasError, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub const PREFERENCES_FILENAME: &str = "preferences.json";

/// File-backed key-value store.
///
/// The whole map lives in one JSON object. Each `set_value`/`remove`
/// re-reads the file, applies the change and writes it back through a temp
/// file + rename, so a crash leaves either the old or the new map on disk.
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    #[cfg(test)]
    pub(crate) fn root(&self) -> &Path {
        &self.root
    }

    pub fn file_path(&self) -> PathBuf {
        self.root.join(PREFERENCES_FILENAME)
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(NotasError::Io)?;
        }
        Ok(())
    }

    fn load(&self) -> Result<BTreeMap<String, PrefValue>> {
        let path = self.file_path();
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&path).map_err(NotasError::Io)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|e| {
            NotasError::Storage(format!("Unreadable store {}: {}", path.display(), e))
        })
    }

    fn persist(&self, values: &BTreeMap<String, PrefValue>) -> Result<()> {
        self.ensure_dir(&self.root)?;

        let content = serde_json::to_string_pretty(values).map_err(NotasError::Serialization)?;

        let tmp_file = self.root.join(format!(".prefs-{}.tmp", Uuid::new_v4()));
        if let Err(e) = fs::write(&tmp_file, content) {
            let _ = fs::remove_file(&tmp_file);
            return Err(NotasError::Io(e));
        }
        if let Err(e) = fs::rename(&tmp_file, self.file_path()) {
            let _ = fs::remove_file(&tmp_file);
            return Err(NotasError::Io(e));
        }

        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn get_value(&self, key: &str) -> Result<Option<PrefValue>> {
        Ok(self.load()?.remove(key))
    }

    fn set_value(&self, key: &str, value: PrefValue) -> Result<()> {
        let mut values = self.load()?;
        values.insert(key.to_string(), value);
        self.persist(&values)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut values = self.load()?;
        if values.remove(key).is_none() {
            return Ok(());
        }
        self.persist(&values)
    }

    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>> {
        Ok(self
            .load()?
            .into_keys()
            .filter(|k| k.starts_with(prefix))
            .collect())
    }
}
