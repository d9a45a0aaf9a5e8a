use super::backend::{PrefValue, StorageBackend};
use crate::error::{NotasError, Result};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

/// In-memory key-value backend for testing.
///
/// Uses `RefCell` for interior mutability since notas is single-threaded.
/// Data lives as long as the value does, so "restarting the process" in a
/// test means building new stores over the same backend.
#[derive(Default)]
pub struct MemBackend {
    values: RefCell<BTreeMap<String, PrefValue>>,
    simulate_write_error: Cell<bool>,
    simulate_read_error: Cell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Enable read error simulation for testing error handling.
    pub fn set_simulate_read_error(&self, simulate: bool) {
        self.simulate_read_error.set(simulate);
    }

    pub fn len(&self) -> usize {
        self.values.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.borrow().is_empty()
    }

    fn check_read(&self) -> Result<()> {
        if self.simulate_read_error.get() {
            return Err(NotasError::Storage("Simulated read error".to_string()));
        }
        Ok(())
    }

    fn check_write(&self) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(NotasError::Storage("Simulated write error".to_string()));
        }
        Ok(())
    }
}

impl StorageBackend for MemBackend {
    fn get_value(&self, key: &str) -> Result<Option<PrefValue>> {
        self.check_read()?;
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set_value(&self, key: &str, value: PrefValue) -> Result<()> {
        self.check_write()?;
        self.values.borrow_mut().insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.check_write()?;
        self.values.borrow_mut().remove(key);
        Ok(())
    }

    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>> {
        self.check_read()?;
        Ok(self
            .values
            .borrow()
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }
}
