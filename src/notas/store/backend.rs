use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use tracing::debug;

/// A scalar as held by the key-value store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrefValue {
    Bool(bool),
    Int(i64),
    Text(String),
}

/// Rust types that can be stored as a single preference value.
pub trait Preference: Sized {
    fn into_value(self) -> PrefValue;
    fn from_value(value: PrefValue) -> Option<Self>;
}

impl Preference for i64 {
    fn into_value(self) -> PrefValue {
        PrefValue::Int(self)
    }

    fn from_value(value: PrefValue) -> Option<Self> {
        match value {
            PrefValue::Int(n) => Some(n),
            _ => None,
        }
    }
}

impl Preference for u64 {
    fn into_value(self) -> PrefValue {
        PrefValue::Int(i64::try_from(self).unwrap_or(i64::MAX))
    }

    fn from_value(value: PrefValue) -> Option<Self> {
        match value {
            PrefValue::Int(n) => u64::try_from(n).ok(),
            _ => None,
        }
    }
}

impl Preference for bool {
    fn into_value(self) -> PrefValue {
        PrefValue::Bool(self)
    }

    fn from_value(value: PrefValue) -> Option<Self> {
        match value {
            PrefValue::Bool(b) => Some(b),
            _ => None,
        }
    }
}

impl Preference for String {
    fn into_value(self) -> PrefValue {
        PrefValue::Text(self)
    }

    fn from_value(value: PrefValue) -> Option<Self> {
        match value {
            PrefValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Durable, process-wide, string-keyed scalar storage.
///
/// Every call is synchronous and atomic for its key; there are no
/// transactions and the last write wins. Methods take `&self` so one backend
/// can be shared by the note store, the session store and the app state store.
pub trait StorageBackend {
    /// Raw read. `Ok(None)` when the key was never written or was removed.
    fn get_value(&self, key: &str) -> Result<Option<PrefValue>>;

    fn set_value(&self, key: &str, value: PrefValue) -> Result<()>;

    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;

    /// All keys starting with `prefix`, sorted.
    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>>;

    /// Typed read with a fallback. A value of another type yields `default`.
    fn get<T: Preference>(&self, key: &str, default: T) -> Result<T>
    where
        Self: Sized,
    {
        match self.get_value(key)? {
            None => Ok(default),
            Some(value) => match T::from_value(value) {
                Some(v) => Ok(v),
                None => {
                    debug!(key, "stored value has unexpected type, using default");
                    Ok(default)
                }
            },
        }
    }

    fn set<T: Preference>(&self, key: &str, value: T) -> Result<()>
    where
        Self: Sized,
    {
        self.set_value(key, value.into_value())
    }

    #[cfg(any(test, feature = "test_utils"))]
    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.get_value(key)?.is_some())
    }
}

impl<B: StorageBackend + ?Sized> StorageBackend for Rc<B> {
    fn get_value(&self, key: &str) -> Result<Option<PrefValue>> {
        (**self).get_value(key)
    }

    fn set_value(&self, key: &str, value: PrefValue) -> Result<()> {
        (**self).set_value(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }

    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>> {
        (**self).keys_with_prefix(prefix)
    }
}

impl<B: StorageBackend + ?Sized> StorageBackend for &B {
    fn get_value(&self, key: &str) -> Result<Option<PrefValue>> {
        (**self).get_value(key)
    }

    fn set_value(&self, key: &str, value: PrefValue) -> Result<()> {
        (**self).set_value(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }

    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>> {
        (**self).keys_with_prefix(prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;

    #[test]
    fn get_returns_default_for_missing_key() {
        let backend = MemBackend::new();
        assert_eq!(backend.get("notas_creadas", 0i64).unwrap(), 0);
        assert!(!backend.get("draft_urgente", false).unwrap());
        assert_eq!(backend.get("draft_texto", String::new()).unwrap(), "");
    }

    #[test]
    fn typed_set_then_get() {
        let backend = MemBackend::new();
        backend.set("notas_creadas", 5i64).unwrap();
        backend.set("draft_urgente", true).unwrap();
        backend.set("draft_texto", "Buy milk".to_string()).unwrap();

        assert_eq!(backend.get("notas_creadas", 0i64).unwrap(), 5);
        assert!(backend.get("draft_urgente", false).unwrap());
        assert_eq!(backend.get("draft_texto", String::new()).unwrap(), "Buy milk");
    }

    #[test]
    fn mismatched_type_falls_back_to_default() {
        let backend = MemBackend::new();
        backend.set("notas_creadas", "five".to_string()).unwrap();
        assert_eq!(backend.get("notas_creadas", 3i64).unwrap(), 3);
    }

    #[test]
    fn negative_int_is_not_a_u64() {
        let backend = MemBackend::new();
        backend.set("cambios_estado", -4i64).unwrap();
        assert_eq!(backend.get("cambios_estado", 7u64).unwrap(), 7);
    }

    #[test]
    fn shared_rc_sees_same_data() {
        let backend = Rc::new(MemBackend::new());
        let other = Rc::clone(&backend);
        backend.set("veces_menu_abierto", 2i64).unwrap();
        assert_eq!(other.get("veces_menu_abierto", 0i64).unwrap(), 2);
    }

    #[test]
    fn untagged_values_serialize_as_plain_json() {
        let json = serde_json::to_string(&vec![
            PrefValue::Int(3),
            PrefValue::Bool(true),
            PrefValue::Text("hola".into()),
        ])
        .unwrap();
        assert_eq!(json, r#"[3,true,"hola"]"#);
        let back: Vec<PrefValue> = serde_json::from_str(&json).unwrap();
        assert_eq!(back[0], PrefValue::Int(3));
        assert_eq!(back[1], PrefValue::Bool(true));
    }
}
