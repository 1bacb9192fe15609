use crate::error::StorageError;
use std::{cell::RefCell, collections::HashMap};
use token_console_dto::session::Credential;

/// Synchronous string store, `localStorage` in the browser.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn delete(&self, key: &str);
}

/// In-memory store for tests and for browsers without local storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

pub fn load_credential(store: &impl KeyValueStore, key: &str) -> Option<Credential> {
    store
        .get(key)
        .filter(|encoded| !encoded.is_empty())
        .map(Credential::from_encoded)
}

pub fn save_credential(
    store: &impl KeyValueStore,
    key: &str,
    credential: &Credential,
) -> Result<(), StorageError> {
    store.set(key, credential.as_str())
}

pub fn clear_credential(store: &impl KeyValueStore, key: &str) {
    store.delete(key);
}
