//! Key-value persistence for tokens and the session record.
//!
//! SYSTEM CONTEXT
//! ==============
//! The auth service persists through [`KeyValueStore`] so it never touches
//! `web-sys` directly. In the browser that is `localStorage`; off-browser,
//! or when storage access is denied, an in-memory map stands in.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::cell::RefCell;
use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// String-valued key-value storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);

    /// Read and delete `key` in one step.
    fn take(&self, key: &str) -> Option<String> {
        let value = self.get(key);
        self.remove(key);
        value
    }
}

/// Serialize `value` as JSON under `key`. Serialization failures are logged
/// and leave the key untouched.
pub fn save_json<T: Serialize>(store: &dyn KeyValueStore, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(raw) => store.set(key, &raw),
        Err(e) => leptos::logging::warn!("failed to serialize {key}: {e}"),
    }
}

/// Load a JSON value for `key`. `Ok(None)` when the key is absent.
///
/// # Errors
///
/// Returns the `serde_json` error when the stored value does not parse.
pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>, serde_json::Error> {
    store.get(key).map(|raw| serde_json::from_str(&raw)).transpose()
}

/// In-process store used when browser storage is unavailable.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl MemoryStore {
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

/// `window.localStorage`.
#[cfg(feature = "csr")]
pub struct BrowserStorage {
    storage: web_sys::Storage,
}

#[cfg(feature = "csr")]
impl BrowserStorage {
    /// `None` when there is no window or the page may not use storage.
    #[must_use]
    pub fn local() -> Option<Self> {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten())?;
        Some(Self { storage })
    }
}

#[cfg(feature = "csr")]
impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(e) = self.storage.set_item(key, value) {
            leptos::logging::warn!("localStorage write of {key} failed: {e:?}");
        }
    }

    fn remove(&self, key: &str) {
        if let Err(e) = self.storage.remove_item(key) {
            leptos::logging::warn!("localStorage remove of {key} failed: {e:?}");
        }
    }
}
