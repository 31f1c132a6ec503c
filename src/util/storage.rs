//! Key/value storage backends for persisted client state.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session store persists through [`KeyValueStorage`] so the same logic
//! runs against `window.localStorage` in the browser and an in-memory map in
//! tests or native embeddings. All operations are best-effort: a storage that
//! refuses a write (quota, private mode) is logged and otherwise ignored.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// String-keyed, string-valued persistent storage.
pub trait KeyValueStorage: Send + Sync {
    /// Value stored under `key`, or `None` when missing or unreadable.
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str);
    fn remove_item(&self, key: &str);
}

/// Shared handle to a storage backend.
pub type SharedStorage = Arc<dyn KeyValueStorage>;

/// Browser `localStorage`, resolved from `window` on every call.
///
/// Holding no `web_sys` handle keeps this type `Send + Sync`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

/// Log a storage operation the browser refused; returns whether it succeeded.
#[cfg(any(test, feature = "hydrate"))]
fn check_storage_op<E>(action: &str, key: &str, outcome: Result<(), E>) -> bool {
    let ok = outcome.is_ok();
    if !ok {
        log::warn!("storage: failed to {action} {key}");
    }
    ok
}

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl KeyValueStorage for LocalStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            None
        }
    }

    fn set_item(&self, key: &str, value: &str) {
        #[cfg(feature = "hydrate")]
        {
            let Some(storage) = local_storage() else {
                return;
            };
            check_storage_op("write", key, storage.set_item(key, value));
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (key, value);
        }
    }

    fn remove_item(&self, key: &str) {
        #[cfg(feature = "hydrate")]
        {
            let Some(storage) = local_storage() else {
                return;
            };
            check_storage_op("remove", key, storage.remove_item(key));
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
        }
    }
}

/// Storage of the current execution context.
///
/// `Some` only in a browser with `localStorage` available; `None` during
/// SSR and in native builds.
pub fn browser_storage() -> Option<SharedStorage> {
    #[cfg(feature = "hydrate")]
    {
        local_storage().map(|_| Arc::new(LocalStorage) as SharedStorage)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

/// In-process storage backed by a map.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate from `(key, value)` pairs.
    pub fn with_items<'a>(items: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let items = items.into_iter().map(|(k, v)| (k.to_owned(), v.to_owned())).collect();
        Self { items: Mutex::new(items) }
    }

    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.lock().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        self.items.lock().insert(key.to_owned(), value.to_owned());
    }

    fn remove_item(&self, key: &str) {
        self.items.lock().remove(key);
    }
}

/// Load and deserialize the JSON value stored under `key`.
///
/// Missing keys and values that fail to parse into `T` both yield `None`;
/// the latter is logged.
pub fn load_json<T: DeserializeOwned>(storage: &dyn KeyValueStorage, key: &str) -> Option<T> {
    let raw = storage.get_item(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("storage: ignoring malformed {key}: {e}");
            None
        }
    }
}

/// Serialize `value` as JSON and store it under `key`.
pub fn save_json<T: Serialize + ?Sized>(storage: &dyn KeyValueStorage, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(raw) => storage.set_item(key, &raw),
        Err(e) => log::warn!("storage: failed to serialize {key}: {e}"),
    }
}
