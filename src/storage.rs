//! Browser Storage Access
//!
//! The only module that touches `localStorage` / `sessionStorage`. Everything
//! else goes through `KeyValueStore`, which also has an in-memory
//! implementation for tests.

use std::cell::RefCell;
use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::JsValue;

use crate::error::StorageError;

/// Persisted keys
pub mod keys {
    // Session-scoped
    pub const ADMIN: &str = "admin";
    pub const TOKEN: &str = "token";
    pub const USER: &str = "user";
    pub const USER_ROLE: &str = "userRole";
    pub const IS_ADMIN_LOGGED_IN: &str = "isAdminLoggedIn";
    pub const IS_SELLER_LOGGED_IN: &str = "isSellerLoggedIn";
    pub const IS_BUYER_LOGGED_IN: &str = "isBuyerLoggedIn";

    // Durable
    pub const CART_ITEMS: &str = "cartItems";
    pub const COLLECT_ITEMS: &str = "collectItems";
    /// Written by the old context-based cart, migrated on startup
    pub const LEGACY_CART: &str = "cart";
}

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// Read and decode a JSON value.
///
/// Missing, empty and malformed values all read as `None`; corrupt storage
/// must never take a screen down.
pub fn read_json<T: DeserializeOwned>(store: &impl KeyValueStore, key: &str) -> Option<T> {
    let raw = match store.get(key) {
        Ok(Some(raw)) if !raw.trim().is_empty() => raw,
        Ok(_) => return None,
        Err(e) => {
            log::warn!("[storage] reading {key} failed: {e}");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("[storage] discarding malformed {key}: {e}");
            None
        }
    }
}

pub fn write_json<T: Serialize + ?Sized>(store: &impl KeyValueStore, key: &str, value: &T) -> Result<(), StorageError> {
    let serialized = serde_json::to_string(value)?;
    store.set(key, &serialized)
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WebStorageDriver {
    /// Survives browser restarts
    Local,
    /// Lives as long as the tab
    Session,
}

#[derive(Clone, Copy, Debug)]
pub struct WebStorage {
    driver: WebStorageDriver,
}

impl WebStorage {
    pub fn local() -> Self {
        Self { driver: WebStorageDriver::Local }
    }

    pub fn session() -> Self {
        Self { driver: WebStorageDriver::Session }
    }

    fn storage(&self) -> Result<web_sys::Storage, StorageError> {
        let window = web_sys::window().ok_or(StorageError::Unavailable)?;
        match self.driver {
            WebStorageDriver::Local => window.local_storage().map_err(map_js_error)?,
            WebStorageDriver::Session => window.session_storage().map_err(map_js_error)?,
        }
        .ok_or(StorageError::Unavailable)
    }
}

impl KeyValueStore for WebStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage()?.get_item(key).map_err(map_js_error)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage()?.set_item(key, value).map_err(map_js_error)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.storage()?.remove_item(key).map_err(map_js_error)
    }
}

fn map_js_error(err: JsValue) -> StorageError {
    let text = err
        .as_string()
        .or_else(|| js_sys::JSON::stringify(&err).ok().and_then(|s| s.as_string()))
        .unwrap_or_else(|| format!("{err:?}"));
    StorageError::Js(text)
}

/// In-memory store with the same semantics as web storage
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}
