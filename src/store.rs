//! Volatile key-value store for session credentials
//!
//! Holds the session token and serialized profile for the lifetime of the
//! process only. Nothing here touches disk: losing credentials on restart is
//! a deliberate, documented property of the client, since durable secret
//! storage would need platform keystore semantics this crate does not take
//! a position on.

use std::collections::HashMap;
use std::sync::Mutex;

/// Storage key for the backend session token
pub const JWT_TOKEN_KEY: &str = "jwt_token";

/// Storage key for the serialized user profile
pub const USER_DATA_KEY: &str = "user_data";

/// In-memory store, constructed and owned by the session manager.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the value stored under `key`, if any
    pub fn get(&self, key: &str) -> Option<String> {
        let items = self.items.lock().unwrap();
        items.get(key).cloned()
    }

    /// Store `value` under `key`, replacing any previous value
    pub fn set(&self, key: &str, value: &str) {
        let mut items = self.items.lock().unwrap();
        items.insert(key.to_string(), value.to_string());
    }

    /// Remove the value stored under `key`
    pub fn remove(&self, key: &str) {
        let mut items = self.items.lock().unwrap();
        items.remove(key);
    }

    /// Remove everything
    pub fn clear(&self) {
        let mut items = self.items.lock().unwrap();
        items.clear();
    }
}
