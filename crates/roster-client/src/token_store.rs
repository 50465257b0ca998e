//! The only reader and writer of the persisted credential record.

use std::sync::{Arc, RwLock};

use roster_types::{CredentialRecord, User};
use serde::Deserialize;
use tracing::warn;

use crate::storage::{CredentialStorage, StorageError};

/// Storage key the credential record lives under.
pub const CREDENTIAL_KEY: &str = "user";

/// Lenient view of a stored record; either field may be missing.
#[derive(Deserialize)]
struct PartialRecord {
    #[serde(default)]
    user: Option<User>,
    #[serde(default)]
    token: Option<String>,
}

/// Reads go to storage once; afterwards the raw record is served from memory
/// until the next `save` or `clear`. Clones share the cache.
#[derive(Clone)]
pub struct TokenStore {
    storage: Arc<dyn CredentialStorage>,
    // Outer `None`: not read yet. `Some(None)`: nothing stored.
    cached: Arc<RwLock<Option<Option<String>>>>,
}

impl TokenStore {
    pub fn new(storage: Arc<dyn CredentialStorage>) -> Self {
        Self {
            storage,
            cached: Arc::new(RwLock::new(None)),
        }
    }

    pub fn save(&self, record: &CredentialRecord) -> Result<(), StorageError> {
        let json = serde_json::to_string(record)?;
        let result = self.storage.write(CREDENTIAL_KEY, &json);
        self.set_cached(result.is_ok().then_some(Some(json)));
        result
    }

    /// Returns the full record, or `None` if nothing usable is stored.
    pub fn load(&self) -> Option<CredentialRecord> {
        let raw = self.read_raw()?;
        match serde_json::from_str(&raw) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("stored credential record is malformed: {e}");
                None
            }
        }
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        let result = self.storage.remove(CREDENTIAL_KEY);
        self.set_cached(result.is_ok().then_some(None));
        result
    }

    pub fn token(&self) -> Option<String> {
        self.load_partial()?.token
    }

    pub fn user(&self) -> Option<User> {
        self.load_partial()?.user
    }

    fn load_partial(&self) -> Option<PartialRecord> {
        let raw = self.read_raw()?;
        match serde_json::from_str(&raw) {
            Ok(partial) => Some(partial),
            Err(e) => {
                warn!("stored credential record is not valid JSON: {e}");
                None
            }
        }
    }

    fn read_raw(&self) -> Option<String> {
        if let Ok(cached) = self.cached.read() {
            if let Some(raw) = cached.as_ref() {
                return raw.clone();
            }
        }

        match self.storage.read(CREDENTIAL_KEY) {
            Ok(raw) => {
                self.set_cached(Some(raw.clone()));
                raw
            }
            Err(e) => {
                warn!("failed to read credential record: {e}");
                None
            }
        }
    }

    /// `None` drops the cache so the next read goes back to storage.
    fn set_cached(&self, value: Option<Option<String>>) {
        match self.cached.write() {
            Ok(mut cached) => *cached = value,
            Err(poisoned) => *poisoned.into_inner() = value,
        }
    }
}
