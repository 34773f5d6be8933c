use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::StoreError;

/// Key-value storage for view state that outlives a session. Values are JSON
/// documents.
pub trait StateStore: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn save(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Process-local store, used where no durable storage exists.
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    values: Mutex<HashMap<String, String>>,
}

impl StateStore for MemoryStateStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        let values = self
            .values
            .lock()
            .map_err(|err| StoreError::Unavailable(err.to_string()))?;
        Ok(values.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut values = self
            .values
            .lock()
            .map_err(|err| StoreError::Unavailable(err.to_string()))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
