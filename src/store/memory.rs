use crate::error::{PortalError, Result};
use crate::store::Storage;
use std::collections::HashMap;
use std::sync::Mutex;

/// Process-local storage. Contents vanish with the value.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| PortalError::StorageUnavailable("Memory storage lock error".to_string()))
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }

    fn set_many(&self, entries: &[(&str, String)]) -> Result<()> {
        let mut lock = self.lock()?;
        for (key, value) in entries {
            lock.insert(key.to_string(), value.clone());
        }
        Ok(())
    }

    fn remove_many(&self, keys: &[&str]) -> Result<()> {
        let mut lock = self.lock()?;
        for key in keys {
            lock.remove(*key);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_write_wins() {
        let store = MemoryStorage::new();
        store.set("grievances", "[1]").unwrap();
        store.set("grievances", "[2]").unwrap();
        assert_eq!(store.get("grievances").unwrap().as_deref(), Some("[2]"));

        store.remove("grievances").unwrap();
        assert_eq!(store.get("grievances").unwrap(), None);
    }
}
