//! Flat key-value persistence for the portal collections.
//!
//! Every collection is one JSON text blob under a fixed key. Writers replace the
//! whole blob; there are no partial updates and no conflict detection.

pub mod db;
pub mod memory;

use crate::error::{PortalError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub use db::SqliteStorage;
pub use memory::MemoryStorage;

pub const GRIEVANCES_KEY: &str = "grievances";
pub const ACCOUNTS_KEY: &str = "accounts";

pub trait Storage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    fn remove(&self, key: &str) -> Result<()>;

    /// Writes every entry or none of them.
    fn set_many(&self, entries: &[(&str, String)]) -> Result<()>;

    /// Removes every key or none of them.
    fn remove_many(&self, keys: &[&str]) -> Result<()>;
}

/// Reads a collection; a missing key is an empty collection.
pub fn load_collection<T: DeserializeOwned>(store: &dyn Storage, key: &'static str) -> Result<Vec<T>> {
    match store.get(key)? {
        Some(raw) if !raw.trim().is_empty() => serde_json::from_str(&raw)
            .map_err(|source| PortalError::CorruptCollection { key, source }),
        _ => Ok(Vec::new()),
    }
}

pub fn save_collection<T: Serialize>(store: &dyn Storage, key: &'static str, items: &[T]) -> Result<()> {
    store.set(key, &encode_collection(items)?)
}

pub(crate) fn encode_collection<T: Serialize>(items: &[T]) -> Result<String> {
    serde_json::to_string(items)
        .map_err(|e| PortalError::StorageUnavailable(format!("Failed to serialize collection: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn missing_collection_loads_as_empty() {
        let store = MemoryStorage::new();
        let loaded: Vec<serde_json::Value> = load_collection(&store, GRIEVANCES_KEY).expect("load");
        assert!(loaded.is_empty());
    }

    #[test]
    fn malformed_collection_is_reported_as_format_error() {
        let store = MemoryStorage::new();
        store.set(ACCOUNTS_KEY, "{not json").expect("set");

        let err = load_collection::<serde_json::Value>(&store, ACCOUNTS_KEY).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    #[test]
    fn saved_collection_round_trips_in_order() {
        let store = MemoryStorage::new();
        save_collection(&store, GRIEVANCES_KEY, &[3, 1, 2]).expect("save");
        let loaded: Vec<i32> = load_collection(&store, GRIEVANCES_KEY).expect("load");
        assert_eq!(loaded, vec![3, 1, 2]);
    }
}
