//! Best score persistence
//!
//! The only thing that survives a page reload is the best score, stored as a
//! decimal string under a single LocalStorage key. Storage is behind a small
//! key/value trait so the slot logic runs natively in tests.

use std::collections::HashMap;

use thiserror::Error;

/// Failures from a key/value backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("storage is not available")]
    Unavailable,
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Minimal string key/value store
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory store (native builds and tests)
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Browser LocalStorage
#[cfg(target_arch = "wasm32")]
pub struct LocalStore {
    storage: Option<web_sys::Storage>,
}

#[cfg(target_arch = "wasm32")]
impl LocalStore {
    /// Grab `window.localStorage`; private browsing may deny it
    pub fn open() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if storage.is_none() {
            log::warn!("LocalStorage unavailable, best score will not persist");
        }
        Self { storage }
    }

    fn storage(&self) -> Result<&web_sys::Storage, StorageError> {
        self.storage.as_ref().ok_or(StorageError::Unavailable)
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage()?
            .get_item(key)
            .map_err(|e| StorageError::Backend(format!("{:?}", e)))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Backend(format!("{:?}", e)))
    }
}

/// The persisted best score
pub struct BestScoreSlot {
    store: Box<dyn KeyValueStore>,
}

impl BestScoreSlot {
    /// LocalStorage key
    pub const KEY: &'static str = "neon_flap_best";

    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Slot backed by LocalStorage
    #[cfg(target_arch = "wasm32")]
    pub fn browser() -> Self {
        Self::new(Box::new(LocalStore::open()))
    }

    /// Native: nothing outlives the process
    #[cfg(not(target_arch = "wasm32"))]
    pub fn browser() -> Self {
        Self::new(Box::new(MemoryStore::new()))
    }

    /// Read the stored best; absent, unreadable or malformed values read as 0
    pub fn load(&self) -> u32 {
        match self.store.get(Self::KEY) {
            Ok(Some(raw)) => match raw.trim().parse::<u32>() {
                Ok(best) => {
                    log::info!("Loaded best score {}", best);
                    best
                }
                Err(_) => {
                    log::warn!("Ignoring malformed best score {:?}", raw);
                    0
                }
            },
            Ok(None) => 0,
            Err(e) => {
                log::warn!("Could not load best score: {}", e);
                0
            }
        }
    }

    /// Write the best score; failures are logged and otherwise ignored
    pub fn save(&mut self, best: u32) {
        match self.store.set(Self::KEY, &best.to_string()) {
            Ok(()) => log::debug!("Best score saved ({})", best),
            Err(e) => log::warn!("Could not save best score: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Store that fails every call
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Backend("quota exceeded".to_string()))
        }
    }

    fn store_with(value: &str) -> MemoryStore {
        let mut store = MemoryStore::new();
        store.set(BestScoreSlot::KEY, value).unwrap();
        store
    }

    #[test]
    fn test_empty_store_loads_zero() {
        let slot = BestScoreSlot::new(Box::new(MemoryStore::new()));
        assert_eq!(slot.load(), 0);
    }

    #[test]
    fn test_save_then_load() {
        let mut slot = BestScoreSlot::new(Box::new(MemoryStore::new()));
        slot.save(12);
        assert_eq!(slot.load(), 12);
        slot.save(13);
        assert_eq!(slot.load(), 13);
    }

    #[test]
    fn test_decimal_string_format() {
        let slot = BestScoreSlot::new(Box::new(store_with("42")));
        assert_eq!(slot.load(), 42);
    }

    #[test]
    fn test_malformed_loads_zero() {
        for raw in ["", "abc", "-3", "1.5"] {
            let slot = BestScoreSlot::new(Box::new(store_with(raw)));
            assert_eq!(slot.load(), 0, "raw value {:?}", raw);
        }
    }

    #[test]
    fn test_broken_store_is_tolerated() {
        let mut slot = BestScoreSlot::new(Box::new(BrokenStore));
        slot.save(5);
        assert_eq!(slot.load(), 0);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(StorageError::Unavailable.to_string(), "storage is not available");
        assert_eq!(
            StorageError::Backend("x".into()).to_string(),
            "storage backend error: x"
        );
    }
}
