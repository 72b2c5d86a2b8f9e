//! In-memory secret store

use std::collections::HashMap;

use parking_lot::RwLock;

use super::traits::SecretStore;

/// In-memory secret store for testing and embedded use
///
/// Stands in for the process environment when a resolver should not see
/// real variables, e.g. in tests or when a host already parsed its
/// environment.
///
/// # Example
///
/// ```
/// use docker_secrets_core::secrets::{SecretStore, MemorySecretStore};
///
/// let store = MemorySecretStore::new();
/// store.insert("DB_PASS", "hunter2");
/// assert_eq!(store.get("DB_PASS"), Some("hunter2".to_string()));
/// ```
#[derive(Debug, Default)]
pub struct MemorySecretStore {
    secrets: RwLock<HashMap<String, String>>,
}

impl MemorySecretStore {
    /// Create a new empty memory store
    pub fn new() -> Self {
        Self {
            secrets: RwLock::new(HashMap::new()),
        }
    }

    /// Create a memory store with initial values
    pub fn with_secrets(initial: HashMap<String, String>) -> Self {
        Self {
            secrets: RwLock::new(initial),
        }
    }

    pub fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        self.secrets.write().insert(key.into(), value.into());
    }

    pub fn remove(&self, key: &str) -> Option<String> {
        self.secrets.write().remove(key)
    }

    /// Clear all secrets from the store
    pub fn clear(&self) {
        self.secrets.write().clear();
    }

    pub fn len(&self) -> usize {
        self.secrets.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SecretStore for MemorySecretStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn get(&self, key: &str) -> Option<String> {
        self.secrets.read().get(key).cloned()
    }
}

impl Clone for MemorySecretStore {
    fn clone(&self) -> Self {
        Self {
            secrets: RwLock::new(self.secrets.read().clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_crud() {
        let store = MemorySecretStore::new();
        assert!(store.is_empty());
        assert_eq!(store.get("test"), None);

        store.insert("test", "value");
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("test"), Some("value".to_string()));

        store.insert("test", "new_value");
        assert_eq!(store.get("test"), Some("new_value".to_string()));

        assert_eq!(store.remove("test"), Some("new_value".to_string()));
        assert!(!store.has("test"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_memory_store_with_initial() {
        let mut initial = HashMap::new();
        initial.insert("KEY1".to_string(), "value1".to_string());
        initial.insert("KEY2".to_string(), String::new());

        let store = MemorySecretStore::with_secrets(initial);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("KEY2"), Some(String::new()));

        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn test_memory_store_clone_is_independent() {
        let store = MemorySecretStore::new();
        store.insert("key", "value");

        let cloned = store.clone();
        cloned.insert("key", "modified");
        assert_eq!(store.get("key"), Some("value".to_string()));
        assert_eq!(cloned.get("key"), Some("modified".to_string()));
    }

    #[test]
    fn test_memory_store_thread_safety() {
        use std::sync::Arc;
        use std::thread;

        let store = Arc::new(MemorySecretStore::new());
        let handles: Vec<_> = (0..10)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    let key = format!("key_{}", i);
                    store.insert(key.clone(), format!("value_{}", i));
                    assert_eq!(store.get(&key), Some(format!("value_{}", i)));
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(store.len(), 10);
    }
}
