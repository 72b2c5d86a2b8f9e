//! Core traits and types for secret sources

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading from a secret source
#[derive(Error, Debug)]
pub enum SecretStoreError {
    #[error("Secret not found: {key}")]
    NotFound { key: String },

    #[error("Cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Store error: {0}")]
    Other(String),
}

impl SecretStoreError {
    /// Whether the source simply has no entry for the key
    pub fn is_not_found(&self) -> bool {
        matches!(self, SecretStoreError::NotFound { .. })
    }
}

pub type SecretStoreResult<T> = Result<T, SecretStoreError>;

/// Trait for read-only secret sources
///
/// Implementations:
/// - Mounted secret files (`FileSecretStore`)
/// - Environment variables (`EnvSecretStore`)
/// - In-memory for testing (`MemorySecretStore`)
///
/// # Example
///
/// ```
/// use docker_secrets_core::secrets::{SecretStore, EnvSecretStore};
///
/// let store = EnvSecretStore::new();
/// // store.get("DB_PASS") reads $DB_PASS
/// ```
pub trait SecretStore: Send + Sync {
    /// Human-readable name of this store
    fn name(&self) -> &str;

    /// Check if this store is available
    fn is_available(&self) -> bool {
        true
    }

    /// Retrieve a secret by key, `None` when absent or unreadable
    fn get(&self, key: &str) -> Option<String>;

    /// Retrieve a secret by key, keeping the reason it could not be read
    ///
    /// Stores whose reads can fail for reasons other than absence
    /// override this to report them.
    fn read(&self, key: &str) -> SecretStoreResult<String> {
        self.get(key).ok_or_else(|| SecretStoreError::NotFound {
            key: key.to_string(),
        })
    }

    /// Check if a secret exists
    fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed;

    impl SecretStore for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        fn get(&self, key: &str) -> Option<String> {
            (key == "present").then(|| "value".to_string())
        }
    }

    #[test]
    fn test_default_read_maps_absence_to_not_found() {
        let store = Fixed;
        assert_eq!(store.read("present").unwrap(), "value");

        let err = store.read("missing").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Secret not found: missing");
    }

    #[test]
    fn test_default_has() {
        assert!(Fixed.has("present"));
        assert!(!Fixed.has("missing"));
        assert!(Fixed.is_available());
    }
}
