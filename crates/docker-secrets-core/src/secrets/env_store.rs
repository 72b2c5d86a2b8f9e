//! Environment variable secret store

use std::env;

use super::traits::SecretStore;

/// Secret store that reads from environment variables
///
/// This store is read-only and looks up the key exactly as given; any
/// case conversion is the caller's job. A variable that is set to the
/// empty string is a found value of `""`. Unset variables and values that
/// are not valid unicode read as absent.
///
/// # Example
///
/// ```
/// use docker_secrets_core::secrets::{SecretStore, EnvSecretStore};
///
/// let store = EnvSecretStore::new();
/// let token = store.get("API_TOKEN");
/// ```
#[derive(Debug, Default)]
pub struct EnvSecretStore {
    _private: (), // Prevent direct construction, use new()
}

impl EnvSecretStore {
    /// Create a new environment variable secret store
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl SecretStore for EnvSecretStore {
    fn name(&self) -> &str {
        "env"
    }

    fn get(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_env_store_name() {
        let store = EnvSecretStore::new();
        assert_eq!(store.name(), "env");
    }

    #[test]
    #[serial]
    fn test_env_store_get_direct() {
        env::set_var("DS_TEST_ENV_STORE_DIRECT", "test_value");

        let store = EnvSecretStore::new();
        assert_eq!(store.get("DS_TEST_ENV_STORE_DIRECT"), Some("test_value".to_string()));

        // Lookups are exact, no case folding
        assert_eq!(store.get("ds_test_env_store_direct"), None);

        env::remove_var("DS_TEST_ENV_STORE_DIRECT");
    }

    #[test]
    #[serial]
    fn test_env_store_empty_value_is_found() {
        env::set_var("DS_TEST_ENV_STORE_EMPTY", "");

        let store = EnvSecretStore::new();
        assert_eq!(store.get("DS_TEST_ENV_STORE_EMPTY"), Some(String::new()));
        assert!(store.has("DS_TEST_ENV_STORE_EMPTY"));

        env::remove_var("DS_TEST_ENV_STORE_EMPTY");
    }

    #[test]
    fn test_env_store_get_not_found() {
        let store = EnvSecretStore::new();
        assert_eq!(store.get("DS_TEST_NONEXISTENT_XYZ"), None);
        assert!(store.read("DS_TEST_NONEXISTENT_XYZ").unwrap_err().is_not_found());
    }
}
