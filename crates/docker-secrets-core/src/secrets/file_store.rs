//! Mounted secret file store
//!
//! Container orchestrators mount each secret as a file named after the
//! secret, e.g. `/var/run/secrets/db_pass`. The file content is the value,
//! usually terminated by a newline.

use std::io;
use std::path::{Path, PathBuf};

use super::traits::{SecretStore, SecretStoreError, SecretStoreResult};
use crate::config::DEFAULT_SECRETS_DIR;

/// Secret store that reads one file per secret from a directory
///
/// Keys are used verbatim as file names; no case conversion happens here.
/// Exactly one trailing `\n` is removed from the content. An empty file is
/// a found value of `""`.
///
/// # Example
///
/// ```no_run
/// use docker_secrets_core::secrets::{SecretStore, FileSecretStore};
///
/// let store = FileSecretStore::new("/run/secrets");
/// let password = store.read("db_pass");
/// ```
#[derive(Debug, Clone)]
pub struct FileSecretStore {
    dir: PathBuf,
}

impl Default for FileSecretStore {
    fn default() -> Self {
        Self::new(DEFAULT_SECRETS_DIR.as_path())
    }
}

impl FileSecretStore {
    /// Create a store rooted at `dir`. The directory need not exist.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory secrets are read from
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The file read for `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }

    /// Async variant of [`SecretStore::read`]
    pub async fn read_async(&self, key: &str) -> SecretStoreResult<String> {
        let path = self.path_for(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(strip_trailing_newline(content)),
            Err(e) => Err(map_io_error(key, path, e)),
        }
    }
}

impl SecretStore for FileSecretStore {
    fn name(&self) -> &str {
        "file"
    }

    fn is_available(&self) -> bool {
        self.dir.is_dir()
    }

    fn get(&self, key: &str) -> Option<String> {
        self.read(key).ok()
    }

    fn read(&self, key: &str) -> SecretStoreResult<String> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(strip_trailing_newline(content)),
            Err(e) => Err(map_io_error(key, path, e)),
        }
    }
}

fn map_io_error(key: &str, path: PathBuf, e: io::Error) -> SecretStoreError {
    if e.kind() == io::ErrorKind::NotFound {
        SecretStoreError::NotFound {
            key: key.to_string(),
        }
    } else {
        SecretStoreError::Io { path, source: e }
    }
}

/// Remove a single trailing `\n`, leaving any other whitespace in place
fn strip_trailing_newline(mut content: String) -> String {
    if content.ends_with('\n') {
        content.pop();
    }
    content
}
