//! Resolver error types

use std::path::PathBuf;

use thiserror::Error;

use crate::secrets::SecretStoreError;
use crate::types::CastError;

/// Errors surfaced by a lookup running with `safe` disabled
#[derive(Error, Debug)]
pub enum SecretError {
    /// No secret file, and the environment fallback is disabled
    #[error("Secret file not found: {}", .path.display())]
    SecretFileNotFound { path: PathBuf },

    /// The secret file exists but could not be read
    #[error("Cannot read secret file {}: {source}", .path.display())]
    SecretFileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The raw value could not be cast
    #[error(transparent)]
    Cast(#[from] CastError),
}

impl SecretError {
    /// Build the error for a failed secret file read at `path`
    pub(crate) fn from_file_read(err: SecretStoreError, path: PathBuf) -> Self {
        match err {
            SecretStoreError::NotFound { .. } => SecretError::SecretFileNotFound { path },
            SecretStoreError::Io { path, source } => SecretError::SecretFileUnreadable { path, source },
            SecretStoreError::Other(message) => SecretError::SecretFileUnreadable {
                path,
                source: std::io::Error::new(std::io::ErrorKind::Other, message),
            },
        }
    }

    /// Whether this is an I/O failure (missing or unreadable file)
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            SecretError::SecretFileNotFound { .. } | SecretError::SecretFileUnreadable { .. }
        )
    }

    pub fn is_cast(&self) -> bool {
        matches!(self, SecretError::Cast(_))
    }
}

pub type SecretResult<T> = Result<T, SecretError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_from_file_read() {
        let path = PathBuf::from("/var/run/secrets/db_pass");

        let not_found = SecretStoreError::NotFound { key: "db_pass".to_string() };
        let err = SecretError::from_file_read(not_found, path.clone());
        assert!(matches!(err, SecretError::SecretFileNotFound { ref path } if path.ends_with("db_pass")));
        assert!(err.is_io());

        let denied = SecretStoreError::Io {
            path: path.clone(),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        };
        let err = SecretError::from_file_read(denied, path.clone());
        assert!(matches!(err, SecretError::SecretFileUnreadable { .. }));
        assert!(err.is_io());
        assert!(!err.is_cast());

        let other = SecretStoreError::Other("backend offline".to_string());
        let err = SecretError::from_file_read(other, path);
        assert!(matches!(err, SecretError::SecretFileUnreadable { ref source, .. } if source.to_string() == "backend offline"));
    }

    #[test]
    fn test_cast_error_is_transparent() {
        let err: SecretError = CastError::new("int", "abc", "invalid digit found in string").into();
        assert!(err.is_cast());
        assert_eq!(
            err.to_string(),
            "cannot cast \"abc\" to int: invalid digit found in string"
        );
    }
}
