//! The lookup bundle for a single resolution

use std::path::PathBuf;

use crate::config::{ConfigResult, ResolverConfig};
use crate::types::{CastTo, SecretValue};

/// Everything one lookup needs
///
/// Built fluently from a name; every other field starts at its default:
/// no default value, text cast, name autocasting, environment fallback and
/// safe mode on, secrets under [`DEFAULT_SECRETS_DIR`](crate::config::DEFAULT_SECRETS_DIR).
///
/// # Example
///
/// ```
/// use docker_secrets_core::{SecretRequest, CastTo, SecretValue};
///
/// let request = SecretRequest::new("Db_Port")
///     .with_default(5432i64)
///     .with_cast(CastTo::Integer)
///     .with_secrets_dir("/run/secrets");
///
/// assert_eq!(request.secret_file_name(), "db_port");
/// assert_eq!(request.effective_env_name(), "DB_PORT");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SecretRequest {
    /// Logical secret name
    pub name: String,
    /// Returned uncast when no source has a value
    pub default: Option<SecretValue>,
    /// Target type for the raw text
    pub cast_to: CastTo,
    /// Lowercase the file name, uppercase the env var name
    pub autocast_name: bool,
    /// Consult the environment when the file can't be read
    pub getenv: bool,
    /// Env var to read instead of `name`
    pub env_name: Option<String>,
    /// Return best-effort values instead of errors
    pub safe: bool,
    /// Directory holding one file per secret
    pub secrets_dir: PathBuf,
}

impl SecretRequest {
    pub fn new(name: impl Into<String>) -> Self {
        let defaults = ResolverConfig::default();
        Self {
            name: name.into(),
            default: None,
            cast_to: CastTo::Text,
            autocast_name: defaults.autocast_name,
            getenv: defaults.getenv,
            env_name: None,
            safe: defaults.safe,
            secrets_dir: defaults.secrets_dir,
        }
    }

    /// A request whose policy fields come from `config`
    pub fn from_config(name: impl Into<String>, config: &ResolverConfig) -> ConfigResult<Self> {
        Ok(Self {
            name: name.into(),
            default: None,
            cast_to: config.cast()?,
            autocast_name: config.autocast_name,
            getenv: config.getenv,
            env_name: None,
            safe: config.safe,
            secrets_dir: config.secrets_dir.clone(),
        })
    }

    pub fn with_default(mut self, default: impl Into<SecretValue>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_cast(mut self, cast_to: CastTo) -> Self {
        self.cast_to = cast_to;
        self
    }

    pub fn with_autocast_name(mut self, autocast_name: bool) -> Self {
        self.autocast_name = autocast_name;
        self
    }

    pub fn with_getenv(mut self, getenv: bool) -> Self {
        self.getenv = getenv;
        self
    }

    pub fn with_env_name(mut self, env_name: impl Into<String>) -> Self {
        self.env_name = Some(env_name.into());
        self
    }

    pub fn with_safe(mut self, safe: bool) -> Self {
        self.safe = safe;
        self
    }

    pub fn with_secrets_dir(mut self, secrets_dir: impl Into<PathBuf>) -> Self {
        self.secrets_dir = secrets_dir.into();
        self
    }

    /// File name looked up under `secrets_dir`
    pub fn secret_file_name(&self) -> String {
        if self.autocast_name {
            self.name.to_lowercase()
        } else {
            self.name.clone()
        }
    }

    /// Env var consulted when `getenv` is on
    ///
    /// An empty override counts as no override.
    pub fn effective_env_name(&self) -> String {
        let env_name = match self.env_name.as_deref() {
            Some(n) if !n.is_empty() => n,
            _ => self.name.as_str(),
        };
        if self.autocast_name {
            env_name.to_uppercase()
        } else {
            env_name.to_string()
        }
    }

    /// Full path of the secret file
    pub fn secret_path(&self) -> PathBuf {
        self.secrets_dir.join(self.secret_file_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_SECRETS_DIR;

    #[test]
    fn test_defaults() {
        let request = SecretRequest::new("db_pass");
        assert_eq!(request.default, None);
        assert_eq!(request.cast_to, CastTo::Text);
        assert!(request.autocast_name);
        assert!(request.getenv);
        assert!(request.safe);
        assert_eq!(request.env_name, None);
        assert_eq!(request.secrets_dir, *DEFAULT_SECRETS_DIR);
    }

    #[test]
    fn test_autocast_names() {
        let request = SecretRequest::new("Db_Pass").with_secrets_dir("/secrets");
        assert_eq!(request.secret_file_name(), "db_pass");
        assert_eq!(request.effective_env_name(), "DB_PASS");
        assert_eq!(request.secret_path(), PathBuf::from("/secrets/db_pass"));
    }

    #[test]
    fn test_names_without_autocast() {
        let request = SecretRequest::new("Db_Pass").with_autocast_name(false);
        assert_eq!(request.secret_file_name(), "Db_Pass");
        assert_eq!(request.effective_env_name(), "Db_Pass");
    }

    #[test]
    fn test_env_name_override() {
        let request = SecretRequest::new("db_pass").with_env_name("postgres_password");
        assert_eq!(request.secret_file_name(), "db_pass");
        assert_eq!(request.effective_env_name(), "POSTGRES_PASSWORD");

        let request = request.with_autocast_name(false);
        assert_eq!(request.effective_env_name(), "postgres_password");

        let empty = SecretRequest::new("db_pass").with_env_name("");
        assert_eq!(empty.effective_env_name(), "DB_PASS");
    }

    #[test]
    fn test_env_name_computed_even_without_getenv() {
        let request = SecretRequest::new("token").with_getenv(false);
        assert_eq!(request.effective_env_name(), "TOKEN");
    }

    #[test]
    fn test_from_config() {
        let config = ResolverConfig {
            autocast_name: false,
            getenv: false,
            safe: false,
            secrets_dir: PathBuf::from("/run/secrets"),
            cast_to: Some("float".to_string()),
        };
        let request = SecretRequest::from_config("ratio", &config).unwrap();
        assert_eq!(request.cast_to, CastTo::Float);
        assert!(!request.autocast_name);
        assert!(!request.getenv);
        assert!(!request.safe);
        assert_eq!(request.secret_path(), PathBuf::from("/run/secrets/ratio"));
    }
}
