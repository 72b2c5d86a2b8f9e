//! Resolver settings and their defaults

use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::types::CastTo;

/// Conventional container secret mount, `/var/run/secrets` on POSIX roots
pub static DEFAULT_SECRETS_DIR: Lazy<PathBuf> =
    Lazy::new(|| filesystem_root().join("var").join("run").join("secrets"));

fn filesystem_root() -> PathBuf {
    std::env::current_dir()
        .ok()
        .and_then(|cwd| cwd.ancestors().last().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from(std::path::MAIN_SEPARATOR_STR))
}

/// Errors that can occur while loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Unknown cast type: {0}")]
    UnknownCast(String),

    #[error("Configuration error: {0}")]
    Other(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Default lookup policy applied to requests created by a resolver
///
/// Every field is optional in YAML; missing fields take the defaults below.
///
/// ```yaml
/// autocast_name: true
/// getenv: true
/// safe: true
/// secrets_dir: /var/run/secrets
/// cast_to: str
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Lowercase file names and uppercase env var names
    pub autocast_name: bool,
    /// Fall back to an environment variable when the file can't be read
    pub getenv: bool,
    /// Return best-effort values instead of errors
    pub safe: bool,
    /// Directory holding one file per secret
    pub secrets_dir: PathBuf,
    /// Built-in cast name (`str`, `int`, `float`, `bool`, `json`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cast_to: Option<String>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            autocast_name: true,
            getenv: true,
            safe: true,
            secrets_dir: DEFAULT_SECRETS_DIR.clone(),
            cast_to: None,
        }
    }
}

impl ResolverConfig {
    /// Parse a config from YAML text
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// The configured cast, `Text` when none is set
    pub fn cast(&self) -> ConfigResult<CastTo> {
        match &self.cast_to {
            None => Ok(CastTo::Text),
            Some(name) => {
                CastTo::from_name(name).ok_or_else(|| ConfigError::UnknownCast(name.clone()))
            }
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.secrets_dir.as_os_str().is_empty() {
            return Err(ConfigError::Other("secrets_dir must not be empty".to_string()));
        }
        self.cast().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_secrets_dir() {
        assert!(DEFAULT_SECRETS_DIR.is_absolute());
        assert!(DEFAULT_SECRETS_DIR.ends_with("var/run/secrets"));
        #[cfg(unix)]
        assert_eq!(DEFAULT_SECRETS_DIR.as_path(), Path::new("/var/run/secrets"));
    }

    #[test]
    fn test_defaults() {
        let config = ResolverConfig::default();
        assert!(config.autocast_name);
        assert!(config.getenv);
        assert!(config.safe);
        assert_eq!(config.secrets_dir, *DEFAULT_SECRETS_DIR);
        assert_eq!(config.cast().unwrap(), CastTo::Text);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = ResolverConfig::from_yaml_str("safe: false\ncast_to: int\n").unwrap();
        assert!(!config.safe);
        assert!(config.getenv);
        assert!(config.autocast_name);
        assert_eq!(config.cast().unwrap(), CastTo::Integer);
    }

    #[test]
    fn test_unknown_cast_is_rejected() {
        let err = ResolverConfig::from_yaml_str("cast_to: decimal\n").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownCast(ref n) if n == "decimal"));
    }

    #[test]
    fn test_empty_secrets_dir_is_rejected() {
        let err = ResolverConfig::from_yaml_str("secrets_dir: ''\n").unwrap_err();
        assert!(matches!(err, ConfigError::Other(_)));
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(matches!(
            ResolverConfig::from_yaml_str("safe: [unclosed"),
            Err(ConfigError::Yaml(_))
        ));
    }
}
