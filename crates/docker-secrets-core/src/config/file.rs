//! File-based configuration (YAML)
//!
//! User-level config lives at `<config dir>/docker-secrets/config.yaml`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::settings::{ConfigResult, ResolverConfig};

/// Configuration file structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Resolver defaults
    #[serde(default)]
    pub resolver: ResolverConfig,
}

/// File-based configuration provider
///
/// A missing file is not an error; it yields the built-in defaults.
///
/// # Example
///
/// ```no_run
/// use docker_secrets_core::config::FileConfigProvider;
///
/// let config = FileConfigProvider::user().resolver_config().unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct FileConfigProvider {
    path: PathBuf,
}

impl FileConfigProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// User-level config provider (~/.config/docker-secrets/config.yaml on Linux)
    pub fn user() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".config"));
        Self::new(config_dir.join("docker-secrets").join("config.yaml"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Load the whole config file
    pub fn load(&self) -> ConfigResult<ConfigFile> {
        if !self.path.exists() {
            return Ok(ConfigFile::default());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(ConfigFile::default());
        }

        let file: ConfigFile = serde_yaml::from_str(&content)?;
        file.resolver.validate()?;
        Ok(file)
    }

    /// Load only the resolver section
    pub fn resolver_config(&self) -> ConfigResult<ResolverConfig> {
        self.load().map(|file| file.resolver)
    }
}
