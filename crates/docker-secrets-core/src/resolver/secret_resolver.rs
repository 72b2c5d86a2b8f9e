//! Secret resolution from a mounted file, the environment, or a default
//!
//! Checks sources in priority order:
//! 1. Secret file at `secrets_dir/<name>`
//! 2. Environment variable (when `getenv` is on)
//! 3. The request's default

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use once_cell::sync::Lazy;

use super::error::{SecretError, SecretResult};
use super::request::SecretRequest;
use crate::config::{ConfigResult, FileConfigProvider, ResolverConfig};
use crate::logging::{NoOpLogger, SharedLogger};
use crate::secrets::{EnvSecretStore, FileSecretStore, SecretStore, SecretStoreError, SecretStoreResult};
use crate::types::{CastTo, SecretValue};
use crate::{log_debug, log_warn};

/// Which source supplied a resolved value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueSource {
    /// Read from this secret file
    SecretFile(PathBuf),
    /// Read from this environment variable
    Environment(String),
    /// Nothing found, the request default was returned
    Default,
    /// The file read failed with the environment disabled in safe mode
    Unresolved,
}

impl fmt::Display for ValueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueSource::SecretFile(path) => write!(f, "secret file {}", path.display()),
            ValueSource::Environment(var) => write!(f, "environment variable ${}", var),
            ValueSource::Default => write!(f, "default"),
            ValueSource::Unresolved => write!(f, "unresolved"),
        }
    }
}

/// Result of resolving a secret
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSecret {
    /// The final value, `None` for a null outcome
    pub value: Option<SecretValue>,
    /// Which source provided the value
    pub source: ValueSource,
    /// The cast failed in safe mode and `value` holds the raw text
    pub cast_failed: bool,
}

impl ResolvedSecret {
    fn new(value: Option<SecretValue>, source: ValueSource) -> Self {
        Self {
            value,
            source,
            cast_failed: false,
        }
    }

    /// Raw text read from a file or the environment, before any cast
    pub fn found(&self) -> bool {
        matches!(self.source, ValueSource::SecretFile(_) | ValueSource::Environment(_))
    }
}

/// Resolves single secrets
///
/// Holds no per-lookup state, so one resolver can serve concurrent callers.
/// The environment source is replaceable, which keeps tests and embedded
/// hosts away from the real process environment.
///
/// # Example
///
/// ```no_run
/// use docker_secrets_core::{SecretResolver, SecretRequest, CastTo};
///
/// let resolver = SecretResolver::new();
/// let port = resolver
///     .resolve(&SecretRequest::new("db_port").with_cast(CastTo::Integer))
///     .unwrap();
/// ```
pub struct SecretResolver {
    env_store: Arc<dyn SecretStore>,
    logger: SharedLogger,
    defaults: ResolverConfig,
    default_cast: CastTo,
}

impl Default for SecretResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SecretResolver {
    /// Resolver reading the process environment, with built-in defaults
    pub fn new() -> Self {
        Self {
            env_store: Arc::new(EnvSecretStore::new()),
            logger: Arc::new(NoOpLogger::new()),
            defaults: ResolverConfig::default(),
            default_cast: CastTo::Text,
        }
    }

    /// Resolver whose [`request`](Self::request) seeds from `config`
    pub fn from_config(config: ResolverConfig) -> ConfigResult<Self> {
        let default_cast = config.cast()?;
        Ok(Self {
            defaults: config,
            default_cast,
            ..Self::new()
        })
    }

    /// Resolver configured from a YAML file; a missing file means defaults
    pub fn from_config_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let config = FileConfigProvider::new(path.as_ref()).resolver_config()?;
        Self::from_config(config)
    }

    /// Resolver configured from the user-level config file
    pub fn from_user_config() -> ConfigResult<Self> {
        Self::from_config_file(FileConfigProvider::user().path())
    }

    /// Replace the environment source
    pub fn with_env_store(mut self, store: Arc<dyn SecretStore>) -> Self {
        self.env_store = store;
        self
    }

    pub fn with_logger(mut self, logger: SharedLogger) -> Self {
        self.logger = logger;
        self
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.defaults
    }

    /// A request for `name` using this resolver's configured policy
    pub fn request(&self, name: impl Into<String>) -> SecretRequest {
        SecretRequest {
            cast_to: self.default_cast.clone(),
            autocast_name: self.defaults.autocast_name,
            getenv: self.defaults.getenv,
            safe: self.defaults.safe,
            secrets_dir: self.defaults.secrets_dir.clone(),
            ..SecretRequest::new(name)
        }
    }

    /// Resolve a secret to its final value
    ///
    /// `Ok(None)` means a null outcome: either no source had a value and
    /// the request has no default, or the file read failed with the
    /// environment disabled in safe mode.
    pub fn resolve(&self, request: &SecretRequest) -> SecretResult<Option<SecretValue>> {
        self.resolve_detailed(request).map(|resolved| resolved.value)
    }

    /// Resolve a secret, reporting which source supplied it
    pub fn resolve_detailed(&self, request: &SecretRequest) -> SecretResult<ResolvedSecret> {
        let files = FileSecretStore::new(&request.secrets_dir);
        let file_name = request.secret_file_name();
        let read = files.read(&file_name);
        self.finish(request, files.path_for(&file_name), read)
    }

    /// Async resolve, reading the secret file without blocking the runtime
    pub async fn resolve_async(&self, request: &SecretRequest) -> SecretResult<ResolvedSecret> {
        let files = FileSecretStore::new(&request.secrets_dir);
        let file_name = request.secret_file_name();
        let read = files.read_async(&file_name).await;
        self.finish(request, files.path_for(&file_name), read)
    }

    fn finish(
        &self,
        request: &SecretRequest,
        path: PathBuf,
        read: SecretStoreResult<String>,
    ) -> SecretResult<ResolvedSecret> {
        let env_name = request.effective_env_name();

        let (raw, source) = match read {
            Ok(content) => {
                log_debug!(self.logger, "'{}' read from {}", request.name, path.display());
                (Some(content), ValueSource::SecretFile(path))
            }
            Err(err) => {
                match &err {
                    SecretStoreError::NotFound { .. } => {
                        log_debug!(self.logger, "no secret file at {}", path.display());
                    }
                    other => {
                        log_warn!(self.logger, "secret file for '{}' unreadable: {}", request.name, other);
                    }
                }

                if request.getenv {
                    match self.env_store.get(&env_name) {
                        Some(value) => {
                            log_debug!(self.logger, "'{}' read from ${}", request.name, env_name);
                            (Some(value), ValueSource::Environment(env_name))
                        }
                        None => (None, ValueSource::Default),
                    }
                } else if request.safe {
                    return Ok(ResolvedSecret::new(None, ValueSource::Unresolved));
                } else {
                    return Err(SecretError::from_file_read(err, path));
                }
            }
        };

        let Some(raw) = raw else {
            log_debug!(self.logger, "'{}' not set, using default", request.name);
            return Ok(ResolvedSecret::new(request.default.clone(), ValueSource::Default));
        };

        match request.cast_to.cast(&raw) {
            Ok(value) => Ok(ResolvedSecret::new(Some(value), source)),
            Err(err) if request.safe => {
                log_debug!(
                    self.logger,
                    "'{}' from {} is not a valid {}, returning raw text",
                    request.name,
                    source,
                    err.target
                );
                Ok(ResolvedSecret {
                    value: Some(SecretValue::Text(raw)),
                    source,
                    cast_failed: true,
                })
            }
            Err(err) => Err(SecretError::Cast(err)),
        }
    }
}

impl fmt::Debug for SecretResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretResolver")
            .field("env_store", &self.env_store.name())
            .field("defaults", &self.defaults)
            .finish()
    }
}

static DEFAULT_RESOLVER: Lazy<SecretResolver> = Lazy::new(SecretResolver::new);

/// Resolve with a resolver reading the process environment
pub fn resolve(request: &SecretRequest) -> SecretResult<Option<SecretValue>> {
    DEFAULT_RESOLVER.resolve(request)
}

/// Read a secret as text with every option at its default
///
/// Checks `/var/run/secrets/<name lowercased>`, then `$<NAME UPPERCASED>`.
pub fn get_docker_secret(name: &str) -> Option<String> {
    resolve(&SecretRequest::new(name))
        .ok()
        .flatten()
        .map(|value| value.to_string())
}
