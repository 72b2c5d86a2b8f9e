//! docker-secrets core
//!
//! Resolves a single named configuration value for containerized services
//! that receive sensitive settings either as orchestrator-mounted secret
//! files or as environment variables.
//!
//! ## Resolution order
//!
//! 1. The file `secrets_dir/<name>` (name lowercased by default), with one
//!    trailing newline removed
//! 2. The environment variable `<env_name or name>` (uppercased by default)
//! 3. The request's default, returned as-is
//!
//! The raw text is then cast. In safe mode (the default) a failed cast
//! returns the raw text and I/O failures never surface.
//!
//! ```rust,no_run
//! use docker_secrets_core::{SecretResolver, SecretRequest, CastTo, SecretValue};
//!
//! let resolver = SecretResolver::new();
//!
//! let password = resolver.resolve(&SecretRequest::new("db_pass"))?;
//!
//! let port = resolver.resolve(
//!     &SecretRequest::new("db_port")
//!         .with_cast(CastTo::Integer)
//!         .with_default(5432i64),
//! )?;
//! assert!(matches!(port, Some(SecretValue::Integer(_))));
//! # Ok::<(), docker_secrets_core::SecretError>(())
//! ```

pub mod types;
pub mod secrets;
pub mod logging;
pub mod config;
pub mod resolver;

// Re-export commonly used types
pub use types::{SecretValue, CastTo, CastError};

pub use secrets::{
    SecretStore, SecretStoreError, SecretStoreResult,
    FileSecretStore, EnvSecretStore, MemorySecretStore,
};

pub use logging::{Logger, NoOpLogger, ConsoleLogger};

pub use config::{ResolverConfig, FileConfigProvider, ConfigError, DEFAULT_SECRETS_DIR};

pub use resolver::{
    SecretResolver, SecretRequest, ResolvedSecret, ValueSource,
    SecretError, SecretResult,
    resolve, get_docker_secret,
};
