//! Resolver configuration
//!
//! - `ResolverConfig`: the per-call policy defaults (naming, fallback, safety, directory)
//! - `FileConfigProvider`: loads those defaults from a YAML file

mod settings;
mod file;

pub use settings::{ResolverConfig, ConfigError, ConfigResult, DEFAULT_SECRETS_DIR};
pub use file::{FileConfigProvider, ConfigFile};
