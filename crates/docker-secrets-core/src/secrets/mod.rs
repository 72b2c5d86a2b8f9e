//! Secret sources
//!
//! This module provides the places a secret can be read from:
//! - `SecretStore` trait shared by every source
//! - `FileSecretStore`: one file per secret under a mount directory
//! - `EnvSecretStore`: process environment variables
//! - `MemorySecretStore`: an injectable map, for tests and embedded hosts

mod traits;
mod file_store;
mod env_store;
mod memory_store;

pub use traits::{SecretStore, SecretStoreError, SecretStoreResult};
pub use file_store::FileSecretStore;
pub use env_store::EnvSecretStore;
pub use memory_store::MemorySecretStore;
