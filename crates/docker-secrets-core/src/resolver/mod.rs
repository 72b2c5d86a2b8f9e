//! Secret resolution
//!
//! One lookup reads a mounted secret file, then an environment variable,
//! then falls back to a default, and finally casts the raw text.

mod error;
mod request;
mod secret_resolver;

pub use error::{SecretError, SecretResult};
pub use request::SecretRequest;
pub use secret_resolver::{SecretResolver, ResolvedSecret, ValueSource, resolve, get_docker_secret};
