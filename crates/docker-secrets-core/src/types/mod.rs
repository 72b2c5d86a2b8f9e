//! Core value and cast types
//!
//! A resolved secret is raw text until it is cast. These types describe
//! what a secret can become and how the conversion is done.

mod value;
mod cast;

pub use value::SecretValue;
pub use cast::{CastTo, CastError, CastFn, CastResult};
