//! Cast targets for raw secret text

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use super::value::SecretValue;

/// Tokens accepted by the boolean cast. Only the first two are truthy.
const BOOL_TRUE_TOKENS: [&str; 2] = ["True", "true"];
const BOOL_FALSE_TOKENS: [&str; 3] = ["False", "false", "1"];

/// Raw text could not be converted to the requested type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot cast {value:?} to {target}: {reason}")]
pub struct CastError {
    /// Name of the cast target
    pub target: String,
    /// The raw text that failed to convert
    pub value: String,
    /// Why the conversion failed
    pub reason: String,
}

impl CastError {
    pub fn new(target: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}

pub type CastResult<T> = Result<T, CastError>;

/// User supplied parse function for `CastTo::Custom`
pub type CastFn = Arc<dyn Fn(&str) -> CastResult<SecretValue> + Send + Sync>;

/// The type a raw secret is converted into
///
/// # Example
///
/// ```
/// use docker_secrets_core::types::{CastTo, SecretValue};
///
/// assert_eq!(CastTo::Integer.cast(" 42 ").unwrap(), SecretValue::Integer(42));
/// assert_eq!(CastTo::Boolean.cast("true").unwrap(), SecretValue::Boolean(true));
/// assert!(CastTo::Boolean.cast("yes").is_err());
/// ```
#[derive(Clone, Default)]
pub enum CastTo {
    /// Keep the raw text
    #[default]
    Text,
    /// Base-10 integer, surrounding whitespace ignored
    Integer,
    /// Floating point, surrounding whitespace ignored
    Float,
    /// Exact token match, see [`CastTo::cast`]
    Boolean,
    /// Parse the text as a JSON document
    Json,
    /// Caller supplied conversion
    Custom(CastFn),
}

impl CastTo {
    /// Wrap a closure as a custom cast
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&str) -> CastResult<SecretValue> + Send + Sync + 'static,
    {
        CastTo::Custom(Arc::new(f))
    }

    /// Look up a built-in cast by the name used in config files
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "str" | "text" | "string" => Some(CastTo::Text),
            "int" | "integer" => Some(CastTo::Integer),
            "float" => Some(CastTo::Float),
            "bool" | "boolean" => Some(CastTo::Boolean),
            "json" => Some(CastTo::Json),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CastTo::Text => "text",
            CastTo::Integer => "int",
            CastTo::Float => "float",
            CastTo::Boolean => "bool",
            CastTo::Json => "json",
            CastTo::Custom(_) => "custom",
        }
    }

    /// Convert raw secret text
    ///
    /// The boolean cast accepts exactly `True`, `true`, `False`, `false` and
    /// `1`. Only the first two map to `true`; `1` maps to `false`. Every other
    /// input, including `yes` and surrounding whitespace, is an error.
    pub fn cast(&self, raw: &str) -> CastResult<SecretValue> {
        match self {
            CastTo::Text => Ok(SecretValue::Text(raw.to_string())),
            CastTo::Integer => parse_integer(raw).map(SecretValue::Integer),
            CastTo::Float => raw
                .trim()
                .parse::<f64>()
                .map(SecretValue::Float)
                .map_err(|e| CastError::new(self.name(), raw, e.to_string())),
            CastTo::Boolean => parse_bool(raw).map(SecretValue::Boolean),
            CastTo::Json => serde_json::from_str(raw)
                .map(SecretValue::Json)
                .map_err(|e| CastError::new(self.name(), raw, e.to_string())),
            CastTo::Custom(f) => f(raw),
        }
    }
}

impl fmt::Debug for CastTo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CastTo::{}", self.name())
    }
}

impl PartialEq for CastTo {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CastTo::Custom(a), CastTo::Custom(b)) => Arc::ptr_eq(a, b),
            (a, b) => std::mem::discriminant(a) == std::mem::discriminant(b),
        }
    }
}

fn parse_integer(raw: &str) -> CastResult<i64> {
    let trimmed = raw.trim();

    // Single underscores between digits are accepted as grouping
    let digits = if trimmed.contains('_') {
        let unsigned = trimmed.trim_start_matches(|c: char| c == '+' || c == '-');
        if unsigned.starts_with('_') || unsigned.ends_with('_') || unsigned.contains("__") {
            return Err(CastError::new("int", raw, "misplaced digit separator"));
        }
        trimmed.replace('_', "")
    } else {
        trimmed.to_string()
    };

    digits
        .parse::<i64>()
        .map_err(|e| CastError::new("int", raw, e.to_string()))
}

fn parse_bool(raw: &str) -> CastResult<bool> {
    if BOOL_TRUE_TOKENS.contains(&raw) {
        Ok(true)
    } else if BOOL_FALSE_TOKENS.contains(&raw) {
        Ok(false)
    } else {
        Err(CastError::new("bool", raw, "not a boolean token"))
    }
}
