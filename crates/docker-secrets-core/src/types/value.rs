//! Resolved secret values

use serde::{Deserialize, Serialize};

/// A secret after it has been cast
///
/// Secrets are read as text. `Text` is also what a failed cast falls back to
/// when the request runs in safe mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SecretValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    Json(serde_json::Value),
}

impl SecretValue {
    /// Borrow the text, if this is a `Text` value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            SecretValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            SecretValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            SecretValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SecretValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            SecretValue::Json(v) => Some(v),
            _ => None,
        }
    }

    /// Short name of the variant, used in log lines
    pub fn kind(&self) -> &'static str {
        match self {
            SecretValue::Boolean(_) => "bool",
            SecretValue::Integer(_) => "int",
            SecretValue::Float(_) => "float",
            SecretValue::Text(_) => "text",
            SecretValue::Json(_) => "json",
        }
    }
}

impl From<&str> for SecretValue {
    fn from(s: &str) -> Self {
        SecretValue::Text(s.to_string())
    }
}

impl From<String> for SecretValue {
    fn from(s: String) -> Self {
        SecretValue::Text(s)
    }
}

impl From<i64> for SecretValue {
    fn from(i: i64) -> Self {
        SecretValue::Integer(i)
    }
}

impl From<f64> for SecretValue {
    fn from(f: f64) -> Self {
        SecretValue::Float(f)
    }
}

impl From<bool> for SecretValue {
    fn from(b: bool) -> Self {
        SecretValue::Boolean(b)
    }
}

impl From<serde_json::Value> for SecretValue {
    fn from(v: serde_json::Value) -> Self {
        SecretValue::Json(v)
    }
}

impl std::fmt::Display for SecretValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SecretValue::Boolean(b) => write!(f, "{}", b),
            SecretValue::Integer(i) => write!(f, "{}", i),
            SecretValue::Float(x) => write!(f, "{}", x),
            SecretValue::Text(s) => write!(f, "{}", s),
            SecretValue::Json(v) => write!(f, "{}", v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        assert_eq!(SecretValue::from("abc").as_str(), Some("abc"));
        assert_eq!(SecretValue::from(42i64).as_i64(), Some(42));
        assert_eq!(SecretValue::from(1.5).as_f64(), Some(1.5));
        assert_eq!(SecretValue::from(true).as_bool(), Some(true));

        // Accessors don't convert between variants
        assert_eq!(SecretValue::from("42").as_i64(), None);
        assert_eq!(SecretValue::from(42i64).as_str(), None);
    }

    #[test]
    fn test_serialize_untagged() {
        let json = serde_json::to_string(&SecretValue::from(7i64)).unwrap();
        assert_eq!(json, "7");

        let json = serde_json::to_string(&SecretValue::from("pw")).unwrap();
        assert_eq!(json, "\"pw\"");
    }

    #[test]
    fn test_deserialize_picks_narrowest_variant() {
        let v: SecretValue = serde_json::from_str("true").unwrap();
        assert_eq!(v, SecretValue::Boolean(true));

        let v: SecretValue = serde_json::from_str("12").unwrap();
        assert_eq!(v, SecretValue::Integer(12));

        let v: SecretValue = serde_json::from_str("\"x\"").unwrap();
        assert_eq!(v, SecretValue::Text("x".to_string()));

        let v: SecretValue = serde_json::from_str("{\"a\":1}").unwrap();
        assert_eq!(v.kind(), "json");
    }

    #[test]
    fn test_display() {
        assert_eq!(SecretValue::from(false).to_string(), "false");
        assert_eq!(SecretValue::from("hunter2").to_string(), "hunter2");
    }
}
