//! Python bindings for docker-secrets via PyO3
//!
//! Exposes `get_docker_secret(...)` with the keyword signature Python
//! services already call, backed by the Rust resolver.

use std::path::PathBuf;
use std::sync::OnceLock;

use pyo3::exceptions::{PyFileNotFoundError, PyOSError, PyTypeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyBool, PyString};
use pyo3::IntoPyObjectExt;

use docker_secrets_core::{
    CastTo, SecretError, SecretRequest, SecretResolver, SecretValue, ValueSource,
    DEFAULT_SECRETS_DIR,
};

fn resolver() -> &'static SecretResolver {
    static RESOLVER: OnceLock<SecretResolver> = OnceLock::new();
    RESOLVER.get_or_init(SecretResolver::new)
}

fn to_py_err(err: SecretError) -> PyErr {
    match err {
        SecretError::SecretFileNotFound { .. } => PyFileNotFoundError::new_err(err.to_string()),
        SecretError::Cast(_) => PyValueError::new_err(err.to_string()),
        _ => PyOSError::new_err(err.to_string()),
    }
}

// ============================================================================
// Cast targets
// ============================================================================

/// How a Python `cast_to` argument is applied
enum PyCast<'py> {
    /// No cast, or `bool` with its token rule, handled by the core casts
    Builtin(CastTo),
    /// Anything else, including `str`, `int` and `float`, is called on the raw text
    Callable(Bound<'py, PyAny>),
}

impl<'py> PyCast<'py> {
    /// Never fails: a non-callable target raises `TypeError` when applied,
    /// which safe mode then absorbs like any other cast failure.
    fn classify(py: Python<'py>, cast_to: Option<Bound<'py, PyAny>>) -> Self {
        match cast_to {
            None => PyCast::Builtin(CastTo::Text),
            Some(target) if target.is(&py.get_type::<PyBool>()) => PyCast::Builtin(CastTo::Boolean),
            Some(target) => PyCast::Callable(target),
        }
    }

    fn apply(&self, py: Python<'py>, raw: &str, safe: bool) -> PyResult<Bound<'py, PyAny>> {
        match self {
            PyCast::Builtin(cast) => match cast.cast(raw) {
                Ok(value) => value_to_py(py, value),
                Err(_) if safe => Ok(PyString::new(py, raw).into_any()),
                Err(e) => Err(PyValueError::new_err(e.to_string())),
            },
            PyCast::Callable(f) => match f.call1((raw,)) {
                Ok(value) => Ok(value),
                Err(e)
                    if safe
                        && (e.is_instance_of::<PyTypeError>(py)
                            || e.is_instance_of::<PyValueError>(py)) =>
                {
                    Ok(PyString::new(py, raw).into_any())
                }
                Err(e) => Err(e),
            },
        }
    }
}

fn value_to_py(py: Python<'_>, value: SecretValue) -> PyResult<Bound<'_, PyAny>> {
    match value {
        SecretValue::Text(s) => Ok(PyString::new(py, &s).into_any()),
        SecretValue::Integer(i) => i.into_bound_py_any(py),
        SecretValue::Float(f) => f.into_bound_py_any(py),
        SecretValue::Boolean(b) => b.into_bound_py_any(py),
        SecretValue::Json(v) => py.import("json")?.call_method1("loads", (v.to_string(),)),
    }
}

// ============================================================================
// Resolution metadata
// ============================================================================

/// Where a secret's raw text came from
#[pyclass]
#[derive(Clone)]
pub struct ResolvedSecret {
    /// Raw text before any cast, `None` when nothing was found
    #[pyo3(get)]
    pub value: Option<String>,
    /// One of "file", "env", "default", "unresolved"
    #[pyo3(get)]
    pub source: String,
    /// File path or variable name for "file" and "env"
    #[pyo3(get)]
    pub detail: Option<String>,
}

#[pymethods]
impl ResolvedSecret {
    fn __repr__(&self) -> String {
        match &self.detail {
            Some(detail) => format!("ResolvedSecret(source='{}', detail='{}')", self.source, detail),
            None => format!("ResolvedSecret(source='{}')", self.source),
        }
    }
}

impl ResolvedSecret {
    fn from_core(resolved: docker_secrets_core::ResolvedSecret) -> Self {
        let (source, detail) = match resolved.source {
            ValueSource::SecretFile(path) => ("file", Some(path.display().to_string())),
            ValueSource::Environment(var) => ("env", Some(var)),
            ValueSource::Default => ("default", None),
            ValueSource::Unresolved => ("unresolved", None),
        };
        Self {
            value: resolved.value.map(|v| v.to_string()),
            source: source.to_string(),
            detail,
        }
    }
}

// ============================================================================
// Module Functions
// ============================================================================

fn text_request(
    name: &str,
    autocast_name: bool,
    getenv: bool,
    env_name: Option<String>,
    safe: bool,
    secrets_dir: Option<PathBuf>,
) -> SecretRequest {
    SecretRequest {
        env_name,
        ..SecretRequest::new(name)
            .with_autocast_name(autocast_name)
            .with_getenv(getenv)
            .with_safe(safe)
            .with_secrets_dir(secrets_dir.unwrap_or_else(|| DEFAULT_SECRETS_DIR.clone()))
    }
}

/// Fetch a secret from a mounted secret file or the environment
///
/// Returns `default` unchanged when neither source has a value.
#[pyfunction]
#[pyo3(signature = (
    name,
    default=None,
    cast_to=None,
    autocast_name=true,
    getenv=true,
    env_name=None,
    safe=true,
    secrets_dir=None
))]
#[allow(clippy::too_many_arguments)]
pub fn get_docker_secret<'py>(
    py: Python<'py>,
    name: &str,
    default: Option<Bound<'py, PyAny>>,
    cast_to: Option<Bound<'py, PyAny>>,
    autocast_name: bool,
    getenv: bool,
    env_name: Option<String>,
    safe: bool,
    secrets_dir: Option<PathBuf>,
) -> PyResult<Bound<'py, PyAny>> {
    let request = text_request(name, autocast_name, getenv, env_name, safe, secrets_dir);

    let resolved = py
        .allow_threads(|| resolver().resolve_detailed(&request))
        .map_err(to_py_err)?;

    match (resolved.source, resolved.value) {
        (ValueSource::Default, _) => Ok(default.unwrap_or_else(|| py.None().into_bound(py))),
        (_, Some(raw)) => PyCast::classify(py, cast_to).apply(py, &raw.to_string(), safe),
        (_, None) => Ok(py.None().into_bound(py)),
    }
}

/// Report which source would supply a secret, without casting it
#[pyfunction]
#[pyo3(signature = (
    name,
    autocast_name=true,
    getenv=true,
    env_name=None,
    safe=true,
    secrets_dir=None
))]
pub fn resolve_source(
    py: Python<'_>,
    name: &str,
    autocast_name: bool,
    getenv: bool,
    env_name: Option<String>,
    safe: bool,
    secrets_dir: Option<PathBuf>,
) -> PyResult<ResolvedSecret> {
    let request = text_request(name, autocast_name, getenv, env_name, safe, secrets_dir);
    py.allow_threads(|| resolver().resolve_detailed(&request))
        .map(ResolvedSecret::from_core)
        .map_err(to_py_err)
}

// ============================================================================
// Module Definition
// ============================================================================

#[pymodule]
fn docker_secrets(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ResolvedSecret>()?;

    m.add_function(wrap_pyfunction!(get_docker_secret, m)?)?;
    m.add_function(wrap_pyfunction!(resolve_source, m)?)?;

    m.add("DEFAULT_SECRETS_DIR", DEFAULT_SECRETS_DIR.display().to_string())?;

    Ok(())
}
