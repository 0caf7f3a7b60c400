//! Python bindings for propvault via PyO3

use pyo3::create_exception;
use pyo3::exceptions::{PyKeyError, PyRuntimeError};
use pyo3::prelude::*;

use propvault_core::{
    Config as CoreConfig,
    ConfigError as CoreConfigError,
    ConfigProvider as CoreConfigProvider,
    EnvVarConfigProvider as CoreEnvVarConfigProvider,
    ProviderRegistry as CoreProviderRegistry,
    VaultConfigProvider as CoreVaultConfigProvider,
};
use propvault_core::vault::auth_file_client_factory;

create_exception!(propvault, SecretNotFoundError, PyKeyError);

fn to_py_err(err: CoreConfigError) -> PyErr {
    if err.is_secret_not_found() {
        SecretNotFoundError::new_err(err.to_string())
    } else {
        PyRuntimeError::new_err(err.to_string())
    }
}

// ============================================================================
// Config
// ============================================================================

/// Resolves PROP1 and PROP2 through the provider selected by CONFIG_PROVIDER
#[pyclass]
pub struct Config {
    inner: CoreConfig,
}

#[pymethods]
impl Config {
    #[new]
    pub fn new(resource_group: &str) -> PyResult<Self> {
        let inner = CoreConfig::new(resource_group).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    #[getter]
    pub fn prop1(&self) -> String { self.inner.prop1().to_string() }

    #[getter]
    pub fn prop2(&self) -> String { self.inner.prop2().to_string() }

    #[getter]
    pub fn provider(&self) -> String { self.inner.provider().to_string() }

    fn __repr__(&self) -> String {
        format!("Config(provider='{}')", self.inner.provider())
    }
}

// ============================================================================
// Providers
// ============================================================================

#[pyclass]
pub struct EnvVarConfigProvider {
    inner: CoreEnvVarConfigProvider,
}

#[pymethods]
impl EnvVarConfigProvider {
    #[new]
    #[pyo3(signature = (resource_group=None))]
    pub fn new(resource_group: Option<&str>) -> Self {
        Self { inner: CoreEnvVarConfigProvider::new(resource_group.unwrap_or_default()) }
    }

    #[getter]
    pub fn name(&self) -> String { self.inner.name().to_string() }

    pub fn get_config(&self, name: &str) -> PyResult<String> {
        self.inner.get_config(name).map_err(to_py_err)
    }

    fn __repr__(&self) -> String { "EnvVarConfigProvider()".to_string() }
}

#[pyclass]
pub struct VaultConfigProvider {
    inner: CoreVaultConfigProvider,
}

#[pymethods]
impl VaultConfigProvider {
    #[new]
    pub fn new(resource_group: &str) -> PyResult<Self> {
        let inner = CoreVaultConfigProvider::new(resource_group, &auth_file_client_factory())
            .map_err(to_py_err)?;
        Ok(Self { inner })
    }

    #[getter]
    pub fn name(&self) -> String { self.inner.name().to_string() }

    #[getter]
    pub fn vault_url(&self) -> String { self.inner.vault_url().to_string() }

    pub fn get_config(&self, name: &str) -> PyResult<String> {
        self.inner.get_config(name).map_err(to_py_err)
    }

    fn __repr__(&self) -> String {
        format!("VaultConfigProvider(vault_url='{}')", self.inner.vault_url())
    }
}

/// `(token, description)` for every built-in provider
#[pyfunction]
fn list_providers() -> Vec<(String, String)> {
    CoreProviderRegistry::default().list()
}

#[pymodule]
fn propvault(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<Config>()?;
    m.add_class::<EnvVarConfigProvider>()?;
    m.add_class::<VaultConfigProvider>()?;
    m.add_function(wrap_pyfunction!(list_providers, m)?)?;
    m.add("SecretNotFoundError", m.py().get_type::<SecretNotFoundError>())?;
    Ok(())
}
