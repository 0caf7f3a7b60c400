//! Environment variable configuration provider

use std::env;

use super::traits::{ConfigProvider, ConfigResult};

/// Reads configuration values straight from the process environment
///
/// Lookups never fail: a variable that is unset (or not valid unicode)
/// resolves to an empty string.
///
/// # Example
///
/// ```
/// use propvault_core::providers::{ConfigProvider, EnvVarConfigProvider};
///
/// let provider = EnvVarConfigProvider::new("my-resource-group");
/// assert_eq!(provider.get_config("SURELY_NOT_SET_ANYWHERE_42").unwrap(), "");
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvVarConfigProvider {
    _private: (),
}

impl EnvVarConfigProvider {
    /// The resource group is accepted for symmetry with the vault provider
    pub fn new(_resource_group: &str) -> Self {
        Self { _private: () }
    }
}

impl ConfigProvider for EnvVarConfigProvider {
    fn name(&self) -> &str {
        "envvar"
    }

    fn get_config(&self, name: &str) -> ConfigResult<String> {
        Ok(env::var(name).unwrap_or_default())
    }
}
