//! Configuration provider trait

use thiserror::Error;

use crate::vault::VaultError;

/// Errors that can occur while resolving configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("KEY_VAULT_NAME is not set")]
    MissingVaultName,

    #[error(transparent)]
    Vault(#[from] VaultError),

    #[error("Configuration error: {0}")]
    Other(String),
}

impl ConfigError {
    /// Whether the underlying cause is a missing vault secret
    pub fn is_secret_not_found(&self) -> bool {
        matches!(self, ConfigError::Vault(err) if err.is_not_found())
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Resolves a configuration name to a string value
///
/// Implementations:
/// - `EnvVarConfigProvider`: process environment, missing names resolve to `""`
/// - `VaultConfigProvider`: Azure Key Vault secrets, missing names are errors
/// - `MemoryConfigProvider`: fixed values, for tests and embedding
pub trait ConfigProvider: Send + Sync {
    /// Selector token this provider is registered under
    fn name(&self) -> &str;

    /// Resolve `name` to its value
    fn get_config(&self, name: &str) -> ConfigResult<String>;
}
