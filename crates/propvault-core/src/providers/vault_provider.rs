//! Azure Key Vault configuration provider

use std::env;
use std::fmt;
use std::sync::Arc;

use super::traits::{ConfigError, ConfigProvider, ConfigResult};
use crate::logging::file_logger as log;
use crate::vault::{ClientFactory, VaultClient};

/// Environment variable holding the vault's short name
pub const KEY_VAULT_NAME_VAR: &str = "KEY_VAULT_NAME";

/// Build the data-plane URL for a vault short name
pub fn vault_url_for(vault_name: &str) -> String {
    format!("https://{}.vault.azure.net", vault_name)
}

/// Resolves configuration names as secret names in an Azure Key Vault
///
/// The vault is chosen by `KEY_VAULT_NAME`; the resource group does not take
/// part in addressing. Every lookup asks for the latest secret version and
/// goes to the vault, nothing is cached.
pub struct VaultConfigProvider {
    resource_group: String,
    vault_name: String,
    vault_url: String,
    client: Arc<dyn VaultClient>,
}

impl VaultConfigProvider {
    /// Read `KEY_VAULT_NAME` and obtain a client from `client_factory`
    ///
    /// An empty `KEY_VAULT_NAME` is rejected here rather than producing
    /// `https://.vault.azure.net` and failing later at the first lookup.
    ///
    /// # Errors
    /// `ConfigError::MissingVaultName` when the variable is unset or empty,
    /// or whatever the client factory fails with.
    pub fn new(resource_group: &str, client_factory: &ClientFactory) -> ConfigResult<Self> {
        let vault_name = env::var(KEY_VAULT_NAME_VAR)
            .ok()
            .filter(|name| !name.is_empty())
            .ok_or(ConfigError::MissingVaultName)?;
        let client = client_factory()?;
        Ok(Self::with_vault_name(resource_group, vault_name, client))
    }

    /// Construct for an explicit vault name and client
    pub fn with_vault_name(
        resource_group: impl Into<String>,
        vault_name: impl Into<String>,
        client: Arc<dyn VaultClient>,
    ) -> Self {
        let vault_name = vault_name.into();
        let vault_url = vault_url_for(&vault_name);
        log::debug("VaultConfigProvider", &format!("Using vault {}", vault_url));
        Self {
            resource_group: resource_group.into(),
            vault_name,
            vault_url,
            client,
        }
    }

    pub fn vault_url(&self) -> &str {
        &self.vault_url
    }

    pub fn vault_name(&self) -> &str {
        &self.vault_name
    }

    pub fn resource_group(&self) -> &str {
        &self.resource_group
    }
}

impl fmt::Debug for VaultConfigProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VaultConfigProvider")
            .field("resource_group", &self.resource_group)
            .field("vault_name", &self.vault_name)
            .field("vault_url", &self.vault_url)
            .finish()
    }
}

impl ConfigProvider for VaultConfigProvider {
    fn name(&self) -> &str {
        "keyvault"
    }

    fn get_config(&self, name: &str) -> ConfigResult<String> {
        log::debug("VaultConfigProvider", &format!("get_config('{}') from {}", name, self.vault_url));
        let bundle = self.client.get_secret(&self.vault_url, name, "")?;
        Ok(bundle.value)
    }
}
