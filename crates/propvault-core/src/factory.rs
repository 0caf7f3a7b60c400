//! `Config`: picks a provider and resolves the two application properties

use crate::logging::file_logger as log;
use crate::providers::{ConfigProvider, ConfigResult, ProviderRegistry};

/// Name of the first resolved property
pub const PROP1: &str = "PROP1";

/// Name of the second resolved property
pub const PROP2: &str = "PROP2";

/// Resolved configuration snapshot
///
/// Construction selects a provider from `CONFIG_PROVIDER`, resolves
/// [`PROP1`] and [`PROP2`] through it and keeps the results. Values are
/// fixed for the lifetime of the object. If any step fails no `Config` is
/// produced and the provider's error is returned unchanged.
///
/// # Example
///
/// ```
/// use propvault_core::{Config, MemoryConfigProvider};
///
/// let provider = MemoryConfigProvider::with_values([("PROP1", "a"), ("PROP2", "b")]);
/// let config = Config::from_provider(&provider).unwrap();
/// assert_eq!(config.prop1(), "a");
/// assert_eq!(config.prop2(), "b");
/// assert_eq!(config.provider(), "memory");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    prop1: String,
    prop2: String,
    provider: String,
}

impl Config {
    /// Resolve with the built-in providers
    ///
    /// The vault provider authenticates from the file named by
    /// `AZURE_AUTH_LOCATION`.
    pub fn new(resource_group: &str) -> ConfigResult<Self> {
        Self::with_registry(resource_group, &ProviderRegistry::default())
    }

    /// Resolve using the providers in `registry`
    pub fn with_registry(resource_group: &str, registry: &ProviderRegistry) -> ConfigResult<Self> {
        let provider = registry.create_from_env(resource_group)?;
        Self::from_provider(provider.as_ref())
    }

    /// Resolve from an already constructed provider
    pub fn from_provider(provider: &dyn ConfigProvider) -> ConfigResult<Self> {
        let prop1 = provider.get_config(PROP1)?;
        let prop2 = provider.get_config(PROP2)?;
        log::info(
            "Config",
            &format!("Resolved {} and {} via '{}'", PROP1, PROP2, provider.name()),
        );

        Ok(Self {
            prop1,
            prop2,
            provider: provider.name().to_string(),
        })
    }

    pub fn prop1(&self) -> &str {
        &self.prop1
    }

    pub fn prop2(&self) -> &str {
        &self.prop2
    }

    /// Selector token of the provider the values came from
    pub fn provider(&self) -> &str {
        &self.provider
    }
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::sync::Arc;

    use super::*;
    use crate::providers::{ConfigError, MemoryConfigProvider, CONFIG_PROVIDER_VAR, KEY_VAULT_NAME_VAR};
    use crate::test_support::ENV_LOCK;
    use crate::vault::{ClientFactory, MockVaultClient, VaultClient, VaultError, VaultResult};

    fn clear_env() {
        for var in [CONFIG_PROVIDER_VAR, KEY_VAULT_NAME_VAR, PROP1, PROP2] {
            env::remove_var(var);
        }
    }

    fn set_props() {
        env::set_var(PROP1, "a");
        env::set_var(PROP2, "b");
    }

    #[test]
    fn test_selector_unset_uses_env() {
        let _guard = ENV_LOCK.lock();
        clear_env();
        set_props();

        let client = Arc::new(MockVaultClient::fixed("secretval"));
        let config = Config::with_registry("resource_group", &ProviderRegistry::new(client.factory())).unwrap();
        assert_eq!(config.prop1(), "a");
        assert_eq!(config.prop2(), "b");
        assert_eq!(config.provider(), "envvar");
        assert_eq!(client.call_count(), 0);

        clear_env();
    }

    #[test]
    fn test_keyvault_selector_uses_vault() {
        let _guard = ENV_LOCK.lock();
        clear_env();
        env::set_var(CONFIG_PROVIDER_VAR, "keyvault");
        env::set_var(KEY_VAULT_NAME_VAR, "mykv");

        let client = Arc::new(MockVaultClient::fixed("secretval"));
        let config = Config::with_registry("resource_group", &ProviderRegistry::new(client.factory())).unwrap();
        assert_eq!(config.prop1(), "secretval");
        assert_eq!(config.prop2(), "secretval");
        assert_eq!(config.provider(), "keyvault");

        let calls = client.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].secret_name, PROP1);
        assert_eq!(calls[1].secret_name, PROP2);
        for call in &calls {
            assert_eq!(call.vault_url, "https://mykv.vault.azure.net");
            assert_eq!(call.version, "");
        }

        clear_env();
    }

    #[test]
    fn test_unknown_selector_behaves_like_unset() {
        let _guard = ENV_LOCK.lock();
        clear_env();
        set_props();

        let client = Arc::new(MockVaultClient::fixed("secretval"));
        let registry = ProviderRegistry::new(client.factory());
        let baseline = Config::with_registry("resource_group", &registry).unwrap();

        for selector in ["bogus", "", "KEYVAULT"] {
            env::set_var(CONFIG_PROVIDER_VAR, selector);
            let config = Config::with_registry("resource_group", &registry).unwrap();
            assert_eq!(config, baseline);
        }
        assert_eq!(client.call_count(), 0);

        clear_env();
    }

    #[test]
    fn test_env_missing_props_are_empty() {
        let _guard = ENV_LOCK.lock();
        clear_env();

        let client = Arc::new(MockVaultClient::fixed("secretval"));
        let config = Config::with_registry("resource_group", &ProviderRegistry::new(client.factory())).unwrap();
        assert_eq!(config.prop1(), "");
        assert_eq!(config.prop2(), "");
    }

    #[test]
    fn test_missing_secret_fails_construction() {
        let _guard = ENV_LOCK.lock();
        clear_env();
        env::set_var(CONFIG_PROVIDER_VAR, "keyvault");
        env::set_var(KEY_VAULT_NAME_VAR, "mykv");

        // PROP1 resolves, PROP2 does not: no partially filled Config
        let client = Arc::new(MockVaultClient::with_secrets([(PROP1, "one")]));
        let result = Config::with_registry("resource_group", &ProviderRegistry::new(client.factory()));
        let err = result.unwrap_err();
        assert!(err.is_secret_not_found());
        assert_eq!(client.call_count(), 2);

        clear_env();
    }

    #[test]
    fn test_first_failure_stops_resolution() {
        let _guard = ENV_LOCK.lock();
        clear_env();
        env::set_var(CONFIG_PROVIDER_VAR, "keyvault");
        env::set_var(KEY_VAULT_NAME_VAR, "mykv");

        let client = Arc::new(MockVaultClient::not_found());
        let err = Config::with_registry("resource_group", &ProviderRegistry::new(client.factory())).unwrap_err();
        assert!(err.is_secret_not_found());
        assert_eq!(client.call_count(), 1);

        clear_env();
    }

    #[test]
    fn test_keyvault_without_vault_name() {
        let _guard = ENV_LOCK.lock();
        clear_env();
        env::set_var(CONFIG_PROVIDER_VAR, "keyvault");

        let client = Arc::new(MockVaultClient::fixed("secretval"));
        let err = Config::with_registry("resource_group", &ProviderRegistry::new(client.factory())).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVaultName));

        clear_env();
    }

    #[test]
    fn test_auth_failure_propagates() {
        let _guard = ENV_LOCK.lock();
        clear_env();
        env::set_var(CONFIG_PROVIDER_VAR, "keyvault");
        env::set_var(KEY_VAULT_NAME_VAR, "mykv");

        let factory: ClientFactory = Arc::new(|| -> VaultResult<Arc<dyn VaultClient>> {
            Err(VaultError::MissingAuthLocation)
        });
        let err = Config::with_registry("resource_group", &ProviderRegistry::new(factory)).unwrap_err();
        assert!(matches!(err, ConfigError::Vault(VaultError::MissingAuthLocation)));

        clear_env();
    }

    #[test]
    fn test_default_registry_without_auth_file() {
        let _guard = ENV_LOCK.lock();
        clear_env();
        env::set_var(CONFIG_PROVIDER_VAR, "keyvault");
        env::set_var(KEY_VAULT_NAME_VAR, "mykv");
        env::remove_var("AZURE_AUTH_LOCATION");

        let err = Config::new("resource_group").unwrap_err();
        assert!(matches!(err, ConfigError::Vault(VaultError::MissingAuthLocation)));

        clear_env();
    }

    #[test]
    fn test_from_provider() {
        let provider = MemoryConfigProvider::with_values([(PROP1, "x")]);
        let config = Config::from_provider(&provider).unwrap();
        assert_eq!(config.prop1(), "x");
        assert_eq!(config.prop2(), "");
        assert_eq!(config.provider(), "memory");
    }
}
