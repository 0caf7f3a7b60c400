//! Provider registry: maps selector tokens to provider constructors

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use super::env_provider::EnvVarConfigProvider;
use super::traits::{ConfigError, ConfigProvider, ConfigResult};
use super::vault_provider::VaultConfigProvider;
use crate::logging::file_logger as log;
use crate::vault::{auth_file_client_factory, ClientFactory};

/// Environment variable holding the provider selector
pub const CONFIG_PROVIDER_VAR: &str = "CONFIG_PROVIDER";

/// Built-in provider kinds
///
/// Selector tokens are matched exactly. Anything unrecognized, including an
/// empty or unset selector, means [`ProviderKind::EnvVar`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProviderKind {
    #[default]
    EnvVar,
    KeyVault,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 2] = [ProviderKind::EnvVar, ProviderKind::KeyVault];

    /// Selector token for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::EnvVar => "envvar",
            ProviderKind::KeyVault => "keyvault",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ProviderKind::EnvVar => "Read values from process environment variables",
            ProviderKind::KeyVault => "Read values as secrets from the Azure Key Vault named by KEY_VAULT_NAME",
        }
    }

    /// Exact token match
    pub fn parse(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == token)
    }

    /// Map a selector to a kind, defaulting to `EnvVar`
    pub fn from_selector(selector: Option<&str>) -> Self {
        selector.and_then(Self::parse).unwrap_or_default()
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ConfigError::Other(format!("Unknown config provider: {}", s)))
    }
}

/// Current value of `CONFIG_PROVIDER`, if set
pub fn read_selector() -> Option<String> {
    std::env::var(CONFIG_PROVIDER_VAR).ok()
}

/// Builds a provider for a resource group
pub type ProviderConstructor =
    Box<dyn Fn(&str) -> ConfigResult<Arc<dyn ConfigProvider>> + Send + Sync>;

/// A registered provider
pub struct ProviderDefinition {
    /// Selector token
    pub name: String,
    /// Human-readable description
    pub description: String,
    constructor: ProviderConstructor,
}

impl fmt::Debug for ProviderDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderDefinition")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish()
    }
}

/// Selector-token registry
///
/// Starts out with the built-in `envvar` and `keyvault` providers. Extra
/// providers can be registered under new tokens. Each registry is its own
/// value; nothing is shared between registries.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use propvault_core::providers::{ConfigProvider, ConfigResult, MemoryConfigProvider, ProviderRegistry};
/// use propvault_core::vault::MockVaultClient;
///
/// let client = Arc::new(MockVaultClient::fixed("secret"));
/// let mut registry = ProviderRegistry::new(client.factory());
/// registry.register(
///     "memory",
///     "Fixed values",
///     Box::new(|_rg: &str| -> ConfigResult<Arc<dyn ConfigProvider>> {
///         Ok(Arc::new(MemoryConfigProvider::with_values([("PROP1", "a")])))
///     }),
/// );
///
/// let provider = registry.create(Some("memory"), "rg").unwrap();
/// assert_eq!(provider.get_config("PROP1").unwrap(), "a");
/// ```
#[derive(Debug)]
pub struct ProviderRegistry {
    providers: HashMap<String, ProviderDefinition>,
}

impl ProviderRegistry {
    /// Registry with the built-in providers; the vault provider obtains its
    /// client from `client_factory`
    pub fn new(client_factory: ClientFactory) -> Self {
        let mut registry = Self {
            providers: HashMap::new(),
        };

        registry.register(
            ProviderKind::EnvVar.as_str(),
            ProviderKind::EnvVar.description(),
            Box::new(|resource_group: &str| -> ConfigResult<Arc<dyn ConfigProvider>> {
                Ok(Arc::new(EnvVarConfigProvider::new(resource_group)))
            }),
        );

        registry.register(
            ProviderKind::KeyVault.as_str(),
            ProviderKind::KeyVault.description(),
            Box::new(move |resource_group: &str| -> ConfigResult<Arc<dyn ConfigProvider>> {
                Ok(Arc::new(VaultConfigProvider::new(resource_group, &client_factory)?))
            }),
        );

        registry
    }

    /// Register a provider, replacing any previous one with the same token
    pub fn register(&mut self, name: &str, description: &str, constructor: ProviderConstructor) {
        self.providers.insert(
            name.to_string(),
            ProviderDefinition {
                name: name.to_string(),
                description: description.to_string(),
                constructor,
            },
        );
    }

    /// Remove a provider
    ///
    /// The fallback `envvar` provider cannot be removed.
    pub fn unregister(&mut self, name: &str) -> bool {
        if name == ProviderKind::default().as_str() {
            return false;
        }
        self.providers.remove(name).is_some()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.providers.contains_key(name)
    }

    /// `(token, description)` pairs sorted by token
    pub fn list(&self) -> Vec<(String, String)> {
        let mut entries: Vec<_> = self
            .providers
            .values()
            .map(|def| (def.name.clone(), def.description.clone()))
            .collect();
        entries.sort();
        entries
    }

    /// Token that `selector` resolves to in this registry
    pub fn resolve<'a>(&'a self, selector: Option<&'a str>) -> &'a str {
        match selector {
            Some(token) if self.contains(token) => token,
            Some(token) => {
                log::warn("ProviderRegistry", &format!("Unknown provider '{}', using envvar", token));
                ProviderKind::default().as_str()
            }
            None => ProviderKind::default().as_str(),
        }
    }

    /// Build the provider for `selector`, falling back to `envvar`
    pub fn create(&self, selector: Option<&str>, resource_group: &str) -> ConfigResult<Arc<dyn ConfigProvider>> {
        let token = self.resolve(selector);
        log::debug("ProviderRegistry", &format!("Creating provider '{}' for resource group '{}'", token, resource_group));

        match self.providers.get(token) {
            Some(def) => (def.constructor)(resource_group),
            None => Ok(Arc::new(EnvVarConfigProvider::new(resource_group))),
        }
    }

    /// Build the provider selected by `CONFIG_PROVIDER`
    pub fn create_from_env(&self, resource_group: &str) -> ConfigResult<Arc<dyn ConfigProvider>> {
        self.create(read_selector().as_deref(), resource_group)
    }
}

impl Default for ProviderRegistry {
    /// Built-in providers with the auth-file vault client
    fn default() -> Self {
        Self::new(auth_file_client_factory())
    }
}
