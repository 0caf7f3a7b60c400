//! propvault core
//!
//! Resolves application configuration through a provider chosen at runtime.
//! `CONFIG_PROVIDER` selects the provider:
//! - `envvar` (default, also used for unknown values): process environment
//! - `keyvault`: secrets in the Azure Key Vault named by `KEY_VAULT_NAME`
//!
//! ```no_run
//! use propvault_core::Config;
//!
//! let config = Config::new("my-resource-group")?;
//! println!("{} {}", config.prop1(), config.prop2());
//! # Ok::<(), propvault_core::ConfigError>(())
//! ```
//!
//! The vault client is produced by a [`vault::ClientFactory`], so tests can
//! hand in a [`vault::MockVaultClient`] through a [`ProviderRegistry`].

pub mod logging;
pub mod vault;
pub mod providers;
pub mod factory;

pub use factory::{Config, PROP1, PROP2};

pub use providers::{
    ConfigProvider, ConfigError, ConfigResult,
    EnvVarConfigProvider, VaultConfigProvider, MemoryConfigProvider,
    ProviderKind, ProviderRegistry,
    CONFIG_PROVIDER_VAR, KEY_VAULT_NAME_VAR,
};

pub use vault::{
    VaultClient, VaultError, VaultResult, SecretBundle, ClientFactory,
    KeyVaultClient, MockVaultClient,
};
