//! Configuration providers
//!
//! - `ConfigProvider` trait with the single `get_config` capability
//! - `EnvVarConfigProvider`, `VaultConfigProvider`, `MemoryConfigProvider`
//! - `ProviderRegistry` for choosing a provider by selector token

mod traits;
mod env_provider;
mod vault_provider;
mod memory_provider;
mod registry;

pub use traits::{ConfigProvider, ConfigError, ConfigResult};
pub use env_provider::EnvVarConfigProvider;
pub use vault_provider::{vault_url_for, VaultConfigProvider, KEY_VAULT_NAME_VAR};
pub use memory_provider::MemoryConfigProvider;
pub use registry::{
    read_selector, ProviderConstructor, ProviderDefinition, ProviderKind, ProviderRegistry,
    CONFIG_PROVIDER_VAR,
};
