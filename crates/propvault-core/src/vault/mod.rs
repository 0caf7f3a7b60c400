//! Secret vault access
//!
//! - `VaultClient` trait and `SecretBundle`/`VaultError` types
//! - `KeyVaultClient`: Azure SDK `SecretClient`, authenticated from an auth file
//! - `MockVaultClient`: recording in-memory client for tests

mod traits;
pub mod auth;
mod client;
mod mock;

pub use traits::{ClientFactory, SecretBundle, VaultClient, VaultError, VaultResult};
pub use auth::{AuthFile, AZURE_AUTH_LOCATION_VAR};
pub use client::{auth_file_client_factory, KeyVaultClient};
pub use mock::{MockMode, MockVaultClient, SecretRequest};
