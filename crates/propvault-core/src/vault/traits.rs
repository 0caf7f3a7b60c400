//! Core traits and types for secret vault access

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A secret as returned by the vault
///
/// Mirrors the Key Vault `SecretBundle` JSON shape; only the fields this
/// crate reads are modeled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretBundle {
    /// The secret payload
    pub value: String,
    /// Full secret identifier, including the version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Content type hint set by whoever wrote the secret
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

impl SecretBundle {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            id: None,
            content_type: None,
        }
    }
}

/// Errors that can occur while talking to the vault
#[derive(Error, Debug)]
pub enum VaultError {
    #[error("Secret not found: {name} in {vault_url}")]
    SecretNotFound { name: String, vault_url: String },

    #[error("AZURE_AUTH_LOCATION is not set")]
    MissingAuthLocation,

    #[error("Invalid auth file {path}: {message}")]
    AuthFile { path: String, message: String },

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Key Vault API error ({status}) {code}: {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    #[error("Invalid vault URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),

    #[error("Key Vault error: {0}")]
    Sdk(#[from] azure_core::Error),
}

impl VaultError {
    pub fn secret_not_found(name: impl Into<String>, vault_url: impl Into<String>) -> Self {
        Self::SecretNotFound {
            name: name.into(),
            vault_url: vault_url.into(),
        }
    }

    /// Whether this is the "secret does not exist" case
    pub fn is_not_found(&self) -> bool {
        matches!(self, VaultError::SecretNotFound { .. })
    }
}

pub type VaultResult<T> = Result<T, VaultError>;

/// Client for a secret vault service
///
/// `version` selects a specific secret version; an empty string means the
/// latest version.
pub trait VaultClient: Send + Sync {
    /// Fetch a secret by name
    ///
    /// Returns `VaultError::SecretNotFound` when the vault has no secret with
    /// that name.
    fn get_secret(&self, vault_url: &str, secret_name: &str, version: &str) -> VaultResult<SecretBundle>;
}

/// Produces an authenticated vault client
///
/// The vault provider calls this once per construction. Swap it out to run
/// without real credentials.
pub type ClientFactory = Arc<dyn Fn() -> VaultResult<Arc<dyn VaultClient>> + Send + Sync>;
