//! Azure Key Vault client backed by the Azure SDK

use std::sync::Arc;

use azure_core::credentials::TokenCredential;
use azure_core::error::ErrorKind;
use azure_core::http::StatusCode;
use azure_security_keyvault_secrets::SecretClient;
use tokio::runtime::{Builder, Runtime};

use super::auth::AuthFile;
use super::traits::{ClientFactory, SecretBundle, VaultClient, VaultError, VaultResult};
use crate::logging::file_logger as log;

/// Map an SDK failure to a vault error
///
/// A 404, or the `SecretNotFound` service code, becomes
/// `VaultError::SecretNotFound`; anything else is passed through.
fn map_sdk_error(err: azure_core::Error, secret_name: &str, vault_url: &str) -> VaultError {
    if let ErrorKind::HttpResponse { status, error_code, .. } = err.kind() {
        if *status == StatusCode::NotFound || error_code.as_deref() == Some("SecretNotFound") {
            return VaultError::secret_not_found(secret_name, vault_url);
        }
    }
    VaultError::Sdk(err)
}

/// Synchronous wrapper around the SDK's `SecretClient`
///
/// A `SecretClient` is built per lookup for the requested vault URL; the
/// credential (and the token it caches) is shared between them. Secret
/// values are never cached. `get_secret` blocks on a private current-thread
/// runtime and must not be called from inside another tokio runtime.
pub struct KeyVaultClient {
    credential: Arc<dyn TokenCredential>,
    runtime: Runtime,
}

impl KeyVaultClient {
    pub fn new(credential: Arc<dyn TokenCredential>) -> VaultResult<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(VaultError::Runtime)?;
        Ok(Self { credential, runtime })
    }

    /// Build a client from the file named by `AZURE_AUTH_LOCATION`
    pub fn from_auth_file() -> VaultResult<Self> {
        let auth = AuthFile::from_env()?;
        Self::new(auth.credential()?)
    }
}

impl VaultClient for KeyVaultClient {
    fn get_secret(&self, vault_url: &str, secret_name: &str, version: &str) -> VaultResult<SecretBundle> {
        log::debug("KeyVaultClient", &format!("get_secret('{}') from {}", secret_name, vault_url));

        let client = SecretClient::new(vault_url, self.credential.clone(), None)
            .map_err(|e| VaultError::InvalidUrl(format!("{}: {}", vault_url, e)))?;

        let result = self.runtime.block_on(async {
            client
                .get_secret(secret_name, version, None)
                .await?
                .into_body()
                .await
        });

        match result {
            Ok(secret) => {
                let value = secret.value.unwrap_or_default();
                log::debug("KeyVaultClient", &format!("get_secret('{}') ok, value len={}", secret_name, value.len()));
                Ok(SecretBundle {
                    value,
                    id: secret.id,
                    content_type: secret.content_type,
                })
            }
            Err(e) => {
                let err = map_sdk_error(e, secret_name, vault_url);
                log::warn("KeyVaultClient", &format!("get_secret('{}') failed: {}", secret_name, err));
                Err(err)
            }
        }
    }
}

/// Client factory backed by the Azure auth file
pub fn auth_file_client_factory() -> ClientFactory {
    Arc::new(|| -> VaultResult<Arc<dyn VaultClient>> {
        let client = KeyVaultClient::from_auth_file()?;
        Ok(Arc::new(client))
    })
}
