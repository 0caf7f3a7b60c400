//! Azure auth-file credentials
//!
//! Reads the service principal JSON written by
//! `az ad sp create-for-rbac --sdk-auth` from the path in `AZURE_AUTH_LOCATION`
//! and turns it into an `azure_identity` client-secret credential.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use azure_core::credentials::TokenCredential;
use azure_identity::ClientSecretCredential;
use serde::{Deserialize, Serialize};

use super::traits::{VaultError, VaultResult};
use crate::logging::file_logger as log;

/// Environment variable naming the auth file
pub const AZURE_AUTH_LOCATION_VAR: &str = "AZURE_AUTH_LOCATION";

/// Public-cloud AAD authority
pub const DEFAULT_AUTHORITY: &str = "https://login.microsoftonline.com";

/// Contents of an Azure SDK auth file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthFile {
    pub client_id: String,
    pub client_secret: String,
    pub tenant_id: String,
    #[serde(default)]
    pub subscription_id: Option<String>,
    #[serde(default)]
    pub active_directory_endpoint_url: Option<String>,
    #[serde(default)]
    pub resource_manager_endpoint_url: Option<String>,
}

impl AuthFile {
    /// Load and parse an auth file
    pub fn load(path: impl AsRef<Path>) -> VaultResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| VaultError::AuthFile {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        serde_json::from_str(&content).map_err(|e| VaultError::AuthFile {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Load the auth file named by `AZURE_AUTH_LOCATION`
    pub fn from_env() -> VaultResult<Self> {
        let path = std::env::var_os(AZURE_AUTH_LOCATION_VAR)
            .map(PathBuf::from)
            .ok_or(VaultError::MissingAuthLocation)?;
        log::debug("AuthFile", &format!("Loading auth file from {}", path.display()));
        Self::load(path)
    }

    /// AAD authority, without a trailing slash
    pub fn authority(&self) -> &str {
        self.active_directory_endpoint_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_AUTHORITY)
            .trim_end_matches('/')
    }

    /// Client-secret credential for this service principal
    ///
    /// Tokens are acquired lazily by the SDK and cached inside the
    /// credential until they expire.
    pub fn credential(&self) -> VaultResult<Arc<dyn TokenCredential>> {
        if self.authority() != DEFAULT_AUTHORITY {
            // TODO: pass the authority through ClientSecretCredentialOptions for sovereign clouds
            log::warn(
                "AuthFile",
                &format!("Ignoring authority {}, using {}", self.authority(), DEFAULT_AUTHORITY),
            );
        }

        let credential = ClientSecretCredential::new(
            &self.tenant_id,
            self.client_id.clone(),
            self.client_secret.clone().into(),
            None,
        )
        .map_err(|e| VaultError::Auth(e.to_string()))?;
        Ok(credential)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "clientId": "11111111-1111-1111-1111-111111111111",
        "clientSecret": "hunter2",
        "subscriptionId": "22222222-2222-2222-2222-222222222222",
        "tenantId": "33333333-3333-3333-3333-333333333333",
        "activeDirectoryEndpointUrl": "https://login.microsoftonline.com/",
        "resourceManagerEndpointUrl": "https://management.azure.com/",
        "activeDirectoryGraphResourceId": "https://graph.windows.net/"
    }"#;

    #[test]
    fn test_load_auth_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let auth = AuthFile::load(file.path()).unwrap();
        assert_eq!(auth.client_id, "11111111-1111-1111-1111-111111111111");
        assert_eq!(auth.client_secret, "hunter2");
        assert_eq!(auth.tenant_id, "33333333-3333-3333-3333-333333333333");
        assert_eq!(auth.subscription_id.as_deref(), Some("22222222-2222-2222-2222-222222222222"));
        assert_eq!(auth.authority(), DEFAULT_AUTHORITY);
    }

    #[test]
    fn test_default_authority() {
        let auth: AuthFile = serde_json::from_str(
            r#"{"clientId": "c", "clientSecret": "s", "tenantId": "t"}"#,
        )
        .unwrap();
        assert_eq!(auth.authority(), DEFAULT_AUTHORITY);
    }

    #[test]
    fn test_credential_from_auth_file() {
        let auth: AuthFile = serde_json::from_str(SAMPLE).unwrap();
        assert!(auth.credential().is_ok());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = AuthFile::load(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, VaultError::AuthFile { .. }));
    }

    #[test]
    fn test_load_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();

        let err = AuthFile::load(file.path()).unwrap_err();
        assert!(matches!(err, VaultError::AuthFile { .. }));
    }

    #[test]
    fn test_load_missing_field() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"clientId": "c", "tenantId": "t"}"#).unwrap();

        let err = AuthFile::load(file.path()).unwrap_err();
        assert!(matches!(err, VaultError::AuthFile { ref message, .. } if message.contains("clientSecret")));
    }
}
