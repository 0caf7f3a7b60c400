//! Mock vault client for testing
//!
//! Answers from memory and records every request, so callers can check
//! which secrets were fetched and from which vault URL.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use super::traits::{ClientFactory, SecretBundle, VaultClient, VaultError, VaultResult};

/// How the mock answers
#[derive(Debug, Clone)]
pub enum MockMode {
    /// Every secret has the same value
    Fixed(String),
    /// Look the name up; unknown names are not found
    Secrets(HashMap<String, String>),
    /// Every secret is missing
    NotFound,
}

/// A single recorded `get_secret` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretRequest {
    pub vault_url: String,
    pub secret_name: String,
    pub version: String,
}

/// In-memory [`VaultClient`]
#[derive(Debug)]
pub struct MockVaultClient {
    mode: MockMode,
    calls: Mutex<Vec<SecretRequest>>,
}

impl MockVaultClient {
    pub fn new(mode: MockMode) -> Self {
        Self {
            mode,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Return `value` for any secret name
    pub fn fixed(value: impl Into<String>) -> Self {
        Self::new(MockMode::Fixed(value.into()))
    }

    /// Serve exactly the given secrets
    pub fn with_secrets<I, K, V>(secrets: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = secrets
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self::new(MockMode::Secrets(map))
    }

    /// Fail every lookup with `SecretNotFound`
    pub fn not_found() -> Self {
        Self::new(MockMode::NotFound)
    }

    /// Requests received so far, in order
    pub fn calls(&self) -> Vec<SecretRequest> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// A client factory that always hands out this instance
    pub fn factory(self: &Arc<Self>) -> ClientFactory {
        let client = Arc::clone(self);
        Arc::new(move || -> VaultResult<Arc<dyn VaultClient>> { Ok(client.clone()) })
    }
}

impl VaultClient for MockVaultClient {
    fn get_secret(&self, vault_url: &str, secret_name: &str, version: &str) -> VaultResult<SecretBundle> {
        self.calls.lock().push(SecretRequest {
            vault_url: vault_url.to_string(),
            secret_name: secret_name.to_string(),
            version: version.to_string(),
        });

        let value = match &self.mode {
            MockMode::Fixed(value) => Some(value.clone()),
            MockMode::Secrets(map) => map.get(secret_name).cloned(),
            MockMode::NotFound => None,
        };

        value
            .map(SecretBundle::new)
            .ok_or_else(|| VaultError::secret_not_found(secret_name, vault_url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_mode_records_calls() {
        let client = MockVaultClient::fixed("v");
        let bundle = client.get_secret("https://a.vault.azure.net", "X", "").unwrap();
        assert_eq!(bundle.value, "v");
        assert_eq!(
            client.calls(),
            vec![SecretRequest {
                vault_url: "https://a.vault.azure.net".to_string(),
                secret_name: "X".to_string(),
                version: String::new(),
            }]
        );
    }

    #[test]
    fn test_secrets_mode() {
        let client = MockVaultClient::with_secrets([("PROP1", "one")]);
        assert_eq!(client.get_secret("u", "PROP1", "").unwrap().value, "one");
        assert!(client.get_secret("u", "PROP2", "").unwrap_err().is_not_found());
        assert_eq!(client.call_count(), 2);
    }

    #[test]
    fn test_not_found_mode() {
        let client = MockVaultClient::not_found();
        assert!(client.get_secret("u", "anything", "").unwrap_err().is_not_found());
    }

    #[test]
    fn test_factory_shares_instance() {
        let client = Arc::new(MockVaultClient::fixed("v"));
        let factory = client.factory();
        let handed_out = factory().unwrap();
        handed_out.get_secret("u", "X", "").unwrap();
        assert_eq!(client.call_count(), 1);
    }
}
