//! In-memory configuration provider

use std::collections::HashMap;

use parking_lot::RwLock;

use super::traits::{ConfigProvider, ConfigResult};

/// Configuration provider backed by a map
///
/// Behaves like the environment provider: unknown names resolve to `""`.
/// Useful in tests and when a host application already holds its settings.
///
/// # Example
///
/// ```
/// use propvault_core::providers::{ConfigProvider, MemoryConfigProvider};
///
/// let provider = MemoryConfigProvider::new();
/// provider.set("PROP1", "a");
/// assert_eq!(provider.get_config("PROP1").unwrap(), "a");
/// assert_eq!(provider.get_config("PROP2").unwrap(), "");
/// ```
#[derive(Debug, Default)]
pub struct MemoryConfigProvider {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryConfigProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a provider with initial values
    pub fn with_values<I, K, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = values
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            values: RwLock::new(map),
        }
    }

    pub fn set(&self, name: &str, value: &str) {
        self.values.write().insert(name.to_string(), value.to_string());
    }

    pub fn remove(&self, name: &str) {
        self.values.write().remove(name);
    }

    pub fn len(&self) -> usize {
        self.values.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ConfigProvider for MemoryConfigProvider {
    fn name(&self) -> &str {
        "memory"
    }

    fn get_config(&self, name: &str) -> ConfigResult<String> {
        Ok(self.values.read().get(name).cloned().unwrap_or_default())
    }
}
