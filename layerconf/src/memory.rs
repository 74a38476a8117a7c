//! In-memory provider

use std::collections::HashMap;

use crate::error::{ConfigError, Result};
use crate::provider::Provider;

/// Provider holding a fixed key/value map, typically the defaults layer at
/// the bottom of a chain.
///
/// ```
/// use layerconf::{MemoryProvider, Provider};
///
/// let defaults = MemoryProvider::new()
///     .with("PORT", "8080")
///     .with("DEBUG", "false");
/// assert_eq!(defaults.get_float("PORT").unwrap(), 8080.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    values: HashMap<String, String>,
}

impl MemoryProvider {
    /// Create an empty provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a value
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl<K, V> FromIterator<(K, V)> for MemoryProvider
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl Provider for MemoryProvider {
    fn get_string(&self, key: &str) -> Result<String> {
        self.values
            .get(key)
            .cloned()
            .ok_or_else(|| ConfigError::key_not_found(key))
    }
}
