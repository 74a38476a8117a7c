//! Provider reading process environment variables

use std::env;
use std::fs;

use crate::error::{ConfigError, Result};
use crate::provider::Provider;

/// Configuration provider backed by environment variables.
///
/// With [`with_file_secrets`](EnvProvider::with_file_secrets) enabled, a key
/// that is not set directly is looked up through `{KEY}_FILE`, which names a
/// file holding the value (Kubernetes / Docker secrets). The file content is
/// trimmed.
///
/// **Loading priority:**
/// 1. Direct env var (`{prefix}{key}`)
/// 2. File path from env var (`{prefix}{key}_FILE`), if enabled
///
/// ```
/// use layerconf::{EnvProvider, Provider};
///
/// std::env::set_var("MYAPP_WORKERS", "4");
/// let provider = EnvProvider::new().with_prefix("MYAPP_");
/// assert_eq!(provider.get_float("WORKERS").unwrap(), 4.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EnvProvider {
    prefix: String,
    file_secrets: bool,
}

impl EnvProvider {
    /// Create a provider reading variables named exactly like the key
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend `prefix` to every key before reading the environment
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Fall back to reading the file named by `{KEY}_FILE`
    pub fn with_file_secrets(mut self) -> Self {
        self.file_secrets = true;
        self
    }

    /// Name of the environment variable consulted for `key`
    pub fn var_name(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }
}

impl Provider for EnvProvider {
    fn get_string(&self, key: &str) -> Result<String> {
        let var_name = self.var_name(key);
        if let Ok(value) = env::var(&var_name) {
            return Ok(value);
        }

        if self.file_secrets {
            let file_var_name = format!("{}_FILE", var_name);
            if let Ok(file_path) = env::var(&file_var_name) {
                tracing::debug!(var = %file_var_name, path = %file_path, "reading secret file");
                return fs::read_to_string(&file_path)
                    .map(|s| s.trim().to_string())
                    .map_err(|e| ConfigError::FileRead {
                        name: file_var_name,
                        path: file_path.into(),
                        source: e,
                    });
            }
        }

        Err(ConfigError::key_not_found(key))
    }
}
