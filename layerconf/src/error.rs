//! Error types for configuration lookups

use std::path::PathBuf;

/// Convenience alias used throughout the crate.
pub type Result<T, E = ConfigError> = std::result::Result<T, E>;

/// Errors that can occur when resolving a configuration value.
///
/// Leaf providers ([`FileProvider`](crate::FileProvider),
/// [`EnvProvider`](crate::EnvProvider), [`MemoryProvider`](crate::MemoryProvider))
/// return the first five kinds as ordinary results. A
/// [`ChainProvider`](crate::ChainProvider) swallows them while it walks its
/// members and only reports one of the two terminal kinds once every member
/// has failed.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The key is absent from the provider.
    #[error("config value with key '{key}' could not be found")]
    KeyNotFound {
        /// Requested key
        key: String,
    },

    /// The value exists but cannot be coerced into the requested type.
    #[error(
        "value '{value}' of key '{key}' cannot be converted to expected type '{type_name}'{}",
        detail(message)
    )]
    TypeConversion {
        /// Requested key
        key: String,
        /// Raw string value found for the key
        value: String,
        /// Target type name, e.g. `"float64"` or `"bool"`
        type_name: String,
        /// Message from the parser or custom deserializer, if it gave one
        message: Option<String>,
    },

    /// A line of a backing file is not of the shape `KEY=VALUE`.
    ///
    /// Aborts the whole load; the file's store is left unpopulated.
    #[error("could not parse line {line_number} '{line}' in '{}'", path.display())]
    Parsing {
        /// Resolved path of the backing file
        path: PathBuf,
        /// 1-based line number
        line_number: usize,
        /// The offending line as read
        line: String,
    },

    /// Reading the backing file failed after it was opened.
    #[error("could not read from file with path '{}'", path.display())]
    Unknown {
        /// Resolved path of the backing file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to read a secret file named by a `{KEY}_FILE` environment variable.
    #[error("Failed to read file '{}' for environment variable '{name}': {source}", path.display())]
    FileRead {
        /// Name of the `{KEY}_FILE` environment variable
        name: String,
        /// Path found in that variable
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Every member of a chain failed to resolve the key.
    #[error(
        "could not resolve config key '{key}': every provider failed (reported at position {position})"
    )]
    Unresolvable {
        /// Requested key
        key: String,
        /// Index of the chain member whose error is reported
        position: usize,
        /// Last error other than a missing key, else the last missing-key error
        #[source]
        source: Box<ConfigError>,
    },

    /// A chain with no members was asked for a key.
    #[error("could not resolve config key '{key}': no providers configured")]
    NoProviders {
        /// Requested key
        key: String,
    },
}

impl ConfigError {
    /// Create a key-not-found error
    pub fn key_not_found(key: impl Into<String>) -> Self {
        Self::KeyNotFound { key: key.into() }
    }

    /// Create a type conversion error with an explicit target type name
    pub fn type_conversion(
        key: impl Into<String>,
        value: impl Into<String>,
        type_name: impl Into<String>,
    ) -> Self {
        Self::TypeConversion {
            key: key.into(),
            value: value.into(),
            type_name: type_name.into(),
            message: None,
        }
    }

    /// Create a type conversion error naming the Rust type `T` and keeping the
    /// parser's message (used by macro-generated code)
    #[doc(hidden)]
    pub fn conversion_to<T>(
        key: impl Into<String>,
        value: impl Into<String>,
        message: impl std::fmt::Display,
    ) -> Self {
        Self::TypeConversion {
            key: key.into(),
            value: value.into(),
            type_name: std::any::type_name::<T>().to_string(),
            message: Some(message.to_string()),
        }
    }

    /// Whether this error means "nobody has a value for this key".
    ///
    /// True for [`KeyNotFound`](Self::KeyNotFound), [`NoProviders`](Self::NoProviders),
    /// and an [`Unresolvable`](Self::Unresolvable) whose cause is itself missing.
    /// A chain only reports a missing cause when no member held an invalid value.
    pub fn is_missing(&self) -> bool {
        match self {
            Self::KeyNotFound { .. } | Self::NoProviders { .. } => true,
            Self::Unresolvable { source, .. } => source.is_missing(),
            _ => false,
        }
    }

    /// Whether this error was raised by an exhausted chain.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Unresolvable { .. } | Self::NoProviders { .. })
    }
}

fn detail(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}
