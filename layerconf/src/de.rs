//! Field loaders used by `#[derive(LayerConf)]`

use std::fmt::Display;

use crate::error::{ConfigError, Result};
use crate::provider::Provider;

/// Types a derived struct field can be loaded as.
///
/// `String`, `f64` and `bool` map directly onto the three provider lookups so
/// a chain can skip members whose value has the wrong type. Other numeric
/// types are read as strings and parsed with `FromStr`.
pub trait FromConfigValue: Sized {
    /// Load `key` from `provider` as `Self`.
    fn load(provider: &dyn Provider, key: &str) -> Result<Self>;
}

impl FromConfigValue for String {
    fn load(provider: &dyn Provider, key: &str) -> Result<Self> {
        provider.get_string(key)
    }
}

impl FromConfigValue for f64 {
    fn load(provider: &dyn Provider, key: &str) -> Result<Self> {
        provider.get_float(key)
    }
}

impl FromConfigValue for bool {
    fn load(provider: &dyn Provider, key: &str) -> Result<Self> {
        provider.get_bool(key)
    }
}

macro_rules! from_str_value {
    ($($ty:ty),*) => {
        $(
            impl FromConfigValue for $ty {
                fn load(provider: &dyn Provider, key: &str) -> Result<Self> {
                    let raw = provider.get_string(key)?;
                    raw.parse::<$ty>()
                        .map_err(|e| ConfigError::conversion_to::<$ty>(key, raw, e))
                }
            }
        )*
    };
}

from_str_value!(f32, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

/// Load a required value
///
/// Used by the derive macro for fields without default values.
#[doc(hidden)]
pub fn deserialize_required<T: FromConfigValue>(provider: &dyn Provider, key: &str) -> Result<T> {
    T::load(provider, key)
}

/// Load a value, falling back to `default` when the key is missing
///
/// Used by the derive macro for fields with default values.
#[doc(hidden)]
pub fn deserialize_with_default<T: FromConfigValue>(
    provider: &dyn Provider,
    key: &str,
    default: T,
) -> Result<T> {
    match T::load(provider, key) {
        Ok(value) => Ok(value),
        Err(e) if e.is_missing() => Ok(default),
        Err(e) => Err(e),
    }
}

/// Load an optional value
///
/// Returns `None` if the key is missing, `Some(T)` if it is present.
/// Used by the derive macro for `Option<T>` fields.
#[doc(hidden)]
pub fn deserialize_optional<T: FromConfigValue>(
    provider: &dyn Provider,
    key: &str,
) -> Result<Option<T>> {
    match T::load(provider, key) {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_missing() => Ok(None),
        Err(e) => Err(e),
    }
}

/// Load a string value and convert it with a custom function
///
/// Used by the derive macro for fields with a `deserializer` attribute.
#[doc(hidden)]
pub fn deserialize_with<T, E, F>(provider: &dyn Provider, key: &str, f: F) -> Result<T>
where
    F: FnOnce(&str) -> std::result::Result<T, E>,
    E: Display,
{
    let raw = provider.get_string(key)?;
    convert(key, raw, f)
}

/// Optional counterpart of [`deserialize_with`]
#[doc(hidden)]
pub fn deserialize_optional_with<T, E, F>(
    provider: &dyn Provider,
    key: &str,
    f: F,
) -> Result<Option<T>>
where
    F: FnOnce(&str) -> std::result::Result<T, E>,
    E: Display,
{
    match provider.get_string(key) {
        Ok(raw) => convert(key, raw, f).map(Some),
        Err(e) if e.is_missing() => Ok(None),
        Err(e) => Err(e),
    }
}

fn convert<T, E, F>(key: &str, raw: String, f: F) -> Result<T>
where
    F: FnOnce(&str) -> std::result::Result<T, E>,
    E: Display,
{
    f(&raw).map_err(|e| ConfigError::conversion_to::<T>(key, raw.clone(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ChainProvider, MemoryProvider};

    fn provider() -> MemoryProvider {
        MemoryProvider::new()
            .with("PORT", "8080")
            .with("RATIO", "0.75")
            .with("DEBUG", "T")
            .with("NAME", "svc")
            .with("TAGS", "a,b,c")
            .with("BAD", "x1")
    }

    #[test]
    fn test_deserialize_required_types() {
        let p = provider();
        assert_eq!(deserialize_required::<u16>(&p, "PORT").unwrap(), 8080);
        assert_eq!(deserialize_required::<f64>(&p, "RATIO").unwrap(), 0.75);
        assert_eq!(deserialize_required::<f32>(&p, "RATIO").unwrap(), 0.75);
        assert!(deserialize_required::<bool>(&p, "DEBUG").unwrap());
        assert_eq!(deserialize_required::<String>(&p, "NAME").unwrap(), "svc");
    }

    #[test]
    fn test_deserialize_required_missing() {
        let result = deserialize_required::<String>(&provider(), "MISSING");
        assert!(matches!(result, Err(ConfigError::KeyNotFound { .. })));
    }

    #[test]
    fn test_parse_error_contains_type_info() {
        match deserialize_required::<u32>(&provider(), "BAD") {
            Err(ConfigError::TypeConversion {
                type_name, message, ..
            }) => {
                assert!(type_name.contains("u32"));
                assert_eq!(message.as_deref(), Some("invalid digit found in string"));
            }
            other => panic!("Expected TypeConversion error, got {other:?}"),
        }
    }

    #[test]
    fn test_deserialize_with_default() {
        let p = provider();
        assert_eq!(deserialize_with_default(&p, "PORT", 1u16).unwrap(), 8080);
        assert_eq!(deserialize_with_default(&p, "MISSING", 1u16).unwrap(), 1);
        // A present but invalid value is an error, not a reason to use the default
        assert!(deserialize_with_default(&p, "BAD", 1u16).is_err());
    }

    #[test]
    fn test_default_through_exhausted_chain() {
        let chain = ChainProvider::builder().with(provider()).build();
        assert_eq!(deserialize_with_default(&chain, "MISSING", 3u8).unwrap(), 3);
        assert_eq!(
            deserialize_with_default(&ChainProvider::default(), "MISSING", 3u8).unwrap(),
            3
        );
    }

    #[test]
    fn test_deserialize_optional() {
        let p = provider();
        assert_eq!(deserialize_optional::<u16>(&p, "PORT").unwrap(), Some(8080));
        assert_eq!(deserialize_optional::<u16>(&p, "MISSING").unwrap(), None);
    }

    #[test]
    fn test_deserialize_with_custom_fn() {
        let split = |s: &str| -> std::result::Result<Vec<String>, String> {
            Ok(s.split(',').map(str::to_string).collect())
        };
        let p = provider();
        assert_eq!(deserialize_with(&p, "TAGS", split).unwrap(), vec!["a", "b", "c"]);
        assert_eq!(deserialize_optional_with(&p, "MISSING", split).unwrap(), None);
    }

    #[test]
    fn test_deserialize_with_failure() {
        let reject = |_: &str| -> std::result::Result<u8, &'static str> { Err("nope") };
        match deserialize_with(&provider(), "NAME", reject) {
            Err(ConfigError::TypeConversion {
                value,
                type_name,
                message,
                ..
            }) => {
                assert_eq!(value, "svc");
                assert_eq!(type_name, "u8");
                assert_eq!(message.as_deref(), Some("nope"));
            }
            other => panic!("Expected TypeConversion error, got {other:?}"),
        }
    }
}
