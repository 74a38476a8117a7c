//! The provider capability shared by every configuration source

use std::sync::Arc;

use crate::error::Result;
use crate::value;

/// A source of typed configuration values keyed by string identifiers.
///
/// Only [`get_string`](Provider::get_string) is required. The typed lookups
/// default to coercing the string value, which is what every leaf source
/// wants; [`ChainProvider`](crate::ChainProvider) overrides them so that a
/// member holding an unparsable value gives way to the next member.
pub trait Provider: Send + Sync {
    /// Look up the raw string value for `key`.
    fn get_string(&self, key: &str) -> Result<String>;

    /// Look up `key` and parse it as a 64-bit float.
    fn get_float(&self, key: &str) -> Result<f64> {
        let raw = self.get_string(key)?;
        value::parse_float(key, &raw)
    }

    /// Look up `key` and parse it as a boolean.
    fn get_bool(&self, key: &str) -> Result<bool> {
        let raw = self.get_string(key)?;
        value::parse_bool(key, &raw)
    }
}

macro_rules! forward_provider {
    ($($ty:ty),*) => {
        $(
            impl<P: Provider + ?Sized> Provider for $ty {
                fn get_string(&self, key: &str) -> Result<String> {
                    (**self).get_string(key)
                }

                fn get_float(&self, key: &str) -> Result<f64> {
                    (**self).get_float(key)
                }

                fn get_bool(&self, key: &str) -> Result<bool> {
                    (**self).get_bool(key)
                }
            }
        )*
    };
}

forward_provider!(&P, Box<P>, Arc<P>);
