//! Layered configuration with typed lookups
//!
//! `layerconf` resolves configuration values by key from one or more
//! **providers** consulted in priority order. A host application asks for a
//! `String`, an `f64` or a `bool` without caring whether the value comes from a
//! flat `KEY=VALUE` file, the environment, a mounted secret or a defaults layer.
//!
//! # Features
//!
//! - **One capability**: every source implements [`Provider`] (`get_string`,
//!   `get_float`, `get_bool`)
//! - **Lazy file store**: [`FileProvider`] parses its file once, on first use,
//!   and treats a missing file as empty
//! - **Precedence**: [`ChainProvider`] tries its members in order, first match wins
//! - **Loud failure**: an exhausted chain yields a terminal error, or a panic
//!   through the `require_*` methods
//! - **Declarative**: `#[derive(LayerConf)]` fills a struct from any provider
//!
//! # Example
//!
//! ```rust
//! use layerconf::{ChainProvider, EnvProvider, FileProvider, MemoryProvider, Provider};
//! # use std::io::Write;
//! # let dir = tempfile::tempdir().unwrap();
//! # let mut f = std::fs::File::create(dir.path().join("app.env")).unwrap();
//! # writeln!(f, "HOST=db.internal").unwrap();
//!
//! let chain = ChainProvider::builder()
//!     // Secrets and overrides first
//!     .with(EnvProvider::new().with_prefix("APP_").with_file_secrets())
//!     // Then the deployment's env file, resolved against an explicit directory
//!     .with(FileProvider::new(dir.path(), "app.env"))
//!     // Finally the built-in defaults
//!     .with(MemoryProvider::new().with("HOST", "localhost").with("PORT", "8080"))
//!     .build();
//!
//! assert_eq!(chain.require_string("HOST"), "db.internal");
//! assert_eq!(chain.get_float("PORT").unwrap(), 8080.0);
//! ```
//!
//! # Derive
//!
//! ```rust
//! use layerconf::{LayerConf, MemoryProvider};
//!
//! #[derive(Debug, LayerConf)]
//! #[conf(prefix = "APP_")]
//! struct Config {
//!     pub host: String,
//!
//!     #[conf(default = 8080)]
//!     pub port: u16,
//!
//!     #[conf(name = "VERBOSE")]
//!     pub debug: Option<bool>,
//! }
//!
//! # fn main() -> anyhow::Result<()> {
//! let provider = MemoryProvider::new().with("APP_HOST", "localhost");
//! let config = Config::from_provider(&provider)?;
//! assert_eq!(config.host, "localhost");
//! assert_eq!(config.port, 8080);
//! assert_eq!(config.debug, None);
//! # Ok(())
//! # }
//! ```
//!
//! # Attributes
//!
//! **Struct-level**:
//! - `#[conf(prefix = "PREFIX_")]`: Prepend a prefix to every key
//!
//! **Field-level**:
//! - `#[conf(name = "KEY")]`: Key to look up instead of the upper-cased field name
//! - `#[conf(default)]`: Use `Default::default()` when the key is missing
//! - `#[conf(default = value)]`: Use an explicit value when the key is missing
//! - `#[conf(deserializer = "func")]`: Convert the string value with `func(&str) -> Result<T, E>`

mod chain;
#[doc(hidden)]
pub mod de;
mod env;
mod error;
mod file;
mod memory;
mod provider;
pub mod value;

pub use chain::{ChainBuilder, ChainProvider};
pub use env::EnvProvider;
pub use error::{ConfigError, Result};
pub use file::FileProvider;
pub use layerconf_derive::LayerConf;
pub use memory::MemoryProvider;
pub use provider::Provider;
