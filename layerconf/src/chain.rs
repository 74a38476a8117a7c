//! Chained provider with first-match-wins fallback

use std::fmt;
use std::sync::Arc;

use crate::error::{ConfigError, Result};
use crate::provider::Provider;

/// A provider that chains several providers together in priority order.
///
/// Each lookup tries the members in order and returns the first success.
/// Any member error is swallowed and the next member tried. Once the chain is
/// exhausted the reported cause is wrapped in [`ConfigError::Unresolvable`]
/// (or [`ConfigError::NoProviders`] for an empty chain). The cause is the last
/// error that is not a missing key, or the last error when every member simply
/// lacked the key, so a present but invalid value is never reported as missing.
///
/// Both are terminal: a correctly deployed system never sees them. Use the
/// `require_*` methods to turn them into a panic at the call site, or let the
/// error travel up to `main`.
///
/// # Example
///
/// ```
/// use layerconf::{ChainProvider, MemoryProvider, Provider};
///
/// let overrides = MemoryProvider::new().with("PORT", "9000");
/// let defaults = MemoryProvider::new()
///     .with("PORT", "8080")
///     .with("HOST", "localhost");
///
/// let chain = ChainProvider::builder()
///     .with(overrides)
///     .with(defaults)
///     .build();
///
/// assert_eq!(chain.require_float("PORT"), 9000.0);
/// assert_eq!(chain.require_string("HOST"), "localhost");
/// assert!(chain.get_string("MISSING").unwrap_err().is_terminal());
/// ```
#[derive(Clone, Default)]
pub struct ChainProvider {
    chain: Vec<Arc<dyn Provider>>,
}

impl ChainProvider {
    /// Create a chain; the first provider has the highest priority
    pub fn new(chain: Vec<Arc<dyn Provider>>) -> Self {
        Self { chain }
    }

    /// Start building a chain member by member
    pub fn builder() -> ChainBuilder {
        ChainBuilder::default()
    }

    /// Members in priority order
    pub fn providers(&self) -> &[Arc<dyn Provider>] {
        &self.chain
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.chain.len()
    }

    /// Whether the chain has no members
    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    /// Resolve `key` as a string, panicking if no member can.
    ///
    /// # Panics
    ///
    /// When every member fails, with the key, chain position and cause chain.
    pub fn require_string(&self, key: &str) -> String {
        fatal(self.get_string(key))
    }

    /// Resolve `key` as a float, panicking if no member can.
    ///
    /// # Panics
    ///
    /// When every member fails, with the key, chain position and cause chain.
    pub fn require_float(&self, key: &str) -> f64 {
        fatal(self.get_float(key))
    }

    /// Resolve `key` as a bool, panicking if no member can.
    ///
    /// # Panics
    ///
    /// When every member fails, with the key, chain position and cause chain.
    pub fn require_bool(&self, key: &str) -> bool {
        fatal(self.get_bool(key))
    }

    fn resolve<T>(&self, key: &str, lookup: impl Fn(&dyn Provider) -> Result<T>) -> Result<T> {
        let mut reported: Option<(usize, ConfigError)> = None;
        for (position, provider) in self.chain.iter().enumerate() {
            match lookup(&**provider) {
                Ok(value) => return Ok(value),
                Err(e) => {
                    tracing::debug!(key, position, error = %e, "provider could not resolve key, trying next");
                    let keep_previous = matches!(&reported, Some((_, prev)) if !prev.is_missing())
                        && e.is_missing();
                    if !keep_previous {
                        reported = Some((position, e));
                    }
                }
            }
        }

        let err = match reported {
            Some((position, source)) => ConfigError::Unresolvable {
                key: key.to_string(),
                position,
                source: Box::new(source),
            },
            None => ConfigError::NoProviders {
                key: key.to_string(),
            },
        };
        tracing::debug!(key, error = %err, "config key unresolvable");
        Err(err)
    }
}

impl Provider for ChainProvider {
    fn get_string(&self, key: &str) -> Result<String> {
        self.resolve(key, |p| p.get_string(key))
    }

    fn get_float(&self, key: &str) -> Result<f64> {
        self.resolve(key, |p| p.get_float(key))
    }

    fn get_bool(&self, key: &str) -> Result<bool> {
        self.resolve(key, |p| p.get_bool(key))
    }
}

// Members are trait objects without a Debug bound; show the count only
impl fmt::Debug for ChainProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainProvider")
            .field("chain", &format!("[{} providers]", self.chain.len()))
            .finish()
    }
}

/// Builder for [`ChainProvider`]
#[derive(Default)]
pub struct ChainBuilder {
    chain: Vec<Arc<dyn Provider>>,
}

impl ChainBuilder {
    /// Append a provider with lower priority than those already added
    pub fn with(mut self, provider: impl Provider + 'static) -> Self {
        self.chain.push(Arc::new(provider));
        self
    }

    /// Append a shared provider
    pub fn with_shared(mut self, provider: Arc<dyn Provider>) -> Self {
        self.chain.push(provider);
        self
    }

    /// Finish the chain
    pub fn build(self) -> ChainProvider {
        ChainProvider::new(self.chain)
    }
}

/// Unwrap a lookup or panic with the whole cause chain.
fn fatal<T>(result: Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            let report = report(&e);
            tracing::warn!(error = %report, "required config value unresolvable");
            panic!("{report}")
        }
    }
}

/// Render an error followed by each of its causes.
fn report(err: &ConfigError) -> String {
    use std::error::Error;

    let mut out = err.to_string();
    let mut cause = err.source();
    while let Some(e) = cause {
        out.push_str(": ");
        out.push_str(&e.to_string());
        cause = e.source();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryProvider;

    fn memory(pairs: &[(&str, &str)]) -> Arc<dyn Provider> {
        Arc::new(pairs.iter().copied().collect::<MemoryProvider>())
    }

    #[test]
    fn test_chain_fallback() {
        let chain = ChainProvider::new(vec![memory(&[]), memory(&[("X", "1")])]);
        assert_eq!(chain.get_string("X").unwrap(), "1");
    }

    #[test]
    fn test_chain_priority() {
        let chain = ChainProvider::new(vec![memory(&[("X", "first")]), memory(&[("X", "second")])]);
        assert_eq!(chain.get_string("X").unwrap(), "first");
    }

    #[test]
    fn test_chain_skips_unconvertible_values() {
        let chain = ChainProvider::new(vec![
            memory(&[("PORT", "http"), ("DEBUG", "yes")]),
            memory(&[("PORT", "8080"), ("DEBUG", "1")]),
        ]);
        assert_eq!(chain.get_float("PORT").unwrap(), 8080.0);
        assert!(chain.get_bool("DEBUG").unwrap());
        assert_eq!(chain.get_string("PORT").unwrap(), "http");
    }

    #[test]
    fn test_chain_exhausted_reports_last_error() {
        let chain = ChainProvider::new(vec![memory(&[]), memory(&[("Y", "1")])]);
        match chain.get_float("X") {
            Err(ConfigError::Unresolvable {
                key,
                position,
                source,
            }) => {
                assert_eq!(key, "X");
                assert_eq!(position, 1);
                assert!(matches!(*source, ConfigError::KeyNotFound { .. }));
            }
            other => panic!("Expected Unresolvable, got {other:?}"),
        }
    }

    #[test]
    fn test_chain_invalid_value_outranks_later_missing_key() {
        let chain = ChainProvider::new(vec![
            memory(&[("RATE", "abc")]),
            memory(&[]),
            memory(&[("OTHER", "1")]),
        ]);
        let err = chain.get_float("RATE").unwrap_err();
        assert!(!err.is_missing());
        match err {
            ConfigError::Unresolvable {
                position, source, ..
            } => {
                assert_eq!(position, 0);
                assert!(matches!(
                    *source,
                    ConfigError::TypeConversion { ref value, .. } if value == "abc"
                ));
            }
            other => panic!("Expected Unresolvable, got {other:?}"),
        }
    }

    #[test]
    fn test_chain_reports_latest_invalid_value() {
        let chain = ChainProvider::new(vec![
            memory(&[("DEBUG", "maybe")]),
            memory(&[("DEBUG", "sometimes")]),
            memory(&[]),
        ]);
        match chain.get_bool("DEBUG") {
            Err(ConfigError::Unresolvable {
                position, source, ..
            }) => {
                assert_eq!(position, 1);
                assert!(matches!(
                    *source,
                    ConfigError::TypeConversion { ref value, .. } if value == "sometimes"
                ));
            }
            other => panic!("Expected Unresolvable, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_chain() {
        let chain = ChainProvider::default();
        assert!(chain.is_empty());
        assert!(matches!(
            chain.get_bool("X"),
            Err(ConfigError::NoProviders { ref key }) if key == "X"
        ));
    }

    #[test]
    fn test_nested_chain_falls_through() {
        let inner = ChainProvider::new(vec![memory(&[])]);
        let outer = ChainProvider::builder()
            .with(inner)
            .with(MemoryProvider::new().with("X", "outer"))
            .build();
        assert_eq!(outer.len(), 2);
        assert_eq!(outer.require_string("X"), "outer");
    }

    #[test]
    fn test_report_includes_causes() {
        let err = ConfigError::Unresolvable {
            key: "X".to_string(),
            position: 0,
            source: Box::new(ConfigError::key_not_found("X")),
        };
        assert_eq!(
            report(&err),
            "could not resolve config key 'X': every provider failed (reported at position 0): \
             config value with key 'X' could not be found"
        );
    }

    #[test]
    fn test_debug_shows_member_count() {
        let chain = ChainProvider::new(vec![memory(&[]), memory(&[("X", "1")])]);
        let rendered = format!("{chain:?}");
        assert!(rendered.starts_with("ChainProvider"));
        assert!(rendered.contains("[2 providers]"));
    }

    #[derive(Clone, Default)]
    struct LogSink(Arc<parking_lot::Mutex<Vec<u8>>>);

    impl std::io::Write for LogSink {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    /// Run `f` and return what it logged at `warn` or above.
    fn warnings_during<R>(f: impl FnOnce() -> R) -> (R, String) {
        let sink = LogSink::default();
        let writer = sink.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let result = tracing::subscriber::with_default(subscriber, f);
        let logged = String::from_utf8_lossy(&sink.0.lock()).into_owned();
        (result, logged)
    }

    #[test]
    fn test_exhausted_lookup_does_not_warn() {
        let chain = ChainProvider::new(vec![memory(&[]), memory(&[("DEBUG", "nope")])]);
        let (results, logged) = warnings_during(|| {
            (0..3)
                .map(|_| (chain.get_string("MISSING"), chain.get_bool("DEBUG")))
                .collect::<Vec<_>>()
        });

        assert!(results.iter().all(|(a, b)| a.is_err() && b.is_err()));
        assert_eq!(logged, "");
    }

    #[test]
    fn test_require_warns_before_panicking() {
        let chain = ChainProvider::new(vec![memory(&[])]);
        let (outcome, logged) = warnings_during(|| {
            std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                chain.require_string("DB_PASSWORD")
            }))
        });

        assert!(outcome.is_err());
        assert!(logged.contains("WARN"));
        assert!(logged.contains("required config value unresolvable"));
        assert!(logged.contains("DB_PASSWORD"));
    }

    #[test]
    #[should_panic(expected = "no providers configured")]
    fn test_require_on_empty_chain_panics() {
        ChainProvider::default().require_string("X");
    }

    #[test]
    #[should_panic(expected = "cannot be converted to expected type 'bool'")]
    fn test_require_panics_with_cause() {
        let chain = ChainProvider::new(vec![memory(&[("DEBUG", "sometimes")])]);
        chain.require_bool("DEBUG");
    }
}
