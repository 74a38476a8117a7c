//! Provider backed by a flat `KEY=VALUE` file

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{ConfigError, Result};
use crate::provider::Provider;

type Store = HashMap<String, String>;

/// Load state of a [`FileProvider`]'s cache.
#[derive(Debug)]
enum LoadState {
    /// Nothing read yet
    Unloaded,
    /// File parsed; the map never changes afterwards
    Loaded(Arc<Store>),
    /// Last attempt failed; the next lookup tries again
    Failed,
}

/// Configuration provider reading a flat text file of `KEY=VALUE` lines.
///
/// The file is read lazily on the first lookup and cached for the lifetime of
/// the provider. There is no refresh.
///
/// # File format
///
/// - One record per line, split on the single `=` it must contain
/// - No trimming, quoting, comments or escapes; a value containing `=` is an error
/// - Empty lines are skipped, a trailing `\r` is dropped
///
/// A file that does not exist, or cannot be opened, behaves as an empty store
/// so optional layers can be left out of a deployment. A malformed file fails
/// every lookup with [`ConfigError::Parsing`] until it is fixed.
///
/// # Example
///
/// ```
/// use layerconf::{FileProvider, Provider};
/// # use std::io::Write;
/// # let dir = tempfile::tempdir().unwrap();
/// # let mut f = std::fs::File::create(dir.path().join("app.env")).unwrap();
/// # writeln!(f, "HOST=localhost\nPORT=8080\nDEBUG=true").unwrap();
///
/// let provider = FileProvider::new(dir.path(), "app.env");
/// assert_eq!(provider.get_string("HOST").unwrap(), "localhost");
/// assert_eq!(provider.get_float("PORT").unwrap(), 8080.0);
/// assert!(provider.get_bool("DEBUG").unwrap());
/// ```
#[derive(Debug)]
pub struct FileProvider {
    path: PathBuf,
    state: Mutex<LoadState>,
    /// Load attempts made so far
    #[cfg(test)]
    loads: std::sync::atomic::AtomicUsize,
}

impl FileProvider {
    /// Create a provider for `path`, resolved against `base_dir`.
    ///
    /// An absolute `path` is used as given.
    pub fn new(base_dir: impl AsRef<Path>, path: impl AsRef<Path>) -> Self {
        Self::from_path(base_dir.as_ref().join(path))
    }

    /// Create a provider for a path that is already resolved.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            state: Mutex::new(LoadState::Unloaded),
            #[cfg(test)]
            loads: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    /// Resolved path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the file has been read and cached
    pub fn is_loaded(&self) -> bool {
        matches!(*self.state.lock(), LoadState::Loaded(_))
    }

    /// Return the cached store, loading it first if needed.
    ///
    /// The lock is held across the load so concurrent first callers parse
    /// the file once.
    fn store(&self) -> Result<Arc<Store>> {
        let mut state = self.state.lock();
        if let LoadState::Loaded(store) = &*state {
            return Ok(Arc::clone(store));
        }

        #[cfg(test)]
        self.loads
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        match load_store(&self.path) {
            Ok(store) => {
                let store = Arc::new(store);
                *state = LoadState::Loaded(Arc::clone(&store));
                Ok(store)
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to load config file");
                *state = LoadState::Failed;
                Err(e)
            }
        }
    }
}

impl Provider for FileProvider {
    fn get_string(&self, key: &str) -> Result<String> {
        self.store()?
            .get(key)
            .cloned()
            .ok_or_else(|| ConfigError::key_not_found(key))
    }
}

/// Open and parse the file at `path`; an unopenable file yields an empty store.
fn load_store(path: &Path) -> Result<Store> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "config file not readable, using empty store");
            return Ok(Store::new());
        }
    };

    tracing::debug!(path = %path.display(), "loading config file");
    let store = parse_store(path, BufReader::new(file))?;
    tracing::debug!(path = %path.display(), entries = store.len(), "config file loaded");
    Ok(store)
}

/// Parse `KEY=VALUE` lines from `reader`.
///
/// `path` only annotates errors.
fn parse_store<R: BufRead>(path: &Path, reader: R) -> Result<Store> {
    let mut store = Store::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| ConfigError::Unknown {
            path: path.to_path_buf(),
            source,
        })?;
        let line = line.strip_suffix('\r').unwrap_or(&line);
        if line.is_empty() {
            continue;
        }

        let mut tokens = line.split('=');
        match (tokens.next(), tokens.next(), tokens.next()) {
            (Some(key), Some(value), None) => {
                store.insert(key.to_string(), value.to_string());
            }
            _ => {
                return Err(ConfigError::Parsing {
                    path: path.to_path_buf(),
                    line_number: index + 1,
                    line: line.to_string(),
                });
            }
        }
    }

    Ok(store)
}
