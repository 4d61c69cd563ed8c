//! Shared in-memory file contents.
//!
//! ```text
//! FileMap (one per Context, cloned into every overlay system)
//! └── Arc<RwLock<FxHashMap<PathBuf, String>>>
//!     ├── written by solution builds (build info, outputs)
//!     ├── written by callers (unsaved edits)
//!     └── removed by invalidation
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

/// Handle to a path → content map shared between a [`Context`](crate::Context)
/// and the overlay systems built from it.
///
/// Cloning is cheap and yields a handle to the same map.
#[derive(Debug, Clone, Default)]
pub struct FileMap {
    inner: Arc<RwLock<FxHashMap<PathBuf, String>>>,
}

impl FileMap {
    /// Create a new empty file map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a copy of the content stored for `path`.
    pub fn get(&self, path: &Path) -> Option<String> {
        self.inner.read().get(path).cloned()
    }

    /// Check if a path has in-memory content.
    pub fn contains(&self, path: &Path) -> bool {
        self.inner.read().contains_key(path)
    }

    /// Store content for a path, returning the previous content.
    pub fn insert(&self, path: impl Into<PathBuf>, content: impl Into<String>) -> Option<String> {
        self.inner.write().insert(path.into(), content.into())
    }

    /// Remove a path, returning its content.
    pub fn remove(&self, path: &Path) -> Option<String> {
        self.inner.write().remove(path)
    }

    /// Check if any stored path lies inside `dir`.
    pub fn has_entries_under(&self, dir: &Path) -> bool {
        self.inner.read().keys().any(|path| path.starts_with(dir))
    }

    /// Get the number of stored files.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Remove every stored file.
    pub fn clear(&self) {
        self.inner.write().clear();
    }
}
