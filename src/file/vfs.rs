//! File system trait and the real-disk implementation.
//!
//! Provides the small capability set every host in this crate is built on.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::path::normalize_path;

// =============================================================================
// FileSystem Trait
// =============================================================================

/// File access capability used by compiler hosts, config parsing and
/// solution builds.
///
/// Two implementations ship with the crate:
///
/// - [`DiskFs`]: the real file system
/// - [`OverlayFs`](super::OverlayFs): in-memory content first, disk second
///
/// # Example
///
/// ```ignore
/// use dts_batch::{DiskFs, FileMap, FileSystem, OverlayFs};
/// use std::path::Path;
///
/// let files = FileMap::new();
/// files.insert("/project/src/a.ts", "export const a = 1;");
///
/// let fs = OverlayFs::memory_only(files, DiskFs::new());
/// assert!(fs.file_exists(Path::new("/project/src/a.ts")));
/// ```
pub trait FileSystem: Send + Sync {
    /// Resolve a path to its absolute, normalized form.
    fn resolve_path(&self, path: &Path) -> PathBuf;

    /// Check if a directory exists.
    fn directory_exists(&self, path: &Path) -> bool;

    /// Check if a file exists.
    fn file_exists(&self, path: &Path) -> bool;

    /// Read a file as UTF-8 text. Returns `None` if it cannot be read.
    fn read_file(&self, path: &Path) -> Option<String>;

    /// Write a file.
    fn write_file(&self, path: &Path, data: &str) -> io::Result<()>;

    /// Delete a file. Deleting a missing file is not an error.
    fn delete_file(&self, path: &Path) -> io::Result<()>;

    /// The directory relative paths are resolved against.
    fn current_directory(&self) -> PathBuf;

    /// Receive a progress message (e.g. verbose solution-builder output).
    fn write(&self, message: &str) {
        debug!("{}", message.trim_end());
    }
}

// =============================================================================
// DiskFs
// =============================================================================

/// The real file system.
#[derive(Debug, Clone, Default)]
pub struct DiskFs {
    cwd: Option<PathBuf>,
}

impl DiskFs {
    /// Create a disk system resolving relative paths against the process
    /// working directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a disk system resolving relative paths against `cwd`.
    ///
    /// A relative `cwd` is anchored on the process working directory.
    pub fn with_cwd(cwd: impl Into<PathBuf>) -> Self {
        let cwd = cwd.into();
        let cwd = if cwd.is_absolute() {
            cwd
        } else {
            normalize_path(&cwd, &process_dir())
        };
        Self { cwd: Some(cwd) }
    }
}

fn process_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("/"))
}

impl FileSystem for DiskFs {
    fn resolve_path(&self, path: &Path) -> PathBuf {
        normalize_path(path, &self.current_directory())
    }

    fn directory_exists(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn file_exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_file(&self, path: &Path) -> Option<String> {
        fs::read_to_string(path).ok()
    }

    fn write_file(&self, path: &Path, data: &str) -> io::Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, data)
    }

    fn delete_file(&self, path: &Path) -> io::Result<()> {
        match fs::remove_file(path) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }

    fn current_directory(&self) -> PathBuf {
        match &self.cwd {
            Some(cwd) => cwd.clone(),
            None => process_dir(),
        }
    }
}
