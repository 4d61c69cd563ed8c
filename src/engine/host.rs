//! Compiler host handed to the engine when building programs.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::file::FileSystem;

/// File access used by a program under construction.
///
/// Every read, existence check and path resolution goes through the wrapped
/// [`FileSystem`], normally an [`OverlayFs`](crate::OverlayFs) over the
/// context's in-memory files.
#[derive(Clone)]
pub struct CompilerHost {
    fs: Arc<dyn FileSystem>,
}

impl CompilerHost {
    /// Create a host over `fs`.
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// The underlying file system.
    pub fn file_system(&self) -> &dyn FileSystem {
        self.fs.as_ref()
    }

    /// Resolve a path through the file system.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        self.fs.resolve_path(path)
    }

    /// Check if a file exists.
    pub fn file_exists(&self, path: &Path) -> bool {
        self.fs.file_exists(path)
    }

    /// Check if a directory exists.
    pub fn directory_exists(&self, path: &Path) -> bool {
        self.fs.directory_exists(path)
    }

    /// Read a file.
    pub fn read_file(&self, path: &Path) -> Option<String> {
        self.fs.read_file(path)
    }

    /// Write an output file.
    pub fn write_file(&self, path: &Path, data: &str) -> io::Result<()> {
        self.fs.write_file(path, data)
    }

    /// The directory relative paths are resolved against.
    pub fn current_directory(&self) -> PathBuf {
        self.fs.current_directory()
    }
}

impl fmt::Debug for CompilerHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompilerHost")
            .field("current_directory", &self.fs.current_directory())
            .finish_non_exhaustive()
    }
}
