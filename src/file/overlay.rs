//! Overlay file system: in-memory content first, disk second.

use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::store::FileMap;
use super::vfs::{DiskFs, FileSystem};

/// Where writes and deletes go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritePolicy {
    /// Write to the overlay and to disk (persistent, incremental builds).
    MirrorToDisk,
    /// Write to the overlay only (ephemeral builds).
    MemoryOnly,
}

impl WritePolicy {
    /// Policy for a solution build: persistent builds mirror to disk.
    pub fn for_incremental(incremental: bool) -> Self {
        if incremental {
            Self::MirrorToDisk
        } else {
            Self::MemoryOnly
        }
    }
}

/// A file system that serves in-memory content from a [`FileMap`] and falls
/// back to a wrapped system (the disk by default) for everything else.
///
/// ```text
/// read / exists / resolve          write / delete
///        │                               │
///        ├─► FileMap hit → memory        ├─► FileMap
///        │                               │
///        └─► miss → inner system         └─► inner system (MirrorToDisk only)
/// ```
#[derive(Debug, Clone)]
pub struct OverlayFs<D: FileSystem = DiskFs> {
    files: FileMap,
    inner: D,
    policy: WritePolicy,
}

impl<D: FileSystem> OverlayFs<D> {
    /// Create an overlay with an explicit write policy.
    pub fn new(files: FileMap, inner: D, policy: WritePolicy) -> Self {
        Self {
            files,
            inner,
            policy,
        }
    }

    /// Create an overlay that writes to memory and to disk.
    pub fn mirroring(files: FileMap, inner: D) -> Self {
        Self::new(files, inner, WritePolicy::MirrorToDisk)
    }

    /// Create an overlay that only writes to memory.
    pub fn memory_only(files: FileMap, inner: D) -> Self {
        Self::new(files, inner, WritePolicy::MemoryOnly)
    }

    /// The shared in-memory files.
    pub fn files(&self) -> &FileMap {
        &self.files
    }

    /// The system consulted on overlay misses.
    pub fn inner(&self) -> &D {
        &self.inner
    }

    /// The active write policy.
    pub fn policy(&self) -> WritePolicy {
        self.policy
    }
}

impl<D: FileSystem> FileSystem for OverlayFs<D> {
    fn resolve_path(&self, path: &Path) -> PathBuf {
        if self.files.contains(path) {
            return path.to_path_buf();
        }
        self.inner.resolve_path(path)
    }

    fn directory_exists(&self, path: &Path) -> bool {
        self.files.has_entries_under(path) || self.inner.directory_exists(path)
    }

    fn file_exists(&self, path: &Path) -> bool {
        self.files.contains(path) || self.inner.file_exists(path)
    }

    fn read_file(&self, path: &Path) -> Option<String> {
        match self.files.get(path) {
            Some(content) => Some(content),
            None => self.inner.read_file(path),
        }
    }

    fn write_file(&self, path: &Path, data: &str) -> io::Result<()> {
        self.files.insert(path, data);
        match self.policy {
            WritePolicy::MirrorToDisk => self.inner.write_file(path, data),
            WritePolicy::MemoryOnly => {
                debug!("kept {} in memory", path.display());
                Ok(())
            }
        }
    }

    fn delete_file(&self, path: &Path) -> io::Result<()> {
        self.files.remove(path);
        match self.policy {
            WritePolicy::MirrorToDisk => self.inner.delete_file(path),
            WritePolicy::MemoryOnly => Ok(()),
        }
    }

    fn current_directory(&self) -> PathBuf {
        self.inner.current_directory()
    }

    fn write(&self, message: &str) {
        self.inner.write(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.ts");
        fs::write(&path, "disk").unwrap();
        (dir, path)
    }

    #[test]
    fn test_overlay_takes_precedence() {
        let (dir, path) = setup();
        let files = FileMap::new();
        let overlay = OverlayFs::memory_only(files.clone(), DiskFs::with_cwd(dir.path()));

        assert_eq!(overlay.read_file(&path).as_deref(), Some("disk"));

        files.insert(&path, "memory");
        assert_eq!(overlay.read_file(&path).as_deref(), Some("memory"));

        overlay.delete_file(&path).unwrap();
        assert_eq!(overlay.read_file(&path).as_deref(), Some("disk"));
    }

    #[test]
    fn test_delete_overlay_only_file_is_gone() {
        let dir = TempDir::new().unwrap();
        let overlay = OverlayFs::memory_only(FileMap::new(), DiskFs::with_cwd(dir.path()));
        let path = dir.path().join("virtual.ts");

        overlay.write_file(&path, "x").unwrap();
        assert!(overlay.file_exists(&path));

        overlay.delete_file(&path).unwrap();
        assert!(!overlay.file_exists(&path));
        assert_eq!(overlay.read_file(&path), None);
    }

    #[test]
    fn test_memory_only_never_touches_disk() {
        let dir = TempDir::new().unwrap();
        let overlay = OverlayFs::memory_only(FileMap::new(), DiskFs::with_cwd(dir.path()));
        let path = dir.path().join("out/tsconfig.tsbuildinfo");

        overlay.write_file(&path, "{}").unwrap();

        assert!(overlay.file_exists(&path));
        assert!(overlay.directory_exists(&dir.path().join("out")));
        assert!(!path.exists());
    }

    #[test]
    fn test_mirroring_writes_and_deletes_disk() {
        let (dir, path) = setup();
        let files = FileMap::new();
        let overlay = OverlayFs::mirroring(files.clone(), DiskFs::with_cwd(dir.path()));

        overlay.write_file(&path, "both").unwrap();
        assert_eq!(files.get(&path).as_deref(), Some("both"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "both");

        overlay.delete_file(&path).unwrap();
        assert!(!files.contains(&path));
        assert!(!path.exists());
    }

    #[test]
    fn test_resolve_path_prefers_overlay_key() {
        let files = FileMap::new();
        files.insert("/virtual/a.ts", "");
        let overlay = OverlayFs::memory_only(files, DiskFs::with_cwd("/cwd"));

        assert_eq!(
            overlay.resolve_path(Path::new("/virtual/a.ts")),
            PathBuf::from("/virtual/a.ts")
        );
        assert_eq!(
            overlay.resolve_path(Path::new("b.ts")),
            PathBuf::from("/cwd/b.ts")
        );
    }

    #[test]
    fn test_policy_for_incremental() {
        assert_eq!(WritePolicy::for_incremental(true), WritePolicy::MirrorToDisk);
        assert_eq!(WritePolicy::for_incremental(false), WritePolicy::MemoryOnly);
    }
}
