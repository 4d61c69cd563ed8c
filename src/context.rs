//! Program cache shared across emission requests.
//!
//! # Caching Strategy
//!
//! ```text
//! Context (one per process by default, or one per caller)
//! ├── programs: Vec<Arc<dyn Program>>   creation order, scanned linearly
//! └── files: FileMap                    in-memory overlay backing every host
//! ```
//!
//! Programs are never rebuilt when file content changes. Callers must call
//! [`invalidate_context_file`] after editing a file so that every program
//! containing it is dropped and rebuilt on the next request.

use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};

use parking_lot::RwLock;
use tracing::debug;

use crate::engine::{Program, SourceFile};
use crate::file::FileMap;

/// Default context for callers that do not supply their own.
static GLOBAL_CONTEXT: LazyLock<Context> = LazyLock::new(Context::new);

/// Compiled programs plus the in-memory files they were built over.
#[derive(Default)]
pub struct Context {
    programs: RwLock<Vec<Arc<dyn Program>>>,
    files: FileMap,
}

impl Context {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide default context, created on first use.
    pub fn global() -> &'static Context {
        &GLOBAL_CONTEXT
    }

    /// The in-memory files backing this context's hosts.
    pub fn files(&self) -> &FileMap {
        &self.files
    }

    /// Snapshot of the cached programs in creation order.
    pub fn programs(&self) -> Vec<Arc<dyn Program>> {
        self.programs.read().clone()
    }

    /// Number of cached programs.
    pub fn program_count(&self) -> usize {
        self.programs.read().len()
    }

    /// Register a freshly built program.
    pub fn push(&self, program: Arc<dyn Program>) {
        self.programs.write().push(program);
    }

    /// Find the first program whose root files include every entry, or `id`
    /// alone when no entries are given.
    pub fn find_program(&self, id: &Path, entries: Option<&[PathBuf]>) -> Option<Arc<dyn Program>> {
        self.programs
            .read()
            .iter()
            .find(|program| {
                let roots = program.root_file_names();
                match entries {
                    Some(entries) => entries.iter().all(|e| roots.contains(e)),
                    None => roots.iter().any(|r| r == id),
                }
            })
            .cloned()
    }

    /// Drop `path` from the overlay and every program containing it.
    ///
    /// Returns the number of programs removed.
    pub fn invalidate_file(&self, path: &Path) -> usize {
        self.files.remove(path);

        let mut programs = self.programs.write();
        let before = programs.len();
        programs.retain(|program| !program.contains_file(path));
        let removed = before - programs.len();

        if removed > 0 {
            debug!(path = %path.display(), removed, "invalidated programs");
        }
        removed
    }

    /// Drop every program and in-memory file.
    pub fn clear(&self) {
        self.programs.write().clear();
        self.files.clear();
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("programs", &self.program_count())
            .field("files", &self.files.len())
            .finish()
    }
}

/// Create an empty context.
pub fn create_context() -> Context {
    Context::new()
}

/// Drop `path` from `context`'s overlay and every program containing it.
///
/// Call whenever a source file's content changes.
pub fn invalidate_context_file(context: &Context, path: &Path) {
    context.invalidate_file(path);
}

/// A cached or new program paired with the requested file inside it.
#[derive(Clone)]
pub struct TscModule {
    /// The program.
    pub program: Arc<dyn Program>,
    /// The requested source file.
    pub file: Arc<SourceFile>,
}

impl std::fmt::Debug for TscModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TscModule")
            .field("roots", &self.program.root_file_names())
            .field("file", &self.file.file_name())
            .finish()
    }
}
