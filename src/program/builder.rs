//! Program construction from a parsed configuration.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::context::TscModule;
use crate::diagnostic::EmitError;
use crate::engine::{CompilerHost, CreateProgramOptions, TypeEngine};
use crate::file::FileSystem;
use crate::frontend::{Frontend, select_factory};
use crate::project::dedup_paths;
use crate::tsconfig::{CompilerOptions, ParsedConfig};

/// Effective options for a program: emit defaults overridden by the
/// project's own options, annotated with the front-end hints.
pub fn merge_compiler_options(parsed: &ParsedConfig, base_dir: &Path) -> CompilerOptions {
    let mut project = parsed.options.clone();
    project.config_raw = Some(parsed.raw.clone());
    project.base_dir = Some(base_dir.to_path_buf());
    CompilerOptions::emit_defaults().overridden_by(project)
}

/// `id` followed by `entries` (or the configuration's files when there are
/// none), resolved through `fs` and de-duplicated in first-seen order.
pub fn root_names(
    fs: &dyn FileSystem,
    id: &Path,
    entries: Option<&[PathBuf]>,
    file_names: &[PathBuf],
) -> Vec<PathBuf> {
    let rest = entries.unwrap_or(file_names);
    dedup_paths(
        std::iter::once(id)
            .chain(rest.iter().map(PathBuf::as_path))
            .map(|f| fs.resolve_path(f)),
    )
}

/// Builder for a program scoped to one configuration and target file.
pub struct ProgramBuilder<'a> {
    engine: &'a dyn TypeEngine,
    fs: Arc<dyn FileSystem>,
    id: &'a Path,
    entries: Option<&'a [PathBuf]>,
    frontend: Option<&'a Frontend>,
    use_frontend: bool,
}

impl<'a> ProgramBuilder<'a> {
    /// Create a builder for `id` over `fs`.
    pub fn new(engine: &'a dyn TypeEngine, fs: Arc<dyn FileSystem>, id: &'a Path) -> Self {
        Self {
            engine,
            fs,
            id,
            entries: None,
            frontend: None,
            use_frontend: false,
        }
    }

    /// Explicit entry files, replacing the configuration's file list.
    pub fn with_entries(mut self, entries: Option<&'a [PathBuf]>) -> Self {
        self.entries = entries;
        self
    }

    /// Construct with the alternate front-end when `enabled`.
    pub fn with_frontend(mut self, frontend: Option<&'a Frontend>, enabled: bool) -> Self {
        self.frontend = frontend;
        self.use_frontend = enabled;
        self
    }

    /// Build a program for `parsed`, whose relative paths resolve against
    /// `base_dir`, and look up the target file in it.
    pub fn build(&self, parsed: &ParsedConfig, base_dir: &Path) -> Result<TscModule, EmitError> {
        let factory = select_factory(self.frontend, self.use_frontend, self.engine)?;

        let options = CreateProgramOptions {
            root_names: root_names(self.fs.as_ref(), self.id, self.entries, &parsed.file_names),
            options: merge_compiler_options(parsed, base_dir),
            host: CompilerHost::new(Arc::clone(&self.fs)),
            project_references: parsed.project_references.clone(),
        };
        let program = factory.create_program(self.engine, options);

        if let Some(file) = program.source_file(self.id) {
            return Ok(TscModule { program, file });
        }

        debug!(id = %self.id.display(), "source file not found in program");
        if !self.fs.file_exists(self.id) {
            return Err(EmitError::SourceNotFound {
                path: self.id.to_path_buf(),
            });
        }
        warn!(id = %self.id.display(), "file exists but was not loaded into the program");
        Err(EmitError::InternalResolution {
            path: self.id.to_path_buf(),
        })
    }
}
