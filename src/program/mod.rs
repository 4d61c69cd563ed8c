//! Program lookup and construction.
//!
//! ```text
//! create_or_get_ts_module(request)
//!   │
//!   ├─► Context::find_program(id, entries)
//!   │     └─► hit and target file present ──► reuse
//!   │
//!   └─► create_ts_program(request)
//!         ├─► tsconfig + build: build_solution ─► find_project_containing_file
//!         │                                        └─► owning project's config
//!         └─► otherwise: the request's own tsconfig
//!               │
//!               ▼
//!         ProgramBuilder::build ──► Context::push
//! ```

mod builder;

use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use crate::context::{Context, TscModule};
use crate::diagnostic::EmitError;
use crate::engine::TypeEngine;
use crate::file::{DiskFs, FileSystem, OverlayFs, parent_dir};
use crate::frontend::Frontend;
use crate::process::TscOptions;
use crate::project::{build_solution, find_project_containing_file};

pub use builder::{ProgramBuilder, merge_compiler_options, root_names};

/// A request with its paths resolved through the context's overlay.
struct ModuleRequest<'a> {
    options: &'a TscOptions<'a>,
    context: &'a Context,
    fs: Arc<dyn FileSystem>,
    id: PathBuf,
    entries: Option<Vec<PathBuf>>,
    tsconfig: Option<PathBuf>,
}

impl<'a> ModuleRequest<'a> {
    fn new(options: &'a TscOptions<'a>) -> Self {
        let context = options.context();
        let fs: Arc<dyn FileSystem> = Arc::new(OverlayFs::mirroring(
            context.files().clone(),
            DiskFs::with_cwd(&options.cwd),
        ));
        let id = fs.resolve_path(&options.id);
        let entries = options
            .entries
            .as_ref()
            .map(|entries| entries.iter().map(|e| fs.resolve_path(e)).collect());
        let tsconfig = options.tsconfig.as_ref().map(|t| fs.resolve_path(t));

        Self {
            options,
            context,
            fs,
            id,
            entries,
            tsconfig,
        }
    }

    fn builder<'b>(
        &'b self,
        engine: &'b dyn TypeEngine,
        frontend: Option<&'b Frontend>,
    ) -> ProgramBuilder<'b> {
        ProgramBuilder::new(engine, Arc::clone(&self.fs), &self.id)
            .with_entries(self.entries.as_deref())
            .with_frontend(frontend, self.options.frontend)
    }
}

/// Return a cached program whose roots cover the request, or build and
/// cache a new one.
///
/// Repeated calls with the same `id` and entries return the same program
/// until a file it contains is invalidated.
pub fn create_or_get_ts_module(
    engine: &dyn TypeEngine,
    frontend: Option<&Frontend>,
    options: &TscOptions<'_>,
) -> Result<TscModule, EmitError> {
    let request = ModuleRequest::new(options);

    if let Some(program) = request
        .context
        .find_program(&request.id, request.entries.as_deref())
    {
        if let Some(file) = program.source_file(&request.id) {
            return Ok(TscModule { program, file });
        }
        debug!(id = %request.id.display(), "cached program lacks the file, rebuilding");
    }

    debug!(id = %request.id.display(), "create program for module");
    let module = create_ts_program(engine, frontend, &request)?;
    debug!(id = %request.id.display(), "created program for module");

    request.context.push(Arc::clone(&module.program));
    Ok(module)
}

fn create_ts_program(
    engine: &dyn TypeEngine,
    frontend: Option<&Frontend>,
    request: &ModuleRequest<'_>,
) -> Result<TscModule, EmitError> {
    let options = request.options;
    let base_dir = match &request.tsconfig {
        Some(tsconfig) => parent_dir(tsconfig),
        None => request.fs.resolve_path(&options.cwd),
    };
    let parsed = engine.parse_config_content(&options.tsconfig_raw, request.fs.as_ref(), &base_dir);
    if !parsed.errors.is_empty() {
        debug!(count = parsed.errors.len(), "tsconfig content has diagnostics");
    }

    let builder = request.builder(engine, frontend);

    if let Some(tsconfig) = &request.tsconfig
        && options.build
    {
        let projects = build_solution(engine, tsconfig, options.incremental, request.context);
        debug!(?projects, "collected projects");

        if let Some(project) =
            find_project_containing_file(engine, &projects, &request.id, request.fs.as_ref())?
        {
            debug!(project = %project.tsconfig_path.display(), "creating program for project");
            return builder.build(&project.parsed_config, &project.base_dir());
        }
    }

    builder.build(&parsed, &base_dir)
}
