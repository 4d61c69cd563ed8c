//! The type engine contract.
//!
//! Type checking and declaration generation live outside this crate. The
//! engine is consumed through two traits:
//!
//! - [`TypeEngine`]: config parsing, program construction, solution builds
//! - [`Program`]: a compiled unit exposing its file graph and an emit
//!
//! Programs are shared as `Arc<dyn Program>`; two handles refer to the same
//! program when [`Arc::ptr_eq`] holds.

mod ast;
mod host;
#[cfg(test)]
pub(crate) mod mock;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;

use crate::diagnostic::Diagnostic;
use crate::file::FileSystem;
use crate::tsconfig::{CompilerOptions, ParsedConfig, ProjectReference};

pub use ast::{
    Block, CustomTransformers, DeclarationFile, DeclarationTransform, Node, PropertyName,
    PropertySignature, walk_nodes,
};
pub use host::CompilerHost;

// =============================================================================
// Source files
// =============================================================================

/// A source file loaded into a program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    file_name: PathBuf,
    text: Arc<str>,
    is_declaration_file: bool,
}

impl SourceFile {
    /// Create a source file. Declaration files are recognized by name.
    pub fn new(file_name: impl Into<PathBuf>, text: impl Into<Arc<str>>) -> Self {
        let file_name = file_name.into();
        let is_declaration_file = is_declaration_file_name(&file_name);
        Self {
            file_name,
            text: text.into(),
            is_declaration_file,
        }
    }

    /// Absolute file name.
    pub fn file_name(&self) -> &Path {
        &self.file_name
    }

    /// Full source text.
    pub fn full_text(&self) -> &str {
        &self.text
    }

    /// Whether this is a `.d.ts`-style declaration file.
    pub fn is_declaration_file(&self) -> bool {
        self.is_declaration_file
    }
}

/// `a.d.ts`, `a.d.mts`, `a.d.cts` and arbitrary-extension `a.d.css.ts`.
pub fn is_declaration_file_name(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    if [".d.ts", ".d.mts", ".d.cts"]
        .iter()
        .any(|ext| name.ends_with(ext))
    {
        return true;
    }
    name.strip_suffix(".ts")
        .and_then(|stem| stem.rsplit_once('.'))
        .is_some_and(|(stem, _)| stem.ends_with(".d"))
}

// =============================================================================
// Program
// =============================================================================

/// What to emit and how.
#[derive(Debug)]
pub struct EmitRequest<'a> {
    /// The single file to emit.
    pub target: &'a SourceFile,
    /// Only write declaration files.
    pub emit_only_dts: bool,
    /// Produce declarations even when options would suppress them.
    pub force_dts_emit: bool,
    /// Transforms run on the generated declarations.
    pub transformers: &'a mut CustomTransformers,
}

/// Outcome of [`Program::emit`].
#[derive(Debug, Clone, Default)]
pub struct EmitOutput {
    /// Whether output was suppressed.
    pub emit_skipped: bool,
    /// Diagnostics produced while emitting.
    pub diagnostics: Vec<Diagnostic>,
}

/// A compiled unit over a root file set and compiler options.
///
/// Programs are never mutated in place. Replacing one means discarding it
/// and building a new one.
pub trait Program: Send + Sync {
    /// The files the program was created from.
    fn root_file_names(&self) -> &[PathBuf];

    /// Every source file in the program, roots and their dependencies.
    fn source_files(&self) -> &[Arc<SourceFile>];

    /// Look up a contained source file by absolute name.
    fn source_file(&self, path: &Path) -> Option<Arc<SourceFile>>;

    /// Emit `request.target`, handing every output file to `write`.
    fn emit(&self, request: EmitRequest<'_>, write: &mut dyn FnMut(&Path, &str)) -> EmitOutput;

    /// Syntactic, option and semantic diagnostics for the whole program.
    fn pre_emit_diagnostics(&self) -> Vec<Diagnostic>;

    /// Whether any contained source file is named `path`.
    fn contains_file(&self, path: &Path) -> bool {
        self.source_files()
            .iter()
            .any(|file| file.file_name() == path)
    }
}

// =============================================================================
// TypeEngine
// =============================================================================

/// Inputs to [`TypeEngine::create_program`].
#[derive(Debug, Clone)]
pub struct CreateProgramOptions {
    /// Root files, absolute and de-duplicated.
    pub root_names: Vec<PathBuf>,
    /// Effective compiler options.
    pub options: CompilerOptions,
    /// File access for the program.
    pub host: CompilerHost,
    /// Referenced projects of the owning configuration.
    pub project_references: Vec<ProjectReference>,
}

/// Flags for [`TypeEngine::build_solution`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolutionBuildOptions {
    /// Rebuild every project even if it is up to date.
    pub force: bool,
    /// Report progress through [`FileSystem::write`].
    pub verbose: bool,
}

/// Result of a solution build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// Everything built.
    Success,
    /// Errors were found and outputs were not written.
    DiagnosticsPresentOutputsSkipped,
    /// Errors were found but outputs were written.
    DiagnosticsPresentOutputsGenerated,
    /// A project could not be built.
    InvalidProjectOutputsSkipped,
    /// The reference graph has a cycle.
    ProjectReferenceCycleOutputsSkipped,
}

impl ExitStatus {
    /// Whether the build finished without errors.
    pub fn is_success(self) -> bool {
        self == Self::Success
    }
}

/// The external type checker and declaration generator.
pub trait TypeEngine: Send + Sync {
    /// Engine version string.
    fn version(&self) -> &str;

    /// Parse raw tsconfig JSON whose relative paths resolve against `base_dir`.
    ///
    /// Problems are reported in [`ParsedConfig::errors`].
    fn parse_config_content(
        &self,
        raw: &Value,
        host: &dyn FileSystem,
        base_dir: &Path,
    ) -> ParsedConfig;

    /// Read and parse a tsconfig file.
    ///
    /// Returns the unrecoverable diagnostics when the file cannot be read or
    /// is not valid JSON.
    fn parse_config_file(
        &self,
        path: &Path,
        host: &dyn FileSystem,
    ) -> Result<ParsedConfig, Vec<Diagnostic>>;

    /// Build a program.
    fn create_program(&self, options: CreateProgramOptions) -> Arc<dyn Program>;

    /// Build the reference graph rooted at `roots`, calling `on_project` with
    /// the config path of every project compiled.
    fn build_solution(
        &self,
        host: &dyn FileSystem,
        roots: &[PathBuf],
        options: SolutionBuildOptions,
        on_project: &mut dyn FnMut(&Path),
    ) -> ExitStatus;
}

// =============================================================================
// Program construction strategies
// =============================================================================

/// A way to construct programs.
///
/// The standard strategy is [`StandardProgramFactory`]; an alternate
/// front-end supplies its own through a [`FrontendLoader`](crate::FrontendLoader).
pub trait ProgramFactory: Send + Sync {
    /// Build a program.
    fn create_program(
        &self,
        engine: &dyn TypeEngine,
        options: CreateProgramOptions,
    ) -> Arc<dyn Program>;
}

/// Builds programs with [`TypeEngine::create_program`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardProgramFactory;

impl ProgramFactory for StandardProgramFactory {
    fn create_program(
        &self,
        engine: &dyn TypeEngine,
        options: CreateProgramOptions,
    ) -> Arc<dyn Program> {
        engine.create_program(options)
    }
}
