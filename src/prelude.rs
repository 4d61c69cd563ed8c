//! Prelude module for convenient imports.
//!
//! ```ignore
//! use dts_batch::prelude::*;
//! ```

// Emission
pub use crate::process::{Emitter, SourceMap, StripPrivateFields, TscOptions, TscResult, tsc_emit};

// Program cache
pub use crate::context::{Context, TscModule, create_context, invalidate_context_file};

// Diagnostics
pub use crate::diagnostic::{
    Diagnostic, DiagnosticCategory, DiagnosticOptions, DiagnosticSummary, EmitError, FormatHost,
};

// Engine contract
pub use crate::engine::{
    CompilerHost, CreateProgramOptions, CustomTransformers, DeclarationTransform, EmitOutput,
    EmitRequest, ExitStatus, Program, ProgramFactory, SolutionBuildOptions, SourceFile,
    StandardProgramFactory, TypeEngine,
};

// Files
pub use crate::file::{DiskFs, FileMap, FileSystem, OverlayFs, WritePolicy};

// Front-end
pub use crate::frontend::{Frontend, FrontendLoader};

// Configuration
pub use crate::tsconfig::{CompilerOptions, ParsedConfig, ProjectReference, TsConfigJson};
