//! # dts-batch
//!
//! Declaration (`.d.ts`) emission for bundler pipelines, reusing compiled
//! programs across many requests instead of recompiling for every file.
//!
//! - **Program cache**: programs are kept in a [`Context`] and reused while
//!   their root files cover the request
//! - **File overlay**: in-memory content takes precedence over disk
//! - **Composite projects**: for tsconfigs with `references`, the graph is
//!   built once and the sub-project owning the file is used
//! - **Alternate front-end**: an optional, lazily loaded program strategy
//!
//! Type checking and declaration generation are provided by an external
//! [`TypeEngine`].
//!
//! ## Quick Start
//!
//! ```ignore
//! use dts_batch::{Emitter, TscOptions, TscResult, invalidate_context_file, Context};
//! use std::sync::Arc;
//!
//! let emitter = Emitter::new(Arc::new(engine));
//!
//! let options = TscOptions::new("src/index.ts", "/project")
//!     .with_tsconfig("/project/tsconfig.json", tsconfig_json)
//!     .with_build(true);
//!
//! match emitter.emit(&options)? {
//!     TscResult::Emitted { code, map } => { /* write index.d.ts */ }
//!     TscResult::Error(text) => eprintln!("{text}"),
//! }
//!
//! // After src/index.ts changes on disk
//! invalidate_context_file(Context::global(), Path::new("/project/src/index.ts"));
//! ```
//!
//! ## Modules
//!
//! - [`config`]: Runtime configuration (diagnostic format host)
//! - [`mod@file`]: File system trait, disk and overlay systems
//! - [`tsconfig`]: Typed tsconfig and compiler options
//! - [`engine`]: Type engine contract and declaration nodes
//! - [`context`]: Program cache and invalidation
//! - [`project`]: Solution builds and owning-project lookup
//! - [`program`]: Program construction and cache lookup
//! - [`frontend`]: Alternate front-end loading
//! - [`process`]: Emission
//! - [`diagnostic`]: Diagnostics, formatting and the error type

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod context;
pub mod diagnostic;
pub mod engine;
pub mod file;
pub mod frontend;
pub mod prelude;
pub mod process;
pub mod program;
pub mod project;
pub mod tsconfig;

// =============================================================================
// Emission
// =============================================================================

pub use process::{Emitter, SourceMap, StripPrivateFields, TscOptions, TscResult, tsc_emit};

// =============================================================================
// Program cache
// =============================================================================

pub use context::{Context, TscModule, create_context, invalidate_context_file};
pub use program::{ProgramBuilder, create_or_get_ts_module};
pub use project::{ResolvedProject, build_solution, find_project_containing_file, parse_tsconfig};

// =============================================================================
// Diagnostics
// =============================================================================

pub use diagnostic::{
    // Error type
    EmitError,
    // Engine diagnostics
    Diagnostic, DiagnosticCategory, DiagnosticSummary,
    // Formatting
    DiagnosticOptions, FormatHost, format_diagnostics,
};

// =============================================================================
// Infrastructure
// =============================================================================

pub use config::{Config, ConfigBuilder};
pub use engine::{
    CompilerHost, CreateProgramOptions, Program, ProgramFactory, SourceFile, TypeEngine,
};
pub use file::{DiskFs, FileMap, FileSystem, OverlayFs, WritePolicy};
pub use frontend::{Frontend, FrontendLoader};
pub use tsconfig::{CompilerOptions, ParsedConfig, ProjectReference};
