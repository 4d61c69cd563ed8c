//! Declaration emission.
//!
//! # Example
//!
//! ```ignore
//! use dts_batch::{Emitter, TscOptions, TscResult};
//!
//! let emitter = Emitter::new(engine);
//! let options = TscOptions::new("src/index.ts", "/project")
//!     .with_tsconfig("/project/tsconfig.json", tsconfig_json);
//!
//! match emitter.emit(&options)? {
//!     TscResult::Emitted { code, map } => write_dts(code, map),
//!     TscResult::Error(text) => eprintln!("{text}"),
//! }
//! ```

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::options::TscOptions;
use super::transform::StripPrivateFields;
use crate::context::TscModule;
use crate::diagnostic::{
    Diagnostic, DiagnosticOptions, DiagnosticSummary, EmitError, FormatHost, errors_only,
    format_diagnostics_with_options,
};
use crate::engine::{CustomTransformers, EmitRequest, TypeEngine};
use crate::frontend::{Frontend, FrontendLoader};
use crate::program::create_or_get_ts_module;

// =============================================================================
// Result types
// =============================================================================

/// A version 3 source map for an emitted declaration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceMap {
    /// Format version, always 3.
    pub version: u32,
    /// The generated file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Prefix for `sources`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_root: Option<String>,
    /// Original sources.
    pub sources: Vec<String>,
    /// Inlined source content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources_content: Option<Vec<Option<String>>>,
    /// Symbol names.
    #[serde(default)]
    pub names: Vec<String>,
    /// VLQ-encoded mappings.
    pub mappings: String,
}

/// Outcome of one emission request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TscResult {
    /// Declarations were produced.
    Emitted {
        /// Declaration text.
        code: Option<String>,
        /// Declaration source map, when the project enables them.
        map: Option<SourceMap>,
    },
    /// The engine reported errors. Holds the formatted diagnostics.
    Error(String),
}

impl TscResult {
    /// The declaration text, if emission succeeded.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Emitted { code, .. } => code.as_deref(),
            Self::Error(_) => None,
        }
    }

    /// The declaration source map, if any.
    pub fn map(&self) -> Option<&SourceMap> {
        match self {
            Self::Emitted { map, .. } => map.as_ref(),
            Self::Error(_) => None,
        }
    }

    /// The formatted diagnostics, if emission failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(text) => Some(text),
            Self::Emitted { .. } => None,
        }
    }

    /// Check if emission failed.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

// =============================================================================
// Emitter
// =============================================================================

/// Emits declarations with a type engine, reusing programs across requests.
///
/// ```ignore
/// let emitter = Emitter::new(engine)
///     .with_frontend(VueLoader)
///     .with_diagnostic_options(DiagnosticOptions::colored());
/// ```
pub struct Emitter {
    engine: Arc<dyn TypeEngine>,
    frontend: Option<Frontend>,
    diagnostic_options: DiagnosticOptions,
    format_host: Option<FormatHost>,
}

impl Emitter {
    /// Create an emitter without an alternate front-end.
    pub fn new(engine: Arc<dyn TypeEngine>) -> Self {
        Self {
            engine,
            frontend: None,
            diagnostic_options: DiagnosticOptions::plain(),
            format_host: None,
        }
    }

    /// Register the alternate front-end. It is loaded on the first request
    /// that asks for it.
    pub fn with_frontend(mut self, loader: impl FrontendLoader + 'static) -> Self {
        self.frontend = Some(Frontend::new(loader));
        self
    }

    /// Set how error text is rendered.
    pub fn with_diagnostic_options(mut self, options: DiagnosticOptions) -> Self {
        self.diagnostic_options = options;
        self
    }

    /// Pin the format host instead of deriving it from the global config.
    pub fn with_format_host(mut self, host: FormatHost) -> Self {
        self.format_host = Some(host);
        self
    }

    /// The type engine.
    pub fn engine(&self) -> &dyn TypeEngine {
        self.engine.as_ref()
    }

    /// The alternate front-end, if registered.
    pub fn frontend(&self) -> Option<&Frontend> {
        self.frontend.as_ref()
    }

    /// Emit declarations for `options.id`.
    ///
    /// Configuration and resolution failures are errors. Type errors come
    /// back as [`TscResult::Error`].
    pub fn emit(&self, options: &TscOptions<'_>) -> Result<TscResult, EmitError> {
        let host = self.format_host.clone().unwrap_or_default();
        emit_with(
            self.engine.as_ref(),
            self.frontend.as_ref(),
            options,
            &host,
            self.diagnostic_options,
        )
    }
}

impl std::fmt::Debug for Emitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Emitter")
            .field("engine", &self.engine.version())
            .field("frontend", &self.frontend)
            .field("diagnostic_options", &self.diagnostic_options)
            .finish()
    }
}

/// Emit declarations for `options.id` with plain error text and no
/// alternate front-end.
pub fn tsc_emit(engine: &dyn TypeEngine, options: &TscOptions<'_>) -> Result<TscResult, EmitError> {
    emit_with(
        engine,
        None,
        options,
        &FormatHost::default(),
        DiagnosticOptions::plain(),
    )
}

fn emit_with(
    engine: &dyn TypeEngine,
    frontend: Option<&Frontend>,
    options: &TscOptions<'_>,
    host: &FormatHost,
    diagnostic_options: DiagnosticOptions,
) -> Result<TscResult, EmitError> {
    debug!(id = %options.id.display(), "running tsc emit");
    let TscModule { program, file } = create_or_get_ts_module(engine, frontend, options)?;
    debug!(file = %file.file_name().display(), "got source file");

    let mut code: Option<String> = None;
    let mut map: Option<String> = None;
    let mut transformers = CustomTransformers::new().with_after_declarations(StripPrivateFields);

    let output = program.emit(
        EmitRequest {
            target: file.as_ref(),
            emit_only_dts: true,
            force_dts_emit: true,
            transformers: &mut transformers,
        },
        &mut |name: &Path, text: &str| {
            if name.extension().is_some_and(|ext| ext == "map") {
                debug!(file = %name.display(), "emit dts sourcemap");
                map = Some(text.to_owned());
            } else {
                debug!(file = %name.display(), "emit dts");
                code = Some(text.to_owned());
            }
        },
    );

    let to_error = |errors: &[Diagnostic]| {
        debug!(summary = %DiagnosticSummary::from_diagnostics(errors), "emit failed");
        TscResult::Error(format_diagnostics_with_options(errors, host, diagnostic_options))
    };

    let emit_errors = errors_only(output.diagnostics);
    if !emit_errors.is_empty() {
        return Ok(to_error(&emit_errors));
    }

    if output.emit_skipped {
        let errors = errors_only(program.pre_emit_diagnostics());
        if !errors.is_empty() {
            return Ok(to_error(&errors));
        }
    }

    if code.as_deref().is_none_or(str::is_empty) && file.is_declaration_file() {
        debug!("nothing was emitted, falling back to the source text");
        code = Some(file.full_text().to_owned());
    }

    let map = map
        .map(|text| serde_json::from_str::<SourceMap>(&text))
        .transpose()?;
    Ok(TscResult::Emitted { code, map })
}
