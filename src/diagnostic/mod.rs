//! Diagnostics reported by the type engine, their formatting, and the
//! crate error type.

mod error;
mod format;
mod info;

pub use error::EmitError;
pub use format::{
    DiagnosticOptions, FormatHost, format_diagnostics, format_diagnostics_with_options,
};
pub use info::{
    Diagnostic, DiagnosticCategory, DiagnosticSummary, LineColumn, count_diagnostics,
    errors_only, has_errors,
};
