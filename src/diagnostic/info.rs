//! Structured diagnostic information.

use std::fmt;
use std::path::PathBuf;

// ============================================================================
// Diagnostic
// ============================================================================

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCategory {
    /// Warning.
    Warning,
    /// Error. Only errors fail an emission.
    Error,
    /// Suggestion.
    Suggestion,
    /// Informational message.
    Message,
}

impl DiagnosticCategory {
    /// Lower-case name as printed in formatted output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Suggestion => "suggestion",
            Self::Message => "message",
        }
    }
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Zero-based line and column of a diagnostic start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineColumn {
    /// Line (0-indexed).
    pub line: usize,
    /// Column (0-indexed).
    pub column: usize,
}

/// A diagnostic reported by the type engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// File the diagnostic belongs to, if any.
    pub file: Option<PathBuf>,
    /// Start position inside `file`.
    pub start: Option<LineColumn>,
    /// Severity.
    pub category: DiagnosticCategory,
    /// Numeric diagnostic code (printed as `TS<code>`).
    pub code: u32,
    /// Flattened message text.
    pub message: String,
}

impl Diagnostic {
    /// Create an error diagnostic without a location.
    pub fn error(code: u32, message: impl Into<String>) -> Self {
        Self {
            file: None,
            start: None,
            category: DiagnosticCategory::Error,
            code,
            message: message.into(),
        }
    }

    /// Create a warning diagnostic without a location.
    pub fn warning(code: u32, message: impl Into<String>) -> Self {
        Self {
            category: DiagnosticCategory::Warning,
            ..Self::error(code, message)
        }
    }

    /// Attach a file.
    pub fn with_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Attach a start position (0-indexed).
    pub fn at(mut self, line: usize, column: usize) -> Self {
        self.start = Some(LineColumn { line, column });
        self
    }

    /// Whether this diagnostic has error severity.
    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }
}

// ============================================================================
// DiagnosticSummary
// ============================================================================

/// Summary of diagnostic counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiagnosticSummary {
    /// Number of errors.
    pub errors: usize,
    /// Number of warnings.
    pub warnings: usize,
}

impl DiagnosticSummary {
    /// Create summary from diagnostics.
    pub fn from_diagnostics(diagnostics: &[Diagnostic]) -> Self {
        let (errors, warnings) = count_diagnostics(diagnostics);
        Self { errors, warnings }
    }

    /// Total number of counted diagnostics.
    pub fn total(&self) -> usize {
        self.errors + self.warnings
    }

    /// Whether there are any errors.
    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }

    /// Whether nothing was counted.
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

impl fmt::Display for DiagnosticSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.errors, self.warnings) {
            (0, 0) => write!(f, "no diagnostics"),
            (e, 0) => write!(f, "{e} error{}", if e == 1 { "" } else { "s" }),
            (0, w) => write!(f, "{w} warning{}", if w == 1 { "" } else { "s" }),
            (e, w) => write!(
                f,
                "{e} error{}, {w} warning{}",
                if e == 1 { "" } else { "s" },
                if w == 1 { "" } else { "s" }
            ),
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Count errors and warnings.
pub fn count_diagnostics(diagnostics: &[Diagnostic]) -> (usize, usize) {
    diagnostics
        .iter()
        .fold((0, 0), |(errors, warnings), d| match d.category {
            DiagnosticCategory::Error => (errors + 1, warnings),
            DiagnosticCategory::Warning => (errors, warnings + 1),
            _ => (errors, warnings),
        })
}

/// Check if any diagnostic is an error.
pub fn has_errors(diagnostics: &[Diagnostic]) -> bool {
    diagnostics.iter().any(Diagnostic::is_error)
}

/// Keep only error-severity diagnostics.
pub fn errors_only(diagnostics: Vec<Diagnostic>) -> Vec<Diagnostic> {
    diagnostics.into_iter().filter(Diagnostic::is_error).collect()
}
