//! Diagnostic formatting utilities.
//!
//! Output follows the compiler's plain format, one diagnostic per line:
//!
//! ```text
//! src/index.ts(3,7): error TS2322: Type 'string' is not assignable to type 'number'.
//! ```

use std::fmt::Write;
use std::path::{Path, PathBuf};

use super::info::{Diagnostic, DiagnosticCategory};
use crate::config::Config;

// ============================================================================
// FormatHost
// ============================================================================

/// Environment used to print file names and line breaks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatHost {
    /// Directory file names are printed relative to.
    pub current_directory: PathBuf,
    /// Line terminator appended after every diagnostic.
    pub new_line: String,
    /// Whether file names compare case-sensitively.
    pub case_sensitive_file_names: bool,
}

impl FormatHost {
    /// Build a host from the global configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            current_directory: config.current_dir(),
            new_line: config.new_line.clone(),
            case_sensitive_file_names: config.case_sensitive_file_names,
        }
    }

    /// Canonical form of a file name for comparisons.
    pub fn canonical_file_name(&self, name: &str) -> String {
        if self.case_sensitive_file_names {
            name.to_owned()
        } else {
            name.to_lowercase()
        }
    }

    /// Print `path` relative to the current directory when it lies inside it.
    pub fn relative_file_name(&self, path: &Path) -> String {
        let display = || path.to_string_lossy().into_owned();
        if self.current_directory.as_os_str().is_empty() {
            return display();
        }

        let canonical = |p: &Path| PathBuf::from(self.canonical_file_name(&p.to_string_lossy()));
        let file = canonical(path);
        let dir = canonical(&self.current_directory);
        match file.strip_prefix(&dir) {
            Ok(rest) if !rest.as_os_str().is_empty() => {
                // Same component count in both forms; keep the original casing
                let skip = path.components().count() - rest.components().count();
                path.components()
                    .skip(skip)
                    .collect::<PathBuf>()
                    .to_string_lossy()
                    .into_owned()
            }
            _ => display(),
        }
    }
}

impl Default for FormatHost {
    fn default() -> Self {
        Self::from_config(crate::config::get())
    }
}

// ============================================================================
// Options
// ============================================================================

/// Options for controlling diagnostic formatting.
///
/// # Example
///
/// ```ignore
/// use dts_batch::diagnostic::DiagnosticOptions;
///
/// // Default: plain text, safe to hand back to a bundler
/// let opts = DiagnosticOptions::default();
///
/// // ANSI colors for terminal output
/// let opts = DiagnosticOptions::colored();
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DiagnosticOptions {
    /// Whether to use ANSI colors in output.
    pub colored: bool,
}

impl DiagnosticOptions {
    /// Create options for colored terminal output.
    pub fn colored() -> Self {
        Self { colored: true }
    }

    /// Create options for plain text output (no ANSI colors).
    pub fn plain() -> Self {
        Self { colored: false }
    }

    /// Set whether to use colors.
    pub fn with_colored(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }
}

// ============================================================================
// Coloring
// ============================================================================

#[cfg(feature = "colored-diagnostics")]
fn colorize(text: &str, category: DiagnosticCategory) -> String {
    use owo_colors::OwoColorize;
    match category {
        DiagnosticCategory::Error => text.red().to_string(),
        DiagnosticCategory::Warning => text.yellow().to_string(),
        DiagnosticCategory::Suggestion | DiagnosticCategory::Message => text.blue().to_string(),
    }
}

#[cfg(feature = "colored-diagnostics")]
fn colorize_location(text: &str) -> String {
    use owo_colors::OwoColorize;
    text.cyan().to_string()
}

#[cfg(not(feature = "colored-diagnostics"))]
fn colorize(text: &str, _category: DiagnosticCategory) -> String {
    text.to_owned()
}

#[cfg(not(feature = "colored-diagnostics"))]
fn colorize_location(text: &str) -> String {
    text.to_owned()
}

// ============================================================================
// Formatting
// ============================================================================

/// Format diagnostics as plain text.
pub fn format_diagnostics(diagnostics: &[Diagnostic], host: &FormatHost) -> String {
    format_diagnostics_with_options(diagnostics, host, DiagnosticOptions::plain())
}

/// Format diagnostics with explicit options.
pub fn format_diagnostics_with_options(
    diagnostics: &[Diagnostic],
    host: &FormatHost,
    options: DiagnosticOptions,
) -> String {
    let mut out = String::new();
    for diagnostic in diagnostics {
        format_one(&mut out, diagnostic, host, options);
    }
    out
}

fn format_one(out: &mut String, diag: &Diagnostic, host: &FormatHost, options: DiagnosticOptions) {
    if let Some(file) = &diag.file {
        let name = host.relative_file_name(file);
        let location = match diag.start {
            Some(pos) => format!("{name}({},{})", pos.line + 1, pos.column + 1),
            None => name,
        };
        let location = if options.colored {
            colorize_location(&location)
        } else {
            location
        };
        let _ = write!(out, "{location}: ");
    }

    let category = if options.colored {
        colorize(diag.category.as_str(), diag.category)
    } else {
        diag.category.as_str().to_owned()
    };
    let _ = write!(
        out,
        "{category} TS{}: {}{}",
        diag.code, diag.message, host.new_line
    );
}
