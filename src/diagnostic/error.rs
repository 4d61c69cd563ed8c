//! Emission error type.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for failures that abort a single emission request.
///
/// Type errors found while emitting are *not* reported through this type;
/// they come back as [`TscResult::Error`](crate::TscResult::Error) so batch
/// callers can keep going.
///
/// # Example
///
/// ```ignore
/// match emitter.emit(&options) {
///     Ok(TscResult::Emitted { code, .. }) => { /* success */ }
///     Ok(TscResult::Error(text)) => eprintln!("{text}"),
///     Err(EmitError::SourceNotFound { path }) => {
///         eprintln!("missing: {}", path.display());
///     }
///     Err(e) => eprintln!("{e}"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum EmitError {
    /// A tsconfig file could not be read or parsed.
    #[error("Unable to read {}: {diagnostics}", path.display())]
    ConfigParse {
        /// The configuration file.
        path: PathBuf,
        /// Formatted diagnostics.
        diagnostics: String,
    },

    /// The target file exists neither in memory nor on disk.
    #[error("Source file not found: {}", path.display())]
    SourceNotFound {
        /// The requested file.
        path: PathBuf,
    },

    /// The target file exists but the constructed program does not contain it.
    #[error(
        "Unable to load file {} from the program. This is likely a bug in root file resolution, please report it.",
        path.display()
    )]
    InternalResolution {
        /// The requested file.
        path: PathBuf,
    },

    /// The alternate front-end could not be loaded.
    #[error("Failed to load the alternate front-end. Please install it. ({reason})")]
    PluginLoad {
        /// Why loading failed.
        reason: String,
    },

    /// The request asked for the alternate front-end but none is registered.
    #[error("The alternate front-end was requested but no loader is registered")]
    NoFrontend,

    /// The emitted declaration map is not valid JSON.
    #[error("invalid declaration map: {0}")]
    InvalidSourceMap(#[from] serde_json::Error),
}

impl EmitError {
    /// Create a configuration error.
    pub fn config_parse(path: impl Into<PathBuf>, diagnostics: impl Into<String>) -> Self {
        Self::ConfigParse {
            path: path.into(),
            diagnostics: diagnostics.into(),
        }
    }

    /// Whether the error is caused by user input rather than a bug or the
    /// environment.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::ConfigParse { .. } | Self::SourceNotFound { .. } | Self::NoFrontend
        )
    }

    /// Get the formatted diagnostics if this is a configuration error.
    pub fn diagnostics(&self) -> Option<&str> {
        match self {
            Self::ConfigParse { diagnostics, .. } => Some(diagnostics),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = EmitError::config_parse("/p/tsconfig.json", "error TS5083: Cannot read file.\n");
        assert_eq!(
            err.to_string(),
            "Unable to read /p/tsconfig.json: error TS5083: Cannot read file.\n"
        );
        assert_eq!(err.diagnostics(), Some("error TS5083: Cannot read file.\n"));
        assert!(err.is_user_error());

        let err = EmitError::SourceNotFound {
            path: "/p/missing.ts".into(),
        };
        assert_eq!(err.to_string(), "Source file not found: /p/missing.ts");

        let err = EmitError::InternalResolution {
            path: "/p/a.ts".into(),
        };
        assert!(err.to_string().contains("/p/a.ts"));
        assert!(!err.is_user_error());
        assert_eq!(err.diagnostics(), None);
    }
}
