//! Configuration for dts-batch.
//!
//! This module provides the runtime settings used when printing diagnostics
//! (working directory, line terminator, file-name case sensitivity).
//! Use [`ConfigBuilder`] at application startup to override the defaults.

use std::path::PathBuf;
use std::sync::OnceLock;

/// Global configuration, initialized via [`ConfigBuilder::init`].
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Runtime configuration for dts-batch.
#[derive(Debug, Clone)]
pub struct Config {
    /// Line terminator used in formatted diagnostics.
    pub new_line: String,
    /// Whether file names compare case-sensitively.
    pub case_sensitive_file_names: bool,
    /// Directory diagnostics are printed relative to.
    /// `None` means the process working directory at formatting time.
    pub current_dir: Option<PathBuf>,
}

impl Config {
    /// The directory diagnostics are printed relative to.
    pub fn current_dir(&self) -> PathBuf {
        match &self.current_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().unwrap_or_default(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            new_line: if cfg!(windows) { "\r\n" } else { "\n" }.to_string(),
            case_sensitive_file_names: !cfg!(any(windows, target_os = "macos")),
            current_dir: None,
        }
    }
}

/// Configuration builder for fluent API.
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    new_line: Option<String>,
    case_sensitive_file_names: Option<bool>,
    current_dir: Option<PathBuf>,
}

impl ConfigBuilder {
    /// Create a new configuration builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the line terminator for formatted diagnostics.
    ///
    /// Default: `"\n"` (`"\r\n"` on Windows)
    ///
    /// # Example
    ///
    /// ```
    /// use dts_batch::config::ConfigBuilder;
    ///
    /// ConfigBuilder::new()
    ///     .new_line("\n")
    ///     .init();
    /// ```
    pub fn new_line(mut self, new_line: impl Into<String>) -> Self {
        self.new_line = Some(new_line.into());
        self
    }

    /// Set whether file names compare case-sensitively.
    pub fn case_sensitive_file_names(mut self, sensitive: bool) -> Self {
        self.case_sensitive_file_names = Some(sensitive);
        self
    }

    /// Pin the directory diagnostics are printed relative to.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// Build and initialize the global configuration.
    ///
    /// This can only be called once. Subsequent calls are ignored.
    /// Returns `true` if configuration was set, `false` if already initialized.
    pub fn init(self) -> bool {
        let defaults = Config::default();
        let config = Config {
            new_line: self.new_line.unwrap_or(defaults.new_line),
            case_sensitive_file_names: self
                .case_sensitive_file_names
                .unwrap_or(defaults.case_sensitive_file_names),
            current_dir: self.current_dir,
        };
        CONFIG.set(config).is_ok()
    }
}

/// Initialize dts-batch with default configuration.
///
/// This is equivalent to `ConfigBuilder::new().init()`.
pub fn init_default() -> bool {
    ConfigBuilder::new().init()
}

/// Get the current configuration, or default if not initialized.
pub fn get() -> &'static Config {
    CONFIG.get_or_init(Config::default)
}
