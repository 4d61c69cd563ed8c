//! Emission request options.

use std::path::PathBuf;

use serde_json::{Map, Value};

use crate::context::Context;

/// One emission request.
///
/// # Example
///
/// ```ignore
/// let options = TscOptions::new("src/index.ts", "/project")
///     .with_tsconfig("/project/tsconfig.json", tsconfig_json)
///     .with_build(true);
/// ```
#[derive(Debug, Clone)]
pub struct TscOptions<'a> {
    /// File to emit declarations for.
    pub id: PathBuf,
    /// Explicit entry files. When set, they replace the tsconfig's own file
    /// list as program roots.
    pub entries: Option<Vec<PathBuf>>,
    /// Root tsconfig path.
    pub tsconfig: Option<PathBuf>,
    /// Raw content of the root tsconfig.
    pub tsconfig_raw: Value,
    /// Working directory, the base directory when no tsconfig is given.
    pub cwd: PathBuf,
    /// Build the whole project-reference graph and use the owning project.
    pub build: bool,
    /// Persist solution build state to disk.
    pub incremental: bool,
    /// Construct programs with the alternate front-end.
    pub frontend: bool,
    /// Program cache. `None` uses [`Context::global`].
    pub context: Option<&'a Context>,
}

impl<'a> TscOptions<'a> {
    /// Create a request for `id` with an empty tsconfig.
    pub fn new(id: impl Into<PathBuf>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            id: id.into(),
            entries: None,
            tsconfig: None,
            tsconfig_raw: Value::Object(Map::new()),
            cwd: cwd.into(),
            build: false,
            incremental: false,
            frontend: false,
            context: None,
        }
    }

    /// Set explicit entry files.
    pub fn with_entries<I, P>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.entries = Some(entries.into_iter().map(Into::into).collect());
        self
    }

    /// Set the root tsconfig path and its raw content.
    pub fn with_tsconfig(mut self, path: impl Into<PathBuf>, raw: Value) -> Self {
        self.tsconfig = Some(path.into());
        self.tsconfig_raw = raw;
        self
    }

    /// Set raw tsconfig content without a file path.
    pub fn with_tsconfig_raw(mut self, raw: Value) -> Self {
        self.tsconfig_raw = raw;
        self
    }

    /// Enable composite building.
    pub fn with_build(mut self, build: bool) -> Self {
        self.build = build;
        self
    }

    /// Persist solution build state to disk.
    pub fn with_incremental(mut self, incremental: bool) -> Self {
        self.incremental = incremental;
        self
    }

    /// Use the alternate front-end.
    pub fn with_frontend(mut self, frontend: bool) -> Self {
        self.frontend = frontend;
        self
    }

    /// Use `context` instead of the global one.
    pub fn with_context(mut self, context: &'a Context) -> Self {
        self.context = Some(context);
        self
    }

    /// The program cache for this request.
    pub fn context(&self) -> &'a Context {
        match self.context {
            Some(context) => context,
            None => Context::global(),
        }
    }
}
