//! Locating the sub-project that owns a file.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::diagnostic::{EmitError, FormatHost, format_diagnostics};
use crate::engine::TypeEngine;
use crate::file::FileSystem;
use crate::tsconfig::ParsedConfig;

/// A sub-project configuration that includes a requested file.
#[derive(Debug, Clone)]
pub struct ResolvedProject {
    /// The parsed configuration.
    pub parsed_config: ParsedConfig,
    /// Where the configuration was read from.
    pub tsconfig_path: PathBuf,
}

impl ResolvedProject {
    /// The directory the configuration's relative paths resolve against.
    pub fn base_dir(&self) -> PathBuf {
        crate::file::parent_dir(&self.tsconfig_path)
    }
}

/// Read and parse one tsconfig file through `fs`.
///
/// Unrecoverable diagnostics (unreadable file, invalid JSON) fail with
/// [`EmitError::ConfigParse`].
pub fn parse_tsconfig(
    engine: &dyn TypeEngine,
    tsconfig_path: &Path,
    fs: &dyn FileSystem,
) -> Result<ParsedConfig, EmitError> {
    engine
        .parse_config_file(tsconfig_path, fs)
        .map_err(|diagnostics| {
            EmitError::config_parse(
                tsconfig_path,
                format_diagnostics(&diagnostics, &FormatHost::default()),
            )
        })
}

/// Find the first project in `projects` whose file list includes
/// `target_file`.
///
/// Projects are checked in the given order and the first match wins, even
/// when later projects also include the file. `Ok(None)` means no project
/// owns the file.
pub fn find_project_containing_file(
    engine: &dyn TypeEngine,
    projects: &[PathBuf],
    target_file: &Path,
    fs: &dyn FileSystem,
) -> Result<Option<ResolvedProject>, EmitError> {
    let target = fs.resolve_path(target_file);

    for tsconfig_path in projects {
        let parsed_config = parse_tsconfig(engine, tsconfig_path, fs)?;
        if parsed_config
            .file_names
            .iter()
            .any(|name| fs.resolve_path(name) == target)
        {
            debug!(
                file = %target.display(),
                project = %tsconfig_path.display(),
                "found owning project"
            );
            return Ok(Some(ResolvedProject {
                parsed_config,
                tsconfig_path: tsconfig_path.clone(),
            }));
        }
    }
    Ok(None)
}
