//! Composite (solution) builds.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::context::Context;
use crate::engine::{SolutionBuildOptions, TypeEngine};
use crate::file::{DiskFs, FileSystem, OverlayFs, WritePolicy};

/// Remove repeated paths, keeping the first occurrence of each.
pub fn dedup_paths(paths: impl IntoIterator<Item = PathBuf>) -> Vec<PathBuf> {
    let mut seen: FxHashSet<PathBuf> = FxHashSet::default();
    paths
        .into_iter()
        .filter(|path| seen.insert(path.clone()))
        .collect()
}

/// Build the project at `tsconfig` together with every project it
/// references.
///
/// With `incremental`, build state (`.tsbuildinfo`) is mirrored to disk so the
/// next run can skip up-to-date projects. Without it, every project is rebuilt
/// and build state only lives in `context`'s in-memory files.
///
/// Returns the config path of every project compiled, de-duplicated, in the
/// order the build visited them.
pub fn build_solution(
    engine: &dyn TypeEngine,
    tsconfig: &Path,
    incremental: bool,
    context: &Context,
) -> Vec<PathBuf> {
    debug!(
        tsconfig = %tsconfig.display(),
        incremental,
        "building projects"
    );

    let system: Arc<dyn FileSystem> = Arc::new(OverlayFs::new(
        context.files().clone(),
        DiskFs::new(),
        WritePolicy::for_incremental(incremental),
    ));
    let options = SolutionBuildOptions {
        force: !incremental,
        verbose: true,
    };

    let mut projects = Vec::new();
    let status = engine.build_solution(
        system.as_ref(),
        &[tsconfig.to_path_buf()],
        options,
        &mut |project: &Path| projects.push(project.to_path_buf()),
    );
    debug!(tsconfig = %tsconfig.display(), ?status, "built solution");

    dedup_paths(projects)
}
