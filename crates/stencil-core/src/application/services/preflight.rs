//! Path validation and guarded writes shared by the synchronizers.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{
    application::{ApplicationError, PathKind, ports::Filesystem},
    domain::{SyncLayout, SyncMode},
    error::StencilResult,
};

/// Check the run's preconditions in order: source dir, target dir, source
/// file, target file. Returns the source and target file paths.
pub(crate) fn require_paths(
    fs: &dyn Filesystem,
    layout: &SyncLayout,
    file: &Path,
) -> StencilResult<(PathBuf, PathBuf)> {
    require(fs.is_dir(&layout.source_dir()), PathKind::SourceDir, layout.source_dir())?;
    require(fs.is_dir(&layout.target_dir()), PathKind::TargetDir, layout.target_dir())?;

    let source = layout.source(file);
    let target = layout.target(file);
    require(fs.is_file(&source), PathKind::SourceFile, source.clone())?;
    require(fs.is_file(&target), PathKind::TargetFile, target.clone())?;

    Ok((source, target))
}

pub(crate) fn require(present: bool, kind: PathKind, path: PathBuf) -> StencilResult<()> {
    if present {
        Ok(())
    } else {
        Err(ApplicationError::MissingPath { kind, path }.into())
    }
}

/// Write `updated` to `path` only in write mode and only if it differs from
/// `original`. Returns whether the file was written.
pub(crate) fn write_if_changed(
    fs: &dyn Filesystem,
    path: &Path,
    original: &str,
    updated: &str,
    mode: SyncMode,
) -> StencilResult<bool> {
    if original == updated {
        debug!(path = %path.display(), "Target already in sync");
        return Ok(false);
    }
    if !mode.writes() {
        debug!(path = %path.display(), "Check mode, not writing");
        return Ok(false);
    }
    fs.write_file(path, updated)?;
    Ok(true)
}
