//! Dependency Sync - copy dependency specifiers from the example package's
//! manifest into the template's manifest, then mirror the lockfile.
//!
//! Workflow:
//! 1. Validate source/target directories and manifests
//! 2. Extract dependencies grouped by dependency group
//! 3. Rewrite matching dependencies in the target manifest
//! 4. Copy the lockfile verbatim (a missing source lockfile only warns)
//! 5. Report

use std::path::Path;

use tracing::{info, instrument, warn};

use crate::{
    application::{
        ports::{Filesystem, ManifestFormat},
        services::preflight,
    },
    domain::{LockfileOutcome, SyncKind, SyncLayout, SyncMode, SyncReport},
    error::StencilResult,
};

/// Synchronizer for dependency manifests and their lockfile.
pub struct DependencySyncService {
    filesystem: Box<dyn Filesystem>,
    format: Box<dyn ManifestFormat>,
}

impl DependencySyncService {
    pub fn new(filesystem: Box<dyn Filesystem>, format: Box<dyn ManifestFormat>) -> Self {
        Self { filesystem, format }
    }

    /// Run one sync pass.
    ///
    /// `manifest` and `lockfile` are relative to both package directories.
    /// Pass `None` for `lockfile` to skip mirroring.
    #[instrument(
        skip_all,
        fields(
            scheme = %self.format.scheme(),
            manifest = %manifest.display(),
            mode = ?mode
        )
    )]
    pub fn sync(
        &self,
        layout: &SyncLayout,
        manifest: &Path,
        lockfile: Option<&Path>,
        mode: SyncMode,
    ) -> StencilResult<SyncReport> {
        let (source, target) =
            preflight::require_paths(self.filesystem.as_ref(), layout, manifest)?;

        info!(source = %source.display(), "Parsing example manifest");
        let deps = self.format.extract(&self.filesystem.read_to_string(&source)?)?;
        info!(
            groups = deps.group_count(),
            packages = deps.package_count(),
            "Found dependency groups to sync"
        );

        let original = self.filesystem.read_to_string(&target)?;
        let rewrite = self.format.apply(&original, &deps)?;

        let mut report = SyncReport::new(SyncKind::Dependencies, source, target);
        report.extracted = deps.package_count();
        report.stale = original != rewrite.content;
        report.written = preflight::write_if_changed(
            self.filesystem.as_ref(),
            &report.target,
            &original,
            &rewrite.content,
            mode,
        )?;
        report.changes = rewrite.changes;

        if let Some(lockfile) = lockfile {
            report.lockfile = Some(self.mirror_lockfile(layout, lockfile, mode)?);
        }

        info!(written = report.written, "Version sync completed");
        Ok(report)
    }

    /// Copy the source lockfile over the target lockfile.
    ///
    /// In check mode the two files are compared instead.
    fn mirror_lockfile(
        &self,
        layout: &SyncLayout,
        lockfile: &Path,
        mode: SyncMode,
    ) -> StencilResult<LockfileOutcome> {
        let from = layout.source(lockfile);
        let to = layout.target(lockfile);

        if !self.filesystem.is_file(&from) {
            warn!(path = %from.display(), "Source lockfile not found");
            return Ok(LockfileOutcome::SourceMissing { path: from });
        }

        if mode.writes() {
            self.filesystem.copy_file(&from, &to)?;
            info!(path = %to.display(), "Lockfile synced");
            return Ok(LockfileOutcome::Copied { from, to });
        }

        let in_sync = self.filesystem.is_file(&to)
            && self.filesystem.read_bytes(&from)? == self.filesystem.read_bytes(&to)?;
        Ok(if in_sync {
            LockfileOutcome::InSync { path: to }
        } else {
            LockfileOutcome::OutOfDate { path: to }
        })
    }
}
