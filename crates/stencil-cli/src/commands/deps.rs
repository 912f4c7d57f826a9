//! `stencil deps` - sync dependency versions and the lockfile.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use stencil_adapters::{LocalFilesystem, manifest_format};
use stencil_core::{
    application::DependencySyncService,
    domain::{ManifestScheme, ReplaceScope, SyncMode, SyncReport},
};

use crate::{
    cli::{DepsArgs, ManifestArgs},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(
    args: DepsArgs,
    root: &Path,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let mode = super::mode(args.check);
    let report = run(root, &config, &args.manifest, mode)?;
    super::finish(&[report], mode, &output)
}

/// Manifest settings after applying flags over config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ManifestSettings {
    pub scheme: ManifestScheme,
    pub scope: ReplaceScope,
    pub lockfile: Option<PathBuf>,
}

impl ManifestSettings {
    pub(crate) fn resolve(args: &ManifestArgs, config: &AppConfig) -> Self {
        let scheme = args.scheme.map(Into::into).unwrap_or(config.deps.scheme);
        let scope = args.scope.map(Into::into).unwrap_or(config.deps.scope);
        let lockfile = if args.no_lockfile {
            None
        } else if let Some(name) = &args.lockfile {
            Some(name.clone())
        } else {
            config.deps.lockfile_for(scheme)
        };
        Self {
            scheme,
            scope,
            lockfile,
        }
    }
}

/// One dependency sync pass against the local filesystem.
#[instrument(skip_all)]
pub(crate) fn run(
    root: &Path,
    config: &AppConfig,
    args: &ManifestArgs,
    mode: SyncMode,
) -> CliResult<SyncReport> {
    let settings = ManifestSettings::resolve(args, config);
    debug!(?settings, "Manifest settings resolved");

    let service = DependencySyncService::new(
        Box::new(LocalFilesystem::new()),
        manifest_format(settings.scheme, settings.scope),
    );
    let report = service.sync(
        &super::layout(root, config),
        &config.layout.manifest_file,
        settings.lockfile.as_deref(),
        mode,
    )?;
    Ok(report)
}
