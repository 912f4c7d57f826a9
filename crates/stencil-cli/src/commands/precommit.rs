//! `stencil precommit` - sync hook revisions into the template.

use std::path::Path;

use tracing::instrument;

use stencil_adapters::{LocalFilesystem, PrecommitFormat};
use stencil_core::{
    application::PrecommitSyncService,
    domain::{SyncMode, SyncReport},
};

use crate::{
    cli::PrecommitArgs,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(
    args: PrecommitArgs,
    root: &Path,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let mode = super::mode(args.check);
    let report = run(root, &config, mode)?;
    super::finish(&[report], mode, &output)
}

/// One pre-commit sync pass against the local filesystem.
#[instrument(skip_all)]
pub(crate) fn run(root: &Path, config: &AppConfig, mode: SyncMode) -> CliResult<SyncReport> {
    let service = PrecommitSyncService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(PrecommitFormat::new()),
    );
    let report = service.sync(
        &super::layout(root, config),
        &config.layout.precommit_file,
        mode,
    )?;
    Ok(report)
}
