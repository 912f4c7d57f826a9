//! `stencil sync` - pre-commit sync followed by dependency sync.

use std::path::Path;

use stencil_core::domain::SyncMode;
use tracing::{debug, info};

use crate::{
    cli::SyncArgs,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Both synchronizers run even in check mode, so one invocation reports
/// every stale file.
///
/// In write mode both are first run in check mode: a missing path or a
/// malformed manifest in either one fails the command before any file is
/// written.
pub fn execute(
    args: SyncArgs,
    root: &Path,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let mode = super::mode(args.check);

    if mode.writes() {
        super::precommit::run(root, &config, SyncMode::Check)?;
        super::deps::run(root, &config, &args.manifest, SyncMode::Check)?;
        debug!("Preflight passed for both synchronizers");
    }

    let precommit = super::precommit::run(root, &config, mode)?;
    let deps = super::deps::run(root, &config, &args.manifest, mode)?;
    info!("Both synchronizers finished");

    super::finish(&[precommit, deps], mode, &output)
}
