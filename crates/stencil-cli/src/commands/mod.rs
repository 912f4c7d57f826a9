//! Command handlers, one module per subcommand.
//!
//! Handlers translate arguments and config into core calls and render the
//! results. No business logic lives here.

pub mod completions;
pub mod config;
pub mod deps;
pub mod init;
pub mod precommit;
pub mod smoke;
pub mod sync;

use std::path::{Path, PathBuf};

use stencil_core::domain::{SyncLayout, SyncMode, SyncReport};

use crate::{
    cli::{CheckArgs, OutputFormat},
    config::AppConfig,
    error::{CliError, CliResult},
    output::{OutputManager, SyncSummary},
};

/// Example package and template locations under `root`.
pub(crate) fn layout(root: &Path, config: &AppConfig) -> SyncLayout {
    SyncLayout::new(
        root,
        &config.layout.example_dir,
        &config.layout.template_dir,
    )
}

pub(crate) fn mode(args: CheckArgs) -> SyncMode {
    if args.check {
        SyncMode::Check
    } else {
        SyncMode::Write
    }
}

/// Render the reports and, in check mode, fail if anything is stale.
pub(crate) fn finish(
    reports: &[SyncReport],
    mode: SyncMode,
    output: &OutputManager,
) -> CliResult<()> {
    let stale: Vec<PathBuf> = reports
        .iter()
        .filter(|r| r.is_out_of_date())
        .map(|r| r.target.clone())
        .collect();

    if output.format() == OutputFormat::Json {
        output.json(&SyncSummary {
            check: mode == SyncMode::Check,
            out_of_date: !stale.is_empty(),
            reports,
        })?;
    } else {
        for report in reports {
            output.report(report, mode)?;
        }
    }

    if mode == SyncMode::Check && !stale.is_empty() {
        return Err(CliError::OutOfDate { targets: stale });
    }
    Ok(())
}
