//! Scaffolding engine adapter: the `cookiecutter` CLI.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info, instrument};

use stencil_core::{
    application::{ApplicationError, ports::ProjectGenerator},
    error::{StencilError, StencilResult},
};

use super::{capture, last_line};

/// Expands a template with
/// `cookiecutter <template> --no-input --output-dir <dir> key=value...`.
///
/// The generated project is the one directory that appears in the output
/// directory during the run.
#[derive(Debug, Clone)]
pub struct CookiecutterGenerator {
    program: String,
}

impl CookiecutterGenerator {
    pub const DEFAULT_PROGRAM: &'static str = "cookiecutter";

    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for CookiecutterGenerator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PROGRAM)
    }
}

impl ProjectGenerator for CookiecutterGenerator {
    #[instrument(
        skip_all,
        fields(program = %self.program, template = %template_root.display())
    )]
    fn expand(
        &self,
        template_root: &Path,
        output_dir: &Path,
        variables: &BTreeMap<String, String>,
    ) -> StencilResult<PathBuf> {
        std::fs::create_dir_all(output_dir).map_err(|e| io_error(output_dir, e))?;
        let before = subdirectories(output_dir)?;

        let mut command = Command::new(&self.program);
        command
            .arg(template_root)
            .arg("--no-input")
            .arg("--output-dir")
            .arg(output_dir)
            .args(variables.iter().map(|(k, v)| format!("{k}={v}")));
        debug!(?command, "Running scaffolding engine");

        let output = capture(&mut command, &self.program)?;
        if !output.status.success() {
            let reason = last_line(&output.stderr)
                .unwrap_or_else(|| format!("{} exited with {}", self.program, output.status));
            return Err(ApplicationError::GenerationFailed { reason }.into());
        }

        let mut created: Vec<PathBuf> = subdirectories(output_dir)?
            .difference(&before)
            .cloned()
            .collect();
        match created.len() {
            1 => {
                let project = created.remove(0);
                info!(path = %project.display(), "Template expanded");
                Ok(project)
            }
            0 => Err(ApplicationError::GenerationFailed {
                reason: format!("no new directory appeared in {}", output_dir.display()),
            }
            .into()),
            n => Err(ApplicationError::GenerationFailed {
                reason: format!("{n} new directories appeared in {}", output_dir.display()),
            }
            .into()),
        }
    }
}

fn subdirectories(dir: &Path) -> StencilResult<BTreeSet<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| io_error(dir, e))?;
    let mut dirs = BTreeSet::new();
    for entry in entries {
        let path = entry.map_err(|e| io_error(dir, e))?.path();
        if path.is_dir() {
            dirs.insert(path);
        }
    }
    Ok(dirs)
}

fn io_error(path: &Path, e: std::io::Error) -> StencilError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
    .into()
}
