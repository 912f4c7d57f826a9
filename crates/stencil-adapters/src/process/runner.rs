//! Task runner adapter (`poe <subcommand>` by default).

use std::path::Path;
use std::process::{Command, Stdio};

use tracing::{debug, instrument};

use stencil_core::{
    application::ports::{TaskRunner, TaskStatus},
    error::StencilResult,
};

use super::spawn_failed;

/// Runs `<program> <subcommand>` inside the generated project.
///
/// Output is streamed to the terminal so failures can be read in place.
#[derive(Debug, Clone)]
pub struct ProcessTaskRunner {
    program: String,
}

impl ProcessTaskRunner {
    pub const DEFAULT_PROGRAM: &'static str = "poe";

    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for ProcessTaskRunner {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PROGRAM)
    }
}

impl TaskRunner for ProcessTaskRunner {
    #[instrument(skip(self), fields(program = %self.program, cwd = %cwd.display()))]
    fn run(&self, cwd: &Path, subcommand: &str) -> StencilResult<TaskStatus> {
        let status = Command::new(&self.program)
            .arg(subcommand)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| spawn_failed(&self.program, e))?;

        debug!(code = ?status.code(), "Subcommand finished");
        Ok(TaskStatus {
            code: status.code(),
        })
    }
}
