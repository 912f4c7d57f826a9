//! Subprocess adapters for the external scaffolding engine and task runner.

mod cookiecutter;
mod runner;

pub use cookiecutter::CookiecutterGenerator;
pub use runner::ProcessTaskRunner;

use std::process::{Command, Output, Stdio};

use stencil_core::{application::ApplicationError, error::StencilResult};

/// Run `command` to completion with output captured.
fn capture(command: &mut Command, program: &str) -> StencilResult<Output> {
    command
        .stdin(Stdio::null())
        .output()
        .map_err(|e| spawn_failed(program, e))
}

fn spawn_failed(program: &str, e: std::io::Error) -> stencil_core::error::StencilError {
    ApplicationError::SpawnFailed {
        program: program.to_owned(),
        reason: e.to_string(),
    }
    .into()
}

/// Last non-empty line of a captured stream, for error messages.
fn last_line(bytes: &[u8]) -> Option<String> {
    String::from_utf8_lossy(bytes)
        .lines()
        .rev()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .map(str::to_owned)
}
