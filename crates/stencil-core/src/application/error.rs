//! Application layer errors.
//!
//! These errors represent failures in orchestration, not malformed input.
//! Input errors are `DomainError` from `crate::domain`.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Which precondition of a sync run a missing path violates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    SourceDir,
    TargetDir,
    SourceFile,
    TargetFile,
    /// A file the generated project must contain.
    GeneratedFile,
}

impl fmt::Display for PathKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::SourceDir => "source directory",
            Self::TargetDir => "target directory",
            Self::SourceFile => "source file",
            Self::TargetFile => "target file",
            Self::GeneratedFile => "generated file",
        })
    }
}

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// A required directory or file does not exist.
    #[error("{path} does not exist ({kind})")]
    MissingPath { kind: PathKind, path: PathBuf },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// An external program could not be started.
    #[error("Failed to launch '{program}': {reason}")]
    SpawnFailed { program: String, reason: String },

    /// The scaffolding engine ran but produced no usable project.
    #[error("Project generation failed: {reason}")]
    GenerationFailed { reason: String },

    /// A task-runner subcommand exited unsuccessfully.
    #[error("'{subcommand}' failed in {cwd} ({})", exit_description(.code))]
    SubcommandFailed {
        subcommand: String,
        cwd: PathBuf,
        code: Option<i32>,
    },
}

fn exit_description(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".into(),
    }
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MissingPath { kind, path } => vec![
                format!("Missing {}: {}", kind, path.display()),
                "Run from the template repository root, or pass --root".into(),
                "Directory names can be changed in stencil.toml ([layout])".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have read and write permissions".into(),
            ],
            Self::SpawnFailed { program, .. } => vec![
                format!("Ensure '{}' is installed and on your PATH", program),
                "The program can be changed in stencil.toml ([smoke])".into(),
            ],
            Self::GenerationFailed { .. } => vec![
                "Run the scaffolding tool by hand to see its output".into(),
                "Check the template's variables (cookiecutter.json)".into(),
            ],
            Self::SubcommandFailed { subcommand, cwd, .. } => vec![
                format!("Re-run '{}' inside {} to investigate", subcommand, cwd.display()),
                "The generated project is left in place when a subcommand fails".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingPath { .. } => ErrorCategory::NotFound,
            Self::FilesystemError { .. } => ErrorCategory::Internal,
            Self::SpawnFailed { .. }
            | Self::GenerationFailed { .. }
            | Self::SubcommandFailed { .. } => ErrorCategory::External,
        }
    }
}
