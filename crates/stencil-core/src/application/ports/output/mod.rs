//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `stencil-adapters` crate provides implementations.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::domain::{DependencySet, HookPins, ManifestScheme, Rewrite};
use crate::error::StencilResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `stencil_adapters::filesystem::LocalFilesystem` (production)
/// - `stencil_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Read a whole UTF-8 file.
    fn read_to_string(&self, path: &Path) -> StencilResult<String>;

    /// Read a whole file as bytes.
    fn read_bytes(&self, path: &Path) -> StencilResult<Vec<u8>>;

    /// Replace a file's content.
    fn write_file(&self, path: &Path, content: &str) -> StencilResult<()>;

    /// Copy a file byte-for-byte, keeping permissions where supported.
    fn copy_file(&self, from: &Path, to: &Path) -> StencilResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    fn is_file(&self, path: &Path) -> bool;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> StencilResult<()>;
}

/// Port for pre-commit configuration text.
///
/// Implemented by `stencil_adapters::formats::PrecommitFormat`.
#[cfg_attr(test, mockall::automock)]
pub trait HookConfigFormat: Send + Sync {
    /// Revision pins keyed by repository URL. Never fails on "no matches".
    fn extract(&self, content: &str) -> StencilResult<HookPins>;

    /// Replace the revision of every repository in `pins` that the target
    /// also lists. Everything else is preserved byte-for-byte.
    fn apply(&self, content: &str, pins: &HookPins) -> StencilResult<Rewrite>;
}

/// Port for dependency manifests.
///
/// Implemented by:
/// - `stencil_adapters::formats::Pep621Format` (`[project]` + `[dependency-groups]`)
/// - `stencil_adapters::formats::PoetryFormat` (legacy `[tool.poetry.*]` sections)
#[cfg_attr(test, mockall::automock)]
pub trait ManifestFormat: Send + Sync {
    fn scheme(&self) -> ManifestScheme;

    /// Dependencies grouped by group name. Never fails on "no matches".
    fn extract(&self, content: &str) -> StencilResult<DependencySet>;

    /// Rewrite matching dependencies in `content`; never inserts new ones.
    fn apply(&self, content: &str, deps: &DependencySet) -> StencilResult<Rewrite>;
}

/// Port for the external scaffolding engine.
///
/// Implemented by `stencil_adapters::process::CookiecutterGenerator`.
#[cfg_attr(test, mockall::automock)]
pub trait ProjectGenerator: Send + Sync {
    /// Expand `template_root` into a new project under `output_dir` and
    /// return the generated project's directory.
    fn expand(
        &self,
        template_root: &Path,
        output_dir: &Path,
        variables: &BTreeMap<String, String>,
    ) -> StencilResult<PathBuf>;
}

/// Exit status of a task-runner subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskStatus {
    /// `None` when the process was terminated by a signal.
    pub code: Option<i32>,
}

impl TaskStatus {
    pub const SUCCESS: Self = Self { code: Some(0) };

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Port for the external task runner.
///
/// Implemented by `stencil_adapters::process::ProcessTaskRunner`.
#[cfg_attr(test, mockall::automock)]
pub trait TaskRunner: Send + Sync {
    /// Run `subcommand` with `cwd` as the working directory and wait for it.
    fn run(&self, cwd: &Path, subcommand: &str) -> StencilResult<TaskStatus>;
}
