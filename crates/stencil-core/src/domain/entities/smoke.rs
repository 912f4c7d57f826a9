use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::domain::error::DomainError;

/// Everything the smoke test needs to generate and exercise a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmokePlan {
    pub template_root: PathBuf,
    pub output_dir: PathBuf,
    pub variables: BTreeMap<String, String>,
    /// File that must exist in the generated project (e.g. `pyproject.toml`).
    pub manifest_file: PathBuf,
    /// Task-runner subcommands, run in order.
    pub subcommands: Vec<String>,
    /// Leave the generated project on disk afterwards.
    pub keep: bool,
}

impl SmokePlan {
    pub const PROJECT_NAME: &'static str = "project_name";

    pub fn validate(&self) -> Result<(), DomainError> {
        if self
            .variables
            .get(Self::PROJECT_NAME)
            .is_none_or(|v| v.trim().is_empty())
        {
            return Err(DomainError::MissingRequiredField {
                field: Self::PROJECT_NAME,
            });
        }
        if self.subcommands.is_empty() {
            return Err(DomainError::MissingRequiredField {
                field: "subcommands",
            });
        }
        Ok(())
    }

    pub fn project_name(&self) -> &str {
        self.variables
            .get(Self::PROJECT_NAME)
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Directory the generated project is expected to land in.
    pub fn expected_project_dir(&self) -> PathBuf {
        self.output_dir.join(slugify(self.project_name()))
    }

    pub fn manifest_in(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.manifest_file)
    }
}

/// Project slug as produced by the default cookiecutter template:
/// lowercase, with spaces and underscores turned into `-`.
///
/// `"Test Package"` → `"test-package"`.
pub fn slugify(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            ' ' | '_' => '-',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}
