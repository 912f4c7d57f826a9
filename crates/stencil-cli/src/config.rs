//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `STENCIL_*` environment variables, `__` between path segments
//!    (`STENCIL_LAYOUT__EXAMPLE_DIR=pkg`)
//! 3. Config file: `--config`, else `stencil.toml` in the repository root,
//!    else the per-user file
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

use stencil_adapters::{CookiecutterGenerator, ProcessTaskRunner};
use stencil_core::domain::{ManifestScheme, ReplaceScope};

use crate::error::{CliError, CliResult};

/// Name of the repository-local config file.
pub const LOCAL_CONFIG_FILE: &str = "stencil.toml";

const ENV_PREFIX: &str = "STENCIL";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where the example package and the template live.
    pub layout: LayoutConfig,
    /// Dependency sync settings.
    pub deps: DepsConfig,
    /// Smoke test settings.
    pub smoke: SmokeConfig,
    /// Output settings.
    pub output: OutputConfig,

    /// File the values were read from, if any.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub example_dir: PathBuf,
    pub template_dir: PathBuf,
    pub precommit_file: PathBuf,
    pub manifest_file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DepsConfig {
    pub scheme: ManifestScheme,
    pub scope: ReplaceScope,
    /// Lockfile name; the scheme's usual lockfile when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lockfile: Option<PathBuf>,
    pub mirror_lockfile: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SmokeConfig {
    pub generator: String,
    pub runner: String,
    pub subcommands: Vec<String>,
    /// Directory generated projects are written to, relative to the root.
    pub output_dir: PathBuf,
    pub project_name: String,
    pub author: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    /// `auto`, `human`, `plain` or `json`.
    pub format: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            example_dir: PathBuf::from("example-package"),
            template_dir: PathBuf::from("{{ cookiecutter.project_slug }}"),
            precommit_file: PathBuf::from(".pre-commit-config.yaml"),
            manifest_file: PathBuf::from("pyproject.toml"),
        }
    }
}

impl Default for DepsConfig {
    fn default() -> Self {
        Self {
            scheme: ManifestScheme::default(),
            scope: ReplaceScope::default(),
            lockfile: None,
            mirror_lockfile: true,
        }
    }
}

impl Default for SmokeConfig {
    fn default() -> Self {
        Self {
            generator: CookiecutterGenerator::DEFAULT_PROGRAM.into(),
            runner: ProcessTaskRunner::DEFAULT_PROGRAM.into(),
            subcommands: vec!["configure".into(), "lint".into(), "test".into()],
            output_dir: PathBuf::from("."),
            project_name: "Test Package".into(),
            author: "Test User".into(),
            email: "test@test.com".into(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

impl DepsConfig {
    /// Lockfile to mirror for `scheme`, or `None` when mirroring is off.
    pub fn lockfile_for(&self, scheme: ManifestScheme) -> Option<PathBuf> {
        if !self.mirror_lockfile {
            return None;
        }
        Some(
            self.lockfile
                .clone()
                .unwrap_or_else(|| PathBuf::from(scheme.default_lockfile())),
        )
    }
}

impl AppConfig {
    /// Load configuration for the repository at `root`.
    ///
    /// An explicit `config_file` must exist; the implicit locations are
    /// skipped when absent.
    pub fn load(config_file: Option<&Path>, root: &Path) -> CliResult<Self> {
        let file = Self::resolve_file(config_file, root);
        debug!(file = ?file, "Loading configuration");

        let defaults = Config::try_from(&Self::default()).map_err(config_error)?;
        let mut builder = Config::builder().add_source(defaults);
        if let Some(path) = &file {
            builder = builder.add_source(
                File::from(path.as_path())
                    .format(FileFormat::Toml)
                    .required(config_file.is_some()),
            );
        }
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let mut loaded: Self = builder
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(config_error)?;
        loaded.source = file;
        Ok(loaded)
    }

    /// The file [`load`](Self::load) reads, if any.
    pub fn resolve_file(config_file: Option<&Path>, root: &Path) -> Option<PathBuf> {
        if let Some(explicit) = config_file {
            return Some(explicit.to_path_buf());
        }
        let local = root.join(LOCAL_CONFIG_FILE);
        if local.is_file() {
            return Some(local);
        }
        let user = Self::config_path();
        user.is_file().then_some(user)
    }

    /// Path to the per-user configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.stencil.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "stencil", "stencil")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".stencil.toml"))
    }

    /// Render as TOML, the format `init` writes.
    pub fn to_toml(&self) -> CliResult<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::ConfigError {
            message: format!("Failed to serialise config: {e}"),
            source: Some(Box::new(e)),
        })
    }
}

fn config_error(e: config::ConfigError) -> CliError {
    CliError::ConfigError {
        message: e.to_string(),
        source: Some(Box::new(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn defaults_match_repository_layout() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.layout.example_dir, PathBuf::from("example-package"));
        assert_eq!(cfg.layout.manifest_file, PathBuf::from("pyproject.toml"));
        assert_eq!(cfg.smoke.subcommands, ["configure", "lint", "test"]);
        assert_eq!(cfg.smoke.runner, "poe");
    }

    #[test]
    fn lockfile_follows_scheme() {
        let deps = DepsConfig::default();
        assert_eq!(
            deps.lockfile_for(ManifestScheme::Poetry),
            Some(PathBuf::from("poetry.lock"))
        );

        let custom = DepsConfig {
            lockfile: Some(PathBuf::from("requirements.lock")),
            ..DepsConfig::default()
        };
        assert_eq!(
            custom.lockfile_for(ManifestScheme::Pep621),
            Some(PathBuf::from("requirements.lock"))
        );

        let off = DepsConfig {
            mirror_lockfile: false,
            ..DepsConfig::default()
        };
        assert_eq!(off.lockfile_for(ManifestScheme::Pep621), None);
    }

    #[test]
    fn local_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(LOCAL_CONFIG_FILE),
            "[layout]\nexample_dir = \"pkg\"\n\n[deps]\nscheme = \"poetry\"\n",
        )
        .unwrap();

        let cfg = AppConfig::load(None, dir.path()).unwrap();
        assert_eq!(cfg.layout.example_dir, PathBuf::from("pkg"));
        assert_eq!(cfg.deps.scheme, ManifestScheme::Poetry);
        // untouched keys keep their defaults
        assert_eq!(cfg.layout.manifest_file, PathBuf::from("pyproject.toml"));
        assert_eq!(cfg.source, Some(dir.path().join(LOCAL_CONFIG_FILE)));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            AppConfig::load(Some(&missing), dir.path()),
            Err(CliError::ConfigError { .. })
        ));
    }

    #[test]
    fn unknown_scheme_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("custom.toml");
        fs::write(&file, "[deps]\nscheme = \"pipenv\"\n").unwrap();
        assert!(matches!(
            AppConfig::load(Some(&file), dir.path()),
            Err(CliError::ConfigError { .. })
        ));
    }

    #[test]
    fn toml_round_trips_through_loader() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join(LOCAL_CONFIG_FILE);
        fs::write(&file, AppConfig::default().to_toml().unwrap()).unwrap();

        let cfg = AppConfig::load(None, dir.path()).unwrap();
        assert_eq!(cfg.smoke.email, "test@test.com");
        assert!(cfg.deps.mirror_lockfile);
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
