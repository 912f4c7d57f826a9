//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use stencil_core::domain::{ManifestScheme, ReplaceScope};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "stencil",
    bin_name = "stencil",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Keep a project template in sync with its example package",
    long_about = "Stencil copies dependency versions and pre-commit hook revisions \
                  from the example package into the cookiecutter template, and \
                  smoke-tests the template by generating a project from it.",
    after_help = "EXAMPLES:\n\
        \x20 stencil sync\n\
        \x20 stencil deps --check\n\
        \x20 stencil deps --scheme poetry --scope global\n\
        \x20 stencil smoke --yes\n\
        \x20 stencil completions bash > /usr/share/bash-completion/completions/stencil",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sync pre-commit hook revisions.
    #[command(
        visible_alias = "pc",
        about = "Sync pre-commit hook revisions into the template",
        after_help = "EXAMPLES:\n\
            \x20 stencil precommit\n\
            \x20 stencil precommit --check"
    )]
    Precommit(PrecommitArgs),

    /// Sync dependency versions and the lockfile.
    #[command(
        about = "Sync dependency versions and the lockfile into the template",
        after_help = "EXAMPLES:\n\
            \x20 stencil deps\n\
            \x20 stencil deps --scheme poetry\n\
            \x20 stencil deps --lockfile requirements.lock\n\
            \x20 stencil deps --check"
    )]
    Deps(DepsArgs),

    /// Run both synchronizers.
    #[command(
        about = "Sync pre-commit revisions, then dependencies",
        after_help = "EXAMPLES:\n\
            \x20 stencil sync\n\
            \x20 stencil sync --check --output-format json"
    )]
    Sync(SyncArgs),

    /// Generate a project from the template and run its lifecycle.
    #[command(
        about = "Smoke-test the template",
        after_help = "EXAMPLES:\n\
            \x20 stencil smoke\n\
            \x20 stencil smoke --name \"My Package\" --keep\n\
            \x20 stencil smoke --yes"
    )]
    Smoke(SmokeArgs),

    /// Initialise a Stencil configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 stencil init           # stencil.toml in the repository root\n\
            \x20 stencil init --global  # per-user config"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 stencil completions bash > ~/.local/share/bash-completion/completions/stencil\n\
            \x20 stencil completions zsh  > ~/.zfunc/_stencil\n\
            \x20 stencil completions fish > ~/.config/fish/completions/stencil.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Stencil configuration.
    #[command(
        about = "Configuration inspection",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 stencil config get layout.example_dir\n\
            \x20 stencil config list\n\
            \x20 stencil config path"
    )]
    Config(ConfigCommands),
}

// ── precommit / deps / sync ───────────────────────────────────────────────────

/// Arguments shared by the synchronizers.
#[derive(Debug, Clone, Copy, Args)]
pub struct CheckArgs {
    /// Report what would change without writing; exit 5 if out of date.
    #[arg(long = "check", help = "Only check; exit 5 if the template is out of date")]
    pub check: bool,
}

/// Arguments for `stencil precommit`.
#[derive(Debug, Args)]
pub struct PrecommitArgs {
    #[command(flatten)]
    pub check: CheckArgs,
}

/// Arguments for `stencil deps`.
#[derive(Debug, Args)]
pub struct DepsArgs {
    #[command(flatten)]
    pub check: CheckArgs,

    #[command(flatten)]
    pub manifest: ManifestArgs,
}

/// Manifest options for `deps` and `sync`.
#[derive(Debug, Args)]
pub struct ManifestArgs {
    /// Manifest layout.
    #[arg(long = "scheme", value_enum, help = "Manifest scheme [default: pep621]")]
    pub scheme: Option<SchemeArg>,

    /// Replacement scope for the legacy scheme.
    #[arg(
        long = "scope",
        value_enum,
        help = "Where legacy entries are replaced [default: section]"
    )]
    pub scope: Option<ScopeArg>,

    /// Lockfile name, relative to both package directories.
    #[arg(
        long = "lockfile",
        value_name = "NAME",
        conflicts_with = "no_lockfile",
        help = "Lockfile to mirror (default: uv.lock, or poetry.lock for --scheme poetry)"
    )]
    pub lockfile: Option<PathBuf>,

    /// Do not mirror the lockfile.
    #[arg(long = "no-lockfile", help = "Skip the lockfile mirror")]
    pub no_lockfile: bool,
}

/// Arguments for `stencil sync`.
#[derive(Debug, Args)]
pub struct SyncArgs {
    #[command(flatten)]
    pub check: CheckArgs,

    #[command(flatten)]
    pub manifest: ManifestArgs,
}

/// Manifest schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum SchemeArg {
    /// `[project]` + `[dependency-groups]`.
    #[value(alias = "uv")]
    Pep621,
    /// `[tool.poetry.*]` sections.
    #[value(alias = "legacy")]
    Poetry,
}

impl From<SchemeArg> for ManifestScheme {
    fn from(arg: SchemeArg) -> Self {
        match arg {
            SchemeArg::Pep621 => Self::Pep621,
            SchemeArg::Poetry => Self::Poetry,
        }
    }
}

/// Legacy replacement scopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum ScopeArg {
    /// Only inside the section the value came from.
    Section,
    /// Every matching line in the file.
    Global,
}

impl From<ScopeArg> for ReplaceScope {
    fn from(arg: ScopeArg) -> Self {
        match arg {
            ScopeArg::Section => Self::Section,
            ScopeArg::Global => Self::Global,
        }
    }
}

// ── smoke ─────────────────────────────────────────────────────────────────────

/// Arguments for `stencil smoke`.
#[derive(Debug, Args)]
pub struct SmokeArgs {
    /// `project_name` passed to the template.
    #[arg(long = "name", value_name = "NAME", help = "Project name for the generated project")]
    pub name: Option<String>,

    /// `author` passed to the template.
    #[arg(long = "author", value_name = "AUTHOR", help = "Author for the generated project")]
    pub author: Option<String>,

    /// `email` passed to the template.
    #[arg(long = "email", value_name = "EMAIL", help = "Email for the generated project")]
    pub email: Option<String>,

    /// Leave the generated project on disk.
    #[arg(long = "keep", help = "Keep the generated project after a successful run")]
    pub keep: bool,

    /// Remove a stale generated project without asking.
    #[arg(short = 'y', long = "yes", help = "Skip confirmation prompts")]
    pub yes: bool,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `stencil init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to the per-user config location instead of the repository root.
    #[arg(long = "global", help = "Create per-user configuration")]
    pub global: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `stencil completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `stencil config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `layout.example_dir`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
