//! Output management and formatting.

use std::io::{self, IsTerminal};

use clap::ValueEnum;
use console::Term;
use owo_colors::OwoColorize;
use serde::Serialize;

use stencil_core::domain::{
    Change, ChangeStatus, GroupName, LockfileOutcome, SyncKind, SyncMode, SyncReport,
};
use stencil_core::error::Context;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;
use crate::error::CliResult;

/// JSON document printed by the sync commands.
#[derive(Debug, Serialize)]
pub struct SyncSummary<'a> {
    pub check: bool,
    pub out_of_date: bool,
    pub reports: &'a [SyncReport],
}

/// Manages CLI output based on configuration.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        // The flag wins over the config file; `auto` in either falls through.
        let requested = match args.output_format {
            OutputFormat::Auto => {
                OutputFormat::from_str(&config.output.format, true).unwrap_or(OutputFormat::Auto)
            }
            explicit => explicit,
        };
        let resolved_format = match requested {
            OutputFormat::Auto if io::stdout().is_terminal() => OutputFormat::Human,
            OutputFormat::Auto => OutputFormat::Plain,
            other => other,
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color
                || config.output.no_color
                || resolved_format != OutputFormat::Human,
            term: Term::stdout(),
        }
    }

    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet and JSON modes.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.suppressed() {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.suppressed() {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2713} {msg}") // ✓
        } else {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        };
        self.term.write_line(&line)
    }

    /// Warning indicator: `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.suppressed() {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{26a0} {msg}") // ⚠
        } else {
            format!("{} {}", "\u{26a0}".yellow().bold(), msg.yellow())
        };
        self.term.write_line(&line)
    }

    /// Informational indicator: `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        if self.suppressed() {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2139} {msg}") // ℹ
        } else {
            format!("{} {}", "\u{2139}".blue().bold(), msg.blue())
        };
        self.term.write_line(&line)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.suppressed() {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    /// Pretty-printed JSON on stdout.  Printed even in quiet mode.
    pub fn json<T: Serialize>(&self, value: &T) -> CliResult<()> {
        let text = serde_json::to_string_pretty(value).context("Failed to serialise output")?;
        self.term.write_line(&text)?;
        Ok(())
    }

    // ── Sync reports ──────────────────────────────────────────────────────

    /// Render one synchronizer run, grouped by section.
    pub fn report(&self, report: &SyncReport, mode: SyncMode) -> io::Result<()> {
        if self.suppressed() {
            return Ok(());
        }

        self.header(&format!("{}: {}", kind_title(report.kind), report.target.display()))?;
        if report.changes.is_empty() {
            self.print(&format!(
                "  nothing to sync in {}",
                report.source.display()
            ))?;
        }
        for (section, changes) in report.sections() {
            self.print(&format!("  {}", section_title(report.kind, section)))?;
            for change in changes {
                self.print(&format!("    {}", self.change_line(report.kind, change)))?;
            }
        }

        if let Some(lockfile) = &report.lockfile {
            self.lockfile(lockfile)?;
        }

        let updated = report.count(ChangeStatus::Updated);
        let target = report.target.display();
        match mode {
            SyncMode::Check if report.is_out_of_date() => {
                self.warning(&format!("{target} is out of date ({updated} update(s) pending)"))
            }
            SyncMode::Check => self.success(&format!("{target} is up to date")),
            SyncMode::Write if report.written => {
                self.success(&format!("Updated {updated} entr(ies) in {target}"))
            }
            SyncMode::Write => self.success(&format!("{target} already up to date")),
        }
    }

    fn lockfile(&self, outcome: &LockfileOutcome) -> io::Result<()> {
        match outcome {
            LockfileOutcome::Copied { to, .. } => {
                self.success(&format!("Lockfile synced: {}", to.display()))
            }
            LockfileOutcome::InSync { path } => {
                self.success(&format!("Lockfile up to date: {}", path.display()))
            }
            LockfileOutcome::OutOfDate { path } => {
                self.warning(&format!("Lockfile out of date: {}", path.display()))
            }
            LockfileOutcome::SourceMissing { path } => {
                self.warning(&format!("Source lockfile not found: {}", path.display()))
            }
        }
    }

    fn change_line(&self, kind: SyncKind, change: &Change) -> String {
        let label = match kind {
            SyncKind::PreCommit => "rev",
            SyncKind::Dependencies => change.key.as_str(),
        };
        match (&change.status, &change.old) {
            (ChangeStatus::Updated, Some(old)) if !self.no_color => {
                format!("{label}: {} → {}", old.dimmed(), change.new.green())
            }
            (ChangeStatus::Updated, Some(old)) => format!("{label}: {old} → {}", change.new),
            (ChangeStatus::Missing, _) => format!("{label}: not in template, skipped"),
            _ => format!("{label}: {} (unchanged)", change.new),
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// The resolved (non-Auto) output format.
    pub fn format(&self) -> OutputFormat {
        self.resolved_format
    }

    /// `true` when progress spinners may be drawn.
    pub fn wants_progress(&self) -> bool {
        self.resolved_format == OutputFormat::Human && !self.quiet
    }

    fn suppressed(&self) -> bool {
        self.quiet || self.resolved_format == OutputFormat::Json
    }
}

fn kind_title(kind: SyncKind) -> &'static str {
    match kind {
        SyncKind::PreCommit => "Pre-commit hooks",
        SyncKind::Dependencies => "Dependencies",
    }
}

/// Dependency groups are title-cased; hook sections are repository names.
fn section_title(kind: SyncKind, section: &str) -> String {
    match kind {
        SyncKind::PreCommit => section.to_owned(),
        SyncKind::Dependencies => GroupName::new(section)
            .map(|g| g.title())
            .unwrap_or_else(|_| section.to_owned()),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
