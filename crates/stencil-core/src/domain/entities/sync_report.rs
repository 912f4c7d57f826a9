use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// What happened to one source key in the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeStatus {
    /// Found in the target with a different value; replaced.
    Updated,
    /// Found in the target with the same value.
    Unchanged,
    /// Not present in the target; nothing inserted.
    Missing,
}

/// Outcome for one key of one section (dependency group or hook repository).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Change {
    pub section: String,
    pub key: String,
    /// Value found in the target before the rewrite.
    pub old: Option<String>,
    pub new: String,
    pub status: ChangeStatus,
}

impl Change {
    /// Build a change record, deriving the status from `old` and `new`.
    pub fn observed(
        section: impl Into<String>,
        key: impl Into<String>,
        old: Option<String>,
        new: impl Into<String>,
    ) -> Self {
        let new = new.into();
        let status = match &old {
            None => ChangeStatus::Missing,
            Some(old) if *old == new => ChangeStatus::Unchanged,
            Some(_) => ChangeStatus::Updated,
        };
        Self {
            section: section.into(),
            key: key.into(),
            old,
            new,
            status,
        }
    }
}

/// Result of applying a mapping to target text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub content: String,
    pub changes: Vec<Change>,
}

impl Rewrite {
    pub fn updated(&self) -> impl Iterator<Item = &Change> {
        self.changes
            .iter()
            .filter(|c| c.status == ChangeStatus::Updated)
    }
}

/// What the lockfile mirror did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LockfileOutcome {
    Copied { from: PathBuf, to: PathBuf },
    /// Check mode: the target lockfile is byte-identical to the source.
    InSync { path: PathBuf },
    /// Check mode: the target lockfile differs from (or lacks) the source.
    OutOfDate { path: PathBuf },
    /// The example package has no lockfile; nothing copied.
    SourceMissing { path: PathBuf },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SyncKind {
    PreCommit,
    Dependencies,
}

impl fmt::Display for SyncKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PreCommit => f.write_str("pre-commit"),
            Self::Dependencies => f.write_str("dependencies"),
        }
    }
}

/// Summary of one synchronizer run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub kind: SyncKind,
    pub source: PathBuf,
    pub target: PathBuf,
    /// Number of keys extracted from the source.
    pub extracted: usize,
    pub changes: Vec<Change>,
    pub lockfile: Option<LockfileOutcome>,
    /// Whether the rewritten text differs from the target on disk.
    pub stale: bool,
    /// Whether the target file was rewritten on disk.
    pub written: bool,
}

impl SyncReport {
    pub fn new(kind: SyncKind, source: PathBuf, target: PathBuf) -> Self {
        Self {
            kind,
            source,
            target,
            extracted: 0,
            changes: Vec::new(),
            lockfile: None,
            stale: false,
            written: false,
        }
    }

    pub fn count(&self, status: ChangeStatus) -> usize {
        self.changes.iter().filter(|c| c.status == status).count()
    }

    /// `true` if the target text (or its lockfile) would change.
    ///
    /// Based on the rewritten content, not on `Updated` entries: global
    /// rewrites can report a replacement that reproduces the same text.
    pub fn is_out_of_date(&self) -> bool {
        self.stale
            || matches!(self.lockfile, Some(LockfileOutcome::OutOfDate { .. }))
    }

    /// Changes grouped by section, sections in first-seen order.
    pub fn sections(&self) -> Vec<(&str, Vec<&Change>)> {
        let mut grouped: Vec<(&str, Vec<&Change>)> = Vec::new();
        for change in &self.changes {
            match grouped.iter_mut().find(|(s, _)| *s == change.section) {
                Some((_, items)) => items.push(change),
                None => grouped.push((change.section.as_str(), vec![change])),
            }
        }
        grouped
    }
}
