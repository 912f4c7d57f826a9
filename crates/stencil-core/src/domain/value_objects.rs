//! Domain value objects: package and group names, comparison operators,
//! manifest schemes, replace scopes and sync modes.
//!
//! # Design
//!
//! These are pure value types with equality-by-value and no identity. Names
//! are validated at construction so every `PackageName` in a `DependencySet`
//! is known to be a plausible distribution name.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── PackageName ──────────────────────────────────────────────────────────────

/// A distribution name as it appears at the start of a dependency specifier.
///
/// Invariant: starts and ends with an ASCII letter or digit; `.`, `_` and `-`
/// may appear inside.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PackageName(String);

impl PackageName {
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        if Self::is_valid(&name) {
            Ok(Self(name))
        } else {
            Err(DomainError::InvalidPackageName(name))
        }
    }

    pub fn is_valid(name: &str) -> bool {
        let bytes = name.as_bytes();
        let (Some(first), Some(last)) = (bytes.first(), bytes.last()) else {
            return false;
        };
        first.is_ascii_alphanumeric()
            && last.is_ascii_alphanumeric()
            && bytes
                .iter()
                .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'_' | b'-'))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for PackageName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PackageName> for String {
    fn from(value: PackageName) -> Self {
        value.0
    }
}

// ── GroupName ────────────────────────────────────────────────────────────────

/// Name of a dependency group.
///
/// The unnamed main dependency list is represented by [`GroupName::MAIN`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GroupName(String);

impl GroupName {
    /// Name used for `project.dependencies` / `[tool.poetry.dependencies]`.
    pub const MAIN: &'static str = "dependencies";

    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() || name.chars().any(|c| c.is_whitespace()) {
            return Err(DomainError::InvalidGroupName(name));
        }
        Ok(Self(name))
    }

    pub fn main() -> Self {
        Self(Self::MAIN.to_owned())
    }

    pub fn is_main(&self) -> bool {
        self.0 == Self::MAIN
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Heading used in summaries: `dev` → `Dev`, `dependencies` → `Dependencies`.
    pub fn title(&self) -> String {
        let mut chars = self.0.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl fmt::Display for GroupName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for GroupName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<GroupName> for String {
    fn from(value: GroupName) -> Self {
        value.0
    }
}

// ── ComparisonOperator ───────────────────────────────────────────────────────

/// Version comparison operators recognised after a package name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOperator {
    GreaterEq,
    LessEq,
    Equal,
    Compatible,
    NotEqual,
    Greater,
    Less,
}

impl ComparisonOperator {
    /// All operators, two-character forms first so alternations never stop
    /// at `>` when `>=` was written.
    pub const ALL: [Self; 7] = [
        Self::GreaterEq,
        Self::LessEq,
        Self::Equal,
        Self::Compatible,
        Self::NotEqual,
        Self::Greater,
        Self::Less,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::GreaterEq => ">=",
            Self::LessEq => "<=",
            Self::Equal => "==",
            Self::Compatible => "~=",
            Self::NotEqual => "!=",
            Self::Greater => ">",
            Self::Less => "<",
        }
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComparisonOperator {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| DomainError::UnknownOperator(s.to_owned()))
    }
}

// ── ManifestScheme ───────────────────────────────────────────────────────────

/// How dependencies are laid out in the manifest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ManifestScheme {
    /// `project.dependencies` + `dependency-groups`, values are full specifiers.
    #[default]
    Pep621,
    /// `[tool.poetry.dependencies]` + `[tool.poetry.group.<name>.dependencies]`,
    /// values are raw constraint strings.
    Poetry,
}

impl ManifestScheme {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pep621 => "pep621",
            Self::Poetry => "poetry",
        }
    }

    /// Lockfile that usually sits next to a manifest of this scheme.
    pub const fn default_lockfile(&self) -> &'static str {
        match self {
            Self::Pep621 => "uv.lock",
            Self::Poetry => "poetry.lock",
        }
    }
}

impl fmt::Display for ManifestScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ManifestScheme {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pep621" | "project" | "uv" => Ok(Self::Pep621),
            "poetry" | "legacy" => Ok(Self::Poetry),
            other => Err(DomainError::UnknownScheme(other.to_owned())),
        }
    }
}

// ── ReplaceScope ─────────────────────────────────────────────────────────────

/// Where the line-based manifest rewriter is allowed to substitute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplaceScope {
    /// Only inside the section the value was extracted from.
    #[default]
    Section,
    /// Every `name = value` line in the file. A package listed in several
    /// groups receives the value of the last group processed everywhere.
    Global,
}

impl ReplaceScope {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Section => "section",
            Self::Global => "global",
        }
    }
}

impl fmt::Display for ReplaceScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReplaceScope {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "section" | "group" => Ok(Self::Section),
            "global" => Ok(Self::Global),
            other => Err(DomainError::UnknownScope(other.to_owned())),
        }
    }
}

// ── SyncMode ─────────────────────────────────────────────────────────────────

/// Whether a sync run may touch the target files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SyncMode {
    /// Rewrite targets and mirror the lockfile.
    #[default]
    Write,
    /// Compute the rewrite in memory only.
    Check,
}

impl SyncMode {
    pub const fn writes(&self) -> bool {
        matches!(self, Self::Write)
    }
}
