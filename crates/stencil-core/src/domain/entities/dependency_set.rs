use serde::Serialize;

use crate::domain::value_objects::{GroupName, PackageName};

/// The value recorded for a package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum VersionValue {
    /// Text after `name =` on a legacy manifest line, e.g. `"^2.31"`.
    Raw(String),
    /// A complete specifier including the name, e.g. `requests[socks]>=2.31`.
    Specifier(String),
}

impl VersionValue {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Raw(s) | Self::Specifier(s) => s,
        }
    }
}

/// A package and its value inside one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageEntry {
    pub name: PackageName,
    pub value: VersionValue,
}

/// A named bucket of dependencies, in manifest order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyGroup {
    pub name: GroupName,
    entries: Vec<PackageEntry>,
}

impl DependencyGroup {
    pub fn new(name: GroupName) -> Self {
        Self {
            name,
            entries: Vec::new(),
        }
    }

    /// Insert or replace the value for `name`. Replacement keeps position.
    pub fn insert(&mut self, name: PackageName, value: VersionValue) {
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(existing) => existing.value = value,
            None => self.entries.push(PackageEntry { name, value }),
        }
    }

    pub fn get(&self, name: &str) -> Option<&VersionValue> {
        self.entries
            .iter()
            .find(|e| e.name.as_str() == name)
            .map(|e| &e.value)
    }

    pub fn entries(&self) -> impl Iterator<Item = &PackageEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Every dependency group extracted from one manifest.
///
/// Empty groups are never stored, so `is_empty` means "nothing to sync".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DependencySet {
    groups: Vec<DependencyGroup>,
}

impl DependencySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, group: GroupName, name: PackageName, value: VersionValue) {
        match self.groups.iter_mut().find(|g| g.name == group) {
            Some(existing) => existing.insert(name, value),
            None => {
                let mut fresh = DependencyGroup::new(group);
                fresh.insert(name, value);
                self.groups.push(fresh);
            }
        }
    }

    pub fn group(&self, name: &str) -> Option<&DependencyGroup> {
        self.groups.iter().find(|g| g.name.as_str() == name)
    }

    pub fn groups(&self) -> impl Iterator<Item = &DependencyGroup> {
        self.groups.iter()
    }

    /// `(group, entry)` pairs in processing order: groups as they appear in
    /// the source, entries in group order.
    pub fn entries(&self) -> impl Iterator<Item = (&GroupName, &PackageEntry)> {
        self.groups
            .iter()
            .flat_map(|g| g.entries().map(move |e| (&g.name, e)))
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn package_count(&self) -> usize {
        self.groups.iter().map(DependencyGroup::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
