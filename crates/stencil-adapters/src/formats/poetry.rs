//! Legacy `[tool.poetry.*]` manifests.
//!
//! Dependencies live in `[tool.poetry.dependencies]` (the main group) and in
//! `[tool.poetry.group.<name>.dependencies]`, one `name = value` per line.
//! Values are kept as raw text, whatever TOML shape they have.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, instrument, trace};

use stencil_core::application::ports::ManifestFormat;
use stencil_core::domain::{
    Change, DependencySet, GroupName, ManifestScheme, PackageName, ReplaceScope, Rewrite,
    VersionValue,
};
use stencil_core::error::StencilResult;

use super::{Edit, splice};

static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*\[\[?[ \t]*([^\[\]\n]+?)[ \t]*\]\]?[ \t]*(?:#.*)?$")
        .expect("header pattern is valid")
});

static KEY_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*([A-Za-z0-9][A-Za-z0-9._-]*)[ \t]*=[ \t]*(.*?)[ \t]*\r?$")
        .expect("key pattern is valid")
});

static GROUP_SECTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^tool\.poetry\.group\.(.+)\.dependencies$").expect("group pattern is valid")
});

const MAIN_SECTION: &str = "tool.poetry.dependencies";

/// Interpreter constraint in the main section; never synced.
const INTERPRETER: &str = "python";

/// A `name = value` line.
#[derive(Debug)]
struct KeyLine<'a> {
    key: &'a str,
    value: Range<usize>,
    /// Dependency group of the enclosing section, if it is one.
    group: Option<GroupName>,
}

/// Map a section header to the dependency group it declares.
fn section_group(header: &str) -> Option<GroupName> {
    if header == MAIN_SECTION {
        return Some(GroupName::main());
    }
    GROUP_SECTION
        .captures(header)
        .and_then(|c| GroupName::new(&c[1]).ok())
}

fn key_lines(content: &str) -> Vec<KeyLine<'_>> {
    let headers: Vec<(usize, Option<GroupName>)> = HEADER
        .captures_iter(content)
        .filter_map(|c| Some((c.get(0)?.start(), section_group(c.get(1)?.as_str()))))
        .collect();

    KEY_LINE
        .captures_iter(content)
        .filter_map(|c| {
            let line = c.get(0)?;
            let value = c.get(2)?;
            let group = headers
                .iter()
                .take_while(|(start, _)| *start <= line.start())
                .last()
                .and_then(|(_, group)| group.clone());
            Some(KeyLine {
                key: c.get(1)?.as_str(),
                value: value.range(),
                group,
            })
        })
        .collect()
}

/// Codec for legacy Poetry manifests.
#[derive(Debug, Clone, Copy, Default)]
pub struct PoetryFormat {
    scope: ReplaceScope,
}

impl PoetryFormat {
    pub fn new(scope: ReplaceScope) -> Self {
        Self { scope }
    }
}

impl ManifestFormat for PoetryFormat {
    fn scheme(&self) -> ManifestScheme {
        ManifestScheme::Poetry
    }

    #[instrument(skip_all)]
    fn extract(&self, content: &str) -> StencilResult<DependencySet> {
        let mut deps = DependencySet::new();

        for line in key_lines(content) {
            let Some(group) = line.group else { continue };
            if group.is_main() && line.key == INTERPRETER {
                continue;
            }
            let Ok(name) = PackageName::new(line.key) else {
                trace!(key = line.key, "Not a package name, skipping");
                continue;
            };
            let value = &content[line.value];
            if value.is_empty() {
                continue;
            }
            deps.insert(group, name, VersionValue::Raw(value.to_owned()));
        }

        Ok(deps)
    }

    #[instrument(skip_all, fields(scope = %self.scope, packages = deps.package_count()))]
    fn apply(&self, content: &str, deps: &DependencySet) -> StencilResult<Rewrite> {
        let lines = key_lines(content);
        let mut edits = Vec::new();
        let mut changes = Vec::new();

        for (group, entry) in deps.entries() {
            let new = entry.value.as_str();
            let targets = lines.iter().filter(|l| {
                l.key == entry.name.as_str()
                    && match self.scope {
                        ReplaceScope::Section => l.group.as_ref() == Some(group),
                        ReplaceScope::Global => true,
                    }
            });

            let mut old = None;
            for line in targets {
                old.get_or_insert_with(|| content[line.value.clone()].to_owned());
                edits.push(Edit {
                    range: line.value.clone(),
                    replacement: new.to_owned(),
                });
            }

            if old.is_none() {
                debug!(group = %group, package = %entry.name, "Package not in target, skipping");
            }
            changes.push(Change::observed(group.as_str(), entry.name.as_str(), old, new));
        }

        Ok(Rewrite {
            content: splice(content, edits),
            changes,
        })
    }
}
