//! PEP 621 manifests: `[project].dependencies` and `[dependency-groups]`.
//!
//! Extraction decodes the manifest with `toml`. Rewriting is regex surgery
//! on quoted specifier strings, so the rest of the file is left alone.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::Deserialize;
use tracing::{debug, instrument, trace};

use stencil_core::application::ports::ManifestFormat;
use stencil_core::domain::{
    Change, ComparisonOperator, DependencySet, DomainError, GroupName, ManifestScheme,
    PackageName, Rewrite, VersionValue,
};
use stencil_core::error::{Context, StencilResult};

/// Leading distribution name of a requirement string.
static PACKAGE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[ \t]*([A-Za-z0-9](?:[A-Za-z0-9._-]*[A-Za-z0-9])?)")
        .expect("package name pattern is valid")
});

#[derive(Debug, Default, Deserialize)]
struct PyProject {
    #[serde(default)]
    project: Option<Project>,
    #[serde(default, rename = "dependency-groups")]
    dependency_groups: toml::Table,
}

#[derive(Debug, Default, Deserialize)]
struct Project {
    #[serde(default)]
    dependencies: Vec<toml::Value>,
}

fn decode<T: serde::de::DeserializeOwned>(content: &str) -> StencilResult<T> {
    toml::from_str(content).map_err(|e| {
        DomainError::MalformedManifest {
            format: "TOML",
            reason: e.message().to_owned(),
        }
        .into()
    })
}

/// Package name of a requirement string, if it starts with one.
fn requirement_name(spec: &str) -> Option<&str> {
    PACKAGE_NAME
        .captures(spec)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Pattern for a quoted requirement on `name` that carries a version
/// operator. Group 1 captures double-quoted text, group 2 single-quoted.
fn requirement_pattern(name: &str) -> String {
    let name = regex::escape(name);
    let operators = ComparisonOperator::ALL
        .iter()
        .map(|op| regex::escape(op.as_str()))
        .collect::<Vec<_>>()
        .join("|");
    let body = |quote: char| {
        format!(r"{name}(?:\[[^\]{quote}\n]*\])?[ \t]*(?:{operators})[^{quote}\n]*")
    };
    format!(r#""({})"|'({})'"#, body('"'), body('\''))
}

/// TOML string literal for `value`, keeping `preferred` quotes when the
/// value allows it.
fn quoted(value: &str, preferred: char) -> String {
    match preferred {
        '\'' if !value.contains('\'') => format!("'{value}'"),
        '"' | '\'' if !value.contains('"') && !value.contains('\\') => format!("\"{value}\""),
        _ if !value.contains('\'') => format!("'{value}'"),
        _ => format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\"")),
    }
}

/// Codec for PEP 621 manifests.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pep621Format;

impl Pep621Format {
    pub fn new() -> Self {
        Self
    }
}

impl ManifestFormat for Pep621Format {
    fn scheme(&self) -> ManifestScheme {
        ManifestScheme::Pep621
    }

    #[instrument(skip_all)]
    fn extract(&self, content: &str) -> StencilResult<DependencySet> {
        let manifest: PyProject = decode(content)?;
        let mut deps = DependencySet::new();

        let main = manifest.project.map(|p| p.dependencies).unwrap_or_default();
        let groups = manifest
            .dependency_groups
            .into_iter()
            .filter_map(|(name, value)| {
                let group = GroupName::new(name).ok()?;
                match value {
                    toml::Value::Array(items) => Some((group, items)),
                    _ => None,
                }
            });

        for (group, items) in std::iter::once((GroupName::main(), main)).chain(groups) {
            for item in items {
                let Some(spec) = item.as_str() else {
                    trace!(group = %group, "Skipping non-string entry");
                    continue;
                };
                let Some(name) = requirement_name(spec).and_then(|n| PackageName::new(n).ok())
                else {
                    debug!(group = %group, spec, "No package name in requirement");
                    continue;
                };
                deps.insert(group.clone(), name, VersionValue::Specifier(spec.to_owned()));
            }
        }

        Ok(deps)
    }

    #[instrument(skip_all, fields(packages = deps.package_count()))]
    fn apply(&self, content: &str, deps: &DependencySet) -> StencilResult<Rewrite> {
        // Refuse to touch a target that is not valid TOML.
        decode::<toml::Table>(content)?;

        let mut content = content.to_owned();
        let mut changes = Vec::new();

        for (group, entry) in deps.entries() {
            let new = entry.value.as_str();
            let pattern = Regex::new(&requirement_pattern(entry.name.as_str()))
                .context("compiling requirement pattern")?;

            let old = pattern.captures(&content).and_then(|c| {
                c.get(1)
                    .or_else(|| c.get(2))
                    .map(|m| m.as_str().to_owned())
            });
            match &old {
                Some(_) => {
                    content = pattern
                        .replace_all(&content, |caps: &Captures<'_>| {
                            let quote = if caps.get(1).is_some() { '"' } else { '\'' };
                            quoted(new, quote)
                        })
                        .into_owned();
                }
                None => {
                    debug!(group = %group, package = %entry.name, "Package not in target, skipping");
                }
            }
            changes.push(Change::observed(group.as_str(), entry.name.as_str(), old, new));
        }

        Ok(Rewrite { content, changes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stencil_core::domain::ChangeStatus;
    use stencil_core::error::StencilError;

    const SOURCE: &str = r#"[project]
name = "example-package"
dependencies = [
    "requests>=2.31.0",
    "pydantic[email]>=2.6.0",
    "click",
]

[dependency-groups]
dev = [
    "ruff>=0.2.0",
    { include-group = "test" },
]
test = ["pytest>=8.0.0", "pytest-cov>=4.1"]
"#;

    const TARGET: &str = r#"[project]
name = "{{ cookiecutter.project_slug }}"
dependencies = [
    "requests>=2.28.0",   # http
    'pydantic[email] >= 2.0',
]

[dependency-groups]
dev = ["ruff==0.1.0"]
test = ["pytest>=7.0", "pytest-cov>=4.0", "pytest-xdist>=3.0"]

[tool.poe.tasks]
test = "pytest --cov=requests"
"#;

    #[test]
    fn extracts_specifiers_by_group() {
        let deps = Pep621Format.extract(SOURCE).unwrap();

        let names: Vec<_> = deps.groups().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["dependencies", "dev", "test"]);

        let main = deps.group("dependencies").unwrap();
        assert_eq!(
            main.get("pydantic"),
            Some(&VersionValue::Specifier("pydantic[email]>=2.6.0".into()))
        );
        assert_eq!(main.get("click").map(VersionValue::as_str), Some("click"));
        assert_eq!(deps.group("dev").unwrap().len(), 1);
        assert_eq!(deps.package_count(), 6);
    }

    #[test]
    fn manifest_without_dependencies_is_empty() {
        let deps = Pep621Format.extract("[project]\nname = \"x\"\n").unwrap();
        assert!(deps.is_empty());
        assert!(Pep621Format.extract("").unwrap().is_empty());
    }

    #[test]
    fn malformed_manifest_is_rejected() {
        let err = Pep621Format.extract("[project\nname = ").unwrap_err();
        assert!(matches!(
            err,
            StencilError::Domain(DomainError::MalformedManifest { format: "TOML", .. })
        ));

        let deps = Pep621Format.extract(SOURCE).unwrap();
        assert!(Pep621Format.apply("dependencies = [", &deps).is_err());
    }

    #[test]
    fn rewrites_quoted_specifiers() {
        let deps = Pep621Format.extract(SOURCE).unwrap();
        let rewrite = Pep621Format.apply(TARGET, &deps).unwrap();

        let expected = TARGET
            .replace("\"requests>=2.28.0\"", "\"requests>=2.31.0\"")
            .replace("'pydantic[email] >= 2.0'", "'pydantic[email]>=2.6.0'")
            .replace("\"ruff==0.1.0\"", "\"ruff>=0.2.0\"")
            .replace("\"pytest>=7.0\"", "\"pytest>=8.0.0\"")
            .replace("\"pytest-cov>=4.0\"", "\"pytest-cov>=4.1\"");
        assert_eq!(rewrite.content, expected);
    }

    #[test]
    fn bare_mentions_and_prefixes_are_untouched() {
        let deps = Pep621Format.extract(SOURCE).unwrap();
        let rewrite = Pep621Format.apply(TARGET, &deps).unwrap();

        assert!(rewrite.content.contains("\"pytest-xdist>=3.0\""));
        assert!(rewrite.content.contains("test = \"pytest --cov=requests\""));
    }

    #[test]
    fn reports_missing_packages() {
        let deps = Pep621Format.extract(SOURCE).unwrap();
        let rewrite = Pep621Format.apply(TARGET, &deps).unwrap();

        let click = rewrite.changes.iter().find(|c| c.key == "click").unwrap();
        assert_eq!(click.status, ChangeStatus::Missing);
        assert_eq!(rewrite.updated().count(), 5);
    }

    #[test]
    fn marker_quotes_switch_the_string_delimiter() {
        let source = "[project]\ndependencies = [\"requests>=2; python_version<'3.8'\"]\n";
        let target = "[project]\ndependencies = ['requests>=2.0']\n";
        let deps = Pep621Format.extract(source).unwrap();

        let rewrite = Pep621Format.apply(target, &deps).unwrap();
        assert_eq!(
            rewrite.content,
            "[project]\ndependencies = [\"requests>=2; python_version<'3.8'\"]\n"
        );
        let again = Pep621Format.apply(&rewrite.content, &deps).unwrap();
        assert_eq!(again.content, rewrite.content);
        assert!(decode::<toml::Table>(&rewrite.content).is_ok());
    }

    #[test]
    fn quoted_prefers_the_original_delimiter() {
        assert_eq!(quoted("ruff>=0.2", '\''), "'ruff>=0.2'");
        assert_eq!(quoted("ruff>=0.2", '"'), "\"ruff>=0.2\"");
        assert_eq!(quoted("a<'1'", '\''), "\"a<'1'\"");
        assert_eq!(quoted("a<\"1\"", '"'), "'a<\"1\"'");
        assert_eq!(quoted("a<'1' or b<\"2\"", '"'), r#""a<'1' or b<\"2\"""#);
    }

    #[test]
    fn apply_is_idempotent() {
        let deps = Pep621Format.extract(SOURCE).unwrap();
        let once = Pep621Format.apply(TARGET, &deps).unwrap().content;
        let twice = Pep621Format.apply(&once, &deps).unwrap();
        assert_eq!(twice.content, once);
        assert_eq!(twice.updated().count(), 0);
    }

    #[test]
    fn pattern_requires_an_operator() {
        let pattern = Regex::new(&requirement_pattern("requests")).unwrap();
        assert!(pattern.is_match("\"requests>=1\""));
        assert!(pattern.is_match("'requests ~= 1.0'"));
        assert!(pattern.is_match("\"requests[socks]<3\""));
        assert!(!pattern.is_match("\"requests\""));
        assert!(!pattern.is_match("\"requests-oauthlib>=1\""));
    }
}
