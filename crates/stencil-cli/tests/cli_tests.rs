//! Integration tests for the `stencil` binary.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

const TEMPLATE_DIR: &str = "{{ cookiecutter.project_slug }}";

const EXAMPLE_PRECOMMIT: &str = "\
repos:
  - repo: https://github.com/psf/black
    rev: 24.1.0
    hooks:
      - id: black
  - repo: https://github.com/pycqa/isort
    rev: 5.13.2
    hooks:
      - id: isort
";

const TEMPLATE_PRECOMMIT: &str = "\
repos:
  - repo: https://github.com/psf/black
    rev: 23.9.1
    hooks:
      - id: black
  - repo: https://github.com/pycqa/isort
    rev: 5.12.0
    hooks:
      - id: isort
";

const EXAMPLE_PYPROJECT: &str = r#"[project]
name = "example-package"
dependencies = ["requests>=2.31.0"]

[dependency-groups]
dev = ["pytest>=8.0.0"]
"#;

const TEMPLATE_PYPROJECT: &str = r#"[project]
name = "{{ cookiecutter.project_slug }}"
# pinned by the template
dependencies = ["requests>=2.28.0"]

[dependency-groups]
dev = ["pytest>=7.4.0", "mypy>=1.8"]
"#;

const LOCKFILE: &str = "version = 1\nrequires-python = \">=3.12\"\n";

/// A template repository with stale template files.
fn fixture() -> TempDir {
    let dir = TempDir::new().unwrap();
    let example = dir.path().join("example-package");
    let template = dir.path().join(TEMPLATE_DIR);
    fs::create_dir_all(&example).unwrap();
    fs::create_dir_all(&template).unwrap();

    fs::write(example.join(".pre-commit-config.yaml"), EXAMPLE_PRECOMMIT).unwrap();
    fs::write(template.join(".pre-commit-config.yaml"), TEMPLATE_PRECOMMIT).unwrap();
    fs::write(example.join("pyproject.toml"), EXAMPLE_PYPROJECT).unwrap();
    fs::write(template.join("pyproject.toml"), TEMPLATE_PYPROJECT).unwrap();
    fs::write(example.join("uv.lock"), LOCKFILE).unwrap();
    dir
}

fn template_file(root: &Path, name: &str) -> PathBuf {
    root.join(TEMPLATE_DIR).join(name)
}

fn stencil(root: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("stencil");
    cmd.current_dir(root).env_remove("RUST_LOG").arg("--no-color");
    cmd
}

// ── help / version ────────────────────────────────────────────────────────────

#[test]
fn test_help_flag() {
    cargo_bin_cmd!("stencil")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("example package"))
        .stdout(predicate::str::contains("precommit"))
        .stdout(predicate::str::contains("smoke"));
}

#[test]
fn test_version_flag() {
    cargo_bin_cmd!("stencil")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_deps_help_lists_options() {
    cargo_bin_cmd!("stencil")
        .args(["deps", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--scheme"))
        .stdout(predicate::str::contains("--scope"))
        .stdout(predicate::str::contains("--lockfile"))
        .stdout(predicate::str::contains("--check"));
}

#[test]
fn test_unknown_scheme_is_usage_error() {
    let dir = fixture();
    stencil(dir.path())
        .args(["deps", "--scheme", "pipenv"])
        .assert()
        .code(2);
}

// ── precommit ─────────────────────────────────────────────────────────────────

#[test]
fn test_precommit_updates_revisions() {
    let dir = fixture();
    stencil(dir.path())
        .arg("precommit")
        .assert()
        .success()
        .stdout(predicate::str::contains("black"))
        .stdout(predicate::str::contains("23.9.1 → 24.1.0"));

    let written = fs::read_to_string(template_file(dir.path(), ".pre-commit-config.yaml")).unwrap();
    assert_eq!(written, EXAMPLE_PRECOMMIT);
}

#[test]
fn test_precommit_missing_example_dir_fails() {
    let dir = fixture();
    fs::remove_dir_all(dir.path().join("example-package")).unwrap();

    stencil(dir.path())
        .arg("precommit")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("does not exist"))
        .stderr(predicate::str::contains("example-package"))
        .stderr(predicate::str::contains("--root"));

    let untouched = fs::read_to_string(template_file(dir.path(), ".pre-commit-config.yaml")).unwrap();
    assert_eq!(untouched, TEMPLATE_PRECOMMIT);
}

// ── deps ──────────────────────────────────────────────────────────────────────

#[test]
fn test_deps_rewrites_manifest_and_copies_lockfile() {
    let dir = fixture();
    stencil(dir.path())
        .arg("deps")
        .assert()
        .success()
        .stdout(predicate::str::contains("Dependencies"))
        .stdout(predicate::str::contains("Dev"))
        .stdout(predicate::str::contains("Lockfile synced"));

    let manifest = fs::read_to_string(template_file(dir.path(), "pyproject.toml")).unwrap();
    assert!(manifest.contains(r#"dependencies = ["requests>=2.31.0"]"#));
    assert!(manifest.contains(r#"dev = ["pytest>=8.0.0", "mypy>=1.8"]"#));
    assert!(manifest.contains("# pinned by the template"));
    assert!(manifest.contains(r#"name = "{{ cookiecutter.project_slug }}""#));

    let lockfile = fs::read_to_string(template_file(dir.path(), "uv.lock")).unwrap();
    assert_eq!(lockfile, LOCKFILE);
}

#[test]
fn test_deps_without_source_lockfile_warns() {
    let dir = fixture();
    fs::remove_file(dir.path().join("example-package").join("uv.lock")).unwrap();

    stencil(dir.path())
        .arg("deps")
        .assert()
        .success()
        .stdout(predicate::str::contains("Source lockfile not found"));
    assert!(!template_file(dir.path(), "uv.lock").exists());
}

#[test]
fn test_deps_no_lockfile_flag_skips_mirror() {
    let dir = fixture();
    stencil(dir.path())
        .args(["deps", "--no-lockfile"])
        .assert()
        .success();
    assert!(!template_file(dir.path(), "uv.lock").exists());
}

#[test]
fn test_deps_poetry_scheme() {
    let dir = fixture();
    fs::write(
        dir.path().join("example-package/pyproject.toml"),
        "[tool.poetry.dependencies]\npython = \"^3.12\"\nrequests = \"^2.31.0\"\n\n\
         [tool.poetry.group.dev.dependencies]\npytest = \"^8.0.0\"\n",
    )
    .unwrap();
    fs::write(
        template_file(dir.path(), "pyproject.toml"),
        "[tool.poetry.dependencies]\npython = \"^3.10\"\nrequests = \"^2.28.0\"\n\n\
         [tool.poetry.group.dev.dependencies]\npytest = \"^7.4.0\"\n",
    )
    .unwrap();
    fs::write(dir.path().join("example-package/poetry.lock"), "# poetry lock\n").unwrap();

    stencil(dir.path())
        .args(["deps", "--scheme", "poetry"])
        .assert()
        .success();

    let manifest = fs::read_to_string(template_file(dir.path(), "pyproject.toml")).unwrap();
    assert!(manifest.contains("requests = \"^2.31.0\""));
    assert!(manifest.contains("pytest = \"^8.0.0\""));
    // the interpreter constraint belongs to the template
    assert!(manifest.contains("python = \"^3.10\""));
    assert!(template_file(dir.path(), "poetry.lock").exists());
}

#[test]
fn test_deps_malformed_example_manifest_is_user_error() {
    let dir = fixture();
    fs::write(
        dir.path().join("example-package/pyproject.toml"),
        "[project\ndependencies = [",
    )
    .unwrap();

    stencil(dir.path()).arg("deps").assert().code(2);
    let untouched = fs::read_to_string(template_file(dir.path(), "pyproject.toml")).unwrap();
    assert_eq!(untouched, TEMPLATE_PYPROJECT);
}

// ── sync / check mode ─────────────────────────────────────────────────────────

#[test]
fn test_sync_is_idempotent() {
    let dir = fixture();
    stencil(dir.path()).arg("sync").assert().success();

    let manifest = template_file(dir.path(), "pyproject.toml");
    let first = fs::read_to_string(&manifest).unwrap();

    stencil(dir.path())
        .arg("sync")
        .assert()
        .success()
        .stdout(predicate::str::contains("already up to date"));
    assert_eq!(fs::read_to_string(&manifest).unwrap(), first);

    stencil(dir.path()).args(["sync", "--check"]).assert().success();
}

#[test]
fn test_sync_missing_manifest_modifies_nothing() {
    let dir = fixture();
    fs::remove_file(template_file(dir.path(), "pyproject.toml")).unwrap();

    stencil(dir.path())
        .arg("sync")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("pyproject.toml"));

    let precommit = fs::read_to_string(template_file(dir.path(), ".pre-commit-config.yaml")).unwrap();
    assert_eq!(precommit, TEMPLATE_PRECOMMIT);
    assert!(!template_file(dir.path(), "uv.lock").exists());
}

#[test]
fn test_sync_malformed_manifest_modifies_nothing() {
    let dir = fixture();
    fs::write(
        dir.path().join("example-package/pyproject.toml"),
        "[project\ndependencies = [",
    )
    .unwrap();

    stencil(dir.path()).arg("sync").assert().code(2);
    let precommit = fs::read_to_string(template_file(dir.path(), ".pre-commit-config.yaml")).unwrap();
    assert_eq!(precommit, TEMPLATE_PRECOMMIT);
}

#[test]
fn test_check_passes_right_after_sync_with_shared_package() {
    let dir = fixture();
    fs::write(
        dir.path().join("example-package/pyproject.toml"),
        "[project]\nname = \"example-package\"\ndependencies = [\"pytest>=8\"]\n\n[dependency-groups]\ntest = [\"pytest>=7\"]\n",
    )
    .unwrap();
    fs::write(
        template_file(dir.path(), "pyproject.toml"),
        "[project]\nname = \"x\"\ndependencies = [\"pytest>=6\"]\n\n[dependency-groups]\ntest = [\"pytest>=6\"]\n",
    )
    .unwrap();

    stencil(dir.path()).arg("sync").assert().success();
    stencil(dir.path()).args(["sync", "--check"]).assert().success();
}

#[test]
fn test_check_reports_out_of_date_without_writing() {
    let dir = fixture();
    stencil(dir.path())
        .args(["sync", "--check"])
        .assert()
        .code(5)
        .stdout(predicate::str::contains("out of date"))
        .stderr(predicate::str::contains("stencil sync"));

    let precommit = fs::read_to_string(template_file(dir.path(), ".pre-commit-config.yaml")).unwrap();
    assert_eq!(precommit, TEMPLATE_PRECOMMIT);
    let manifest = fs::read_to_string(template_file(dir.path(), "pyproject.toml")).unwrap();
    assert_eq!(manifest, TEMPLATE_PYPROJECT);
    assert!(!template_file(dir.path(), "uv.lock").exists());
}

#[test]
fn test_json_output_is_parseable() {
    let dir = fixture();
    let assert = stencil(dir.path())
        .args(["--output-format", "json", "deps", "--check"])
        .assert()
        .code(5);

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(doc["check"], true);
    assert_eq!(doc["out_of_date"], true);
    assert_eq!(doc["reports"][0]["kind"], "dependencies");
    assert_eq!(doc["reports"][0]["lockfile"]["outcome"], "out_of_date");
    let statuses: Vec<_> = doc["reports"][0]["changes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["status"].as_str().unwrap().to_owned())
        .collect();
    assert_eq!(statuses, ["updated", "updated"]);
}

#[test]
fn test_root_flag_selects_repository() {
    let dir = fixture();
    let elsewhere = TempDir::new().unwrap();
    stencil(elsewhere.path())
        .arg("-C")
        .arg(dir.path())
        .arg("precommit")
        .assert()
        .success();

    let written = fs::read_to_string(template_file(dir.path(), ".pre-commit-config.yaml")).unwrap();
    assert_eq!(written, EXAMPLE_PRECOMMIT);
}

// ── smoke ─────────────────────────────────────────────────────────────────────

#[test]
fn test_smoke_stale_project_needs_yes_without_a_terminal() {
    let dir = fixture();
    fs::create_dir_all(dir.path().join("test-package")).unwrap();

    stencil(dir.path())
        .arg("smoke")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--yes"));
    assert!(dir.path().join("test-package").exists());
}

// ── configuration ─────────────────────────────────────────────────────────────

#[test]
fn test_init_writes_local_config() {
    let dir = fixture();
    stencil(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration created"));

    let written = fs::read_to_string(dir.path().join("stencil.toml")).unwrap();
    assert!(written.contains("[layout]"));
    assert!(written.contains("example-package"));

    // second run keeps the file
    stencil(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("--force"));
}

#[test]
fn test_config_file_changes_layout() {
    let dir = fixture();
    fs::rename(dir.path().join("example-package"), dir.path().join("pkg")).unwrap();
    fs::write(
        dir.path().join("stencil.toml"),
        "[layout]\nexample_dir = \"pkg\"\n",
    )
    .unwrap();

    stencil(dir.path()).arg("precommit").assert().success();
    stencil(dir.path())
        .args(["config", "get", "layout.example_dir"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pkg"));
}

#[test]
fn test_env_overrides_config() {
    let dir = fixture();
    stencil(dir.path())
        .env("STENCIL_LAYOUT__EXAMPLE_DIR", "somewhere-else")
        .args(["config", "get", "layout.example_dir"])
        .assert()
        .success()
        .stdout(predicate::str::contains("somewhere-else"));
}

#[test]
fn test_missing_explicit_config_is_config_error() {
    let dir = fixture();
    stencil(dir.path())
        .args(["--config", "nope.toml", "precommit"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_config_get_unknown_key() {
    let dir = fixture();
    stencil(dir.path())
        .args(["config", "get", "layout.nope"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn test_completions_bash() {
    cargo_bin_cmd!("stencil")
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("stencil"));
}
