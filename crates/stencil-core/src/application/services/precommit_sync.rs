//! Pre-commit Sync - copy hook revision pins from the example package into
//! the template.
//!
//! Workflow:
//! 1. Validate source/target directories and files
//! 2. Extract `repo` → `rev` pins from the source config
//! 3. Rewrite matching pins in the target config
//! 4. Report

use std::path::Path;

use tracing::{info, instrument};

use crate::{
    application::{
        ports::{Filesystem, HookConfigFormat},
        services::preflight,
    },
    domain::{SyncKind, SyncLayout, SyncMode, SyncReport},
    error::StencilResult,
};

/// Synchronizer for `.pre-commit-config.yaml` style files.
pub struct PrecommitSyncService {
    filesystem: Box<dyn Filesystem>,
    format: Box<dyn HookConfigFormat>,
}

impl PrecommitSyncService {
    pub fn new(filesystem: Box<dyn Filesystem>, format: Box<dyn HookConfigFormat>) -> Self {
        Self { filesystem, format }
    }

    /// Run one sync pass for `file` (relative to both package directories).
    ///
    /// Missing directories or files fail before anything is read or written.
    #[instrument(skip_all, fields(file = %file.display(), mode = ?mode))]
    pub fn sync(&self, layout: &SyncLayout, file: &Path, mode: SyncMode) -> StencilResult<SyncReport> {
        let (source, target) = preflight::require_paths(self.filesystem.as_ref(), layout, file)?;

        info!(source = %source.display(), "Parsing example pre-commit config");
        let pins = self.format.extract(&self.filesystem.read_to_string(&source)?)?;
        info!(repos = pins.len(), "Found pre-commit repos to sync");

        let original = self.filesystem.read_to_string(&target)?;
        let rewrite = self.format.apply(&original, &pins)?;

        let mut report = SyncReport::new(SyncKind::PreCommit, source, target);
        report.extracted = pins.len();
        report.stale = original != rewrite.content;
        report.written = preflight::write_if_changed(
            self.filesystem.as_ref(),
            &report.target,
            &original,
            &rewrite.content,
            mode,
        )?;
        report.changes = rewrite.changes;

        info!(written = report.written, "Pre-commit config sync completed");
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use mockall::predicate::eq;

    use super::*;
    use crate::application::ports::{MockFilesystem, MockHookConfigFormat};
    use crate::application::{ApplicationError, PathKind};
    use crate::domain::{Change, ChangeStatus, HookPins, Rewrite};
    use crate::error::StencilError;

    const FILE: &str = ".pre-commit-config.yaml";

    fn layout() -> SyncLayout {
        SyncLayout::new("/repo", "example", "template")
    }

    fn fs_with_everything() -> MockFilesystem {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().return_const(true);
        fs.expect_is_file().return_const(true);
        fs.expect_read_to_string()
            .with(eq(PathBuf::from("/repo/example/.pre-commit-config.yaml")))
            .returning(|_| Ok("source".into()));
        fs.expect_read_to_string()
            .with(eq(PathBuf::from("/repo/template/.pre-commit-config.yaml")))
            .returning(|_| Ok("target".into()));
        fs
    }

    fn black_pins() -> HookPins {
        let mut pins = HookPins::new();
        pins.insert("https://github.com/psf/black", "24.1.0");
        pins
    }

    #[test]
    fn writes_rewritten_target() {
        let mut fs = fs_with_everything();
        fs.expect_write_file()
            .withf(|path, content| {
                path == Path::new("/repo/template/.pre-commit-config.yaml") && content == "rewritten"
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let mut format = MockHookConfigFormat::new();
        format
            .expect_extract()
            .withf(|c| c == "source")
            .returning(|_| Ok(black_pins()));
        format.expect_apply().returning(|_, _| {
            Ok(Rewrite {
                content: "rewritten".into(),
                changes: vec![Change::observed(
                    "black",
                    "https://github.com/psf/black",
                    Some("23.9.1".into()),
                    "24.1.0",
                )],
            })
        });

        let service = PrecommitSyncService::new(Box::new(fs), Box::new(format));
        let report = service.sync(&layout(), Path::new(FILE), SyncMode::Write).unwrap();

        assert!(report.written);
        assert_eq!(report.extracted, 1);
        assert_eq!(report.count(ChangeStatus::Updated), 1);
        assert_eq!(report.kind, SyncKind::PreCommit);
    }

    #[test]
    fn unchanged_target_is_not_rewritten() {
        let mut fs = fs_with_everything();
        fs.expect_write_file().never();

        let mut format = MockHookConfigFormat::new();
        format.expect_extract().returning(|_| Ok(HookPins::new()));
        format.expect_apply().returning(|c, _| {
            Ok(Rewrite {
                content: c.to_owned(),
                changes: vec![],
            })
        });

        let service = PrecommitSyncService::new(Box::new(fs), Box::new(format));
        let report = service.sync(&layout(), Path::new(FILE), SyncMode::Write).unwrap();
        assert!(!report.written);
        assert!(!report.is_out_of_date());
    }

    #[test]
    fn check_mode_never_writes() {
        let mut fs = fs_with_everything();
        fs.expect_write_file().never();

        let mut format = MockHookConfigFormat::new();
        format.expect_extract().returning(|_| Ok(black_pins()));
        format.expect_apply().returning(|_, _| {
            Ok(Rewrite {
                content: "different".into(),
                changes: vec![Change::observed("black", "u", Some("1".into()), "2")],
            })
        });

        let service = PrecommitSyncService::new(Box::new(fs), Box::new(format));
        let report = service.sync(&layout(), Path::new(FILE), SyncMode::Check).unwrap();
        assert!(!report.written);
        assert!(report.is_out_of_date());
    }

    #[test]
    fn missing_target_dir_fails_before_reading() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir()
            .withf(|p| p == Path::new("/repo/example"))
            .return_const(true);
        fs.expect_is_dir()
            .withf(|p| p == Path::new("/repo/template"))
            .return_const(false);
        fs.expect_read_to_string().never();
        fs.expect_write_file().never();

        let mut format = MockHookConfigFormat::new();
        format.expect_extract().never();

        let service = PrecommitSyncService::new(Box::new(fs), Box::new(format));
        let err = service
            .sync(&layout(), Path::new(FILE), SyncMode::Write)
            .unwrap_err();

        assert!(matches!(
            err,
            StencilError::Application(ApplicationError::MissingPath {
                kind: PathKind::TargetDir,
                ..
            })
        ));
    }

    #[test]
    fn missing_source_file_reports_its_path() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().return_const(true);
        fs.expect_is_file().return_const(false);
        fs.expect_write_file().never();

        let service =
            PrecommitSyncService::new(Box::new(fs), Box::new(MockHookConfigFormat::new()));
        let err = service
            .sync(&layout(), Path::new(FILE), SyncMode::Write)
            .unwrap_err();

        match err {
            StencilError::Application(ApplicationError::MissingPath { kind, path }) => {
                assert_eq!(kind, PathKind::SourceFile);
                assert_eq!(path, PathBuf::from("/repo/example/.pre-commit-config.yaml"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
