use std::path::{Path, PathBuf};

/// Where the example package and the template live.
///
/// The template directory name is usually itself a placeholder
/// (`{{ cookiecutter.project_slug }}`) resolved by the scaffolding engine; to
/// the synchronizers it is just a directory name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncLayout {
    root: PathBuf,
    example_dir: PathBuf,
    template_dir: PathBuf,
}

impl SyncLayout {
    pub fn new(
        root: impl Into<PathBuf>,
        example_dir: impl Into<PathBuf>,
        template_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            root: root.into(),
            example_dir: example_dir.into(),
            template_dir: template_dir.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory values are read from.
    pub fn source_dir(&self) -> PathBuf {
        self.root.join(&self.example_dir)
    }

    /// Directory values are written to.
    pub fn target_dir(&self) -> PathBuf {
        self.root.join(&self.template_dir)
    }

    pub fn source(&self, file: impl AsRef<Path>) -> PathBuf {
        self.source_dir().join(file)
    }

    pub fn target(&self, file: impl AsRef<Path>) -> PathBuf {
        self.target_dir().join(file)
    }
}
