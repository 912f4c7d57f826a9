use serde::Serialize;

/// One `repo:` / `rev:` pair from a pre-commit configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HookPin {
    pub repo: String,
    pub rev: String,
}

impl HookPin {
    pub fn new(repo: impl Into<String>, rev: impl Into<String>) -> Self {
        Self {
            repo: repo.into(),
            rev: rev.into(),
        }
    }

    /// Short name used in summaries.
    pub fn display_name(&self) -> &str {
        repo_display_name(&self.repo)
    }
}

/// Revision pins keyed by repository URL, in first-seen order.
///
/// Re-inserting a URL keeps its position and replaces the revision, so the
/// last pin in the source wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HookPins {
    pins: Vec<HookPin>,
}

impl HookPins {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, repo: impl Into<String>, rev: impl Into<String>) {
        let repo = repo.into();
        let rev = rev.into();
        match self.pins.iter_mut().find(|p| p.repo == repo) {
            Some(existing) => existing.rev = rev,
            None => self.pins.push(HookPin { repo, rev }),
        }
    }

    pub fn get(&self, repo: &str) -> Option<&str> {
        self.pins
            .iter()
            .find(|p| p.repo == repo)
            .map(|p| p.rev.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &HookPin> {
        self.pins.iter()
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }
}

impl FromIterator<HookPin> for HookPins {
    fn from_iter<I: IntoIterator<Item = HookPin>>(iter: I) -> Self {
        let mut pins = Self::new();
        for pin in iter {
            pins.insert(pin.repo, pin.rev);
        }
        pins
    }
}

/// Last path segment of a repository URL (`https://github.com/psf/black` → `black`).
pub fn repo_display_name(url: &str) -> &str {
    let trimmed = url.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}
