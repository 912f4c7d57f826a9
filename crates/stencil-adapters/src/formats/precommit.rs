//! `.pre-commit-config.yaml` revision pins.
//!
//! The file is treated as a sequence of blocks, each starting at a `repo:`
//! line. Within a block the first `rev:` line holds the pin. Hook
//! definitions between the two lines are skipped.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, instrument};

use stencil_core::application::ports::HookConfigFormat;
use stencil_core::domain::{Change, HookPins, Rewrite, repo_display_name};
use stencil_core::error::StencilResult;

use super::{Edit, splice};

static REPO_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*(?:-[ \t]*)?repo:[ \t]*(\S+)").expect("repo pattern is valid")
});

static REV_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*(?:-[ \t]*)?rev:[ \t]*(\S+)").expect("rev pattern is valid")
});

/// One `repo:` block of the file.
#[derive(Debug)]
struct Block<'a> {
    url: &'a str,
    /// Byte range of the revision token, if the block has one.
    rev: Option<Range<usize>>,
}

fn blocks(content: &str) -> Vec<Block<'_>> {
    let repos: Vec<_> = REPO_LINE
        .captures_iter(content)
        .filter_map(|c| {
            let line = c.get(0)?;
            Some((line.start(), line.end(), c.get(1)?.as_str()))
        })
        .collect();

    repos
        .iter()
        .enumerate()
        .map(|(i, &(_, body_start, url))| {
            let body_end = repos.get(i + 1).map_or(content.len(), |next| next.0);
            let rev = REV_LINE
                .captures(&content[body_start..body_end])
                .and_then(|c| c.get(1))
                .map(|m| body_start + m.start()..body_start + m.end());
            Block { url, rev }
        })
        .collect()
}

/// Codec for pre-commit configs.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrecommitFormat;

impl PrecommitFormat {
    pub fn new() -> Self {
        Self
    }
}

impl HookConfigFormat for PrecommitFormat {
    #[instrument(skip_all)]
    fn extract(&self, content: &str) -> StencilResult<HookPins> {
        let mut pins = HookPins::new();
        for block in blocks(content) {
            match block.rev {
                Some(rev) => pins.insert(block.url, &content[rev]),
                None => debug!(repo = block.url, "Repository has no rev, skipping"),
            }
        }
        Ok(pins)
    }

    #[instrument(skip_all, fields(pins = pins.len()))]
    fn apply(&self, content: &str, pins: &HookPins) -> StencilResult<Rewrite> {
        let blocks = blocks(content);
        let mut edits = Vec::new();
        let mut changes = Vec::new();

        for pin in pins.iter() {
            let mut found = false;
            for block in blocks.iter().filter(|b| b.url == pin.repo) {
                let Some(rev) = block.rev.clone() else {
                    continue;
                };
                found = true;
                let old = &content[rev.clone()];
                changes.push(Change::observed(
                    pin.display_name(),
                    &pin.repo,
                    Some(old.to_owned()),
                    &pin.rev,
                ));
                if old != pin.rev {
                    edits.push(Edit {
                        range: rev,
                        replacement: pin.rev.clone(),
                    });
                }
            }
            if !found {
                debug!(repo = %pin.repo, "Repository not in target, skipping");
                changes.push(Change::observed(
                    repo_display_name(&pin.repo),
                    &pin.repo,
                    None,
                    &pin.rev,
                ));
            }
        }

        Ok(Rewrite {
            content: splice(content, edits),
            changes,
        })
    }
}
