//! Format adapters: extract versioned values from text and rewrite them in
//! place.
//!
//! Every rewrite is text surgery on the original bytes. Nothing is parsed and
//! re-serialized, so comments, ordering and whitespace survive untouched.

mod pep621;
mod poetry;
mod precommit;

use std::ops::Range;

pub use pep621::Pep621Format;
pub use poetry::PoetryFormat;
pub use precommit::PrecommitFormat;

use stencil_core::application::ports::ManifestFormat;
use stencil_core::domain::{ManifestScheme, ReplaceScope};

/// Pick the manifest codec for `scheme`.
///
/// `scope` only affects the legacy scheme.
pub fn manifest_format(scheme: ManifestScheme, scope: ReplaceScope) -> Box<dyn ManifestFormat> {
    match scheme {
        ManifestScheme::Pep621 => Box::new(Pep621Format::new()),
        ManifestScheme::Poetry => Box::new(PoetryFormat::new(scope)),
    }
}

/// A byte range of the original text and what to put there instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Edit {
    pub range: Range<usize>,
    pub replacement: String,
}

/// Apply non-overlapping `edits` to `content`.
///
/// Edits may arrive in any order. When two edits target the same range the
/// later one wins.
pub(crate) fn splice(content: &str, edits: Vec<Edit>) -> String {
    let mut edits = edits;
    // Stable sort keeps submission order for equal ranges.
    edits.sort_by_key(|e| e.range.start);
    edits.dedup_by(|later, earlier| {
        if later.range == earlier.range {
            std::mem::swap(later, earlier);
            true
        } else {
            false
        }
    });

    let mut out = String::with_capacity(content.len());
    let mut cursor = 0;
    for edit in edits {
        if edit.range.start < cursor {
            continue;
        }
        out.push_str(&content[cursor..edit.range.start]);
        out.push_str(&edit.replacement);
        cursor = edit.range.end;
    }
    out.push_str(&content[cursor..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edit(range: Range<usize>, replacement: &str) -> Edit {
        Edit {
            range,
            replacement: replacement.into(),
        }
    }

    #[test]
    fn splice_applies_out_of_order_edits() {
        let text = "a=1 b=2 c=3";
        let out = splice(text, vec![edit(10..11, "9"), edit(2..3, "7")]);
        assert_eq!(out, "a=7 b=2 c=9");
    }

    #[test]
    fn later_edit_for_same_range_wins() {
        let out = splice("x = 1", vec![edit(4..5, "2"), edit(4..5, "3")]);
        assert_eq!(out, "x = 3");
    }

    #[test]
    fn no_edits_is_identity() {
        assert_eq!(splice("unchanged\n", Vec::new()), "unchanged\n");
    }

    #[test]
    fn picks_codec_per_scheme() {
        let pep = manifest_format(ManifestScheme::Pep621, ReplaceScope::Section);
        let poetry = manifest_format(ManifestScheme::Poetry, ReplaceScope::Global);
        assert_eq!(pep.scheme(), ManifestScheme::Pep621);
        assert_eq!(poetry.scheme(), ManifestScheme::Poetry);
    }
}
