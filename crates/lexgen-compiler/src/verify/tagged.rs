//! Bounded backtracking matcher for tagged regular expressions.
//!
//! Records the position of every tag crossed, the last crossing winning,
//! the way the generated matcher writes memory cells.

use indexmap::IndexMap;
use lexgen_core::CharSet;

use crate::tagged::{TRegular, TRegularKind, TagInfo};

use super::syntax::MAX_UNFOLDING;

/// One way of matching a prefix of the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedMatch {
    pub markers: IndexMap<TagInfo, usize>,
    pub end: usize,
    pub reached_eof: bool,
}

impl TaggedMatch {
    fn empty(end: usize, reached_eof: bool) -> Self {
        Self {
            markers: IndexMap::new(),
            end,
            reached_eof,
        }
    }
}

/// All matches of `regular` against prefixes of `input[from..]`.
///
/// Once end-of-input has been consumed, only tags and actions still match.
pub fn all_matches(
    charsets: &[CharSet],
    regular: &TRegular,
    input: &[u16],
    from: usize,
    eof: bool,
) -> Vec<TaggedMatch> {
    let remaining = input.len() - from;
    if regular.size().is_some_and(|size| size as usize > remaining) {
        return Vec::new();
    }
    let kind = regular.kind();
    if eof && !matches!(kind, TRegularKind::Tag(_) | TRegularKind::Action(_)) {
        return Vec::new();
    }

    match kind {
        TRegularKind::Epsilon => vec![TaggedMatch::empty(from, false)],
        TRegularKind::Characters { eof: true, .. } => {
            if from == input.len() {
                vec![TaggedMatch::empty(from, true)]
            } else {
                Vec::new()
            }
        }
        TRegularKind::Characters { charset, eof: false } => {
            let set = charsets.get(charset.index());
            match (set, input.get(from)) {
                (Some(set), Some(&c)) if set.contains(c) => {
                    vec![TaggedMatch::empty(from + 1, false)]
                }
                _ => Vec::new(),
            }
        }
        TRegularKind::Tag(info) => {
            let mut m = TaggedMatch::empty(from, eof);
            m.markers.insert(info.clone(), from);
            vec![m]
        }
        TRegularKind::Action(_) => vec![TaggedMatch::empty(from, eof)],
        TRegularKind::Alternate(lhs, rhs) => {
            let mut matches = all_matches(charsets, lhs, input, from, eof);
            matches.extend(all_matches(charsets, rhs, input, from, eof));
            matches
        }
        TRegularKind::Sequence(first, second) => {
            let mut matches = Vec::new();
            for head in all_matches(charsets, first, input, from, eof) {
                for tail in all_matches(charsets, second, input, head.end, head.reached_eof) {
                    let mut markers = head.markers.clone();
                    markers.extend(tail.markers);
                    matches.push(TaggedMatch {
                        markers,
                        end: tail.end,
                        reached_eof: tail.reached_eof,
                    });
                }
            }
            matches
        }
        TRegularKind::Repetition(inner) => {
            let mut matches = Vec::new();
            let mut unfolded = TRegular::epsilon();
            for _ in 0..=MAX_UNFOLDING {
                matches.extend(all_matches(charsets, &unfolded, input, from, eof));
                unfolded = TRegular::seq(inner.as_ref().clone(), unfolded);
            }
            matches
        }
    }
}

/// Markers of the first match covering the whole input.
pub fn matches(
    charsets: &[CharSet],
    regular: &TRegular,
    input: &[u16],
) -> Option<IndexMap<TagInfo, usize>> {
    all_matches(charsets, regular, input, 0, false)
        .into_iter()
        .find(|m| m.end == input.len())
        .map(|m| m.markers)
}
