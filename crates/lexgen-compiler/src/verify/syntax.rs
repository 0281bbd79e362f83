//! Bounded backtracking matcher for syntactic regular expressions.
//!
//! Enumerates every way a regular expression matches a prefix of the input,
//! with the span bound to each name. Repetitions are unfolded at most twice,
//! the same bound used by witness generation.

use std::ops::Range;

use indexmap::IndexMap;
use lexgen_core::{Regular, RegularKind};

/// Repetitions are tried with 0, 1 and 2 iterations.
pub(crate) const MAX_UNFOLDING: usize = 2;

/// One way of matching a prefix of the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxMatch {
    /// Span of each bound name; the outermost binding wins.
    pub bindings: IndexMap<String, Range<usize>>,
    /// End of the matched prefix.
    pub end: usize,
    /// The match went through end-of-input.
    pub reached_eof: bool,
}

impl SyntaxMatch {
    fn empty(end: usize, reached_eof: bool) -> Self {
        Self {
            bindings: IndexMap::new(),
            end,
            reached_eof,
        }
    }
}

/// All matches of `regular` against prefixes of `input[from..]`.
///
/// In strict mode nothing, not even a nullable expression, matches once
/// end-of-input has been consumed.
pub fn all_matches(
    regular: &Regular,
    input: &[u16],
    from: usize,
    strict: bool,
) -> Vec<SyntaxMatch> {
    let remaining = input.len() - from;
    if regular.size().is_some_and(|size| size as usize > remaining) {
        return Vec::new();
    }

    match regular.kind() {
        RegularKind::Epsilon => vec![SyntaxMatch::empty(from, false)],
        RegularKind::Eof => {
            if from == input.len() {
                vec![SyntaxMatch::empty(from, true)]
            } else {
                Vec::new()
            }
        }
        RegularKind::Characters(set) => match input.get(from) {
            Some(&c) if set.contains(c) => vec![SyntaxMatch::empty(from + 1, false)],
            _ => Vec::new(),
        },
        RegularKind::Alternate(lhs, rhs) => {
            let mut matches = all_matches(lhs, input, from, strict);
            matches.extend(all_matches(rhs, input, from, strict));
            matches
        }
        RegularKind::Sequence(first, second) => {
            let mut matches = Vec::new();
            for head in all_matches(first, input, from, strict) {
                if head.reached_eof {
                    if !strict && second.nullable() {
                        matches.push(head);
                    }
                    continue;
                }
                for tail in all_matches(second, input, head.end, strict) {
                    let mut bindings = head.bindings.clone();
                    bindings.extend(tail.bindings);
                    matches.push(SyntaxMatch {
                        bindings,
                        end: tail.end,
                        reached_eof: tail.reached_eof,
                    });
                }
            }
            matches
        }
        RegularKind::Repetition(inner) => {
            let mut matches = Vec::new();
            let mut unfolded = Regular::epsilon();
            for _ in 0..=MAX_UNFOLDING {
                matches.extend(all_matches(&unfolded, input, from, strict));
                unfolded = Regular::seq(inner.as_ref().clone(), unfolded);
            }
            matches
        }
        RegularKind::Binding { name, inner } => all_matches(inner, input, from, strict)
            .into_iter()
            .map(|mut m| {
                m.bindings.insert(name.clone(), from..m.end);
                m
            })
            .collect(),
    }
}

/// Bindings of the first strict match covering the whole input.
pub fn matches(regular: &Regular, input: &[u16]) -> Option<IndexMap<String, Range<usize>>> {
    all_matches(regular, input, 0, true)
        .into_iter()
        .find(|m| m.end == input.len())
        .map(|m| m.bindings)
}
