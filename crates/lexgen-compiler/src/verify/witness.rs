//! Sample inputs matched by a regular expression.

use lexgen_core::{Regular, RegularKind};

use super::syntax::MAX_UNFOLDING;

#[derive(Debug, Clone)]
struct Witness {
    text: Vec<u16>,
    /// Ends with end-of-input, so nothing can follow.
    eof: bool,
}

/// Up to `limit` inputs matched by `regular`, possibly with duplicates.
///
/// Each character set contributes its smallest member and repetitions are
/// unfolded 0, 1 and 2 times.
pub fn witnesses(regular: &Regular, limit: usize) -> Vec<Vec<u16>> {
    collect(regular, limit)
        .into_iter()
        .map(|witness| witness.text)
        .collect()
}

fn collect(regular: &Regular, limit: usize) -> Vec<Witness> {
    let mut out = match regular.kind() {
        RegularKind::Epsilon => vec![Witness {
            text: Vec::new(),
            eof: false,
        }],
        RegularKind::Eof => vec![Witness {
            text: Vec::new(),
            eof: true,
        }],
        RegularKind::Characters(set) => set
            .witness()
            .map(|c| Witness {
                text: vec![c],
                eof: false,
            })
            .into_iter()
            .collect(),
        RegularKind::Alternate(lhs, rhs) => {
            let mut out = collect(lhs, limit);
            out.extend(collect(rhs, limit));
            out
        }
        RegularKind::Sequence(first, second) => {
            let heads = collect(first, limit);
            let tails = collect(second, limit);
            let mut out = Vec::new();
            'heads: for head in heads.iter().filter(|head| !head.eof) {
                for tail in &tails {
                    if out.len() >= limit {
                        break 'heads;
                    }
                    let mut text = head.text.clone();
                    text.extend_from_slice(&tail.text);
                    out.push(Witness {
                        text,
                        eof: tail.eof,
                    });
                }
            }
            out
        }
        RegularKind::Repetition(inner) => {
            let mut out = Vec::new();
            let mut unfolded = Regular::epsilon();
            for _ in 0..=MAX_UNFOLDING {
                out.extend(collect(&unfolded, limit));
                unfolded = Regular::seq(inner.as_ref().clone(), unfolded);
            }
            out
        }
        RegularKind::Binding { inner, .. } => collect(inner, limit),
    };
    out.truncate(limit);
    out
}
