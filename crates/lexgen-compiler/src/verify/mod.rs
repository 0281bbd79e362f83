//! Semantic verification of optimised clauses.
//!
//! Matches sample inputs against the source regular expression and against
//! the optimised tagged expression, then checks that decoding each name's
//! `IdentInfo` from the recorded tag positions yields the text the source
//! expression binds. Every recorded tag must be used by some decoding.
//!
//! Both matchers are bounded reference implementations, only meant for
//! testing small expressions.

pub mod syntax;
pub mod tagged;
pub mod witness;

#[cfg(test)]
mod verify_tests;

use indexmap::{IndexMap, IndexSet};
use lexgen_core::{CharSet, Regular};

use crate::Config;
use crate::analyze::remove_nested_bindings;
use crate::tagged::{ActionId, Allocated, Encoder, OptimiseError, TagAddr, TagBase, TagInfo, TagKey};

/// A sample input on which the optimised clause disagrees with its source.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerifyError {
    #[error("witness \"{witness}\" does not match `{regular}`")]
    SourceMismatch { witness: String, regular: String },

    #[error("witness \"{witness}\" does not match the optimised `{regular}`")]
    OptimisedMismatch { witness: String, regular: String },

    #[error("no address for `{name}`")]
    MissingIdent { name: String },

    #[error("with \"{witness}\", {addr} is based on a cell no recorded tag owns")]
    UnknownCell { witness: String, addr: TagAddr },

    #[error("with \"{witness}\", {addr} is out of bounds")]
    OutOfBounds { witness: String, addr: TagAddr },

    #[error("with \"{witness}\", `{name}` decodes to \"{found}\" instead of \"{expected}\"")]
    BindingMismatch {
        witness: String,
        name: String,
        expected: String,
        found: String,
    },

    #[error("with \"{witness}\", tags {tags} are not used by any binding")]
    Unaccounted { witness: String, tags: String },

    #[error(transparent)]
    Optimise(#[from] OptimiseError),
}

/// Witnesses generated per requested sample, to leave room for duplicates.
const WITNESS_FACTOR: usize = 4;

/// Checks `allocated`, the optimised form of `regular`, on up to
/// `max_samples` distinct inputs matched by `regular`.
pub fn verify_clause(
    regular: &Regular,
    charsets: &[CharSet],
    allocated: &Allocated,
    max_samples: usize,
) -> Result<(), VerifyError> {
    let regular = remove_nested_bindings(regular);
    let mut checked: IndexSet<Vec<u16>> = IndexSet::new();

    for input in witness::witnesses(&regular, max_samples.saturating_mul(WITNESS_FACTOR)) {
        if checked.len() == max_samples {
            break;
        }
        if !checked.insert(input.clone()) {
            continue;
        }
        check_input(&regular, charsets, allocated, &input)?;
    }
    Ok(())
}

/// Encodes and optimises `regular` as a single clause, then verifies it.
pub fn verify_regular(
    regular: &Regular,
    config: Config,
    max_samples: usize,
) -> Result<(), VerifyError> {
    let mut encoder = Encoder::new(config);
    let allocated = encoder.encode_clause(regular, ActionId::from_raw(0))?;
    verify_clause(regular, encoder.charsets(), &allocated, max_samples)
}

fn check_input(
    regular: &Regular,
    charsets: &[CharSet],
    allocated: &Allocated,
    input: &[u16],
) -> Result<(), VerifyError> {
    let Some(bindings) = syntax::matches(regular, input) else {
        return Err(VerifyError::SourceMismatch {
            witness: render(input),
            regular: regular.to_string(),
        });
    };
    let Some(markers) = tagged::matches(charsets, &allocated.regular, input) else {
        return Err(VerifyError::OptimisedMismatch {
            witness: render(input),
            regular: allocated.regular.to_string(),
        });
    };

    let mut decoder = Decoder::new(input, &markers, allocated);
    for (name, span) in &bindings {
        let info = allocated
            .ident_infos
            .get(name)
            .ok_or_else(|| VerifyError::MissingIdent { name: name.clone() })?;
        let start = decoder.decode(info.start)?;
        let end = match info.end {
            Some(end) => decoder.decode(end)?,
            None => start + 1,
        };
        let Some(found) = input.get(start..end) else {
            return Err(VerifyError::OutOfBounds {
                witness: render(input),
                addr: info.end.unwrap_or(info.start),
            });
        };
        let expected = &input[span.clone()];
        if found != expected {
            return Err(VerifyError::BindingMismatch {
                witness: render(input),
                name: name.clone(),
                expected: render(expected),
                found: render(found),
            });
        }
    }

    let unaccounted: Vec<String> = markers
        .keys()
        .filter(|tag| !decoder.visited.contains(tag))
        .map(|tag| tag.to_string())
        .collect();
    if !unaccounted.is_empty() {
        return Err(VerifyError::Unaccounted {
            witness: render(input),
            tags: unaccounted.join(", "),
        });
    }
    Ok(())
}

/// Resolves addresses against the positions recorded for one witness.
struct Decoder<'a> {
    input: &'a [u16],
    /// Recorded tag owning each cell, if any.
    owners: Vec<Option<&'a TagInfo>>,
    cells: Vec<Option<usize>>,
    visited: IndexSet<&'a TagInfo>,
}

impl<'a> Decoder<'a> {
    fn new(
        input: &'a [u16],
        markers: &'a IndexMap<TagInfo, usize>,
        allocated: &'a Allocated,
    ) -> Self {
        let mut owners = Vec::with_capacity(allocated.num_cells as usize);
        let mut cells = Vec::with_capacity(allocated.num_cells as usize);
        for cell in 0..allocated.num_cells {
            let owner = markers.iter().find(|(tag, _)| {
                let key = TagKey::new(tag.name.as_str(), tag.start);
                allocated.env.get(&key) == Some(&TagAddr::cell(cell))
            });
            owners.push(owner.map(|(tag, _)| tag));
            cells.push(owner.map(|(_, &position)| position));
        }

        Self {
            input,
            owners,
            cells,
            visited: IndexSet::new(),
        }
    }

    fn decode(&mut self, addr: TagAddr) -> Result<usize, VerifyError> {
        if let TagBase::Cell(cell) = addr.base {
            let Some(owner) = self.owners.get(cell as usize).copied().flatten() else {
                return Err(VerifyError::UnknownCell {
                    witness: render(self.input),
                    addr,
                });
            };
            self.visited.insert(owner);
        }
        let Some(position) = addr.resolve(0, self.input.len(), &self.cells) else {
            return Err(VerifyError::OutOfBounds {
                witness: render(self.input),
                addr,
            });
        };
        Ok(position)
    }
}

fn render(input: &[u16]) -> String {
    String::from_utf16_lossy(input)
}
