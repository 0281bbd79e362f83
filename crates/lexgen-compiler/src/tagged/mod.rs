//! Tagged regular expressions and their compilation.
//!
//! Pipeline per clause: `Encoder::encode` turns bindings into tags,
//! `Optimiser` removes statically derivable tags and allocates memory
//! cells for the rest, and `Encoder::encode_entry` splices the clauses of
//! an entry into one disjunction with action markers.

mod addr;
mod encoder;
mod entry;
mod error;
mod optimiser;
mod tregular;

#[cfg(test)]
mod tregular_tests;

pub use addr::{IdentInfo, TagAddr, TagBase, TagKey};
pub use encoder::{Encoder, encode_lexer};
pub use entry::{Finisher, TLexer, TLexerEntry};
pub use error::{EncodeError, OptimiseError};
pub use optimiser::{Allocated, Optimiser};
pub use tregular::{ActionId, CharSetId, TRegular, TRegularKind, TagInfo};
