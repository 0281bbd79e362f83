#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for lexgen.
//!
//! Three layers, leaves first:
//! - **Character sets** (`CharSet`): immutable sets of 16-bit code units
//!   plus the end-of-input sentinel, stored as canonical interval lists
//! - **Regular expressions** (`Regular`): the syntactic regex tree with
//!   named bindings, as produced by the lexer description parser
//! - **Lexer descriptions** (`Lexer`): entries made of ordered clauses,
//!   each pairing a regex with the location of its semantic action

pub mod cset;
pub mod lexer;
pub mod regular;

#[cfg(test)]
mod cset_tests;

pub use cset::{CharSet, CharSetError, EOF_CODE_UNIT, Interval};
pub use lexer::{Clause, Lexer, LexerEntry, Span, Visibility};
pub use regular::{Regular, RegularKind};
