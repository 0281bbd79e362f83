//! lexgen tag compiler.
//!
//! Turns the clauses of a lexer description into tagged regular expressions
//! with as few runtime memory cells as possible:
//! - `analyze` - binding normalisation and variable-usage summaries
//! - `tagged` - tagged expressions, the Encoder, the Optimiser, aggregated entries
//! - `verify` - reference matchers checking optimised clauses against their source
//! - `config` - compilation options

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod analyze;
pub mod config;
pub mod tagged;
pub mod verify;

#[cfg(test)]
pub mod test_utils;

pub use config::Config;
pub use tagged::{
    Allocated, EncodeError, Encoder, Finisher, IdentInfo, OptimiseError, Optimiser, TLexer,
    TLexerEntry, TRegular, TagAddr, TagBase, TagInfo, TagKey, encode_lexer,
};

/// Errors that can occur while compiling a lexer.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// An entry could not be encoded; compilation of the lexer stops there.
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Result type for lexer compilation.
pub type Result<T> = std::result::Result<T, Error>;
