//! Errors raised while encoding and optimising clauses.
//!
//! These only fire on malformed input handed over by an upstream pass;
//! a lexer description accepted by the parser never triggers them.

/// A clause reached the Optimiser in a shape it cannot handle.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OptimiseError {
    #[error("unexpected action {action} in clause `{clause}`")]
    ActionInClause { action: u32, clause: String },

    #[error("tag `{tag}` binds `{name}`, which is not in the variable summary of `{clause}`")]
    UnknownBinding {
        name: String,
        tag: String,
        clause: String,
    },
}

/// An entry could not be encoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    #[error("entry `{0}` has no clause")]
    EmptyEntry(String),

    #[error("clause {action} of entry `{entry}`: {source}")]
    Clause {
        entry: String,
        action: u32,
        #[source]
        source: OptimiseError,
    },
}
