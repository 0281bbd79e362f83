//! Binding analysis over syntactic regular expressions.
//!
//! Runs on each clause before it is encoded:
//! - `nested` - drops bindings shadowed by an enclosing binding of the same name
//! - `vars` - summarises how each bound name is used (optional, repeated, one character)

mod nested;
mod vars;

#[cfg(test)]
mod nested_tests;

pub use nested::remove_nested_bindings;
pub use vars::{VarsInfo, analyse_vars};
