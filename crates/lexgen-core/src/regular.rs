//! Syntactic regular expressions with named bindings.
//!
//! Nodes are immutable and carry metadata computed once at construction:
//! fixed size (if any), whether a binding occurs below, and nullability.
//! Build them with the smart constructors, which apply the trivial
//! simplifications (`ε` in sequences, `or(x, x)`, `star(ε)`).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cset::CharSet;

/// The shape of a regular expression node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegularKind {
    Epsilon,
    /// Matches the end of input, consuming nothing.
    Eof,
    /// Matches exactly one code unit in the set.
    Characters(CharSet),
    Alternate(Box<Regular>, Box<Regular>),
    Sequence(Box<Regular>, Box<Regular>),
    Repetition(Box<Regular>),
    /// Binds the text matched by `inner` to `name`.
    Binding { name: String, inner: Box<Regular> },
}

/// A regular expression node and its derived metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RegularKind", into = "RegularKind")]
pub struct Regular {
    kind: RegularKind,
    size: Option<u32>,
    has_bindings: bool,
    nullable: bool,
}

impl Regular {
    /// Wraps a node kind as is, computing its metadata from the children.
    pub fn new(kind: RegularKind) -> Self {
        let (size, has_bindings, nullable) = match &kind {
            RegularKind::Epsilon => (Some(0), false, true),
            RegularKind::Eof => (Some(0), false, false),
            RegularKind::Characters(_) => (Some(1), false, false),
            RegularKind::Alternate(lhs, rhs) => (
                lhs.size.filter(|&s| Some(s) == rhs.size),
                lhs.has_bindings || rhs.has_bindings,
                lhs.nullable || rhs.nullable,
            ),
            RegularKind::Sequence(first, second) => (
                first
                    .size
                    .zip(second.size)
                    .and_then(|(a, b)| a.checked_add(b)),
                first.has_bindings || second.has_bindings,
                first.nullable && second.nullable,
            ),
            RegularKind::Repetition(inner) => (None, inner.has_bindings, true),
            RegularKind::Binding { inner, .. } => (inner.size, true, inner.nullable),
        };
        Self {
            kind,
            size,
            has_bindings,
            nullable,
        }
    }

    pub fn epsilon() -> Self {
        Self::new(RegularKind::Epsilon)
    }

    pub fn eof() -> Self {
        Self::new(RegularKind::Eof)
    }

    pub fn chars(set: CharSet) -> Self {
        Self::new(RegularKind::Characters(set))
    }

    /// Matches the given string literally, one code unit after the other.
    pub fn literal(text: &str) -> Self {
        text.encode_utf16()
            .map(|c| Self::chars(CharSet::singleton(c)))
            .fold(Self::epsilon(), Self::seq)
    }

    pub fn or(lhs: Regular, rhs: Regular) -> Self {
        if lhs == rhs {
            return lhs;
        }
        Self::new(RegularKind::Alternate(Box::new(lhs), Box::new(rhs)))
    }

    pub fn seq(first: Regular, second: Regular) -> Self {
        if first.is_epsilon() {
            return second;
        }
        if second.is_epsilon() {
            return first;
        }
        Self::new(RegularKind::Sequence(Box::new(first), Box::new(second)))
    }

    pub fn star(inner: Regular) -> Self {
        if inner.is_epsilon() {
            return inner;
        }
        Self::new(RegularKind::Repetition(Box::new(inner)))
    }

    pub fn binding(name: impl Into<String>, inner: Regular) -> Self {
        Self::new(RegularKind::Binding {
            name: name.into(),
            inner: Box::new(inner),
        })
    }

    pub fn kind(&self) -> &RegularKind {
        &self.kind
    }

    pub fn into_kind(self) -> RegularKind {
        self.kind
    }

    /// Length of every matched string, if they all have the same one.
    pub fn size(&self) -> Option<u32> {
        self.size
    }

    pub fn has_bindings(&self) -> bool {
        self.has_bindings
    }

    pub fn nullable(&self) -> bool {
        self.nullable
    }

    pub fn is_epsilon(&self) -> bool {
        matches!(self.kind, RegularKind::Epsilon)
    }
}

impl From<RegularKind> for Regular {
    fn from(kind: RegularKind) -> Self {
        Self::new(kind)
    }
}

impl From<Regular> for RegularKind {
    fn from(regular: Regular) -> Self {
        regular.kind
    }
}

impl fmt::Display for Regular {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            RegularKind::Epsilon => f.write_str("ε"),
            RegularKind::Eof => f.write_str("eof"),
            RegularKind::Characters(set) => write!(f, "{set}"),
            RegularKind::Alternate(lhs, rhs) => write!(f, "({lhs}|{rhs})"),
            RegularKind::Sequence(first, second) => write!(f, "{first}{second}"),
            RegularKind::Repetition(inner) => write!(f, "({inner})*"),
            RegularKind::Binding { name, inner } => write!(f, "({inner} as {name})"),
        }
    }
}
