//! Shorthands for building regular expressions in tests.

use lexgen_core::{CharSet, Regular};

pub fn lit(text: &str) -> Regular {
    Regular::literal(text)
}

/// Any ordinary character.
pub fn any() -> Regular {
    Regular::chars(CharSet::all_but_eof())
}

pub fn range(first: char, last: char) -> Regular {
    Regular::chars(CharSet::interval(first as u16, last as u16).unwrap())
}

pub fn bind(name: &str, inner: Regular) -> Regular {
    Regular::binding(name, inner)
}

pub fn star(inner: Regular) -> Regular {
    Regular::star(inner)
}

pub fn or(lhs: Regular, rhs: Regular) -> Regular {
    Regular::or(lhs, rhs)
}

/// Left-nested sequence of all the parts.
pub fn seq(parts: impl IntoIterator<Item = Regular>) -> Regular {
    parts.into_iter().fold(Regular::epsilon(), Regular::seq)
}
