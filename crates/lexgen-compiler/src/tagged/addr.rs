//! Where the matcher finds the position of a tag.

use std::fmt;

use serde::Serialize;

/// A binding boundary, independent of the clause it appears in.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TagKey {
    pub name: String,
    pub start: bool,
}

impl TagKey {
    pub fn new(name: impl Into<String>, start: bool) -> Self {
        Self {
            name: name.into(),
            start,
        }
    }

    pub fn start(name: impl Into<String>) -> Self {
        Self::new(name, true)
    }

    pub fn end(name: impl Into<String>) -> Self {
        Self::new(name, false)
    }
}

impl fmt::Display for TagKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start {
            write!(f, "<{}>", self.name)
        } else {
            write!(f, "</{}>", self.name)
        }
    }
}

/// What a [`TagAddr`] offset is relative to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TagBase {
    /// Start of the match.
    Start,
    /// End of the match; the offset counts characters before it.
    End,
    /// A memory cell written by the matcher when it crosses the owning tag.
    Cell(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TagAddr {
    pub base: TagBase,
    pub offset: u32,
}

impl TagAddr {
    pub fn new(base: TagBase, offset: u32) -> Self {
        Self { base, offset }
    }

    pub fn start(offset: u32) -> Self {
        Self::new(TagBase::Start, offset)
    }

    pub fn end(offset: u32) -> Self {
        Self::new(TagBase::End, offset)
    }

    pub fn cell(cell: u32) -> Self {
        Self::new(TagBase::Cell(cell), 0)
    }

    /// The address `by` characters further right, if it is still expressible.
    pub fn shift(self, by: u32) -> Option<Self> {
        let offset = match self.base {
            TagBase::Start | TagBase::Cell(_) => self.offset.checked_add(by)?,
            TagBase::End => self.offset.checked_sub(by)?,
        };
        Some(Self::new(self.base, offset))
    }

    /// Resolves the address to a position, given the match bounds and cell
    /// contents. A `None` cell was never written.
    pub fn resolve(
        self,
        match_start: usize,
        match_end: usize,
        cells: &[Option<usize>],
    ) -> Option<usize> {
        let offset = self.offset as usize;
        match self.base {
            TagBase::Start => match_start.checked_add(offset),
            TagBase::End => match_end.checked_sub(offset),
            TagBase::Cell(cell) => cells.get(cell as usize).copied()??.checked_add(offset),
        }
    }
}

impl fmt::Display for TagAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.base {
            TagBase::Start => f.write_str("Start")?,
            TagBase::End => f.write_str("End")?,
            TagBase::Cell(cell) => write!(f, "m{cell}")?,
        }
        match (self.base, self.offset) {
            (_, 0) => Ok(()),
            (TagBase::End, offset) => write!(f, "-{offset}"),
            (_, offset) => write!(f, "+{offset}"),
        }
    }
}

/// Where the boundaries of a bound name are found after a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct IdentInfo {
    /// Some matches leave the name unbound.
    pub optional: bool,
    pub start: TagAddr,
    /// Absent for single-character bindings, which end one past `start`.
    pub end: Option<TagAddr>,
}

impl fmt::Display for IdentInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.optional {
            f.write_str("optional ")?;
        }
        match self.end {
            Some(end) => write!(f, "{}..{}", self.start, end),
            None => write!(f, "{} (char)", self.start),
        }
    }
}
