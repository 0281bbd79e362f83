//! Tagged regular expressions.
//!
//! Bindings are replaced by zero-width tags marking their boundaries,
//! character sets by indices into the Encoder's pool, and each clause
//! ends with an action marker once it is spliced into its entry.

use std::fmt;

use serde::Serialize;

/// Index of a character set in the Encoder's pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct CharSetId(u32);

impl CharSetId {
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub fn as_u32(self) -> u32 {
        self.0
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index of a clause's semantic action within its entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ActionId(u32);

impl ActionId {
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub fn as_u32(self) -> u32 {
        self.0
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which boundary of which binding a tag marks, and for which clause.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TagInfo {
    pub name: String,
    pub start: bool,
    pub action: ActionId,
}

impl fmt::Display for TagInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start {
            write!(f, "<{}>", self.name)
        } else {
            write!(f, "</{}>", self.name)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TRegularKind {
    Epsilon,
    /// One character from a pooled set, or end-of-input when `eof` is set.
    Characters { charset: CharSetId, eof: bool },
    Tag(TagInfo),
    Alternate(Box<TRegular>, Box<TRegular>),
    Sequence(Box<TRegular>, Box<TRegular>),
    Repetition(Box<TRegular>),
    Action(ActionId),
}

/// A tagged regular expression node and its derived metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TRegular {
    kind: TRegularKind,
    size: Option<u32>,
    has_tags: bool,
    has_actions: bool,
    nullable: bool,
}

impl TRegular {
    /// Wraps a node kind as is, computing its metadata from the children.
    pub fn new(kind: TRegularKind) -> Self {
        let (size, has_tags, has_actions, nullable) = match &kind {
            TRegularKind::Epsilon => (Some(0), false, false, true),
            TRegularKind::Characters { eof, .. } => {
                (Some(if *eof { 0 } else { 1 }), false, false, false)
            }
            TRegularKind::Tag(_) => (Some(0), true, false, true),
            TRegularKind::Action(_) => (Some(0), false, true, true),
            TRegularKind::Alternate(lhs, rhs) => (
                lhs.size.filter(|&s| Some(s) == rhs.size),
                lhs.has_tags || rhs.has_tags,
                lhs.has_actions || rhs.has_actions,
                lhs.nullable || rhs.nullable,
            ),
            TRegularKind::Sequence(first, second) => (
                first
                    .size
                    .zip(second.size)
                    .and_then(|(a, b)| a.checked_add(b)),
                first.has_tags || second.has_tags,
                first.has_actions || second.has_actions,
                first.nullable && second.nullable,
            ),
            TRegularKind::Repetition(inner) => (None, inner.has_tags, inner.has_actions, true),
        };
        Self {
            kind,
            size,
            has_tags,
            has_actions,
            nullable,
        }
    }

    pub fn epsilon() -> Self {
        Self::new(TRegularKind::Epsilon)
    }

    pub fn chars(charset: CharSetId, eof: bool) -> Self {
        Self::new(TRegularKind::Characters { charset, eof })
    }

    pub fn tag(name: impl Into<String>, start: bool, action: ActionId) -> Self {
        Self::new(TRegularKind::Tag(TagInfo {
            name: name.into(),
            start,
            action,
        }))
    }

    pub fn action(action: ActionId) -> Self {
        Self::new(TRegularKind::Action(action))
    }

    pub fn or(lhs: TRegular, rhs: TRegular) -> Self {
        if lhs == rhs {
            return lhs;
        }
        Self::new(TRegularKind::Alternate(Box::new(lhs), Box::new(rhs)))
    }

    pub fn seq(first: TRegular, second: TRegular) -> Self {
        if first.is_epsilon() {
            return second;
        }
        if second.is_epsilon() {
            return first;
        }
        Self::new(TRegularKind::Sequence(Box::new(first), Box::new(second)))
    }

    pub fn star(inner: TRegular) -> Self {
        match inner.kind {
            TRegularKind::Epsilon | TRegularKind::Repetition(_) => inner,
            _ => Self::new(TRegularKind::Repetition(Box::new(inner))),
        }
    }

    pub fn kind(&self) -> &TRegularKind {
        &self.kind
    }

    pub fn into_kind(self) -> TRegularKind {
        self.kind
    }

    /// Length of every matched string, if they all have the same one.
    pub fn size(&self) -> Option<u32> {
        self.size
    }

    pub fn has_tags(&self) -> bool {
        self.has_tags
    }

    pub fn has_actions(&self) -> bool {
        self.has_actions
    }

    pub fn nullable(&self) -> bool {
        self.nullable
    }

    pub fn is_epsilon(&self) -> bool {
        matches!(self.kind, TRegularKind::Epsilon)
    }

    /// Tags left in the expression, left to right.
    pub fn tags(&self) -> Vec<&TagInfo> {
        let mut tags = Vec::new();
        self.collect_tags(&mut tags);
        tags
    }

    fn collect_tags<'a>(&'a self, out: &mut Vec<&'a TagInfo>) {
        if !self.has_tags {
            return;
        }
        match &self.kind {
            TRegularKind::Tag(info) => out.push(info),
            TRegularKind::Alternate(a, b) | TRegularKind::Sequence(a, b) => {
                a.collect_tags(out);
                b.collect_tags(out);
            }
            TRegularKind::Repetition(inner) => inner.collect_tags(out),
            TRegularKind::Epsilon | TRegularKind::Characters { .. } | TRegularKind::Action(_) => {}
        }
    }
}

impl fmt::Display for TRegular {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TRegularKind::Epsilon => f.write_str("ε"),
            TRegularKind::Characters { charset, eof: false } => write!(f, "[{}]", charset.0),
            TRegularKind::Characters { charset, eof: true } => write!(f, "[{}EOF]", charset.0),
            TRegularKind::Tag(info) => write!(f, "{info}"),
            TRegularKind::Alternate(lhs, rhs) => write!(f, "({lhs}|{rhs})"),
            TRegularKind::Sequence(first, second) => write!(f, "{first}{second}"),
            TRegularKind::Repetition(inner) => write!(f, "({inner})*"),
            TRegularKind::Action(action) => write!(f, "{{{action}}}"),
        }
    }
}
