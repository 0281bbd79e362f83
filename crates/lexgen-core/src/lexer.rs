//! Lexer descriptions as handed over by the description parser.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::regular::Regular;

/// Location of a code fragment in the lexer description, as byte offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Public,
    Private,
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Public => f.write_str("public"),
            Self::Private => f.write_str("private"),
        }
    }
}

/// One alternative of an entry: a regular expression and its semantic action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clause {
    pub regular: Regular,
    pub action: Span,
}

impl Clause {
    pub fn new(regular: Regular, action: Span) -> Self {
        Self { regular, action }
    }
}

/// A lexer rule. Clause order decides which action wins a tie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexerEntry {
    pub visibility: Visibility,
    pub name: String,
    /// Shortest-match semantics instead of longest-match.
    pub shortest: bool,
    pub return_type: Span,
    pub args: Option<Span>,
    pub clauses: Vec<Clause>,
}

impl LexerEntry {
    /// A public longest-match entry without clauses.
    pub fn new(name: impl Into<String>, return_type: Span) -> Self {
        Self {
            visibility: Visibility::Public,
            name: name.into(),
            shortest: false,
            return_type,
            args: None,
            clauses: Vec::new(),
        }
    }

    pub fn visibility(mut self, value: Visibility) -> Self {
        self.visibility = value;
        self
    }

    pub fn shortest(mut self, value: bool) -> Self {
        self.shortest = value;
        self
    }

    pub fn args(mut self, value: Span) -> Self {
        self.args = Some(value);
        self
    }

    pub fn clause(mut self, regular: Regular, action: Span) -> Self {
        self.clauses.push(Clause::new(regular, action));
        self
    }
}

/// A lexer description: entries plus the verbatim code around them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lexer {
    pub imports: Vec<Span>,
    pub header: Option<Span>,
    pub entries: Vec<LexerEntry>,
    pub footer: Option<Span>,
}

impl Lexer {
    pub fn new(entries: Vec<LexerEntry>) -> Self {
        Self {
            entries,
            ..Self::default()
        }
    }
}
