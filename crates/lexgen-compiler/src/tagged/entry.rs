//! Encoded entries and lexers, ready for automaton construction.

use std::fmt;

use indexmap::IndexMap;
use lexgen_core::{CharSet, Span, Visibility};
use serde::Serialize;

use super::addr::IdentInfo;
use super::tregular::{ActionId, TRegular};

/// What to do once a clause has matched: its action and where its bindings are.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finisher {
    pub action: ActionId,
    pub ident_infos: IndexMap<String, IdentInfo>,
    pub location: Span,
}

/// An entry compiled to a single tagged expression over all its clauses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TLexerEntry {
    pub visibility: Visibility,
    pub name: String,
    pub shortest: bool,
    pub return_type: Span,
    pub args: Option<Span>,
    /// Disjunction of every clause followed by its action, in declaration order.
    pub regular: TRegular,
    /// Memory cells needed by the most demanding clause.
    pub mem_cells: u32,
    /// One per clause, indexed by action.
    pub finishers: Vec<Finisher>,
}

impl TLexerEntry {
    pub fn finisher(&self, action: ActionId) -> Option<&Finisher> {
        self.finishers.get(action.index())
    }

    /// Multi-line rendering of the entry, for inspection.
    pub fn dump(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TLexerEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.visibility, self.name)?;
        match self.args {
            Some(args) => write!(f, "({args})")?,
            None => f.write_str("()")?,
        }
        write!(f, ": {}", self.return_type)?;
        if self.shortest {
            f.write_str(" [shortest]")?;
        }
        writeln!(f)?;
        writeln!(f, "  regular: {}", self.regular)?;
        writeln!(f, "  cells: {}", self.mem_cells)?;
        writeln!(f, "  actions:")?;
        for finisher in &self.finishers {
            writeln!(f, "  - {{{}}} at {}", finisher.action, finisher.location)?;
            for (name, info) in &finisher.ident_infos {
                writeln!(f, "      {name}: {info}")?;
            }
        }
        Ok(())
    }
}

/// A whole lexer: its entries and the character-set pool they index into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TLexer {
    pub imports: Vec<Span>,
    pub header: Option<Span>,
    pub entries: Vec<TLexerEntry>,
    pub charsets: Vec<CharSet>,
    pub footer: Option<Span>,
}
