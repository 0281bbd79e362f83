//! Translation of lexer entries into tagged regular expressions.
//!
//! One `Encoder` serves a whole lexer so that character-set indices are
//! unique across all of its entries. Sets are pooled per occurrence:
//! two equal sets at different places get different indices.

use indexmap::IndexSet;
use lexgen_core::{CharSet, Lexer, LexerEntry, Regular, RegularKind};
use log::debug;

use crate::Config;
use crate::analyze::{analyse_vars, remove_nested_bindings};

use super::entry::{Finisher, TLexer, TLexerEntry};
use super::error::{EncodeError, OptimiseError};
use super::optimiser::{Allocated, Optimiser};
use super::tregular::{ActionId, CharSetId, TRegular};

#[derive(Debug, Default)]
pub struct Encoder {
    config: Config,
    charsets: Vec<CharSet>,
}

impl Encoder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            charsets: Vec::new(),
        }
    }

    /// The pool so far; `CharSetId`s index into it.
    pub fn charsets(&self) -> &[CharSet] {
        &self.charsets
    }

    pub fn into_charsets(self) -> Vec<CharSet> {
        self.charsets
    }

    fn pool(&mut self, set: CharSet) -> CharSetId {
        let id = CharSetId::from_raw(self.charsets.len() as u32);
        self.charsets.push(set);
        id
    }

    /// Encodes `regular`, tagging its bindings for the clause `action`.
    ///
    /// Names in `char_vars` get a start tag only. `regular` must not nest
    /// a binding under another binding of the same name.
    pub fn encode(
        &mut self,
        regular: &Regular,
        char_vars: &IndexSet<String>,
        action: ActionId,
    ) -> TRegular {
        match regular.kind() {
            RegularKind::Epsilon => TRegular::epsilon(),
            RegularKind::Eof => {
                let id = self.pool(CharSet::eof());
                TRegular::chars(id, true)
            }
            RegularKind::Characters(set) => {
                let id = self.pool(set.clone());
                TRegular::chars(id, false)
            }
            RegularKind::Alternate(lhs, rhs) => {
                let lhs = self.encode(lhs, char_vars, action);
                let rhs = self.encode(rhs, char_vars, action);
                TRegular::or(lhs, rhs)
            }
            RegularKind::Sequence(first, second) => {
                let first = self.encode(first, char_vars, action);
                let second = self.encode(second, char_vars, action);
                TRegular::seq(first, second)
            }
            RegularKind::Repetition(inner) => TRegular::star(self.encode(inner, char_vars, action)),
            RegularKind::Binding { name, inner } => {
                let inner = self.encode(inner, char_vars, action);
                let start = TRegular::tag(name.as_str(), true, action);
                if char_vars.contains(name) {
                    return TRegular::seq(start, inner);
                }
                let end = TRegular::tag(name.as_str(), false, action);
                TRegular::seq(start, TRegular::seq(inner, end))
            }
        }
    }

    /// Normalises, analyses, encodes and optimises one clause.
    pub fn encode_clause(
        &mut self,
        regular: &Regular,
        action: ActionId,
    ) -> Result<Allocated, OptimiseError> {
        let regular = remove_nested_bindings(regular);
        let vars = analyse_vars(&regular);
        let tagged = self.encode(&regular, &vars.char_vars(), action);
        Optimiser::new(&vars, self.config.is_optimising()).optimise(tagged)
    }

    /// Encodes every clause of `entry` into one disjunction, in declaration order.
    pub fn encode_entry(&mut self, entry: &LexerEntry) -> Result<TLexerEntry, EncodeError> {
        let mut combined: Option<TRegular> = None;
        let mut finishers = Vec::with_capacity(entry.clauses.len());
        let mut mem_cells = 0;

        for (index, clause) in entry.clauses.iter().enumerate() {
            let action = ActionId::from_raw(index as u32);
            let allocated = self
                .encode_clause(&clause.regular, action)
                .map_err(|source| EncodeError::Clause {
                    entry: entry.name.clone(),
                    action: action.as_u32(),
                    source,
                })?;
            debug!(
                "{}: clause {} uses {} cell(s), {} tag(s) left",
                entry.name,
                action,
                allocated.num_cells,
                allocated.regular.tags().len()
            );

            let clause_regular = TRegular::seq(allocated.regular, TRegular::action(action));
            combined = Some(match combined {
                None => clause_regular,
                Some(previous) => TRegular::or(previous, clause_regular),
            });
            mem_cells = mem_cells.max(allocated.num_cells);
            finishers.push(Finisher {
                action,
                ident_infos: allocated.ident_infos,
                location: clause.action,
            });
        }

        let Some(regular) = combined else {
            return Err(EncodeError::EmptyEntry(entry.name.clone()));
        };
        debug!(
            "{}: {} clause(s), {} cell(s)",
            entry.name,
            finishers.len(),
            mem_cells
        );

        Ok(TLexerEntry {
            visibility: entry.visibility,
            name: entry.name.clone(),
            shortest: entry.shortest,
            return_type: entry.return_type,
            args: entry.args,
            regular,
            mem_cells,
            finishers,
        })
    }
}

/// Encodes every entry of `lexer`, sharing one character-set pool.
pub fn encode_lexer(lexer: &Lexer, config: Config) -> crate::Result<TLexer> {
    let mut encoder = Encoder::new(config);
    let entries = lexer
        .entries
        .iter()
        .map(|entry| encoder.encode_entry(entry))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TLexer {
        imports: lexer.imports.clone(),
        header: lexer.header,
        entries,
        charsets: encoder.into_charsets(),
        footer: lexer.footer,
    })
}
