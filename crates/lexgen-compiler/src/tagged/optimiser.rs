//! Tag optimisation and memory-cell allocation for one clause.
//!
//! Three passes over the tagged expression of a clause:
//! - forward: tags at a fixed distance from the start of the match are
//!   resolved to `Start+k` and removed
//! - backward: the mirror image, resolving to `End-k` from the right
//! - allocation: every remaining tag either sits at a fixed distance from
//!   an earlier surviving tag (resolved to `mN+k` and removed) or is given
//!   a fresh memory cell and kept, so the matcher records its position
//!
//! The first two only run when optimisation is enabled. Tags of names bound
//! more than once per match are never resolved statically: they keep their
//! node and their cell is overwritten on each occurrence.
//!
//! Alternations and repetitions that contain tags are opaque to all passes:
//! the position after them is derived from their size alone.

use indexmap::{IndexMap, IndexSet};
use log::trace;
use serde::Serialize;

use crate::analyze::VarsInfo;

use super::addr::{IdentInfo, TagAddr, TagKey};
use super::error::OptimiseError;
use super::tregular::{TRegular, TRegularKind, TagInfo};

/// The optimised form of one clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Allocated {
    /// The clause with statically resolved tags removed.
    pub regular: TRegular,
    /// Boundaries of every bound name, in the order names are first bound.
    pub ident_infos: IndexMap<String, IdentInfo>,
    /// Number of distinct memory cells the clause needs.
    pub num_cells: u32,
    /// Address of every tag, resolved or not.
    pub env: IndexMap<TagKey, TagAddr>,
}

impl Allocated {
    /// The tag whose position is recorded in `cell`.
    pub fn cell_owner(&self, cell: u32) -> Option<&TagKey> {
        self.env
            .iter()
            .find(|(_, addr)| **addr == TagAddr::cell(cell))
            .map(|(key, _)| key)
    }
}

/// Optimises a single clause. Create one per clause.
#[derive(Debug)]
pub struct Optimiser<'a> {
    vars: &'a VarsInfo,
    char_vars: IndexSet<String>,
    enabled: bool,
    env: IndexMap<TagKey, TagAddr>,
    next_cell: u32,
}

impl<'a> Optimiser<'a> {
    pub fn new(vars: &'a VarsInfo, enabled: bool) -> Self {
        Self {
            vars,
            char_vars: vars.char_vars(),
            enabled,
            env: IndexMap::new(),
            next_cell: 0,
        }
    }

    pub fn optimise(mut self, regular: TRegular) -> Result<Allocated, OptimiseError> {
        self.check(&regular, &regular)?;

        let regular = if self.enabled && regular.has_tags() {
            let (_, regular) = self.forward(0, regular);
            let (_, regular) = self.backward(0, regular);
            regular
        } else {
            regular
        };
        let (_, regular) = self.allocate(None, regular);

        let vars = self.vars;
        let mut ident_infos = IndexMap::with_capacity(vars.all_vars.len());
        for name in &vars.all_vars {
            let start = self.tag_addr(TagKey::start(name.as_str()));
            let end = if self.char_vars.contains(name) {
                None
            } else {
                Some(self.tag_addr(TagKey::end(name.as_str())))
            };
            let info = IdentInfo {
                optional: vars.opt_vars.contains(name),
                start,
                end,
            };
            ident_infos.insert(name.clone(), info);
        }

        Ok(Allocated {
            regular,
            ident_infos,
            num_cells: self.next_cell,
            env: self.env,
        })
    }

    /// Rejects action markers and tags of names missing from the summary.
    fn check(&self, node: &TRegular, clause: &TRegular) -> Result<(), OptimiseError> {
        if !node.has_tags() && !node.has_actions() {
            return Ok(());
        }
        match node.kind() {
            TRegularKind::Action(action) => Err(OptimiseError::ActionInClause {
                action: action.as_u32(),
                clause: clause.to_string(),
            }),
            TRegularKind::Tag(info) if !self.vars.all_vars.contains(&info.name) => {
                Err(OptimiseError::UnknownBinding {
                    name: info.name.clone(),
                    tag: info.to_string(),
                    clause: clause.to_string(),
                })
            }
            TRegularKind::Alternate(a, b) | TRegularKind::Sequence(a, b) => {
                self.check(a, clause)?;
                self.check(b, clause)
            }
            TRegularKind::Repetition(inner) => self.check(inner, clause),
            TRegularKind::Epsilon | TRegularKind::Characters { .. } | TRegularKind::Tag(_) => {
                Ok(())
            }
        }
    }

    fn record(&mut self, tag: &TagInfo, addr: TagAddr) {
        trace!("{tag} resolved to {addr}");
        let key = TagKey::new(tag.name.as_str(), tag.start);
        self.env.insert(key, addr);
    }

    /// Address of `key`, allocating a fresh cell on first use.
    fn tag_addr(&mut self, key: TagKey) -> TagAddr {
        if let Some(addr) = self.env.get(&key) {
            return *addr;
        }
        let addr = TagAddr::cell(self.next_cell);
        self.next_cell += 1;
        trace!("{key} stored in {addr}");
        self.env.insert(key, addr);
        addr
    }

    fn forward(&mut self, pos: u32, regular: TRegular) -> (Option<u32>, TRegular) {
        if !regular.has_tags() {
            let next = regular.size().and_then(|size| pos.checked_add(size));
            return (next, regular);
        }

        let size = regular.size();
        match regular.into_kind() {
            TRegularKind::Tag(info) => {
                if self.vars.is_double(&info.name) {
                    return (Some(pos), TRegular::new(TRegularKind::Tag(info)));
                }
                self.record(&info, TagAddr::start(pos));
                (Some(pos), TRegular::epsilon())
            }
            TRegularKind::Sequence(first, second) => {
                let (next, first) = self.forward(pos, *first);
                let Some(next) = next else {
                    return (None, TRegular::seq(first, *second));
                };
                let (next, second) = self.forward(next, *second);
                (next, TRegular::seq(first, second))
            }
            kind @ (TRegularKind::Alternate(..) | TRegularKind::Repetition(_)) => {
                let next = size.and_then(|size| pos.checked_add(size));
                (next, TRegular::new(kind))
            }
            TRegularKind::Epsilon | TRegularKind::Characters { .. } | TRegularKind::Action(_) => {
                unreachable!("tag-free node reached the forward pass")
            }
        }
    }

    /// Like `forward`, with `pos` counting characters before the end of the match.
    fn backward(&mut self, pos: u32, regular: TRegular) -> (Option<u32>, TRegular) {
        if !regular.has_tags() {
            let next = regular.size().and_then(|size| pos.checked_add(size));
            return (next, regular);
        }

        let size = regular.size();
        match regular.into_kind() {
            TRegularKind::Tag(info) => {
                if self.vars.is_double(&info.name) {
                    return (Some(pos), TRegular::new(TRegularKind::Tag(info)));
                }
                self.record(&info, TagAddr::end(pos));
                (Some(pos), TRegular::epsilon())
            }
            TRegularKind::Sequence(first, second) => {
                let (next, second) = self.backward(pos, *second);
                let Some(next) = next else {
                    return (None, TRegular::seq(*first, second));
                };
                let (next, first) = self.backward(next, *first);
                (next, TRegular::seq(first, second))
            }
            kind @ (TRegularKind::Alternate(..) | TRegularKind::Repetition(_)) => {
                let next = size.and_then(|size| pos.checked_add(size));
                (next, TRegular::new(kind))
            }
            TRegularKind::Epsilon | TRegularKind::Characters { .. } | TRegularKind::Action(_) => {
                unreachable!("tag-free node reached the backward pass")
            }
        }
    }

    /// Threads the address of the current position, when known relative to
    /// a kept tag, and resolves tags against it.
    fn allocate(
        &mut self,
        addr: Option<TagAddr>,
        regular: TRegular,
    ) -> (Option<TagAddr>, TRegular) {
        let size = regular.size();
        let shifted = addr.and_then(|addr| size.and_then(|size| addr.shift(size)));
        if !regular.has_tags() {
            return (shifted, regular);
        }

        match regular.into_kind() {
            TRegularKind::Tag(info) => {
                if self.vars.is_double(&info.name) {
                    return (addr, TRegular::new(TRegularKind::Tag(info)));
                }
                match addr {
                    Some(addr) => {
                        self.record(&info, addr);
                        (Some(addr), TRegular::epsilon())
                    }
                    None => {
                        let addr = self.tag_addr(TagKey::new(info.name.as_str(), info.start));
                        (Some(addr), TRegular::new(TRegularKind::Tag(info)))
                    }
                }
            }
            TRegularKind::Sequence(first, second) => {
                let (addr, first) = self.allocate(addr, *first);
                let (addr, second) = self.allocate(addr, *second);
                (addr, TRegular::seq(first, second))
            }
            kind @ TRegularKind::Alternate(..) => (shifted, TRegular::new(kind)),
            kind @ TRegularKind::Repetition(_) => (None, TRegular::new(kind)),
            TRegularKind::Epsilon | TRegularKind::Characters { .. } | TRegularKind::Action(_) => {
                unreachable!("tag-free node reached address allocation")
            }
        }
    }
}
