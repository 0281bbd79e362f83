//! Variable-usage summary of a clause.

use indexmap::IndexSet;
use lexgen_core::{Regular, RegularKind};
use serde::Serialize;

/// How the names bound in a regular expression are used.
///
/// All sets keep names in the order they are first met, left to right.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VarsInfo {
    /// Every bound name.
    pub all_vars: IndexSet<String>,
    /// Names that some matches do not bind.
    pub opt_vars: IndexSet<String>,
    /// Names that can be bound more than once in a single match.
    pub dbl_vars: IndexSet<String>,
    /// Names with at least one binding whose body has size 1.
    pub chr_vars: IndexSet<String>,
    /// Names with at least one binding whose body is not known to have size 1.
    pub str_vars: IndexSet<String>,
}

impl VarsInfo {
    /// Names always bound to exactly one character, when bound at all.
    pub fn char_vars(&self) -> IndexSet<String> {
        self.chr_vars.difference(&self.str_vars).cloned().collect()
    }

    pub fn is_double(&self, name: &str) -> bool {
        self.dbl_vars.contains(name)
    }
}

/// Computes the usage summary of every name bound in `regular`.
pub fn analyse_vars(regular: &Regular) -> VarsInfo {
    if !regular.has_bindings() {
        return VarsInfo::default();
    }

    match regular.kind() {
        RegularKind::Epsilon | RegularKind::Eof | RegularKind::Characters(_) => VarsInfo::default(),
        RegularKind::Alternate(lhs, rhs) => {
            let lhs = analyse_vars(lhs);
            let rhs = analyse_vars(rhs);
            let one_sided: IndexSet<String> = lhs
                .all_vars
                .symmetric_difference(&rhs.all_vars)
                .cloned()
                .collect();
            VarsInfo {
                all_vars: union(&lhs.all_vars, &rhs.all_vars),
                opt_vars: union(&one_sided, &union(&lhs.opt_vars, &rhs.opt_vars)),
                dbl_vars: union(&lhs.dbl_vars, &rhs.dbl_vars),
                chr_vars: union(&lhs.chr_vars, &rhs.chr_vars),
                str_vars: union(&lhs.str_vars, &rhs.str_vars),
            }
        }
        RegularKind::Sequence(first, second) => {
            let first = analyse_vars(first);
            let second = analyse_vars(second);
            let both: IndexSet<String> = first
                .all_vars
                .intersection(&second.all_vars)
                .cloned()
                .collect();
            VarsInfo {
                all_vars: union(&first.all_vars, &second.all_vars),
                opt_vars: union(&first.opt_vars, &second.opt_vars),
                dbl_vars: union(&both, &union(&first.dbl_vars, &second.dbl_vars)),
                chr_vars: union(&first.chr_vars, &second.chr_vars),
                str_vars: union(&first.str_vars, &second.str_vars),
            }
        }
        RegularKind::Repetition(inner) => {
            let inner = analyse_vars(inner);
            VarsInfo {
                opt_vars: inner.all_vars.clone(),
                dbl_vars: inner.all_vars.clone(),
                ..inner
            }
        }
        RegularKind::Binding { name, inner: body } => {
            let mut info = analyse_vars(body);
            if info.all_vars.contains(name) {
                info.dbl_vars.insert(name.clone());
            }
            // The binding comes before its body in a left-to-right reading.
            info.all_vars.shift_insert(0, name.clone());
            if body.size() == Some(1) {
                info.chr_vars.insert(name.clone());
            } else {
                info.str_vars.insert(name.clone());
            }
            info
        }
    }
}

fn union(lhs: &IndexSet<String>, rhs: &IndexSet<String>) -> IndexSet<String> {
    lhs.union(rhs).cloned().collect()
}
