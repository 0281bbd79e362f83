//! Removal of shadowed bindings.
//!
//! After a successful match, a name is bound to the text of its outermost
//! binding; anything bound by the same name underneath is overwritten.
//! Those inner bindings are therefore dropped, keeping their bodies.

use indexmap::IndexSet;
use lexgen_core::{Regular, RegularKind};

/// Returns `regular` without bindings nested under a binding of the same name.
pub fn remove_nested_bindings(regular: &Regular) -> Regular {
    if !regular.has_bindings() {
        return regular.clone();
    }
    let mut enclosing = IndexSet::new();
    strip(regular, &mut enclosing)
}

fn strip(regular: &Regular, enclosing: &mut IndexSet<String>) -> Regular {
    if !regular.has_bindings() {
        return regular.clone();
    }

    match regular.kind() {
        RegularKind::Epsilon | RegularKind::Eof | RegularKind::Characters(_) => regular.clone(),
        RegularKind::Alternate(lhs, rhs) => {
            Regular::or(strip(lhs, enclosing), strip(rhs, enclosing))
        }
        RegularKind::Sequence(first, second) => {
            Regular::seq(strip(first, enclosing), strip(second, enclosing))
        }
        RegularKind::Repetition(inner) => Regular::star(strip(inner, enclosing)),
        RegularKind::Binding { name, inner } => {
            if enclosing.contains(name) {
                return strip(inner, enclosing);
            }
            enclosing.insert(name.clone());
            let inner = strip(inner, enclosing);
            enclosing.swap_remove(name);
            Regular::binding(name.clone(), inner)
        }
    }
}
