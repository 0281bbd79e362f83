use super::remove_nested_bindings;
use crate::test_utils::{any, bind, lit, or, seq, star};

#[test]
fn without_bindings_is_unchanged() {
    let r = seq([lit("ab"), star(any())]);
    assert_eq!(remove_nested_bindings(&r), r);
}

#[test]
fn keeps_outermost_binding() {
    let r = bind("x", seq([lit("a"), bind("x", lit("b"))]));
    let expected = bind("x", lit("ab"));
    assert_eq!(remove_nested_bindings(&r), expected);
}

#[test]
fn keeps_bindings_of_other_names() {
    let inner = bind("x", bind("y", lit("b")));
    let r = bind("x", seq([bind("y", lit("a")), inner]));
    let expected = bind("x", seq([bind("y", lit("a")), bind("y", lit("b"))]));
    assert_eq!(remove_nested_bindings(&r), expected);
}

#[test]
fn siblings_are_not_nested() {
    let r = seq([bind("x", lit("a")), bind("x", lit("b"))]);
    assert_eq!(remove_nested_bindings(&r), r);
}

#[test]
fn strips_under_alternation_and_repetition() {
    let r = bind("x", or(star(bind("x", lit("a"))), bind("x", lit("bc"))));
    let expected = bind("x", or(star(lit("a")), lit("bc")));
    assert_eq!(remove_nested_bindings(&r), expected);
}
