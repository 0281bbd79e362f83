use lexgen_core::Regular;

use super::{VerifyError, syntax, verify_clause, verify_regular, witness};
use crate::Config;
use crate::tagged::{ActionId, Encoder, TagAddr};
use crate::test_utils::{any, bind, lit, or, range, seq, star};

const SAMPLES: usize = 20;

fn units(text: &str) -> Vec<u16> {
    text.encode_utf16().collect()
}

fn clauses() -> Vec<Regular> {
    vec![
        seq([lit("abc"), bind("n", any()), lit("de")]),
        seq([lit("a"), bind("s", lit("bc")), star(any())]),
        seq([star(any()), bind("n", lit("ab")), lit("de")]),
        star(bind("x", any())),
        seq([bind("x", lit("ab")), bind("x", lit("cd"))]),
        seq([
            star(any()),
            bind("a", any()),
            lit("xy"),
            bind("b", lit("zz")),
            star(any()),
        ]),
        seq([or(bind("x", lit("a")), lit("b")), lit("c")]),
        bind("x", seq([lit("a"), bind("x", any())])),
        seq([bind("w", star(range('a', 'z'))), lit(";")]),
        seq([
            star(any()),
            bind("a", Regular::epsilon()),
            bind("b", Regular::epsilon()),
            star(any()),
        ]),
        seq([
            star(bind("d", range('0', '9'))),
            lit("."),
            bind("f", star(range('0', '9'))),
        ]),
        seq([lit("ab"), Regular::eof()]),
    ]
}

#[test]
fn witnesses_unfold_repetitions() {
    let found = witness::witnesses(&seq([star(lit("a")), lit("b")]), 10);
    assert_eq!(found, [units("b"), units("ab"), units("aab")]);
}

#[test]
fn witnesses_stop_after_eof() {
    let found = witness::witnesses(&seq([or(Regular::eof(), lit("a")), lit("b")]), 10);
    assert_eq!(found, [units("ab")]);
}

#[test]
fn witnesses_respect_limit() {
    let found = witness::witnesses(&star(or(lit("a"), lit("b"))), 3);
    assert_eq!(found.len(), 3);
}

#[test]
fn syntax_matcher_reports_outermost_binding() {
    let regular = bind("x", seq([lit("a"), bind("x", any())]));
    let bindings = syntax::matches(&regular, &units("ab")).unwrap();
    assert_eq!(bindings["x"], 0..2);
}

#[test]
fn syntax_matcher_keeps_last_iteration() {
    let regular = star(bind("x", any()));
    let bindings = syntax::matches(&regular, &units("pq")).unwrap();
    assert_eq!(bindings["x"], 1..2);
    assert!(syntax::matches(&regular, &units("pqr")).is_none());
}

#[test]
fn syntax_matcher_is_strict_after_eof() {
    let regular = seq([Regular::eof(), star(lit("a"))]);
    assert!(syntax::all_matches(&regular, &[], 0, true).is_empty());
    assert_eq!(syntax::all_matches(&regular, &[], 0, false).len(), 1);
}

#[test]
fn optimised_clauses_bind_the_same_text() {
    for regular in clauses() {
        let result = verify_regular(&regular, Config::new(), SAMPLES);
        assert_eq!(result, Ok(()), "verifying {regular}");
    }
}

#[test]
fn unoptimised_clauses_bind_the_same_text() {
    for regular in clauses() {
        let result = verify_regular(&regular, Config::new().optimise(false), SAMPLES);
        assert_eq!(result, Ok(()), "verifying {regular}");
    }
}

#[test]
fn detects_wrong_offsets() {
    let regular = seq([lit("abc"), bind("n", any()), lit("de")]);
    let mut encoder = Encoder::new(Config::new());
    let mut allocated = encoder
        .encode_clause(&regular, ActionId::from_raw(0))
        .unwrap();
    allocated.ident_infos["n"].start = TagAddr::start(2);

    let err = verify_clause(&regular, encoder.charsets(), &allocated, SAMPLES).unwrap_err();
    assert_eq!(
        err,
        VerifyError::BindingMismatch {
            witness: "abc\0de".to_owned(),
            name: "n".to_owned(),
            expected: "\0".to_owned(),
            found: "c".to_owned(),
        }
    );
}

#[test]
fn detects_missing_addresses() {
    let regular = star(bind("x", any()));
    let mut encoder = Encoder::new(Config::new());
    let mut allocated = encoder
        .encode_clause(&regular, ActionId::from_raw(0))
        .unwrap();
    allocated.ident_infos.clear();

    let err = verify_clause(&regular, encoder.charsets(), &allocated, SAMPLES).unwrap_err();
    assert_eq!(
        err,
        VerifyError::MissingIdent {
            name: "x".to_owned()
        }
    );
}

#[test]
fn detects_unaccounted_tags() {
    let regular = star(bind("x", any()));
    let mut encoder = Encoder::new(Config::new());
    let mut allocated = encoder
        .encode_clause(&regular, ActionId::from_raw(0))
        .unwrap();
    allocated.ident_infos["x"].start = TagAddr::start(0);

    let err = verify_clause(&regular, encoder.charsets(), &allocated, SAMPLES).unwrap_err();
    assert_eq!(
        err,
        VerifyError::Unaccounted {
            witness: "\0".to_owned(),
            tags: "<x>".to_owned(),
        }
    );
}
