use super::tregular::{ActionId, CharSetId, TRegular, TRegularKind};

fn cs(raw: u32) -> TRegular {
    TRegular::chars(CharSetId::from_raw(raw), false)
}

fn tag(name: &str, start: bool) -> TRegular {
    TRegular::tag(name, start, ActionId::from_raw(0))
}

#[test]
fn or_of_equal_operands() {
    let x = TRegular::seq(cs(0), cs(1));
    assert_eq!(TRegular::or(x.clone(), x.clone()), x);
}

#[test]
fn seq_drops_epsilon() {
    let x = cs(3);
    assert_eq!(TRegular::seq(x.clone(), TRegular::epsilon()), x);
    assert_eq!(TRegular::seq(TRegular::epsilon(), x.clone()), x);
}

#[test]
fn star_simplifications() {
    assert!(TRegular::star(TRegular::epsilon()).is_epsilon());

    let once = TRegular::star(cs(0));
    assert_eq!(TRegular::star(once.clone()), once);
}

#[test]
fn leaf_metadata() {
    let eof = TRegular::chars(CharSetId::from_raw(0), true);
    assert_eq!(eof.size(), Some(0));
    assert!(!eof.nullable());

    let t = tag("n", true);
    assert_eq!(t.size(), Some(0));
    assert!(t.has_tags());
    assert!(t.nullable());

    let a = TRegular::action(ActionId::from_raw(2));
    assert_eq!(a.size(), Some(0));
    assert!(a.has_actions());
    assert!(!a.has_tags());
}

#[test]
fn composite_metadata() {
    let alt = TRegular::or(TRegular::seq(tag("n", true), cs(0)), cs(1));
    assert_eq!(alt.size(), Some(1));
    assert!(alt.has_tags());
    assert!(!alt.nullable());

    let uneven = TRegular::or(cs(0), TRegular::seq(cs(1), cs(2)));
    assert_eq!(uneven.size(), None);

    let seq = TRegular::seq(alt, TRegular::star(cs(3)));
    assert_eq!(seq.size(), None);
    assert!(!seq.nullable());
    assert!(seq.has_tags());

    let body = TRegular::seq(cs(0), TRegular::action(ActionId::from_raw(0)));
    let rep = TRegular::star(body);
    assert!(rep.nullable());
    assert!(rep.has_actions());
    assert!(matches!(rep.kind(), TRegularKind::Repetition(_)));
}

#[test]
fn collects_tags_left_to_right() {
    let repeated = TRegular::star(TRegular::seq(tag("b", true), cs(0)));
    let r = TRegular::seq(TRegular::seq(tag("a", true), repeated), tag("a", false));
    let tags: Vec<String> = r.tags().iter().map(|t| t.to_string()).collect();
    assert_eq!(tags, ["<a>", "<b>", "</a>"]);
}

#[test]
fn display() {
    let r = TRegular::or(
        TRegular::seq(
            TRegular::seq(tag("n", true), TRegular::star(cs(0))),
            TRegular::seq(tag("n", false), TRegular::action(ActionId::from_raw(0))),
        ),
        TRegular::seq(
            TRegular::chars(CharSetId::from_raw(1), true),
            TRegular::action(ActionId::from_raw(1)),
        ),
    );
    insta::assert_snapshot!(r.to_string(), @"(<n>([0])*</n>{0}|[1EOF]{1})");
}
