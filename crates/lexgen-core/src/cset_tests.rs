use crate::cset::{CharSet, CharSetError, EOF_CODE_UNIT, Interval};

fn range(first: char, last: char) -> CharSet {
    CharSet::interval(first as u16, last as u16).unwrap()
}

fn samples() -> Vec<CharSet> {
    vec![
        CharSet::empty(),
        CharSet::all(),
        CharSet::all_but_eof(),
        CharSet::eof(),
        CharSet::singleton(0),
        CharSet::singleton(b'x' as u16),
        CharSet::singleton(EOF_CODE_UNIT - 1),
        range('a', 'z'),
        range('0', '9').union(&range('a', 'f')),
        CharSet::chars([1, 3, 5, 7, 0xFFFE]),
    ]
}

#[test]
fn interval_rejects_reversed_bounds() {
    assert_eq!(
        CharSet::interval(10, 3),
        Err(CharSetError::InvalidInterval { first: 10, last: 3 })
    );
}

#[test]
fn canonical_forms_collapse() {
    assert_eq!(CharSet::interval(7, 7).unwrap(), CharSet::singleton(7));
    assert_eq!(CharSet::interval(0, EOF_CODE_UNIT).unwrap(), CharSet::all());
    assert_eq!(CharSet::chars([]), CharSet::empty());
    assert_eq!(
        CharSet::chars([3, 1, 2, 2]),
        CharSet::interval(1, 3).unwrap()
    );
    assert_eq!(
        CharSet::all_but_eof().union(&CharSet::eof()),
        CharSet::all()
    );
}

#[test]
fn union_merges_adjacent_intervals() {
    let set = range('a', 'c').union(&range('d', 'f'));
    assert_eq!(set, range('a', 'f'));
    assert_eq!(set.ranges().count(), 1);
}

#[test]
fn union_keeps_gaps() {
    let set = range('a', 'c').union(&range('x', 'z'));
    let intervals: Vec<Interval> = set.ranges().collect();
    assert_eq!(
        intervals,
        vec![
            Interval::new(b'a' as u16, b'c' as u16).unwrap(),
            Interval::new(b'x' as u16, b'z' as u16).unwrap(),
        ]
    );
}

#[test]
fn intersection_and_difference() {
    let letters = range('a', 'z');
    let hex = range('0', '9').union(&range('a', 'f'));

    assert_eq!(letters.intersection(&hex), range('a', 'f'));
    assert_eq!(letters.difference(&hex), range('g', 'z'));
    assert_eq!(hex.difference(&letters), range('0', '9'));
}

#[test]
fn difference_splits_interval() {
    let set = range('a', 'z').difference(&CharSet::singleton(b'm' as u16));
    assert_eq!(set, range('a', 'l').union(&range('n', 'z')));
    assert_eq!(set.cardinal(), 25);
    assert!(!set.contains(b'm' as u16));
    assert!(set.contains(b'n' as u16));
}

#[test]
fn complement_is_relative_to_all() {
    assert_eq!(CharSet::empty().complement(), CharSet::all());
    assert_eq!(CharSet::all().complement(), CharSet::empty());
    assert_eq!(CharSet::eof().complement(), CharSet::all_but_eof());
    assert_eq!(CharSet::all_but_eof().complement(), CharSet::eof());
    assert!(range('a', 'z').complement().contains(EOF_CODE_UNIT));
}

#[test]
fn complement_laws() {
    for s in samples() {
        assert_eq!(s.complement().complement(), s, "double complement of {s}");
        assert_eq!(s.union(&s.complement()), CharSet::all(), "union of {s}");
        assert!(s.intersection(&s.complement()).is_empty(), "inter of {s}");
    }
}

#[test]
fn algebra_against_membership() {
    let probes: Vec<u16> = vec![
        0, 1, 2, 3, 48, 57, 97, 102, 103, 120, 122, 0xFFFE, EOF_CODE_UNIT,
    ];
    let sets = samples();
    for a in &sets {
        for b in &sets {
            let union = a.union(b);
            let inter = a.intersection(b);
            let diff = a.difference(b);
            for &c in &probes {
                assert_eq!(union.contains(c), a.contains(c) || b.contains(c));
                assert_eq!(inter.contains(c), a.contains(c) && b.contains(c));
                assert_eq!(diff.contains(c), a.contains(c) && !b.contains(c));
            }
        }
    }
}

#[test]
fn subset_and_witness() {
    assert!(range('b', 'c').is_subset(&range('a', 'z')));
    assert!(!range('a', 'z').is_subset(&range('b', 'c')));
    assert!(CharSet::empty().is_subset(&CharSet::eof()));
    assert_eq!(
        range('0', '9').union(&range('a', 'f')).witness(),
        Some(b'0' as u16)
    );
    assert_eq!(CharSet::empty().witness(), None);
    assert_eq!(CharSet::all().cardinal(), 0x10000);
}

#[test]
fn ordering_is_lexicographic_on_intervals() {
    assert!(CharSet::empty() < CharSet::singleton(0));
    assert!(CharSet::singleton(1) < CharSet::singleton(2));
    assert!(range('a', 'b') < range('a', 'c'));
}

#[test]
fn display() {
    assert_eq!(CharSet::empty().to_string(), "∅");
    assert_eq!(CharSet::all().to_string(), "_");
    assert_eq!(CharSet::eof().to_string(), "EOF");
    assert_eq!(CharSet::singleton(b'q' as u16).to_string(), "q");
    assert_eq!(CharSet::singleton(b'\n' as u16).to_string(), "\\u000A");
    let mixed = range('a', 'z').union(&CharSet::singleton(b'0' as u16));
    assert_eq!(mixed.to_string(), "[0 a-z]");
    assert_eq!(CharSet::all_but_eof().to_string(), "[\\u0000-\\uFFFE]");
}

#[test]
fn serde_round_trips_through_intervals() {
    let set = range('0', '9').union(&range('a', 'f'));
    let json = serde_json::to_string(&set).unwrap();
    assert_eq!(json, r#"[{"first":48,"last":57},{"first":97,"last":102}]"#);

    let back: CharSet = serde_json::from_str(&json).unwrap();
    assert_eq!(back, set);
}

#[test]
fn serde_rejects_non_canonical_lists() {
    let touching = r#"[{"first":1,"last":2},{"first":3,"last":4}]"#;
    assert!(serde_json::from_str::<CharSet>(touching).is_err());

    let reversed = r#"[{"first":5,"last":4}]"#;
    assert!(serde_json::from_str::<CharSet>(reversed).is_err());

    assert_eq!(
        CharSet::try_from(vec![
            Interval { first: 4, last: 9 },
            Interval { first: 2, last: 3 },
        ]),
        Err(CharSetError::NotCanonical { first: 2, last: 3 })
    );
}
