//! Character sets over 16-bit code units.
//!
//! A set is stored as an ordered list of disjoint, non-adjacent intervals.
//! The representation is canonical, so structural equality is set equality:
//! - `Empty` and `All` stand for the two trivial sets
//! - `Single` holds a set with exactly one member
//! - `Ranges` holds everything else, never touching intervals
//!
//! The code unit `0xFFFF` is reserved for end-of-input. It belongs to the
//! universe `CharSet::all()`, so `complement` may produce it; use
//! `CharSet::all_but_eof()` for every ordinary code unit.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The code unit reserved for end-of-input.
pub const EOF_CODE_UNIT: u16 = 0xFFFF;

const LAST_ORDINARY: u16 = EOF_CODE_UNIT - 1;

/// Errors raised when building a character set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CharSetError {
    #[error("invalid interval [{first:#06x}, {last:#06x}]: first is greater than last")]
    InvalidInterval { first: u16, last: u16 },

    #[error("interval [{first:#06x}, {last:#06x}] overlaps or touches the previous one")]
    NotCanonical { first: u16, last: u16 },
}

/// A closed interval `[first, last]` of code units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Interval {
    pub first: u16,
    pub last: u16,
}

impl Interval {
    pub fn new(first: u16, last: u16) -> Result<Self, CharSetError> {
        if first > last {
            return Err(CharSetError::InvalidInterval { first, last });
        }
        Ok(Self { first, last })
    }

    pub fn contains(self, c: u16) -> bool {
        self.first <= c && c <= self.last
    }

    pub fn len(self) -> u32 {
        u32::from(self.last) - u32::from(self.first) + 1
    }
}

/// An immutable set of code units.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "Vec<Interval>", try_from = "Vec<Interval>")]
pub struct CharSet(Repr);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Repr {
    Empty,
    Single(u16),
    All,
    Ranges(Vec<Interval>),
}

impl CharSet {
    pub fn empty() -> Self {
        Self(Repr::Empty)
    }

    /// Every code unit, end-of-input included.
    pub fn all() -> Self {
        Self(Repr::All)
    }

    /// Every ordinary code unit.
    pub fn all_but_eof() -> Self {
        Self(Repr::Ranges(vec![Interval {
            first: 0,
            last: LAST_ORDINARY,
        }]))
    }

    /// The end-of-input singleton.
    pub fn eof() -> Self {
        Self(Repr::Single(EOF_CODE_UNIT))
    }

    pub fn singleton(c: u16) -> Self {
        Self(Repr::Single(c))
    }

    pub fn interval(first: u16, last: u16) -> Result<Self, CharSetError> {
        let interval = Interval::new(first, last)?;
        Ok(Self::from_canonical(vec![interval]))
    }

    /// Builds the set of the given code units, in any order.
    pub fn chars(units: impl IntoIterator<Item = u16>) -> Self {
        let mut units: Vec<u16> = units.into_iter().collect();
        units.sort_unstable();
        units.dedup();

        let mut intervals: Vec<Interval> = Vec::new();
        for c in units {
            match intervals.last_mut() {
                Some(last) if u32::from(last.last) + 1 == u32::from(c) => last.last = c,
                _ => intervals.push(Interval { first: c, last: c }),
            }
        }
        Self::from_canonical(intervals)
    }

    /// Picks the cheapest representation for an already canonical list.
    fn from_canonical(intervals: Vec<Interval>) -> Self {
        match intervals.as_slice() {
            [] => Self(Repr::Empty),
            [i] if i.first == i.last => Self(Repr::Single(i.first)),
            [i] if i.first == 0 && i.last == EOF_CODE_UNIT => Self(Repr::All),
            _ => Self(Repr::Ranges(intervals)),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.0, Repr::Empty)
    }

    pub fn contains(&self, c: u16) -> bool {
        match &self.0 {
            Repr::Empty => false,
            Repr::Single(s) => *s == c,
            Repr::All => true,
            Repr::Ranges(intervals) => intervals
                .binary_search_by(|i| {
                    if i.last < c {
                        Ordering::Less
                    } else if i.first > c {
                        Ordering::Greater
                    } else {
                        Ordering::Equal
                    }
                })
                .is_ok(),
        }
    }

    /// Number of members.
    pub fn cardinal(&self) -> u32 {
        self.ranges().map(Interval::len).sum()
    }

    pub fn is_subset(&self, other: &CharSet) -> bool {
        self.difference(other).is_empty()
    }

    /// The smallest member, if any.
    pub fn witness(&self) -> Option<u16> {
        self.ranges().next().map(|i| i.first)
    }

    /// Iterates over the canonical intervals in increasing order.
    pub fn ranges(&self) -> Ranges<'_> {
        match &self.0 {
            Repr::Empty => Ranges::new(None, &[]),
            Repr::Single(c) => Ranges::new(
                Some(Interval {
                    first: *c,
                    last: *c,
                }),
                &[],
            ),
            Repr::All => Ranges::new(
                Some(Interval {
                    first: 0,
                    last: EOF_CODE_UNIT,
                }),
                &[],
            ),
            Repr::Ranges(intervals) => Ranges::new(None, intervals),
        }
    }

    pub fn union(&self, other: &CharSet) -> CharSet {
        match (&self.0, &other.0) {
            (Repr::Empty, _) => other.clone(),
            (_, Repr::Empty) => self.clone(),
            (Repr::All, _) | (_, Repr::All) => Self::all(),
            _ => Self::from_canonical(union(self.ranges(), other.ranges())),
        }
    }

    pub fn intersection(&self, other: &CharSet) -> CharSet {
        match (&self.0, &other.0) {
            (Repr::Empty, _) | (_, Repr::Empty) => Self::empty(),
            (Repr::All, _) => other.clone(),
            (_, Repr::All) => self.clone(),
            _ => Self::from_canonical(intersection(self.ranges(), other.ranges())),
        }
    }

    pub fn difference(&self, other: &CharSet) -> CharSet {
        match (&self.0, &other.0) {
            (Repr::Empty, _) | (_, Repr::All) => Self::empty(),
            (_, Repr::Empty) => self.clone(),
            _ => Self::from_canonical(difference(self.ranges(), other.ranges())),
        }
    }

    /// Complement relative to `CharSet::all()`.
    pub fn complement(&self) -> CharSet {
        Self::all().difference(self)
    }
}

fn union(lhs: Ranges<'_>, rhs: Ranges<'_>) -> Vec<Interval> {
    let mut lhs = lhs.peekable();
    let mut rhs = rhs.peekable();
    let mut out: Vec<Interval> = Vec::new();

    loop {
        let next = match (lhs.peek(), rhs.peek()) {
            (None, None) => break,
            (Some(_), None) => lhs.next(),
            (None, Some(_)) => rhs.next(),
            (Some(l), Some(r)) if l.first <= r.first => lhs.next(),
            (Some(_), Some(_)) => rhs.next(),
        };
        let Some(next) = next else { break };

        match out.last_mut() {
            Some(last) if u32::from(next.first) <= u32::from(last.last) + 1 => {
                last.last = last.last.max(next.last);
            }
            _ => out.push(next),
        }
    }
    out
}

fn intersection(lhs: Ranges<'_>, rhs: Ranges<'_>) -> Vec<Interval> {
    let mut lhs = lhs.peekable();
    let mut rhs = rhs.peekable();
    let mut out = Vec::new();

    while let (Some(l), Some(r)) = (lhs.peek().copied(), rhs.peek().copied()) {
        let first = l.first.max(r.first);
        let last = l.last.min(r.last);
        if first <= last {
            out.push(Interval { first, last });
        }
        if l.last < r.last {
            lhs.next();
        } else {
            rhs.next();
        }
    }
    out
}

fn difference(lhs: Ranges<'_>, rhs: Ranges<'_>) -> Vec<Interval> {
    let mut rhs = rhs.peekable();
    let mut out = Vec::new();

    for l in lhs {
        // Lower bound of what is left of `l`, widened to avoid overflow at 0xFFFF.
        let mut first = u32::from(l.first);
        let last = u32::from(l.last);

        while let Some(r) = rhs.peek().copied() {
            if u32::from(r.last) < first {
                rhs.next();
                continue;
            }
            if u32::from(r.first) > last {
                break;
            }
            if u32::from(r.first) > first {
                out.push(Interval {
                    first: first as u16,
                    last: r.first - 1,
                });
            }
            first = u32::from(r.last) + 1;
            if u32::from(r.last) > last {
                break;
            }
            rhs.next();
        }

        if first <= last {
            out.push(Interval {
                first: first as u16,
                last: l.last,
            });
        }
    }
    out
}

/// Iterator over the intervals of a [`CharSet`].
#[derive(Debug, Clone)]
pub struct Ranges<'a> {
    inline: Option<Interval>,
    rest: std::slice::Iter<'a, Interval>,
}

impl<'a> Ranges<'a> {
    fn new(inline: Option<Interval>, rest: &'a [Interval]) -> Self {
        Self {
            inline,
            rest: rest.iter(),
        }
    }
}

impl Iterator for Ranges<'_> {
    type Item = Interval;

    fn next(&mut self) -> Option<Interval> {
        self.inline.take().or_else(|| self.rest.next().copied())
    }
}

impl PartialOrd for CharSet {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CharSet {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ranges().cmp(other.ranges())
    }
}

impl From<CharSet> for Vec<Interval> {
    fn from(set: CharSet) -> Self {
        set.ranges().collect()
    }
}

impl TryFrom<Vec<Interval>> for CharSet {
    type Error = CharSetError;

    fn try_from(intervals: Vec<Interval>) -> Result<Self, Self::Error> {
        let mut previous: Option<Interval> = None;
        for &Interval { first, last } in &intervals {
            Interval::new(first, last)?;
            if let Some(prev) = previous
                && u32::from(first) <= u32::from(prev.last) + 1
            {
                return Err(CharSetError::NotCanonical { first, last });
            }
            previous = Some(Interval { first, last });
        }
        Ok(Self::from_canonical(intervals))
    }
}

fn write_unit(f: &mut fmt::Formatter<'_>, c: u16) -> fmt::Result {
    if c == EOF_CODE_UNIT {
        return f.write_str("EOF");
    }
    match char::from_u32(u32::from(c)) {
        Some(ch) if ch.is_ascii_alphanumeric() => write!(f, "{ch}"),
        _ => write!(f, "\\u{c:04X}"),
    }
}

impl fmt::Display for CharSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Repr::Empty => f.write_str("∅"),
            Repr::All => f.write_str("_"),
            Repr::Single(c) => write_unit(f, *c),
            Repr::Ranges(intervals) => {
                f.write_str("[")?;
                for (i, interval) in intervals.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write_unit(f, interval.first)?;
                    if interval.last != interval.first {
                        f.write_str("-")?;
                        write_unit(f, interval.last)?;
                    }
                }
                f.write_str("]")
            }
        }
    }
}
