use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

/// A member's score, kept in the form it was supplied.
/// Ordering and range comparisons always use [`Score::as_f64`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Score {
    Int(i64),
    Float(f64),
}

impl Score {
    pub fn as_f64(self) -> f64 {
        match self {
            Score::Int(n) => n as f64,
            Score::Float(f) => f,
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Score::Int(n) => write!(f, "{n}"),
            Score::Float(x) => write!(f, "{x:?}"),
        }
    }
}

/// One end of a score range: `5` is inclusive, `(5` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBound {
    pub value: f64,
    pub inclusive: bool,
}

impl ScoreBound {
    pub fn inclusive(value: f64) -> Self {
        ScoreBound { value, inclusive: true }
    }

    pub fn exclusive(value: f64) -> Self {
        ScoreBound { value, inclusive: false }
    }

    /// Whether `score` lies on the allowed side of this bound used as a minimum.
    fn admits_above(&self, score: f64) -> bool {
        if self.inclusive { score >= self.value } else { score > self.value }
    }

    /// Whether `score` lies on the allowed side of this bound used as a maximum.
    fn admits_below(&self, score: f64) -> bool {
        if self.inclusive { score <= self.value } else { score < self.value }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseBoundError;

impl FromStr for ScoreBound {
    type Err = ParseBoundError;

    /// Accepts any float text, including `inf`, `+inf`, `-inf` and `nan`.
    /// A leading `(` makes the bound exclusive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (text, inclusive) = match s.strip_prefix('(') {
            Some(rest) => (rest, false),
            None => (s, true),
        };
        let value = text.trim().parse().map_err(|_| ParseBoundError)?;
        Ok(ScoreBound { value, inclusive })
    }
}

/// Pagination over a filtered score range: the slice `[offset, offset + count)`,
/// clipped to the range. A negative offset or a non-positive count selects nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limit {
    pub offset: i64,
    pub count: i64,
}

impl Limit {
    /// `(skip, take)` for this slice, or `None` when it is empty.
    fn window(self) -> Option<(usize, usize)> {
        let end = self.offset.saturating_add(self.count);
        if self.offset < 0 || end <= self.offset {
            return None;
        }
        Some((self.offset as usize, (end - self.offset) as usize))
    }
}

/// Sorted set keyed by (score, first-insertion sequence).
/// The BTreeMap gives rank order; the HashMap gives member lookup.
#[derive(Debug, Clone, Default)]
pub struct OrderedSet {
    /// member -> current score and insertion sequence
    entries: HashMap<String, Slot>,
    /// rank order
    tree: BTreeMap<RankKey, String>,
    next_seq: u64,
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    score: Score,
    seq: u64,
}

/// Sorts by score, then by insertion sequence for equal scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct RankKey {
    score_bits: u64,
    seq: u64,
}

impl RankKey {
    fn new(score: f64, seq: u64) -> Self {
        RankKey {
            score_bits: f64_to_orderable(score),
            seq,
        }
    }

    fn score(&self) -> f64 {
        orderable_to_f64(self.score_bits)
    }
}

/// Map f64 onto u64 so that integer order matches float order. -0.0 folds onto 0.0.
fn f64_to_orderable(f: f64) -> u64 {
    let f = if f == 0.0 { 0.0 } else { f };
    let bits = f.to_bits();
    if bits >> 63 == 1 { !bits } else { bits ^ (1 << 63) }
}

fn orderable_to_f64(bits: u64) -> f64 {
    if bits >> 63 == 1 {
        f64::from_bits(bits ^ (1 << 63))
    } else {
        f64::from_bits(!bits)
    }
}

impl OrderedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert or overwrite a member. Returns true if the member was new.
    /// An overwritten member keeps its place among equal scores.
    pub fn add(&mut self, member: String, score: Score) -> bool {
        if let Some(slot) = self.entries.get_mut(&member) {
            self.tree.remove(&RankKey::new(slot.score.as_f64(), slot.seq));
            slot.score = score;
            self.tree.insert(RankKey::new(score.as_f64(), slot.seq), member);
            return false;
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.tree.insert(RankKey::new(score.as_f64(), seq), member.clone());
        self.entries.insert(member, Slot { score, seq });
        true
    }

    /// Apply pairs in order; one "was new" flag per pair.
    pub fn add_pairs(&mut self, pairs: Vec<(Score, String)>) -> Vec<bool> {
        pairs
            .into_iter()
            .map(|(score, member)| self.add(member, score))
            .collect()
    }

    #[cfg(test)]
    pub(crate) fn score(&self, member: &str) -> Option<Score> {
        self.entries.get(member).map(|slot| slot.score)
    }

    /// All (member, score) pairs in ascending rank order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&str, f64)> {
        self.tree.iter().map(|(k, m)| (m.as_str(), k.score()))
    }

    /// Members selected by a rank pair. See [`rank_window`] for the selection rules.
    pub fn rank_range(&self, start: i64, end: i64, reverse: bool) -> Vec<(&str, f64)> {
        let Some((offset, count)) = rank_window(start, end, self.len()) else {
            return vec![];
        };
        if reverse {
            self.iter().rev().skip(offset).take(count).collect()
        } else {
            self.iter().skip(offset).take(count).collect()
        }
    }

    /// Members whose scores satisfy both bounds, in rank order (or reverse),
    /// optionally paginated. A NaN bound admits nothing.
    pub fn score_range(
        &self,
        min: ScoreBound,
        max: ScoreBound,
        limit: Option<Limit>,
        reverse: bool,
    ) -> Vec<(&str, f64)> {
        if min.value.is_nan() || max.value.is_nan() || min.value > max.value {
            return vec![];
        }

        let lower = RankKey::new(min.value, 0);
        let upper = RankKey::new(max.value, u64::MAX);
        let candidates = self
            .tree
            .range(lower..=upper)
            .map(|(k, m)| (m.as_str(), k.score()))
            .filter(|&(_, score)| min.admits_above(score) && max.admits_below(score));

        let matched: Vec<(&str, f64)> = if reverse {
            candidates.rev().collect()
        } else {
            candidates.collect()
        };

        match limit {
            None => matched,
            Some(limit) => match limit.window() {
                Some((skip, take)) => matched.into_iter().skip(skip).take(take).collect(),
                None => vec![],
            },
        }
    }

    /// Pairs with their original scores, in rank order.
    pub fn iter_original(&self) -> impl Iterator<Item = (&str, Score)> {
        self.tree.iter().filter_map(|(_, m)| {
            self.entries.get(m).map(|slot| (m.as_str(), slot.score))
        })
    }
}

/// Resolve a `(start, end)` rank pair against `len` members into `(offset, count)`.
/// Returns `None` when the selection is empty.
///
/// - both non-negative: inclusive slice, clipped to the set.
/// - both negative: counted from the end; empty if `end < start` or `start`
///   reaches past the first member.
/// - negative start with non-negative end: always empty.
/// - non-negative start with negative end: `end` becomes the exclusive index `len + end + 1`.
pub fn rank_window(start: i64, end: i64, len: usize) -> Option<(usize, usize)> {
    let n = len as i64;
    let (begin, stop) = match (start >= 0, end >= 0) {
        (true, true) => {
            if start >= n {
                return None;
            }
            (start, end.min(n - 1) + 1)
        }
        (false, false) => {
            let span = end - start;
            if span < 0 || start <= -n {
                return None;
            }
            let begin = n + start;
            (begin, (begin + span + 1).min(n))
        }
        (false, true) => return None,
        (true, false) => {
            let stop = n + end + 1;
            if stop <= start {
                return None;
            }
            (start, stop)
        }
    };
    if stop <= begin {
        return None;
    }
    Some((begin as usize, (stop - begin) as usize))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ten() -> OrderedSet {
        let mut z = OrderedSet::new();
        for i in 0..10 {
            z.add(format!("member{i}"), Score::Int(i));
        }
        z
    }

    fn members(items: Vec<(&str, f64)>) -> Vec<String> {
        items.into_iter().map(|(m, _)| m.to_string()).collect()
    }

    fn names(range: std::ops::Range<i64>) -> Vec<String> {
        range.map(|i| format!("member{i}")).collect()
    }

    #[test]
    fn test_add_reports_new_then_existing() {
        let mut z = OrderedSet::new();
        assert!(z.add("a".into(), Score::Int(1)));
        assert!(!z.add("a".into(), Score::Int(1)));
        assert!(!z.add("a".into(), Score::Float(2.5)));
        assert_eq!(z.len(), 1);
        assert_eq!(z.score("a"), Some(Score::Float(2.5)));
    }

    #[test]
    fn test_add_pairs_last_write_wins() {
        let mut z = OrderedSet::new();
        let flags = z.add_pairs(vec![
            (Score::Int(1), "a".into()),
            (Score::Int(2), "b".into()),
            (Score::Int(3), "a".into()),
        ]);
        assert_eq!(flags, vec![true, true, false]);
        assert_eq!(members(z.rank_range(0, -1, false)), vec!["b", "a"]);
    }

    #[test]
    fn test_ties_follow_first_insertion() {
        let mut z = OrderedSet::new();
        z.add("zeta".into(), Score::Int(1));
        z.add("alpha".into(), Score::Int(1));
        z.add("mid".into(), Score::Int(1));
        // re-scoring to the same value keeps the original position
        z.add("zeta".into(), Score::Float(1.0));
        assert_eq!(members(z.rank_range(0, -1, false)), vec!["zeta", "alpha", "mid"]);
        assert_eq!(members(z.rank_range(0, -1, true)), vec!["mid", "alpha", "zeta"]);
    }

    #[test]
    fn test_rank_range_whole_set() {
        let z = ten();
        assert_eq!(members(z.rank_range(0, -1, false)), names(0..10));
        let mut rev = names(0..10);
        rev.reverse();
        assert_eq!(members(z.rank_range(0, -1, true)), rev);
    }

    #[test]
    fn test_rank_range_positive() {
        let z = ten();
        assert_eq!(members(z.rank_range(2, 7, false)), names(2..8));
        assert_eq!(members(z.rank_range(4, 4, false)), names(4..5));
        assert_eq!(members(z.rank_range(5, 999, false)), names(5..10));
        assert!(z.rank_range(10, 20, false).is_empty());
        assert!(z.rank_range(5, 3, false).is_empty());
    }

    #[test]
    fn test_rank_range_negative() {
        let z = ten();
        assert_eq!(members(z.rank_range(-1, -1, false)), names(9..10));
        assert_eq!(members(z.rank_range(-3, -3, false)), names(7..8));
        assert_eq!(members(z.rank_range(-7, -2, false)), names(3..9));
        assert!(z.rank_range(-2, -7, false).is_empty());
        assert!(z.rank_range(-10, -1, false).is_empty());
        assert!(z.rank_range(-9999, -999, false).is_empty());
    }

    #[test]
    fn test_rank_range_mixed_signs() {
        let z = ten();
        assert_eq!(members(z.rank_range(7, -2, false)), names(7..9));
        assert!(z.rank_range(8, -3, false).is_empty());
        assert!(z.rank_range(-7, 2, false).is_empty());
        assert!(z.rank_range(-999, 999, false).is_empty());
        assert!(z.rank_range(-1, 9, false).is_empty());
    }

    #[test]
    fn test_rank_window_empty_set() {
        assert_eq!(rank_window(0, -1, 0), None);
        assert_eq!(rank_window(0, 0, 0), None);
        assert_eq!(rank_window(-1, -1, 0), None);
    }

    #[test]
    fn test_bound_parsing() {
        assert_eq!("5".parse::<ScoreBound>(), Ok(ScoreBound::inclusive(5.0)));
        assert_eq!("(5".parse::<ScoreBound>(), Ok(ScoreBound::exclusive(5.0)));
        assert_eq!("-inf".parse::<ScoreBound>(), Ok(ScoreBound::inclusive(f64::NEG_INFINITY)));
        assert_eq!("(+inf".parse::<ScoreBound>(), Ok(ScoreBound::exclusive(f64::INFINITY)));
        assert_eq!("inf".parse::<ScoreBound>(), Ok(ScoreBound::inclusive(f64::INFINITY)));
        assert_eq!("(2.5".parse::<ScoreBound>(), Ok(ScoreBound::exclusive(2.5)));
        assert!("abc".parse::<ScoreBound>().is_err());
        assert!("(".parse::<ScoreBound>().is_err());
        assert!("".parse::<ScoreBound>().is_err());
        let nan = "(nan".parse::<ScoreBound>().unwrap();
        assert!(nan.value.is_nan() && !nan.inclusive);
    }

    #[test]
    fn test_score_range_exclusivity() {
        let z = ten();
        let r = z.score_range(ScoreBound::exclusive(2.0), ScoreBound::exclusive(7.0), None, false);
        assert_eq!(members(r), names(3..7));
        let r = z.score_range(ScoreBound::inclusive(2.0), ScoreBound::inclusive(7.0), None, false);
        assert_eq!(members(r), names(2..8));
        let r = z.score_range(ScoreBound::exclusive(0.0), ScoreBound::inclusive(0.0), None, false);
        assert!(r.is_empty());
    }

    #[test]
    fn test_score_range_infinities_and_inverted() {
        let mut z = ten();
        z.add("half".into(), Score::Float(4.5));
        let all = z.score_range(
            ScoreBound::inclusive(f64::NEG_INFINITY),
            ScoreBound::inclusive(f64::INFINITY),
            None,
            false,
        );
        assert_eq!(all.len(), 11);
        assert_eq!(all[5], ("half", 4.5));
        let inverted = z.score_range(ScoreBound::inclusive(7.0), ScoreBound::inclusive(2.0), None, false);
        assert!(inverted.is_empty());
    }

    #[test]
    fn test_score_range_reverse_and_limit() {
        let z = ten();
        let all = (ScoreBound::inclusive(f64::NEG_INFINITY), ScoreBound::inclusive(f64::INFINITY));
        let r = z.score_range(all.0, all.1, Some(Limit { offset: 2, count: 3 }), true);
        assert_eq!(members(r), vec!["member7", "member6", "member5"]);
        let r = z.score_range(all.0, all.1, Some(Limit { offset: 8, count: 10 }), false);
        assert_eq!(members(r), names(8..10));
        let r = z.score_range(all.0, all.1, Some(Limit { offset: 20, count: 1 }), false);
        assert!(r.is_empty());
        let r = z.score_range(all.0, all.1, Some(Limit { offset: -1, count: 5 }), false);
        assert!(r.is_empty());
    }

    #[test]
    fn test_score_range_limit_is_a_plain_slice() {
        let z = ten();
        let all = (ScoreBound::inclusive(f64::NEG_INFINITY), ScoreBound::inclusive(f64::INFINITY));
        for count in [-1, -5, 0] {
            let r = z.score_range(all.0, all.1, Some(Limit { offset: 7, count }), false);
            assert!(r.is_empty(), "count {count}");
        }
        let r = z.score_range(all.0, all.1, Some(Limit { offset: 0, count: i64::MAX }), true);
        assert_eq!(r.len(), 10);
    }

    #[test]
    fn test_nan_bound_admits_nothing() {
        let z = ten();
        let nan = ScoreBound::inclusive(f64::NAN);
        assert!(z.score_range(nan, ScoreBound::inclusive(f64::INFINITY), None, false).is_empty());
        assert!(z.score_range(ScoreBound::inclusive(f64::NEG_INFINITY), nan, None, true).is_empty());
    }

    #[test]
    fn test_negative_zero_orders_with_zero() {
        let mut z = OrderedSet::new();
        z.add("pos".into(), Score::Float(0.0));
        z.add("neg".into(), Score::Float(-0.0));
        let r = z.score_range(ScoreBound::inclusive(-0.0), ScoreBound::inclusive(0.0), None, false);
        assert_eq!(members(r), vec!["pos", "neg"]);
    }

    #[test]
    fn test_orderable_roundtrip_keeps_order() {
        let values = [f64::NEG_INFINITY, -3.5, -1.0, 0.0, 1e-9, 2.0, f64::INFINITY];
        for pair in values.windows(2) {
            assert!(f64_to_orderable(pair[0]) < f64_to_orderable(pair[1]));
        }
        for v in values {
            assert_eq!(orderable_to_f64(f64_to_orderable(v)), v);
        }
    }
}
