use std::cell::OnceCell;
use std::hash::Hash;

use fxhash::{FxHashMap, FxHashSet};

use crate::config::{AlignConfig, AUTOJUNK_MIN_LEN};
use crate::opcode::{OpTag, Opcode};

/// A maximal run `a[a..a + size] == b[b..b + size]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub a: usize,
    pub b: usize,
    pub size: usize,
}

/// Longest-matching-block sequence matcher over hashable elements.
///
/// `a` is the spoken sequence and `b` the reference. The matcher indexes the
/// reference once at construction; every query after that is pure.
///
/// Ties between equally long anchors resolve to the one that starts earliest
/// in the reference, then earliest in the spoken sequence, so identical
/// inputs always produce identical blocks.
#[derive(Debug)]
pub struct SequenceMatcher<'a, T: Hash + Eq> {
    a: &'a [T],
    b: &'a [T],
    b2j: FxHashMap<&'a T, Vec<usize>>,
    blocks: OnceCell<Vec<Match>>,
}

impl<'a, T: Hash + Eq> SequenceMatcher<'a, T> {
    pub fn new(a: &'a [T], b: &'a [T]) -> Self {
        Self::with_config(a, b, &AlignConfig::default())
    }

    pub fn with_config(a: &'a [T], b: &'a [T], cfg: &AlignConfig) -> Self {
        let mut b2j: FxHashMap<&'a T, Vec<usize>> = FxHashMap::default();
        for (j, elt) in b.iter().enumerate() {
            b2j.entry(elt).or_default().push(j);
        }

        if cfg.autojunk && b.len() >= AUTOJUNK_MIN_LEN {
            let limit = b.len() / 100 + 1;
            let popular: FxHashSet<&'a T> = b2j
                .iter()
                .filter(|(_, idxs)| idxs.len() > limit)
                .map(|(elt, _)| *elt)
                .collect();
            b2j.retain(|elt, _| !popular.contains(elt));
        }

        Self {
            a,
            b,
            b2j,
            blocks: OnceCell::new(),
        }
    }

    /// Longest matching block inside `a[alo..ahi]` and `b[blo..bhi]`.
    ///
    /// Returns a zero-sized match at `(alo, blo)` when nothing matches.
    pub fn find_longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> Match {
        let mut best = Match {
            a: alo,
            b: blo,
            size: 0,
        };
        if alo >= ahi || blo >= bhi {
            return best;
        }

        // j2len[j - blo + 1]: length of the match ending at a[i - 1], b[j].
        // Two rows, swapped per `i`; only the touched slots are cleared.
        let width = bhi - blo + 1;
        let mut j2len = vec![0usize; width];
        let mut next = vec![0usize; width];
        let mut touched: Vec<usize> = Vec::new();
        let mut next_touched: Vec<usize> = Vec::new();

        for i in alo..ahi {
            if let Some(positions) = self.b2j.get(&self.a[i]) {
                let start = positions.partition_point(|&j| j < blo);
                for &j in &positions[start..] {
                    if j >= bhi {
                        break;
                    }
                    let slot = j - blo;
                    let k = j2len[slot] + 1;
                    next[slot + 1] = k;
                    next_touched.push(slot + 1);

                    let start_b = j + 1 - k;
                    if k > best.size || (k == best.size && start_b < best.b) {
                        best = Match {
                            a: i + 1 - k,
                            b: start_b,
                            size: k,
                        };
                    }
                }
            }
            for &slot in &touched {
                j2len[slot] = 0;
            }
            touched.clear();
            std::mem::swap(&mut j2len, &mut next);
            std::mem::swap(&mut touched, &mut next_touched);
        }

        best
    }

    /// Non-overlapping matching blocks in increasing order, adjacent blocks
    /// merged. No trailing sentinel.
    pub fn matching_blocks(&self) -> &[Match] {
        self.blocks.get_or_init(|| self.compute_blocks())
    }

    fn compute_blocks(&self) -> Vec<Match> {
        let mut queue = vec![(0, self.a.len(), 0, self.b.len())];
        let mut found = Vec::new();

        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let m = self.find_longest_match(alo, ahi, blo, bhi);
            if m.size == 0 {
                continue;
            }
            if alo < m.a && blo < m.b {
                queue.push((alo, m.a, blo, m.b));
            }
            if m.a + m.size < ahi && m.b + m.size < bhi {
                queue.push((m.a + m.size, ahi, m.b + m.size, bhi));
            }
            found.push(m);
        }
        found.sort_by_key(|m| (m.a, m.b));

        let mut merged: Vec<Match> = Vec::with_capacity(found.len());
        for m in found {
            match merged.last_mut() {
                Some(last) if last.a + last.size == m.a && last.b + last.size == m.b => {
                    last.size += m.size;
                }
                _ => merged.push(m),
            }
        }
        merged
    }

    /// Opcodes turning the spoken sequence into the reference.
    ///
    /// Spans partition both sequences exactly; two empty sequences yield no
    /// opcodes at all.
    pub fn opcodes(&self) -> Vec<Opcode> {
        let (la, lb) = (self.a.len(), self.b.len());
        let sentinel = Match {
            a: la,
            b: lb,
            size: 0,
        };

        let mut ops = Vec::new();
        let (mut i, mut j) = (0, 0);
        for m in self.matching_blocks().iter().chain(std::iter::once(&sentinel)) {
            let tag = match (i < m.a, j < m.b) {
                (true, true) => Some(OpTag::Replace),
                (true, false) => Some(OpTag::Insert),
                (false, true) => Some(OpTag::Delete),
                (false, false) => None,
            };
            if let Some(tag) = tag {
                ops.push(Opcode::new(tag, i, m.a, j, m.b));
            }
            if m.size > 0 {
                ops.push(Opcode::new(OpTag::Equal, m.a, m.a + m.size, m.b, m.b + m.size));
            }
            i = m.a + m.size;
            j = m.b + m.size;
        }
        ops
    }

    /// Number of elements covered by matching blocks.
    pub fn matched_len(&self) -> usize {
        self.matching_blocks().iter().map(|m| m.size).sum()
    }

    /// `2 * M / T` where `M` is [`matched_len`](Self::matched_len) and `T`
    /// the combined length. Two empty sequences are identical (1.0).
    pub fn ratio(&self) -> f64 {
        let total = self.a.len() + self.b.len();
        if total == 0 {
            return 1.0;
        }
        2.0 * self.matched_len() as f64 / total as f64
    }
}

/// Character-level ratio of two strings, without the popular-element
/// heuristic.
///
/// ```rust
/// use align::char_ratio;
///
/// assert_eq!(char_ratio("الله", "الله"), 1.0);
/// assert!((char_ratio("الرحمان", "الرحمن") - 12.0 / 13.0).abs() < 1e-12);
/// ```
pub fn char_ratio(a: &str, b: &str) -> f64 {
    char_ratio_with(a, b, &AlignConfig::default())
}

/// Character-level ratio under `cfg`.
///
/// Cost grows with `len(a) * len(b) / alphabet` per anchor search, and
/// texts with many small differences need many searches. With
/// `cfg.autojunk` set, strings of at least [`AUTOJUNK_MIN_LEN`] characters
/// skip popular characters when anchoring, which keeps whole passages fast
/// but lowers the ratio: frequent letters and the space never anchor.
pub fn char_ratio_with(a: &str, b: &str, cfg: &AlignConfig) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    SequenceMatcher::with_config(&a, &b, cfg).ratio()
}
