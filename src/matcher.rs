//! Ordered sequence similarity.
//!
//! Implements the classic "gestalt" matcher: find the longest
//! contiguous matching block, recurse on both sides of it, and score
//! `2 * matched / total`. Unlike a plain LCS this never matches
//! elements across an earlier, longer block, which keeps the score
//! sensitive to reordering.

use indexmap::IndexMap;
use std::collections::HashMap;
use std::hash::Hash;

/// Below this length of `b` every element may seed a match.
const POPULAR_MIN_LEN: usize = 200;

/// A contiguous run `a[a_start..a_start+len] == b[b_start..b_start+len]`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Block {
    pub a_start: usize,
    pub b_start: usize,
    pub len: usize,
}

/// Matcher over two borrowed sequences.
#[derive(Debug)]
pub struct SequenceMatcher<'a, T> {
    a: &'a [T],
    b: &'a [T],
    /// Element to its (ascending) positions in `b`, with popular
    /// elements removed.
    b2j: IndexMap<&'a T, Vec<usize>>,
}

impl<'a, T: Hash + Eq> SequenceMatcher<'a, T> {
    pub fn new(a: &'a [T], b: &'a [T]) -> SequenceMatcher<'a, T> {
        let mut b2j = IndexMap::<&T, Vec<usize>>::new();
        for (j, elt) in b.iter().enumerate() {
            b2j.entry(elt).or_default().push(j);
        }
        // elements making up more than 1% of a long `b` cannot seed
        // a match. they can still extend one.
        if b.len() >= POPULAR_MIN_LEN {
            let ntest = b.len() / 100 + 1;
            b2j.retain(|_, js| js.len() <= ntest);
        }
        SequenceMatcher { a, b, b2j }
    }

    /// Longest matching block inside `a[alo..ahi]` and `b[blo..bhi]`.
    ///
    /// Ties go to the block starting earliest in `a`, then in `b`.
    fn longest_match(
        &self, alo: usize, ahi: usize, blo: usize, bhi: usize
    ) -> Block {
        let (a, b) = (self.a, self.b);
        let (mut besti, mut bestj, mut bestsize) = (alo, blo, 0);
        // j2len[j] = length of the match ending at a[i-1], b[j]
        let mut j2len = HashMap::<usize, usize>::new();
        for (i, elt) in a.iter().enumerate().take(ahi).skip(alo) {
            let mut new_j2len = HashMap::new();
            if let Some(js) = self.b2j.get(elt) {
                for &j in js {
                    if j < blo {
                        continue
                    }
                    if j >= bhi {
                        break
                    }
                    let k = j.checked_sub(1)
                        .and_then(|p| j2len.get(&p))
                        .copied()
                        .unwrap_or(0) + 1;
                    new_j2len.insert(j, k);
                    if k > bestsize {
                        besti = i + 1 - k;
                        bestj = j + 1 - k;
                        bestsize = k;
                    }
                }
            }
            j2len = new_j2len;
        }
        while besti > alo && bestj > blo &&
            a[besti - 1] == b[bestj - 1]
        {
            besti -= 1;
            bestj -= 1;
            bestsize += 1;
        }
        while besti + bestsize < ahi && bestj + bestsize < bhi &&
            a[besti + bestsize] == b[bestj + bestsize]
        {
            bestsize += 1;
        }
        Block { a_start: besti, b_start: bestj, len: bestsize }
    }

    /// All matching blocks, ordered by position.
    pub fn matching_blocks(&self) -> Vec<Block> {
        let mut queue = vec![(0, self.a.len(), 0, self.b.len())];
        let mut blocks = Vec::new();
        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let m = self.longest_match(alo, ahi, blo, bhi);
            if m.len == 0 {
                continue
            }
            let (i, j, k) = (m.a_start, m.b_start, m.len);
            blocks.push(m);
            if alo < i && blo < j {
                queue.push((alo, i, blo, j));
            }
            if i + k < ahi && j + k < bhi {
                queue.push((i + k, ahi, j + k, bhi));
            }
        }
        blocks.sort();
        blocks
    }

    /// Similarity in `[0, 1]`. Two empty sequences are identical.
    pub fn ratio(&self) -> f64 {
        let total = self.a.len() + self.b.len();
        if total == 0 {
            return 1.0
        }
        let matched: usize = self.matching_blocks().iter()
            .map(|m| m.len).sum();
        2.0 * matched as f64 / total as f64
    }
}

/// Shorthand for [`SequenceMatcher::ratio`].
#[inline]
pub fn similarity<T: Hash + Eq>(a: &[T], b: &[T]) -> f64 {
    SequenceMatcher::new(a, b).ratio()
}
