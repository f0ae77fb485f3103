/*!

Circular suffix ranking: sorts all the rotations of a block.

Two rankers produce the very same permutation. The naive one compares rotations
symbol by symbol with wrap-around and is only suitable for tiny blocks. The
doubling one refines rotation classes by prefixes of length 1, 2, 4, .. using
counting sorts, in O(N log N) time and 4N words of memory.

Rotations that compare equal (periodic blocks) are ordered by ascending start.

*/

use std::cmp::Ordering;
use std::mem;

use log::debug;

use super::{Radix, Symbol};
use crate::{Error, Result};

/// Blocks up to this length are ranked with the direct comparator
pub const NAIVE_LIMIT: usize = 32;

/// Sorted permutation of the rotations of a block
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SuffixRanker {
    order: Vec<usize>,
    anchor: usize,
}

impl SuffixRanker {
    /// Rank rotations of a non-empty block, picking the algorithm by its size
    pub fn new(block: &[Symbol]) -> Result<SuffixRanker> {
        if block.len() <= NAIVE_LIMIT {
            SuffixRanker::naive(block)
        } else {
            SuffixRanker::doubling(block)
        }
    }

    /// Rank with the wrap-around comparator.
    /// Run time: O(N^2 log N), memory: N words
    pub fn naive(block: &[Symbol]) -> Result<SuffixRanker> {
        check_block(block)?;
        let mut order: Vec<usize> = (0..block.len()).collect();
        // stable, so equal rotations keep ascending starts
        order.sort_by(|&a, &b| compare_rotations(block, a, b));
        Ok(SuffixRanker::from_order(order))
    }

    /// Rank by prefix doubling.
    /// Run time: O(N log N), memory: 4N words
    pub fn doubling(block: &[Symbol]) -> Result<SuffixRanker> {
        check_block(block)?;
        Ok(SuffixRanker::from_order(rank_by_doubling(block)))
    }

    fn from_order(order: Vec<usize>) -> SuffixRanker {
        let mut anchor = 0;
        for (i, &p) in order.iter().enumerate() {
            if p == 0 {
                anchor = i;
            }
        }
        debug!("sorted rotations: {:?}, anchor {}", order, anchor);
        SuffixRanker { order, anchor }
    }

    /// Number of rotations, equal to the block length
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Always false, a ranker is never built over an empty block
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Start of the i-th smallest rotation
    pub fn rotation_start(&self, i: usize) -> Result<usize> {
        self.order.get(i).copied()
            .ok_or_else(|| Error::range("rotation", i, self.order.len()))
    }

    /// Position of the unrotated block in the sorted order
    pub fn anchor(&self) -> usize {
        self.anchor
    }

    /// The whole permutation
    pub fn as_slice(&self) -> &[usize] {
        &self.order[..]
    }
}

fn check_block(block: &[Symbol]) -> Result<()> {
    if block.is_empty() {
        return Err(Error::Argument("no block supplied".to_string()));
    }
    if block.len() > i32::MAX as usize {
        return Err(Error::Argument(format!("block of {} symbols is too large", block.len())));
    }
    Ok(())
}

/// Lexicographic comparison of two rotations, wrapping at the block end
pub fn compare_rotations(block: &[Symbol], a: usize, b: usize) -> Ordering {
    let ra = block[a..].iter().chain(block[..a].iter());
    let rb = block[b..].iter().chain(block[..b].iter());
    ra.cmp(rb)
}

fn rank_by_doubling(block: &[Symbol]) -> Vec<usize> {
    let n = block.len();

    let mut radix = Radix::new();
    radix.gather(block);
    radix.accumulate();
    let mut order = vec![0usize; n];
    for (i, &ch) in block.iter().enumerate() {
        order[radix.place(ch)] = i;
    }

    // class[i]: rank of the first k symbols of rotation i among distinct prefixes
    let mut class = vec![0usize; n];
    let mut classes = 1;
    for w in 1..n {
        if block[order[w]] != block[order[w - 1]] {
            classes += 1;
        }
        class[order[w]] = classes - 1;
    }

    let mut shifted = vec![0usize; n];
    let mut next_class = vec![0usize; n];
    let mut counts = vec![0usize; n];
    let mut k = 1;

    while k < n && classes < n {
        // `order` is sorted by the second half of each rotation starting k earlier
        for (s, &p) in shifted.iter_mut().zip(order.iter()) {
            *s = (p + n - k) % n;
        }
        counting_sort(&shifted, &class, classes, &mut counts, &mut order);

        classes = 1;
        next_class[order[0]] = 0;
        for w in 1..n {
            let (cur, prev) = (order[w], order[w - 1]);
            if class[cur] != class[prev] || class[(cur + k) % n] != class[(prev + k) % n] {
                classes += 1;
            }
            next_class[cur] = classes - 1;
        }
        mem::swap(&mut class, &mut next_class);
        debug!("\tdoubling k={}: {} classes", 2 * k, classes);
        k <<= 1;
    }

    // final classes identify equal rotations; lay them out by ascending start
    let identity: Vec<usize> = (0..n).collect();
    counting_sort(&identity, &class, classes, &mut counts, &mut order);
    order
}

/// Stable placement of `input` into `output` keyed by `class`
fn counting_sort(input: &[usize], class: &[usize], classes: usize,
                 counts: &mut [usize], output: &mut [usize]) {
    let counts = &mut counts[..classes];
    for c in counts.iter_mut() {
        *c = 0;
    }
    for &p in input.iter() {
        counts[class[p]] += 1;
    }
    let mut sum = 0;
    for c in counts.iter_mut() {
        let f = *c;
        *c = sum;
        sum += f;
    }
    for &p in input.iter() {
        let slot = &mut counts[class[p]];
        output[*slot] = p;
        *slot += 1;
    }
}


#[cfg(test)]
mod test {
    use rand::{Rng, SeedableRng};
    use rand::rngs::StdRng;
    use super::{compare_rotations, SuffixRanker};

    fn assert_sorted(block: &[u8], ranker: &SuffixRanker) {
        let order = ranker.as_slice();
        let mut seen = vec![false; block.len()];
        for &p in order {
            assert!(!seen[p], "start {} appears twice", p);
            seen[p] = true;
        }
        for w in order.windows(2) {
            assert!(compare_rotations(block, w[0], w[1]).is_le());
        }
    }

    #[test]
    fn single_symbol() {
        let r = SuffixRanker::new(b"x").unwrap();
        assert_eq!(r.as_slice(), &[0]);
        assert_eq!(r.anchor(), 0);
    }

    #[test]
    fn uniform_block_keeps_index_order() {
        let block = vec![b'A'; 100];
        let expected: Vec<usize> = (0..100).collect();
        assert_eq!(SuffixRanker::naive(&block).unwrap().as_slice(), &expected[..]);
        assert_eq!(SuffixRanker::doubling(&block).unwrap().as_slice(), &expected[..]);
    }

    #[test]
    fn periodic_ties() {
        for r in [SuffixRanker::naive(b"ABAB").unwrap(), SuffixRanker::doubling(b"ABAB").unwrap()] {
            assert_eq!(r.as_slice(), &[0, 2, 1, 3]);
            assert_eq!(r.anchor(), 0);
        }
        let r = SuffixRanker::doubling(b"abcabcabc").unwrap();
        assert_eq!(r.as_slice(), &[0, 3, 6, 1, 4, 7, 2, 5, 8]);
    }

    #[test]
    fn two_symbols() {
        let r = SuffixRanker::new(b"AB").unwrap();
        assert_eq!(r.as_slice(), &[0, 1]);
        let r = SuffixRanker::new(b"BA").unwrap();
        assert_eq!(r.as_slice(), &[1, 0]);
        assert_eq!(r.anchor(), 1);
    }

    #[test]
    fn empty_block_rejected() {
        assert!(SuffixRanker::new(b"").is_err());
        assert!(SuffixRanker::doubling(b"").is_err());
    }

    #[test]
    fn rotation_start_bounds() {
        let r = SuffixRanker::new(b"banana").unwrap();
        assert_eq!(r.len(), 6);
        assert_eq!(r.rotation_start(0).unwrap(), 5);
        assert!(r.rotation_start(6).is_err());
    }

    #[test]
    fn doubling_matches_naive() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..200 {
            let len = rng.gen_range(1..300);
            let alphabet = rng.gen_range(1..=4u8);
            let block: Vec<u8> = (0..len).map(|_| b'a' + rng.gen_range(0..alphabet)).collect();
            let naive = SuffixRanker::naive(&block).unwrap();
            let doubling = SuffixRanker::doubling(&block).unwrap();
            assert_eq!(naive, doubling, "block {:?}", block);
            assert_sorted(&block, &doubling);
        }
    }

    #[test]
    fn text_is_sorted() {
        let input = include_bytes!("../../data/test.txt");
        assert_sorted(input, &SuffixRanker::new(input).unwrap());
    }
}
