use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::types::Item;

use super::policy::HashPolicy;

/// One distinct pair collected by [`BatchIngest`] with its aggregate count.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PairCount<T> {
    /// First item, oriented as in the pair's first occurrence.
    pub a: T,
    /// Second item, oriented as in the pair's first occurrence.
    pub b: T,
    /// Number of occurrences in the batch.
    pub count: u64,
}

/// Pre-aggregation of bulk pairs into per-pair counts.
///
/// Pairs are canonicalised with the same [`HashPolicy`] the target network
/// uses. Distinct pairs drain in first-occurrence order, which is the order
/// a sequential ingest would create their edges in.
#[derive(Clone, Debug)]
pub struct BatchIngest<T> {
    policy: HashPolicy,
    pairs: Vec<PairCount<T>>,
    buckets: FxHashMap<u64, SmallVec<[usize; 1]>>,
    submitted: u64,
}

impl<T: Item> BatchIngest<T> {
    /// Creates an empty batch for `policy`.
    pub fn new(policy: HashPolicy) -> Self {
        Self {
            policy,
            pairs: Vec::new(),
            buckets: FxHashMap::default(),
            submitted: 0,
        }
    }

    /// Counts one occurrence of `(a, b)`.
    pub fn push(&mut self, a: T, b: T) {
        self.submitted += 1;
        let key = self.policy.key(&a, &b);
        let bucket = self.buckets.entry(key).or_default();
        let policy = self.policy;
        let pairs = &mut self.pairs;
        let existing = bucket
            .iter()
            .copied()
            .find(|&slot| policy.same_pair((&pairs[slot].a, &pairs[slot].b), (&a, &b)));
        match existing {
            Some(slot) => pairs[slot].count += 1,
            None => {
                bucket.push(pairs.len());
                pairs.push(PairCount { a, b, count: 1 });
            }
        }
    }

    /// Number of pairs pushed.
    pub fn submitted(&self) -> u64 {
        self.submitted
    }

    /// Number of distinct pairs.
    pub fn distinct(&self) -> usize {
        self.pairs.len()
    }

    /// Returns true if nothing has been pushed.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Policy used for canonicalisation.
    pub fn policy(&self) -> HashPolicy {
        self.policy
    }

    /// Consumes the batch, yielding distinct pairs in first-occurrence order.
    pub fn into_pairs(self) -> std::vec::IntoIter<PairCount<T>> {
        self.pairs.into_iter()
    }
}

impl<T: Item> Extend<(T, T)> for BatchIngest<T> {
    fn extend<I: IntoIterator<Item = (T, T)>>(&mut self, iter: I) {
        for (a, b) in iter {
            self.push(a, b);
        }
    }
}
