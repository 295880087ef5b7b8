use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;

use crate::types::{Item, NetworkError, Result};

use super::policy::{item_hash, DegeneracyCheck, HashPolicy};

/// Position of an edge inside its network, in creation order.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct EdgeId(pub usize);

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A pair of items and the number of times the pair was submitted.
///
/// Endpoints and key are fixed at creation; only the count changes.
#[derive(Clone, Debug)]
pub struct Edge<T> {
    a: T,
    b: T,
    key: u64,
    count: u64,
    policy: HashPolicy,
}

impl<T: Item> Edge<T> {
    /// Builds an edge, rejecting degenerate pairs and zero counts.
    pub fn try_new(
        a: T,
        b: T,
        count: u64,
        policy: HashPolicy,
        check: DegeneracyCheck,
    ) -> Result<Self> {
        if count == 0 {
            return Err(NetworkError::Invalid("edge count must be at least 1"));
        }
        if check.is_degenerate(&a, &b) {
            return Err(NetworkError::degenerate(&a, &b));
        }
        let key = policy.key(&a, &b);
        Ok(Self {
            a,
            b,
            key,
            count,
            policy,
        })
    }

    /// Returns true if `item` equals either endpoint.
    pub fn contains(&self, item: &T) -> bool {
        self.a == *item || self.b == *item
    }

    /// Returns true if either endpoint hashes to `hash` (see [`item_hash`]).
    pub fn contains_hash(&self, hash: u64) -> bool {
        item_hash(&self.a) == hash || item_hash(&self.b) == hash
    }

    /// Returns true if this edge represents the pair `(a, b)`.
    pub fn matches(&self, a: &T, b: &T) -> bool {
        self.policy.same_pair((&self.a, &self.b), (a, b))
    }
}

impl<T> Edge<T> {
    /// First endpoint as submitted on creation.
    pub fn a(&self) -> &T {
        &self.a
    }

    /// Second endpoint as submitted on creation.
    pub fn b(&self) -> &T {
        &self.b
    }

    /// Both endpoints in creation order.
    pub fn endpoints(&self) -> (&T, &T) {
        (&self.a, &self.b)
    }

    /// Positional endpoint access; only `0` and `1` are valid.
    pub fn endpoint(&self, index: usize) -> Result<&T> {
        match index {
            0 => Ok(&self.a),
            1 => Ok(&self.b),
            other => Err(NetworkError::OutOfRange(other)),
        }
    }

    /// Edge key computed by the network's [`HashPolicy`].
    pub fn key(&self) -> u64 {
        self.key
    }

    /// Accumulated occurrence count; always at least 1.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Policy the edge was created under.
    pub fn policy(&self) -> HashPolicy {
        self.policy
    }

    /// Orders edges by count alone.
    pub fn cmp_count(&self, other: &Self) -> Ordering {
        self.count.cmp(&other.count)
    }

    /// Adds `by` to the count, saturating at `u64::MAX`.
    pub(crate) fn increment(&mut self, by: u64) {
        self.count = self.count.saturating_add(by);
    }
}

impl<T: Eq> PartialEq for Edge<T> {
    fn eq(&self, other: &Self) -> bool {
        self.count == other.count
            && self.policy == other.policy
            && self
                .policy
                .same_pair((&self.a, &self.b), (&other.a, &other.b))
    }
}

impl<T: Eq> Eq for Edge<T> {}

impl<T: fmt::Display> fmt::Display for Edge<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.a, self.b, self.count)
    }
}

/// Hashes an edge by its key, consistent with [`PartialEq`].
impl<T: Eq> Hash for Edge<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        state.write_u64(self.key);
    }
}
