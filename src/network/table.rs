use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::types::Item;

use super::edge::{Edge, EdgeId};
use super::policy::HashPolicy;

/// Edge key to edge mapping; owns every edge of a network.
///
/// Keys place edges into buckets and true pair equality confirms identity,
/// so two pairs whose keys collide still resolve to separate edges.
#[derive(Clone, Debug)]
pub struct EdgeTable<T> {
    policy: HashPolicy,
    edges: Vec<Edge<T>>,
    buckets: FxHashMap<u64, SmallVec<[EdgeId; 1]>>,
}

impl<T: Item> EdgeTable<T> {
    /// Creates an empty table for `policy`.
    pub fn new(policy: HashPolicy) -> Self {
        Self::with_capacity(policy, 0)
    }

    /// Creates an empty table with room for `capacity` edges.
    pub fn with_capacity(policy: HashPolicy, capacity: usize) -> Self {
        let mut buckets = FxHashMap::default();
        buckets.reserve(capacity);
        Self {
            policy,
            edges: Vec::with_capacity(capacity),
            buckets,
        }
    }

    /// Finds the edge for `(a, b)` given its precomputed `key`.
    pub fn find(&self, key: u64, a: &T, b: &T) -> Option<EdgeId> {
        self.buckets
            .get(&key)?
            .iter()
            .copied()
            .find(|id| self.edges[id.0].matches(a, b))
    }

    /// Looks up `(a, b)`, computing the key with the table's policy.
    pub fn lookup(&self, a: &T, b: &T) -> Option<&Edge<T>> {
        let key = self.policy.key(a, b);
        self.find(key, a, b).map(|id| &self.edges[id.0])
    }

    /// Appends an edge the caller has confirmed is absent.
    pub(crate) fn insert_new(&mut self, edge: Edge<T>) -> EdgeId {
        debug_assert!(self.find(edge.key(), edge.a(), edge.b()).is_none());
        let id = EdgeId(self.edges.len());
        let bucket = self.buckets.entry(edge.key()).or_default();
        if !bucket.is_empty() {
            tracing::debug!(key = edge.key(), "edge key collision resolved by equality");
        }
        bucket.push(id);
        self.edges.push(edge);
        id
    }

    /// Adds `by` to the count of an existing edge.
    pub(crate) fn increment(&mut self, id: EdgeId, by: u64) {
        self.edges[id.0].increment(by);
    }
}

impl<T> EdgeTable<T> {
    /// Policy used to compute keys.
    pub fn policy(&self) -> HashPolicy {
        self.policy
    }

    /// Returns the edge with the given id.
    pub fn get(&self, id: EdgeId) -> Option<&Edge<T>> {
        self.edges.get(id.0)
    }

    /// Number of edges.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns true if no edge exists.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// All edges in creation order.
    pub fn edges(&self) -> &[Edge<T>] {
        &self.edges
    }

    /// `(key, edge)` associations in creation order.
    pub fn entries(&self) -> impl Iterator<Item = (u64, &Edge<T>)> + '_ {
        self.edges.iter().map(|edge| (edge.key(), edge))
    }

    /// Number of keys shared by more than one edge.
    pub fn collisions(&self) -> usize {
        self.buckets.values().filter(|ids| ids.len() > 1).count()
    }
}
