use std::sync::Arc;

use parking_lot::RwLock;

use crate::types::{Item, Result};

use super::edge::Edge;
use super::graph::{BatchSummary, LinkOutcome, Network};
use super::index::LinkTally;
use super::options::NetworkOptions;

/// Thread-safe handle to a [`Network`].
///
/// Each insert runs under the write lock as one unit, so two threads adding
/// the same new pair cannot both create an edge. Readers share the read lock.
pub struct SharedNetwork<T> {
    inner: Arc<RwLock<Network<T>>>,
}

impl<T> Clone for SharedNetwork<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Item> SharedNetwork<T> {
    /// Wraps a new network built from `opts`.
    pub fn new(opts: NetworkOptions) -> Self {
        Self::from_network(Network::with_options(opts))
    }

    /// Wraps an existing network.
    pub fn from_network(network: Network<T>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(network)),
        }
    }

    /// See [`Network::add_link`].
    pub fn add_link(&self, a: T, b: T) -> Result<LinkOutcome> {
        self.inner.write().add_link(a, b)
    }

    /// See [`Network::add_link_count`].
    pub fn add_link_count(&self, a: T, b: T, count: u64) -> Result<LinkOutcome> {
        self.inner.write().add_link_count(a, b, count)
    }

    /// See [`Network::add_multiple_links`]; the whole batch holds the write lock.
    pub fn add_multiple_links<I>(&self, pairs: I) -> Result<BatchSummary>
    where
        I: IntoIterator<Item = (T, T)>,
    {
        self.inner.write().add_multiple_links(pairs)
    }

    /// Copy of the edge for `(a, b)`, if present.
    pub fn get_link(&self, a: &T, b: &T) -> Option<Edge<T>> {
        self.inner.read().get_link(a, b).cloned()
    }

    /// Copy of every edge, in creation order.
    pub fn list_links(&self) -> Vec<Edge<T>> {
        self.inner.read().iter().cloned().collect()
    }

    /// Owned per-item tallies, in first-seen order.
    pub fn item_link_counts(&self) -> Vec<(T, LinkTally)> {
        self.inner
            .read()
            .get_item_link_count_dict()
            .into_iter()
            .map(|(item, tally)| (item.clone(), tally))
            .collect()
    }

    /// Runs `f` against the network under the read lock.
    pub fn read<R>(&self, f: impl FnOnce(&Network<T>) -> R) -> R {
        f(&self.inner.read())
    }

    /// Independent copy of the current network.
    pub fn snapshot(&self) -> Network<T> {
        self.inner.read().clone()
    }
}
