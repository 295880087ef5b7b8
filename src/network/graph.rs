use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

use tracing::{debug, trace};

use crate::types::{Item, NetworkError, Result};

use super::batch::BatchIngest;
use super::edge::{Edge, EdgeId};
use super::index::{ItemIndex, LinkTally};
use super::metrics::NetworkMetrics;
use super::options::NetworkOptions;
use super::policy::{DegeneracyCheck, HashPolicy};
use super::table::EdgeTable;

/// What a single insert did to the network.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LinkOutcome {
    /// A new edge was created.
    Created(EdgeId),
    /// An existing edge's count was increased.
    Incremented(EdgeId),
    /// The pair was degenerate and silently dropped.
    Dropped,
}

impl LinkOutcome {
    /// Edge touched by the insert, if any.
    pub fn edge_id(self) -> Option<EdgeId> {
        match self {
            LinkOutcome::Created(id) | LinkOutcome::Incremented(id) => Some(id),
            LinkOutcome::Dropped => None,
        }
    }
}

/// Summary of a bulk ingest.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct BatchSummary {
    /// Pairs accepted into aggregation.
    pub submitted: u64,
    /// Distinct pairs among the accepted ones.
    pub distinct: usize,
    /// Edges created by the ingest.
    pub created: usize,
    /// Degenerate pairs dropped.
    pub dropped: u64,
}

/// Aggregate multigraph of item pairs with per-pair occurrence counts.
///
/// The edge table and the item index only change through
/// [`Network::add_link`] and [`Network::add_multiple_links`]; an insert
/// either creates an edge and indexes both endpoints, or changes nothing.
#[derive(Clone)]
pub struct Network<T> {
    policy: HashPolicy,
    degeneracy: DegeneracyCheck,
    ignore_degenerate: bool,
    table: EdgeTable<T>,
    index: ItemIndex<T>,
    metrics: Arc<dyn NetworkMetrics>,
}

impl<T: Item> Default for Network<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Item> Network<T> {
    /// Creates an order-insensitive network that rejects degenerate pairs.
    pub fn new() -> Self {
        Self::with_options(NetworkOptions::default())
    }

    /// Creates a network from explicit options.
    pub fn with_options(opts: NetworkOptions) -> Self {
        let policy = opts.hash_policy();
        Self {
            policy,
            degeneracy: opts.degeneracy,
            ignore_degenerate: opts.ignore_key_equality_error,
            table: EdgeTable::with_capacity(policy, opts.capacity),
            index: ItemIndex::new(),
            metrics: opts.metrics,
        }
    }

    /// Records one occurrence of `(a, b)`.
    pub fn add_link(&mut self, a: T, b: T) -> Result<LinkOutcome> {
        self.add_link_count(a, b, 1)
    }

    /// Records `count` occurrences of `(a, b)`.
    ///
    /// An existing edge is incremented without consulting the degeneracy
    /// predicate. A new pair is checked first; a degenerate pair fails with
    /// [`NetworkError::DegenerateEdge`] or is dropped, per configuration.
    pub fn add_link_count(&mut self, a: T, b: T, count: u64) -> Result<LinkOutcome> {
        if count == 0 {
            return Err(NetworkError::Invalid("link count must be at least 1"));
        }
        let key = self.policy.key(&a, &b);
        if let Some(id) = self.table.find(key, &a, &b) {
            self.table.increment(id, count);
            self.metrics.edge_incremented(count);
            return Ok(LinkOutcome::Incremented(id));
        }
        let edge = match Edge::try_new(a, b, count, self.policy, self.degeneracy) {
            Ok(edge) => edge,
            Err(err @ NetworkError::DegenerateEdge { .. }) => {
                self.metrics.degenerate_rejected();
                if self.ignore_degenerate {
                    debug!(%err, "dropping degenerate pair");
                    return Ok(LinkOutcome::Dropped);
                }
                return Err(err);
            }
            Err(err) => return Err(err),
        };
        let id = EdgeId(self.table.len());
        self.index.attach_edge(id, &edge);
        let inserted = self.table.insert_new(edge);
        debug_assert_eq!(id, inserted);
        self.metrics.edge_created();
        trace!(edge = %id, key, count, "edge created");
        Ok(LinkOutcome::Created(id))
    }

    /// Records every pair in `pairs`, aggregating duplicates first.
    ///
    /// The final state equals calling [`Network::add_link`] once per pair in
    /// order. With degenerate pairs raising, pairs before the first
    /// degenerate one are applied and the error is returned.
    pub fn add_multiple_links<I>(&mut self, pairs: I) -> Result<BatchSummary>
    where
        I: IntoIterator<Item = (T, T)>,
    {
        let mut batch = BatchIngest::new(self.policy);
        let mut dropped = 0u64;
        let mut failure = None;
        for (a, b) in pairs {
            if self.degeneracy.is_degenerate(&a, &b) {
                self.metrics.degenerate_rejected();
                if self.ignore_degenerate {
                    dropped += 1;
                    continue;
                }
                failure = Some(NetworkError::degenerate(&a, &b));
                break;
            }
            batch.push(a, b);
        }

        let mut summary = BatchSummary {
            submitted: batch.submitted(),
            distinct: batch.distinct(),
            created: 0,
            dropped,
        };
        for pair in batch.into_pairs() {
            if let LinkOutcome::Created(_) = self.add_link_count(pair.a, pair.b, pair.count)? {
                summary.created += 1;
            }
        }
        self.metrics
            .batch_ingested(summary.submitted, summary.distinct as u64);
        debug!(
            submitted = summary.submitted,
            distinct = summary.distinct,
            created = summary.created,
            dropped = summary.dropped,
            "batch ingested"
        );
        match failure {
            Some(err) => Err(err),
            None => Ok(summary),
        }
    }

    /// Returns the edge for `(a, b)`, or `None`.
    pub fn get_link(&self, a: &T, b: &T) -> Option<&Edge<T>> {
        self.table.lookup(a, b)
    }

    /// Edges incident to `item`, in creation order.
    pub fn get_links_containing(&self, item: &T) -> Vec<&Edge<T>> {
        self.index
            .incident(item)
            .iter()
            .map(|id| &self.table.edges()[id.0])
            .collect()
    }

    /// Edges with an endpoint hashing to `hash`; scans every edge.
    pub fn get_links_with_hash(&self, hash: u64) -> Vec<&Edge<T>> {
        self.table
            .edges()
            .iter()
            .filter(|edge| edge.contains_hash(hash))
            .collect()
    }

    /// `(edge_count, total_weight)` for every item, in first-seen order.
    ///
    /// Use [`Network::item_link_count`] to look up a single item.
    pub fn get_item_link_count_dict(&self) -> Vec<(&T, LinkTally)> {
        let edges = self.table.edges();
        self.index
            .iter()
            .map(|(item, ids)| (item, ItemIndex::tally(ids, edges)))
            .collect()
    }

    /// Tally for a single item, or `None` if it has no edges.
    pub fn item_link_count(&self, item: &T) -> Option<LinkTally> {
        if !self.index.contains(item) {
            return None;
        }
        Some(ItemIndex::tally(
            self.index.incident(item),
            self.table.edges(),
        ))
    }
}

impl<T> Network<T> {
    /// Edges in creation order.
    pub fn list_links(&self) -> Vec<&Edge<T>> {
        self.table.edges().iter().collect()
    }

    /// `(key, edge)` associations in creation order.
    ///
    /// Keys repeat only when distinct pairs collide.
    pub fn link_items(&self) -> Vec<(u64, &Edge<T>)> {
        self.table.entries().collect()
    }

    /// Edge with the given id.
    pub fn edge(&self, id: EdgeId) -> Option<&Edge<T>> {
        self.table.get(id)
    }

    /// Iterates edges in creation order.
    pub fn iter(&self) -> std::slice::Iter<'_, Edge<T>> {
        self.table.edges().iter()
    }

    /// Items that are an endpoint of at least one edge, in first-seen order.
    pub fn items(&self) -> impl Iterator<Item = &T> + '_ {
        self.index.iter().map(|(item, _)| item)
    }

    /// Number of edges.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns true if no edge exists.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Number of distinct items.
    pub fn item_count(&self) -> usize {
        self.index.len()
    }

    /// Sum of all edge counts.
    pub fn total_weight(&self) -> u64 {
        self.iter()
            .map(Edge::count)
            .fold(0u64, u64::saturating_add)
    }

    /// Number of edge keys shared by distinct pairs.
    pub fn key_collisions(&self) -> usize {
        self.table.collisions()
    }

    /// Key policy in use.
    pub fn policy(&self) -> HashPolicy {
        self.policy
    }

    /// Degeneracy predicate in use.
    pub fn degeneracy(&self) -> DegeneracyCheck {
        self.degeneracy
    }

    /// Whether degenerate pairs are dropped silently.
    pub fn ignores_degenerate(&self) -> bool {
        self.ignore_degenerate
    }
}

impl<T: fmt::Display> Network<T> {
    /// Writes one `a b count` line per edge, in creation order.
    pub fn write_links<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for edge in self.table.edges() {
            writeln!(out, "{edge}")?;
        }
        Ok(())
    }

    /// Prints one `a b count` line per edge to standard output.
    pub fn print_links(&self) {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        if let Err(err) = self.write_links(&mut out).and_then(|_| out.flush()) {
            debug!(%err, "print_links: stdout write failed");
        }
    }
}

impl<'a, T> IntoIterator for &'a Network<T> {
    type Item = &'a Edge<T>;
    type IntoIter = std::slice::Iter<'a, Edge<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for Network<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Network")
            .field("policy", &self.policy)
            .field("degeneracy", &self.degeneracy)
            .field("ignore_degenerate", &self.ignore_degenerate)
            .field("edges", &self.table.edges())
            .finish_non_exhaustive()
    }
}
