use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Trait for tracking insert activity on a network.
///
/// Implementations receive one call per accepted or rejected insert and one
/// call per bulk ingest. They must be cheap; they run inside the insert path.
pub trait NetworkMetrics: Send + Sync {
    /// Records the creation of a new edge.
    fn edge_created(&self);

    /// Records an increment of an existing edge by `by`.
    fn edge_incremented(&self, by: u64);

    /// Records an insert rejected or dropped as degenerate.
    fn degenerate_rejected(&self);

    /// Records a bulk ingest of `pairs` submissions folded into `distinct` pairs.
    fn batch_ingested(&self, pairs: u64, distinct: u64);
}

/// A no-op implementation of [`NetworkMetrics`].
#[derive(Default)]
pub struct NoopMetrics;

impl NetworkMetrics for NoopMetrics {
    fn edge_created(&self) {}
    fn edge_incremented(&self, _by: u64) {}
    fn degenerate_rejected(&self) {}
    fn batch_ingested(&self, _pairs: u64, _distinct: u64) {}
}

/// Atomic counter implementation of [`NetworkMetrics`].
#[derive(Default)]
pub struct CounterMetrics {
    /// Number of edges created.
    pub edges_created: AtomicU64,

    /// Number of increments applied to existing edges.
    pub edge_increments: AtomicU64,

    /// Total weight added through increments.
    pub weight_added: AtomicU64,

    /// Number of degenerate pairs rejected or dropped.
    pub degenerate_rejected: AtomicU64,

    /// Number of bulk ingests.
    pub batches: AtomicU64,

    /// Pairs submitted through bulk ingests.
    pub batch_pairs: AtomicU64,

    /// Distinct pairs produced by bulk ingests.
    pub batch_distinct: AtomicU64,
}

impl NetworkMetrics for CounterMetrics {
    fn edge_created(&self) {
        self.edges_created.fetch_add(1, Ordering::Relaxed);
    }

    fn edge_incremented(&self, by: u64) {
        self.edge_increments.fetch_add(1, Ordering::Relaxed);
        self.weight_added.fetch_add(by, Ordering::Relaxed);
    }

    fn degenerate_rejected(&self) {
        self.degenerate_rejected.fetch_add(1, Ordering::Relaxed);
    }

    fn batch_ingested(&self, pairs: u64, distinct: u64) {
        self.batches.fetch_add(1, Ordering::Relaxed);
        self.batch_pairs.fetch_add(pairs, Ordering::Relaxed);
        self.batch_distinct.fetch_add(distinct, Ordering::Relaxed);
    }
}

/// Returns the default metrics implementation, [`NoopMetrics`].
pub fn default_metrics() -> Arc<dyn NetworkMetrics> {
    Arc::new(NoopMetrics)
}
