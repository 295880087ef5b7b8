//! Edge identity and counting engine.
//!
//! A [`Network`] keeps one [`Edge`] per distinct item pair together with the
//! number of times that pair was submitted, and an index from each item to
//! its incident edges.

mod batch;
mod edge;
mod graph;
mod index;
mod metrics;
mod options;
mod policy;
mod shared;
mod table;

/// Bulk pre-aggregation.
pub use batch::{BatchIngest, PairCount};

/// Edge records.
pub use edge::{Edge, EdgeId};

/// The network facade.
pub use graph::{BatchSummary, LinkOutcome, Network};

/// Item index and tallies.
pub use index::{IncidentEdges, ItemIndex, LinkTally};

/// Metrics.
pub use metrics::{default_metrics, CounterMetrics, NetworkMetrics, NoopMetrics};

/// Construction options.
pub use options::{NetworkOptions, NetworkSection};

/// Key and degeneracy policies.
pub use policy::{item_hash, DegeneracyCheck, HashPolicy};

/// Concurrent handle.
pub use shared::SharedNetwork;

/// Edge table.
pub use table::EdgeTable;
