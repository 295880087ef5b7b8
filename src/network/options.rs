use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::metrics::{default_metrics, NetworkMetrics};
use super::policy::{DegeneracyCheck, HashPolicy};

/// Configuration supplied when constructing a [`super::Network`].
///
/// Options are fixed for the lifetime of the network.
#[derive(Clone)]
pub struct NetworkOptions {
    /// Whether `(a, b)` and `(b, a)` are distinct edges.
    pub keep_order: bool,
    /// Whether degenerate pairs are dropped silently instead of rejected.
    pub ignore_key_equality_error: bool,
    /// Predicate deciding which pairs are degenerate.
    pub degeneracy: DegeneracyCheck,
    /// Expected number of edges, used to presize tables.
    pub capacity: usize,
    /// Metrics sink for insert activity.
    pub metrics: Arc<dyn NetworkMetrics>,
}

impl NetworkOptions {
    /// Creates options with default settings.
    pub fn new() -> Self {
        Self {
            keep_order: false,
            ignore_key_equality_error: false,
            degeneracy: DegeneracyCheck::default(),
            capacity: 0,
            metrics: default_metrics(),
        }
    }

    /// Selects order-sensitive (`true`) or order-insensitive keys.
    pub fn keep_order(mut self, keep_order: bool) -> Self {
        self.keep_order = keep_order;
        self
    }

    /// Drops degenerate pairs silently when enabled.
    pub fn ignore_key_equality_error(mut self, ignore: bool) -> Self {
        self.ignore_key_equality_error = ignore;
        self
    }

    /// Sets the degeneracy predicate.
    pub fn degeneracy(mut self, check: DegeneracyCheck) -> Self {
        self.degeneracy = check;
        self
    }

    /// Presizes the edge table.
    pub fn capacity(mut self, edges: usize) -> Self {
        self.capacity = edges;
        self
    }

    /// Sets the metrics implementation.
    pub fn metrics(mut self, metrics: Arc<dyn NetworkMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Hash policy implied by `keep_order`.
    pub fn hash_policy(&self) -> HashPolicy {
        HashPolicy::from_keep_order(self.keep_order)
    }
}

impl Default for NetworkOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for NetworkOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NetworkOptions")
            .field("keep_order", &self.keep_order)
            .field("ignore_key_equality_error", &self.ignore_key_equality_error)
            .field("degeneracy", &self.degeneracy)
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

/// Serializable subset of [`NetworkOptions`], as stored in config files.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct NetworkSection {
    /// See [`NetworkOptions::keep_order`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keep_order: Option<bool>,
    /// See [`NetworkOptions::ignore_key_equality_error`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_key_equality_error: Option<bool>,
    /// See [`NetworkOptions::degeneracy`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degeneracy: Option<DegeneracyCheck>,
}

impl NetworkSection {
    /// Applies the values present in this section on top of `opts`.
    pub fn apply(&self, mut opts: NetworkOptions) -> NetworkOptions {
        if let Some(keep_order) = self.keep_order {
            opts.keep_order = keep_order;
        }
        if let Some(ignore) = self.ignore_key_equality_error {
            opts.ignore_key_equality_error = ignore;
        }
        if let Some(check) = self.degeneracy {
            opts.degeneracy = check;
        }
        opts
    }

    /// Overlays `other` on `self`; values in `other` win.
    pub fn merge(self, other: NetworkSection) -> NetworkSection {
        NetworkSection {
            keep_order: other.keep_order.or(self.keep_order),
            ignore_key_equality_error: other
                .ignore_key_equality_error
                .or(self.ignore_key_equality_error),
            degeneracy: other.degeneracy.or(self.degeneracy),
        }
    }
}
