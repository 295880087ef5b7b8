use serde::Serialize;

use crate::network::{Edge, HashPolicy, Network};

/// One edge as reported by the CLI.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LinkRecord {
    /// First endpoint.
    pub a: String,
    /// Second endpoint.
    pub b: String,
    /// Occurrence count.
    pub count: u64,
    /// Edge key under the network's hash policy.
    pub key: u64,
}

impl From<&Edge<String>> for LinkRecord {
    fn from(edge: &Edge<String>) -> Self {
        Self {
            a: edge.a().clone(),
            b: edge.b().clone(),
            count: edge.count(),
            key: edge.key(),
        }
    }
}

/// Per-item tally as reported by the CLI.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ItemRecord {
    /// The item.
    pub item: String,
    /// Distinct incident edges.
    pub edges: usize,
    /// Sum of incident edge counts.
    pub weight: u64,
}

/// Aggregate statistics for a loaded network.
#[derive(Debug, Clone, Serialize)]
pub struct StatsReport {
    /// Key policy in use.
    pub policy: HashPolicy,
    /// Distinct items.
    pub items: usize,
    /// Distinct edges.
    pub edges: usize,
    /// Sum of all edge counts.
    pub total_weight: u64,
    /// Edge keys shared by distinct pairs.
    pub key_collisions: usize,
    /// Per-item tallies in first-seen order.
    pub per_item: Vec<ItemRecord>,
}

impl StatsReport {
    /// Collects statistics from `network`.
    pub fn collect(network: &Network<String>) -> Self {
        let per_item = network
            .get_item_link_count_dict()
            .into_iter()
            .map(|(item, tally)| ItemRecord {
                item: item.clone(),
                edges: tally.edges,
                weight: tally.weight,
            })
            .collect();
        Self {
            policy: network.policy(),
            items: network.item_count(),
            edges: network.len(),
            total_weight: network.total_weight(),
            key_collisions: network.key_collisions(),
            per_item,
        }
    }
}

/// Every edge of `network`, in creation order.
pub fn links(network: &Network<String>) -> Vec<LinkRecord> {
    network.iter().map(LinkRecord::from).collect()
}

/// Edges incident to `item`.
pub fn containing(network: &Network<String>, item: &str) -> Vec<LinkRecord> {
    network
        .get_links_containing(&item.to_string())
        .into_iter()
        .map(LinkRecord::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Network<String> {
        let mut net = Network::new();
        net.add_multiple_links(
            [("a", "b"), ("b", "a"), ("b", "c")]
                .map(|(a, b)| (a.to_string(), b.to_string())),
        )
        .unwrap();
        net
    }

    #[test]
    fn stats_report_totals() {
        let report = StatsReport::collect(&sample());
        assert_eq!(report.items, 3);
        assert_eq!(report.edges, 2);
        assert_eq!(report.total_weight, 3);
        assert_eq!(report.key_collisions, 0);
        assert_eq!(
            report.per_item[1],
            ItemRecord {
                item: "b".into(),
                edges: 2,
                weight: 3
            }
        );
    }

    #[test]
    fn containing_lists_incident_edges() {
        let records = containing(&sample(), "c");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].a, "b");
        assert_eq!(records[0].count, 1);
    }

    #[test]
    fn json_shape() {
        let json = serde_json::to_value(links(&sample())).unwrap();
        assert_eq!(json[0]["a"], "a");
        assert_eq!(json[0]["count"], 2);
        let stats = serde_json::to_value(StatsReport::collect(&sample())).unwrap();
        assert_eq!(stats["policy"], "symmetric");
    }
}
