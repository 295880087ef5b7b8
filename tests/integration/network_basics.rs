#![allow(missing_docs)]

use std::sync::atomic::Ordering;
use std::sync::Arc;

use itemnet::network::CounterMetrics;
use itemnet::{DegeneracyCheck, HashPolicy, LinkOutcome, Network, NetworkError, NetworkOptions};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Word(&'static str);

#[test]
fn symmetric_network_merges_reversed_pairs() {
    let mut net = Network::new();
    net.add_link(Word("x"), Word("y")).expect("first insert");
    net.add_link(Word("y"), Word("x")).expect("reversed insert");

    assert_eq!(net.len(), 1);
    let edge = net.get_link(&Word("y"), &Word("x")).expect("edge");
    assert_eq!(edge.count(), 2);
    assert_eq!(edge.a(), &Word("x"));
    assert_eq!(edge.b(), &Word("y"));
}

#[test]
fn ordered_network_keeps_direction() {
    let mut net = Network::with_options(NetworkOptions::new().keep_order(true));
    net.add_link("x", "y").expect("insert");
    net.add_link("y", "x").expect("insert");
    net.add_link("x", "y").expect("insert");

    assert_eq!(net.policy(), HashPolicy::Ordered);
    let lines: Vec<String> = net.iter().map(ToString::to_string).collect();
    assert_eq!(lines, ["x y 2", "y x 1"]);
    assert_eq!(net.get_link(&"y", &"x").map(|e| e.count()), Some(1));
}

#[test]
fn degenerate_pair_is_rejected_without_side_effects() {
    let mut net = Network::new();
    net.add_link("a", "b").expect("insert");
    let err = net.add_link("c", "c").unwrap_err();
    assert!(matches!(err, NetworkError::DegenerateEdge { .. }));
    assert_eq!(net.len(), 1);
    assert_eq!(net.item_count(), 2);
    assert!(net.get_links_containing(&"c").is_empty());
}

#[test]
fn degenerate_pair_is_dropped_when_ignored() {
    let metrics = Arc::new(CounterMetrics::default());
    let mut net = Network::with_options(
        NetworkOptions::new()
            .ignore_key_equality_error(true)
            .metrics(metrics.clone()),
    );
    assert_eq!(net.add_link("c", "c").unwrap(), LinkOutcome::Dropped);
    assert!(net.is_empty());
    assert_eq!(metrics.degenerate_rejected.load(Ordering::Relaxed), 1);
}

#[test]
fn never_check_admits_self_pairs() {
    let mut net = Network::with_options(NetworkOptions::new().degeneracy(DegeneracyCheck::Never));
    net.add_link("loop", "loop").expect("self pair");
    net.add_link("loop", "loop").expect("self pair");
    let tally = net.item_link_count(&"loop").expect("tally");
    assert_eq!(tally.edges, 1);
    assert_eq!(tally.weight, 2);
}

#[test]
fn hub_queries_and_tallies() {
    let mut net = Network::new();
    for (a, b) in [("hub", "a"), ("hub", "b"), ("b", "hub"), ("a", "c")] {
        net.add_link(a, b).expect("insert");
    }

    let incident: Vec<String> = net
        .get_links_containing(&"hub")
        .into_iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(incident, ["hub a 1", "hub b 2"]);

    let dict: Vec<(&str, usize, u64)> = net
        .get_item_link_count_dict()
        .into_iter()
        .map(|(item, tally)| (*item, tally.edges, tally.weight))
        .collect();
    assert_eq!(
        dict,
        [("hub", 2, 3), ("a", 2, 2), ("b", 1, 2), ("c", 1, 1)]
    );
    assert_eq!(net.total_weight(), 4);
    assert!(net.get_link(&"b", &"c").is_none());
}

#[test]
fn write_links_matches_display() {
    let mut net = Network::new();
    net.add_link_count("p", "q", 5).expect("insert");
    net.add_link("q", "r").expect("insert");
    let mut out = Vec::new();
    net.write_links(&mut out).expect("write");
    assert_eq!(String::from_utf8(out).expect("utf8"), "p q 5\nq r 1\n");
}

#[test]
fn links_by_hash_scan_every_edge() {
    let mut net = Network::new();
    net.add_link("a", "b").expect("insert");
    net.add_link("c", "d").expect("insert");
    let hash = itemnet::network::item_hash(&"d");
    let found: Vec<String> = net
        .get_links_with_hash(hash)
        .into_iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(found, ["c d 1"]);
}
