#![allow(missing_docs)]

use itemnet::{DegeneracyCheck, Network, NetworkError, NetworkOptions};

fn pairs(raw: &[(&'static str, &'static str)]) -> Vec<(&'static str, &'static str)> {
    raw.to_vec()
}

fn sequential(opts: NetworkOptions, input: &[(&'static str, &'static str)]) -> Network<&'static str> {
    let mut net = Network::with_options(opts);
    for (a, b) in input {
        let _ = net.add_link(*a, *b);
    }
    net
}

fn snapshot(net: &Network<&'static str>) -> Vec<String> {
    net.iter().map(ToString::to_string).collect()
}

#[test]
fn batch_matches_sequential_inserts() {
    let input = pairs(&[("a", "b"), ("b", "c"), ("b", "a"), ("c", "d"), ("c", "b"), ("a", "b")]);
    for keep_order in [false, true] {
        let opts = NetworkOptions::new().keep_order(keep_order);
        let mut batched = Network::with_options(opts.clone());
        let summary = batched.add_multiple_links(input.clone()).expect("batch");
        let seq = sequential(opts, &input);

        assert_eq!(snapshot(&batched), snapshot(&seq));
        assert_eq!(summary.submitted, input.len() as u64);
        assert_eq!(summary.created, seq.len());
    }
}

#[test]
fn batch_into_existing_network_increments() {
    let mut net = Network::new();
    net.add_link("a", "b").expect("insert");
    let summary = net
        .add_multiple_links(pairs(&[("b", "a"), ("a", "c")]))
        .expect("batch");
    assert_eq!(summary.created, 1);
    assert_eq!(snapshot(&net), ["a b 2", "a c 1"]);
}

#[test]
fn ignored_degenerates_are_counted() {
    let opts = NetworkOptions::new().ignore_key_equality_error(true);
    let mut net = Network::with_options(opts);
    let summary = net
        .add_multiple_links(pairs(&[("a", "a"), ("a", "b"), ("b", "b")]))
        .expect("batch");
    assert_eq!(summary.dropped, 2);
    assert_eq!(summary.submitted, 1);
    assert_eq!(snapshot(&net), ["a b 1"]);
}

#[test]
fn raising_batch_applies_prefix_then_fails() {
    let input = pairs(&[("a", "b"), ("b", "a"), ("x", "x"), ("c", "d")]);
    let mut net = Network::new();
    let err = net.add_multiple_links(input.clone()).unwrap_err();
    assert!(matches!(err, NetworkError::DegenerateEdge { .. }));

    let seq = sequential(NetworkOptions::new(), &input[..2]);
    assert_eq!(snapshot(&net), snapshot(&seq));
    assert!(net.get_link(&"c", &"d").is_none());
}

#[test]
fn hash_equality_check_matches_value_check_for_strings() {
    let input = pairs(&[("k", "k"), ("k", "l")]);
    let opts = NetworkOptions::new()
        .degeneracy(DegeneracyCheck::HashEquality)
        .ignore_key_equality_error(true);
    let mut net = Network::with_options(opts);
    let summary = net.add_multiple_links(input).expect("batch");
    assert_eq!(summary.dropped, 1);
    assert_eq!(snapshot(&net), ["k l 1"]);
}

#[test]
fn empty_batch_is_a_no_op() {
    let mut net: Network<&str> = Network::new();
    let summary = net.add_multiple_links(Vec::new()).expect("batch");
    assert_eq!(summary.submitted, 0);
    assert!(net.is_empty());
}
