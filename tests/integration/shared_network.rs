#![allow(missing_docs)]

use std::sync::{Arc, Barrier};
use std::thread;

use itemnet::{NetworkOptions, Result, SharedNetwork};

const NUM_THREADS: usize = 8;
const PAIRS_PER_THREAD: usize = 250;

#[test]
fn concurrent_inserts_create_each_edge_once() -> Result<()> {
    let shared = SharedNetwork::new(NetworkOptions::new());
    let barrier = Arc::new(Barrier::new(NUM_THREADS));
    let mut handles = vec![];

    for thread_id in 0..NUM_THREADS {
        let net = shared.clone();
        let barrier = Arc::clone(&barrier);
        handles.push(thread::spawn(move || -> Result<()> {
            barrier.wait();
            for i in 0..PAIRS_PER_THREAD {
                let a = format!("n{}", i % 10);
                let b = format!("m{}", (i + thread_id) % 5);
                if thread_id % 2 == 0 {
                    net.add_link(a, b)?;
                } else {
                    net.add_link(b, a)?;
                }
            }
            Ok(())
        }));
    }
    for handle in handles {
        handle.join().expect("worker panicked")?;
    }

    let links = shared.list_links();
    assert_eq!(links.len(), 50);
    let total: u64 = links.iter().map(|e| e.count()).sum();
    assert_eq!(total, (NUM_THREADS * PAIRS_PER_THREAD) as u64);
    shared.read(|net| {
        for (item, tally) in net.get_item_link_count_dict() {
            assert_eq!(tally.edges, net.get_links_containing(item).len());
        }
    });
    Ok(())
}

#[test]
fn concurrent_batches_sum_counts() -> Result<()> {
    let shared = SharedNetwork::new(NetworkOptions::new().ignore_key_equality_error(true));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let net = shared.clone();
            thread::spawn(move || {
                net.add_multiple_links(vec![("a", "b"), ("b", "a"), ("c", "c")])
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("worker panicked")?;
    }
    assert_eq!(shared.get_link(&"a", &"b").map(|e| e.count()), Some(8));
    assert!(shared.get_link(&"c", &"c").is_none());
    Ok(())
}

#[test]
fn snapshot_is_independent() -> Result<()> {
    let shared = SharedNetwork::new(NetworkOptions::new());
    shared.add_link_count("x", "y", 3)?;
    let snapshot = shared.snapshot();
    shared.add_link("x", "y")?;
    assert_eq!(snapshot.get_link(&"x", &"y").map(|e| e.count()), Some(3));
    assert_eq!(shared.get_link(&"y", &"x").map(|e| e.count()), Some(4));
    assert_eq!(shared.item_link_counts().len(), 2);
    Ok(())
}
