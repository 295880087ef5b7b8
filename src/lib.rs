//! Counting multigraph over identity-comparable items.
//!
//! Submit item pairs to a [`Network`]; each distinct pair becomes one
//! [`Edge`] whose count records how often the pair was seen.
//!
//! ```
//! use itemnet::Network;
//!
//! let mut net = Network::new();
//! net.add_link("a", "b").unwrap();
//! net.add_multiple_links([("b", "a"), ("b", "c")]).unwrap();
//! let lines: Vec<String> = net.iter().map(|edge| edge.to_string()).collect();
//! assert_eq!(lines, ["a b 2", "b c 1"]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod logging;
pub mod network;
pub mod types;

pub use network::{
    DegeneracyCheck, Edge, EdgeId, HashPolicy, LinkOutcome, LinkTally, Network, NetworkOptions,
    SharedNetwork,
};
pub use types::{Item, NetworkError, Result};
