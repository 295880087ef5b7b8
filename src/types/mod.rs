#![forbid(unsafe_code)]

//! Shared error and item types.

use std::fmt;
use std::hash::Hash;

/// Capabilities every network item must provide.
///
/// Items are compared only for equality and hashed; the network never
/// inspects their structure. `Debug` is used when reporting degenerate pairs.
pub trait Item: Eq + Hash + Clone + fmt::Debug {}

impl<T: Eq + Hash + Clone + fmt::Debug> Item for T {}

/// Errors produced by network operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    /// The pair was judged degenerate by the configured predicate.
    #[error("degenerate edge: {a} and {b} cannot form a link")]
    DegenerateEdge {
        /// Debug rendering of the first item.
        a: String,
        /// Debug rendering of the second item.
        b: String,
    },
    /// Positional endpoint access outside `0..=1`.
    #[error("endpoint index {0} out of range 0..=1")]
    OutOfRange(usize),
    /// Invalid argument supplied by the caller.
    #[error("invalid argument: {0}")]
    Invalid(&'static str),
}

impl NetworkError {
    pub(crate) fn degenerate<T: fmt::Debug>(a: &T, b: &T) -> Self {
        NetworkError::DegenerateEdge {
            a: format!("{a:?}"),
            b: format!("{b:?}"),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, NetworkError>;
