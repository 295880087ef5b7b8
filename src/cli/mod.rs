#![forbid(unsafe_code)]

//! Building blocks for the `itemnet` command-line tool.
//!
//! Loads item pairs from CSV into a [`crate::Network`] and shapes query
//! results into serializable reports.

/// CSV pair import.
pub mod import;

/// Serializable query reports.
pub mod report;

pub use import::{import_pairs, load_network, CliError, ImportSummary, PairImportConfig};
pub use report::{ItemRecord, LinkRecord, StatsReport};
