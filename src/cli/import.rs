use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use csv::{ReaderBuilder, StringRecord};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::network::{LinkOutcome, Network, NetworkOptions};
use crate::types::NetworkError;

const PAIR_BATCH_SIZE: usize = 4096;

/// Configuration for loading item pairs from a CSV file.
#[derive(Debug, Clone)]
pub struct PairImportConfig {
    /// Path to the CSV file.
    pub path: PathBuf,
    /// Column holding the first item (header name, or zero-based index
    /// when `has_headers` is false).
    pub a_column: String,
    /// Column holding the second item.
    pub b_column: String,
    /// Optional column holding a per-row occurrence count.
    pub count_column: Option<String>,
    /// Field delimiter.
    pub delimiter: u8,
    /// Whether the first row is a header row.
    pub has_headers: bool,
}

impl PairImportConfig {
    /// Defaults: comma separated, header row, columns `a` and `b`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            a_column: "a".into(),
            b_column: "b".into(),
            count_column: None,
            delimiter: b',',
            has_headers: true,
        }
    }
}

/// Summary statistics from an import.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportSummary {
    /// Data rows read.
    pub rows: u64,
    /// Occurrences submitted to the network (sum of row counts).
    pub occurrences: u64,
    /// Degenerate rows dropped.
    pub dropped: u64,
    /// Edges created.
    pub edges_created: u64,
}

/// Error type for CLI import and report operations.
#[derive(Error, Debug)]
pub enum CliError {
    /// Generic error message.
    #[error("{0}")]
    Message(String),
    /// IO error from file operations.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// CSV parsing error.
    #[error(transparent)]
    Csv(#[from] csv::Error),
    /// Network operation error.
    #[error(transparent)]
    Network(#[from] NetworkError),
}

impl From<&str> for CliError {
    fn from(value: &str) -> Self {
        CliError::Message(value.to_string())
    }
}

impl From<String> for CliError {
    fn from(value: String) -> Self {
        CliError::Message(value)
    }
}

/// Builds a network from `opts` and loads the pairs described by `cfg`.
pub fn load_network(
    cfg: &PairImportConfig,
    opts: NetworkOptions,
) -> Result<(Network<String>, ImportSummary), CliError> {
    let file = File::open(&cfg.path).map_err(|err| {
        CliError::Message(format!("failed to open {}: {err}", cfg.path.display()))
    })?;
    let mut network = Network::with_options(opts);
    let summary = import_pairs(file, cfg, &mut network)?;
    info!(
        path = %cfg.path.display(),
        rows = summary.rows,
        edges = network.len(),
        items = network.item_count(),
        "pairs imported"
    );
    Ok((network, summary))
}

/// Reads pairs from `source` into `network`.
///
/// Without a count column, rows are ingested in batches through
/// [`Network::add_multiple_links`]; with one, each row is added with its count.
pub fn import_pairs<R: Read>(
    source: R,
    cfg: &PairImportConfig,
    network: &mut Network<String>,
) -> Result<ImportSummary, CliError> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .delimiter(cfg.delimiter)
        .has_headers(cfg.has_headers)
        .from_reader(source);
    let headers = if cfg.has_headers {
        Some(reader.headers()?.clone())
    } else {
        None
    };
    let a_index = resolve_column(headers.as_ref(), &cfg.a_column)?;
    let b_index = resolve_column(headers.as_ref(), &cfg.b_column)?;
    let count_index = match &cfg.count_column {
        Some(name) => Some(resolve_column(headers.as_ref(), name)?),
        None => None,
    };

    let mut summary = ImportSummary::default();
    let mut batch: Vec<(String, String)> = Vec::with_capacity(PAIR_BATCH_SIZE);
    for result in reader.records() {
        let record = result?;
        summary.rows += 1;
        let a = get_required(&record, a_index, &cfg.a_column)?.to_string();
        let b = get_required(&record, b_index, &cfg.b_column)?.to_string();
        match count_index {
            Some(idx) => {
                let count = parse_count(&record, idx, summary.rows)?;
                summary.occurrences += count;
                match network.add_link_count(a, b, count)? {
                    LinkOutcome::Created(_) => summary.edges_created += 1,
                    LinkOutcome::Incremented(_) => {}
                    LinkOutcome::Dropped => summary.dropped += 1,
                }
            }
            None => {
                batch.push((a, b));
                if batch.len() >= PAIR_BATCH_SIZE {
                    flush_batch(network, &mut batch, &mut summary)?;
                }
            }
        }
    }
    flush_batch(network, &mut batch, &mut summary)?;
    Ok(summary)
}

fn flush_batch(
    network: &mut Network<String>,
    batch: &mut Vec<(String, String)>,
    summary: &mut ImportSummary,
) -> Result<(), CliError> {
    if batch.is_empty() {
        return Ok(());
    }
    let result = network.add_multiple_links(batch.drain(..))?;
    summary.occurrences += result.submitted;
    summary.dropped += result.dropped;
    summary.edges_created += result.created as u64;
    debug!(
        pairs = result.submitted,
        distinct = result.distinct,
        "flushed pair batch"
    );
    Ok(())
}

fn resolve_column(headers: Option<&StringRecord>, name: &str) -> Result<usize, CliError> {
    match headers {
        Some(headers) => headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
            .ok_or_else(|| CliError::Message(format!("column '{}' not found", name))),
        None => name.parse::<usize>().map_err(|_| {
            CliError::Message(format!(
                "column '{}' must be a zero-based index when the file has no header row",
                name
            ))
        }),
    }
}

fn get_required<'a>(record: &'a StringRecord, idx: usize, name: &str) -> Result<&'a str, CliError> {
    record
        .get(idx)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| CliError::Message(format!("missing value for column '{}'", name)))
}

fn parse_count(record: &StringRecord, idx: usize, row: u64) -> Result<u64, CliError> {
    let raw = record.get(idx).map(str::trim).unwrap_or("");
    match raw.parse::<u64>() {
        Ok(0) | Err(_) => Err(CliError::Message(format!(
            "row {row}: count '{raw}' must be a positive integer"
        ))),
        Ok(count) => Ok(count),
    }
}
