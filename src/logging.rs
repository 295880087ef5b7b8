//! Tracing subscriber installation for binaries and tests.

use tracing_subscriber::{fmt, EnvFilter};

use crate::types::{NetworkError, Result};

/// Installs a global `fmt` subscriber filtered by `level`.
///
/// `level` accepts any `EnvFilter` directive, e.g. `warn` or `itemnet=debug`.
pub fn init_logging(level: &str) -> Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_new(level).map_err(|_| NetworkError::Invalid("invalid log level"))?,
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|_| NetworkError::Invalid("logging already initialized"))
}
