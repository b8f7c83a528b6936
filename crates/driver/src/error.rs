//! Driver errors

use std::path::PathBuf;
use thiserror::Error;

/// Everything that can stop a benchmark run
#[derive(Debug, Error)]
pub enum DriverError {
    /// The kernel library could not be opened
    #[error("failed to load kernel library {}: {source}", .path.display())]
    LibraryLoad {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },

    /// A required symbol is missing from the kernel library
    #[error("kernel library is missing symbol `{symbol}`: {source}")]
    MissingSymbol {
        symbol: &'static str,
        #[source]
        source: libloading::Error,
    },

    /// The library location could not be resolved
    #[error("cannot locate kernel library: {0}")]
    LibraryNotFound(String),

    /// The input does not fit the boundary's `c_int` count
    #[error("input of {0} elements exceeds the kernel's length limit")]
    InvalidLength(usize),

    /// The input description is inconsistent
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The kernel returned null
    #[error("kernel call failed: {0}")]
    KernelFailure(String),

    /// The kernel returned text that is not UTF-8
    #[error("kernel returned invalid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    /// The config file could not be parsed
    #[error("invalid config {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
