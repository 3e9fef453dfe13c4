//! Crate-wide error type.
//!
//! Covers the three failure classes of both tools: missing input (clean halt
//! with remediation), read/parse failures, and fatal I/O while writing.

use std::{io, path::PathBuf};

use plotters::prelude::DrawingAreaErrorKind;

pub type Result<T, E = PerfError> = std::result::Result<T, E>;

#[derive(thiserror::Error, Debug)]
pub enum PerfError {
    /// Input CSV is absent. Nothing has been read or written yet.
    #[error("{} not found", path.display())]
    MissingInput { path: PathBuf },

    #[error("error reading CSV {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{origin} contains no data rows")]
    EmptyRecord { origin: String },

    /// `line` is 1-based and counts the header.
    #[error("invalid row at line {line}: {reason}")]
    InvalidRow { line: u64, reason: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to render {chart}: {source}")]
    Render {
        chart: &'static str,
        #[source]
        source: DrawingAreaErrorKind<io::Error>,
    },

    #[error("{failed} of {total} charts could not be rendered")]
    ChartsFailed { failed: usize, total: usize },

    #[error("malformed system file at line {line}: {reason}")]
    MalformedSystem { line: usize, reason: String },
}

impl PerfError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        PerfError::Io { path: path.into(), source }
    }
}
