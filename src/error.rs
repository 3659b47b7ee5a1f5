use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors from the CSV and chart paths.
///
/// A missing or malformed series file must abort a render with a real
/// message rather than produce a silently empty chart, so everything that
/// touches the filesystem stays in `Result`.
#[derive(Debug, Error)]
pub enum Error {
    #[error("i/o: {0}")]
    Io(#[from] io::Error),

    #[error("csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("{}: missing header row with at least two columns", .path.display())]
    BadHeader { path: PathBuf },

    #[error("{}: no data rows", .path.display())]
    EmptySeries { path: PathBuf },

    #[error("chart: {0}")]
    Chart(String),
}
