#![deny(unsafe_op_in_unsafe_fn)]

/*!
Read-side of the benchmark results: raw replicate measurements are loaded from either a tree
of CSV files or the SQLite results store, and reduced to parallel arrays of
(size, mean, standard deviation) ready to be plotted.
*/

pub mod csv_source;
pub mod series;
pub mod statistics;
pub mod store;

use std::path::PathBuf;
use thiserror::Error;

/// Nanoseconds in a millisecond, timings are always plotted in milliseconds.
pub const NANOS_PER_MILLI: f64 = 1_000_000.0;

/// Bytes in a (decimal) megabyte.
pub const BYTES_PER_MEGABYTE: f64 = 1_000_000.0;

#[derive(Error, Debug)]
pub enum ResultsError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Results store error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("{0} contains no records")]
    EmptyFile(PathBuf),

    #[error("{path}:{line}: invalid size literal {literal:?}")]
    InvalidSize {
        path: PathBuf,
        line: u64,
        literal: String,
    },

    #[error("{path}:{line}: invalid sample {literal:?}")]
    InvalidSample {
        path: PathBuf,
        line: u64,
        literal: String,
    },

    #[error("Benchmark {id} has invalid size {size} in the results store")]
    InvalidStoredSize { id: i64, size: i64 },

    #[error("No completed benchmark group in the results store")]
    NoCompletedGroup,

    #[error("Unknown benchmark: {0}")]
    UnknownBenchmark(String),
}

pub type Result<T> = core::result::Result<T, ResultsError>;
