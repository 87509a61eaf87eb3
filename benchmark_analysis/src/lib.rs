#![deny(unsafe_op_in_unsafe_fn)]

pub mod chart;
pub mod figures;

use benchmark_results::ResultsError;
use chart::LineStyle;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlotError {
    #[error(transparent)]
    Results(#[from] ResultsError),

    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Implementation (actor system, process system...) that produced a series.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Variant {
    /// Key of the series in the results: CSV file suffix or `system` column.
    pub name: &'static str,
    /// Legend text.
    pub label: &'static str,
    pub style: LineStyle,
}

impl Variant {
    pub const fn new(name: &'static str, label: &'static str, style: LineStyle) -> Self {
        Variant { name, label, style }
    }

    /// Variant shown under its own name.
    pub const fn named(name: &'static str, style: LineStyle) -> Self {
        Variant {
            name,
            label: name,
            style,
        }
    }
}

impl AsRef<str> for Variant {
    fn as_ref(&self) -> &str {
        self.name
    }
}

/// A benchmark and the axis titles of its figures.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Benchmark {
    pub name: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
}

impl Benchmark {
    pub const fn new(name: &'static str, x_label: &'static str, y_label: &'static str) -> Self {
        Benchmark {
            name,
            x_label,
            y_label,
        }
    }
}

/// Logs at `info` unless `RUST_LOG` says otherwise.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}
