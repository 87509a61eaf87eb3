/*!
Flat-file results.

Each file holds one variant of one benchmark: a header-less CSV where every row is a problem
size followed by the raw timings, in nanoseconds, of every replicate run.

```text
1,5000000,5100000,4900000
"(10, 4)",9000000,9100000
```

The size column is either an integer or a tuple literal whose first element is the size.
*/

use crate::series::{AggregatedSeries, RawSeries};
use crate::{NANOS_PER_MILLI, ResultsError, Result};
use csv::ReaderBuilder;
use log::debug;
use std::fs::File;
use std::path::{Path, PathBuf};

/// `{root}{bench}_{variant}.csv`, `root` being a directory prefix ending with a separator.
pub fn series_path(root: &str, bench: &str, variant: &str) -> PathBuf {
    PathBuf::from(format!("{}{}_{}.csv", root, bench, variant))
}

fn parse_size(literal: &str) -> Option<u64> {
    let literal = literal.trim();
    let inner = literal
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .or_else(|| literal.strip_prefix('[').and_then(|s| s.strip_suffix(']')))
        .unwrap_or(literal);
    inner.split(',').next()?.trim().parse().ok()
}

/// Reads the raw timings of a results file, converted to milliseconds.
pub fn read_raw_series(path: impl AsRef<Path>) -> Result<RawSeries> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ResultsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b',')
        .quote(b'"')
        .flexible(true)
        .from_reader(file);

    let mut series = RawSeries::default();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        let Some(size_literal) = record.get(0) else {
            continue;
        };
        let size = parse_size(size_literal).ok_or_else(|| ResultsError::InvalidSize {
            path: path.to_path_buf(),
            line,
            literal: size_literal.to_owned(),
        })?;

        let samples = record
            .iter()
            .skip(1)
            .map(str::trim)
            .filter(|field| !field.is_empty())
            .map(|field| {
                field
                    .parse::<i64>()
                    .map(|nanos| nanos as f64 / NANOS_PER_MILLI)
                    .map_err(|_| ResultsError::InvalidSample {
                        path: path.to_path_buf(),
                        line,
                        literal: field.to_owned(),
                    })
            })
            .collect::<Result<Vec<f64>>>()?;
        series.push(size, samples);
    }

    if series.is_empty() {
        return Err(ResultsError::EmptyFile(path.to_path_buf()));
    }
    debug!("{}: {} sizes", path.display(), series.len());
    Ok(series)
}

/// Sizes, mean and standard deviation (milliseconds) and raw samples of a results file.
pub fn fetch_data(path: impl AsRef<Path>) -> Result<AggregatedSeries> {
    Ok(read_raw_series(path)?.into_points())
}

/// Loads `bench` for every variant, preserving the order of `variants`.
pub fn assemble_data<'a, V: AsRef<str>>(
    root: &str,
    bench: &str,
    variants: &'a [V],
) -> Result<Vec<(&'a V, AggregatedSeries)>> {
    variants
        .iter()
        .map(|variant| {
            let series = fetch_data(series_path(root, bench, variant.as_ref()))?;
            Ok((variant, series))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_literals() {
        assert_eq!(parse_size("12"), Some(12));
        assert_eq!(parse_size(" 7 "), Some(7));
        assert_eq!(parse_size("(10, 4)"), Some(10));
        assert_eq!(parse_size("(3,)"), Some(3));
        assert_eq!(parse_size("[5, 1]"), Some(5));
        assert_eq!(parse_size("ten"), None);
        assert_eq!(parse_size(""), None);
    }

    #[test]
    fn path_layout() {
        assert_eq!(
            series_path("../benchmarkresults/size/", "pingpong", "original"),
            PathBuf::from("../benchmarkresults/size/pingpong_original.csv")
        );
    }
}
