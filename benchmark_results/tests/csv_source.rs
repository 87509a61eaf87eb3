use benchmark_results::ResultsError;
use benchmark_results::csv_source::{assemble_data, fetch_data, read_raw_series};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).unwrap();
}

#[test]
fn timings_become_milliseconds() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "pingpong_original.csv", "4,1000000,2000000,3000000\n");

    let series = fetch_data(dir.path().join("pingpong_original.csv")).unwrap();
    assert_eq!(series.sizes, vec![4]);
    assert_eq!(series.means, vec![2.0]);
    assert!((series.errors[0] - 0.816).abs() < 1e-3);
    assert_eq!(series.samples, vec![vec![1.0, 2.0, 3.0]]);
    assert_eq!(series.mean_calls, None);
}

#[test]
fn tuple_sizes_use_first_element() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "threadring_waitqueue.csv",
        "\"(1, 8)\",5000000,7000000\n\"(2, 8)\",6000000\n",
    );

    let series = fetch_data(dir.path().join("threadring_waitqueue.csv")).unwrap();
    assert_eq!(series.sizes, vec![1, 2]);
    assert_eq!(series.means, vec![6.0, 6.0]);
    assert_eq!(series.errors, vec![1.0, 0.0]);
}

#[test]
fn rows_without_samples_are_dropped() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "chameneos_original.csv", "1,\n2,5000000\n3,10000000,\n");

    let raw = read_raw_series(dir.path().join("chameneos_original.csv")).unwrap();
    assert_eq!(raw.sizes, vec![1, 2, 3]);
    assert!(raw.samples[0].is_empty());

    let series = raw.into_points();
    assert_eq!(series.sizes, vec![2, 3]);
    assert_eq!(series.means, vec![5.0, 10.0]);
    assert_eq!(series.samples.len(), series.sizes.len());
    assert_eq!(series.errors.len(), series.sizes.len());
}

#[test]
fn malformed_input_is_reported() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "bad_size.csv", "large,1000\n");
    write(dir.path(), "bad_sample.csv", "1,1000\n2,fast\n");
    write(dir.path(), "empty.csv", "");

    assert!(matches!(
        fetch_data(dir.path().join("bad_size.csv")),
        Err(ResultsError::InvalidSize { literal, .. }) if literal == "large"
    ));
    assert!(matches!(
        fetch_data(dir.path().join("bad_sample.csv")),
        Err(ResultsError::InvalidSample { line: 2, literal, .. }) if literal == "fast"
    ));
    assert!(matches!(
        fetch_data(dir.path().join("empty.csv")),
        Err(ResultsError::EmptyFile(_))
    ));
    assert!(matches!(
        fetch_data(dir.path().join("missing.csv")),
        Err(ResultsError::Io { .. })
    ));
}

#[test]
fn variants_keep_their_order() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "countingactor_original.csv", "10,4000000\n");
    write(dir.path(), "countingactor_waitqueue.csv", "10,2000000\n100,3000000\n");

    let root = format!("{}/", dir.path().display());
    let variants = ["waitqueue", "original"];
    let assembled = assemble_data(&root, "countingactor", &variants).unwrap();

    assert_eq!(assembled.len(), 2);
    assert_eq!(*assembled[0].0, "waitqueue");
    assert_eq!(assembled[0].1.sizes, vec![10, 100]);
    assert_eq!(*assembled[1].0, "original");
    assert_eq!(assembled[1].1.means, vec![4.0]);
}
