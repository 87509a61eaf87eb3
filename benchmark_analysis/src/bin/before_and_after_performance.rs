use benchmark_analysis::chart::{LineStyle, save_picture};
use benchmark_analysis::figures::{LineChart, time_vs_size_highlight_last};
use benchmark_analysis::{PlotError, Variant, init_logging};
use benchmark_results::csv_source::assemble_data;
use log::info;

const RESULTS_PATH: &str = "./graphs/";

const DATA_SIZE_PATH: &str = "../benchmarkresults/size/";

const BENCHNAME: &str = "forkjointhroughput";

const ORIGINAL: Variant = Variant::named("original", LineStyle::Dashed);
const IMPROVED: Variant = Variant::named("waitqueueimproved", LineStyle::Dotted);

const BEFORE: [Variant; 1] = [ORIGINAL];
const BEFORE_AND_AFTER: [Variant; 2] = [ORIGINAL, IMPROVED];

const CHART: LineChart<'static> = LineChart {
    legend: Some("north west"),
    ..LineChart::new("Number of processes", "Time (milliseconds)")
};

/// The original system alone, within the axis limits of the slides.
fn plot_time_vs_size_original() -> Result<(), PlotError> {
    info!("Generating original performance plot for benchmark: {}", BENCHNAME);
    let points = assemble_data(DATA_SIZE_PATH, BENCHNAME, &BEFORE)?;
    let picture = time_vs_size_highlight_last(
        &points,
        &CHART,
        Some(((1.0, 100_000.0), (0.5, 10_000.0))),
    );
    save_picture(&picture, RESULTS_PATH, "original")
}

fn plot_time_vs_size_results() -> Result<(), PlotError> {
    info!("Generating before/after plot for benchmark: {}", BENCHNAME);
    let points = assemble_data(DATA_SIZE_PATH, BENCHNAME, &BEFORE_AND_AFTER)?;
    let picture = time_vs_size_highlight_last(&points, &CHART, None);
    save_picture(&picture, RESULTS_PATH, "results")
}

fn main() -> Result<(), PlotError> {
    init_logging();
    plot_time_vs_size_original()?;
    plot_time_vs_size_results()?;
    Ok(())
}
