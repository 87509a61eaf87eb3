use benchmark_analysis::chart::{LineStyle, save_picture};
use benchmark_analysis::figures::{LineChart, time_vs_size};
use benchmark_analysis::{Benchmark, PlotError, Variant, init_logging};
use benchmark_results::csv_source::assemble_data;
use log::info;

const GENERAL_PLOTS_PATH: &str = "./graphs/presentation/";

const DATA_SIZE_PATH: &str = "../benchmarkresults/size/";

const TIME_LABEL: &str = "Time (milliseconds)";

const BENCHNAMES: [Benchmark; 6] = [
    Benchmark::new("chameneos", "Number of chameneos", TIME_LABEL),
    Benchmark::new("countingactor", "Numbers to add", TIME_LABEL),
    Benchmark::new("forkjoincreation", "Number of processes", TIME_LABEL),
    Benchmark::new("forkjointhroughput", "Number of processes", TIME_LABEL),
    Benchmark::new("pingpong", "Number of pairs", TIME_LABEL),
    Benchmark::new("threadring", "Number of ring members", TIME_LABEL),
];

// Only the original system and the two optimisations worth showing.
const PSNAMES: [Variant; 3] = [
    Variant::named("original", LineStyle::Dashed),
    Variant::named("runningqueue", LineStyle::Dotted),
    Variant::named("waitqueueimproved", LineStyle::Solid),
];

fn main() -> Result<(), PlotError> {
    init_logging();

    for bench in &BENCHNAMES {
        info!("Generating size vs. time plot for benchmark: {}", bench.name);
        let points = assemble_data(DATA_SIZE_PATH, bench.name, &PSNAMES)?;
        let chart = LineChart {
            legend: Some("north west"),
            ..LineChart::new(bench.x_label, bench.y_label)
        };
        save_picture(&time_vs_size(&points, &chart), GENERAL_PLOTS_PATH, bench.name)?;
    }
    Ok(())
}
