use benchmark_analysis::chart::{FigureSize, LineStyle, save_picture};
use benchmark_analysis::figures::{LineChart, time_vs_size};
use benchmark_analysis::{Benchmark, PlotError, Variant, init_logging};
use benchmark_results::store::{ResultsStore, StoredBenchmark};
use log::info;

const SQLITE_FILE: &str = "../benchmarks.db";
const GENERAL_PLOTS_PATH: &str = "./graphs/time/";

const TIME_LABEL: &str = "Time (ms)";

const BENCHNAMES: [Benchmark; 7] = [
    Benchmark::new("chameneos", "Number of chameneos", TIME_LABEL),
    Benchmark::new("counting", "Numbers to add", TIME_LABEL),
    Benchmark::new("forkjoin_creation", "Number of processes", TIME_LABEL),
    Benchmark::new("forkjoin_throughput", "Number of processes", TIME_LABEL),
    Benchmark::new("pingpong", "Number of pairs", TIME_LABEL),
    Benchmark::new("ring", "Number of ring members", TIME_LABEL),
    Benchmark::new("ringstream", "Number of ring members", TIME_LABEL),
];

const PSNAMES: [Variant; 3] = [
    Variant::new("akka", "Akka Typed", LineStyle::DashDotted),
    Variant::new("statemachinemultistep", "Effpi with channel FSM", LineStyle::Dashed),
    Variant::new("runnerimproved", "Effpi default", LineStyle::Solid),
];

fn plot_time_vs_size_general(store: &ResultsStore) -> Result<(), PlotError> {
    // Every benchmark is read from the same group, the latest one.
    let gid = store.latest_group_id()?;
    info!("Using benchmark group {}", gid);

    for bench in &BENCHNAMES {
        info!("Generating size vs. time plot for benchmark: {}", bench.name);
        let stored: StoredBenchmark = bench.name.parse()?;
        let points = store.assemble_time_data(stored, &PSNAMES, Some(gid))?;
        let chart = LineChart {
            size: FigureSize::square(3.5),
            marker_size: 6.0,
            legend: Some("north west"),
            ..LineChart::new(bench.x_label, bench.y_label)
        };
        save_picture(&time_vs_size(&points, &chart), GENERAL_PLOTS_PATH, bench.name)?;
    }
    Ok(())
}

fn main() -> Result<(), PlotError> {
    init_logging();
    let store = ResultsStore::open(SQLITE_FILE)?;
    plot_time_vs_size_general(&store)
}
