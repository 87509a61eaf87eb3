use benchmark_analysis::chart::{LineStyle, save_picture};
use benchmark_analysis::figures::{
    LineChart, gc_calls_bar_chart, gc_usage_vs_size, in_megabytes, time_vs_size,
};
use benchmark_analysis::{Benchmark, PlotError, Variant, init_logging};
use benchmark_results::store::{GroupId, ResultsStore, StoredBenchmark};
use log::info;

const SQLITE_FILE: &str = "../benchmarks.db";
const GENERAL_PLOTS_PATH: &str = "./graphs/memory/general/";
const BAR_PLOTS_PATH: &str = "./graphs/memory/calls/";
const USAGE_PLOTS_PATH: &str = "./graphs/memory/";

const Y_AXIS_LABEL: &str = "Max GC memory (MB)";

const BENCHNAMES: [Benchmark; 7] = [
    Benchmark::new("chameneos", "Chameneos: number of chameneos", Y_AXIS_LABEL),
    Benchmark::new("counting", "Counting actors: numbers to add", Y_AXIS_LABEL),
    Benchmark::new("forkjoin_creation", "FJC: number of processes", Y_AXIS_LABEL),
    Benchmark::new("forkjoin_throughput", "FJT: number of processes", Y_AXIS_LABEL),
    Benchmark::new("pingpong", "Ping-pong: number of pairs", Y_AXIS_LABEL),
    Benchmark::new("ring", "Thread ring: number of ring members", Y_AXIS_LABEL),
    Benchmark::new("ringstream", "Thread ring stream: number of ring members", Y_AXIS_LABEL),
];

const PSNAMES: [Variant; 3] = [
    Variant::named("akka", LineStyle::DashDotted),
    Variant::named("statemachinemultistep", LineStyle::Dashed),
    Variant::named("runnerimproved", LineStyle::Solid),
];

fn gc_usage_vs_size_per_benchmark(
    store: &ResultsStore,
    bench: &Benchmark,
    gid: GroupId,
) -> Result<(), PlotError> {
    let stored: StoredBenchmark = bench.name.parse()?;
    let points = store.assemble_memory_data(stored, &PSNAMES, Some(gid))?;
    let picture = gc_usage_vs_size(&points, bench.x_label, bench.y_label);
    save_picture(&picture, USAGE_PLOTS_PATH, bench.name)
}

fn gc_calls_vs_size_barchart_per_benchmark(
    store: &ResultsStore,
    bench: &Benchmark,
    gid: GroupId,
) -> Result<(), PlotError> {
    let stored: StoredBenchmark = bench.name.parse()?;
    let points = store.assemble_memory_data(stored, &PSNAMES, Some(gid))?;
    let picture = gc_calls_bar_chart(&points, bench.x_label, "Number of GC calls");
    save_picture(&picture, BAR_PLOTS_PATH, bench.name)
}

fn plot_memory_vs_size_general_per_benchmark(
    store: &ResultsStore,
    bench: &Benchmark,
    gid: GroupId,
) -> Result<(), PlotError> {
    let stored: StoredBenchmark = bench.name.parse()?;
    let points = store.assemble_memory_data(stored, &PSNAMES, Some(gid))?;
    let chart = LineChart::new(bench.x_label, bench.y_label);
    let picture = time_vs_size(&in_megabytes(&points), &chart);
    save_picture(&picture, GENERAL_PLOTS_PATH, bench.name)
}

fn main() -> Result<(), PlotError> {
    init_logging();
    let store = ResultsStore::open(SQLITE_FILE)?;
    let gid = store.latest_group_id()?;
    info!("Using benchmark group {}", gid);

    for bench in &BENCHNAMES {
        info!("Generating size vs. GC usage for benchmark: {}", bench.name);
        gc_usage_vs_size_per_benchmark(&store, bench, gid)?;
    }

    for bench in &BENCHNAMES {
        info!("Generating size vs. GC calls bar chart for benchmark: {}", bench.name);
        gc_calls_vs_size_barchart_per_benchmark(&store, bench, gid)?;
    }

    for bench in &BENCHNAMES {
        info!("Generating size vs. GC memory plot for benchmark: {}", bench.name);
        plot_memory_vs_size_general_per_benchmark(&store, bench, gid)?;
    }

    Ok(())
}
