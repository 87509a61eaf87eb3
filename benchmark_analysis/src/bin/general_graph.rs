use benchmark_analysis::chart::{LineStyle, save_picture};
use benchmark_analysis::figures::{LineChart, samples_box_plot, time_vs_size};
use benchmark_analysis::{Benchmark, PlotError, Variant, init_logging};
use benchmark_results::csv_source::{assemble_data, fetch_data, series_path};
use log::info;

const GENERAL_PLOTS_PATH: &str = "./graphs/general/";
const THREAD_PLOTS_PATH: &str = "./graphs/threadpercore/";
const PS_PLOTS_PATH: &str = "./graphs/processsystem/";

const DATA_SIZE_PATH: &str = "../benchmarkresults/size/";
const DATA_TPC_PATH: &str = "../benchmarkresults/threads/";

const TIME_LABEL: &str = "Time (milliseconds)";

const BENCHNAMES: [Benchmark; 6] = [
    Benchmark::new("chameneos", "Number of chameneos", TIME_LABEL),
    Benchmark::new("countingactor", "Numbers to add", TIME_LABEL),
    Benchmark::new("forkjoincreation", "Number of processes", TIME_LABEL),
    Benchmark::new("forkjointhroughput", "Number of processes", TIME_LABEL),
    Benchmark::new("pingpong", "Number of pairs", TIME_LABEL),
    Benchmark::new("threadring", "Number of ring members", TIME_LABEL),
];

const OPTIMISATIONS: [Variant; 3] = [
    Variant::named("runningqueue", LineStyle::Dotted),
    Variant::named("waitqueue", LineStyle::DashDotted),
    Variant::named("waitqueueimproved", LineStyle::Solid),
];

const PSNAMES: [Variant; 4] = [
    Variant::named("original", LineStyle::Dashed),
    OPTIMISATIONS[0],
    OPTIMISATIONS[1],
    OPTIMISATIONS[2],
];

fn plot_time_vs_threads() -> Result<(), PlotError> {
    for bench in &BENCHNAMES {
        for variant in &OPTIMISATIONS {
            info!(
                "Generating threads per core box plot for benchmark: {} ({})",
                bench.name, variant.name
            );
            let series = fetch_data(series_path(DATA_TPC_PATH, bench.name, variant.name))?;
            let picture = samples_box_plot(&series, "Threads per CPU core", TIME_LABEL);
            save_picture(
                &picture,
                THREAD_PLOTS_PATH,
                &format!("{}_{}", bench.name, variant.name),
            )?;
        }
    }
    Ok(())
}

fn plot_time_vs_size_error_bar() -> Result<(), PlotError> {
    for bench in &BENCHNAMES {
        for variant in &PSNAMES {
            info!(
                "Generating size box plot for benchmark: {} ({})",
                bench.name, variant.name
            );
            let series = fetch_data(series_path(DATA_SIZE_PATH, bench.name, variant.name))?;
            let picture = samples_box_plot(&series, "Number of actors", TIME_LABEL);
            save_picture(
                &picture,
                PS_PLOTS_PATH,
                &format!("{}_{}", bench.name, variant.name),
            )?;
        }
    }
    Ok(())
}

fn plot_time_vs_size_general() -> Result<(), PlotError> {
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

fn main() -> Result<(), PlotError> {
    init_logging();

    plot_time_vs_size_general()?;

    plot_time_vs_size_error_bar()?;

    plot_time_vs_threads()?;

    Ok(())
}
