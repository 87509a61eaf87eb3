/*!
Complete figures, one function per kind of chart produced by the programs.

Every function takes already loaded and aggregated series and returns a [`Picture`]; loading
and saving are left to the callers.
*/

use crate::Variant;
use crate::chart::{
    BLUE, FigureSize, GREEN, ORANGE, bar_plots, box_plot_axis, escape, legend, line_plot,
    loglog_axis, marker_plot, new_picture, palette_color, polyline, set_limits,
};
use benchmark_results::BYTES_PER_MEGABYTE;
use benchmark_results::series::AggregatedSeries;
use benchmark_results::statistics::NO_DATA;
use pgfplots::Picture;
use pgfplots::axis::{Axis, AxisKey};
use pgfplots::groupplot::{GroupDimension, GroupPlot};

pub type VariantSeries<'a> = (&'a Variant, AggregatedSeries);

/// Options of a size vs. mean line chart.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LineChart<'a> {
    pub x_label: &'a str,
    pub y_label: &'a str,
    pub size: FigureSize,
    pub marker_size: f64,
    /// `legend pos` value, no legend when `None`.
    pub legend: Option<&'a str>,
}

impl<'a> LineChart<'a> {
    pub const fn new(x_label: &'a str, y_label: &'a str) -> Self {
        LineChart {
            x_label,
            y_label,
            size: FigureSize::DEFAULT,
            marker_size: 3.0,
            legend: None,
        }
    }

    fn axis(&self, points: &[VariantSeries<'_>]) -> Axis {
        let mut axis = loglog_axis(self.x_label, self.y_label, self.size);
        for (index, (variant, series)) in points.iter().enumerate() {
            axis.plots.push(line_plot(
                series,
                variant.style,
                palette_color(index),
                self.marker_size,
            ));
        }
        if let Some(position) = self.legend {
            let labels: Vec<&str> = points.iter().map(|(v, _)| v.label).collect();
            legend(&mut axis, &labels, position);
        }
        axis
    }
}

/// Log-log chart of the mean of every variant against the size.
pub fn time_vs_size(points: &[VariantSeries<'_>], chart: &LineChart<'_>) -> Picture {
    let mut picture = new_picture();
    picture.axes.push(Box::new(chart.axis(points)));
    picture
}

/**
Log-log chart where the last point of the first series is highlighted by a large cross,
optionally within fixed axis limits.
*/
pub fn time_vs_size_highlight_last(
    points: &[VariantSeries<'_>],
    chart: &LineChart<'_>,
    limits: Option<((f64, f64), (f64, f64))>,
) -> Picture {
    let mut axis = chart.axis(points);
    if let Some((x, y)) = points.first().and_then(|(_, series)| series.last_point()) {
        axis.plots.push(marker_plot(x, y, palette_color(points.len()), 15.0));
    }
    if let Some((x, y)) = limits {
        set_limits(&mut axis, x, y);
    }
    let mut picture = new_picture();
    picture.axes.push(Box::new(axis));
    picture
}

/// Distribution of the raw samples of each size.
pub fn samples_box_plot(series: &AggregatedSeries, x_label: &str, y_label: &str) -> Picture {
    let mut picture = new_picture();
    picture.axes.push(Box::new(box_plot_axis(
        &series.sizes,
        &series.samples,
        x_label,
        y_label,
        FigureSize::DEFAULT,
    )));
    picture
}

fn megabytes(series: &AggregatedSeries) -> AggregatedSeries {
    series.clone().scaled(BYTES_PER_MEGABYTE)
}

/// Memory series converted from bytes to megabytes for display.
pub fn in_megabytes<'a>(points: &[VariantSeries<'a>]) -> Vec<VariantSeries<'a>> {
    points
        .iter()
        .map(|(variant, series)| (*variant, megabytes(series)))
        .collect()
}

fn panel_title(text: &str) -> AxisKey {
    AxisKey::Custom(format!(
        "title={}, title style={{at={{(-0.1,1.15)}}, anchor=north west, font=\\large}}",
        escape(text)
    ))
}

/// Sizes and mean GC call counts of a memory series, sizes without calls left out.
fn gc_calls(series: &AggregatedSeries) -> (Vec<u64>, Vec<f64>) {
    let calls = series.mean_calls.as_deref().unwrap_or_default();
    series
        .sizes
        .iter()
        .zip(calls.iter())
        .filter(|(_, calls)| **calls != NO_DATA)
        .map(|(size, calls)| (*size, *calls))
        .unzip()
}

fn gc_calls_axis(points: &[VariantSeries<'_>], x_label: &str, marker_size: f64) -> Axis {
    let mut axis = Axis::new();
    axis.add_key(AxisKey::Custom(format!("xlabel={}", escape(x_label))));
    axis.add_key(panel_title("Number of GC calls"));
    for (index, (variant, series)) in points.iter().enumerate() {
        let (sizes, calls) = gc_calls(series);
        let coordinates = sizes
            .iter()
            .zip(calls.iter())
            .map(|(size, calls)| (*size as f64, *calls));
        axis.plots.push(polyline(
            coordinates,
            variant.style,
            palette_color(index),
            marker_size,
        ));
    }
    axis
}

/**
Two stacked log-log panels sharing the x-axis: the maximum GC memory (megabytes) on top and
the mean number of GC calls below.
*/
pub fn gc_usage_vs_size(points: &[VariantSeries<'_>], x_label: &str, y_label: &str) -> Picture {
    let size = FigureSize::square(4.0);
    let marker_size = 6.0;

    let mut memory_axis = Axis::new();
    memory_axis.add_key(AxisKey::Custom(String::from("xticklabel={}")));
    memory_axis.add_key(panel_title(y_label));
    for (index, (variant, series)) in in_megabytes(points).iter().enumerate() {
        memory_axis.plots.push(line_plot(
            series,
            variant.style,
            palette_color(index),
            marker_size,
        ));
    }

    let calls_axis = gc_calls_axis(points, x_label, marker_size);

    let mut group = GroupPlot::new();
    group.dimension = GroupDimension::Vertical(2);
    group.add_key(AxisKey::Custom(format!(
        "width={}in, height={}in, xmode=log, ymode=log, tick align=outside, tick pos=left, \
         group style={{vertical sep=1.5cm}}",
        size.width,
        size.height / 2.0
    )));
    group.groups.push(memory_axis);
    group.groups.push(calls_axis);

    let mut picture = new_picture();
    picture.axes.push(Box::new(group));
    picture
}

/// Mean number of GC calls as grouped bars, one colour per variant, on a logarithmic size axis.
pub fn gc_calls_bar_chart(points: &[VariantSeries<'_>], x_label: &str, y_label: &str) -> Picture {
    const COLORS: [&str; 3] = [ORANGE, GREEN, BLUE];

    let mut axis = Axis::new();
    axis.add_key(AxisKey::Custom(format!(
        "width={}in, height={}in, xmode=log, ymin=0, tick align=outside, tick pos=left, \
         xlabel={}, ylabel={}",
        FigureSize::DEFAULT.width,
        FigureSize::DEFAULT.height,
        escape(x_label),
        escape(y_label)
    )));

    let mut labels = Vec::new();
    for (index, ((variant, series), color)) in points.iter().zip(COLORS).enumerate() {
        let (sizes, calls) = gc_calls(series);
        let offset = index as f64 - 1.0;
        let mut bars = bar_plots(&sizes, &calls, offset, color);
        if !bars.is_empty() {
            labels.push(variant.label);
        }
        axis.plots.append(&mut bars);
    }
    legend(&mut axis, &labels, "north west");

    let mut picture = new_picture();
    picture.axes.push(Box::new(axis));
    picture
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::LineStyle;
    use benchmark_results::series::RawSeries;

    const AKKA: Variant = Variant::new("akka", "Akka Typed", LineStyle::DashDotted);
    const DEFAULT: Variant = Variant::new("runnerimproved", "Effpi default", LineStyle::Solid);

    fn memory(sizes: &[u64], bytes: &[f64], calls: &[f64]) -> AggregatedSeries {
        let mut raw = RawSeries::default();
        for ((size, b), c) in sizes.iter().zip(bytes).zip(calls) {
            raw.push_with_calls(*size, vec![*b], vec![*c]);
        }
        raw.into_points()
    }

    fn timing(sizes: &[u64], ms: &[f64]) -> AggregatedSeries {
        let mut raw = RawSeries::default();
        for (size, t) in sizes.iter().zip(ms) {
            raw.push(*size, vec![*t]);
        }
        raw.into_points()
    }

    #[test]
    fn one_line_per_variant_with_labels() {
        let points = vec![
            (&AKKA, timing(&[1, 10], &[1.0, 4.0])),
            (&DEFAULT, timing(&[1, 10, 100], &[0.5, 1.0, 2.0])),
        ];
        let chart = LineChart {
            size: FigureSize::square(3.5),
            marker_size: 6.0,
            legend: Some("north west"),
            ..LineChart::new("Number of pairs", "Time (ms)")
        };
        let axis = chart.axis(&points);
        assert_eq!(axis.plots.len(), 2);
        assert_eq!(axis.plots[1].coordinates.len(), 3);

        let source = time_vs_size(&points, &chart).standalone_string();
        assert!(source.contains("legend entries={{Akka Typed},{Effpi default}}"));
        assert!(source.contains("legend pos=north west"));
    }

    #[test]
    fn last_point_is_highlighted() {
        let original = Variant::named("original", LineStyle::Dashed);
        let points = vec![(&original, timing(&[1, 10, 1000], &[1.0, 3.0, 900.0]))];
        let chart = LineChart::new("Number of processes", "Time (milliseconds)");
        let source = time_vs_size_highlight_last(
            &points,
            &chart,
            Some(((1.0, 100000.0), (0.5, 10000.0))),
        )
        .standalone_string();
        assert!(source.contains("mark=x"));
        assert!(source.contains("xmin=1, xmax=100000, ymin=0.5, ymax=10000"));
    }

    #[test]
    fn memory_is_plotted_in_megabytes() {
        let points = vec![(&AKKA, memory(&[2, 4], &[3_000_000.0, 5_000_000.0], &[1.0, 2.0]))];
        let converted = in_megabytes(&points);
        assert_eq!(converted[0].1.means, vec![3.0, 5.0]);
        assert_eq!(converted[0].1.mean_calls, Some(vec![1.0, 2.0]));
        assert_eq!(points[0].1.means, vec![3_000_000.0, 5_000_000.0]);
    }

    #[test]
    fn gc_panels() {
        let points = vec![
            (&AKKA, memory(&[2, 4], &[3_000_000.0, 5_000_000.0], &[1.0, 2.0])),
            (&DEFAULT, memory(&[2], &[1_000_000.0], &[7.0])),
        ];
        let source =
            gc_usage_vs_size(&points, "Ping-pong: number of pairs", "Max GC memory (MB)")
                .standalone_string();
        assert!(source.contains("title={Max GC memory (MB)}"));
        assert!(source.contains("title={Number of GC calls}"));
        assert!(source.contains("xlabel={Ping-pong: number of pairs}"));
    }

    #[test]
    fn gc_calls_panel_pairs_sizes_and_calls() {
        let mut raw = RawSeries::default();
        raw.push(1, vec![500_000.0]);
        raw.push_with_calls(2, vec![3_000_000.0], vec![1.0, 3.0]);
        raw.push_with_calls(4, vec![5_000_000.0], vec![6.0]);
        let points = vec![
            (&AKKA, raw.into_points()),
            (&DEFAULT, memory(&[8, 16], &[1_000_000.0, 2_000_000.0], &[7.0, 9.0])),
        ];

        let axis = gc_calls_axis(&points, "Number of pairs", 6.0);
        assert_eq!(axis.plots.len(), 2);
        let coordinates = |plot: usize| -> Vec<(f64, f64)> {
            axis.plots[plot].coordinates.iter().map(|c| (c.x, c.y)).collect()
        };
        assert_eq!(coordinates(0), vec![(2.0, 2.0), (4.0, 6.0)]);
        assert_eq!(coordinates(1), vec![(8.0, 7.0), (16.0, 9.0)]);
    }

    #[test]
    fn bars_only_label_non_empty_variants() {
        let empty = Variant::named("statemachinemultistep", LineStyle::Dashed);
        let points = vec![
            (&AKKA, memory(&[10, 100], &[1.0, 1.0], &[3.0, 4.0])),
            (&empty, AggregatedSeries {
                mean_calls: Some(Vec::new()),
                ..AggregatedSeries::default()
            }),
            (&DEFAULT, memory(&[10], &[1.0], &[2.0])),
        ];
        let source = gc_calls_bar_chart(&points, "Counting actors: numbers to add", "GC calls")
            .standalone_string();
        assert!(source.contains("legend entries={{Akka Typed},{Effpi default}}"));
        assert!(source.contains("fill=SeriesOrange"));
        assert!(source.contains("fill=SeriesBlue"));
        assert!(!source.contains("fill=SeriesGreen"));
    }
}
