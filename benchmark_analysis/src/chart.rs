/*!
Building blocks for the `pgfplots` figures.

Plots are emitted with explicit styles rather than relying on the pgfplots cycle list, so
that a given variant keeps the same colour and dash pattern across every figure.
*/

use crate::PlotError;
use benchmark_results::series::AggregatedSeries;
use benchmark_results::statistics::BoxStatistics;
use itertools::Itertools;
use log::{debug, error};
use pgfplots::axis::plot::coordinate::Coordinate2D;
use pgfplots::axis::plot::{Plot2D, PlotKey};
use pgfplots::axis::{Axis, AxisKey};
use pgfplots::{Engine, Picture};
use std::path::{Path, PathBuf};

/// Default colour cycle, registered in the preamble by [`new_picture`].
pub const PALETTE: [(&str, &str); 4] = [
    ("SeriesBlue", "1F77B4"),
    ("SeriesOrange", "FF7F0E"),
    ("SeriesGreen", "2CA02C"),
    ("SeriesRed", "D62728"),
];

pub const ORANGE: &str = "SeriesOrange";
pub const GREEN: &str = "SeriesGreen";
pub const BLUE: &str = "SeriesBlue";

pub fn palette_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()].0
}

/// Dash pattern of a series, matching the matplotlib styles `-`, `--`, `:` and `-.`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    Dashed,
    Dotted,
    DashDotted,
}

impl LineStyle {
    pub const fn tikz(self) -> &'static str {
        match self {
            LineStyle::Solid => "solid",
            LineStyle::Dashed => "dashed",
            LineStyle::Dotted => "dotted",
            LineStyle::DashDotted => "dashdotted",
        }
    }
}

/// Figure dimensions in inches.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FigureSize {
    pub width: f64,
    pub height: f64,
}

impl FigureSize {
    pub const DEFAULT: FigureSize = FigureSize {
        width: 6.4,
        height: 4.8,
    };

    pub const fn square(side: f64) -> Self {
        FigureSize {
            width: side,
            height: side,
        }
    }

    fn axis_key(self) -> AxisKey {
        AxisKey::Custom(format!("width={}in, height={}in", self.width, self.height))
    }
}

/**
Free text as a key value: TeX special characters are escaped, and the surrounding braces
protect commas and equal signs.
*/
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + 2);
    escaped.push('{');
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\textbackslash{}"),
            '~' => escaped.push_str("\\textasciitilde{}"),
            '^' => escaped.push_str("\\textasciicircum{}"),
            '_' | '%' | '&' | '#' | '$' | '{' | '}' => {
                escaped.push('\\');
                escaped.push(c);
            }
            _ => escaped.push(c),
        }
    }
    escaped.push('}');
    escaped
}

pub fn new_picture() -> Picture {
    let mut picture = Picture::new();
    let colors = PALETTE
        .iter()
        .map(|(name, html)| format!("\\definecolor{{{}}}{{HTML}}{{{}}}", name, html))
        .join("\n");
    picture.add_to_preamble(vec![String::from("\\usepgfplotslibrary{statistics}"), colors]);
    picture
}

/// Axis with both scales logarithmic.
pub fn loglog_axis(x_label: &str, y_label: &str, size: FigureSize) -> Axis {
    let mut axis = Axis::new();
    axis.add_key(size.axis_key());
    axis.add_key(AxisKey::Custom(String::from(
        "xmode=log, ymode=log, log basis x=10, log basis y=10, tick align=outside, tick pos=left",
    )));
    axis.add_key(AxisKey::Custom(format!(
        "xlabel={}, ylabel={}",
        escape(x_label),
        escape(y_label)
    )));
    axis
}

pub fn set_limits(axis: &mut Axis, x: (f64, f64), y: (f64, f64)) {
    axis.add_key(AxisKey::Custom(format!(
        "xmin={}, xmax={}, ymin={}, ymax={}",
        x.0, x.1, y.0, y.1
    )));
}

/// Legend entries are matched, in order, with the plots not marked `forget plot`.
pub fn legend(axis: &mut Axis, labels: &[&str], position: &str) {
    axis.add_key(AxisKey::Custom(format!(
        "legend entries={{{}}}, legend pos={}",
        labels.iter().map(|l| escape(l)).join(","),
        position
    )));
}

/// Polyline through `points`, marked by circles of diameter `marker_size` points.
pub fn polyline(
    points: impl Iterator<Item = (f64, f64)>,
    style: LineStyle,
    color: &str,
    marker_size: f64,
) -> Plot2D {
    let mut plot = Plot2D::new();
    plot.coordinates = points.map(Coordinate2D::from).collect();
    plot.add_key(PlotKey::Custom(format!(
        "color={}, {}, mark=*, mark size={}pt, mark options={{solid}}",
        color,
        style.tikz(),
        marker_size / 2.0
    )));
    plot
}

/// Mean against size of a series.
pub fn line_plot(series: &AggregatedSeries, style: LineStyle, color: &str, marker_size: f64) -> Plot2D {
    polyline(series.points(), style, color, marker_size)
}

/// Single cross at `(x, y)`, kept out of the legend.
pub fn marker_plot(x: f64, y: f64, color: &str, marker_size: f64) -> Plot2D {
    let mut plot = Plot2D::new();
    plot.coordinates = vec![Coordinate2D::from((x, y))];
    plot.add_key(PlotKey::Custom(format!(
        "only marks, forget plot, color={}, mark=x, mark size={}pt, very thick",
        color,
        marker_size / 2.0
    )));
    plot
}

/// One prepared box plot, drawn at `position` on the x-axis.
pub fn box_plot(stats: &BoxStatistics, position: usize, color: &str) -> Plot2D {
    let mut plot = Plot2D::new();
    plot.add_key(PlotKey::Custom(format!(
        "boxplot prepared={{draw position={}, lower whisker={}, lower quartile={}, \
         median={}, upper quartile={}, upper whisker={}}}, color={}, solid, mark=o",
        position,
        stats.lower_whisker,
        stats.lower_quartile,
        stats.median,
        stats.upper_quartile,
        stats.upper_whisker,
        color
    )));
    plot.coordinates = stats
        .outliers
        .iter()
        .map(|&y| Coordinate2D::from((position as f64, y)))
        .collect();
    plot
}

/**
Box plot of every sample set, the boxes being evenly spaced and labelled by their size.
Sizes without samples are left out.
*/
pub fn box_plot_axis(
    sizes: &[u64],
    samples: &[Vec<f64>],
    x_label: &str,
    y_label: &str,
    size: FigureSize,
) -> Axis {
    let mut axis = Axis::new();
    axis.add_key(size.axis_key());

    let boxes: Vec<(u64, BoxStatistics)> = sizes
        .iter()
        .zip(samples.iter())
        .filter_map(|(size, s)| BoxStatistics::from_samples(s).map(|stats| (*size, stats)))
        .collect();
    for (index, (_, stats)) in boxes.iter().enumerate() {
        axis.plots.push(box_plot(stats, index + 1, palette_color(0)));
    }

    axis.add_key(AxisKey::Custom(format!(
        "xtick={{{}}}, xticklabels={{{}}}, xmin=0.5, xmax={}, tick align=outside, tick pos=left",
        (1..=boxes.len()).join(","),
        boxes.iter().map(|(size, _)| size).join(","),
        boxes.len() as f64 + 0.5
    )));
    axis.add_key(AxisKey::Custom(format!(
        "xlabel={}, ylabel={}",
        escape(x_label),
        escape(y_label)
    )));
    axis
}

/**
Bars of width `size / 4`, the left edge of each bar being shifted by `offset` bar widths from
its size, so that three series at offsets -1, 0 and 1 sit side by side on a logarithmic axis.
Only the first bar of the series is given a legend entry.
*/
pub fn bar_plots(sizes: &[u64], values: &[f64], offset: f64, color: &str) -> Vec<Plot2D> {
    sizes
        .iter()
        .zip(values.iter())
        .enumerate()
        .map(|(index, (&size, &value))| {
            let size = size as f64;
            let width = size / 4.0;
            let left = size + offset * width;
            let right = left + width;
            let mut plot = Plot2D::new();
            plot.coordinates = vec![
                Coordinate2D::from((left, 0.0)),
                Coordinate2D::from((left, value)),
                Coordinate2D::from((right, value)),
                Coordinate2D::from((right, 0.0)),
            ];
            let forget = if index == 0 { "" } else { ", forget plot" };
            plot.add_key(PlotKey::Custom(format!(
                "fill={}, draw=black, very thin, mark=none, area legend{}",
                color, forget
            )));
            plot
        })
        .collect()
}

/// Writes the standalone LaTeX source of `picture` to `<folder>/<jobname>.tex`.
pub fn write_source(picture: &Picture, folder: &Path, jobname: &str) -> Result<PathBuf, PlotError> {
    std::fs::create_dir_all(folder).map_err(|source| PlotError::Io {
        path: folder.to_path_buf(),
        source,
    })?;
    let tex = folder.join(format!("{}.tex", jobname));
    std::fs::write(&tex, picture.standalone_string()).map_err(|source| PlotError::Io {
        path: tex.clone(),
        source,
    })?;
    debug!("Wrote {}", tex.display());
    Ok(tex)
}

/**
Writes `<jobname>.tex` in `folder` and compiles it to `<jobname>.pdf`.

Compilation relies on an external LaTeX installation; a failure is logged and does not
abort the run, the standalone source being left next to where the PDF should have been.
*/
pub fn save_picture(picture: &Picture, folder: impl AsRef<Path>, jobname: &str) -> Result<(), PlotError> {
    let folder = folder.as_ref();
    write_source(picture, folder, jobname)?;
    match picture.to_pdf(folder, jobname, Engine::LuaLatex) {
        Ok(_) => {}
        Err(e) => {
            error!("Failed to create PDF: {}, {:?}", jobname, e)
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use benchmark_results::series::RawSeries;

    fn series() -> AggregatedSeries {
        let mut raw = RawSeries::default();
        raw.push(1, vec![1.0, 3.0]);
        raw.push(10, vec![]);
        raw.push(100, vec![20.0]);
        raw.into_points()
    }

    #[test]
    fn line_plot_follows_means() {
        let plot = line_plot(&series(), LineStyle::Dashed, BLUE, 3.0);
        let xs: Vec<f64> = plot.coordinates.iter().map(|c| c.x).collect();
        let ys: Vec<f64> = plot.coordinates.iter().map(|c| c.y).collect();
        assert_eq!(xs, vec![1.0, 100.0]);
        assert_eq!(ys, vec![2.0, 20.0]);
    }

    #[test]
    fn loglog_figure_source() {
        let mut picture = new_picture();
        let mut axis = loglog_axis("Number of pairs", "Time (ms)", FigureSize::square(3.5));
        axis.plots.push(line_plot(&series(), LineStyle::DashDotted, ORANGE, 6.0));
        legend(&mut axis, &["Akka Typed"], "north west");
        picture.axes.push(Box::new(axis));

        let source = picture.standalone_string();
        assert!(source.contains("xmode=log, ymode=log"));
        assert!(source.contains("xlabel={Number of pairs}"));
        assert!(source.contains("width=3.5in, height=3.5in"));
        assert!(source.contains("dashdotted"));
        assert!(source.contains("mark size=3pt"));
        assert!(source.contains("legend entries={{Akka Typed}}"));
        assert!(source.contains("\\definecolor{SeriesOrange}{HTML}{FF7F0E}"));
    }

    #[test]
    fn labels_are_tex_safe() {
        assert_eq!(escape("Number of pairs"), "{Number of pairs}");
        assert_eq!(escape("forkjoin_creation"), "{forkjoin\\_creation}");
        assert_eq!(escape("50% & #1"), "{50\\% \\& \\#1}");
        assert_eq!(escape("a{b}"), "{a\\{b\\}}");
        assert_eq!(escape("x^2~y\\z"), "{x\\textasciicircum{}2\\textasciitilde{}y\\textbackslash{}z}");
    }

    #[test]
    fn marker_is_not_in_legend() {
        let mut picture = new_picture();
        let mut axis = Axis::new();
        axis.plots.push(marker_plot(8.0, 2.0, GREEN, 15.0));
        assert_eq!(axis.plots[0].coordinates.len(), 1);
        picture.axes.push(Box::new(axis));
        assert!(picture.standalone_string().contains("only marks, forget plot"));
    }

    #[test]
    fn one_box_per_non_empty_size() {
        let axis = box_plot_axis(
            &[1, 2, 4],
            &[vec![1.0, 2.0, 3.0], vec![], vec![5.0, 6.0, 50.0, 7.0, 6.5]],
            "Threads per CPU core",
            "Time (milliseconds)",
            FigureSize::DEFAULT,
        );
        assert_eq!(axis.plots.len(), 2);
        assert!(axis.plots[0].coordinates.is_empty());
        assert_eq!(axis.plots[1].coordinates.len(), 1);
        assert_eq!(axis.plots[1].coordinates[0].x, 2.0);
        assert_eq!(axis.plots[1].coordinates[0].y, 50.0);

        let mut picture = new_picture();
        picture.axes.push(Box::new(axis));
        let source = picture.standalone_string();
        assert!(source.contains("xtick={1,2}, xticklabels={1,4}"));
        assert!(source.contains("draw position=2"));
        assert!(source.contains("median=6.5"));
    }

    #[test]
    fn bars_sit_side_by_side() {
        let left = bar_plots(&[100, 1000], &[3.0, 5.0], -1.0, ORANGE);
        let middle = bar_plots(&[100, 1000], &[4.0, 6.0], 0.0, GREEN);
        assert_eq!(left.len(), 2);
        assert_eq!(left[0].coordinates[0].x, 75.0);
        assert_eq!(left[0].coordinates[2].x, 100.0);
        assert_eq!(left[0].coordinates[1].y, 3.0);
        assert_eq!(middle[1].coordinates[0].x, 1000.0);
        assert_eq!(middle[1].coordinates[3].x, 1250.0);
        assert_eq!(middle[1].coordinates[2].y, 6.0);
    }

    #[test]
    fn tex_source_is_saved() {
        let dir = tempfile::TempDir::new().unwrap();
        let folder = dir.path().join("graphs").join("time");
        let mut picture = new_picture();
        picture.axes.push(Box::new(loglog_axis("x", "y", FigureSize::DEFAULT)));
        let tex = write_source(&picture, &folder, "pingpong").unwrap();
        assert_eq!(tex, folder.join("pingpong.tex"));
        let source = std::fs::read_to_string(tex).unwrap();
        assert_eq!(source, picture.standalone_string());
    }
}
