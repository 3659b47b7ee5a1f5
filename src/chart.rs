//! Chart definitions and SVG rendering.
//!
//! A chart is a set of series files, axis labels and an output target.
//! Every record becomes one point, so repeated runs at the same thread
//! count show up as a vertical cluster.  The legend sits in its own strip
//! to the right of the plot area and is titled by the CSV column headers.

use std::path::{Path, PathBuf};

use log::info;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;

use crate::error::Error;
use crate::series::Series;

pub const CHART_SIZE: (u32, u32) = (1400, 750);

const LEGEND_WIDTH: u32 = 200;
const POINT_SIZE: i32 = 4;

/// Point style drawn for every record of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Circle,
    Triangle,
}

/// How one series is drawn.
#[derive(Debug, Clone, Copy)]
pub struct SeriesStyle {
    pub color: RGBColor,
    pub marker: Marker,
}

impl SeriesStyle {
    pub fn circle(color: RGBColor) -> Self {
        SeriesStyle {
            color,
            marker: Marker::Circle,
        }
    }

    pub fn triangle(color: RGBColor) -> Self {
        SeriesStyle {
            color,
            marker: Marker::Triangle,
        }
    }
}

/// One chart: input series, axis labels, output file and dimensions.
#[derive(Debug, Clone)]
pub struct ChartSpec {
    pub output: PathBuf,
    pub size: (u32, u32),
    pub x_desc: String,
    pub y_desc: String,
    pub inputs: Vec<(PathBuf, SeriesStyle)>,
}

impl ChartSpec {
    pub fn new<P: Into<PathBuf>>(output: P) -> Self {
        ChartSpec {
            output: output.into(),
            size: CHART_SIZE,
            x_desc: "Sender Threads".to_string(),
            y_desc: "Throughput (messages/millisecond)".to_string(),
            inputs: Vec::new(),
        }
    }

    pub fn input<P: Into<PathBuf>>(mut self, path: P, style: SeriesStyle) -> Self {
        self.inputs.push((path.into(), style));
        self
    }

    /// Load every input series and render the chart.  A missing or
    /// malformed series file aborts the render.
    pub fn render(&self) -> Result<(), Error> {
        let mut series = Vec::with_capacity(self.inputs.len());
        for (path, style) in &self.inputs {
            series.push((Series::from_csv(path)?, *style));
        }
        self.draw(&series)?;
        info!("wrote {}", self.output.display());
        Ok(())
    }

    fn draw(&self, series: &[(Series, SeriesStyle)]) -> Result<(), Error> {
        let x_max = series.iter().map(|(s, _)| s.max_threads()).max().unwrap_or(0);
        let y_max = series
            .iter()
            .map(|(s, _)| s.max_throughput())
            .fold(0.0, f64::max);
        // Headroom above the highest point; also keeps the y range
        // non-degenerate if every sample were zero.
        let y_top = (y_max * 1.05).max(1.0);

        let root = SVGBackend::new(&self.output, self.size).into_drawing_area();
        root.fill(&WHITE).map_err(chart_err)?;

        // The legend lives outside the plot area, in a strip on the right.
        let split_at = self.size.0.saturating_sub(LEGEND_WIDTH).max(1) as i32;
        let (plot, legend) = root.split_horizontally(split_at);

        let mut chart = ChartBuilder::on(&plot)
            .margin(10)
            .x_label_area_size(50)
            .y_label_area_size(70)
            .build_cartesian_2d(0u32..x_max + 1, 0f64..y_top)
            .map_err(chart_err)?;

        chart
            .configure_mesh()
            .x_desc(self.x_desc.as_str())
            .y_desc(self.y_desc.as_str())
            .axis_desc_style(("sans-serif", 20).into_font())
            .label_style(("sans-serif", 14).into_font())
            .draw()
            .map_err(chart_err)?;

        for (i, (s, style)) in series.iter().enumerate() {
            let color = style.color;
            match style.marker {
                Marker::Circle => {
                    chart
                        .draw_series(s.records.iter().map(|r| {
                            Circle::new((r.threads, r.throughput), POINT_SIZE, color.filled())
                        }))
                        .map_err(chart_err)?;
                }
                Marker::Triangle => {
                    chart
                        .draw_series(s.records.iter().map(|r| {
                            TriangleMarker::new(
                                (r.threads, r.throughput),
                                POINT_SIZE + 1,
                                color.filled(),
                            )
                        }))
                        .map_err(chart_err)?;
                }
            }

            let y = 40 + i as i32 * 28;
            match style.marker {
                Marker::Circle => legend
                    .draw(&Circle::new((18, y), POINT_SIZE, color.filled()))
                    .map_err(chart_err)?,
                Marker::Triangle => legend
                    .draw(&TriangleMarker::new((18, y), POINT_SIZE + 1, color.filled()))
                    .map_err(chart_err)?,
            }
            legend
                .draw(&Text::new(
                    s.label.clone(),
                    (32, y - 8),
                    ("sans-serif", 18).into_font(),
                ))
                .map_err(chart_err)?;
        }

        root.present().map_err(chart_err)?;
        Ok(())
    }
}

/// The two standard charts, one per queue configuration.
pub fn default_charts<P: AsRef<Path>, Q: AsRef<Path>>(data_dir: P, out_dir: Q) -> Vec<ChartSpec> {
    let data = data_dir.as_ref();
    let out = out_dir.as_ref();
    vec![
        ChartSpec::new(out.join("unbounded.svg"))
            .input(data.join("alt_unbounded.csv"), SeriesStyle::circle(RED))
            .input(data.join("std_unbounded.csv"), SeriesStyle::triangle(BLUE)),
        ChartSpec::new(out.join("rendezvous.svg"))
            .input(data.join("alt_rendezvous.csv"), SeriesStyle::circle(RED))
            .input(data.join("std_rendezvous.csv"), SeriesStyle::triangle(BLUE)),
    ]
}

fn chart_err<E: std::error::Error + Send + Sync>(e: DrawingAreaErrorKind<E>) -> Error {
    Error::Chart(e.to_string())
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs;
    use std::path::Path;

    // alt: three records, std: two, so the marker counts differ and tests
    // can tell the two series apart in the rendered output.
    fn write_fixtures(dir: &Path) {
        fs::write(
            dir.join("alt.csv"),
            "threads,alt\n1,120.0\n2,210.0\n4,330.5\n",
        )
        .unwrap();
        fs::write(dir.join("std.csv"), "threads,std\n1,80.0\n2,95.5\n").unwrap();
    }

    fn spec(dir: &Path, out: &str) -> ChartSpec {
        ChartSpec::new(dir.join(out))
            .input(dir.join("alt.csv"), SeriesStyle::circle(RED))
            .input(dir.join("std.csv"), SeriesStyle::triangle(BLUE))
    }

    #[test]
    fn point_count_matches_rows() {
        let dir = tempfile::tempdir().unwrap();
        write_fixtures(dir.path());
        spec(dir.path(), "chart.svg").render().unwrap();

        let svg = fs::read_to_string(dir.path().join("chart.svg")).unwrap();
        // One marker per CSV row, plus one marker in the legend.
        assert_eq!(svg.matches("<circle").count(), 3 + 1);
        assert_eq!(svg.matches("<polygon").count(), 2 + 1);
    }

    #[test]
    fn axis_labels_and_legend_titles() {
        let dir = tempfile::tempdir().unwrap();
        write_fixtures(dir.path());
        spec(dir.path(), "chart.svg").render().unwrap();

        let svg = fs::read_to_string(dir.path().join("chart.svg")).unwrap();
        assert!(svg.contains("Sender Threads"));
        assert!(svg.contains("Throughput (messages/millisecond)"));
        assert!(svg.contains("alt</text>"));
        assert!(svg.contains("std</text>"));
    }

    #[test]
    fn render_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        write_fixtures(dir.path());
        let spec = spec(dir.path(), "chart.svg");

        spec.render().unwrap();
        let first = fs::read(dir.path().join("chart.svg")).unwrap();
        spec.render().unwrap();
        let second = fs::read(dir.path().join("chart.svg")).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn swapping_inputs_swaps_series_not_axes() {
        let dir = tempfile::tempdir().unwrap();
        write_fixtures(dir.path());

        spec(dir.path(), "normal.svg").render().unwrap();
        ChartSpec::new(dir.path().join("swapped.svg"))
            .input(dir.path().join("std.csv"), SeriesStyle::circle(RED))
            .input(dir.path().join("alt.csv"), SeriesStyle::triangle(BLUE))
            .render()
            .unwrap();

        let normal = fs::read_to_string(dir.path().join("normal.svg")).unwrap();
        let swapped = fs::read_to_string(dir.path().join("swapped.svg")).unwrap();

        // The circle marker now belongs to the two-row series.
        assert_eq!(normal.matches("<circle").count(), 3 + 1);
        assert_eq!(swapped.matches("<circle").count(), 2 + 1);
        assert_eq!(swapped.matches("<polygon").count(), 3 + 1);
        // Axis labels are untouched by the swap.
        for svg in [&normal, &swapped].iter() {
            assert!(svg.contains("Sender Threads"));
            assert!(svg.contains("Throughput (messages/millisecond)"));
        }
    }

    #[test]
    fn missing_input_aborts_render() {
        let dir = tempfile::tempdir().unwrap();
        write_fixtures(dir.path());
        let res = ChartSpec::new(dir.path().join("chart.svg"))
            .input(dir.path().join("alt.csv"), SeriesStyle::circle(RED))
            .input(dir.path().join("missing.csv"), SeriesStyle::triangle(BLUE))
            .render();
        assert!(res.is_err());
    }

    #[test]
    fn default_chart_set() {
        let charts = default_charts("data", "out");
        assert_eq!(charts.len(), 2);
        assert_eq!(charts[0].output, Path::new("out").join("unbounded.svg"));
        assert_eq!(charts[1].output, Path::new("out").join("rendezvous.svg"));
        for c in &charts {
            assert_eq!(c.size, CHART_SIZE);
            assert_eq!(c.inputs.len(), 2);
        }
    }
}
