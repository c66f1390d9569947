// PNG figure renderer built on plotters
use crate::application::figure_renderer::FigureRenderer;
use crate::domain::figure::{FigureSpec, X_AXIS_LABEL, YScale};
use crate::domain::series::Trend;
use crate::infrastructure::config::FigureConfig;
use plotters::coord::Shift;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::ranged1d::Ranged;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use std::error::Error;
use std::path::Path;

const REFERENCE_LINE: RGBColor = RGBColor(128, 128, 128);
const MARKER_RADIUS: i32 = 4;

/// Drawable parts of one trend, in data coordinates (x = bits).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrendGeometry {
    /// Connected runs; a missing or unplottable value starts a new run.
    pub lines: Vec<Vec<(f64, f64)>>,
    /// One marker per visible data point.
    pub markers: Vec<(f64, f64)>,
    /// Data points above the visible cap of a log plot.
    pub hidden: usize,
}

#[derive(Debug, Clone)]
pub struct PlottersRenderer {
    size: FigureConfig,
}

impl PlottersRenderer {
    pub fn new(size: FigureConfig) -> Self {
        Self { size }
    }

    fn draw(
        &self,
        spec: &FigureSpec,
        geometry: &TrendGeometry,
        (x_lo, x_hi): (f64, f64),
        path: &Path,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        let root = BitMapBackend::new(path, (self.size.width, self.size.height)).into_drawing_area();
        root.fill(&WHITE)?;
        let color = RGBColor(spec.color.0, spec.color.1, spec.color.2);

        // Bit depth is drawn mirrored so the finest quantization sits on the left.
        let x_range = -x_hi..-x_lo;
        let mirrored_label = |x: &f64| format!("{}", (-*x).round() as i64);

        match spec.scale {
            YScale::Linear => {
                let (y_lo, y_hi) = linear_y_range(&geometry.markers);
                let mut chart = chart_builder(&root).build_cartesian_2d(x_range, y_lo..y_hi)?;

                chart
                    .configure_mesh()
                    .x_desc(X_AXIS_LABEL)
                    .y_desc(spec.y_label)
                    .x_labels(16)
                    .x_label_formatter(&mirrored_label)
                    .draw()?;

                draw_trend(&mut chart, geometry, color)?;
            }
            YScale::Log { cap } => {
                let y_lo = log_y_floor(&geometry.markers, cap);
                let mut chart =
                    chart_builder(&root).build_cartesian_2d(x_range, (y_lo..cap).log_scale())?;

                chart
                    .configure_mesh()
                    .x_desc(X_AXIS_LABEL)
                    .y_desc(spec.y_label)
                    .x_labels(16)
                    .x_label_formatter(&mirrored_label)
                    .y_label_formatter(&|y: &f64| format!("{:.0e}", y))
                    .draw()?;

                chart.draw_series(LineSeries::new(
                    vec![(-x_hi, cap), (-x_lo, cap)],
                    REFERENCE_LINE.stroke_width(1),
                ))?;
                draw_trend(&mut chart, geometry, color)?;
            }
        }

        root.present()?;
        Ok(())
    }
}

impl FigureRenderer for PlottersRenderer {
    fn render(&self, spec: &FigureSpec, trend: &Trend<'_>, path: &Path) -> anyhow::Result<()> {
        let points: Vec<(f64, Option<f64>)> = trend.points().collect();
        let geometry = trend_geometry(&points, spec.scale);

        if geometry.hidden > 0 {
            tracing::warn!(
                "{} of {} {} {} values lie above the visible range",
                geometry.hidden,
                points.len(),
                spec.channel.file_label(),
                spec.metric.file_label()
            );
        }

        self.draw(spec, &geometry, x_range(&points), path)
            .map_err(|e| anyhow::anyhow!(e).context("plotting error"))
    }
}

fn chart_builder<'a, 'b, 'c>(
    root: &'a DrawingArea<BitMapBackend<'c>, Shift>,
) -> ChartBuilder<'a, 'b, BitMapBackend<'c>> {
    let mut builder = ChartBuilder::on(root);
    builder.margin(20).x_label_area_size(50).y_label_area_size(80);
    builder
}

fn draw_trend<Y>(
    chart: &mut ChartContext<'_, BitMapBackend<'_>, Cartesian2d<RangedCoordf64, Y>>,
    geometry: &TrendGeometry,
    color: RGBColor,
) -> Result<(), Box<dyn Error + Send + Sync>>
where
    Y: Ranged<ValueType = f64>,
{
    for run in &geometry.lines {
        chart.draw_series(LineSeries::new(
            run.iter().map(|&(x, y)| (-x, y)),
            color.stroke_width(2),
        ))?;
    }
    chart.draw_series(
        geometry
            .markers
            .iter()
            .map(|&(x, y)| Circle::new((-x, y), MARKER_RADIUS, color.filled())),
    )?;
    Ok(())
}

/// Split a trend into drawable runs and markers. Missing or non-finite values
/// (and non-positive ones on a log axis) leave gaps. On a log axis, points
/// above the cap are hidden and the segments reaching them are cut at the cap.
pub fn trend_geometry(points: &[(f64, Option<f64>)], scale: YScale) -> TrendGeometry {
    let mut geometry = TrendGeometry::default();
    let mut run: Vec<(f64, f64)> = Vec::new();
    let mut prev: Option<(f64, f64)> = None;

    let cap = match scale {
        YScale::Linear => None,
        YScale::Log { cap } => Some(cap),
    };

    for &(x, value) in points {
        let plottable = value.filter(|v| v.is_finite() && (cap.is_none() || *v > 0.0));
        let Some(y) = plottable else {
            flush(&mut geometry.lines, &mut run);
            prev = None;
            continue;
        };

        match (cap, prev) {
            (Some(cap), Some(p)) if y > cap && p.1 <= cap => {
                run.push(log_crossing(p, (x, y), cap));
                flush(&mut geometry.lines, &mut run);
            }
            (Some(cap), Some(p)) if y <= cap && p.1 > cap => {
                run.push(log_crossing(p, (x, y), cap));
            }
            _ => {}
        }

        if cap.is_some_and(|cap| y > cap) {
            geometry.hidden += 1;
        } else {
            run.push((x, y));
            geometry.markers.push((x, y));
        }
        prev = Some((x, y));
    }

    flush(&mut geometry.lines, &mut run);
    geometry
}

fn flush(lines: &mut Vec<Vec<(f64, f64)>>, run: &mut Vec<(f64, f64)>) {
    if !run.is_empty() {
        lines.push(std::mem::take(run));
    }
}

/// Point where the segment a-b crosses `cap`, interpolated in log space.
fn log_crossing(a: (f64, f64), b: (f64, f64), cap: f64) -> (f64, f64) {
    let t = (cap.ln() - a.1.ln()) / (b.1.ln() - a.1.ln());
    (a.0 + t * (b.0 - a.0), cap)
}

/// Bit-depth extent padded by half a step on each side.
pub fn x_range(points: &[(f64, Option<f64>)]) -> (f64, f64) {
    let lo = points.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
    let hi = points.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max);
    if lo.is_finite() && hi.is_finite() {
        (lo - 0.5, hi + 0.5)
    } else {
        (0.5, 15.5)
    }
}

/// Data extent with 5% headroom; degenerate extents are widened by one unit.
pub fn linear_y_range(markers: &[(f64, f64)]) -> (f64, f64) {
    let lo = markers.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
    let hi = markers.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    if (hi - lo).abs() < f64::EPSILON {
        return (lo - 1.0, hi + 1.0);
    }
    let pad = (hi - lo) * 0.05;
    (lo - pad, hi + pad)
}

/// Lower bound of a log axis: the decade at or below the smallest visible
/// value, strictly below `cap`.
pub fn log_y_floor(markers: &[(f64, f64)], cap: f64) -> f64 {
    let lo = markers.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
    if !lo.is_finite() || lo <= 0.0 {
        return cap / 10.0;
    }
    let floor = 10f64.powf(lo.log10().floor());
    if floor >= cap { cap / 10.0 } else { floor }
}
