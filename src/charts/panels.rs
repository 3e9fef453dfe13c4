//! Individual chart panels drawn onto an SVG drawing area.
//!
//! Each panel comes in a `Full` variant (standalone chart with legend and
//! annotations) and a `Compact` variant used inside the 2x2 composite.

use std::{io, ops::Range};

use plotters::{
    coord::{Shift, types::RangedCoordf64},
    prelude::*,
};

use crate::charts::ChartData;
use crate::timing::DerivedSeries;

pub type Area<'a> = DrawingArea<SVGBackend<'a>, Shift>;
pub type DrawResult<T = ()> = Result<T, DrawingAreaErrorKind<io::Error>>;
type Chart<'a, 'b> = ChartContext<'a, SVGBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

pub const FONT: &str = "sans-serif";

const DARK_GREEN: RGBColor = RGBColor(0, 128, 0);
const ORANGE: RGBColor = RGBColor(255, 165, 0);
const HEADER_GREEN: RGBColor = RGBColor(0x4C, 0xAF, 0x50);
const STRIPE_GREY: RGBColor = RGBColor(0xF0, 0xF0, 0xF0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detail {
    Full,
    Compact,
}

impl Detail {
    fn caption_size(self) -> u32 {
        match self {
            Detail::Full => 22,
            Detail::Compact => 16,
        }
    }

    fn marker_size(self) -> u32 {
        match self {
            Detail::Full => 5,
            Detail::Compact => 3,
        }
    }
}

/// Axis range padded by `frac` of the span on both sides. A zero-width span
/// (single data point) is widened around the value so the axis stays valid.
pub fn padded_range(min: f64, max: f64, frac: f64) -> Range<f64> {
    let span = max - min;
    if span <= f64::EPSILON * max.abs().max(1.0) {
        let pad = if min != 0.0 { min.abs() * 0.5 } else { 0.5 };
        return (min - pad)..(max + pad);
    }
    let pad = span * frac;
    (min - pad)..(max + pad)
}

fn min_max(values: impl IntoIterator<Item = f64>) -> (f64, f64) {
    values
        .into_iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)))
}

fn process_axis(data: &ChartData) -> Range<f64> {
    let (lo, hi) = min_max(data.record.processes().iter().map(|&p| p as f64));
    padded_range(lo, hi, 0.05)
}

/// Horizontal reference line across the full x range.
fn h_line(x: &Range<f64>, y: f64, style: ShapeStyle) -> PathElement<(f64, f64)> {
    PathElement::new(vec![(x.start, y), (x.end, y)], style)
}

fn legend_line(style: ShapeStyle) -> impl Fn((i32, i32)) -> PathElement<(i32, i32)> {
    move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style)
}

fn draw_legend<'a, 'b: 'a>(chart: &mut Chart<'a, 'b>, position: SeriesLabelPosition) -> DrawResult {
    chart
        .configure_series_labels()
        .position(position)
        .label_font((FONT, 13))
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
}

/// Execution time vs process count; marks the fastest run and, in full
/// detail, the largest tested process count.
pub fn draw_execution_time(area: &Area, data: &ChartData, detail: Detail) -> DrawResult {
    let summary = data.summary;
    let points: Vec<(f64, f64)> = data.record.points(data.record.times()).collect();

    let x_range = process_axis(data);
    let (lo, hi) = min_max(points.iter().map(|p| p.1));
    let y_range = padded_range(lo, hi, 0.1);

    let caption = match detail {
        Detail::Full => "Execution Time vs Number of Processes",
        Detail::Compact => "Execution Time",
    };

    let mut chart = ChartBuilder::on(area)
        .caption(caption, (FONT, detail.caption_size()))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range.clone(), y_range.clone())?;

    chart
        .configure_mesh()
        .x_desc("Number of Processes (n)")
        .y_desc("Execution Time (seconds)")
        .x_label_formatter(&|v| format!("{:.0}", v))
        .y_label_formatter(&|v| format!("{:.4}", v))
        .draw()?;

    let line = BLUE.stroke_width(2);
    chart
        .draw_series(LineSeries::new(points.iter().copied(), line))?
        .label("Execution Time")
        .legend(legend_line(line));
    chart.draw_series(points.iter().map(|&p| Circle::new(p, detail.marker_size(), BLUE.filled())))?;

    let optimal = (summary.optimal_processes as f64, summary.best_time);
    chart
        .draw_series(std::iter::once(Circle::new(optimal, detail.marker_size() * 2, RED.filled())))?
        .label(format!(
            "Optimal: n={}, t={:.4}s",
            summary.optimal_processes, summary.best_time
        ))
        .legend(|(x, y)| Circle::new((x + 10, y), 5, RED.filled()));

    if detail == Detail::Full {
        let max_n = summary.max_processes as f64;
        let style = DARK_GREEN.stroke_width(2);
        chart
            .draw_series(std::iter::once(PathElement::new(
                vec![(max_n, y_range.start), (max_n, y_range.end)],
                style,
            )))?
            .label(format!("Max cores tested ({})", summary.max_processes))
            .legend(legend_line(style));

        draw_legend(&mut chart, SeriesLabelPosition::UpperRight)?;
    }

    Ok(())
}

/// Actual vs ideal (linear) speedup; full detail annotates the efficiency
/// reached at the largest process count.
pub fn draw_speedup(area: &Area, data: &ChartData, detail: Detail) -> DrawResult {
    let record = data.record;
    let series = data.series;
    let ideal = DerivedSeries::ideal_speedup(record);

    let actual: Vec<(f64, f64)> = record.points(&series.speedup).collect();
    let linear: Vec<(f64, f64)> = record.points(&ideal).collect();

    let x_range = process_axis(data);
    let (lo, hi) = min_max(actual.iter().chain(linear.iter()).map(|p| p.1));
    // Headroom above the last point for the annotation box.
    let y_range = padded_range(lo.min(0.0), hi * 1.25, 0.05);

    let caption = match detail {
        Detail::Full => "Speedup Analysis: Actual vs Ideal",
        Detail::Compact => "Speedup Analysis",
    };

    let mut chart = ChartBuilder::on(area)
        .caption(caption, (FONT, detail.caption_size()))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range.clone(), y_range)?;

    chart
        .configure_mesh()
        .x_desc("Number of Processes (n)")
        .y_desc("Speedup (T1/Tn)")
        .x_label_formatter(&|v| format!("{:.0}", v))
        .y_label_formatter(&|v| format!("{:.1}", v))
        .draw()?;

    let actual_color = match detail {
        Detail::Full => BLUE,
        Detail::Compact => DARK_GREEN,
    };
    let actual_style = actual_color.stroke_width(2);
    chart
        .draw_series(LineSeries::new(actual.iter().copied(), actual_style))?
        .label(match detail {
            Detail::Full => "Actual Speedup",
            Detail::Compact => "Actual",
        })
        .legend(legend_line(actual_style));
    chart.draw_series(
        actual
            .iter()
            .map(|&p| Circle::new(p, detail.marker_size(), actual_color.filled())),
    )?;

    let ideal_style = RED.stroke_width(2);
    chart
        .draw_series(LineSeries::new(linear.iter().copied(), ideal_style))?
        .label(match detail {
            Detail::Full => "Ideal Speedup (Linear)",
            Detail::Compact => "Ideal",
        })
        .legend(legend_line(ideal_style));

    if detail == Detail::Full {
        let last = actual[actual.len() - 1];
        let anchor = (last.0 * 0.7, last.1 * 1.2);
        let label_style = (FONT, 14).into_font().color(&DARK_GREEN);

        chart.draw_series(std::iter::once(PathElement::new(
            vec![anchor, last],
            DARK_GREEN.stroke_width(2),
        )))?;
        chart.draw_series(std::iter::once(Text::new(
            format!(
                "Efficiency at n={}: {:.1}%",
                data.summary.max_processes, data.summary.final_efficiency
            ),
            anchor,
            label_style,
        )))?;
    }

    draw_legend(&mut chart, SeriesLabelPosition::UpperLeft)
}

/// Efficiency (%) vs process count with the 100% ideal line and, in full
/// detail, the 80% "good efficiency" line.
pub fn draw_efficiency(area: &Area, data: &ChartData, detail: Detail) -> DrawResult {
    let series = data.series;
    let points: Vec<(f64, f64)> = data.record.points(&series.efficiency).collect();

    let x_range = process_axis(data);
    let y_range = match detail {
        Detail::Full => {
            let (_, hi) = min_max(series.efficiency.iter().copied());
            0.0..(hi * 1.1).min(110.0)
        }
        Detail::Compact => {
            let (lo, hi) = min_max(series.efficiency.iter().copied().chain([100.0]));
            padded_range(lo, hi, 0.1)
        }
    };

    let caption = match detail {
        Detail::Full => "Parallel Efficiency: (Speedup/n) x 100%",
        Detail::Compact => "Parallel Efficiency",
    };

    let mut chart = ChartBuilder::on(area)
        .caption(caption, (FONT, detail.caption_size()))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range.clone(), y_range)?;

    chart
        .configure_mesh()
        .x_desc("Number of Processes (n)")
        .y_desc("Parallel Efficiency (%)")
        .x_label_formatter(&|v| format!("{:.0}", v))
        .y_label_formatter(&|v| format!("{:.0}", v))
        .draw()?;

    let color = match detail {
        Detail::Full => DARK_GREEN,
        Detail::Compact => MAGENTA,
    };
    let style = color.stroke_width(2);
    chart
        .draw_series(LineSeries::new(points.iter().copied(), style))?
        .label("Parallel Efficiency")
        .legend(legend_line(style));
    chart.draw_series(points.iter().map(|&p| Circle::new(p, detail.marker_size(), color.filled())))?;

    let ideal = RED.stroke_width(2);
    chart
        .draw_series(std::iter::once(h_line(&x_range, 100.0, ideal)))?
        .label("Ideal Efficiency (100%)")
        .legend(legend_line(ideal));

    if detail == Detail::Full {
        let good = ORANGE.stroke_width(1);
        chart
            .draw_series(std::iter::once(h_line(&x_range, 80.0, good)))?
            .label("Good Efficiency (80%)")
            .legend(legend_line(good));

        draw_legend(&mut chart, SeriesLabelPosition::LowerLeft)?;
    }

    Ok(())
}

/// Metric/value rows shown in the composite's summary panel.
pub fn summary_rows(data: &ChartData) -> Vec<(&'static str, String)> {
    let s = data.summary;
    vec![
        ("Baseline Time (n=1)", format!("{:.4} s", s.baseline_time)),
        ("Best Time", format!("{:.4} s", s.best_time)),
        ("Optimal Processes", s.optimal_processes.to_string()),
        ("Max Speedup", format!("{:.2}x", s.max_speedup)),
        ("Best Efficiency", format!("{:.1}%", s.best_efficiency)),
        ("Efficiency at Max n", format!("{:.1}%", s.final_efficiency)),
        ("Processes Tested", s.samples.to_string()),
    ]
}

/// Two-column summary table with a green header and striped rows.
pub fn draw_summary_table(area: &Area, data: &ChartData) -> DrawResult {
    let (width, height) = area.dim_in_pixel();
    let (w, h) = (width as i32, height as i32);

    area.draw(&Text::new(
        "Performance Summary",
        (w / 2 - 90, 20),
        (FONT, 18).into_font().style(FontStyle::Bold),
    ))?;

    let mut rows = vec![("Metric", "Value".to_string())];
    rows.extend(summary_rows(data));

    let left = w / 10;
    let right = w - w / 10;
    let split = left + (right - left) * 6 / 10;
    let row_h = ((h - 80) / rows.len() as i32).min(36);
    let top = 60;

    for (i, (metric, value)) in rows.iter().enumerate() {
        let y0 = top + i as i32 * row_h;
        let y1 = y0 + row_h;

        let (fill, text_color) = if i == 0 {
            (HEADER_GREEN, WHITE)
        } else if i % 2 == 0 {
            (STRIPE_GREY, BLACK)
        } else {
            (WHITE, BLACK)
        };

        area.draw(&Rectangle::new([(left, y0), (right, y1)], fill.filled()))?;
        area.draw(&Rectangle::new([(left, y0), (right, y1)], BLACK.stroke_width(1)))?;
        area.draw(&PathElement::new(vec![(split, y0), (split, y1)], BLACK.stroke_width(1)))?;

        let font = if i == 0 {
            (FONT, 15).into_font().style(FontStyle::Bold).color(&text_color)
        } else {
            (FONT, 14).into_font().color(&text_color)
        };
        let text_y = y0 + row_h / 2 - 7;
        area.draw(&Text::new(metric.to_string(), (left + 8, text_y), font.clone()))?;
        area.draw(&Text::new(value.clone(), (split + 8, text_y), font))?;
    }

    Ok(())
}

/// Actual vs ideal time with the overhead region shaded between them.
pub fn draw_overhead_time(area: &Area, data: &ChartData) -> DrawResult {
    let record = data.record;
    let actual: Vec<(f64, f64)> = record.points(record.times()).collect();
    let ideal: Vec<(f64, f64)> = record.points(&data.series.ideal_time).collect();

    let x_range = process_axis(data);
    let (lo, hi) = min_max(actual.iter().chain(ideal.iter()).map(|p| p.1));
    let y_range = padded_range(lo.min(0.0), hi, 0.08);

    let mut chart = ChartBuilder::on(area)
        .caption("Actual vs Ideal Execution Time", (FONT, 18))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .x_desc("Number of Processes")
        .y_desc("Time (seconds)")
        .x_label_formatter(&|v| format!("{:.0}", v))
        .y_label_formatter(&|v| format!("{:.4}", v))
        .draw()?;

    // Band between the two curves: ideal forwards, actual backwards.
    let band: Vec<(f64, f64)> = ideal.iter().copied().chain(actual.iter().rev().copied()).collect();
    chart
        .draw_series(std::iter::once(Polygon::new(band, RED.mix(0.3).filled())))?
        .label("Overhead")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], RED.mix(0.3).filled()));

    let actual_style = BLUE.stroke_width(2);
    chart
        .draw_series(LineSeries::new(actual.iter().copied(), actual_style))?
        .label("Actual Time")
        .legend(legend_line(actual_style));
    chart.draw_series(actual.iter().map(|&p| Circle::new(p, 5, BLUE.filled())))?;

    let ideal_style = RED.stroke_width(2);
    chart
        .draw_series(LineSeries::new(ideal.iter().copied(), ideal_style))?
        .label("Ideal Time (No Overhead)")
        .legend(legend_line(ideal_style));

    draw_legend(&mut chart, SeriesLabelPosition::UpperRight)
}

/// Overhead as a percentage of the ideal time.
pub fn draw_overhead_percent(area: &Area, data: &ChartData) -> DrawResult {
    let points: Vec<(f64, f64)> = data.record.points(&data.series.overhead_percent).collect();

    let x_range = process_axis(data);
    let (lo, hi) = min_max(points.iter().map(|p| p.1));
    let y_range = padded_range(lo, hi, 0.1);

    let mut chart = ChartBuilder::on(area)
        .caption("Parallelization Overhead", (FONT, 18))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .x_desc("Number of Processes")
        .y_desc("Overhead (%)")
        .x_label_formatter(&|v| format!("{:.0}", v))
        .y_label_formatter(&|v| format!("{:.1}", v))
        .draw()?;

    chart.draw_series(LineSeries::new(points.iter().copied(), RED.stroke_width(2)))?;
    chart.draw_series(points.iter().map(|&p| Circle::new(p, 5, RED.filled())))?;

    Ok(())
}
