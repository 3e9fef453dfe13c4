//! Chart artifacts for a timing analysis.
//!
//! Five SVG files with fixed names, each rendered independently from the same
//! record/series/summary. `render_all` attempts every chart and reports each
//! outcome; one failing chart never stops the others.

pub mod panels;

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use log::{debug, error, info, warn};
use plotters::prelude::*;

use crate::timing::{DerivedSeries, PerformanceSummary, TimingRecord};
use crate::utils::error::{PerfError, Result};
use panels::{Area, Detail, DrawResult, FONT};

const PLOT_WIDTH: u32 = 1000;
const PLOT_HEIGHT: u32 = 600;
const COMBINED_SIZE: (u32, u32) = (1400, 1000);
const OVERHEAD_SIZE: (u32, u32) = (1400, 560);

/// Everything a chart needs, borrowed from one analysis run.
#[derive(Debug, Clone, Copy)]
pub struct ChartData<'a> {
    pub record: &'a TimingRecord,
    pub series: &'a DerivedSeries,
    pub summary: &'a PerformanceSummary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    ExecutionTime,
    Speedup,
    Efficiency,
    Combined,
    Overhead,
}

impl ChartKind {
    pub const ALL: [ChartKind; 5] = [
        ChartKind::ExecutionTime,
        ChartKind::Speedup,
        ChartKind::Efficiency,
        ChartKind::Combined,
        ChartKind::Overhead,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            ChartKind::ExecutionTime => "plot1_execution_time.svg",
            ChartKind::Speedup => "plot2_speedup.svg",
            ChartKind::Efficiency => "plot3_efficiency.svg",
            ChartKind::Combined => "plot4_combined_analysis.svg",
            ChartKind::Overhead => "plot5_overhead_analysis.svg",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ChartKind::ExecutionTime => "Time vs Processes",
            ChartKind::Speedup => "Speedup analysis",
            ChartKind::Efficiency => "Efficiency analysis",
            ChartKind::Combined => "Comprehensive view",
            ChartKind::Overhead => "Overhead analysis",
        }
    }

    fn size(&self) -> (u32, u32) {
        match self {
            ChartKind::Combined => COMBINED_SIZE,
            ChartKind::Overhead => OVERHEAD_SIZE,
            _ => (PLOT_WIDTH, PLOT_HEIGHT),
        }
    }

    fn draw(&self, root: &Area, data: &ChartData) -> DrawResult {
        match self {
            ChartKind::ExecutionTime => panels::draw_execution_time(root, data, Detail::Full),
            ChartKind::Speedup => panels::draw_speedup(root, data, Detail::Full),
            ChartKind::Efficiency => panels::draw_efficiency(root, data, Detail::Full),
            ChartKind::Combined => draw_combined(root, data),
            ChartKind::Overhead => draw_overhead(root, data),
        }
    }
}

/// 2x2 grid: time, speedup, efficiency, summary table.
fn draw_combined(root: &Area, data: &ChartData) -> DrawResult {
    let inner = root.titled("Comprehensive Performance Analysis", (FONT, 28))?;
    let cells = inner.split_evenly((2, 2));

    panels::draw_execution_time(&cells[0], data, Detail::Compact)?;
    panels::draw_speedup(&cells[1], data, Detail::Compact)?;
    panels::draw_efficiency(&cells[2], data, Detail::Compact)?;
    panels::draw_summary_table(&cells[3], data)
}

/// Side by side: actual vs ideal time (shaded overhead), overhead percent.
fn draw_overhead(root: &Area, data: &ChartData) -> DrawResult {
    let inner = root.titled("Overhead Analysis: Impact of Process Management", (FONT, 24))?;
    let (width, _) = inner.dim_in_pixel();
    let (left, right) = inner.split_horizontally(width / 2);

    panels::draw_overhead_time(&left, data)?;
    panels::draw_overhead_percent(&right, data)
}

/// Renders one chart into `out_dir` and returns the written path. A chart
/// that fails leaves no file behind.
pub fn render_chart(kind: ChartKind, out_dir: &Path, data: &ChartData) -> Result<PathBuf> {
    let path = out_dir.join(kind.file_name());
    debug!("Rendering {:?} to {}", kind, path.display());

    if let Err(source) = draw_to_file(kind, &path, data) {
        discard_partial(&path);
        return Err(PerfError::Render { chart: kind.file_name(), source });
    }

    info!("Saved chart {}", path.display());
    Ok(path)
}

// The backend flushes whatever was drawn when it is dropped, so `root` must
// be gone before the caller inspects the file.
fn draw_to_file(kind: ChartKind, path: &Path, data: &ChartData) -> DrawResult {
    let root = SVGBackend::new(path, kind.size()).into_drawing_area();
    root.fill(&WHITE)?;
    kind.draw(&root, data)?;
    root.present()
}

/// Removes a half-written chart. A file that was never created is fine.
fn discard_partial(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => warn!("Removed partial chart {}", path.display()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => warn!("Could not remove partial chart {}: {}", path.display(), e),
    }
}

/// Outcome of one `render_all` call, in `ChartKind::ALL` order.
#[derive(Debug)]
pub struct RenderReport {
    pub outcomes: Vec<(ChartKind, Result<PathBuf>)>,
}

impl RenderReport {
    pub fn produced(&self) -> impl Iterator<Item = (ChartKind, &PathBuf)> {
        self.outcomes
            .iter()
            .filter_map(|(kind, r)| r.as_ref().ok().map(|p| (*kind, p)))
    }

    pub fn failures(&self) -> impl Iterator<Item = (ChartKind, &PerfError)> {
        self.outcomes
            .iter()
            .filter_map(|(kind, r)| r.as_ref().err().map(|e| (*kind, e)))
    }

    pub fn is_complete(&self) -> bool {
        self.outcomes.iter().all(|(_, r)| r.is_ok())
    }

    /// `Ok` only when every chart was produced.
    pub fn into_result(self) -> Result<Vec<PathBuf>> {
        let total = self.outcomes.len();
        let failed = self.failures().count();
        if failed > 0 {
            return Err(PerfError::ChartsFailed { failed, total });
        }
        Ok(self.outcomes.into_iter().filter_map(|(_, r)| r.ok()).collect())
    }
}

/// Attempts all five charts; failures are logged and collected.
pub fn render_all(out_dir: &Path, data: &ChartData) -> RenderReport {
    let outcomes = ChartKind::ALL
        .iter()
        .map(|&kind| {
            let outcome = render_chart(kind, out_dir, data);
            if let Err(e) = &outcome {
                error!("{}", e);
            }
            (kind, outcome)
        })
        .collect();

    RenderReport { outcomes }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn file_names_are_fixed_and_distinct() {
        let names: Vec<_> = ChartKind::ALL.iter().map(|k| k.file_name()).collect();
        assert_eq!(
            names,
            vec![
                "plot1_execution_time.svg",
                "plot2_speedup.svg",
                "plot3_efficiency.svg",
                "plot4_combined_analysis.svg",
                "plot5_overhead_analysis.svg",
            ]
        );
    }

    #[test]
    fn report_fails_if_any_chart_failed() {
        let report = RenderReport {
            outcomes: vec![
                (ChartKind::ExecutionTime, Ok(PathBuf::from("a.svg"))),
                (
                    ChartKind::Speedup,
                    Err(PerfError::InvalidConfig("boom".into())),
                ),
            ],
        };
        assert!(!report.is_complete());
        assert_eq!(report.produced().count(), 1);
        match report.into_result() {
            Err(PerfError::ChartsFailed { failed, total }) => assert_eq!((failed, total), (1, 2)),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn failed_chart_leaves_no_file() {
        let record = TimingRecord::from_rows([(1, 8.0), (2, 4.5), (4, 2.5)]).unwrap();
        let (series, summary) = PerformanceSummary::from_record(&record);
        let data = ChartData { record: &record, series: &series, summary: &summary };

        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("not-created");

        let err = render_chart(ChartKind::Speedup, &missing, &data).unwrap_err();
        assert!(matches!(err, PerfError::Render { chart: "plot2_speedup.svg", .. }));
        assert!(!missing.join(ChartKind::Speedup.file_name()).exists());
    }

    #[test]
    fn discard_partial_removes_leftovers() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plot1_execution_time.svg");
        fs::write(&path, "<svg").unwrap();

        discard_partial(&path);
        assert!(!path.exists());

        // Already gone: nothing to do.
        discard_partial(&path);
    }
}
