//! Report generator flow: validate → load → derive → render ×5.
//!
//! `analyze` and `render_charts` are separate steps so the caller can report
//! what was loaded before any chart is drawn.
//!
//! The existence check runs before anything touches the filesystem, so a
//! missing input never leaves an output directory or a partial chart behind.
//! Printing is the binary's job; this returns everything it needs.

use std::fs::create_dir_all;

use log::{info, warn};

use crate::charts::{self, ChartData, RenderReport};
use crate::timing::{DerivedSeries, PerformanceSummary, TimingRecord};
use crate::utils::{
    config::ReportConfig,
    error::{PerfError, Result},
};

/// Results of one report run. `charts` holds one outcome per chart.
#[derive(Debug)]
pub struct ReportRun {
    pub record: TimingRecord,
    pub series: DerivedSeries,
    pub summary: PerformanceSummary,
    pub charts: RenderReport,
}

/// Fails with `MissingInput` before reading anything if the CSV is absent.
pub fn validate_input(config: &ReportConfig) -> Result<()> {
    if !config.input_exists() {
        warn!("Input {} does not exist", config.input_path.display());
        return Err(PerfError::MissingInput { path: config.input_path.clone() });
    }
    Ok(())
}

/// Load and derive only; no files are written.
pub fn analyze(config: &ReportConfig) -> Result<(TimingRecord, DerivedSeries, PerformanceSummary)> {
    validate_input(config)?;

    let record = TimingRecord::load(&config.input_path)?;
    let (series, summary) = PerformanceSummary::from_record(&record);
    Ok((record, series, summary))
}

/// Creates `output_dir` and attempts all five charts. Chart failures do not
/// abort; they are collected in the returned report.
pub fn render_charts(
    config: &ReportConfig,
    record: &TimingRecord,
    series: &DerivedSeries,
    summary: &PerformanceSummary,
) -> Result<RenderReport> {
    create_dir_all(&config.output_dir).map_err(|e| PerfError::io(&config.output_dir, e))?;

    let data = ChartData { record, series, summary };
    let charts = charts::render_all(&config.output_dir, &data);

    info!(
        "Rendered {}/{} charts into {}",
        charts.produced().count(),
        charts.outcomes.len(),
        config.output_dir.display()
    );

    Ok(charts)
}

/// `analyze` followed by `render_charts`. Inspect `ReportRun::charts` to
/// decide whether the run succeeded.
pub fn run_report(config: &ReportConfig) -> Result<ReportRun> {
    let (record, series, summary) = analyze(config)?;
    let charts = render_charts(config, &record, &series, &summary)?;
    Ok(ReportRun { record, series, summary, charts })
}
