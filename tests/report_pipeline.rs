use std::fs;

use approx::assert_relative_eq;
use parallel_perf::charts::ChartKind;
use parallel_perf::utils::{
    config::ReportConfig,
    error::PerfError,
    report::{analyze, render_charts, run_report},
};
use tempfile::TempDir;

const SAMPLE_CSV: &str = "\
Processes,Time
1,8.0
2,4.4
4,2.5
8,1.6
";

fn config_with(dir: &TempDir, csv: &str) -> ReportConfig {
    let input = dir.path().join("timing_manual.csv");
    fs::write(&input, csv).unwrap();
    ReportConfig::new(input, dir.path().join("plots"))
}

#[test]
fn full_run_writes_all_five_charts() {
    let dir = TempDir::new().unwrap();
    let config = config_with(&dir, SAMPLE_CSV);

    let run = run_report(&config).unwrap();
    assert!(run.charts.is_complete());

    for kind in ChartKind::ALL {
        let path = config.output_file(kind.file_name());
        let svg = fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"), "{} is not an SVG", path.display());
    }

    let chart = |kind: ChartKind| fs::read_to_string(config.output_file(kind.file_name())).unwrap();

    let time = chart(ChartKind::ExecutionTime);
    assert!(time.contains("Optimal: n=8"));
    assert!(time.contains("Max cores tested (8)"));

    assert!(chart(ChartKind::Speedup).contains("Efficiency at n=8: 62.5%"));

    let efficiency = chart(ChartKind::Efficiency);
    assert!(efficiency.contains("Ideal Efficiency (100%)"));
    assert!(efficiency.contains("Good Efficiency (80%)"));

    let combined = chart(ChartKind::Combined);
    for field in [
        "Baseline Time",
        "Best Time",
        "Optimal Processes",
        "Max Speedup",
        "Best Efficiency",
        "Efficiency at Max n",
        "Processes Tested",
    ] {
        assert!(combined.contains(field), "summary table lacks {field}");
    }

    let overhead = chart(ChartKind::Overhead);
    assert!(overhead.contains("<polygon"), "overhead region is not shaded");
    assert!(overhead.contains("Ideal Time (No Overhead)"));

    assert_eq!(run.summary.optimal_processes, 8);
    assert_relative_eq!(run.summary.max_speedup, 5.0, epsilon = 1e-12);
    assert_relative_eq!(run.series.efficiency[3], 62.5, epsilon = 1e-9);

    let amdahl = run.summary.amdahl.expect("estimate with four rows");
    assert_relative_eq!(amdahl.theoretical_max_speedup, 5.0, epsilon = 1e-12);
    assert_relative_eq!(amdahl.parallel_fraction + amdahl.serial_fraction, 1.0, epsilon = 1e-12);
}

#[test]
fn analysis_writes_nothing_until_charts_are_rendered() {
    let dir = TempDir::new().unwrap();
    let config = config_with(&dir, SAMPLE_CSV);

    let (record, series, summary) = analyze(&config).unwrap();
    assert_eq!(record.len(), 4);
    assert!(!config.output_dir.exists());

    let charts = render_charts(&config, &record, &series, &summary).unwrap();
    assert_eq!(charts.into_result().unwrap().len(), 5);
}

#[test]
fn missing_input_creates_nothing() {
    let dir = TempDir::new().unwrap();
    let config = ReportConfig::new(dir.path().join("absent.csv"), dir.path().join("plots"));

    let err = run_report(&config).unwrap_err();
    assert!(matches!(err, PerfError::MissingInput { .. }));
    assert!(!config.output_dir.exists());
}

#[test]
fn malformed_value_aborts_before_rendering() {
    let dir = TempDir::new().unwrap();
    let config = config_with(&dir, "Processes,Time\n1,8.0\n2,fast\n");

    let err = run_report(&config).unwrap_err();
    assert!(matches!(err, PerfError::Csv { .. }), "got {err:?}");
    assert!(!config.output_dir.exists());
}

#[test]
fn non_positive_time_is_rejected_with_its_line() {
    let dir = TempDir::new().unwrap();
    let config = config_with(&dir, "Processes,Time\n1,8.0\n2,0\n");

    match analyze(&config) {
        Err(PerfError::InvalidRow { line, .. }) => assert_eq!(line, 3),
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn header_only_file_is_empty() {
    let dir = TempDir::new().unwrap();
    let config = config_with(&dir, "Processes,Time\n");

    assert!(matches!(analyze(&config), Err(PerfError::EmptyRecord { .. })));
}

#[test]
fn single_row_still_renders_without_estimate() {
    let dir = TempDir::new().unwrap();
    let config = config_with(&dir, "Processes,Time\n1,3.0\n");

    let run = run_report(&config).unwrap();
    assert!(run.summary.amdahl.is_none());
    assert_relative_eq!(run.series.speedup[0], 1.0);
    assert_relative_eq!(run.series.overhead[0], 0.0);
    assert_eq!(run.charts.into_result().unwrap().len(), 5);
}

#[test]
fn extra_columns_and_padding_are_tolerated() {
    let dir = TempDir::new().unwrap();
    let config = config_with(&dir, "Processes, Time, Note\n 1 , 2.0 , base\n 2 , 1.0 , x\n");

    let (record, series, _) = analyze(&config).unwrap();
    assert_eq!(record.processes(), &[1, 2]);
    assert_relative_eq!(series.speedup[1], 2.0);
}
