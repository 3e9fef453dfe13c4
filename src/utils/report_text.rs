//! Console text for the report generator: load banner, analysis report,
//! missing-input help and the generated-files listing.
//!
//! Everything here returns a `String`; printing is left to the binary.

use std::path::{Path, PathBuf};

use crate::charts::ChartKind;
use crate::timing::{PerformanceSummary, TimingRecord};

const RULE_WIDTH: usize = 60;

pub fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Remediation text shown when the timing CSV does not exist.
pub fn missing_input_help(path: &Path) -> String {
    let mut out = String::new();
    out.push_str(&format!("Error: {} not found!\n", path.display()));
    out.push_str("\nPlease run the timing program first so it can write the measurements,\n");
    out.push_str("for example:\n");
    out.push_str("  gcc -o man_made man_made.c\n");
    out.push_str("  ./man_made\n");
    out.push_str("\nOr run it over a larger range for more meaningful results:\n");
    out.push_str("  echo '1000000 10000000' | ./man_made\n");
    out
}

/// Summary of what was loaded: row count, process range, time range.
pub fn load_banner(record: &TimingRecord, path: &Path) -> String {
    let times = record.times();
    let lo = times.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = times.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let mut out = String::new();
    out.push_str(&format!("Loaded {} data points from {}\n", record.len(), path.display()));
    out.push_str(&format!(
        "  Processes tested: {} to {}\n",
        record.min_processes(),
        record.max_processes()
    ));
    out.push_str(&format!("  Time range: {:.6}s to {:.6}s\n", lo, hi));
    out
}

/// Full text report. The Amdahl section says "not computed" for a
/// single-row record.
pub fn analysis_report(s: &PerformanceSummary) -> String {
    let mut out = String::new();

    out.push_str(&format!("\n{}\n", rule()));
    out.push_str("PERFORMANCE ANALYSIS REPORT\n");
    out.push_str(&format!("{}\n", rule()));

    out.push_str("\nEXECUTION TIME ANALYSIS:\n");
    out.push_str(&line("Sequential (n=1):", format!("{:.6} seconds", s.baseline_time)));
    out.push_str(&line("Best Time:", format!("{:.6} seconds", s.best_time)));
    out.push_str(&line("Optimal Processes:", s.optimal_processes));
    out.push_str(&line("Worst Time:", format!("{:.6} seconds", s.worst_time)));

    out.push_str("\nSPEEDUP ANALYSIS:\n");
    out.push_str(&line("Maximum Speedup:", format!("{:.2}x", s.max_speedup)));
    out.push_str(&line(
        &format!("Speedup at n={}:", s.max_processes),
        format!("{:.2}x", s.final_speedup),
    ));
    out.push_str(&line("Average Speedup:", format!("{:.2}x", s.avg_speedup)));

    out.push_str("\nEFFICIENCY ANALYSIS:\n");
    out.push_str(&line("Best Efficiency:", format!("{:.1}%", s.best_efficiency)));
    out.push_str(&line(
        &format!("Efficiency at n={}:", s.max_processes),
        format!("{:.1}%", s.final_efficiency),
    ));
    out.push_str(&line("Average Efficiency:", format!("{:.1}%", s.avg_efficiency)));

    out.push_str("\nAMDAHL'S LAW ESTIMATION:\n");
    match &s.amdahl {
        Some(a) => {
            out.push_str(&line("Estimated Parallel:", format!("{:.1}%", a.parallel_fraction * 100.0)));
            out.push_str(&line("Estimated Sequential:", format!("{:.1}%", a.serial_fraction * 100.0)));
            out.push_str(&line(
                "Theoretical Max:",
                format!("{:.2}x speedup", a.theoretical_max_speedup),
            ));
        }
        None => out.push_str("  Not computed (needs at least two measurements)\n"),
    }

    out.push_str(&format!("\n{}\n", rule()));
    out
}

// Label column is 22 wide so values line up.
fn line(label: &str, value: impl std::fmt::Display) -> String {
    format!("  {:<22}{}\n", label, value)
}

/// Numbered list of the charts that were written.
pub fn generated_files(produced: &[(ChartKind, PathBuf)]) -> String {
    let mut out = String::from("\nGenerated files:\n");
    for (i, (kind, path)) in produced.iter().enumerate() {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        out.push_str(&format!("  {}. {:<30} - {}\n", i + 1, name, kind.description()));
    }
    out
}
