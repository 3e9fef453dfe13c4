//! Aggregate statistics over a timing record and its derived series,
//! plus the Amdahl's-law decomposition printed in the console report and
//! shown in the combined chart's summary table.

use statrs::statistics::Statistics;

use crate::timing::{derived::DerivedSeries, record::TimingRecord};

/// Parallel/serial split inferred from the best observed speedup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmdahlEstimate {
    /// `p = (s_max - 1) / s_max`
    pub parallel_fraction: f64,
    /// `1 - p`
    pub serial_fraction: f64,
    /// `1 / (1 - p)`
    pub theoretical_max_speedup: f64,
}

impl AmdahlEstimate {
    /// Estimate from the best speedup; `None` when `s_max` is not a positive
    /// finite number.
    pub fn from_max_speedup(max_speedup: f64) -> Option<Self> {
        if !max_speedup.is_finite() || max_speedup <= 0.0 {
            return None;
        }

        let parallel_fraction = (max_speedup - 1.0) / max_speedup;
        let serial_fraction = 1.0 - parallel_fraction;

        Some(Self {
            parallel_fraction,
            serial_fraction,
            theoretical_max_speedup: 1.0 / serial_fraction,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceSummary {
    pub samples: usize,
    pub baseline_time: f64,
    pub best_time: f64,
    pub worst_time: f64,
    /// Process count of the fastest run (first one on ties).
    pub optimal_processes: u32,
    /// Process count of the last row.
    pub max_processes: u32,
    pub min_processes: u32,

    pub max_speedup: f64,
    pub final_speedup: f64,
    pub avg_speedup: f64,

    pub best_efficiency: f64,
    pub final_efficiency: f64,
    pub avg_efficiency: f64,

    /// Not computed for a single-row record.
    pub amdahl: Option<AmdahlEstimate>,
}

impl PerformanceSummary {
    pub fn compute(record: &TimingRecord, series: &DerivedSeries) -> Self {
        let times = record.times();

        // First minimum wins, matching argmin semantics.
        let mut best_idx = 0;
        for (i, &t) in times.iter().enumerate() {
            if t < times[best_idx] {
                best_idx = i;
            }
        }

        let max_speedup = Statistics::max(series.speedup.iter());

        let amdahl = if record.len() > 1 {
            AmdahlEstimate::from_max_speedup(max_speedup)
        } else {
            None
        };

        Self {
            samples: record.len(),
            baseline_time: record.baseline_time(),
            best_time: times[best_idx],
            worst_time: Statistics::max(times.iter()),
            optimal_processes: record.processes()[best_idx],
            max_processes: record.max_processes(),
            min_processes: record.min_processes(),

            max_speedup,
            final_speedup: series.final_speedup(),
            avg_speedup: series.speedup.iter().mean(),

            best_efficiency: Statistics::max(series.efficiency.iter()),
            final_efficiency: series.final_efficiency(),
            avg_efficiency: series.efficiency.iter().mean(),

            amdahl,
        }
    }

    /// Convenience for callers that only hold the record.
    pub fn from_record(record: &TimingRecord) -> (DerivedSeries, Self) {
        let series = DerivedSeries::compute(record);
        let summary = Self::compute(record, &series);
        (series, summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn summary_for_reference_record() {
        let record = TimingRecord::from_rows([(1, 8.0), (2, 4.5), (4, 2.5)]).unwrap();
        let (_, s) = PerformanceSummary::from_record(&record);

        assert_eq!(s.samples, 3);
        assert_eq!(s.baseline_time, 8.0);
        assert_eq!(s.best_time, 2.5);
        assert_eq!(s.worst_time, 8.0);
        assert_eq!(s.optimal_processes, 4);
        assert_eq!(s.max_processes, 4);
        assert_abs_diff_eq!(s.max_speedup, 3.2, epsilon = 1e-12);
        assert_abs_diff_eq!(s.final_speedup, 3.2, epsilon = 1e-12);
        assert_abs_diff_eq!(s.avg_speedup, (1.0 + 8.0 / 4.5 + 3.2) / 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(s.best_efficiency, 100.0, epsilon = 1e-9);
        assert_abs_diff_eq!(s.final_efficiency, 80.0, epsilon = 1e-9);

        let amdahl = s.amdahl.expect("estimate for multi-row record");
        assert_abs_diff_eq!(amdahl.parallel_fraction, 2.2 / 3.2, epsilon = 1e-12);
        assert_abs_diff_eq!(amdahl.serial_fraction, 1.0 / 3.2, epsilon = 1e-12);
        assert_abs_diff_eq!(amdahl.theoretical_max_speedup, 3.2, epsilon = 1e-9);
    }

    #[test]
    fn single_row_skips_amdahl() {
        let record = TimingRecord::from_rows([(1, 5.0)]).unwrap();
        let (series, s) = PerformanceSummary::from_record(&record);

        assert_eq!(series.speedup, vec![1.0]);
        assert!(s.amdahl.is_none());
        assert_eq!(s.best_time, 5.0);
        assert_eq!(s.optimal_processes, 1);
        assert_abs_diff_eq!(s.avg_efficiency, 100.0, epsilon = 1e-12);
    }

    #[test]
    fn optimal_point_is_first_minimum() {
        let record = TimingRecord::from_rows([(1, 6.0), (2, 3.0), (3, 3.0), (4, 3.5)]).unwrap();
        let (_, s) = PerformanceSummary::from_record(&record);

        assert_eq!(s.optimal_processes, 2);
        assert_eq!(s.max_processes, 4);
        assert_abs_diff_eq!(s.final_speedup, 6.0 / 3.5, epsilon = 1e-12);
    }

    #[test]
    fn slowdown_still_yields_finite_estimate() {
        // Every parallel run slower than the baseline: s_max stays at 1.0.
        let record = TimingRecord::from_rows([(1, 2.0), (2, 2.5)]).unwrap();
        let (_, s) = PerformanceSummary::from_record(&record);
        let amdahl = s.amdahl.unwrap();

        assert_eq!(amdahl.parallel_fraction, 0.0);
        assert_eq!(amdahl.serial_fraction, 1.0);
        assert_eq!(amdahl.theoretical_max_speedup, 1.0);
    }

    #[test]
    fn amdahl_rejects_degenerate_speedup() {
        assert!(AmdahlEstimate::from_max_speedup(0.0).is_none());
        assert!(AmdahlEstimate::from_max_speedup(f64::NAN).is_none());
    }
}
