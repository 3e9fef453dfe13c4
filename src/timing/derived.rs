//! Derived scaling series, all relative to the baseline row:
//!
//! - speedup          `T0 / Ti`
//! - efficiency       `speedup / n * 100`
//! - ideal time       `T0 / n`
//! - overhead         `Ti - ideal`
//! - overhead percent `overhead / ideal * 100`

use crate::timing::record::TimingRecord;

#[derive(Debug, Clone, PartialEq)]
pub struct DerivedSeries {
    pub speedup: Vec<f64>,
    /// Percent.
    pub efficiency: Vec<f64>,
    pub ideal_time: Vec<f64>,
    pub overhead: Vec<f64>,
    /// Percent of the ideal time.
    pub overhead_percent: Vec<f64>,
}

impl DerivedSeries {
    pub fn compute(record: &TimingRecord) -> Self {
        let t0 = record.baseline_time();
        let n = record.len();

        let mut series = Self {
            speedup: Vec::with_capacity(n),
            efficiency: Vec::with_capacity(n),
            ideal_time: Vec::with_capacity(n),
            overhead: Vec::with_capacity(n),
            overhead_percent: Vec::with_capacity(n),
        };

        for (processes, time) in record.iter() {
            let p = processes as f64;
            let speedup = t0 / time;
            let ideal = t0 / p;
            let overhead = time - ideal;

            series.speedup.push(speedup);
            series.efficiency.push(speedup / p * 100.0);
            series.ideal_time.push(ideal);
            series.overhead.push(overhead);
            series.overhead_percent.push(overhead / ideal * 100.0);
        }

        series
    }

    /// Ideal (linear) speedup equals the process count.
    pub fn ideal_speedup(record: &TimingRecord) -> Vec<f64> {
        record.processes().iter().map(|&p| p as f64).collect()
    }

    pub fn final_speedup(&self) -> f64 {
        self.speedup[self.speedup.len() - 1]
    }

    pub fn final_efficiency(&self) -> f64 {
        self.efficiency[self.efficiency.len() - 1]
    }
}
