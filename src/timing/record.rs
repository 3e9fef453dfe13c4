//! Timing record: one row per measured run (process count, wall time).
//!
//! Loaded once from the CSV produced by the external timing program and
//! immutable afterwards. Row 0 is the sequential baseline every derived
//! series divides by.

use std::{fs::File, io::Read, path::Path};

use log::{info, warn};
use serde::Deserialize;

use crate::utils::error::{PerfError, Result};

/// CSV row as written by the timing program: `Processes,Time`.
/// Extra columns are ignored.
#[derive(Debug, Deserialize)]
struct TimingRow {
    #[serde(rename = "Processes", alias = "processes")]
    processes: u32,
    #[serde(rename = "Time", alias = "time")]
    time: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimingRecord {
    processes: Vec<u32>,
    times: Vec<f64>,
}

impl TimingRecord {
    /// Builds a record from in-memory `(processes, seconds)` pairs.
    pub fn from_rows(rows: impl IntoIterator<Item = (u32, f64)>) -> Result<Self> {
        let mut record = Self { processes: Vec::new(), times: Vec::new() };
        for (i, (processes, time)) in rows.into_iter().enumerate() {
            // Line numbers as they would appear in a CSV with a header.
            record.push(processes, time, i as u64 + 2)?;
        }
        record.finish("timing rows")
    }

    /// Reads and validates the CSV at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| PerfError::io(path, e))?;
        let record = Self::from_csv_reader(file, path)?;

        info!(
            "Loaded {} data points from {} (processes {}..={})",
            record.len(),
            path.display(),
            record.min_processes(),
            record.max_processes()
        );

        Ok(record)
    }

    /// Parses CSV text from any reader; `origin` only labels errors.
    pub fn from_csv_reader<R: Read>(reader: R, origin: &Path) -> Result<Self> {
        let csv_err = |source| PerfError::Csv { path: origin.to_path_buf(), source };

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers = reader.headers().map_err(csv_err)?.clone();

        let mut record = Self { processes: Vec::new(), times: Vec::new() };
        for result in reader.records() {
            let row = result.map_err(csv_err)?;
            let line = row.position().map(|p| p.line()).unwrap_or_default();
            let parsed: TimingRow = row.deserialize(Some(&headers)).map_err(csv_err)?;
            record.push(parsed.processes, parsed.time, line)?;
        }

        record.finish(&origin.display().to_string())
    }

    fn push(&mut self, processes: u32, time: f64, line: u64) -> Result<()> {
        if processes == 0 {
            return Err(PerfError::InvalidRow {
                line,
                reason: "process count must be positive".into(),
            });
        }
        if !time.is_finite() || time <= 0.0 {
            return Err(PerfError::InvalidRow {
                line,
                reason: format!("time must be a positive number of seconds, got {}", time),
            });
        }

        self.processes.push(processes);
        self.times.push(time);
        Ok(())
    }

    fn finish(self, origin: &str) -> Result<Self> {
        if self.processes.is_empty() {
            return Err(PerfError::EmptyRecord { origin: origin.to_string() });
        }

        // Accepted as-is: the baseline is whatever row 0 holds.
        if self.processes[0] != 1 {
            warn!(
                "{}: first row has {} processes; it is still used as the sequential baseline",
                origin, self.processes[0]
            );
        }
        if self.processes.windows(2).any(|w| w[1] <= w[0]) {
            warn!("{}: process counts are not strictly increasing", origin);
        }

        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    /// Never true for a record built by `load` or `from_rows`.
    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    pub fn processes(&self) -> &[u32] {
        &self.processes
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn baseline_time(&self) -> f64 {
        self.times[0]
    }

    /// Process count of the last row (the largest tested configuration).
    pub fn max_processes(&self) -> u32 {
        self.processes[self.processes.len() - 1]
    }

    pub fn min_processes(&self) -> u32 {
        self.processes.iter().copied().min().unwrap_or_default()
    }

    /// `(processes, seconds)` pairs in file order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.processes.iter().copied().zip(self.times.iter().copied())
    }

    /// `(processes as f64, value)` points for plotting a derived series.
    pub fn points<'a>(&'a self, values: &'a [f64]) -> impl Iterator<Item = (f64, f64)> + 'a {
        self.processes.iter().map(|&p| p as f64).zip(values.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<TimingRecord> {
        TimingRecord::from_csv_reader(text.as_bytes(), Path::new("timing_manual.csv"))
    }

    #[test]
    fn parses_header_and_rows() {
        let record = parse("Processes,Time\n1,8.0\n2,4.5\n4,2.5\n").unwrap();
        assert_eq!(record.processes(), &[1, 2, 4]);
        assert_eq!(record.times(), &[8.0, 4.5, 2.5]);
        assert_eq!(record.baseline_time(), 8.0);
        assert_eq!(record.max_processes(), 4);
    }

    #[test]
    fn ignores_extra_columns_and_whitespace() {
        let record = parse("Run, Processes , Time\na, 1 , 3.0\nb, 2 , 1.6\n").unwrap();
        assert_eq!(record.processes(), &[1, 2]);
        assert_eq!(record.times(), &[3.0, 1.6]);
    }

    #[test]
    fn accepts_lowercase_headers() {
        let record = parse("processes,time\n1,2.0\n").unwrap();
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn missing_column_is_a_csv_error() {
        let err = parse("Processes,Seconds\n1,2.0\n").unwrap_err();
        assert!(matches!(err, PerfError::Csv { .. }), "{err}");
    }

    #[test]
    fn unparsable_value_is_a_csv_error() {
        let err = parse("Processes,Time\n1,fast\n").unwrap_err();
        assert!(matches!(err, PerfError::Csv { .. }), "{err}");
    }

    #[test]
    fn header_only_file_is_empty() {
        let err = parse("Processes,Time\n").unwrap_err();
        assert!(matches!(err, PerfError::EmptyRecord { .. }));
    }

    #[test]
    fn rejects_non_positive_values_with_line_number() {
        match parse("Processes,Time\n1,2.0\n0,1.0\n").unwrap_err() {
            PerfError::InvalidRow { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error: {other}"),
        }
        assert!(matches!(
            parse("Processes,Time\n1,0.0\n").unwrap_err(),
            PerfError::InvalidRow { line: 2, .. }
        ));
        assert!(TimingRecord::from_rows([(1, -1.0)]).is_err());
    }

    #[test]
    fn unordered_processes_are_accepted() {
        let record = TimingRecord::from_rows([(2, 4.0), (1, 8.0)]).unwrap();
        assert_eq!(record.baseline_time(), 4.0);
        assert_eq!(record.min_processes(), 1);
        assert_eq!(record.max_processes(), 1);
    }
}
