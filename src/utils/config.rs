//! Run configuration for both tools.
//!
//! Defaults reproduce the fixed constants the tools have always used; the
//! binaries only override fields the user passes on the command line.

use std::{ops::RangeInclusive, path::PathBuf};

use crate::utils::error::{PerfError, Result};

pub const DEFAULT_INPUT_CSV: &str = "timing_manual.csv";
pub const DEFAULT_SYSTEM_FILE: &str = "input.txt";
pub const DEFAULT_SYSTEM_SIZE: usize = 1000;
pub const DEFAULT_SAMPLE_MIN: f64 = 1.0;
pub const DEFAULT_SAMPLE_MAX: f64 = 10.0;
pub const DEFAULT_PRECISION: usize = 2;

// Keeps the 10^precision rounding factor exact in f64.
const MAX_PRECISION: usize = 10;

/// Where the report generator reads timings and writes its charts.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    pub input_path: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_CSV),
            output_dir: PathBuf::from("."),
        }
    }
}

impl ReportConfig {
    pub fn new(input_path: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_dir: output_dir.into(),
        }
    }

    /// Full path of a chart file inside `output_dir`.
    pub fn output_file(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }

    pub fn input_exists(&self) -> bool {
        self.input_path.is_file()
    }
}

/// Shape and sampling parameters of a generated linear system.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    pub output_path: PathBuf,
    /// Number of equations `N`; each row carries `N + 1` values.
    pub size: usize,
    pub sample_range: RangeInclusive<f64>,
    /// Fractional digits kept after rounding.
    pub precision: usize,
    /// Fixed seed for reproducible output; `None` draws from the OS.
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from(DEFAULT_SYSTEM_FILE),
            size: DEFAULT_SYSTEM_SIZE,
            sample_range: DEFAULT_SAMPLE_MIN..=DEFAULT_SAMPLE_MAX,
            precision: DEFAULT_PRECISION,
            seed: None,
        }
    }
}

impl GeneratorConfig {
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    /// Values per row: `N` coefficients plus the constant term.
    pub fn columns(&self) -> usize {
        self.size + 1
    }

    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(PerfError::InvalidConfig("system size must be at least 1".into()));
        }

        let (lo, hi) = (*self.sample_range.start(), *self.sample_range.end());
        if !lo.is_finite() || !hi.is_finite() || lo > hi {
            return Err(PerfError::InvalidConfig(format!(
                "sample range [{}, {}] is empty or not finite",
                lo, hi
            )));
        }

        // Uniform sampling needs a finite width, not just finite ends.
        if !(hi - lo).is_finite() {
            return Err(PerfError::InvalidConfig(format!(
                "sample range [{}, {}] is too wide to sample",
                lo, hi
            )));
        }

        if self.precision > MAX_PRECISION {
            return Err(PerfError::InvalidConfig(format!(
                "precision {} exceeds the maximum of {}",
                self.precision, MAX_PRECISION
            )));
        }

        if self.grid_bounds().is_none() {
            return Err(PerfError::InvalidConfig(format!(
                "no value with {} fractional digits lies in [{}, {}]",
                self.precision, lo, hi
            )));
        }

        Ok(())
    }

    /// Smallest and largest values of `sample_range` that are exact at
    /// `precision` digits. `None` if the range falls between two steps.
    pub fn grid_bounds(&self) -> Option<(f64, f64)> {
        grid_bounds(&self.sample_range, self.precision)
    }
}

/// See [`GeneratorConfig::grid_bounds`].
pub fn grid_bounds(range: &RangeInclusive<f64>, precision: usize) -> Option<(f64, f64)> {
    let factor = 10f64.powi(precision as i32);
    let (lo, hi) = (*range.start(), *range.end());

    let mut lo_steps = (lo * factor).round();
    if lo_steps / factor < lo {
        lo_steps += 1.0;
    }
    let mut hi_steps = (hi * factor).round();
    if hi_steps / factor > hi {
        hi_steps -= 1.0;
    }

    (lo_steps <= hi_steps).then(|| (lo_steps / factor, hi_steps / factor))
}
