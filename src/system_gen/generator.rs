//! Writes an `N × (N+1)` system of independently sampled values.
//!
//! Rows are sampled and written one at a time, so memory stays at one row
//! regardless of `N`. An existing output file is overwritten.

use std::{
    fs::File,
    io::{BufWriter, Write},
    ops::RangeInclusive,
    path::PathBuf,
    time::Instant,
};

use log::{debug, info};
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::utils::{
    config::{GeneratorConfig, grid_bounds},
    error::{PerfError, Result},
};

/// Rounds to `precision` fractional digits (half away from zero).
pub fn round_to(value: f64, precision: usize) -> f64 {
    let factor = 10f64.powi(precision as i32);
    (value * factor).round() / factor
}

/// One row: `columns` values uniform in `range`, rounded to `precision`.
///
/// Rounded values are kept inside `range` by snapping to the nearest value
/// that is exact at `precision`. `range` must pass
/// [`GeneratorConfig::validate`]; an unsampleable range panics in `rand`.
pub fn sample_row<R: Rng + ?Sized>(
    rng: &mut R,
    columns: usize,
    range: &RangeInclusive<f64>,
    precision: usize,
) -> Vec<f64> {
    let (lo, hi) = grid_bounds(range, precision).unwrap_or((*range.start(), *range.end()));
    (0..columns)
        .map(|_| round_to(rng.random_range(range.clone()), precision).clamp(lo, hi))
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationStats {
    pub path: PathBuf,
    pub rows: usize,
    pub columns: usize,
    pub elapsed_ms: u128,
}

pub struct SystemGenerator {
    config: GeneratorConfig,
    rng: StdRng,
}

impl SystemGenerator {
    /// Validates the config and seeds the RNG (fixed seed or OS entropy).
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => {
                debug!("Seeding generator with {}", seed);
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_os_rng(),
        };

        Ok(Self { config, rng })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn next_row(&mut self) -> Vec<f64> {
        sample_row(
            &mut self.rng,
            self.config.columns(),
            &self.config.sample_range,
            self.config.precision,
        )
    }

    /// Streams all `N` rows to `out`.
    pub fn write_to<W: Write>(&mut self, out: &mut W) -> std::io::Result<()> {
        let precision = self.config.precision;
        let mut line = String::new();

        for _ in 0..self.config.size {
            line.clear();
            for (i, value) in self.next_row().into_iter().enumerate() {
                if i > 0 {
                    line.push(' ');
                }
                line.push_str(&format!("{:.*}", precision, value));
            }
            line.push('\n');
            out.write_all(line.as_bytes())?;
        }

        Ok(())
    }

    /// Writes the system to `config.output_path`, replacing any existing file.
    pub fn generate(&mut self) -> Result<GenerationStats> {
        let path = self.config.output_path.clone();
        let start = Instant::now();

        let file = File::create(&path).map_err(|e| PerfError::io(&path, e))?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer).map_err(|e| PerfError::io(&path, e))?;
        writer.flush().map_err(|e| PerfError::io(&path, e))?;

        let stats = GenerationStats {
            path,
            rows: self.config.size,
            columns: self.config.columns(),
            elapsed_ms: start.elapsed().as_millis(),
        };

        info!(
            "Wrote {}x{} system to {} in {} ms",
            stats.rows,
            stats.columns,
            stats.path.display(),
            stats.elapsed_ms
        );

        Ok(stats)
    }
}
