//! Reads a generated system back and checks its shape.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use log::debug;

use crate::utils::error::{PerfError, Result};

/// Augmented matrix `[A | b]` of an `N`-equation system.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearSystem {
    pub size: usize,
    /// Row-major, `size` rows of `size` coefficients.
    pub coefficients: Vec<Vec<f64>>,
    pub constants: Vec<f64>,
}

impl LinearSystem {
    /// Parses `N` lines of `N + 1` whitespace-separated reals. `N` is taken
    /// from the first line; blank lines are not allowed.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut coefficients = Vec::new();
        let mut constants = Vec::new();
        let mut columns = None;

        for (i, line) in reader.lines().enumerate() {
            let line_no = i + 1;
            let line = line.map_err(|e| PerfError::MalformedSystem {
                line: line_no,
                reason: e.to_string(),
            })?;

            let mut values = line
                .split_whitespace()
                .map(|tok| {
                    tok.parse::<f64>().map_err(|_| PerfError::MalformedSystem {
                        line: line_no,
                        reason: format!("'{}' is not a number", tok),
                    })
                })
                .collect::<Result<Vec<f64>>>()?;

            let expected = *columns.get_or_insert(values.len());
            if expected < 2 {
                return Err(PerfError::MalformedSystem {
                    line: line_no,
                    reason: "a row needs at least one coefficient and a constant".into(),
                });
            }
            if values.len() != expected {
                return Err(PerfError::MalformedSystem {
                    line: line_no,
                    reason: format!("expected {} values, found {}", expected, values.len()),
                });
            }

            constants.push(values.pop().unwrap_or_default());
            coefficients.push(values);
        }

        let size = match columns {
            Some(c) => c - 1,
            None => {
                return Err(PerfError::MalformedSystem { line: 0, reason: "file is empty".into() });
            }
        };

        if coefficients.len() != size {
            return Err(PerfError::MalformedSystem {
                line: coefficients.len(),
                reason: format!("{} rows of {} values is not square", coefficients.len(), size + 1),
            });
        }

        Ok(Self { size, coefficients, constants })
    }

    /// Every value lies inside `[lo, hi]`.
    pub fn within(&self, lo: f64, hi: f64) -> bool {
        self.coefficients
            .iter()
            .flatten()
            .chain(self.constants.iter())
            .all(|v| (lo..=hi).contains(v))
    }
}

pub fn read_system(path: &Path) -> Result<LinearSystem> {
    let file = File::open(path).map_err(|e| PerfError::io(path, e))?;
    let system = LinearSystem::from_reader(BufReader::new(file))?;
    debug!("Read {}x{} system from {}", system.size, system.size + 1, path.display());
    Ok(system)
}
