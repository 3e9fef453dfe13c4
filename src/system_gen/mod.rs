// Random dense linear system generator and its text format.
//
// File format: N lines, each N coefficients followed by the constant term,
// separated by single spaces, fixed number of fractional digits.

pub mod generator;
pub mod system;

pub use generator::{GenerationStats, SystemGenerator};
pub use system::{LinearSystem, read_system};
