// Timing analysis core: measured runs, derived scaling series, summary stats.
// Pure computation only; charts and console text live elsewhere.

pub mod record;
pub mod derived;
pub mod summary;

pub use derived::DerivedSeries;
pub use record::TimingRecord;
pub use summary::{AmdahlEstimate, PerformanceSummary};
