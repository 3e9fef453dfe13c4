//! # Parallel performance tooling
//!
//! Two independent single-shot tools built on one library:
//!
//! - **Report generator** (`analyze` binary): timing CSV → derived speedup /
//!   efficiency / overhead series → five SVG charts + console report.
//! - **System generator** (`gen_system` binary): random dense `N × (N+1)`
//!   linear system → whitespace-delimited text file for an external solver.
//!
//! The numeric core (`timing`) has no graphics dependency; `charts` and
//! `utils::report_text` only present what it computes.

pub mod timing;
pub mod charts;
pub mod system_gen;
pub mod utils;
