//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - validated numeric sequences (`NumericSeries`)
//! - the two thermal network forms (`FosterNetwork`, `CauerNetwork`)
//! - the assembled comparison result (`CurveBundle`)

pub mod types;

pub use types::*;
