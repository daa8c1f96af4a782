//! Curve assembly: validated inputs in, comparison bundle out.
//!
//! Responsibilities:
//!
//! - validate measured points and requested order (all-or-nothing)
//! - truncate the supplied R/C lists to the requested order
//! - build the shared log-spaced time grid
//! - evaluate the Foster network and the Cauer network's Foster equivalent

pub mod assemble;

pub use assemble::*;
