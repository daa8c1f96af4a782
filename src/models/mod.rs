//! Thermal network models.
//!
//! - `foster`: step-response evaluation for parallel RC networks
//! - `cauer`: ladder networks and their conversion to Foster form

pub mod cauer;
pub mod foster;

pub use cauer::*;
pub use foster::*;
