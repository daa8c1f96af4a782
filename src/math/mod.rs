//! Mathematical utilities: exponential basis and log-spaced grids.

pub mod basis;
pub mod grid;

pub use basis::*;
pub use grid::*;
