//! `zth-curves` library crate.
//!
//! Compares measured transient thermal impedance (Zth vs pulse time) with the
//! step responses of a Foster network and a Cauer ladder. The binary (`zth`)
//! is a thin wrapper around this library so that:
//!
//! - the numeric core is testable without spawning processes
//! - front-ends (CLI, TUI, batch) share one pipeline

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod models;
pub mod overlay;
pub mod plot;
pub mod report;
pub mod tui;
