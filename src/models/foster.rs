//! Foster network evaluation.
//!
//! A Foster network is a sum of independent first-order modes, so the step
//! response for a unit power step is
//!
//! ```text
//! Zth(t) = Σ R[i] · (1 - exp(-t / τ[i])),   τ[i] = R[i] · C[i]
//! ```

use crate::domain::FosterNetwork;
use crate::math::saturation;

/// Evaluate `Zth(t)` at a single time point.
pub fn zth_at(network: &FosterNetwork, t: f64) -> f64 {
    network
        .stages()
        .map(|stage| stage.r * saturation(t, stage.tau()))
        .sum()
}

/// Evaluate `Zth(t)` for every time point in `times`.
///
/// The output is index-aligned with `times`.
pub fn step_response(network: &FosterNetwork, times: &[f64]) -> Vec<f64> {
    times.iter().map(|&t| zth_at(network, t)).collect()
}

/// Laplace-domain impedance `Z(s) = Σ R[i] / (1 + s·τ[i])` for real `s ≥ 0`.
pub fn foster_impedance(network: &FosterNetwork, s: f64) -> f64 {
    network
        .stages()
        .map(|stage| stage.r / (1.0 + s * stage.tau()))
        .sum()
}
