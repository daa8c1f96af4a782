//! Log-spaced time grids.
//!
//! Thermal step responses span many decades of time, so both the chart axis and
//! the evaluation grid are logarithmic.

use crate::error::ZthError;

/// Lower bound used when a degenerate range is widened below a tiny `tmin`.
pub const GRID_FLOOR: f64 = 1e-12;

/// Largest accepted grid resolution.
pub const MAX_GRID_POINTS: usize = 1_000_000;

/// Generate `steps` log-spaced points between `min` and `max` (inclusive).
///
/// The endpoints are returned exactly as given.
pub fn log_space(min: f64, max: f64, steps: usize) -> Result<Vec<f64>, ZthError> {
    if !(2..=MAX_GRID_POINTS).contains(&steps) {
        return Err(ZthError::InvalidGridSize(steps));
    }
    if !(min.is_finite() && max.is_finite() && min > 0.0 && max > min) {
        return Err(ZthError::InvalidInput(format!(
            "Invalid grid range: min={min}, max={max} (must be finite, >0, and max>min)."
        )));
    }

    let ln_min = min.ln();
    let ln_max = max.ln();
    let step = (ln_max - ln_min) / (steps as f64 - 1.0);

    let mut out = Vec::with_capacity(steps);
    out.push(min);
    for i in 1..steps - 1 {
        out.push((ln_min + step * i as f64).exp());
    }
    out.push(max);
    Ok(out)
}

/// Grid bounds for measured times in `[tmin, tmax]`.
///
/// A zero-width range (all samples at one time) is widened one decade each way
/// so the chart still spans a visible range. The upper bound saturates at
/// `f64::MAX`.
pub fn grid_bounds(tmin: f64, tmax: f64) -> (f64, f64) {
    if tmin == tmax {
        let lo = (tmin / 10.0).max(GRID_FLOOR);
        let hi = (tmax * 10.0).min(f64::MAX);
        // A value below the floor would otherwise collapse the range again.
        (lo, if hi > lo { hi } else { lo * 100.0 })
    } else {
        (tmin, tmax)
    }
}
