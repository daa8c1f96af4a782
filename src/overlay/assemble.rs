//! Single-pass curve assembly.
//!
//! Every validation rule runs before any numeric work, so a failing request
//! never yields a partial bundle.

use log::debug;

use crate::domain::{CauerNetwork, CurveBundle, FosterNetwork, NetworkKind, NumericSeries};
use crate::error::ZthError;
use crate::math::{MAX_GRID_POINTS, grid_bounds, log_space};
use crate::models::{cauer_to_foster, step_response};

/// Grid resolution used when the caller does not ask for one.
pub const DEFAULT_GRID_POINTS: usize = 450;

/// Parsed inputs for one overlay computation.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveInputs {
    pub tp_actual: NumericSeries,
    pub zth_actual: NumericSeries,
    pub foster_r: NumericSeries,
    pub foster_c: NumericSeries,
    pub cauer_r: NumericSeries,
    pub cauer_c: NumericSeries,
    /// Requested stage count. Signed so that `0` and negatives reach validation.
    pub order: i64,
    pub n_grid: usize,
}

/// The networks actually evaluated, after truncation to `order`.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayModels {
    pub foster: FosterNetwork,
    pub cauer: CauerNetwork,
    /// Foster equivalent of `cauer`, used to evaluate the ladder.
    pub cauer_equivalent: FosterNetwork,
}

/// Everything computed for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub order: usize,
    pub bundle: CurveBundle,
    pub models: OverlayModels,
}

/// Compute the comparison bundle.
pub fn compute_curves(inputs: &CurveInputs) -> Result<CurveBundle, ZthError> {
    compute_overlay(inputs).map(|overlay| overlay.bundle)
}

/// Compute the comparison bundle together with the evaluated networks.
pub fn compute_overlay(inputs: &CurveInputs) -> Result<Overlay, ZthError> {
    // 1) Measured points: pairing, positivity, ascending order.
    if inputs.tp_actual.len() != inputs.zth_actual.len() {
        return Err(ZthError::ShapeMismatch {
            tp: inputs.tp_actual.len(),
            zth: inputs.zth_actual.len(),
        });
    }
    if let Some((index, &value)) = inputs.tp_actual.iter().enumerate().find(|(_, t)| **t <= 0.0) {
        return Err(ZthError::NonPositiveTime { index, value });
    }
    let (tp_actual, zth_actual) = sort_by_time(&inputs.tp_actual, &inputs.zth_actual);

    // 2) Order and truncation, then network construction.
    let order = validate_order(inputs.order)?;
    let (foster_r, foster_c) =
        truncate_stages(NetworkKind::Foster, order, &inputs.foster_r, &inputs.foster_c)?;
    let (cauer_r, cauer_c) =
        truncate_stages(NetworkKind::Cauer, order, &inputs.cauer_r, &inputs.cauer_c)?;
    let foster = FosterNetwork::new(foster_r, foster_c)?;
    let cauer = CauerNetwork::new(cauer_r, cauer_c)?;

    if inputs.n_grid < 2 || inputs.n_grid > MAX_GRID_POINTS {
        return Err(ZthError::InvalidGridSize(inputs.n_grid));
    }

    // 3) Shared grid.
    let (tmin, tmax) = grid_bounds(tp_actual.min(), tp_actual.max());
    let tp_grid = log_space(tmin, tmax, inputs.n_grid)?;
    debug!(
        "order={order} grid=[{tmin:e}, {tmax:e}] x{} points={}",
        tp_grid.len(),
        tp_actual.len()
    );

    // 4) Evaluate both models on the grid.
    let zth_foster = step_response(&foster, &tp_grid);
    let cauer_equivalent = cauer_to_foster(&cauer)?;
    let zth_cauer = step_response(&cauer_equivalent, &tp_grid);

    Ok(Overlay {
        order,
        bundle: CurveBundle {
            tp_actual,
            zth_actual,
            tp_grid: NumericSeries::from_computed(tp_grid),
            zth_foster: NumericSeries::from_computed(zth_foster),
            zth_cauer: NumericSeries::from_computed(zth_cauer),
        },
        models: OverlayModels {
            foster,
            cauer,
            cauer_equivalent,
        },
    })
}

/// Check `order >= 1` and convert it to a stage count.
pub fn validate_order(order: i64) -> Result<usize, ZthError> {
    if order < 1 {
        return Err(ZthError::InvalidOrder(order));
    }
    usize::try_from(order).map_err(|_| ZthError::InvalidOrder(order))
}

/// Keep only the first `order` stages of an R/C pair.
///
/// Extra supplied stages are ignored; too few is an error.
pub fn truncate_stages<'a>(
    network: NetworkKind,
    order: usize,
    r: &'a [f64],
    c: &'a [f64],
) -> Result<(&'a [f64], &'a [f64]), ZthError> {
    if r.len() < order || c.len() < order {
        return Err(ZthError::InsufficientStages {
            network,
            order,
            r_len: r.len(),
            c_len: c.len(),
        });
    }
    Ok((&r[..order], &c[..order]))
}

/// Sort measured points by time, carrying each `zth` with its `tp`.
fn sort_by_time(tp: &NumericSeries, zth: &NumericSeries) -> (NumericSeries, NumericSeries) {
    let mut idx: Vec<usize> = (0..tp.len()).collect();
    idx.sort_by(|&a, &b| tp[a].total_cmp(&tp[b]));
    let tp_sorted = idx.iter().map(|&i| tp[i]).collect();
    let zth_sorted = idx.iter().map(|&i| zth[i]).collect();
    (
        NumericSeries::from_computed(tp_sorted),
        NumericSeries::from_computed(zth_sorted),
    )
}
