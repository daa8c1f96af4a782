//! Overlay exports.
//!
//! - JSON payload with the measured points and both curves (`OverlayPayload`)
//! - grid CSV for spreadsheets (`tp_s,zth_foster,zth_cauer`)

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::domain::CurveBundle;
use crate::error::{AppError, EXIT_IO};
use crate::overlay::Overlay;

/// JSON view of a computed overlay.
#[derive(Debug, Clone, Serialize)]
pub struct OverlayPayload<'a> {
    pub order_used: usize,
    pub tp_actual: &'a [f64],
    pub zth_actual: &'a [f64],
    pub tp_grid: &'a [f64],
    pub zth_foster: &'a [f64],
    pub zth_cauer: &'a [f64],
}

impl<'a> OverlayPayload<'a> {
    pub fn new(bundle: &'a CurveBundle, order_used: usize) -> Self {
        Self {
            order_used,
            tp_actual: &bundle.tp_actual,
            zth_actual: &bundle.zth_actual,
            tp_grid: &bundle.tp_grid,
            zth_foster: &bundle.zth_foster,
            zth_cauer: &bundle.zth_cauer,
        }
    }
}

impl<'a> From<&'a Overlay> for OverlayPayload<'a> {
    fn from(overlay: &'a Overlay) -> Self {
        Self::new(&overlay.bundle, overlay.order)
    }
}

/// Summary counts for a computed overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OverlayMeta {
    pub n_points_actual: usize,
    pub n_points_curve: usize,
    pub order_used: usize,
}

impl From<&Overlay> for OverlayMeta {
    fn from(overlay: &Overlay) -> Self {
        Self {
            n_points_actual: overlay.bundle.tp_actual.len(),
            n_points_curve: overlay.bundle.tp_grid.len(),
            order_used: overlay.order,
        }
    }
}

/// Serialize the overlay payload as pretty JSON.
pub fn payload_json(overlay: &Overlay) -> Result<String, AppError> {
    serde_json::to_string_pretty(&OverlayPayload::from(overlay))
        .map_err(|e| AppError::new(EXIT_IO, format!("Failed to serialize overlay JSON: {e}")))
}

/// Write the overlay payload to a JSON file.
pub fn write_payload_json(path: &Path, overlay: &Overlay) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(EXIT_IO, format!("Failed to create overlay JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, &OverlayPayload::from(overlay))
        .map_err(|e| AppError::new(EXIT_IO, format!("Failed to write overlay JSON: {e}")))?;
    Ok(())
}

/// Write the grid and both curves to a CSV file.
pub fn write_curves_csv(path: &Path, bundle: &CurveBundle) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::new(EXIT_IO, format!("Failed to create curve CSV '{}': {e}", path.display())))?;

    writeln!(file, "tp_s,zth_foster,zth_cauer")
        .map_err(|e| AppError::new(EXIT_IO, format!("Failed to write curve CSV header: {e}")))?;

    for ((t, zf), zc) in bundle.tp_grid.iter().zip(bundle.zth_foster.iter()).zip(bundle.zth_cauer.iter()) {
        writeln!(file, "{t:.6e},{zf:.10},{zc:.10}")
            .map_err(|e| AppError::new(EXIT_IO, format!("Failed to write curve CSV row: {e}")))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NumericSeries;
    use crate::overlay::{CurveInputs, compute_overlay};

    fn overlay() -> Overlay {
        let s = |v: &[f64]| NumericSeries::new(v.to_vec()).unwrap();
        compute_overlay(&CurveInputs {
            tp_actual: s(&[0.01, 0.1, 1.0]),
            zth_actual: s(&[0.1, 0.2, 0.3]),
            foster_r: s(&[0.1, 0.2]),
            foster_c: s(&[0.01, 1.0]),
            cauer_r: s(&[0.1, 0.2]),
            cauer_c: s(&[0.01, 1.0]),
            order: 2,
            n_grid: 8,
        })
        .unwrap()
    }

    #[test]
    fn payload_has_boundary_keys() {
        let json = payload_json(&overlay()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["order_used"], 2);
        for key in ["tp_actual", "zth_actual"] {
            assert_eq!(value[key].as_array().unwrap().len(), 3);
        }
        for key in ["tp_grid", "zth_foster", "zth_cauer"] {
            assert_eq!(value[key].as_array().unwrap().len(), 8);
        }
    }

    #[test]
    fn meta_counts_points() {
        let meta = OverlayMeta::from(&overlay());
        assert_eq!(
            meta,
            OverlayMeta {
                n_points_actual: 3,
                n_points_curve: 8,
                order_used: 2
            }
        );
    }
}
