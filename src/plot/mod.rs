//! Overlay rendering.
//!
//! - `chart`: Plotters drawing shared by the SVG export and the TUI
//! - `ascii`: fixed-size character plot for quick terminal checks
//!
//! Both renderers consume an `OverlaySeries`, so bounds and point lists are
//! computed once and drawing stays free of data prep.

pub mod ascii;
pub mod chart;

pub use ascii::*;
pub use chart::*;

use crate::domain::CurveBundle;

/// Render-ready point lists and axis bounds for one bundle.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlaySeries {
    /// Measured `(tp, zth)` points.
    pub points: Vec<(f64, f64)>,
    pub foster: Vec<(f64, f64)>,
    pub cauer: Vec<(f64, f64)>,
    /// Time bounds (seconds, plotted on a log axis).
    pub x_bounds: [f64; 2],
    /// Zth bounds (K/W), padded.
    pub y_bounds: [f64; 2],
}

impl OverlaySeries {
    pub fn from_bundle(bundle: &CurveBundle) -> Self {
        let pairs = |x: &[f64], y: &[f64]| x.iter().copied().zip(y.iter().copied()).collect::<Vec<_>>();

        let points = pairs(bundle.tp_actual.as_slice(), bundle.zth_actual.as_slice());
        let foster = pairs(bundle.tp_grid.as_slice(), bundle.zth_foster.as_slice());
        let cauer = pairs(bundle.tp_grid.as_slice(), bundle.zth_cauer.as_slice());

        let x_bounds = [
            bundle.tp_grid.min().min(bundle.tp_actual.min()),
            bundle.tp_grid.max().max(bundle.tp_actual.max()),
        ];

        let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
        for &(_, y) in points.iter().chain(&foster).chain(&cauer) {
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }
        if !(y_min.is_finite() && y_max.is_finite()) || y_max <= y_min {
            y_min -= 0.5;
            y_max += 0.5;
        }
        let pad = ((y_max - y_min).abs() * 0.05).max(1e-12);

        Self {
            points,
            foster,
            cauer,
            x_bounds,
            y_bounds: [y_min - pad, y_max + pad],
        }
    }
}

/// Format a time tick (seconds) compactly for a log axis.
pub fn fmt_time(v: f64) -> String {
    if (1e-2..1e3).contains(&v.abs()) {
        let s = format!("{v:.3}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        format!("{v:.0e}")
    }
}

/// Format a Zth tick (K/W).
pub fn fmt_zth(v: f64) -> String {
    format!("{v:.3}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NumericSeries;

    fn s(v: &[f64]) -> NumericSeries {
        NumericSeries::new(v.to_vec()).unwrap()
    }

    #[test]
    fn bounds_cover_points_and_curves() {
        let bundle = CurveBundle {
            tp_actual: s(&[0.01, 1.0]),
            zth_actual: s(&[0.1, 0.4]),
            tp_grid: s(&[0.01, 0.1, 1.0]),
            zth_foster: s(&[0.0, 0.2, 0.3]),
            zth_cauer: s(&[0.05, 0.25, 0.3]),
        };
        let series = OverlaySeries::from_bundle(&bundle);
        assert_eq!(series.x_bounds, [0.01, 1.0]);
        assert!(series.y_bounds[0] < 0.0 && series.y_bounds[1] > 0.4);
        assert_eq!(series.foster.len(), 3);
        assert_eq!(series.points[1], (1.0, 0.4));
    }

    #[test]
    fn flat_data_still_gets_a_y_range() {
        let bundle = CurveBundle {
            tp_actual: s(&[1.0]),
            zth_actual: s(&[0.0]),
            tp_grid: s(&[0.1, 10.0]),
            zth_foster: s(&[0.0, 0.0]),
            zth_cauer: s(&[0.0, 0.0]),
        };
        let series = OverlaySeries::from_bundle(&bundle);
        assert!(series.y_bounds[1] > series.y_bounds[0]);
    }

    #[test]
    fn time_ticks_are_compact() {
        assert_eq!(fmt_time(0.5), "0.5");
        assert_eq!(fmt_time(10.0), "10");
        assert_eq!(fmt_time(1e-4), "1e-4");
        assert_eq!(fmt_zth(0.25), "0.250");
    }
}
