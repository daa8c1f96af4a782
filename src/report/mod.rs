//! Reporting utilities: formatted terminal output for a computed overlay.
//!
//! We keep formatting code in one place so the numeric core stays free of
//! presentation concerns.

use crate::domain::{CurveBundle, RcStage};
use crate::io::OverlayMeta;
use crate::overlay::Overlay;

/// Largest gap between the two model curves on the shared grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveGap {
    pub tp: f64,
    pub abs_diff: f64,
}

/// Find the grid point where Foster and Cauer curves differ most.
pub fn max_curve_gap(bundle: &CurveBundle) -> CurveGap {
    let mut best = CurveGap {
        tp: bundle.tp_grid[0],
        abs_diff: 0.0,
    };
    for ((&t, &zf), &zc) in bundle.tp_grid.iter().zip(bundle.zth_foster.iter()).zip(bundle.zth_cauer.iter()) {
        let d = (zf - zc).abs();
        if d > best.abs_diff {
            best = CurveGap { tp: t, abs_diff: d };
        }
    }
    best
}

/// Format the full overlay summary (counts, stage tables, curve comparison).
pub fn format_report(overlay: &Overlay) -> String {
    let bundle = &overlay.bundle;
    let models = &overlay.models;
    let meta = OverlayMeta::from(overlay);

    let mut out = String::new();
    out.push_str("=== zth - Foster/Cauer Zth overlay ===\n");
    out.push_str(&format!(
        "Points: n={} | tp=[{:.3e}, {:.3e}] s | Zth=[{:.4}, {:.4}] K/W\n",
        meta.n_points_actual,
        bundle.tp_actual.min(),
        bundle.tp_actual.max(),
        bundle.zth_actual.min(),
        bundle.zth_actual.max(),
    ));
    out.push_str(&format!(
        "Grid: n={} | tp=[{:.3e}, {:.3e}] s (log-spaced)\n",
        meta.n_points_curve,
        bundle.tp_grid.min(),
        bundle.tp_grid.max(),
    ));
    out.push_str(&format!("Order used: {}\n", meta.order_used));

    push_stage_table(&mut out, "Foster network", models.foster.stages(), models.foster.total_resistance());
    push_stage_table(&mut out, "Cauer network", models.cauer.stages(), models.cauer.total_resistance());
    push_stage_table(
        &mut out,
        "Cauer -> Foster equivalent",
        models.cauer_equivalent.stages(),
        models.cauer_equivalent.total_resistance(),
    );

    let last = bundle.tp_grid.len() - 1;
    let gap = max_curve_gap(bundle);
    out.push_str("\nCurves:\n");
    out.push_str(&format!(
        "  Zth at tp={:.3e} s: foster={:.6} cauer={:.6}\n",
        bundle.tp_grid[last], bundle.zth_foster[last], bundle.zth_cauer[last],
    ));
    out.push_str(&format!(
        "  max |foster - cauer| = {:.6} K/W at tp={:.3e} s\n",
        gap.abs_diff, gap.tp,
    ));

    out
}

fn push_stage_table(out: &mut String, title: &str, stages: impl Iterator<Item = RcStage>, total_r: f64) {
    out.push_str(&format!("\n{title} (sum R = {total_r:.6} K/W):\n"));
    out.push_str(&format!(
        "  {:>3}  {:>12}  {:>12}  {:>12}\n",
        "#", "R (K/W)", "C (J/K)", "tau (s)"
    ));
    for (i, stage) in stages.enumerate() {
        out.push_str(&format!(
            "  {:>3}  {:>12.5e}  {:>12.5e}  {:>12.5e}\n",
            i + 1,
            stage.r,
            stage.c,
            stage.tau(),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NumericSeries;
    use crate::overlay::{CurveInputs, compute_overlay};

    fn overlay(order: i64) -> Overlay {
        let s = |v: &[f64]| NumericSeries::new(v.to_vec()).unwrap();
        compute_overlay(&CurveInputs {
            tp_actual: s(&[0.001, 0.01, 0.1, 1.0, 10.0]),
            zth_actual: s(&[0.05, 0.15, 0.25, 0.32, 0.35]),
            foster_r: s(&[0.1, 0.2]),
            foster_c: s(&[0.01, 1.0]),
            cauer_r: s(&[0.1, 0.2]),
            cauer_c: s(&[0.01, 1.0]),
            order,
            n_grid: 450,
        })
        .unwrap()
    }

    #[test]
    fn report_lists_all_three_networks() {
        let txt = format_report(&overlay(2));
        assert!(txt.contains("Points: n=5"));
        assert!(txt.contains("Grid: n=450"));
        assert!(txt.contains("Order used: 2"));
        assert!(txt.contains("Foster network (sum R = 0.300000 K/W)"));
        assert!(txt.contains("Cauer network (sum R = 0.300000 K/W)"));
        assert!(txt.contains("Cauer -> Foster equivalent (sum R = 0.300000 K/W)"));
    }

    #[test]
    fn single_stage_curves_have_no_gap() {
        let gap = max_curve_gap(&overlay(1).bundle);
        assert!(gap.abs_diff < 1e-12);
    }

    #[test]
    fn two_stage_curves_differ_somewhere() {
        // Same R/C values mean different networks in the two topologies.
        let gap = max_curve_gap(&overlay(2).bundle);
        assert!(gap.abs_diff > 1e-3);
    }
}
