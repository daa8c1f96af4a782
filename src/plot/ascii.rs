//! Character-grid overlay for terminals without a graphics backend.
//!
//! Same data as the SVG chart, drawn into a fixed `width x height` grid on a
//! logarithmic time axis. Output is deterministic, so tests compare it verbatim.
//!
//! Glyphs, in drawing order (later glyphs never overwrite earlier curves):
//! - Foster curve: `-`
//! - Cauer curve: `:`, visible where the Foster stroke left blanks
//! - measured points: `o`, always on top

use crate::domain::CurveBundle;
use crate::plot::OverlaySeries;

/// Render the overlay for a bundle into a character grid.
pub fn render_ascii_overlay(bundle: &CurveBundle, width: usize, height: usize) -> String {
    let series = OverlaySeries::from_bundle(bundle);
    render_plot(&series, width, height)
}

fn render_plot(series: &OverlaySeries, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let [t_min, t_max] = series.x_bounds;
    let [y_min, y_max] = series.y_bounds;
    let axis = Axes {
        ln_t_min: t_min.ln(),
        ln_t_max: t_max.ln(),
        y_min,
        y_max,
        width,
        height,
    };

    let mut grid = vec![vec![' '; width]; height];

    // Draw curves first (so points can overlay).
    draw_curve(&mut grid, &series.foster, &axis, '-');
    draw_curve(&mut grid, &series.cauer, &axis, ':');

    for &(t, y) in &series.points {
        grid[axis.map_y(y)][axis.map_x(t)] = 'o';
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: tp=[{t_min:.3e}, {t_max:.3e}] s (log) | Zth=[{y_min:.4}, {y_max:.4}] K/W\n"
    ));
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
    out.push_str("o measured   - Foster   : Cauer\n");

    out
}

struct Axes {
    ln_t_min: f64,
    ln_t_max: f64,
    y_min: f64,
    y_max: f64,
    width: usize,
    height: usize,
}

impl Axes {
    fn map_x(&self, t: f64) -> usize {
        let span = self.ln_t_max - self.ln_t_min;
        let u = if span > 0.0 {
            ((t.ln() - self.ln_t_min) / span).clamp(0.0, 1.0)
        } else {
            0.0
        };
        (u * (self.width as f64 - 1.0)).round() as usize
    }

    fn map_y(&self, y: f64) -> usize {
        let u = ((y - self.y_min) / (self.y_max - self.y_min)).clamp(0.0, 1.0);
        // y=top is max -> row 0
        (self.height as f64 - 1.0 - (u * (self.height as f64 - 1.0))).round() as usize
    }
}

fn draw_curve(grid: &mut [Vec<char>], curve: &[(f64, f64)], axis: &Axes, ch: char) {
    let cells: Vec<(usize, usize)> = curve.iter().map(|&(t, y)| (axis.map_x(t), axis.map_y(y))).collect();
    match cells.as_slice() {
        [] => {}
        [only] => draw_line(grid, *only, *only, ch),
        _ => {
            for pair in cells.windows(2) {
                draw_line(grid, pair[0], pair[1], ch);
            }
        }
    }
}

/// Join two cells with a stroke of `ch`, stepping one cell at a time along the
/// longer axis. Cells already holding a glyph are left alone.
fn draw_line(grid: &mut [Vec<char>], from: (usize, usize), to: (usize, usize), ch: char) {
    let (x0, y0) = (from.0 as f64, from.1 as f64);
    let (dx, dy) = (to.0 as f64 - x0, to.1 as f64 - y0);
    let steps = dx.abs().max(dy.abs()) as usize;

    for i in 0..=steps {
        let u = if steps == 0 { 0.0 } else { i as f64 / steps as f64 };
        let col = (x0 + u * dx).round() as usize;
        let row = (y0 + u * dy).round() as usize;
        if let Some(cell) = grid.get_mut(row).and_then(|r| r.get_mut(col)) {
            if *cell == ' ' {
                *cell = ch;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NumericSeries;

    fn s(v: &[f64]) -> NumericSeries {
        NumericSeries::new(v.to_vec()).unwrap()
    }

    #[test]
    fn plot_golden_snapshot_small() {
        // Flat curves at the top, one point on each corner of the bottom row.
        let bundle = CurveBundle {
            tp_actual: s(&[1.0, 100.0]),
            zth_actual: s(&[0.0, 0.0]),
            tp_grid: s(&[1.0, 10.0, 100.0]),
            zth_foster: s(&[1.0, 1.0, 1.0]),
            zth_cauer: s(&[1.0, 1.0, 1.0]),
        };

        let txt = render_ascii_overlay(&bundle, 10, 5);
        let expected = concat!(
            "Plot: tp=[1.000e0, 1.000e2] s (log) | Zth=[-0.0500, 1.0500] K/W\n",
            "----------\n",
            "          \n",
            "          \n",
            "          \n",
            "o        o\n",
            "o measured   - Foster   : Cauer\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn cauer_fills_gaps_left_by_foster() {
        let bundle = CurveBundle {
            tp_actual: s(&[1.0]),
            zth_actual: s(&[0.5]),
            tp_grid: s(&[1.0, 100.0]),
            zth_foster: s(&[0.0, 0.0]),
            zth_cauer: s(&[1.0, 1.0]),
        };
        let txt = render_ascii_overlay(&bundle, 12, 6);
        let rows: Vec<&str> = txt.lines().collect();
        assert_eq!(rows.len(), 1 + 6 + 1);
        assert_eq!(rows[1], "::::::::::::");
        assert_eq!(rows[6], "------------");
        assert!(rows[1..7].iter().all(|r| r.chars().count() == 12));
    }

    #[test]
    fn strokes_keep_existing_glyphs() {
        let mut grid = vec![vec![' '; 5]; 3];
        grid[1][2] = 'o';
        draw_line(&mut grid, (0, 0), (4, 2), '-');
        let rows: Vec<String> = grid.iter().map(|r| r.iter().collect()).collect();
        assert_eq!(rows, ["-    ", " -o  ", "   --"]);
    }
}
