//! Plotters overlay chart.
//!
//! `draw_overlay` is backend-agnostic: the SVG export draws into an
//! `SVGBackend`, the TUI draws into a Ratatui buffer. A `ChartTheme` carries the
//! per-backend differences (palette, marker shape, dashes, label sizes).
//!
//! Chart layout:
//! - x axis: `tp (s)`, logarithmic
//! - y axis: `Zth (K/W)`
//! - measured points as markers, Foster curve solid, Cauer curve dashed

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;

use crate::domain::CurveBundle;
use crate::error::{AppError, EXIT_IO};
use crate::plot::{OverlaySeries, fmt_time, fmt_zth};

pub const CHART_TITLE: &str = "Zth vs tp: Actual vs Foster/Cauer Fits";
pub const POINTS_LABEL: &str = "Digitized Zth points (actual)";
pub const FOSTER_LABEL: &str = "Foster fit curve";
pub const CAUER_LABEL: &str = "Cauer fit curve";

/// Default SVG size in pixels.
pub const SVG_SIZE: (u32, u32) = (1260, 750);

/// How measured points are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerShape {
    /// Filled circle of the given radius.
    Circle(u32),
    /// Single pixel. Circle radii are mis-scaled on the Ratatui canvas backend.
    Pixel,
}

/// Backend-specific styling.
#[derive(Debug, Clone, Copy)]
pub struct ChartTheme {
    pub background: Option<RGBColor>,
    pub text: RGBColor,
    pub points: RGBColor,
    pub foster: RGBColor,
    pub cauer: RGBColor,
    pub marker: MarkerShape,
    pub foster_width: u32,
    pub cauer_width: u32,
    pub dashed_cauer: bool,
    pub font_size: u32,
    pub margin: u32,
    pub x_label_area: u32,
    pub y_label_area: u32,
    pub title: bool,
    pub mesh: bool,
    pub legend: bool,
    pub show_foster: bool,
    pub show_cauer: bool,
}

impl ChartTheme {
    /// Light theme for image export.
    pub fn svg() -> Self {
        Self {
            background: Some(WHITE),
            text: RGBColor(15, 23, 42),
            points: RGBColor(15, 23, 42),
            foster: RGBColor(37, 99, 235),
            cauer: RGBColor(220, 38, 38),
            marker: MarkerShape::Circle(4),
            foster_width: 2,
            cauer_width: 3,
            dashed_cauer: true,
            font_size: 16,
            margin: 20,
            x_label_area: 50,
            y_label_area: 70,
            title: true,
            mesh: true,
            legend: true,
            show_foster: true,
            show_cauer: true,
        }
    }

    /// High-contrast theme for terminal cells.
    pub fn terminal() -> Self {
        Self {
            background: None,
            text: WHITE,
            points: WHITE,
            foster: RGBColor(0, 255, 255),
            cauer: RGBColor(255, 0, 0),
            marker: MarkerShape::Pixel,
            foster_width: 1,
            cauer_width: 1,
            dashed_cauer: false,
            font_size: 10,
            margin: 1,
            x_label_area: 3,
            y_label_area: 6,
            title: false,
            mesh: false,
            legend: false,
            show_foster: true,
            show_cauer: true,
        }
    }
}

/// Draw the overlay chart onto any Plotters drawing area.
pub fn draw_overlay<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    series: &OverlaySeries,
    theme: &ChartTheme,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    if let Some(background) = theme.background {
        root.fill(&background)?;
    }

    let [x0, x1] = series.x_bounds;
    let [y0, y1] = series.y_bounds;

    let mut builder = ChartBuilder::on(root);
    builder
        .margin(theme.margin)
        .set_label_area_size(LabelAreaPosition::Left, theme.y_label_area)
        .set_label_area_size(LabelAreaPosition::Bottom, theme.x_label_area);
    if theme.title {
        builder.caption(
            CHART_TITLE,
            ("sans-serif", theme.font_size + 4).into_font().color(&theme.text),
        );
    }
    let mut chart = builder.build_cartesian_2d((x0..x1).log_scale(), y0..y1)?;

    let time_fmt = |v: &f64| fmt_time(*v);
    let zth_fmt = |v: &f64| fmt_zth(*v);
    let mut mesh = chart.configure_mesh();
    mesh.x_desc("tp (s)")
        .y_desc("Zth (K/W)")
        .x_labels(8)
        .y_labels(6)
        .x_label_formatter(&time_fmt)
        .y_label_formatter(&zth_fmt)
        .label_style(("sans-serif", theme.font_size).into_font().color(&theme.text))
        .axis_style(theme.text)
        .bold_line_style(theme.text.mix(0.25))
        .light_line_style(theme.text.mix(0.08));
    if !theme.mesh {
        mesh.disable_x_mesh().disable_y_mesh();
    }
    mesh.draw()?;

    // Curves first so the measured markers stay on top.
    if theme.show_foster {
        let style = theme.foster.stroke_width(theme.foster_width);
        chart
            .draw_series(LineSeries::new(series.foster.iter().copied(), style))?
            .label(FOSTER_LABEL)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
    }

    if theme.show_cauer {
        let style = theme.cauer.stroke_width(theme.cauer_width);
        let anno = if theme.dashed_cauer {
            chart.draw_series(DashedLineSeries::new(series.cauer.iter().copied(), 10, 6, style))?
        } else {
            chart.draw_series(LineSeries::new(series.cauer.iter().copied(), style))?
        };
        anno.label(CAUER_LABEL)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
    }

    let point_color = theme.points;
    match theme.marker {
        MarkerShape::Circle(radius) => {
            chart
                .draw_series(
                    series
                        .points
                        .iter()
                        .map(|&(x, y)| Circle::new((x, y), radius, point_color.filled())),
                )?
                .label(POINTS_LABEL)
                .legend(move |(x, y)| Circle::new((x + 10, y), radius, point_color.filled()));
        }
        MarkerShape::Pixel => {
            chart.draw_series(series.points.iter().map(|&(x, y)| Pixel::new((x, y), point_color)))?;
        }
    }

    if theme.legend {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::LowerRight)
            .label_font(("sans-serif", theme.font_size).into_font().color(&theme.text))
            .background_style(WHITE.mix(0.85))
            .border_style(theme.text)
            .draw()?;
    }

    Ok(())
}

/// Render the overlay for a bundle as an SVG document.
pub fn render_overlay_svg(bundle: &CurveBundle, size: (u32, u32)) -> Result<String, AppError> {
    let series = OverlaySeries::from_bundle(bundle);
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
        draw_overlay(&root, &series, &ChartTheme::svg())
            .map_err(|e| AppError::new(EXIT_IO, format!("Failed to draw overlay chart: {e}")))?;
        root.present()
            .map_err(|e| AppError::new(EXIT_IO, format!("Failed to finish overlay chart: {e}")))?;
    }
    Ok(svg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NumericSeries;
    use crate::overlay::{CurveInputs, compute_curves};

    fn bundle() -> CurveBundle {
        let s = |v: &[f64]| NumericSeries::new(v.to_vec()).unwrap();
        compute_curves(&CurveInputs {
            tp_actual: s(&[0.001, 0.01, 0.1, 1.0, 10.0]),
            zth_actual: s(&[0.05, 0.15, 0.25, 0.32, 0.35]),
            foster_r: s(&[0.1, 0.2]),
            foster_c: s(&[0.01, 1.0]),
            cauer_r: s(&[0.1, 0.2]),
            cauer_c: s(&[0.01, 1.0]),
            order: 2,
            n_grid: 100,
        })
        .unwrap()
    }

    #[test]
    fn svg_contains_title_axes_and_legend() {
        let svg = render_overlay_svg(&bundle(), SVG_SIZE).unwrap();
        assert!(svg.contains("<svg"));
        for needle in [CHART_TITLE, "tp (s)", "Zth (K/W)", FOSTER_LABEL, CAUER_LABEL, POINTS_LABEL] {
            assert!(svg.contains(needle), "missing {needle:?}");
        }
    }

    #[test]
    fn svg_draws_one_marker_per_measured_point() {
        let svg = render_overlay_svg(&bundle(), SVG_SIZE).unwrap();
        // Five measured points, plus the legend swatch.
        assert!(svg.matches("<circle").count() >= 5);
    }
}
