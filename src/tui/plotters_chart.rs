//! Plotters-powered overlay chart widget for Ratatui.
//!
//! The drawing itself is `plot::draw_overlay`, shared with the SVG export; this
//! widget only adapts it to a terminal buffer via `plotters-ratatui-backend`.

use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::plot::{ChartTheme, OverlaySeries, draw_overlay};

/// A render-only chart description.
///
/// All series and bounds are computed outside the render call.
pub struct OverlayChart<'a> {
    pub series: &'a OverlaySeries,
    pub theme: ChartTheme,
}

impl<'a> Widget for OverlayChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a chart.
        // In that case, we render a small hint rather than panicking.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let [x0, x1] = self.series.x_bounds;
        let [y0, y1] = self.series.y_bounds;
        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite())
            || x0 <= 0.0
            || x1 <= x0
            || y1 <= y0
        {
            return;
        }

        let series = self.series;
        let theme = self.theme;
        let widget = widget_fn(move |root| {
            draw_overlay(&root, series, &theme)?;
            Ok(())
        });

        widget.render(area, buf);
    }
}
