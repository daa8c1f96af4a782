//! Ratatui-based terminal UI.
//!
//! Shows the overlay chart for one request together with both networks' stage
//! tables. The order can be stepped up and down; each step recomputes the
//! bundle through the same pipeline the CLI uses.

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};

use crate::domain::FosterNetwork;
use crate::error::{AppError, EXIT_IO};
use crate::overlay::{CurveInputs, Overlay, compute_overlay};
use crate::plot::{ChartTheme, OverlaySeries, fmt_time, fmt_zth};

mod plotters_chart;

use plotters_chart::OverlayChart;

/// Start the TUI for the given inputs.
pub fn run(inputs: CurveInputs) -> Result<(), AppError> {
    // Fail before touching the terminal if the initial request is invalid.
    let mut app = App::new(inputs)?;
    let mut session = TerminalSession::open()?;
    app.event_loop(&mut session.terminal)
}

/// Raw-mode alternate-screen terminal, restored when dropped.
struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    fn open() -> Result<Self, AppError> {
        let io_err = |what: &str, e: io::Error| AppError::new(EXIT_IO, format!("Failed to {what}: {e}"));

        enable_raw_mode().map_err(|e| io_err("enable raw mode", e))?;
        let terminal = execute!(io::stdout(), EnterAlternateScreen)
            .and_then(|()| Terminal::new(CrosstermBackend::new(io::stdout())));
        match terminal {
            Ok(terminal) => Ok(Self { terminal }),
            Err(e) => {
                let _ = execute!(io::stdout(), LeaveAlternateScreen);
                let _ = disable_raw_mode();
                Err(io_err("initialize terminal", e))
            }
        }
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

struct App {
    inputs: CurveInputs,
    overlay: Overlay,
    series: OverlaySeries,
    show_foster: bool,
    show_cauer: bool,
    status: String,
}

impl App {
    fn new(inputs: CurveInputs) -> Result<Self, AppError> {
        let overlay = compute_overlay(&inputs)?;
        let series = OverlaySeries::from_bundle(&overlay.bundle);
        Ok(Self {
            status: format!("order {} ready.", overlay.order),
            inputs,
            overlay,
            series,
            show_foster: true,
            show_cauer: true,
        })
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(EXIT_IO, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(EXIT_IO, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(EXIT_IO, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the UI should exit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Right | KeyCode::Char('+') => self.step_order(1),
            KeyCode::Left | KeyCode::Char('-') => self.step_order(-1),
            KeyCode::Char('f') => {
                self.show_foster = !self.show_foster;
                self.status = format!("Foster curve {}.", on_off(self.show_foster));
            }
            KeyCode::Char('c') => {
                self.show_cauer = !self.show_cauer;
                self.status = format!("Cauer curve {}.", on_off(self.show_cauer));
            }
            _ => {}
        }
        false
    }

    /// Recompute at a neighbouring order. On failure the last good overlay stays.
    fn step_order(&mut self, delta: i64) {
        let mut next = self.inputs.clone();
        next.order = (self.overlay.order as i64).saturating_add(delta);
        match compute_overlay(&next) {
            Ok(overlay) => {
                self.series = OverlaySeries::from_bundle(&overlay.bundle);
                self.status = format!("order {} ready.", overlay.order);
                self.overlay = overlay;
                self.inputs = next;
            }
            Err(err) => {
                self.status = err.to_string();
            }
        }
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let bundle = &self.overlay.bundle;
        let models = &self.overlay.models;
        let lines = vec![
            Line::from(vec![
                Span::styled("zth", Style::default().fg(Color::Cyan)),
                Span::raw(" - Foster vs Cauer thermal impedance"),
            ]),
            Line::from(Span::styled(
                format!(
                    "order: {} | points: {} | grid: {} | ΣR foster={} | ΣR cauer={}",
                    self.overlay.order,
                    bundle.tp_actual.len(),
                    bundle.tp_grid.len(),
                    fmt_zth(models.foster.total_resistance()),
                    fmt_zth(models.cauer.total_resistance()),
                ),
                Style::default().fg(Color::Gray),
            )),
        ];

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(44)])
            .split(area);

        self.draw_chart(frame, chunks[0]);

        let tables = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[1]);
        draw_stage_list(frame, tables[0], "Foster stages", &self.overlay.models.foster, Color::Cyan);
        draw_stage_list(
            frame,
            tables[1],
            "Cauer → Foster stages",
            &self.overlay.models.cauer_equivalent,
            Color::Red,
        );
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Zth overlay").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let mut theme = ChartTheme::terminal();
        theme.show_foster = self.show_foster;
        theme.show_cauer = self.show_cauer;

        let layout = chart_frame(inner, self.series.y_bounds);
        frame.render_widget(
            OverlayChart {
                series: &self.series,
                theme,
            },
            layout.map_or(inner, |l| l.plot),
        );
        if let Some(layout) = &layout {
            draw_axis_labels(frame, layout, self.series.x_bounds, self.series.y_bounds);
        }
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "←/→ order  f foster  c cauer  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag { "shown" } else { "hidden" }
}

fn draw_stage_list(frame: &mut ratatui::Frame<'_>, area: Rect, title: &str, network: &FosterNetwork, color: Color) {
    let mut items = vec![ListItem::new(Line::from(Span::styled(
        format!("{:>3} {:>11} {:>11} {:>11}", "#", "R (K/W)", "C (J/K)", "τ (s)"),
        Style::default().add_modifier(Modifier::BOLD),
    )))];
    for (i, stage) in network.stages().enumerate() {
        items.push(ListItem::new(format!(
            "{:>3} {:>11.4e} {:>11.4e} {:>11.4e}",
            i + 1,
            stage.r,
            stage.c,
            stage.tau()
        )));
    }
    let list = List::new(items).block(
        Block::default()
            .title(Span::styled(title.to_string(), Style::default().fg(color)))
            .borders(Borders::ALL),
    );
    frame.render_widget(list, area);
}

const Y_TITLE: &str = "Zth (K/W)";

/// Plot area plus the label strips around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ChartFrame {
    plot: Rect,
    /// Row above the plot holding the y title.
    title: Rect,
    /// Strip left of the plot for y tick labels.
    y_labels: Rect,
    /// Two rows under the plot: x tick labels, then the x title.
    x_labels: Rect,
}

/// Split the chart block. `None` when it cannot hold labels and a usable plot.
fn chart_frame(inner: Rect, y_bounds: [f64; 2]) -> Option<ChartFrame> {
    let gutter = y_bounds.iter().map(|&v| fmt_zth(v).chars().count()).max().unwrap_or(0) as u16 + 1;
    if inner.width < gutter + 20 || inner.height < 10 {
        return None;
    }

    let columns = [Constraint::Length(gutter), Constraint::Min(0), Constraint::Length(2)];
    let [title, body, footer] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(0), Constraint::Length(2)]).areas(inner);
    let [y_labels, plot, _] = Layout::horizontal(columns).areas(body);
    let [_, x_labels, _] = Layout::horizontal(columns).areas(footer);

    Some(ChartFrame {
        plot,
        title,
        y_labels,
        x_labels,
    })
}

/// Tick labels around the plot: log-spaced on x, linear on y.
fn draw_axis_labels(frame: &mut ratatui::Frame<'_>, layout: &ChartFrame, x_bounds: [f64; 2], y_bounds: [f64; 2]) {
    const TICKS: u16 = 5;
    let style = Style::default().fg(Color::Gray);
    let plot = layout.plot;
    let strip = layout.x_labels;
    let (ln_x0, ln_x1) = (x_bounds[0].ln(), x_bounds[1].ln());

    for i in 0..TICKS {
        let u = f64::from(i) / f64::from(TICKS - 1);

        let label = fmt_time((ln_x0 + u * (ln_x1 - ln_x0)).exp());
        let width = (label.chars().count() as u16).min(strip.width);
        let center = plot.x + (f64::from(plot.width - 1) * u).round() as u16;
        let x = center
            .saturating_sub(width / 2)
            .min(strip.right() - width)
            .max(strip.x);
        frame.render_widget(
            Paragraph::new(label).style(style),
            Rect {
                x,
                y: strip.y,
                width,
                height: 1,
            },
        );

        let label = fmt_zth(y_bounds[0] + u * (y_bounds[1] - y_bounds[0]));
        let y = plot.bottom() - 1 - (f64::from(plot.height - 1) * u).round() as u16;
        frame.render_widget(
            Paragraph::new(label).style(style).alignment(Alignment::Right),
            Rect {
                x: layout.y_labels.x,
                y,
                width: layout.y_labels.width - 1,
                height: 1,
            },
        );
    }

    frame.render_widget(
        Paragraph::new("tp (s)").alignment(Alignment::Center).style(style),
        Rect {
            y: strip.y + 1,
            height: 1,
            ..strip
        },
    );
    frame.render_widget(
        Paragraph::new(Y_TITLE).style(style.add_modifier(Modifier::BOLD)),
        layout.title,
    );
}
