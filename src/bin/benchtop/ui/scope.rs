//! Oscilloscope screen widget

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols::Marker,
    widgets::canvas::{Canvas, Context, Line},
    widgets::{Block, Borders},
    Frame,
};

use benchtop::scope::{Grid, Oscilloscope, ScopeFrame, TraceKind};

/// Render the oscilloscope's latest frame onto a braille canvas.
///
/// The engine works top-down in logical pixels; the canvas is bottom-up, so
/// every y is flipped against the logical height.
pub fn render_scope(frame: &mut Frame, area: Rect, scope: &Oscilloscope, shown: Option<&ScopeFrame>) {
    let zoom = scope.zoom();
    let state = if scope.is_paused() { "⏸ paused" } else { "▶ running" };
    let block = Block::default()
        .title(format!(
            " Oscilloscope  X {:.0}%  Y {:.0}%  {} ",
            zoom.x() * 100.0,
            zoom.y() * 100.0,
            state
        ))
        .borders(Borders::ALL);

    let Some(shown) = shown else {
        frame.render_widget(block, area);
        return;
    };
    let grid = &shown.grid;
    let (width, height) = (grid.logical_width, grid.logical_height);

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([0.0, width])
        .y_bounds([0.0, height])
        .paint(|ctx| {
            draw_grid(ctx, grid);
            ctx.layer();

            if let Some(trace) = &shown.trace {
                let color = match trace.kind {
                    TraceKind::Analog => Color::Green,
                    TraceKind::Digital => Color::Yellow,
                };
                for pair in trace.points.windows(2) {
                    let ((x1, y1), (x2, y2)) = (pair[0], pair[1]);
                    ctx.draw(&Line::new(x1, height - y1, x2, height - y2, color));
                }
            }
        });

    frame.render_widget(canvas, area);
}

fn draw_grid(ctx: &mut Context, grid: &Grid) {
    let (width, height) = (grid.logical_width, grid.logical_height);
    let center = grid.center_line();

    for &x in &grid.verticals {
        ctx.draw(&Line::new(x, 0.0, x, height, Color::DarkGray));
    }
    for (j, &y) in grid.horizontals.iter().enumerate() {
        let color = if j == center { Color::Gray } else { Color::DarkGray };
        ctx.draw(&Line::new(0.0, height - y, width, height - y, color));
    }

    // labels are placed in device pixels
    let (zx, zy) = (grid.zoom.x(), grid.zoom.y());
    for label in grid.voltage_labels.iter().step_by(2) {
        ctx.print(
            label.x / zx,
            height - label.y / zy,
            ratatui::text::Line::styled(label.text.clone(), Style::default().fg(Color::Cyan)),
        );
    }
    for label in grid.time_labels.iter().step_by(2) {
        ctx.print(
            label.x / zx,
            height - label.y / zy,
            ratatui::text::Line::styled(label.text.clone(), Style::default().fg(Color::Magenta)),
        );
    }
}
