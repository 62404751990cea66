//! Instrument front panels, wiring list and the measurement readout

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use benchtop::graph::bench_ids;
use benchtop::instruments::generator::BIT_WIDTH;
use benchtop::instruments::modulator::input_summary;
use benchtop::instruments::{AnalogGenerator, DigitalGenerator};
use benchtop::scope::{format_time, Grid, DIVISIONS_X, DIVISIONS_Y, PIXELS_PER_VOLT};
use benchtop::{Bench, Signal};

use crate::app::{App, Route};

fn field(name: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{name:<11}"), Style::default().fg(Color::DarkGray)),
        Span::raw(value),
    ])
}

/// Endpoint, last action and modulation state
pub fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().title(" benchtop ").borders(Borders::ALL);
    let busy = app.bench.modulator.is_busy();

    let line = Line::from(vec![
        Span::styled(
            format!(" service: {}  ", app.endpoint()),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            if busy { "● modulating  " } else { "○ idle  " },
            Style::default().fg(if busy { Color::Yellow } else { Color::Green }),
        ),
        Span::styled(app.status().to_string(), Style::default().fg(Color::White)),
    ]);

    frame.render_widget(Paragraph::new(line).block(block), area);
}

pub fn render_analog(frame: &mut Frame, area: Rect, generator: &AnalogGenerator) {
    let block = Block::default()
        .title(format!(" Function generator ({}) ", bench_ids::ANALOG_GENERATOR))
        .borders(Borders::ALL);
    let lines = vec![
        field("waveform", generator.waveform().name().to_string()),
        field("frequency", format!("{} Hz", generator.frequency())),
        field("amplitude", format!("{:.2} V", generator.amplitude())),
    ];
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

pub fn render_digital(frame: &mut Frame, area: Rect, generator: &DigitalGenerator) {
    let block = Block::default()
        .title(format!(" Digital generator ({}) ", bench_ids::DIGITAL_GENERATOR))
        .borders(Borders::ALL);
    let entry = generator.entry();
    let complete = entry.len() == BIT_WIDTH;
    let pending = "_".repeat(BIT_WIDTH.saturating_sub(entry.len()));

    let line = Line::from(vec![
        Span::styled(format!("{:<11}", "bits"), Style::default().fg(Color::DarkGray)),
        Span::styled(
            entry.to_string(),
            Style::default()
                .fg(if complete { Color::Green } else { Color::White })
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(pending, Style::default().fg(Color::DarkGray)),
        Span::raw(format!("  {}/{BIT_WIDTH}", entry.len())),
    ]);
    frame.render_widget(Paragraph::new(line).block(block), area);
}

pub fn render_modulator(frame: &mut Frame, area: Rect, bench: &Bench) {
    let modulator = &bench.modulator;
    let block = Block::default()
        .title(format!(" Modulator ({}) ", bench_ids::MODULATOR))
        .borders(Borders::ALL);

    let summary = match bench.graph().modulator_inputs(bench_ids::MODULATOR) {
        Ok((carrier, message)) => input_summary(carrier, message),
        Err(err) => err.to_string(),
    };
    let lines = vec![
        field(
            "scheme",
            format!(
                "{}  {} cyc/sym  {} smp/sym",
                modulator.scheme(),
                modulator.cycles_per_symbol(),
                modulator.samples_per_symbol()
            ),
        ),
        Line::from(Span::styled(summary, Style::default().fg(Color::Gray))),
    ];
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

pub fn render_wiring(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().title(" Wiring ").borders(Borders::ALL);
    let lines: Vec<Line> = Route::ALL
        .into_iter()
        .map(|route| {
            let connected = app.is_connected(route);
            Line::from(vec![
                Span::styled(format!("[{}] ", route.key()), Style::default().fg(Color::DarkGray)),
                Span::styled(
                    if connected { "●" } else { "○" },
                    Style::default().fg(if connected { Color::Green } else { Color::DarkGray }),
                ),
                Span::raw(format!(" {}", route.label())),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Scales and the displayed signal's parameters
pub fn render_measurements(frame: &mut Frame, area: Rect, grid: &Grid, signal: Option<&Signal>) {
    let block = Block::default().title(" Measurements ").borders(Borders::ALL);

    let mut lines = vec![
        field("volts/div", format!("{:.3} V", grid.volts_per_division)),
        field(
            "time/div",
            grid.time_per_division
                .map_or_else(|| "—".to_string(), format_time),
        ),
        field(
            "divisions",
            format!("{DIVISIONS_X} × {DIVISIONS_Y}   {PIXELS_PER_VOLT} px/V"),
        ),
    ];

    match signal {
        None => lines.push(field("signal", "—".to_string())),
        Some(signal) => {
            let mut parts = vec![signal.kind().name().to_string()];
            if let Some(waveform) = signal.waveform() {
                parts.push(waveform.name().to_string());
            }
            if let Some(frequency) = signal.frequency() {
                parts.push(format!("{frequency} Hz"));
            }
            if let Some(amplitude) = signal.amplitude() {
                parts.push(format!("{amplitude} V"));
            }
            lines.push(field("signal", parts.join("  ")));
            if let Some(bits) = signal.bits() {
                lines.push(field("bits", bits.describe()));
            }
        }
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
