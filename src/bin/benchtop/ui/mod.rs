//! TUI module for benchtop
//!
//! Draws the four instruments and routes keyboard and mouse input to them.

mod panels;
mod scope;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use std::time::{Duration, Instant};

use benchtop::instruments::generator::{AMPLITUDE_RANGE, FREQUENCY_RANGE};
use benchtop::scope::{ScopeFrame, WheelInput};

use crate::app::{App, Route};

use panels::{
    render_analog, render_digital, render_measurements, render_modulator, render_status,
    render_wiring,
};
use scope::render_scope;

/// Event poll timeout; sets the frame rate (~60fps).
const TICK: Duration = Duration::from_millis(16);

/// Amplitude change per key press, in volts.
const AMPLITUDE_STEP: f64 = 0.5;

/// UI application state
pub struct UiApp {
    app: App,
    /// Last frame the oscilloscope produced; redrawn until a new one arrives.
    scope_frame: Option<ScopeFrame>,
    /// Monotonic origin for the oscilloscope's frame clock.
    started: Instant,
    should_quit: bool,
}

impl UiApp {
    pub fn new(app: App) -> Self {
        Self {
            app,
            scope_frame: None,
            started: Instant::now(),
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.app.poll_modulation();

            if let Some(frame) = self.app.bench.scope.render(self.started.elapsed()) {
                self.scope_frame = Some(frame);
            }

            terminal.draw(|frame| self.render(frame))?;

            if event::poll(TICK)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    _ => {}
                }
            }
        }

        self.app.shutdown();
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let analog = &mut self.app.bench.analog;
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,

            // function generator
            KeyCode::Char('g') => self.app.generate(),
            KeyCode::Char('w') => analog.cycle_waveform(),
            KeyCode::Char('f') => analog.set_frequency(analog.frequency() * 2.0),
            KeyCode::Char('F') => analog.set_frequency(analog.frequency() / 2.0),
            KeyCode::Char('a') => analog.set_amplitude(analog.amplitude() + AMPLITUDE_STEP),
            KeyCode::Char('A') => analog.set_amplitude(analog.amplitude() - AMPLITUDE_STEP),

            // digital generator
            KeyCode::Char(ch @ ('0' | '1')) => {
                self.app.bench.digital.push(ch);
            }
            KeyCode::Backspace => self.app.bench.digital.backspace(),
            KeyCode::Delete => self.app.bench.digital.clear(),
            KeyCode::Enter => self.app.quantize(),

            // modulator
            KeyCode::Char('m') => self.app.modulate(),
            KeyCode::Char('s') => self.app.bench.modulator.cycle_scheme(),

            // oscilloscope
            KeyCode::Char(' ') => self.app.bench.scope.toggle_pause(),
            KeyCode::Char('+') | KeyCode::Char('=') => self.app.bench.scope.zoom_x_in(),
            KeyCode::Char('-') => self.app.bench.scope.zoom_x_out(),
            KeyCode::Char(']') => self.app.bench.scope.zoom_y_in(),
            KeyCode::Char('[') => self.app.bench.scope.zoom_y_out(),
            KeyCode::Char('r') => self.app.bench.scope.reset_zoom(),

            // wiring
            KeyCode::Char(ch) => {
                if let Some(route) = Route::ALL.into_iter().find(|r| r.key() == ch) {
                    self.app.toggle(route);
                }
            }
            _ => {}
        }
    }

    /// Ctrl+wheel zooms X, Ctrl+Shift+wheel zooms Y.
    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let delta_y = match mouse.kind {
            MouseEventKind::ScrollUp => -1.0,
            MouseEventKind::ScrollDown => 1.0,
            _ => return,
        };
        self.app.bench.scope.wheel(WheelInput {
            modifier: mouse.modifiers.contains(KeyModifiers::CONTROL),
            shift: mouse.modifiers.contains(KeyModifiers::SHIFT),
            delta_y,
        });
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        // Main layout: status, instruments, help
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Status bar
                Constraint::Min(16),   // Bench
                Constraint::Length(1), // Help bar
            ])
            .split(area);

        render_status(frame, rows[0], &self.app);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(44), Constraint::Min(40)])
            .split(rows[1]);

        let panels = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // Function generator
                Constraint::Length(4), // Digital generator
                Constraint::Length(5), // Modulator
                Constraint::Min(7),    // Wiring
            ])
            .split(columns[0]);

        let bench = &self.app.bench;
        render_analog(frame, panels[0], &bench.analog);
        render_digital(frame, panels[1], &bench.digital);
        render_modulator(frame, panels[2], bench);
        render_wiring(frame, panels[3], &self.app);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(10), Constraint::Length(8)])
            .split(columns[1]);

        render_scope(frame, right[0], &bench.scope, self.scope_frame.as_ref());
        render_measurements(frame, right[1], &bench.scope.grid(), bench.scope.signal());

        let help = Paragraph::new(format!(
            " [g]en [w]ave [f/F]req {:.0}-{:.0}Hz [a/A]mp {:.0}-{:.0}V  [0/1/⏎]bits  [m]od [s]cheme  [space] pause [+/-][[/]] zoom [r]eset  [q]uit",
            FREQUENCY_RANGE.0, FREQUENCY_RANGE.1, AMPLITUDE_RANGE.0, AMPLITUDE_RANGE.1,
        ))
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, rows[2]);
    }
}
