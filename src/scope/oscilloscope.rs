use std::time::Duration;

use tracing::debug;

use crate::scope::grid::{Grid, Surface};
use crate::scope::scheduler::FrameScheduler;
use crate::scope::trace::{self, Drawable, Trace};
use crate::scope::zoom::{WheelInput, Zoom, ZOOM_STEP};
use crate::scope::{DEFAULT_CYCLES_PER_SYMBOL, MAX_FRAME_STEP};
use crate::signal::Signal;

/// One rendered picture: the graticule plus an optional trace.
#[derive(Debug, Clone, PartialEq)]
pub struct ScopeFrame {
    pub grid: Grid,
    pub trace: Option<Trace>,
}

/// One oscilloscope instance: its input, view state and animation clock.
///
/// The host calls [`render`](Self::render) whenever it can draw. A frame is
/// produced only when one is pending; analog inputs re-arm the next frame
/// while running, digital and empty inputs draw once and stop.
#[derive(Debug)]
pub struct Oscilloscope {
    surface: Surface,
    zoom: Zoom,
    paused: bool,
    /// Seconds of scroll accumulated so far.
    phase: f64,
    last_frame: Option<Duration>,
    scheduler: FrameScheduler,
    signal: Option<Signal>,
    /// Carrier cycles per symbol of the modulated records this scope shows.
    cycles_per_symbol: f64,
}

impl Default for Oscilloscope {
    fn default() -> Self {
        Self::new(Surface::default())
    }
}

impl Oscilloscope {
    pub fn new(surface: Surface) -> Self {
        let mut scope = Self {
            surface,
            zoom: Zoom::default(),
            paused: false,
            phase: 0.0,
            last_frame: None,
            scheduler: FrameScheduler::new(),
            signal: None,
            cycles_per_symbol: DEFAULT_CYCLES_PER_SYMBOL,
        };
        scope.scheduler.arm();
        scope
    }

    pub fn zoom(&self) -> Zoom {
        self.zoom
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }

    pub fn signal(&self) -> Option<&Signal> {
        self.signal.as_ref()
    }

    pub fn cycles_per_symbol(&self) -> f64 {
        self.cycles_per_symbol
    }

    /// Match the framing of the modulator feeding this scope. Non-positive or
    /// non-finite values are ignored.
    pub fn set_cycles_per_symbol(&mut self, cycles: f64) {
        if cycles.is_finite() && cycles > 0.0 && cycles != self.cycles_per_symbol {
            self.cycles_per_symbol = cycles;
            self.restart();
        }
    }

    /// Whether a frame is waiting to be drawn.
    pub fn has_pending_frame(&self) -> bool {
        self.scheduler.is_armed()
    }

    /// Follow the graph's displayed signal. A changed input cancels the
    /// pending frame and starts over. Returns whether it changed.
    pub fn sync(&mut self, signal: Option<&Signal>) -> bool {
        if self.signal.as_ref() == signal {
            return false;
        }
        self.signal = signal.cloned();
        self.restart();
        true
    }

    pub fn pause(&mut self) {
        self.paused = true;
        self.restart();
    }

    pub fn play(&mut self) {
        self.paused = false;
        self.restart();
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.play();
        } else {
            self.pause();
        }
    }

    pub fn zoom_x_in(&mut self) {
        self.zoom.step_x(ZOOM_STEP);
        self.restart();
    }

    pub fn zoom_x_out(&mut self) {
        self.zoom.step_x(-ZOOM_STEP);
        self.restart();
    }

    pub fn zoom_y_in(&mut self) {
        self.zoom.step_y(ZOOM_STEP);
        self.restart();
    }

    pub fn zoom_y_out(&mut self) {
        self.zoom.step_y(-ZOOM_STEP);
        self.restart();
    }

    pub fn set_zoom(&mut self, x: f64, y: f64) {
        self.zoom.set_x(x);
        self.zoom.set_y(y);
        self.restart();
    }

    pub fn reset_zoom(&mut self) {
        self.zoom.reset();
        self.restart();
    }

    pub fn wheel(&mut self, input: WheelInput) {
        if self.zoom.apply_wheel(input) {
            self.restart();
        }
    }

    /// Stop drawing for good (the instrument is going away).
    pub fn shutdown(&mut self) {
        self.scheduler.cancel();
        self.last_frame = None;
    }

    /// Grid for the current view, without drawing a frame.
    pub fn grid(&self) -> Grid {
        Grid::compute(self.surface, self.zoom, self.signal.as_ref())
    }

    /// Draw the pending frame, if any. `now` is a monotonic timestamp.
    pub fn render(&mut self, now: Duration) -> Option<ScopeFrame> {
        if !self.scheduler.take() {
            return None;
        }
        let grid = self.grid();

        let animated = self.signal.as_ref().is_some_and(|s| {
            matches!(
                trace::classify(s),
                Drawable::Analog(_) | Drawable::Modulated(_)
            )
        });
        if animated {
            self.advance(now);
        }

        let trace = match self.signal.as_ref().map(trace::classify) {
            None => None,
            Some(Drawable::Digital(digital)) => {
                trace::digital_trace(&trace::display_bits(digital), &grid)
            }
            Some(Drawable::Analog(analog)) => Some(trace::analog_trace(analog, &grid, self.phase)),
            Some(Drawable::Modulated(modulated)) => {
                Some(trace::modulated_trace(
                    modulated,
                    &grid,
                    self.phase,
                    self.cycles_per_symbol,
                ))
            }
            Some(Drawable::Invalid(reason)) => {
                debug!(reason, "signal not drawable, grid only");
                None
            }
        };

        Some(ScopeFrame { grid, trace })
    }

    /// Cancel whatever is pending, forget the frame clock and ask for a
    /// fresh frame. Resuming therefore never jumps the phase.
    fn restart(&mut self) {
        self.scheduler.cancel();
        self.last_frame = None;
        self.scheduler.arm();
    }

    fn advance(&mut self, now: Duration) {
        let last = *self.last_frame.get_or_insert(now);
        let dt = now.saturating_sub(last).as_secs_f64().min(MAX_FRAME_STEP);
        self.last_frame = Some(now);
        self.phase += dt;
        if !self.paused {
            self.scheduler.arm();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::trace::TraceKind;
    use crate::signal::Waveform;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn empty_scope_draws_grid_once() {
        let mut scope = Oscilloscope::default();
        let frame = scope.render(ms(0)).unwrap();
        assert!(frame.trace.is_none());
        assert!(scope.render(ms(16)).is_none());
    }

    #[test]
    fn analog_keeps_animating_and_accumulates_phase() {
        let mut scope = Oscilloscope::default();
        scope.sync(Some(&Signal::analog(Waveform::Sine, 500.0, 5.0)));

        let first = scope.render(ms(1000)).unwrap();
        assert_eq!(first.trace.unwrap().kind, TraceKind::Analog);
        assert_eq!(scope.phase(), 0.0);
        assert!(scope.has_pending_frame());

        scope.render(ms(1016)).unwrap();
        assert!((scope.phase() - 0.016).abs() < 1e-9);
    }

    #[test]
    fn stalls_are_capped() {
        let mut scope = Oscilloscope::default();
        scope.sync(Some(&Signal::analog(Waveform::Sine, 500.0, 5.0)));
        scope.render(ms(0));
        scope.render(ms(5000));
        assert!((scope.phase() - MAX_FRAME_STEP).abs() < 1e-12);
    }

    #[test]
    fn pause_freezes_and_resume_does_not_jump() {
        let mut scope = Oscilloscope::default();
        scope.sync(Some(&Signal::analog(Waveform::Triangle, 100.0, 1.0)));
        scope.render(ms(0));
        scope.render(ms(20));
        let before = scope.phase();

        scope.pause();
        // one still frame, then nothing
        assert!(scope.render(ms(40)).is_some());
        assert!(scope.render(ms(60)).is_none());
        assert_eq!(scope.phase(), before);

        scope.play();
        scope.render(ms(10_000));
        assert_eq!(scope.phase(), before);
        scope.render(ms(10_016));
        assert!((scope.phase() - before - 0.016).abs() < 1e-9);
    }

    #[test]
    fn digital_draws_once() {
        let mut scope = Oscilloscope::default();
        scope.sync(Some(&Signal::digital("10110010", vec![])));
        let frame = scope.render(ms(0)).unwrap();
        let trace = frame.trace.unwrap();
        assert_eq!(trace.kind, TraceKind::Digital);
        assert_eq!(trace.points.len(), 17);
        assert!(!scope.has_pending_frame());
    }

    #[test]
    fn new_signal_replaces_pending_frame() {
        let mut scope = Oscilloscope::default();
        let sine = Signal::analog(Waveform::Sine, 500.0, 5.0);
        assert!(scope.sync(Some(&sine)));
        assert!(!scope.sync(Some(&sine)));
        scope.render(ms(0));
        assert!(scope.has_pending_frame());

        assert!(scope.sync(Some(&Signal::digital("11110000", vec![]))));
        let frame = scope.render(ms(16)).unwrap();
        assert_eq!(frame.trace.unwrap().kind, TraceKind::Digital);
        assert!(!scope.has_pending_frame());
    }

    #[test]
    fn invalid_signal_draws_grid_only() {
        let mut scope = Oscilloscope::default();
        scope.sync(Some(&Signal::analog(Waveform::Sine, f64::INFINITY, 1.0)));
        let frame = scope.render(ms(0)).unwrap();
        assert!(frame.trace.is_none());
        assert!(!scope.has_pending_frame());
    }

    #[test]
    fn zoom_changes_redraw() {
        let mut scope = Oscilloscope::default();
        scope.render(ms(0));
        scope.zoom_x_in();
        let frame = scope.render(ms(1)).unwrap();
        assert_eq!(frame.grid.logical_width, 400.0);
        scope.reset_zoom();
        assert_eq!(scope.zoom(), Zoom::default());
    }

    #[test]
    fn framing_ignores_nonsense() {
        let mut scope = Oscilloscope::default();
        scope.set_cycles_per_symbol(6.0);
        assert_eq!(scope.cycles_per_symbol(), 6.0);
        scope.set_cycles_per_symbol(0.0);
        scope.set_cycles_per_symbol(f64::NAN);
        assert_eq!(scope.cycles_per_symbol(), 6.0);
    }

    #[test]
    fn shutdown_cancels() {
        let mut scope = Oscilloscope::default();
        scope.sync(Some(&Signal::analog(Waveform::Sine, 500.0, 5.0)));
        scope.shutdown();
        assert!(scope.render(ms(0)).is_none());
    }
}
