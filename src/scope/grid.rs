//! Graticule geometry: divisions, per-division scales and axis labels.

use crate::scope::trace::effective_frequency;
use crate::scope::zoom::Zoom;
use crate::scope::{CYCLES_ON_SCREEN, DIVISIONS_X, DIVISIONS_Y, PIXELS_PER_VOLT};
use crate::signal::{Signal, SignalKind};

/// Device-pixel size of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub width: f64,
    pub height: f64,
}

impl Default for Surface {
    fn default() -> Self {
        Self {
            width: 500.0,
            height: 300.0,
        }
    }
}

/// Text placed at a device-pixel position.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub x: f64,
    pub y: f64,
    pub text: String,
}

/// Everything needed to draw the graticule for one frame.
///
/// Line positions are in logical units (device pixels divided by zoom);
/// labels are in device pixels so text stays crisp at any zoom.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    pub surface: Surface,
    pub zoom: Zoom,
    pub logical_width: f64,
    pub logical_height: f64,
    pub volts_per_division: f64,
    /// Seconds shown across the screen. `None` for digital or unknown signals.
    pub time_window: Option<f64>,
    pub time_per_division: Option<f64>,
    /// x of each vertical line, left to right.
    pub verticals: Vec<f64>,
    /// y of each horizontal line, top to bottom.
    pub horizontals: Vec<f64>,
    pub voltage_labels: Vec<Label>,
    pub time_labels: Vec<Label>,
}

impl Grid {
    pub fn compute(surface: Surface, zoom: Zoom, signal: Option<&Signal>) -> Self {
        let logical_width = surface.width / zoom.x();
        let logical_height = surface.height / zoom.y();
        let step_x = logical_width / DIVISIONS_X as f64;
        let step_y = logical_height / DIVISIONS_Y as f64;
        let volts_per_division = step_y / PIXELS_PER_VOLT;

        let time_window = signal.and_then(|s| time_window(s, zoom.x()));
        let time_per_division = time_window.map(|w| w / DIVISIONS_X as f64);

        let verticals: Vec<f64> = (0..=DIVISIONS_X).map(|i| i as f64 * step_x).collect();
        let horizontals: Vec<f64> = (0..=DIVISIONS_Y).map(|j| j as f64 * step_y).collect();

        let center = logical_height / 2.0;
        let voltage_labels = horizontals
            .iter()
            .map(|&y| Label {
                x: 6.0,
                y: (y * zoom.y()).round(),
                text: format!("{:.2} V", (center - y) / PIXELS_PER_VOLT),
            })
            .collect();

        let time_labels = verticals
            .iter()
            .enumerate()
            .map(|(i, &x)| Label {
                x: (x * zoom.x()).round() + 4.0,
                y: 6.0,
                text: time_per_division
                    .map(|per| format_time(per * i as f64))
                    .unwrap_or_default(),
            })
            .collect();

        Self {
            surface,
            zoom,
            logical_width,
            logical_height,
            volts_per_division,
            time_window,
            time_per_division,
            verticals,
            horizontals,
            voltage_labels,
            time_labels,
        }
    }

    /// Index of the emphasized center horizontal line.
    pub fn center_line(&self) -> usize {
        DIVISIONS_Y / 2
    }
}

/// Seconds visible across the screen for an analog signal of known frequency.
pub fn time_window(signal: &Signal, zoom_x: f64) -> Option<f64> {
    if signal.kind() != SignalKind::Analog {
        return None;
    }
    let frequency = signal.frequency().filter(|f| f.is_finite())?;
    Some((CYCLES_ON_SCREEN / effective_frequency(frequency)) / zoom_x)
}

/// Format a duration with the largest unit that keeps it at or above 1.
pub fn format_time(seconds: f64) -> String {
    if seconds >= 1.0 {
        format!("{:.2} s", seconds)
    } else if seconds >= 1e-3 {
        format!("{:.2} ms", seconds * 1e3)
    } else if seconds >= 1e-6 {
        format!("{:.2} µs", seconds * 1e6)
    } else {
        format!("{:.2} ns", seconds * 1e9)
    }
}
