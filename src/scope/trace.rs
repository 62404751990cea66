//! Trace point computation for analog and digital inputs.

use crate::dsp::waveform;
use crate::scope::grid::Grid;
use crate::scope::{CYCLES_ON_SCREEN, OVERSAMPLE_FACTOR, PIXELS_PER_VOLT};
use crate::signal::{AnalogSignal, DigitalSignal, ModulatedSignal, Signal};

/// Fraction of the height, from the top, where a digital `1` sits.
pub const HIGH_Y: f64 = 0.2;
/// Fraction of the height, from the top, where a digital `0` sits.
pub const LOW_Y: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceKind {
    Analog,
    Digital,
}

/// A polyline in logical coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    pub kind: TraceKind,
    pub points: Vec<(f64, f64)>,
}

/// What the renderer can do with an input signal.
pub(crate) enum Drawable<'a> {
    Analog(&'a AnalogSignal),
    Modulated(&'a ModulatedSignal),
    Digital(&'a DigitalSignal),
    /// Structurally unusable; draw the grid only.
    Invalid(&'static str),
}

pub(crate) fn classify(signal: &Signal) -> Drawable<'_> {
    match signal {
        Signal::Analog(a) if a.frequency.is_finite() && a.amplitude.is_finite() => {
            Drawable::Analog(a)
        }
        Signal::Analog(_) => Drawable::Invalid("non-finite frequency or amplitude"),
        Signal::Modulated(m)
            if m.frequency.is_finite() && m.amplitude.is_finite() && !m.samples.is_empty() =>
        {
            Drawable::Modulated(m)
        }
        Signal::Modulated(_) => Drawable::Invalid("empty or non-finite modulated record"),
        Signal::Digital(d) => Drawable::Digital(d),
    }
}

/// Frequency the time base is built on; non-positive input falls back to 1 Hz.
pub(crate) fn effective_frequency(frequency: f64) -> f64 {
    if frequency > 0.0 {
        frequency.max(1e-4)
    } else {
        1.0
    }
}

fn sample_count(grid: &Grid) -> usize {
    ((grid.logical_width * OVERSAMPLE_FACTOR).floor() as usize).max(4)
}

/// Sweep `value(t)` across the visible window. `t` runs from `-offset` to
/// `window - offset`; `value` returns volts.
fn sweep(grid: &Grid, window: f64, offset: f64, value: impl Fn(f64) -> f64) -> Vec<(f64, f64)> {
    let n = sample_count(grid);
    let center = grid.logical_height / 2.0;
    (0..n)
        .map(|i| {
            let frac = i as f64 / (n - 1) as f64;
            let x = frac * grid.logical_width;
            let t = frac * window - offset;
            (x, center - value(t) * PIXELS_PER_VOLT)
        })
        .collect()
}

/// Closed-form analog trace, scrolled back by `phase` seconds.
pub fn analog_trace(signal: &AnalogSignal, grid: &Grid, phase: f64) -> Trace {
    let frequency = effective_frequency(signal.frequency);
    let window = CYCLES_ON_SCREEN / frequency / grid.zoom.x();
    let points = sweep(grid, window, phase, |t| {
        signal.amplitude * waveform::evaluate(signal.waveform, frequency, t)
    });
    Trace {
        kind: TraceKind::Analog,
        points,
    }
}

/// Periodic replay of a modulated record on the same time base as
/// closed-form signals, scrolled back by `phase` seconds. The record spans
/// `symbols * cycles_per_symbol / frequency` seconds.
pub fn modulated_trace(
    signal: &ModulatedSignal,
    grid: &Grid,
    phase: f64,
    cycles_per_symbol: f64,
) -> Trace {
    let frequency = effective_frequency(signal.frequency);
    let window = CYCLES_ON_SCREEN / frequency / grid.zoom.x();
    let symbols = (signal.samples.len() as f64 / signal.samples_per_symbol.max(1) as f64).max(1.0);
    let span = symbols * cycles_per_symbol / frequency;
    let points = sweep(grid, window, phase, |t| waveform::replay(&signal.samples, span, t));
    Trace {
        kind: TraceKind::Analog,
        points,
    }
}

/// 0/1 sequence shown for a digital signal: quantized levels first, then
/// the raw bit payload.
pub fn display_bits(signal: &DigitalSignal) -> Vec<u8> {
    if !signal.quantized.is_empty() {
        return signal
            .quantized
            .iter()
            .map(|&v| (v != 0.0 && !v.is_nan()) as u8)
            .collect();
    }
    signal.bits.to_display_bits()
}

/// Square stair trace: each bit held flat across an equal share of the width.
pub fn digital_trace(bits: &[u8], grid: &Grid) -> Option<Trace> {
    let first = *bits.first()?;
    let step = grid.logical_width / bits.len() as f64;
    let level = |bit: u8| {
        if bit != 0 {
            grid.logical_height * HIGH_Y
        } else {
            grid.logical_height * LOW_Y
        }
    };

    let mut points = Vec::with_capacity(bits.len() * 2 + 1);
    points.push((0.0, level(first)));
    for (i, &bit) in bits.iter().enumerate() {
        let y = level(bit);
        points.push((i as f64 * step, y));
        points.push(((i + 1) as f64 * step, y));
    }
    Some(Trace {
        kind: TraceKind::Digital,
        points,
    })
}
