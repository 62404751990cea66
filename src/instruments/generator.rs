//! Function generator front panels.

/*
Generators
==========

Both generators are sources: they have no inputs and produce a fresh
Signal each time their button is pressed. They hold only what the user has
dialed in; the graph decides where the output goes.

ANALOG   frequency (Hz), amplitude (V) and a waveform shape.
         Out-of-range entries are clamped, non-finite entries ignored.

DIGITAL  an 8-bit pattern typed as 0s and 1s. Anything else is dropped as
         it is typed. Quantizing maps 1 → 5 V and 0 → 0 V, and refuses to
         run until exactly 8 bits are entered.
*/

use tracing::debug;

use crate::error::BenchError;
use crate::signal::{AnalogSignal, Signal, Waveform};

pub const FREQUENCY_RANGE: (f64, f64) = (1.0, 100_000.0);
pub const AMPLITUDE_RANGE: (f64, f64) = (0.0, 100.0);

/// Required bit pattern length for the digital generator.
pub const BIT_WIDTH: usize = 8;
/// Voltage of a quantized `1`.
pub const HIGH_LEVEL: f64 = 5.0;
pub const LOW_LEVEL: f64 = 0.0;

#[derive(Debug, Clone, PartialEq)]
pub struct AnalogGenerator {
    frequency: f64,
    amplitude: f64,
    waveform: Waveform,
}

impl Default for AnalogGenerator {
    fn default() -> Self {
        Self {
            frequency: 500.0,
            amplitude: 5.0,
            waveform: Waveform::Sine,
        }
    }
}

impl AnalogGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    pub fn set_frequency(&mut self, hz: f64) {
        if hz.is_finite() {
            self.frequency = hz.clamp(FREQUENCY_RANGE.0, FREQUENCY_RANGE.1);
        }
    }

    pub fn set_amplitude(&mut self, volts: f64) {
        if volts.is_finite() {
            self.amplitude = volts.clamp(AMPLITUDE_RANGE.0, AMPLITUDE_RANGE.1);
        }
    }

    /// Only the closed-form shapes are selectable; `Modulated` is ignored.
    pub fn set_waveform(&mut self, waveform: Waveform) {
        if waveform != Waveform::Modulated {
            self.waveform = waveform;
        }
    }

    pub fn cycle_waveform(&mut self) {
        self.waveform = self.waveform.next();
    }

    /// Builder-style setters; same clamping as the `set_*` methods.
    pub fn with_frequency(mut self, hz: f64) -> Self {
        self.set_frequency(hz);
        self
    }

    pub fn with_amplitude(mut self, volts: f64) -> Self {
        self.set_amplitude(volts);
        self
    }

    pub fn with_waveform(mut self, waveform: Waveform) -> Self {
        self.set_waveform(waveform);
        self
    }

    pub fn generate(&self) -> Signal {
        let signal = AnalogSignal::new(self.waveform, self.frequency, self.amplitude);
        debug!(?signal, "analog generator emitted");
        Signal::Analog(signal)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DigitalGenerator {
    entry: String,
}

impl DigitalGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry(&self) -> &str {
        &self.entry
    }

    /// Replace the entry, keeping only `0`/`1` and at most 8 of them.
    pub fn set_entry(&mut self, text: &str) {
        self.entry = text
            .chars()
            .filter(|ch| matches!(ch, '0' | '1'))
            .take(BIT_WIDTH)
            .collect();
    }

    /// Type one character. Returns whether it was accepted.
    pub fn push(&mut self, ch: char) -> bool {
        if matches!(ch, '0' | '1') && self.entry.len() < BIT_WIDTH {
            self.entry.push(ch);
            true
        } else {
            false
        }
    }

    pub fn backspace(&mut self) {
        self.entry.pop();
    }

    pub fn clear(&mut self) {
        self.entry.clear();
    }

    pub fn quantize(&self) -> Result<Signal, BenchError> {
        let len = self.entry.len();
        if len != BIT_WIDTH {
            return Err(BenchError::BitLength { len });
        }
        let quantized = self
            .entry
            .chars()
            .map(|ch| if ch == '1' { HIGH_LEVEL } else { LOW_LEVEL })
            .collect();
        debug!(bits = %self.entry, "digital generator quantized");
        Ok(Signal::digital(self.entry.as_str(), quantized))
    }
}
