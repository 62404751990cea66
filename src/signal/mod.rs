//! The value carried along graph edges.
//!
//! A [`Signal`] is either an analog description (waveform, frequency,
//! amplitude), a modulated analog buffer produced by the modulator, or a
//! digital bit pattern with its quantized voltage levels.

pub mod bits;

use serde::{Deserialize, Serialize};

use crate::dsp::keying::Scheme;
pub use bits::BitPayload;

/// Analog waveform families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    #[default]
    Sine,
    Square,
    Triangle,
    Sawtooth,
    /// Sample buffer produced by the modulator.
    Modulated,
}

impl Waveform {
    /// Shapes a function generator can be set to.
    pub const SELECTABLE: [Waveform; 4] = [
        Waveform::Sine,
        Waveform::Square,
        Waveform::Triangle,
        Waveform::Sawtooth,
    ];

    /// Next selectable shape, wrapping around.
    pub fn next(self) -> Self {
        let index = Self::SELECTABLE.iter().position(|w| *w == self).unwrap_or(0);
        Self::SELECTABLE[(index + 1) % Self::SELECTABLE.len()]
    }

    pub fn name(self) -> &'static str {
        match self {
            Waveform::Sine => "sine",
            Waveform::Square => "square",
            Waveform::Triangle => "triangle",
            Waveform::Sawtooth => "sawtooth",
            Waveform::Modulated => "modulated",
        }
    }
}

/// Coarse signal type tag, as used on the wire (`"type": "analog"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalKind {
    Analog,
    Digital,
}

impl SignalKind {
    pub fn name(self) -> &'static str {
        match self {
            SignalKind::Analog => "analog",
            SignalKind::Digital => "digital",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalogSignal {
    pub waveform: Waveform,
    /// Hz
    pub frequency: f64,
    /// Volts
    pub amplitude: f64,
}

impl AnalogSignal {
    pub fn new(waveform: Waveform, frequency: f64, amplitude: f64) -> Self {
        Self {
            waveform,
            frequency,
            amplitude,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DigitalSignal {
    pub bits: BitPayload,
    /// Voltage level per bit. May be empty for hand-built signals.
    pub quantized: Vec<f64>,
}

/// Output of the modulator. Same shape whether the remote service or the
/// local fallback produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModulatedSignal {
    #[serde(rename = "type")]
    pub kind: SignalKind,
    pub waveform: Waveform,
    pub samples: Vec<f64>,
    #[serde(rename = "source")]
    pub scheme: Scheme,
    pub frequency: f64,
    pub amplitude: f64,
    pub samples_per_symbol: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    Analog(AnalogSignal),
    Modulated(ModulatedSignal),
    Digital(DigitalSignal),
}

impl Signal {
    pub fn analog(waveform: Waveform, frequency: f64, amplitude: f64) -> Self {
        Signal::Analog(AnalogSignal::new(waveform, frequency, amplitude))
    }

    pub fn digital(bits: impl Into<BitPayload>, quantized: Vec<f64>) -> Self {
        Signal::Digital(DigitalSignal {
            bits: bits.into(),
            quantized,
        })
    }

    pub fn kind(&self) -> SignalKind {
        match self {
            Signal::Analog(_) | Signal::Modulated(_) => SignalKind::Analog,
            Signal::Digital(_) => SignalKind::Digital,
        }
    }

    pub fn waveform(&self) -> Option<Waveform> {
        match self {
            Signal::Analog(a) => Some(a.waveform),
            Signal::Modulated(m) => Some(m.waveform),
            Signal::Digital(_) => None,
        }
    }

    pub fn frequency(&self) -> Option<f64> {
        match self {
            Signal::Analog(a) => Some(a.frequency),
            Signal::Modulated(m) => Some(m.frequency),
            Signal::Digital(_) => None,
        }
    }

    pub fn amplitude(&self) -> Option<f64> {
        match self {
            Signal::Analog(a) => Some(a.amplitude),
            Signal::Modulated(m) => Some(m.amplitude),
            Signal::Digital(_) => None,
        }
    }

    /// Bit payload, for signals that carry one.
    pub fn bits(&self) -> Option<&BitPayload> {
        match self {
            Signal::Digital(d) => Some(&d.bits),
            _ => None,
        }
    }
}

impl From<AnalogSignal> for Signal {
    fn from(signal: AnalogSignal) -> Self {
        Signal::Analog(signal)
    }
}

impl From<ModulatedSignal> for Signal {
    fn from(signal: ModulatedSignal) -> Self {
        Signal::Modulated(signal)
    }
}

impl From<DigitalSignal> for Signal {
    fn from(signal: DigitalSignal) -> Self {
        Signal::Digital(signal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn waveform_cycle_skips_modulated() {
        let mut w = Waveform::Sine;
        for _ in 0..4 {
            w = w.next();
            assert_ne!(w, Waveform::Modulated);
        }
        assert_eq!(w, Waveform::Sine);
        assert_eq!(Waveform::Modulated.next(), Waveform::Square);
    }

    #[test]
    fn modulated_signal_is_analog() {
        let signal = Signal::Modulated(ModulatedSignal {
            kind: SignalKind::Analog,
            waveform: Waveform::Modulated,
            samples: vec![0.0; 4],
            scheme: Scheme::Psk,
            frequency: 1000.0,
            amplitude: 1.0,
            samples_per_symbol: 4,
        });
        assert_eq!(signal.kind(), SignalKind::Analog);
        assert_eq!(signal.frequency(), Some(1000.0));
        assert!(signal.bits().is_none());
    }

    #[test]
    fn modulated_wire_names() {
        let json = serde_json::json!({
            "type": "analog",
            "waveform": "modulated",
            "samples": [0.0, 1.0],
            "source": "FSK",
            "frequency": 1000.0,
            "amplitude": 2.0,
            "samples_per_symbol": 2
        });
        let signal: ModulatedSignal = serde_json::from_value(json).unwrap();
        assert_eq!(signal.scheme, Scheme::Fsk);
        assert_eq!(signal.kind, SignalKind::Analog);
        assert_eq!(signal.samples.len(), 2);
    }
}
