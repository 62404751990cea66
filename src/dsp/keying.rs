//! Digital-to-analog keying: turn a bit sequence into carrier samples.

/*
Keying Schemes
==============

Each message bit becomes one symbol: a fixed number of samples
(samples_per_symbol, S) covering a fixed number of carrier cycles
(cycles_per_symbol). For bit index i and sample s in [0, S):

    t     = (s / S) × (cycles_per_symbol / max(frequency, 1e-6))
    omega = 2π × frequency

So every symbol starts at t = 0: the carrier phase restarts on each bit.
B bits always produce exactly B × S samples.

  ASK   amplitude shift    A' = A for 1, A × 0.05 for 0
                           sample = A' sin(omega t)

  PSK   phase shift        phase = π for 1, 0 for 0
                           sample = A sin(omega t + phase)

  FSK   frequency shift    f' = 1.25 f for 1, 0.8 f for 0
                           sample = A sin(2π f' t)

  PWM   pulse width        duty = 0.75 for 1, 0.25 for 0
                           sample = A while s/S < duty, else 0

  PPM   pulse position     width = max(1, ⌊0.08 S⌋)
                           pos   = ⌊0.7 S⌋ for 1, ⌊0.2 S⌋ for 0
                           sample = A for pos <= s < pos + width, else 0

ASK keeps a faint 5% carrier for zeros so the symbol boundary stays visible
on the scope. PWM and PPM ignore the carrier frequency entirely.
*/

use std::f64::consts::{PI, TAU};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Keying scheme selected on the modulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Scheme {
    #[default]
    Ask,
    Psk,
    Fsk,
    Pwm,
    Ppm,
}

impl Scheme {
    pub const ALL: [Scheme; 5] = [Scheme::Ask, Scheme::Psk, Scheme::Fsk, Scheme::Pwm, Scheme::Ppm];

    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    pub fn name(self) -> &'static str {
        match self {
            Scheme::Ask => "ASK",
            Scheme::Psk => "PSK",
            Scheme::Fsk => "FSK",
            Scheme::Pwm => "PWM",
            Scheme::Ppm => "PPM",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownScheme(pub String);

impl fmt::Display for UnknownScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown modulation scheme `{}`", self.0)
    }
}

impl std::error::Error for UnknownScheme {}

impl FromStr for Scheme {
    type Err = UnknownScheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|scheme| scheme.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownScheme(s.to_string()))
    }
}

/// Carrier and framing parameters for one keying run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyingParams {
    pub frequency: f64,
    pub amplitude: f64,
    pub cycles_per_symbol: f64,
    pub samples_per_symbol: usize,
}

impl Default for KeyingParams {
    fn default() -> Self {
        Self {
            frequency: 1000.0,
            amplitude: 1.0,
            cycles_per_symbol: 3.0,
            samples_per_symbol: 64,
        }
    }
}

impl KeyingParams {
    /// Seconds covered by one symbol.
    pub fn symbol_duration(&self) -> f64 {
        self.cycles_per_symbol / self.frequency.max(1e-6)
    }
}

/// One sample of one symbol.
pub fn symbol_sample(scheme: Scheme, bit: bool, s: usize, params: &KeyingParams) -> f64 {
    let per_symbol = params.samples_per_symbol;
    let frac = s as f64 / per_symbol as f64;
    let t = frac * params.symbol_duration();
    let omega = TAU * params.frequency;
    let amp = params.amplitude;

    match scheme {
        Scheme::Ask => {
            let a = if bit { amp } else { amp * 0.05 };
            a * (omega * t).sin()
        }
        Scheme::Psk => {
            let phase = if bit { PI } else { 0.0 };
            amp * (omega * t + phase).sin()
        }
        Scheme::Fsk => {
            let f = if bit {
                params.frequency * 1.25
            } else {
                params.frequency * 0.8
            };
            amp * (TAU * f * t).sin()
        }
        Scheme::Pwm => {
            let duty = if bit { 0.75 } else { 0.25 };
            if frac < duty {
                amp
            } else {
                0.0
            }
        }
        Scheme::Ppm => {
            let width = ((per_symbol as f64 * 0.08).floor() as usize).max(1);
            let pos = if bit {
                (per_symbol as f64 * 0.7).floor() as usize
            } else {
                (per_symbol as f64 * 0.2).floor() as usize
            };
            if s >= pos && s < pos + width {
                amp
            } else {
                0.0
            }
        }
    }
}

/// Key a whole bit sequence. Output length is `bits.len() * samples_per_symbol`.
pub fn key(scheme: Scheme, bits: &[u8], params: &KeyingParams) -> Vec<f64> {
    let per_symbol = params.samples_per_symbol;
    let mut out = Vec::with_capacity(bits.len() * per_symbol);
    for &bit in bits {
        out.extend((0..per_symbol).map(|s| symbol_sample(scheme, bit != 0, s, params)));
    }
    out
}
