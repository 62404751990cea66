//! JSON request/response shapes of the modulation service.
//!
//! ```json
//! {
//!   "modulation": "ASK",
//!   "carrier": { "frequency": 1000.0, "amplitude": 1.0, "waveform": "sine" },
//!   "message": { "bits": [1, 0, 1, 1] },
//!   "cycles_per_symbol": 3,
//!   "samples_per_symbol": 64
//! }
//! ```
//!
//! The response is a [`ModulatedSignal`](crate::signal::ModulatedSignal).

use serde::{Deserialize, Serialize};

use crate::dsp::keying::{KeyingParams, Scheme};
use crate::signal::{bits, ModulatedSignal, Signal, SignalKind, Waveform};

pub const DEFAULT_CARRIER_FREQUENCY: f64 = 1000.0;
pub const DEFAULT_CARRIER_AMPLITUDE: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarrierSpec {
    pub frequency: f64,
    pub amplitude: f64,
    pub waveform: Waveform,
}

impl Default for CarrierSpec {
    fn default() -> Self {
        Self {
            frequency: DEFAULT_CARRIER_FREQUENCY,
            amplitude: DEFAULT_CARRIER_AMPLITUDE,
            waveform: Waveform::Sine,
        }
    }
}

impl CarrierSpec {
    /// Carrier taken from whatever sits on the modulator's carrier port.
    /// Missing or digital inputs give the default 1 kHz, 1 V sine.
    pub fn from_input(input: Option<&Signal>) -> Self {
        match input {
            Some(Signal::Analog(a)) => Self {
                frequency: a.frequency,
                amplitude: a.amplitude,
                waveform: a.waveform,
            },
            Some(Signal::Modulated(m)) => Self {
                frequency: m.frequency,
                amplitude: m.amplitude,
                waveform: Waveform::Sine,
            },
            Some(Signal::Digital(_)) | None => Self::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageSpec {
    pub bits: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModulationRequest {
    pub modulation: Scheme,
    pub carrier: CarrierSpec,
    pub message: MessageSpec,
    pub cycles_per_symbol: u32,
    pub samples_per_symbol: usize,
}

impl ModulationRequest {
    /// Build a request from the modulator's port values. The message is
    /// normalized to 0/1 and an empty message keys a single `1`.
    pub fn from_inputs(
        scheme: Scheme,
        carrier: Option<&Signal>,
        message: Option<&Signal>,
        cycles_per_symbol: u32,
        samples_per_symbol: usize,
    ) -> Self {
        let normalized = bits::normalize(message.and_then(Signal::bits));
        Self {
            modulation: scheme,
            carrier: CarrierSpec::from_input(carrier),
            message: MessageSpec {
                bits: bits::or_single_mark(normalized),
            },
            cycles_per_symbol,
            samples_per_symbol,
        }
    }

    pub fn keying_params(&self) -> KeyingParams {
        KeyingParams {
            frequency: self.carrier.frequency,
            amplitude: self.carrier.amplitude,
            cycles_per_symbol: f64::from(self.cycles_per_symbol),
            samples_per_symbol: self.samples_per_symbol,
        }
    }

    /// Number of samples a well-formed response carries.
    pub fn expected_samples(&self) -> usize {
        self.message.bits.len().max(1) * self.samples_per_symbol
    }

    /// Check that a response has the modulated-signal shape for this request.
    pub fn check_response(&self, response: &ModulatedSignal) -> Result<(), String> {
        if response.kind != SignalKind::Analog {
            return Err(format!("type is `{}`, expected `analog`", response.kind.name()));
        }
        if response.waveform != Waveform::Modulated {
            return Err(format!(
                "waveform is `{}`, expected `modulated`",
                response.waveform.name()
            ));
        }
        let expected = self.expected_samples();
        if response.samples.len() != expected {
            return Err(format!(
                "{} samples, expected {}",
                response.samples.len(),
                expected
            ));
        }
        if response.samples.iter().any(|s| !s.is_finite()) {
            return Err("non-finite sample".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_service_field_names() {
        let message = Signal::digital("1011", vec![5.0, 0.0, 5.0, 5.0]);
        let request = ModulationRequest::from_inputs(Scheme::Psk, None, Some(&message), 3, 64);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "modulation": "PSK",
                "carrier": { "frequency": 1000.0, "amplitude": 1.0, "waveform": "sine" },
                "message": { "bits": [1, 0, 1, 1] },
                "cycles_per_symbol": 3,
                "samples_per_symbol": 64
            })
        );
    }

    #[test]
    fn carrier_follows_analog_input() {
        let carrier = Signal::analog(Waveform::Square, 250.0, 2.5);
        let request = ModulationRequest::from_inputs(Scheme::Ask, Some(&carrier), None, 3, 64);
        assert_eq!(request.carrier.frequency, 250.0);
        assert_eq!(request.carrier.amplitude, 2.5);
        assert_eq!(request.carrier.waveform, Waveform::Square);
    }

    #[test]
    fn missing_message_keys_one_mark() {
        let request = ModulationRequest::from_inputs(Scheme::Ask, None, None, 3, 64);
        assert_eq!(request.message.bits, vec![1]);
        assert_eq!(request.expected_samples(), 64);

        let analog = Signal::analog(Waveform::Sine, 10.0, 1.0);
        let request = ModulationRequest::from_inputs(Scheme::Ask, None, Some(&analog), 3, 8);
        assert_eq!(request.message.bits, vec![1]);
    }

    #[test]
    fn rejects_wrong_sample_count() {
        let request = ModulationRequest::from_inputs(Scheme::Ask, None, None, 3, 4);
        let mut response = ModulatedSignal {
            kind: SignalKind::Analog,
            waveform: Waveform::Modulated,
            samples: vec![0.0; 4],
            scheme: Scheme::Ask,
            frequency: 1000.0,
            amplitude: 1.0,
            samples_per_symbol: 4,
        };
        assert!(request.check_response(&response).is_ok());
        response.samples.pop();
        assert!(request.check_response(&response).is_err());
    }
}
