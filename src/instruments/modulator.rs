//! Modulator front panel: scheme selection and the in-flight guard.

use tracing::debug;

use crate::config::BenchConfig;
use crate::dsp::keying::Scheme;
use crate::modulation::ModulationRequest;
use crate::signal::Signal;

/// Per-instance modulator state. The engine does the work; this holds what
/// the user selected and whether a request is already running.
#[derive(Debug, Clone, PartialEq)]
pub struct Modulator {
    scheme: Scheme,
    cycles_per_symbol: u32,
    samples_per_symbol: usize,
    busy: bool,
}

impl Default for Modulator {
    fn default() -> Self {
        Self::new(3, 64)
    }
}

impl Modulator {
    pub fn new(cycles_per_symbol: u32, samples_per_symbol: usize) -> Self {
        Self {
            scheme: Scheme::default(),
            cycles_per_symbol,
            samples_per_symbol,
            busy: false,
        }
    }

    pub fn from_config(config: &BenchConfig) -> Self {
        Self::new(config.cycles_per_symbol, config.samples_per_symbol)
    }

    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    pub fn set_scheme(&mut self, scheme: Scheme) {
        self.scheme = scheme;
    }

    pub fn cycle_scheme(&mut self) {
        self.scheme = self.scheme.next();
    }

    pub fn cycles_per_symbol(&self) -> u32 {
        self.cycles_per_symbol
    }

    pub fn samples_per_symbol(&self) -> usize {
        self.samples_per_symbol
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Press the trigger. Returns the request to run, or `None` while a
    /// previous request is still in flight.
    pub fn begin(
        &mut self,
        carrier: Option<&Signal>,
        message: Option<&Signal>,
    ) -> Option<ModulationRequest> {
        if self.busy {
            debug!("modulation already in flight, trigger ignored");
            return None;
        }
        self.busy = true;
        Some(ModulationRequest::from_inputs(
            self.scheme,
            carrier,
            message,
            self.cycles_per_symbol,
            self.samples_per_symbol,
        ))
    }

    /// Re-enable the trigger once the result has been delivered.
    pub fn finish(&mut self) {
        self.busy = false;
    }
}

/// One-line readout of the modulator's inputs.
pub fn input_summary(carrier: Option<&Signal>, message: Option<&Signal>) -> String {
    let carrier = match carrier {
        Some(signal) => format!(
            "{}Hz, {}V",
            signal.frequency().map_or("—".to_string(), |f| f.to_string()),
            signal.amplitude().map_or("—".to_string(), |a| a.to_string()),
        ),
        None => "—".to_string(),
    };
    let message = message
        .and_then(Signal::bits)
        .map_or("—".to_string(), |bits| bits.describe());
    format!("carrier: {carrier}  message: {message}")
}
