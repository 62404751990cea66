use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::BenchConfig;
use crate::dsp::keying;
use crate::error::TransportError;
use crate::modulation::wire::ModulationRequest;
use crate::signal::{ModulatedSignal, SignalKind, Waveform};

/*
Remote-First Modulation
=======================

The modulator asks a remote service to do the keying, and if that fails for
any reason it does the keying itself. Callers see one result either way:

    request ──► transport.send() ──ok──► shape check ──ok──► result
                      │                        │
                      └──────── err ───────────┴──► local keying ──► result

A failure is logged and never surfaced. The local computation is
deterministic and produces exactly the same record shape, so the oscilloscope
cannot tell which path ran.


Transports
----------

ModulationTransport is the seam between the engine and the network.

  HttpTransport     POSTs the request as JSON and decodes the JSON reply.
                    Non-2xx status, connection failure, timeout and decode
                    errors all come back as TransportError.

  OfflineTransport  Always fails with TransportError::Offline, so the engine
                    runs purely local. Used for `offline = true` configs.

Tests plug in their own transports to script successes and failures.
*/

/// Carries a modulation request to wherever the keying is done remotely.
pub trait ModulationTransport: Send + Sync {
    fn send(&self, request: &ModulationRequest) -> Result<ModulatedSignal, TransportError>;
}

/// JSON over HTTP POST.
pub struct HttpTransport {
    agent: ureq::Agent,
    url: String,
}

impl HttpTransport {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            agent,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl ModulationTransport for HttpTransport {
    fn send(&self, request: &ModulationRequest) -> Result<ModulatedSignal, TransportError> {
        let response = self
            .agent
            .post(&self.url)
            .send_json(request)
            .map_err(|err| match err {
                ureq::Error::Status(code, _) => TransportError::Status(code),
                ureq::Error::Transport(transport) => TransportError::Io(transport.to_string()),
            })?;

        response
            .into_json::<ModulatedSignal>()
            .map_err(|err| TransportError::Decode(err.to_string()))
    }
}

/// Never reaches a service.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineTransport;

impl ModulationTransport for OfflineTransport {
    fn send(&self, _request: &ModulationRequest) -> Result<ModulatedSignal, TransportError> {
        Err(TransportError::Offline)
    }
}

/// Remote-first modulation with a deterministic local fallback.
pub struct ModulationEngine {
    transport: Box<dyn ModulationTransport>,
}

impl ModulationEngine {
    pub fn new(transport: impl ModulationTransport + 'static) -> Self {
        Self {
            transport: Box::new(transport),
        }
    }

    /// Engine that never touches the network.
    pub fn offline() -> Self {
        Self::new(OfflineTransport)
    }

    pub fn from_config(config: &BenchConfig) -> Self {
        if config.offline {
            info!("modulation service disabled, keying locally");
            Self::offline()
        } else {
            info!(url = %config.service_url, "using remote modulation service");
            Self::new(HttpTransport::new(
                config.service_url.clone(),
                config.request_timeout(),
            ))
        }
    }

    /// Run one modulation. Always yields a result.
    pub fn modulate(&self, request: &ModulationRequest) -> ModulatedSignal {
        match self.try_remote(request) {
            Ok(signal) => {
                debug!(scheme = %request.modulation, samples = signal.samples.len(), "remote modulation");
                signal
            }
            Err(TransportError::Offline) => local(request),
            Err(err) => {
                warn!(%err, "remote modulation failed, using local fallback");
                local(request)
            }
        }
    }

    fn try_remote(&self, request: &ModulationRequest) -> Result<ModulatedSignal, TransportError> {
        let signal = self.transport.send(request)?;
        request
            .check_response(&signal)
            .map_err(TransportError::Shape)?;
        Ok(signal)
    }
}

/// Local keying, same record shape as the service.
pub fn local(request: &ModulationRequest) -> ModulatedSignal {
    let params = request.keying_params();
    let samples = keying::key(request.modulation, &request.message.bits, &params);
    ModulatedSignal {
        kind: SignalKind::Analog,
        waveform: Waveform::Modulated,
        samples,
        scheme: request.modulation,
        frequency: request.carrier.frequency,
        amplitude: request.carrier.amplitude,
        samples_per_symbol: request.samples_per_symbol,
    }
}
