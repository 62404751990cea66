//! Application state: the bench plus a background modulation worker.

use std::thread::{self, JoinHandle};
use std::time::Duration;

use color_eyre::eyre::{Result as EyreResult, WrapErr};
use rtrb::{Consumer, Producer, RingBuffer};
use tracing::{info, warn};

use benchtop::graph::{bench_ids, CARRIER_PORT, MESSAGE_PORT};
use benchtop::modulation::{ModulationEngine, ModulationRequest};
use benchtop::signal::ModulatedSignal;
use benchtop::{Bench, BenchConfig, BenchError};

/// Requests and results in flight at once. The modulator's busy flag keeps
/// this at one per instance.
const RING_CAPACITY: usize = 4;

/// How long the worker sleeps when it has nothing to do.
const IDLE_WAIT: Duration = Duration::from_millis(10);

/// A wire the user can plug or unplug from the keyboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    GeneratorToScope,
    GeneratorToCarrier,
    DigitalToMessage,
    DigitalToScope,
    ModulatorToScope,
}

impl Route {
    pub const ALL: [Route; 5] = [
        Route::GeneratorToScope,
        Route::GeneratorToCarrier,
        Route::DigitalToMessage,
        Route::DigitalToScope,
        Route::ModulatorToScope,
    ];

    /// `(source, target, target_port)`
    pub fn endpoints(self) -> (&'static str, &'static str, Option<&'static str>) {
        use bench_ids::*;
        match self {
            Route::GeneratorToScope => (ANALOG_GENERATOR, OSCILLOSCOPE, None),
            Route::GeneratorToCarrier => (ANALOG_GENERATOR, MODULATOR, Some(CARRIER_PORT)),
            Route::DigitalToMessage => (DIGITAL_GENERATOR, MODULATOR, Some(MESSAGE_PORT)),
            Route::DigitalToScope => (DIGITAL_GENERATOR, OSCILLOSCOPE, None),
            Route::ModulatorToScope => (MODULATOR, OSCILLOSCOPE, None),
        }
    }

    pub fn key(self) -> char {
        match self {
            Route::GeneratorToScope => 'o',
            Route::GeneratorToCarrier => 'c',
            Route::DigitalToMessage => 'd',
            Route::DigitalToScope => 'b',
            Route::ModulatorToScope => 'k',
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Route::GeneratorToScope => "fg → scope",
            Route::GeneratorToCarrier => "fg → mod.carrier",
            Route::DigitalToMessage => "dg → mod.message",
            Route::DigitalToScope => "dg → scope",
            Route::ModulatorToScope => "mod → scope",
        }
    }
}

/// Runs modulation off the UI thread. The UI pushes requests and pops
/// finished signals; the worker exits once the request side is dropped.
struct ModulationWorker {
    requests: Option<Producer<ModulationRequest>>,
    results: Consumer<ModulatedSignal>,
    handle: Option<JoinHandle<()>>,
}

impl ModulationWorker {
    fn spawn(engine: ModulationEngine) -> EyreResult<Self> {
        let (requests, mut inbox) = RingBuffer::<ModulationRequest>::new(RING_CAPACITY);
        let (mut outbox, results) = RingBuffer::<ModulatedSignal>::new(RING_CAPACITY);

        let handle = thread::Builder::new()
            .name("modulation".into())
            .spawn(move || loop {
                match inbox.pop() {
                    Ok(request) => {
                        let signal = engine.modulate(&request);
                        if outbox.push(signal).is_err() {
                            warn!("result ring full, modulation dropped");
                        }
                    }
                    Err(_) if inbox.is_abandoned() => break,
                    Err(_) => thread::park_timeout(IDLE_WAIT),
                }
            })
            .wrap_err("failed to spawn modulation worker")?;

        Ok(Self {
            requests: Some(requests),
            results,
            handle: Some(handle),
        })
    }

    fn submit(&mut self, request: ModulationRequest) -> bool {
        let Some(requests) = self.requests.as_mut() else {
            return false;
        };
        if requests.push(request).is_err() {
            return false;
        }
        if let Some(handle) = &self.handle {
            handle.thread().unpark();
        }
        true
    }

    fn poll(&mut self) -> Option<ModulatedSignal> {
        self.results.pop().ok()
    }

    /// Drop the request side and wait for the worker to drain.
    fn shutdown(&mut self) {
        self.requests = None;
        if let Some(handle) = self.handle.take() {
            handle.thread().unpark();
            if handle.join().is_err() {
                warn!("modulation worker panicked");
            }
        }
    }
}

impl Drop for ModulationWorker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Everything the UI drives: the bench itself, the worker feeding it
/// modulated signals, and the last status line.
pub struct App {
    pub bench: Bench,
    worker: ModulationWorker,
    status: String,
    endpoint: String,
}

impl App {
    pub fn new(config: &BenchConfig) -> EyreResult<Self> {
        let engine = ModulationEngine::from_config(config);
        let endpoint = if config.offline {
            "offline".to_string()
        } else {
            config.service_url.clone()
        };
        Ok(Self {
            bench: Bench::new(config),
            worker: ModulationWorker::spawn(engine)?,
            status: "ready".to_string(),
            endpoint,
        })
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Feed finished modulations back through the graph.
    pub fn poll_modulation(&mut self) {
        while let Some(signal) = self.worker.poll() {
            let scheme = signal.scheme;
            match self.bench.finish_modulation(signal) {
                Ok(delivered) => self.status = format!("{scheme} ready ({delivered} targets)"),
                Err(err) => self.report(err),
            }
        }
    }

    pub fn generate(&mut self) {
        match self.bench.generate() {
            Ok(0) => self.status = "generated (not connected)".to_string(),
            Ok(delivered) => self.status = format!("generated ({delivered} targets)"),
            Err(err) => self.report(err),
        }
    }

    pub fn quantize(&mut self) {
        match self.bench.quantize() {
            Ok(delivered) => self.status = format!("quantized ({delivered} targets)"),
            // already logged by the bench; just show it
            Err(err @ BenchError::BitLength { .. }) => self.status = err.to_string(),
            Err(err) => self.report(err),
        }
    }

    pub fn modulate(&mut self) {
        match self.bench.begin_modulation() {
            Ok(Some(request)) => {
                let scheme = request.modulation;
                if self.worker.submit(request) {
                    info!(%scheme, "modulation submitted");
                    self.status = format!("modulating ({scheme})…");
                } else {
                    self.bench.modulator.finish();
                    self.status = "modulation worker unavailable".to_string();
                }
            }
            Ok(None) => self.status = "modulation already running".to_string(),
            Err(err) => self.report(err),
        }
    }

    pub fn toggle(&mut self, route: Route) {
        let (source, target, port) = route.endpoints();
        let connected = self.bench.toggle(source, target, port);
        let verb = if connected { "connected" } else { "disconnected" };
        self.status = format!("{verb} {}", route.label());
    }

    pub fn is_connected(&self, route: Route) -> bool {
        let (source, target, _) = route.endpoints();
        self.bench.graph().is_connected(source, target)
    }

    pub fn shutdown(&mut self) {
        self.bench.scope.shutdown();
        self.worker.shutdown();
    }

    fn report(&mut self, err: BenchError) {
        warn!(%err, "bench action failed");
        self.status = err.to_string();
    }
}
