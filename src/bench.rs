//! The four-instrument bench wired through one graph store.
//!
//! `Bench` is the only writer of its graph. Front panels produce values,
//! the graph routes them, and the oscilloscope is resynced from the graph
//! after every action, so each user action is one propagation cycle.

use tracing::{info, warn};

use crate::config::BenchConfig;
use crate::error::BenchError;
use crate::graph::{bench_ids, SignalGraph};
use crate::instruments::{AnalogGenerator, DigitalGenerator, Modulator};
use crate::modulation::{ModulationEngine, ModulationRequest};
use crate::scope::Oscilloscope;
use crate::signal::ModulatedSignal;

#[derive(Debug)]
pub struct Bench {
    graph: SignalGraph,
    pub analog: AnalogGenerator,
    pub digital: DigitalGenerator,
    pub modulator: Modulator,
    pub scope: Oscilloscope,
}

impl Default for Bench {
    fn default() -> Self {
        Self::new(&BenchConfig::default())
    }
}

impl Bench {
    pub fn new(config: &BenchConfig) -> Self {
        let mut scope = Oscilloscope::default();
        scope.set_cycles_per_symbol(f64::from(config.cycles_per_symbol));
        Self {
            graph: SignalGraph::bench(),
            analog: AnalogGenerator::new(),
            digital: DigitalGenerator::new(),
            modulator: Modulator::from_config(config),
            scope,
        }
    }

    pub fn graph(&self) -> &SignalGraph {
        &self.graph
    }

    /// Press "Generate" on the function generator.
    pub fn generate(&mut self) -> Result<usize, BenchError> {
        let signal = self.analog.generate();
        let delivered = self.graph.propagate(bench_ids::ANALOG_GENERATOR, signal)?;
        self.sync_scope();
        Ok(delivered)
    }

    /// Press "Quantize" on the digital generator. A wrong-length entry is
    /// refused before anything propagates.
    pub fn quantize(&mut self) -> Result<usize, BenchError> {
        let signal = self.digital.quantize().inspect_err(|err| {
            warn!(%err, "quantize refused");
        })?;
        let delivered = self.graph.propagate(bench_ids::DIGITAL_GENERATOR, signal)?;
        self.sync_scope();
        Ok(delivered)
    }

    /// Press "Modulate". `None` while a request is already in flight.
    pub fn begin_modulation(&mut self) -> Result<Option<ModulationRequest>, BenchError> {
        let (carrier, message) = self.graph.modulator_inputs(bench_ids::MODULATOR)?;
        Ok(self.modulator.begin(carrier, message))
    }

    /// Feed a finished modulation back through the graph and re-enable the
    /// trigger.
    pub fn finish_modulation(&mut self, signal: ModulatedSignal) -> Result<usize, BenchError> {
        self.modulator.finish();
        info!(scheme = %signal.scheme, samples = signal.samples.len(), "modulation complete");
        let delivered = self.graph.propagate(bench_ids::MODULATOR, signal.into())?;
        self.sync_scope();
        Ok(delivered)
    }

    /// Run a whole modulation cycle on the calling thread.
    pub fn modulate(&mut self, engine: &ModulationEngine) -> Result<Option<usize>, BenchError> {
        let Some(request) = self.begin_modulation()? else {
            return Ok(None);
        };
        let signal = engine.modulate(&request);
        self.finish_modulation(signal).map(Some)
    }

    pub fn connect(
        &mut self,
        source: &str,
        source_port: Option<&str>,
        target: &str,
        target_port: Option<&str>,
    ) -> bool {
        let connected = self
            .graph
            .connect(source, source_port, target, target_port)
            .is_some();
        self.sync_scope();
        connected
    }

    pub fn disconnect(&mut self, source: &str, target: &str) -> usize {
        let removed = self.graph.disconnect(source, target);
        self.sync_scope();
        removed
    }

    /// Connect if unconnected, disconnect otherwise. Returns the new state.
    pub fn toggle(&mut self, source: &str, target: &str, target_port: Option<&str>) -> bool {
        if self.graph.is_connected(source, target) {
            self.disconnect(source, target);
            false
        } else {
            self.connect(source, None, target, target_port)
        }
    }

    fn sync_scope(&mut self) {
        let shown = self.graph.displayed_signal(bench_ids::OSCILLOSCOPE);
        self.scope.sync(shown);
    }
}
