use benchtop::dsp::keying::Scheme;
use benchtop::graph::{bench_ids::*, SignalGraph, CARRIER_PORT};
use benchtop::modulation::{local, ModulationEngine, ModulationRequest, ModulationTransport};
use benchtop::scope::{Oscilloscope, TraceKind, Zoom};
use benchtop::signal::bits::{normalize, BitPayload};
use benchtop::signal::ModulatedSignal;
use benchtop::{Bench, BenchConfig, BenchError, Signal, TransportError, Waveform};

use std::time::Duration;

struct Unreachable;

impl ModulationTransport for Unreachable {
    fn send(&self, _: &ModulationRequest) -> Result<ModulatedSignal, TransportError> {
        Err(TransportError::Io("connection refused".into()))
    }
}

fn wired_bench() -> Bench {
    let mut bench = Bench::default();
    bench.connect(ANALOG_GENERATOR, None, MODULATOR, Some(CARRIER_PORT));
    bench.connect(DIGITAL_GENERATOR, None, MODULATOR, None);
    bench.connect(MODULATOR, None, OSCILLOSCOPE, None);
    bench
}

#[test]
fn emission_before_connecting_leaves_scope_alone() {
    let mut graph = SignalGraph::bench();
    let sine = Signal::analog(Waveform::Sine, 500.0, 5.0);

    graph.propagate(ANALOG_GENERATOR, sine.clone()).unwrap();
    // the generator now holds an output but nothing was wired
    assert_eq!(graph.displayed_signal(OSCILLOSCOPE), None);

    let mut fresh = SignalGraph::bench();
    fresh.connect(ANALOG_GENERATOR, None, OSCILLOSCOPE, None);
    fresh.propagate(ANALOG_GENERATOR, sine.clone()).unwrap();
    assert_eq!(fresh.displayed_signal(OSCILLOSCOPE), Some(&sine));
}

#[test]
fn digital_entry_is_validated_before_propagation() {
    let mut bench = Bench::default();
    bench.connect(DIGITAL_GENERATOR, None, OSCILLOSCOPE, None);

    bench.digital.set_entry("101");
    assert_eq!(bench.quantize(), Err(BenchError::BitLength { len: 3 }));
    assert!(bench.graph().displayed_signal(OSCILLOSCOPE).is_none());

    bench.digital.set_entry("10110010");
    assert_eq!(bench.quantize(), Ok(1));
    let Some(Signal::Digital(shown)) = bench.graph().displayed_signal(OSCILLOSCOPE) else {
        panic!("expected a digital signal on the scope");
    };
    assert_eq!(shown.quantized, vec![5.0, 0.0, 5.0, 5.0, 0.0, 0.0, 5.0, 0.0]);
}

#[test]
fn bit_encodings_normalize_alike() {
    let text = BitPayload::from("1011");
    let numbers: BitPayload = serde_json::from_str("[1, 0, 1, 1]").unwrap();
    let flags = BitPayload::from(vec![true, false, true, true]);
    for payload in [&text, &numbers, &flags] {
        assert_eq!(normalize(Some(payload)), vec![1, 0, 1, 1]);
    }
}

#[test]
fn failed_transport_matches_local_result() {
    let mut bench = wired_bench();
    bench.generate().unwrap();
    bench.digital.set_entry("11001010");
    bench.quantize().unwrap();

    let request = bench.begin_modulation().unwrap().unwrap();
    let fallback = ModulationEngine::new(Unreachable).modulate(&request);
    assert_eq!(fallback, local(&request));
    assert_eq!(fallback.samples.len(), 8 * 64);
    assert_eq!(fallback.waveform, Waveform::Modulated);

    bench.finish_modulation(fallback).unwrap();
    assert!(!bench.modulator.is_busy());
}

#[test]
fn every_scheme_reaches_the_scope() {
    let engine = ModulationEngine::offline();
    for scheme in Scheme::ALL {
        let mut bench = wired_bench();
        bench.modulator.set_scheme(scheme);
        bench.generate().unwrap();
        bench.digital.set_entry("01010101");
        bench.quantize().unwrap();
        bench.modulate(&engine).unwrap();

        let Some(Signal::Modulated(shown)) = bench.graph().displayed_signal(OSCILLOSCOPE) else {
            panic!("{scheme}: expected a modulated signal");
        };
        assert_eq!(shown.scheme, scheme);
        assert_eq!(shown.samples.len(), 8 * 64, "{scheme}");

        let frame = bench.scope.render(Duration::ZERO).unwrap();
        assert_eq!(frame.trace.unwrap().kind, TraceKind::Analog);
    }
}

#[test]
fn unwired_modulator_keys_default_carrier_and_single_mark() {
    let mut bench = Bench::default();
    let request = bench.begin_modulation().unwrap().unwrap();
    assert_eq!(request.carrier.frequency, 1000.0);
    assert_eq!(request.carrier.amplitude, 1.0);
    assert_eq!(request.message.bits, vec![1]);

    let signal = ModulationEngine::offline().modulate(&request);
    assert_eq!(signal.samples.len(), 64);
}

#[test]
fn zoom_clamps_and_resets() {
    let mut scope = Oscilloscope::default();
    scope.set_zoom(0.01, 99.0);
    assert_eq!((scope.zoom().x(), scope.zoom().y()), (0.25, 12.0));
    scope.reset_zoom();
    assert_eq!(scope.zoom(), Zoom::default());
}

#[test]
fn scope_follows_disconnect() {
    let mut bench = Bench::default();
    bench.connect(ANALOG_GENERATOR, None, OSCILLOSCOPE, None);
    bench.generate().unwrap();
    assert!(bench.scope.signal().is_some());

    // the last delivered value stays on the port after unplugging
    bench.disconnect(ANALOG_GENERATOR, OSCILLOSCOPE);
    assert!(!bench.graph().is_connected(ANALOG_GENERATOR, OSCILLOSCOPE));
    assert!(bench.scope.signal().is_some());
}

/// Sign changes of the drawn carrier across one screen, skipping points
/// that sit on the center line.
fn carrier_crossings(cycles_per_symbol: u32) -> usize {
    let config = BenchConfig {
        cycles_per_symbol,
        offline: true,
        ..BenchConfig::default()
    };
    let mut bench = Bench::new(&config);
    bench.connect(ANALOG_GENERATOR, None, MODULATOR, Some(CARRIER_PORT));
    bench.connect(DIGITAL_GENERATOR, None, MODULATOR, None);
    bench.connect(MODULATOR, None, OSCILLOSCOPE, None);
    bench.analog.set_frequency(1000.0);
    bench.generate().unwrap();
    bench.digital.set_entry("00000000");
    bench.quantize().unwrap();
    bench.modulator.set_scheme(Scheme::Psk);
    bench.modulate(&ModulationEngine::from_config(&config)).unwrap();

    let frame = bench.scope.render(Duration::ZERO).unwrap();
    let center = frame.grid.logical_height / 2.0;
    let signs: Vec<bool> = frame
        .trace
        .unwrap()
        .points
        .iter()
        .map(|&(_, y)| y - center)
        .filter(|offset| offset.abs() > 1e-6)
        .map(|offset| offset > 0.0)
        .collect();
    signs.windows(2).filter(|w| w[0] != w[1]).count()
}

#[test]
fn symbol_framing_does_not_change_carrier_on_screen() {
    // three carrier periods on screen: five interior zero crossings
    assert_eq!(carrier_crossings(3), 5);
    assert_eq!(carrier_crossings(6), carrier_crossings(3));
}
