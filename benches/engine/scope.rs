//! Benchmarks for oscilloscope frame computation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use benchtop::dsp::keying::{self, KeyingParams, Scheme};
use benchtop::instruments::AnalogGenerator;
use benchtop::scope::trace::{analog_trace, digital_trace, modulated_trace};
use benchtop::scope::{Grid, Surface, Zoom};
use benchtop::signal::{AnalogSignal, ModulatedSignal, SignalKind, Waveform};

use crate::ZOOM_LEVELS;

pub fn bench_scope(c: &mut Criterion) {
    let mut group = c.benchmark_group("scope/trace");

    let fg = AnalogGenerator::new()
        .with_waveform(Waveform::Sine)
        .with_frequency(500.0)
        .with_amplitude(5.0);
    let sine = AnalogSignal::new(fg.waveform(), fg.frequency(), fg.amplitude());
    let params = KeyingParams::default();
    let bits = [1, 0, 1, 1, 0, 0, 1, 0];
    let modulated = ModulatedSignal {
        kind: SignalKind::Analog,
        waveform: Waveform::Modulated,
        samples: keying::key(Scheme::Fsk, &bits, &params),
        scheme: Scheme::Fsk,
        frequency: params.frequency,
        amplitude: params.amplitude,
        samples_per_symbol: params.samples_per_symbol,
    };

    for &zoom_x in ZOOM_LEVELS {
        let mut zoom = Zoom::default();
        zoom.set_x(zoom_x);
        let grid = Grid::compute(Surface::default(), zoom, None);

        group.bench_with_input(BenchmarkId::new("grid", zoom_x), &zoom_x, |b, _| {
            b.iter(|| Grid::compute(black_box(Surface::default()), black_box(zoom), None))
        });

        group.bench_with_input(BenchmarkId::new("analog", zoom_x), &zoom_x, |b, _| {
            b.iter(|| analog_trace(black_box(&sine), black_box(&grid), black_box(0.0123)))
        });

        group.bench_with_input(BenchmarkId::new("modulated", zoom_x), &zoom_x, |b, _| {
            b.iter(|| {
                modulated_trace(
                    black_box(&modulated),
                    black_box(&grid),
                    black_box(0.0123),
                    black_box(params.cycles_per_symbol),
                )
            })
        });

        group.bench_with_input(BenchmarkId::new("digital", zoom_x), &zoom_x, |b, _| {
            b.iter(|| digital_trace(black_box(&bits), black_box(&grid)))
        });
    }

    group.finish();
}
