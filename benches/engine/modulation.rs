//! Benchmarks for local keying.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use benchtop::dsp::keying::{self, KeyingParams, Scheme};

use crate::MESSAGE_LENGTHS;

pub fn bench_modulation(c: &mut Criterion) {
    let mut group = c.benchmark_group("modulation/local");
    let params = KeyingParams::default();

    for &len in MESSAGE_LENGTHS {
        // Alternating pattern exercises both symbol branches
        let bits: Vec<u8> = (0..len).map(|i| (i % 2) as u8).collect();

        for scheme in Scheme::ALL {
            group.bench_with_input(BenchmarkId::new(scheme.name(), len), &len, |b, _| {
                b.iter(|| keying::key(black_box(scheme), black_box(&bits), black_box(&params)))
            });
        }
    }

    group.finish();
}
