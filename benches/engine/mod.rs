//! Benchmarks for the bench engines.

mod modulation;
mod scope;

pub use modulation::bench_modulation;
pub use scope::bench_scope;
