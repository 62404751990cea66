pub mod bench; // The four-instrument bench
pub mod config;
pub mod dsp;
pub mod error;
pub mod graph; // Signal routing between instruments
pub mod instruments; // Generator and modulator front panels
pub mod modulation;
pub mod scope; // Oscilloscope rendering engine
pub mod signal;

pub use bench::Bench;
pub use config::BenchConfig;
pub use error::{BenchError, ConfigError, TransportError};
pub use signal::{Signal, Waveform};
