//! Signal math used by the instruments.
//!
//! Everything here is a pure function of its arguments: no graph state, no
//! I/O. The modulation engine and the oscilloscope layer orchestration on top.

/// Digital keying schemes (ASK, PSK, FSK, PWM, PPM).
pub mod keying;
/// Periodic waveforms evaluated at arbitrary time points.
pub mod waveform;
