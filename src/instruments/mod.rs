//! Front panels of the bench instruments.
//!
//! Each panel owns only its own user-entered state. Signals leave a panel as
//! values and are routed by the [`graph`](crate::graph) store.

/// Analog and digital function generators.
pub mod generator;
/// Modulator scheme selection and trigger guard.
pub mod modulator;

pub use generator::{AnalogGenerator, DigitalGenerator};
pub use modulator::Modulator;
