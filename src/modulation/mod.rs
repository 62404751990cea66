//! Modulation engine: remote service first, local keying as fallback.

/// Engine, transports and the local keying path.
pub mod engine;
/// Service request/response shapes.
pub mod wire;

pub use engine::{local, HttpTransport, ModulationEngine, ModulationTransport, OfflineTransport};
pub use wire::{CarrierSpec, MessageSpec, ModulationRequest};
