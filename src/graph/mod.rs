//! Dataflow graph connecting the bench instruments.
//!
//! The [`store::SignalGraph`] owns every node and edge. Instruments never
//! write to each other directly: a generator's button press, or a finished
//! modulation, hands its signal to [`store::SignalGraph::propagate`], which
//! delivers it to every directly connected input port in one step.

/*
Signal Propagation
==================

  fg (analog) ──────────────► scope
  dg (digital) ──► mod ──────► scope
                    ▲
  fg ──(carrier)────┘

Edges are directed and may name their target port. Each node keeps the last
value seen on each input port and the last value it produced; a new value
simply overwrites the old one (last write wins, even when two edges feed the
same port).

When a node emits:

  1. its output slot is overwritten,
  2. every edge leaving it is resolved to (target node, port),
  3. each port is overwritten with the new value.

All three happen inside one call, so no target ever observes a half-applied
emission, and nothing reaches an instrument that is not wired to the
emitter. Connecting an edge after the fact replays the source's current
output into the new target immediately.
*/

/// Node, edge and port definitions.
pub mod node;
/// The graph store and propagation.
pub mod store;

pub use node::{Edge, EdgeId, Node, NodeKind, Position, CARRIER_PORT, MESSAGE_PORT, SIGNAL_PORT};
pub use store::{bench_ids, SignalGraph};
