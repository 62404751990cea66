use tracing::{debug, info, warn};

use crate::error::BenchError;
use crate::graph::node::{
    Edge, EdgeId, Node, NodeKind, Position, CARRIER_PORT, MESSAGE_PORT, SIGNAL_PORT,
};
use crate::signal::Signal;

/// Ids of the four instruments created by [`SignalGraph::bench`].
pub mod bench_ids {
    pub const ANALOG_GENERATOR: &str = "fg";
    pub const DIGITAL_GENERATOR: &str = "dg";
    pub const MODULATOR: &str = "mod";
    pub const OSCILLOSCOPE: &str = "scope";
}

/// Owner of all node and edge state. Every write goes through here.
#[derive(Debug, Clone, Default)]
pub struct SignalGraph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    next_edge: u64,
}

impl SignalGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard four-instrument bench, unconnected.
    pub fn bench() -> Self {
        let mut graph = Self::new();
        let instruments = [
            (bench_ids::ANALOG_GENERATOR, NodeKind::AnalogGenerator, Position::new(100.0, 100.0)),
            (bench_ids::DIGITAL_GENERATOR, NodeKind::DigitalGenerator, Position::new(100.0, 300.0)),
            (bench_ids::MODULATOR, NodeKind::Modulator, Position::new(400.0, 100.0)),
            (bench_ids::OSCILLOSCOPE, NodeKind::Oscilloscope, Position::new(700.0, 100.0)),
        ];
        for (id, kind, position) in instruments {
            graph.nodes.push(Node::new(id, kind, position));
        }
        graph
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id() == id)
    }

    fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.node(id).is_some()
    }

    pub fn add_node(
        &mut self,
        id: impl Into<String>,
        kind: NodeKind,
        position: Position,
    ) -> Result<(), BenchError> {
        let id = id.into();
        if self.contains(&id) {
            return Err(BenchError::DuplicateNode(id));
        }
        debug!(%id, ?kind, "node added");
        self.nodes.push(Node::new(id, kind, position));
        Ok(())
    }

    /// Remove a node and every edge touching it.
    pub fn remove_node(&mut self, id: &str) -> Result<Node, BenchError> {
        let index = self
            .nodes
            .iter()
            .position(|n| n.id() == id)
            .ok_or_else(|| BenchError::UnknownNode(id.to_string()))?;
        self.edges.retain(|e| e.source != id && e.target != id);
        debug!(%id, "node removed");
        Ok(self.nodes.remove(index))
    }

    pub fn move_node(&mut self, id: &str, position: Position) -> Result<(), BenchError> {
        let node = self
            .node_mut(id)
            .ok_or_else(|| BenchError::UnknownNode(id.to_string()))?;
        node.position = position;
        Ok(())
    }

    /// Connect two nodes. A missing endpoint makes this a logged no-op.
    ///
    /// If the source already holds an output, it is written straight into the
    /// target's named port (`signal` when none is given).
    pub fn connect(
        &mut self,
        source: &str,
        source_port: Option<&str>,
        target: &str,
        target_port: Option<&str>,
    ) -> Option<EdgeId> {
        if !self.contains(source) || !self.contains(target) {
            warn!(%source, %target, "edge rejected: dangling endpoint");
            return None;
        }

        let existing = self
            .edges
            .iter()
            .find(|e| e.same_route(source, source_port, target, target_port))
            .map(|e| e.id);
        let id = match existing {
            Some(id) => id,
            None => {
                let id = EdgeId(self.next_edge);
                self.next_edge += 1;
                self.edges.push(Edge {
                    id,
                    source: source.to_string(),
                    source_port: source_port.map(str::to_string),
                    target: target.to_string(),
                    target_port: target_port.map(str::to_string),
                });
                info!(%id, %source, %target, "connected");
                id
            }
        };

        let current = self.node(source).and_then(Node::output).cloned();
        if let (Some(signal), Some(node)) = (current, self.node_mut(target)) {
            node.set_input(target_port.unwrap_or(SIGNAL_PORT), signal);
        }
        Some(id)
    }

    /// Remove every edge from `source` to `target`. Returns how many went.
    pub fn disconnect(&mut self, source: &str, target: &str) -> usize {
        let before = self.edges.len();
        self.edges.retain(|e| !(e.source == source && e.target == target));
        let removed = before - self.edges.len();
        if removed > 0 {
            info!(%source, %target, removed, "disconnected");
        }
        removed
    }

    pub fn remove_edge(&mut self, id: EdgeId) -> bool {
        let before = self.edges.len();
        self.edges.retain(|e| e.id != id);
        before != self.edges.len()
    }

    /// Whether a direct edge runs from `source` to `target`.
    pub fn is_connected(&self, source: &str, target: &str) -> bool {
        self.edges
            .iter()
            .any(|e| e.source == source && e.target == target)
    }

    /// Record `signal` as `source`'s output and hand it to every directly
    /// connected target. Returns the number of deliveries.
    ///
    /// An edge naming a target port writes that port. Otherwise modulators
    /// receive the value on `message` and everything else on `signal`. All
    /// targets are updated before this returns.
    pub fn propagate(&mut self, source: &str, signal: Signal) -> Result<usize, BenchError> {
        let source_kind = self
            .node(source)
            .map(Node::kind)
            .ok_or_else(|| BenchError::UnknownNode(source.to_string()))?;

        let deliveries: Vec<(usize, String)> = self
            .edges
            .iter()
            .filter(|e| e.source == source)
            .filter_map(|e| {
                let index = self.nodes.iter().position(|n| n.id() == e.target)?;
                let port = e
                    .target_port
                    .clone()
                    .unwrap_or_else(|| self.nodes[index].kind().propagation_port().to_string());
                Some((index, port))
            })
            .collect();

        if source_kind == NodeKind::AnalogGenerator
            && !deliveries
                .iter()
                .any(|(index, _)| self.nodes[*index].kind() == NodeKind::Oscilloscope)
        {
            info!(%source, "function generator not connected to an oscilloscope, signal ignored");
        }

        if let Some(node) = self.node_mut(source) {
            node.set_output(signal.clone());
        }
        for (index, port) in &deliveries {
            self.nodes[*index].set_input(port, signal.clone());
        }

        debug!(%source, delivered = deliveries.len(), "propagated");
        Ok(deliveries.len())
    }

    /// The signal an oscilloscope node is currently showing.
    pub fn displayed_signal(&self, scope: &str) -> Option<&Signal> {
        self.node(scope).and_then(|n| n.input(SIGNAL_PORT))
    }

    /// `(carrier, message)` currently held by a modulator node.
    pub fn modulator_inputs(
        &self,
        id: &str,
    ) -> Result<(Option<&Signal>, Option<&Signal>), BenchError> {
        let node = self
            .node(id)
            .ok_or_else(|| BenchError::UnknownNode(id.to_string()))?;
        if node.kind() != NodeKind::Modulator {
            return Err(BenchError::NotAModulator(id.to_string()));
        }
        Ok((node.input(CARRIER_PORT), node.input(MESSAGE_PORT)))
    }
}

#[cfg(test)]
mod tests {
    use super::bench_ids::*;
    use super::*;
    use crate::signal::Waveform;

    fn sine() -> Signal {
        Signal::analog(Waveform::Sine, 500.0, 5.0)
    }

    #[test]
    fn bench_has_four_instruments() {
        let graph = SignalGraph::bench();
        let kinds: Vec<NodeKind> = graph.nodes().iter().map(Node::kind).collect();
        assert_eq!(
            kinds,
            vec![
                NodeKind::AnalogGenerator,
                NodeKind::DigitalGenerator,
                NodeKind::Modulator,
                NodeKind::Oscilloscope
            ]
        );
        assert!(graph.edges().is_empty());
    }

    #[test]
    fn dangling_edges_are_never_stored() {
        let mut graph = SignalGraph::bench();
        assert!(graph.connect(ANALOG_GENERATOR, None, "nowhere", None).is_none());
        assert!(graph.connect("ghost", None, OSCILLOSCOPE, None).is_none());
        assert!(graph.edges().is_empty());
    }

    #[test]
    fn duplicate_edges_collapse() {
        let mut graph = SignalGraph::bench();
        let a = graph.connect(ANALOG_GENERATOR, None, OSCILLOSCOPE, None);
        let b = graph.connect(ANALOG_GENERATOR, None, OSCILLOSCOPE, None);
        assert_eq!(a, b);
        assert_eq!(graph.edges().len(), 1);
        graph.connect(ANALOG_GENERATOR, None, MODULATOR, Some(CARRIER_PORT));
        assert_eq!(graph.edges().len(), 2);
    }

    #[test]
    fn connect_delivers_existing_output() {
        let mut graph = SignalGraph::bench();
        graph.propagate(ANALOG_GENERATOR, sine()).unwrap();
        assert!(graph.displayed_signal(OSCILLOSCOPE).is_none());

        graph.connect(ANALOG_GENERATOR, None, OSCILLOSCOPE, None);
        assert_eq!(graph.displayed_signal(OSCILLOSCOPE), Some(&sine()));
    }

    #[test]
    fn connect_honors_named_port() {
        let mut graph = SignalGraph::bench();
        graph.propagate(ANALOG_GENERATOR, sine()).unwrap();
        graph.connect(ANALOG_GENERATOR, None, MODULATOR, Some(CARRIER_PORT));
        let (carrier, message) = graph.modulator_inputs(MODULATOR).unwrap();
        assert_eq!(carrier, Some(&sine()));
        assert!(message.is_none());
    }

    #[test]
    fn unnamed_edge_to_modulator_feeds_message() {
        let mut graph = SignalGraph::bench();
        graph.connect(DIGITAL_GENERATOR, None, MODULATOR, None);
        let bits = Signal::digital("10110010", vec![5.0, 0.0, 5.0, 5.0, 0.0, 0.0, 5.0, 0.0]);
        assert_eq!(graph.propagate(DIGITAL_GENERATOR, bits.clone()).unwrap(), 1);
        let (_, message) = graph.modulator_inputs(MODULATOR).unwrap();
        assert_eq!(message, Some(&bits));
    }

    #[test]
    fn unconnected_emission_leaves_scope_alone() {
        let mut graph = SignalGraph::bench();
        assert_eq!(graph.propagate(ANALOG_GENERATOR, sine()).unwrap(), 0);
        assert!(graph.displayed_signal(OSCILLOSCOPE).is_none());
        assert_eq!(graph.node(ANALOG_GENERATOR).and_then(Node::output), Some(&sine()));
    }

    #[test]
    fn propagation_reaches_all_targets() {
        let mut graph = SignalGraph::bench();
        graph
            .add_node("scope2", NodeKind::Oscilloscope, Position::default())
            .unwrap();
        graph.connect(DIGITAL_GENERATOR, None, OSCILLOSCOPE, None);
        graph.connect(DIGITAL_GENERATOR, None, "scope2", None);
        let bits = Signal::digital("11110000", vec![]);
        assert_eq!(graph.propagate(DIGITAL_GENERATOR, bits.clone()).unwrap(), 2);
        assert_eq!(graph.displayed_signal(OSCILLOSCOPE), Some(&bits));
        assert_eq!(graph.displayed_signal("scope2"), Some(&bits));
    }

    #[test]
    fn later_edges_overwrite_shared_port() {
        let mut graph = SignalGraph::bench();
        graph.connect(ANALOG_GENERATOR, None, OSCILLOSCOPE, None);
        graph.connect(DIGITAL_GENERATOR, None, OSCILLOSCOPE, None);
        graph.propagate(ANALOG_GENERATOR, sine()).unwrap();
        let bits = Signal::digital("10101010", vec![]);
        graph.propagate(DIGITAL_GENERATOR, bits.clone()).unwrap();
        assert_eq!(graph.displayed_signal(OSCILLOSCOPE), Some(&bits));
    }

    #[test]
    fn removing_a_node_drops_its_edges() {
        let mut graph = SignalGraph::bench();
        graph.connect(ANALOG_GENERATOR, None, OSCILLOSCOPE, None);
        graph.connect(MODULATOR, None, OSCILLOSCOPE, None);
        graph.remove_node(OSCILLOSCOPE).unwrap();
        assert!(graph.edges().is_empty());
        assert_eq!(
            graph.remove_node(OSCILLOSCOPE),
            Err(BenchError::UnknownNode(OSCILLOSCOPE.to_string()))
        );
    }

    #[test]
    fn disconnect_and_remove_edge() {
        let mut graph = SignalGraph::bench();
        let id = graph.connect(ANALOG_GENERATOR, None, OSCILLOSCOPE, None).unwrap();
        assert!(graph.is_connected(ANALOG_GENERATOR, OSCILLOSCOPE));
        assert!(graph.remove_edge(id));
        assert!(!graph.remove_edge(id));
        graph.connect(ANALOG_GENERATOR, None, OSCILLOSCOPE, None);
        assert_eq!(graph.disconnect(ANALOG_GENERATOR, OSCILLOSCOPE), 1);
        assert!(!graph.is_connected(ANALOG_GENERATOR, OSCILLOSCOPE));
    }

    #[test]
    fn node_ids_are_unique() {
        let mut graph = SignalGraph::bench();
        assert_eq!(
            graph.add_node(MODULATOR, NodeKind::Modulator, Position::default()),
            Err(BenchError::DuplicateNode(MODULATOR.to_string()))
        );
        assert!(graph.move_node(MODULATOR, Position::new(1.0, 2.0)).is_ok());
        assert_eq!(graph.node(MODULATOR).unwrap().position, Position::new(1.0, 2.0));
    }

    #[test]
    fn modulator_inputs_checks_kind() {
        let graph = SignalGraph::bench();
        assert_eq!(
            graph.modulator_inputs(OSCILLOSCOPE),
            Err(BenchError::NotAModulator(OSCILLOSCOPE.to_string()))
        );
    }

    #[test]
    fn propagate_from_unknown_source_is_an_error() {
        let mut graph = SignalGraph::bench();
        assert!(graph.propagate("ghost", sine()).is_err());
    }
}
