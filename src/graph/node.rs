use std::collections::BTreeMap;
use std::fmt;

use crate::signal::Signal;

/// Generic input port of every non-modulator node.
pub const SIGNAL_PORT: &str = "signal";
/// Modulator input for the analog carrier.
pub const CARRIER_PORT: &str = "carrier";
/// Modulator input for the digital message.
pub const MESSAGE_PORT: &str = "message";

/// The four instrument kinds. Dispatch on this tag, never on node ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    AnalogGenerator,
    DigitalGenerator,
    Modulator,
    Oscilloscope,
}

impl NodeKind {
    /// Port written when an edge does not name one during propagation.
    pub fn propagation_port(self) -> &'static str {
        match self {
            NodeKind::Modulator => MESSAGE_PORT,
            _ => SIGNAL_PORT,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            NodeKind::AnalogGenerator => "Function Generator",
            NodeKind::DigitalGenerator => "Digital Generator",
            NodeKind::Modulator => "Modulator",
            NodeKind::Oscilloscope => "Oscilloscope",
        }
    }
}

/// Editor canvas position. Carried for the editor, unused by the core.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: String,
    kind: NodeKind,
    pub position: Position,
    /// Last value received per input port.
    inputs: BTreeMap<String, Signal>,
    /// Last value produced.
    output: Option<Signal>,
}

impl Node {
    pub fn new(id: impl Into<String>, kind: NodeKind, position: Position) -> Self {
        Self {
            id: id.into(),
            kind,
            position,
            inputs: BTreeMap::new(),
            output: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn input(&self, port: &str) -> Option<&Signal> {
        self.inputs.get(port)
    }

    pub fn inputs(&self) -> &BTreeMap<String, Signal> {
        &self.inputs
    }

    pub fn output(&self) -> Option<&Signal> {
        self.output.as_ref()
    }

    /// Last write wins.
    pub(crate) fn set_input(&mut self, port: &str, signal: Signal) {
        self.inputs.insert(port.to_string(), signal);
    }

    pub(crate) fn set_output(&mut self, signal: Signal) {
        self.output = Some(signal);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub(crate) u64);

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// A directed connection between two existing nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub id: EdgeId,
    pub source: String,
    pub source_port: Option<String>,
    pub target: String,
    pub target_port: Option<String>,
}

impl Edge {
    /// Same endpoints and ports, ignoring the id.
    pub(crate) fn same_route(
        &self,
        source: &str,
        source_port: Option<&str>,
        target: &str,
        target_port: Option<&str>,
    ) -> bool {
        self.source == source
            && self.source_port.as_deref() == source_port
            && self.target == target
            && self.target_port.as_deref() == target_port
    }
}
