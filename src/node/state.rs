//! `Node` — a named unit with outputs and a kind-specific transition rule.

use std::collections::BTreeMap;

use crate::pulse::{Level, Pulse};

use super::id::NodeId;
use super::kind::Kind;

// ── NodeState ─────────────────────────────────────────────────────────

/// Kind tag plus whatever mutable memory that kind needs.
///
/// State persists across triggers. It is never reset by the simulator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeState {
    Sink,
    Source,
    Toggle {
        active: bool,
    },
    /// Last level seen from every input. The key set is fixed when the
    /// network is built; only values change afterwards.
    Gate {
        inputs: BTreeMap<NodeId, Level>,
    },
}

impl NodeState {
    /// Fresh state for a node of `kind`.
    pub fn initial(kind: Kind) -> Self {
        match kind {
            Kind::Sink => NodeState::Sink,
            Kind::Source => NodeState::Source,
            Kind::Toggle => NodeState::Toggle { active: false },
            Kind::Gate => NodeState::Gate {
                inputs: BTreeMap::new(),
            },
        }
    }

    /// Which kind this state belongs to.
    pub fn kind(&self) -> Kind {
        match self {
            NodeState::Sink => Kind::Sink,
            NodeState::Source => Kind::Source,
            NodeState::Toggle { .. } => Kind::Toggle,
            NodeState::Gate { .. } => Kind::Gate,
        }
    }
}

// ── Node ──────────────────────────────────────────────────────────────

/// A single addressable node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    id: NodeId,
    name: String,
    outputs: Vec<NodeId>,
    state: NodeState,
}

impl Node {
    /// Create a node in its initial state.
    pub fn new(id: NodeId, name: impl Into<String>, kind: Kind, outputs: Vec<NodeId>) -> Self {
        Node {
            id,
            name: name.into(),
            outputs,
            state: NodeState::initial(kind),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> Kind {
        self.state.kind()
    }

    /// Output targets in declaration order.
    pub fn outputs(&self) -> &[NodeId] {
        &self.outputs
    }

    pub fn state(&self) -> &NodeState {
        &self.state
    }

    /// Flip-flop state, or `None` for any other kind.
    pub fn is_active(&self) -> Option<bool> {
        match self.state {
            NodeState::Toggle { active } => Some(active),
            _ => None,
        }
    }

    /// Gate input memory, or `None` for any other kind.
    pub fn remembered(&self) -> Option<&BTreeMap<NodeId, Level>> {
        match &self.state {
            NodeState::Gate { inputs } => Some(inputs),
            _ => None,
        }
    }

    /// Add `source` to a gate's input memory with an initial low.
    ///
    /// Ignored for every other kind. Only called while building a network.
    pub(crate) fn register_input(&mut self, source: NodeId) {
        if let NodeState::Gate { inputs } = &mut self.state {
            inputs.insert(source, Level::Low);
        }
    }

    /// Apply one incoming pulse and return the level to send to every
    /// output, or `None` when the node stays silent.
    ///
    /// Gate memory is updated before the output level is computed.
    pub fn receive(&mut self, source: NodeId, level: Level) -> Option<Level> {
        match &mut self.state {
            NodeState::Sink => None,
            NodeState::Source => Some(level),
            NodeState::Toggle { active } => {
                if level.is_high() {
                    return None;
                }
                *active = !*active;
                Some(Level::from(*active))
            }
            NodeState::Gate { inputs } => {
                match inputs.get_mut(&source) {
                    Some(slot) => *slot = level,
                    None => tracing::debug!(gate = %self.name, %source, "pulse from unregistered input"),
                }
                let all_high = inputs.values().all(|l| l.is_high());
                Some(Level::from(!all_high))
            }
        }
    }

    /// Apply `pulse` and return the resulting pulses, one per output in
    /// declaration order.
    pub fn transmit(&mut self, pulse: &Pulse) -> Vec<Pulse> {
        match self.receive(pulse.source, pulse.level) {
            Some(level) => self
                .outputs
                .iter()
                .map(|&target| Pulse::new(self.id, target, level))
                .collect(),
            None => Vec::new(),
        }
    }
}
