/// The wired set of nodes a simulation runs on.
///
/// A `Network` is built once from declarations and is the single owner of
/// every node's mutable state. Topology never changes after construction:
/// only toggle flags and gate memories are updated, and only through the
/// simulator.

use std::collections::HashMap;

use tracing::debug;

use crate::declaration::Declaration;
use crate::error::{PulseError, PulseResult};
use crate::node::{Kind, Node, NodeId};

/// Name-keyed table of nodes plus the reverse wiring.
#[derive(Debug, Clone)]
pub struct Network {
    nodes: Vec<Node>,
    by_name: HashMap<String, NodeId>,
    /// `inputs[i]` lists each distinct node whose outputs include node
    /// `i`, in declaration order.
    inputs: Vec<Vec<NodeId>>,
}

impl Network {
    /// Build a network from declarations.
    ///
    /// 1. One node per declaration, in declaration order.
    /// 2. Every output name without a declaration becomes a sink.
    /// 3. Every declared node is registered as an input of each gate it
    ///    targets, remembered as low.
    ///
    /// Cycles are allowed. Duplicate names are rejected, and so is a
    /// network whose node indices do not fit below [`NodeId::BUTTON`].
    pub fn build(declarations: &[Declaration]) -> PulseResult<Network> {
        let mut by_name: HashMap<String, NodeId> = HashMap::with_capacity(declarations.len());
        for (idx, decl) in declarations.iter().enumerate() {
            if by_name.insert(decl.name.clone(), node_id(idx)?).is_some() {
                return Err(PulseError::DuplicateNode(decl.name.clone()));
            }
        }

        // Synthesize sinks for targets nobody declared.
        let mut sinks: Vec<String> = Vec::new();
        for decl in declarations {
            for target in &decl.outputs {
                if !by_name.contains_key(target) {
                    let id = node_id(declarations.len() + sinks.len())?;
                    debug!(node = %target, referenced_by = %decl.name, "synthesizing sink");
                    by_name.insert(target.clone(), id);
                    sinks.push(target.clone());
                }
            }
        }

        let mut nodes: Vec<Node> = Vec::with_capacity(declarations.len() + sinks.len());
        for decl in declarations {
            let outputs = decl.outputs.iter().map(|t| by_name[t]).collect();
            nodes.push(Node::new(by_name[&decl.name], decl.name.clone(), decl.kind, outputs));
        }
        for name in sinks {
            let id = by_name[&name];
            nodes.push(Node::new(id, name, Kind::Sink, Vec::new()));
        }

        // One entry per upstream node, however many edges it draws.
        let mut inputs: Vec<Vec<NodeId>> = vec![Vec::new(); nodes.len()];
        for idx in 0..declarations.len() {
            let source = nodes[idx].id();
            let outputs = nodes[idx].outputs().to_vec();
            for target in outputs {
                let upstream = &mut inputs[target.index()];
                if !upstream.contains(&source) {
                    upstream.push(source);
                }
                nodes[target.index()].register_input(source);
            }
        }

        debug!(nodes = nodes.len(), declared = declarations.len(), "network built");
        Ok(Network {
            nodes,
            by_name,
            inputs,
        })
    }

    /// Look up a node ID by name.
    pub fn id(&self, name: &str) -> Option<NodeId> {
        self.by_name.get(name).copied()
    }

    /// Like [`id`](Self::id) but reports a missing node as an error.
    pub fn require(&self, name: &str) -> PulseResult<NodeId> {
        self.id(name)
            .ok_or_else(|| PulseError::UnknownNode(name.to_string()))
    }

    /// Name of a node. The button sentinel is named `button`.
    ///
    /// # Panics
    /// Panics if `id` was not issued by this network.
    pub fn name(&self, id: NodeId) -> &str {
        if id.is_button() {
            "button"
        } else {
            self.nodes[id.index()].name()
        }
    }

    /// Borrow a node.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Borrow a node by name.
    pub fn node_by_name(&self, name: &str) -> Option<&Node> {
        self.id(name).and_then(|id| self.node(id))
    }

    /// Mutable access is reserved for the simulator.
    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Each distinct node whose outputs include `id`, in declaration order.
    ///
    /// A node listing `id` twice among its outputs appears once.
    pub fn inputs_of(&self, id: NodeId) -> &[NodeId] {
        self.inputs
            .get(id.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All nodes, declared ones first, then synthesized sinks.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Number of nodes, including synthesized sinks.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// ID for the node at position `idx`. `u32::MAX` is the button sentinel.
fn node_id(idx: usize) -> PulseResult<NodeId> {
    u32::try_from(idx)
        .ok()
        .filter(|&raw| raw != NodeId::BUTTON.raw())
        .map(NodeId::new)
        .ok_or(PulseError::TooManyNodes(idx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::parse_declarations;
    use crate::pulse::Level;

    fn second_example() -> Network {
        let decls = parse_declarations(
            "broadcaster -> a\n%a -> inv, con\n&inv -> b\n%b -> con\n&con -> output\n",
        )
        .unwrap();
        Network::build(&decls).unwrap()
    }

    #[test]
    fn test_undeclared_target_becomes_sink() {
        let net = second_example();
        let output = net.node_by_name("output").unwrap();
        assert_eq!(output.kind(), Kind::Sink);
        assert!(output.outputs().is_empty());
        assert_eq!(net.len(), 6);
    }

    #[test]
    fn test_ids_follow_declaration_order() {
        let net = second_example();
        let names: Vec<&str> = net.nodes().map(|n| n.name()).collect();
        assert_eq!(names, vec!["broadcaster", "a", "inv", "b", "con", "output"]);
        assert_eq!(net.id("a"), Some(NodeId::new(1)));
    }

    #[test]
    fn test_gate_inputs_registered_low() {
        let net = second_example();
        let con = net.node_by_name("con").unwrap();
        let memory = con.remembered().unwrap();
        let a = net.id("a").unwrap();
        let b = net.id("b").unwrap();
        assert_eq!(memory.len(), 2);
        assert_eq!(memory.get(&a), Some(&Level::Low));
        assert_eq!(memory.get(&b), Some(&Level::Low));
    }

    #[test]
    fn test_gate_keys_match_upstream_nodes() {
        let net = second_example();
        for node in net.nodes().filter(|n| n.kind() == Kind::Gate) {
            let keys: Vec<NodeId> = node.remembered().unwrap().keys().copied().collect();
            let mut upstream = net.inputs_of(node.id()).to_vec();
            upstream.sort();
            assert_eq!(keys, upstream, "gate {}", node.name());
        }
    }

    #[test]
    fn test_inputs_of_in_declaration_order() {
        let net = second_example();
        let con = net.id("con").unwrap();
        let names: Vec<&str> = net.inputs_of(con).iter().map(|&id| net.name(id)).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_cycles_are_accepted() {
        let decls = parse_declarations("broadcaster -> a\n%a -> g\n&g -> a\n").unwrap();
        let net = Network::build(&decls).unwrap();
        assert_eq!(net.inputs_of(net.id("a").unwrap()).len(), 2);
    }

    #[test]
    fn test_repeated_edge_counts_one_upstream_node() {
        let decls = parse_declarations("broadcaster -> a\n%a -> hub, hub\n&hub -> rx, rx\n").unwrap();
        let net = Network::build(&decls).unwrap();
        let a = net.id("a").unwrap();
        let hub = net.id("hub").unwrap();
        assert_eq!(net.inputs_of(hub), &[a]);
        assert_eq!(net.inputs_of(net.id("rx").unwrap()), &[hub]);
        assert_eq!(net.node(hub).unwrap().remembered().unwrap().len(), 1);
        // Both edges still carry a pulse.
        assert_eq!(net.node(a).unwrap().outputs(), &[hub, hub]);
    }

    #[test]
    fn test_node_ids_stop_below_button() {
        assert_eq!(node_id(0).unwrap(), NodeId::new(0));
        assert_eq!(node_id(u32::MAX as usize - 1).unwrap(), NodeId::new(u32::MAX - 1));
        assert!(matches!(
            node_id(u32::MAX as usize),
            Err(PulseError::TooManyNodes(n)) if n == u32::MAX as usize
        ));
        assert!(matches!(node_id(usize::MAX), Err(PulseError::TooManyNodes(_))));
    }

    #[test]
    fn test_duplicate_declaration_rejected() {
        let decls = parse_declarations("broadcaster -> a\n%a -> b\n&a -> b\n").unwrap();
        assert!(matches!(
            Network::build(&decls),
            Err(PulseError::DuplicateNode(name)) if name == "a"
        ));
    }

    #[test]
    fn test_require_unknown_node() {
        let net = second_example();
        assert!(matches!(net.require("nope"), Err(PulseError::UnknownNode(_))));
        assert_eq!(net.name(NodeId::BUTTON), "button");
    }
}
