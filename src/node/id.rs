//! Node ID — a lightweight, ordered, copyable index into a network.

/// Identifier of a node inside one [`Network`](crate::network::Network).
///
/// IDs are dense indices assigned in declaration order, followed by any
/// synthesized sinks. They are only meaningful for the network that
/// issued them; use [`Network::name`](crate::network::Network::name) to
/// get the human-readable name back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(u32);

impl NodeId {
    /// Source of the low pulse injected by every trigger. Never a real node.
    pub const BUTTON: NodeId = NodeId(u32::MAX);

    /// Create a node ID from a raw index.
    #[inline]
    pub fn new(id: u32) -> Self {
        NodeId(id)
    }

    /// Return the underlying index.
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }

    /// Index into per-node tables.
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns `true` for the button sentinel.
    #[inline]
    pub fn is_button(self) -> bool {
        self == NodeId::BUTTON
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_button() {
            write!(f, "button")
        } else {
            write!(f, "N{}", self.0)
        }
    }
}
