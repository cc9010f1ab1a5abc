/// Pulse values exchanged between nodes.
///
/// A `Pulse` is an immutable record: who sent it, who receives it, and
/// whether it is low or high. Pulses are queued in strict FIFO order by
/// the simulator and never reordered.

use crate::node::NodeId;

// ── Level ─────────────────────────────────────────────────────────────

/// Signal level carried by a pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum Level {
    Low,
    High,
}

impl Level {
    /// Returns `true` for `Level::High`.
    #[inline]
    pub fn is_high(self) -> bool {
        self == Level::High
    }

    /// Returns `true` for `Level::Low`.
    #[inline]
    pub fn is_low(self) -> bool {
        self == Level::Low
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Level::Low => write!(f, "low"),
            Level::High => write!(f, "high"),
        }
    }
}

// ── Pulse ─────────────────────────────────────────────────────────────

/// A single pulse addressed from one node to another.
///
/// The first pulse of every trigger has `NodeId::BUTTON` as its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Pulse {
    pub source: NodeId,
    pub target: NodeId,
    pub level: Level,
}

impl Pulse {
    /// Convenience constructor.
    pub fn new(source: NodeId, target: NodeId, level: Level) -> Self {
        Pulse {
            source,
            target,
            level,
        }
    }

    /// The low pulse a button press sends to `entry`.
    pub fn button(entry: NodeId) -> Self {
        Pulse::new(NodeId::BUTTON, entry, Level::Low)
    }
}

impl std::fmt::Display for Pulse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -{}-> {}", self.source, self.level, self.target)
    }
}
