//! Pulse trace — a named record of every dispatched pulse.

use crate::network::Network;
use crate::pulse::Level;
use crate::queue::Queued;
use crate::simulation::PulseObserver;

/// One dispatched pulse with node names resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct TraceEntry {
    /// Trigger the pulse belongs to.
    pub trigger: u64,
    /// Queue sequence number, unique across the simulator's lifetime.
    pub seq: u64,
    pub source: String,
    pub target: String,
    pub level: Level,
}

impl std::fmt::Display for TraceEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -{}-> {}", self.source, self.level, self.target)
    }
}

/// Observer that appends a [`TraceEntry`] for every pulse.
#[derive(Debug, Clone, Default)]
pub struct TraceRecorder {
    pub entries: Vec<TraceEntry>,
}

impl TraceRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries belonging to one trigger.
    pub fn trigger(&self, index: u64) -> impl Iterator<Item = &TraceEntry> {
        self.entries.iter().filter(move |e| e.trigger == index)
    }
}

impl PulseObserver for TraceRecorder {
    fn observe(&mut self, network: &Network, trigger: u64, queued: &Queued) {
        self.entries.push(TraceEntry {
            trigger,
            seq: queued.seq,
            source: network.name(queued.pulse.source).to_string(),
            target: network.name(queued.pulse.target).to_string(),
            level: queued.pulse.level,
        });
    }
}
