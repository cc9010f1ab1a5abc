/// Trigger execution loop.
///
/// Each trigger injects one low pulse from the button into the entry
/// node, then pops pulses in strict FIFO order, lets the target node
/// react, and enqueues whatever it emits. A trigger always runs until the
/// queue is empty before the next one may start. The loop is purely
/// synchronous and single-threaded.

use std::ops::{Add, AddAssign};

use tracing::{debug, info, trace, warn};

use crate::config::PulseConfig;
use crate::error::{PulseError, PulseResult};
use crate::network::Network;
use crate::node::{Kind, NodeId};
use crate::pulse::{Level, Pulse};
use crate::queue::{PulseQueue, Queued};

// ── Observer trait ────────────────────────────────────────────────────

/// Sees every pulse as it is dispatched.
///
/// Called after the pulse leaves the queue and before its target reacts.
pub trait PulseObserver {
    fn observe(&mut self, network: &Network, trigger: u64, queued: &Queued);
}

/// An observer backed by a closure, handy for tests and one-off tooling.
impl<F> PulseObserver for F
where
    F: FnMut(&Network, u64, &Queued),
{
    fn observe(&mut self, network: &Network, trigger: u64, queued: &Queued) {
        (self)(network, trigger, queued);
    }
}

// ── Tallies and reports ───────────────────────────────────────────────

/// Low and high pulse counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct PulseTally {
    pub low: u64,
    pub high: u64,
}

impl PulseTally {
    pub fn new(low: u64, high: u64) -> Self {
        PulseTally { low, high }
    }

    /// Count one sent pulse.
    #[inline]
    pub fn record(&mut self, level: Level) {
        match level {
            Level::Low => self.low += 1,
            Level::High => self.high += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.low + self.high
    }

    /// `low × high`, or `None` on overflow.
    pub fn product(&self) -> Option<u64> {
        self.low.checked_mul(self.high)
    }
}

impl Add for PulseTally {
    type Output = PulseTally;

    fn add(self, rhs: PulseTally) -> PulseTally {
        PulseTally::new(self.low + rhs.low, self.high + rhs.high)
    }
}

impl AddAssign for PulseTally {
    fn add_assign(&mut self, rhs: PulseTally) {
        *self = *self + rhs;
    }
}

impl std::iter::Sum for PulseTally {
    fn sum<I: Iterator<Item = PulseTally>>(iter: I) -> Self {
        iter.fold(PulseTally::default(), Add::add)
    }
}

/// Opaque reference to a registered watch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct WatchHandle(pub(crate) usize);

impl WatchHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

/// What happened during one trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct TriggerReport {
    /// 1-based trigger number.
    pub index: u64,
    /// Pulses sent during this trigger only, including the button pulse.
    pub tally: PulseTally,
    /// Watches whose node sent at least one high pulse, in registration order.
    pub watch_hits: Vec<WatchHandle>,
}

#[derive(Debug, Clone)]
struct Watch {
    node: NodeId,
    first_high: Option<u64>,
}

// ── Simulator ─────────────────────────────────────────────────────────

/// Drives triggers over a network it owns.
#[derive(Debug, Clone)]
pub struct Simulator {
    network: Network,
    entry: NodeId,
    queue: PulseQueue,
    triggers: u64,
    totals: PulseTally,
    watches: Vec<Watch>,
}

impl Simulator {
    /// Create a simulator whose button pulses go to `entry`.
    ///
    /// The entry node must exist and be a plain source.
    pub fn new(network: Network, entry: &str) -> PulseResult<Self> {
        let entry_id = match network.node_by_name(entry) {
            Some(node) if node.kind() == Kind::Source => node.id(),
            _ => return Err(PulseError::InvalidEntry(entry.to_string())),
        };
        for node in network.nodes() {
            if node.kind() == Kind::Source && node.id() != entry_id {
                warn!(node = node.name(), entry, "node declared without a kind marker behaves as a source");
            }
        }
        Ok(Simulator {
            network,
            entry: entry_id,
            queue: PulseQueue::new(),
            triggers: 0,
            totals: PulseTally::default(),
            watches: Vec::new(),
        })
    }

    /// Create a simulator using the entry named in `config`.
    pub fn with_config(network: Network, config: &PulseConfig) -> PulseResult<Self> {
        Self::new(network, &config.entry)
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    /// Number of triggers completed so far.
    pub fn trigger_count(&self) -> u64 {
        self.triggers
    }

    /// Pulses sent across every trigger so far.
    pub fn totals(&self) -> PulseTally {
        self.totals
    }

    /// Start recording when `name` first sends a high pulse.
    ///
    /// Register before running the triggers whose result matters; highs
    /// sent earlier are not recorded. Registering the same node twice
    /// returns the same handle.
    pub fn register_watch(&mut self, name: &str) -> PulseResult<WatchHandle> {
        let node = self.network.require(name)?;
        if let Some(pos) = self.watches.iter().position(|w| w.node == node) {
            return Ok(WatchHandle(pos));
        }
        self.watches.push(Watch {
            node,
            first_high: None,
        });
        Ok(WatchHandle(self.watches.len() - 1))
    }

    /// Trigger index of the first high pulse sent by the watched node.
    pub fn is_high_seen(&self, handle: WatchHandle) -> Option<u64> {
        self.watches.get(handle.0).and_then(|w| w.first_high)
    }

    /// Name of the node behind a watch.
    pub fn watch_name(&self, handle: WatchHandle) -> Option<&str> {
        self.watches.get(handle.0).map(|w| self.network.name(w.node))
    }

    /// Run one trigger to completion.
    pub fn run_trigger(&mut self) -> TriggerReport {
        self.run_trigger_with(&mut |_: &Network, _: u64, _: &Queued| {})
    }

    /// Run one trigger, showing every dispatched pulse to `observer`.
    pub fn run_trigger_with(&mut self, observer: &mut dyn PulseObserver) -> TriggerReport {
        self.triggers += 1;
        let index = self.triggers;
        let mut tally = PulseTally::default();
        let mut watch_hits: Vec<WatchHandle> = Vec::new();

        self.queue.push(Pulse::button(self.entry));
        while let Some(queued) = self.queue.pop_next() {
            let pulse = queued.pulse;
            tally.record(pulse.level);
            observer.observe(&self.network, index, &queued);
            trace!(
                trigger = index,
                seq = queued.seq,
                source = self.network.name(pulse.source),
                target = self.network.name(pulse.target),
                level = %pulse.level,
                "pulse"
            );

            if pulse.level.is_high() {
                self.note_high(pulse.source, index, &mut watch_hits);
            }

            if let Some(node) = self.network.node_mut(pulse.target) {
                let emitted = node.transmit(&pulse);
                self.queue.extend(emitted);
            }
        }

        self.totals += tally;
        debug!(trigger = index, low = tally.low, high = tally.high, "trigger complete");
        TriggerReport {
            index,
            tally,
            watch_hits,
        }
    }

    fn note_high(&mut self, source: NodeId, index: u64, hits: &mut Vec<WatchHandle>) {
        for (pos, watch) in self.watches.iter_mut().enumerate() {
            if watch.node != source {
                continue;
            }
            if watch.first_high.is_none() {
                watch.first_high = Some(index);
                info!(node = self.network.name(source), trigger = index, "watch first sent high");
            }
            let handle = WatchHandle(pos);
            if !hits.contains(&handle) {
                hits.push(handle);
            }
        }
    }

    /// Run `n` triggers and return the pulses they sent.
    pub fn run_for(&mut self, n: u64) -> PulseTally {
        self.triggers().take(n as usize).map(|r| r.tally).sum()
    }

    /// Lazy sequence of triggers. Each `next()` runs one.
    ///
    /// Unbounded unless capped with [`Triggers::up_to`].
    pub fn triggers(&mut self) -> Triggers<'_> {
        Triggers {
            sim: self,
            limit: None,
        }
    }
}

/// Iterator returned by [`Simulator::triggers`].
pub struct Triggers<'a> {
    sim: &'a mut Simulator,
    limit: Option<u64>,
}

impl Triggers<'_> {
    /// Stop once the simulator has completed `limit` triggers in total.
    /// `None` removes the cap.
    pub fn up_to(mut self, limit: Option<u64>) -> Self {
        self.limit = limit;
        self
    }

    /// The simulator being driven, as of the last trigger yielded.
    pub fn simulator(&self) -> &Simulator {
        self.sim
    }
}

impl Iterator for Triggers<'_> {
    type Item = TriggerReport;

    fn next(&mut self) -> Option<TriggerReport> {
        if let Some(limit) = self.limit {
            if self.sim.triggers >= limit {
                return None;
            }
        }
        Some(self.sim.run_trigger())
    }
}
