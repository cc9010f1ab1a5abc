/// Strict FIFO queue of pending pulses.
///
/// Pulses leave the queue in exactly the order they were enqueued. Every
/// pulse receives a strictly increasing sequence number so traces can
/// refer to it unambiguously.

use std::collections::VecDeque;

use crate::pulse::Pulse;

/// A pulse waiting for delivery, tagged with its enqueue position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Queued {
    pub seq: u64,
    pub pulse: Pulse,
}

/// The pending-pulse queue for one simulator.
#[derive(Debug, Clone, Default)]
pub struct PulseQueue {
    queue: VecDeque<Queued>,
    next_seq: u64,
}

impl PulseQueue {
    /// Create a new, empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pulse. Returns its sequence number.
    pub fn push(&mut self, pulse: Pulse) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push_back(Queued { seq, pulse });
        seq
    }

    /// Append pulses in iteration order.
    pub fn extend(&mut self, pulses: impl IntoIterator<Item = Pulse>) {
        for pulse in pulses {
            self.push(pulse);
        }
    }

    /// Remove the oldest pending pulse.
    pub fn pop_next(&mut self) -> Option<Queued> {
        self.queue.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of pending pulses.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Sequence number the next pushed pulse will get.
    pub fn next_seq(&self) -> u64 {
        self.next_seq
    }

    /// Drain all pending pulses in delivery order.
    pub fn drain_ordered(&mut self) -> Vec<Queued> {
        self.queue.drain(..).collect()
    }
}
