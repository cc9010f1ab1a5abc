//! # pulsenet — deterministic pulse-network simulator
//!
//! Models a network of typed nodes (broadcaster, flip-flops, conjunction
//! gates, sinks) that exchange low/high pulses, and simulates it one
//! button press at a time with strict FIFO propagation.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────┐
//! │       CycleAnalyzer        │ ← watches gate inputs, combines by LCM
//! │  ┌──────────────────────┐  │
//! │  │      Simulator       │  │ ← one trigger = drain the queue
//! │  │  ┌────────────────┐  │  │
//! │  │  │   PulseQueue   │  │  │ ← strict FIFO
//! │  │  └────────────────┘  │  │
//! │  │  ┌────────────────┐  │  │
//! │  │  │    Network     │  │  │ ← sole owner of node state
//! │  │  └────────────────┘  │  │
//! │  └──────────────────────┘  │
//! └────────────────────────────┘
//! ```

pub mod analyzer;
pub mod answers;
pub mod config;
pub mod declaration;
pub mod error;
pub mod network;
pub mod node;
pub mod pulse;
pub mod queue;
pub mod simulation;
pub mod trace;

// Re-exports for convenience.
pub use analyzer::{combine_periods, gcd, lcm, CycleAnalyzer};
pub use answers::{presses_until_terminal_low, pulse_product};
pub use config::PulseConfig;
pub use declaration::{parse_declarations, Declaration};
pub use error::{PulseError, PulseResult};
pub use network::Network;
pub use node::{Kind, Node, NodeId, NodeState};
pub use pulse::{Level, Pulse};
pub use queue::{PulseQueue, Queued};
pub use simulation::{PulseObserver, PulseTally, Simulator, TriggerReport, Triggers, WatchHandle};
pub use trace::{TraceEntry, TraceRecorder};
