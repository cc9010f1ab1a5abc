//! Structured error types for pulsenet.
//!
//! All fallible public APIs return `Result<T, PulseError>`. Unknown output
//! targets are not errors: they become sinks when the network is built.

use thiserror::Error;

/// The top-level error type for the pulse simulator.
#[derive(Error, Debug)]
pub enum PulseError {
    // ── Declaration errors ────────────────────────────────

    /// A declaration line does not follow `[%&]name -> a, b, ...`.
    #[error("malformed declaration on line {line}: {reason}")]
    MalformedDeclaration { line: usize, reason: String },

    /// Two declarations share the same node name.
    #[error("node {0:?} is declared more than once")]
    DuplicateNode(String),

    /// The network has more nodes than a `NodeId` can number.
    #[error("node index {0} does not fit in a node id")]
    TooManyNodes(usize),

    // ── Lookup errors ─────────────────────────────────────

    /// A node name was referenced but is not part of the network.
    #[error("node {0:?} not found")]
    UnknownNode(String),

    /// The entry node is missing or is not a plain broadcasting source.
    #[error("entry node {0:?} is missing or is not a source")]
    InvalidEntry(String),

    /// The terminal node has no upstream gate to watch.
    #[error("node {0:?} is not fed by a conjunction gate")]
    NoUpstreamGate(String),

    /// The terminal node is fed by more than one node.
    #[error("node {target:?} has {count} upstream nodes, expected exactly one gate")]
    AmbiguousUpstream { target: String, count: usize },

    // ── Cycle analysis errors ─────────────────────────────

    /// Cycle analysis was started without any watch registered.
    #[error("no watches registered")]
    NoWatches,

    /// The trigger ceiling was hit before every watch fired.
    #[error("watch target unreachable within bound of {bound} triggers ({pending} unresolved)")]
    WatchBoundExceeded { bound: u64, pending: usize },

    /// Combining the per-watch periods overflowed `u64`.
    #[error("least common multiple of watch periods overflows u64")]
    PeriodOverflow,

    /// The low × high product overflowed `u64`.
    #[error("pulse count product overflows u64")]
    CountOverflow,

    // ── I/O errors ────────────────────────────────────────

    /// Reading declarations from disk failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for `Result<T, PulseError>`.
pub type PulseResult<T> = Result<T, PulseError>;
