//! Declaration-level node kinds and their textual markers.

/// The four node behaviours a declaration can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum Kind {
    /// Absorbs every pulse. Synthesized for undeclared targets.
    Sink,
    /// Re-emits the received level to all outputs (the broadcaster).
    Source,
    /// Flip-flop: flips on low, ignores high.
    Toggle,
    /// Conjunction: emits low only when every remembered input is high.
    Gate,
}

impl Kind {
    /// Parse a declaration marker: `%` toggle, `&` gate, nothing for a source.
    pub fn from_marker(marker: &str) -> Option<Kind> {
        match marker {
            "" => Some(Kind::Source),
            "%" => Some(Kind::Toggle),
            "&" => Some(Kind::Gate),
            _ => None,
        }
    }

    /// The marker that prefixes this kind in a declaration.
    ///
    /// Sinks are never declared, so they share the empty marker.
    pub fn marker(self) -> &'static str {
        match self {
            Kind::Sink | Kind::Source => "",
            Kind::Toggle => "%",
            Kind::Gate => "&",
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Kind::Sink => "sink",
            Kind::Source => "source",
            Kind::Toggle => "toggle",
            Kind::Gate => "gate",
        };
        write!(f, "{}", s)
    }
}
