//! Run configuration for the simulator and the cycle analyzer.
//!
//! Names the entry node that receives each button pulse, the terminal
//! sink whose feeding gate is watched, how many presses the aggregate
//! count covers, and an optional ceiling on the cycle search.

/// Canonical name of the node that receives the button pulse.
pub const DEFAULT_ENTRY: &str = "broadcaster";

/// Canonical name of the terminal sink watched for the final low pulse.
pub const DEFAULT_TERMINAL: &str = "rx";

/// Number of button presses covered by the aggregate pulse count.
pub const DEFAULT_PRESSES: u64 = 1000;

/// Configuration shared by the answers and the binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PulseConfig {
    /// Node that receives the low pulse injected by every trigger.
    pub entry: String,
    /// Sink whose single upstream gate is watched during cycle analysis.
    pub terminal: String,
    /// Triggers summed for the low × high product.
    pub presses: u64,
    /// Abort cycle analysis after this many triggers. `None` searches forever.
    pub max_triggers: Option<u64>,
}

impl PulseConfig {
    /// Override the entry node name.
    pub fn with_entry(mut self, entry: impl Into<String>) -> Self {
        self.entry = entry.into();
        self
    }

    /// Override the terminal node name.
    pub fn with_terminal(mut self, terminal: impl Into<String>) -> Self {
        self.terminal = terminal.into();
        self
    }

    /// Override the number of presses for the aggregate count.
    pub fn with_presses(mut self, presses: u64) -> Self {
        self.presses = presses;
        self
    }

    /// Bound the cycle search.
    pub fn with_max_triggers(mut self, max_triggers: u64) -> Self {
        self.max_triggers = Some(max_triggers);
        self
    }
}

impl Default for PulseConfig {
    fn default() -> Self {
        PulseConfig {
            entry: DEFAULT_ENTRY.to_string(),
            terminal: DEFAULT_TERMINAL.to_string(),
            presses: DEFAULT_PRESSES,
            max_triggers: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = PulseConfig::default();
        assert_eq!(c.entry, "broadcaster");
        assert_eq!(c.terminal, "rx");
        assert_eq!(c.presses, 1000);
        assert_eq!(c.max_triggers, None);
    }

    #[test]
    fn test_builder_overrides() {
        let c = PulseConfig::default()
            .with_entry("root")
            .with_terminal("out")
            .with_presses(4)
            .with_max_triggers(10_000);
        assert_eq!(c.entry, "root");
        assert_eq!(c.terminal, "out");
        assert_eq!(c.presses, 4);
        assert_eq!(c.max_triggers, Some(10_000));
    }
}
