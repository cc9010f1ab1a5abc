//! The two numbers this crate exists to produce.

use tracing::info;

use crate::analyzer::CycleAnalyzer;
use crate::config::PulseConfig;
use crate::declaration::Declaration;
use crate::error::{PulseError, PulseResult};
use crate::network::Network;
use crate::simulation::Simulator;

/// Product of low and high pulses sent over `config.presses` triggers.
pub fn pulse_product(declarations: &[Declaration], config: &PulseConfig) -> PulseResult<u64> {
    let mut sim = Simulator::with_config(Network::build(declarations)?, config)?;
    let tally = sim.run_for(config.presses);
    info!(presses = config.presses, low = tally.low, high = tally.high, "pulse count finished");
    tally.product().ok_or(PulseError::CountOverflow)
}

/// First trigger on which `config.terminal` receives a low pulse, inferred
/// from the periods of its feeding gate's inputs.
///
/// Stops with [`PulseError::WatchBoundExceeded`] when `config.max_triggers`
/// is set and reached first.
pub fn presses_until_terminal_low(
    declarations: &[Declaration],
    config: &PulseConfig,
) -> PulseResult<u64> {
    let mut sim = Simulator::with_config(Network::build(declarations)?, config)?;
    let analyzer = CycleAnalyzer::for_terminal(&mut sim, &config.terminal)?;
    analyzer.resolve(&mut sim, config.max_triggers)
}
