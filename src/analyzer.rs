//! Cycle analysis: infer when a terminal sink first receives a low pulse.
//!
//! A terminal fed by a single conjunction gate receives a low pulse only
//! on a trigger where every gate input has just sent high. Brute force is
//! hopeless for real networks, so each input is watched until it first
//! sends high and the answer is the least common multiple of those
//! trigger indices.
//!
//! # Precondition
//!
//! This is only correct when every watched input sends high periodically,
//! with a period equal to the index of its first high (the binary-counter
//! feeders this puzzle family is built from). The analyzer does not
//! verify it.

use tracing::info;

use crate::error::{PulseError, PulseResult};
use crate::node::Kind;
use crate::simulation::{Simulator, WatchHandle};

/// Combines the first high of a fixed set of watches.
///
/// First-high indices live in the [`Simulator`] that owns the watches;
/// the analyzer only holds the handles and reads them back from there.
#[derive(Debug, Clone)]
pub struct CycleAnalyzer {
    watches: Vec<WatchHandle>,
}

impl CycleAnalyzer {
    /// Analyze the given watches. Repeated handles are kept once.
    pub fn new(watches: impl IntoIterator<Item = WatchHandle>) -> Self {
        let mut unique: Vec<WatchHandle> = Vec::new();
        for handle in watches {
            if !unique.contains(&handle) {
                unique.push(handle);
            }
        }
        CycleAnalyzer { watches: unique }
    }

    /// Find the single gate feeding `terminal` and watch all of its inputs.
    ///
    /// Call before `sim` has run any trigger.
    pub fn for_terminal(sim: &mut Simulator, terminal: &str) -> PulseResult<Self> {
        let network = sim.network();
        let target = network.require(terminal)?;
        let gate = match network.inputs_of(target) {
            [] => return Err(PulseError::NoUpstreamGate(terminal.to_string())),
            [only] => *only,
            many => {
                return Err(PulseError::AmbiguousUpstream {
                    target: terminal.to_string(),
                    count: many.len(),
                })
            }
        };
        if network.node(gate).map(|n| n.kind()) != Some(Kind::Gate) {
            return Err(PulseError::NoUpstreamGate(terminal.to_string()));
        }

        let feeders: Vec<String> = network
            .inputs_of(gate)
            .iter()
            .map(|&id| network.name(id).to_string())
            .collect();
        info!(terminal, gate = network.name(gate), feeders = feeders.len(), "watching gate inputs");

        let watches = feeders
            .iter()
            .map(|name| sim.register_watch(name))
            .collect::<PulseResult<Vec<_>>>()?;
        Ok(Self::new(watches))
    }

    pub fn watches(&self) -> &[WatchHandle] {
        &self.watches
    }

    /// Number of watches `sim` has not yet seen send high.
    pub fn pending(&self, sim: &Simulator) -> usize {
        self.watches
            .iter()
            .filter(|&&h| sim.is_high_seen(h).is_none())
            .count()
    }

    pub fn is_converged(&self, sim: &Simulator) -> bool {
        !self.watches.is_empty() && self.pending(sim) == 0
    }

    /// LCM of all first-high indices, once every watch resolved.
    pub fn period(&self, sim: &Simulator) -> Option<PulseResult<u64>> {
        let firsts = self
            .watches
            .iter()
            .map(|&h| sim.is_high_seen(h))
            .collect::<Option<Vec<u64>>>()?;
        if firsts.is_empty() {
            return None;
        }
        Some(combine_periods(&firsts))
    }

    /// Run triggers on `sim` until every watch resolved, then combine.
    ///
    /// Triggers are pulled lazily from [`Simulator::triggers`]. `bound`
    /// caps the simulator's total trigger count; reaching it first fails
    /// with [`PulseError::WatchBoundExceeded`].
    pub fn resolve(&self, sim: &mut Simulator, bound: Option<u64>) -> PulseResult<u64> {
        if self.watches.is_empty() {
            return Err(PulseError::NoWatches);
        }
        let mut triggers = sim.triggers().up_to(bound);
        loop {
            if let Some(period) = self.period(triggers.simulator()) {
                let period = period?;
                info!(trigger = triggers.simulator().trigger_count(), period, "cycle analysis converged");
                return Ok(period);
            }
            if triggers.next().is_none() {
                // Only a capped sequence ends.
                return Err(PulseError::WatchBoundExceeded {
                    bound: bound.unwrap_or_default(),
                    pending: self.pending(triggers.simulator()),
                });
            }
        }
    }
}

/// LCM of every period, or `PeriodOverflow`.
pub fn combine_periods(periods: &[u64]) -> PulseResult<u64> {
    periods
        .iter()
        .try_fold(1u64, |acc, &n| lcm(acc, n).ok_or(PulseError::PeriodOverflow))
}

/// Greatest common divisor (Euclid).
pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

/// Least common multiple, `None` on overflow. `lcm(0, n)` is `0`.
pub fn lcm(a: u64, b: u64) -> Option<u64> {
    if a == 0 || b == 0 {
        return Some(0);
    }
    (a / gcd(a, b)).checked_mul(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::parse_declarations;
    use crate::network::Network;
    use crate::queue::Queued;

    /// Two counters feeding one gate: `ia` first sends high at 2, `ib` at 4.
    const TWO_FEEDERS: &str = "\
broadcaster -> a
%a -> b, ia
%b -> ib
&ia -> hub
&ib -> hub
&hub -> rx
";

    /// A mod-3 counter (`p0`, `p1`, reset by `cp`) and a mod-4 counter
    /// (`q0`..`q2`, reset by `cq`). `xp1` first sends high at 3 and `fq`
    /// at 4, each then every period. The inverter pair on the mod-3 side
    /// lines both highs up at `hub` in the same queue position.
    const MOD_THREE_AND_FOUR: &str = "\
broadcaster -> p0, q0
%p0 -> p1, cp
%p1 -> cp
&cp -> p0, fp
&fp -> xp0
&xp0 -> xp1
&xp1 -> hub
%q0 -> q1
%q1 -> q2
%q2 -> cq
&cq -> q2, fq
&fq -> hub
&hub -> rx
";

    fn simulator(text: &str) -> Simulator {
        let decls = parse_declarations(text).unwrap();
        Simulator::new(Network::build(&decls).unwrap(), "broadcaster").unwrap()
    }

    /// First trigger on which `rx` receives a low pulse, by plain simulation.
    fn first_low_by_brute_force(text: &str, limit: u64) -> Option<u64> {
        let mut sim = simulator(text);
        let rx = sim.network().id("rx").unwrap();
        for _ in 0..limit {
            let mut hit = false;
            sim.run_trigger_with(&mut |_: &Network, _: u64, q: &Queued| {
                if q.pulse.target == rx && q.pulse.level.is_low() {
                    hit = true;
                }
            });
            if hit {
                return Some(sim.trigger_count());
            }
        }
        None
    }

    fn names(sim: &Simulator, analyzer: &CycleAnalyzer) -> Vec<String> {
        analyzer
            .watches()
            .iter()
            .map(|&h| sim.watch_name(h).unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_gcd_lcm() {
        assert_eq!(gcd(12, 18), 6);
        assert_eq!(gcd(7, 0), 7);
        assert_eq!(lcm(3, 4), Some(12));
        assert_eq!(lcm(6, 4), Some(12));
        assert_eq!(lcm(u64::MAX, u64::MAX - 1), None);
    }

    #[test]
    fn test_combine_periods() {
        assert_eq!(combine_periods(&[3, 4]).unwrap(), 12);
        assert_eq!(combine_periods(&[2, 4, 8]).unwrap(), 8);
        assert!(matches!(
            combine_periods(&[u64::MAX, u64::MAX - 1]),
            Err(PulseError::PeriodOverflow)
        ));
    }

    #[test]
    fn test_periods_three_and_four_combine_to_twelve() {
        let mut sim = simulator(MOD_THREE_AND_FOUR);
        let analyzer = CycleAnalyzer::for_terminal(&mut sim, "rx").unwrap();
        assert_eq!(names(&sim, &analyzer), vec!["xp1", "fq"]);

        let period = analyzer.resolve(&mut sim, Some(100)).unwrap();
        assert_eq!(period, 12);
        // Both watches resolved by trigger 4; the LCM is not the largest of them.
        assert_eq!(sim.trigger_count(), 4);
        let firsts: Vec<Option<u64>> = analyzer
            .watches()
            .iter()
            .map(|&h| sim.is_high_seen(h))
            .collect();
        assert_eq!(firsts, vec![Some(3), Some(4)]);

        assert_eq!(first_low_by_brute_force(MOD_THREE_AND_FOUR, 30), Some(12));
    }

    #[test]
    fn test_pending_until_every_watch_fires() {
        let mut sim = simulator(TWO_FEEDERS);
        let analyzer = CycleAnalyzer::for_terminal(&mut sim, "rx").unwrap();
        assert_eq!(analyzer.pending(&sim), 2);
        sim.run_for(2);
        assert_eq!(analyzer.pending(&sim), 1);
        assert!(analyzer.period(&sim).is_none());
        assert!(!analyzer.is_converged(&sim));
        sim.run_for(2);
        assert!(analyzer.is_converged(&sim));
        assert_eq!(analyzer.period(&sim).unwrap().unwrap(), 4);
    }

    #[test]
    fn test_bound_turns_hang_into_error() {
        // `z` is never pulsed, so it never sends high.
        let mut sim = simulator("broadcaster -> a\n%a -> hub\n%z -> hub\n&hub -> rx\n");
        let analyzer = CycleAnalyzer::for_terminal(&mut sim, "rx").unwrap();
        match analyzer.resolve(&mut sim, Some(100)) {
            Err(PulseError::WatchBoundExceeded { bound, pending }) => {
                assert_eq!(bound, 100);
                assert_eq!(pending, 1);
            }
            other => panic!("expected bound error, got {:?}", other),
        }
        assert_eq!(sim.trigger_count(), 100);
    }

    #[test]
    fn test_no_watches() {
        let mut sim = simulator(TWO_FEEDERS);
        let analyzer = CycleAnalyzer::new(Vec::new());
        assert!(matches!(analyzer.resolve(&mut sim, None), Err(PulseError::NoWatches)));
        assert!(analyzer.period(&sim).is_none());
    }

    #[test]
    fn test_repeated_handles_kept_once() {
        let mut sim = simulator(TWO_FEEDERS);
        let ia = sim.register_watch("ia").unwrap();
        let analyzer = CycleAnalyzer::new([ia, ia]);
        assert_eq!(analyzer.watches(), &[ia]);
        assert_eq!(analyzer.resolve(&mut sim, Some(10)).unwrap(), 2);
    }

    #[test]
    fn test_for_terminal_watches_gate_inputs() {
        let mut sim = simulator(TWO_FEEDERS);
        let analyzer = CycleAnalyzer::for_terminal(&mut sim, "rx").unwrap();
        assert_eq!(names(&sim, &analyzer), vec!["ia", "ib"]);
    }

    #[test]
    fn test_counter_network_period_matches_brute_force() {
        let mut sim = simulator(TWO_FEEDERS);
        let analyzer = CycleAnalyzer::for_terminal(&mut sim, "rx").unwrap();
        let period = analyzer.resolve(&mut sim, Some(1_000)).unwrap();
        assert_eq!(period, 4);
        assert_eq!(first_low_by_brute_force(TWO_FEEDERS, 16), Some(period));
    }

    #[test]
    fn test_repeated_edges_watch_one_feeder() {
        let text = "broadcaster -> a\n%a -> hub, hub\n&hub -> rx\n";
        let mut sim = simulator(text);
        let analyzer = CycleAnalyzer::for_terminal(&mut sim, "rx").unwrap();
        assert_eq!(names(&sim, &analyzer), vec!["a"]);
        assert_eq!(analyzer.resolve(&mut sim, Some(50)).unwrap(), 1);
        assert_eq!(first_low_by_brute_force(text, 5), Some(1));
    }

    #[test]
    fn test_repeated_edge_to_terminal_is_one_upstream_gate() {
        let text = "broadcaster -> a\n%a -> hub\n&hub -> rx, rx\n";
        let mut sim = simulator(text);
        let analyzer = CycleAnalyzer::for_terminal(&mut sim, "rx").unwrap();
        assert_eq!(analyzer.resolve(&mut sim, Some(50)).unwrap(), 1);
        assert_eq!(first_low_by_brute_force(text, 5), Some(1));
    }

    #[test]
    fn test_terminal_without_gate() {
        let mut sim = simulator("broadcaster -> a\n%a -> rx\n");
        assert!(matches!(
            CycleAnalyzer::for_terminal(&mut sim, "rx"),
            Err(PulseError::NoUpstreamGate(_))
        ));

        let mut sim = simulator("broadcaster -> a, b\n%a -> rx\n%b -> rx\n");
        assert!(matches!(
            CycleAnalyzer::for_terminal(&mut sim, "rx"),
            Err(PulseError::AmbiguousUpstream { count: 2, .. })
        ));

        let mut sim = simulator("broadcaster -> a\n%a -> b\n");
        assert!(matches!(
            CycleAnalyzer::for_terminal(&mut sim, "rx"),
            Err(PulseError::UnknownNode(_))
        ));
    }
}
