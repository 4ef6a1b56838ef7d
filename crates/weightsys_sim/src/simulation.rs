use std::{collections::HashMap, io::Write};

use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::trace;
use weightsys_core::prelude::*;
use weightsys_flow::SimSettings;

use crate::{ArmReport, SimReport};

/// Feedback loop over a [`WeightSystem`]: pick an arm, roll its success rate,
/// report the outcome back.
pub struct Simulation {
    pub system: WeightSystem<String>,
    success_rates: HashMap<String, f64>,
    picks: HashMap<String, u32>,
    successes: u32,
    round: u32,
    rounds: u32,
    report_every: u32,
    rng: StdRng,
}

impl Simulation {
    pub fn new(settings: &SimSettings) -> Self {
        let mut system = WeightSystem::new(settings.system);
        let mut success_rates = HashMap::new();
        // the first arm with a name wins, matching add_item
        for arm in settings.arms.iter() {
            system.add_item(arm.name.clone(), arm.add_options());
            success_rates
                .entry(arm.name.clone())
                .or_insert(arm.success_rate);
        }
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            system,
            success_rates,
            picks: HashMap::new(),
            successes: 0,
            round: 0,
            rounds: settings.rounds,
            report_every: settings.report_every,
            rng,
        }
    }

    /// Plays one round, returns the picked arm and whether it succeeded.
    /// `None` when there are no arms.
    pub fn step(&mut self) -> Option<(String, bool)> {
        let arm = self.system.choose(&mut self.rng)?.clone();
        let rate = self.success_rates.get(&arm).copied().unwrap_or_default();
        let success = self.rng.gen::<f64>() < rate;

        self.system.adjust_weight(arm.clone(), success);
        *self.picks.entry(arm.clone()).or_default() += 1;
        if success {
            self.successes += 1;
        }
        self.round += 1;
        trace!(target: "sim", "round {} picked {} success {}", self.round, arm, success);
        Some((arm, success))
    }

    /// Plays every remaining round, writing intermediate reports to `out`.
    pub fn run<W: Write>(&mut self, out: &mut W) -> std::io::Result<SimReport> {
        while self.round < self.rounds {
            if self.step().is_none() {
                tracing::warn!(target: "sim", "no arms to pick from, stopping");
                break;
            }
            if self.report_every > 0 && self.round % self.report_every == 0 && self.round < self.rounds {
                writeln!(out, "{}", self.report())?;
            }
        }
        Ok(self.report())
    }

    pub fn report(&self) -> SimReport {
        SimReport {
            round: self.round,
            successes: self.successes,
            total_weight: self.system.total_weight(),
            avg_weight: self.system.avg_weight(),
            arms: self
                .system
                .sorted_weights()
                .into_iter()
                .map(|WeightedItem { item, weight }| ArmReport {
                    picks: self.picks.get(&item).copied().unwrap_or_default(),
                    name: item,
                    weight,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod test_simulation {
    use weightsys_flow::ArmSettings;

    use super::*;

    fn settings(rounds: u32) -> SimSettings {
        SimSettings {
            arms: vec![
                ArmSettings {
                    name: "reliable".to_string(),
                    success_rate: 1.0,
                    weight: None,
                },
                ArmSettings {
                    name: "flaky".to_string(),
                    success_rate: 0.0,
                    weight: None,
                },
            ],
            rounds,
            seed: Some(11),
            ..Default::default()
        }
    }

    #[test]
    fn feedback_moves_weights() {
        let mut sim = Simulation::new(&settings(400));
        let report = sim.run(&mut Vec::new()).unwrap();
        assert_eq!(report.round, 400);
        assert_eq!(report.arms[0].name, "reliable");
        assert_eq!(report.arms[0].weight, 1000.0);
        assert!(report.arms[1].weight < 500.5);
        assert_eq!(report.arms.iter().map(|arm| arm.picks).sum::<u32>(), 400);
        assert_eq!(report.successes, report.arms[0].picks);
    }

    #[test]
    fn seeded_runs_match() {
        let a = Simulation::new(&settings(100)).run(&mut Vec::new()).unwrap();
        let b = Simulation::new(&settings(100)).run(&mut Vec::new()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn duplicate_arm_uses_first_rate() {
        let mut duplicated = settings(50);
        duplicated.arms.push(ArmSettings {
            name: "flaky".to_string(),
            success_rate: 1.0,
            weight: None,
        });
        let report = Simulation::new(&duplicated).run(&mut Vec::new()).unwrap();
        assert_eq!(report.arms.len(), 2);
        assert_eq!(report.successes, report.arms[0].picks);
        assert_eq!(report.arms[0].name, "reliable");
    }

    #[test]
    fn no_arms_stops_early() {
        let mut sim = Simulation::new(&SimSettings::default());
        assert_eq!(sim.step(), None);
        let report = sim.run(&mut Vec::new()).unwrap();
        assert_eq!(report.round, 0);
        assert!(report.arms.is_empty());
    }

    #[test]
    fn intermediate_reports_are_written() {
        let mut sim = Simulation::new(&SimSettings {
            report_every: 10,
            ..settings(30)
        });
        let mut out = Vec::new();
        sim.run(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("round ").count(), 2);
    }
}
