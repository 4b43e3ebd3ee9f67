use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use crate::constants::round_prob;

/// Stage a team is credited with reaching when it wins a game.
///
/// First-round winners reach the round of 32, regional champions reach the Final Four.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    RoundOf32,
    Sweet16,
    Elite8,
    FinalFour,
    Champion,
}

impl Stage {
    /// Stages credited inside a region, one per round played
    pub const REGION: [Stage; 4] = [
        Stage::RoundOf32,
        Stage::Sweet16,
        Stage::Elite8,
        Stage::FinalFour,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Stage::RoundOf32 => "r32",
            Stage::Sweet16 => "s16",
            Stage::Elite8 => "e8",
            Stage::FinalFour => "ff",
            Stage::Champion => "champ",
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

/// Per-team counts of stages reached.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StageCounts([u64; 5]);

impl StageCounts {
    pub fn get(&self, stage: Stage) -> u64 {
        self.0[stage.index()]
    }

    fn add(&mut self, other: &StageCounts) {
        for (mine, theirs) in self.0.iter_mut().zip(other.0) {
            *mine += theirs;
        }
    }
}

/// Advancement frequencies for one team.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Advancement {
    pub r32: f64,
    pub s16: f64,
    pub e8: f64,
    pub ff: f64,
    pub champ: f64,
}

/// Counters accumulated over simulated trials.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Tally {
    advancement: HashMap<String, StageCounts>,
    champions: HashMap<String, u64>,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `team` with reaching `stage` in the current trial.
    pub fn record(&mut self, team: &str, stage: Stage) {
        let counts = self.advancement.entry(team.to_string()).or_default();
        counts.0[stage.index()] += 1;

        if stage == Stage::Champion {
            *self.champions.entry(team.to_string()).or_insert(0) += 1;
        }
    }

    pub fn counts(&self, team: &str) -> StageCounts {
        self.advancement.get(team).copied().unwrap_or_default()
    }

    pub fn championships(&self, team: &str) -> u64 {
        self.champions.get(team).copied().unwrap_or(0)
    }

    /// Add another tally's counts into this one. Order of merging doesn't matter.
    pub fn merge(mut self, other: Tally) -> Tally {
        for (team, counts) in other.advancement {
            self.advancement.entry(team).or_default().add(&counts);
        }
        for (team, wins) in other.champions {
            *self.champions.entry(team).or_insert(0) += wins;
        }
        self
    }

    /// Frequencies over `sims` trials, rounded for reporting.
    ///
    /// Returns `(champion_probs, advancement)`. Both are empty when `sims` is zero.
    pub fn normalize(
        &self,
        sims: u64,
    ) -> (BTreeMap<String, f64>, BTreeMap<String, Advancement>) {
        if sims == 0 {
            return (BTreeMap::new(), BTreeMap::new());
        }

        let freq = |count: u64| round_prob(count as f64 / sims as f64);

        let champions = self
            .champions
            .iter()
            .map(|(team, &wins)| (team.clone(), freq(wins)))
            .collect();

        let advancement = self
            .advancement
            .iter()
            .map(|(team, counts)| {
                let adv = Advancement {
                    r32: freq(counts.get(Stage::RoundOf32)),
                    s16: freq(counts.get(Stage::Sweet16)),
                    e8: freq(counts.get(Stage::Elite8)),
                    ff: freq(counts.get(Stage::FinalFour)),
                    champ: freq(counts.get(Stage::Champion)),
                };
                (team.clone(), adv)
            })
            .collect();

        (champions, advancement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_counts() {
        let mut tally = Tally::new();
        tally.record("Duke", Stage::RoundOf32);
        tally.record("Duke", Stage::RoundOf32);
        tally.record("Duke", Stage::Champion);

        let counts = tally.counts("Duke");
        assert_eq!(counts.get(Stage::RoundOf32), 2);
        assert_eq!(counts.get(Stage::Sweet16), 0);
        assert_eq!(counts.get(Stage::Champion), 1);
        assert_eq!(tally.championships("Duke"), 1);
        assert_eq!(tally.counts("UNC"), StageCounts::default());
    }

    #[test]
    fn test_merge_is_addition() {
        let mut a = Tally::new();
        a.record("Duke", Stage::RoundOf32);
        a.record("Duke", Stage::Champion);

        let mut b = Tally::new();
        b.record("Duke", Stage::RoundOf32);
        b.record("UNC", Stage::Sweet16);

        let ab = a.clone().merge(b.clone());
        let ba = b.merge(a);
        assert_eq!(ab, ba);
        assert_eq!(ab.counts("Duke").get(Stage::RoundOf32), 2);
        assert_eq!(ab.counts("UNC").get(Stage::Sweet16), 1);
        assert_eq!(ab.championships("Duke"), 1);
    }

    #[test]
    fn test_normalize() {
        let mut tally = Tally::new();
        for _ in 0..2 {
            tally.record("Duke", Stage::RoundOf32);
        }
        tally.record("Duke", Stage::Sweet16);
        tally.record("Duke", Stage::Champion);

        let (champions, advancement) = tally.normalize(3);
        assert_eq!(champions["Duke"], 0.3333);
        assert_eq!(
            advancement["Duke"],
            Advancement {
                r32: 0.6667,
                s16: 0.3333,
                e8: 0.0,
                ff: 0.0,
                champ: 0.3333,
            }
        );
    }

    #[test]
    fn test_normalize_zero_sims_empty() {
        let mut tally = Tally::new();
        tally.record("Duke", Stage::RoundOf32);
        let (champions, advancement) = tally.normalize(0);
        assert!(champions.is_empty());
        assert!(advancement.is_empty());
    }

    #[test]
    fn test_stage_labels() {
        let labels: Vec<&str> = Stage::REGION.iter().map(Stage::label).collect();
        assert_eq!(labels, ["r32", "s16", "e8", "ff"]);
        assert_eq!(Stage::Champion.label(), "champ");
    }
}
