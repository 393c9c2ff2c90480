//! Build targets and the aggregated stat profile scorers consume.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::data::artifact::Artifact;
use crate::data::stats::{SlotKind, Stat};

/// "N pieces from set S" as a build requirement. A build may carry zero, one,
/// or two of these; their piece counts never sum past the slot count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesiredSetBonus {
    pub set_id: String,
    pub piece_count: usize,
}

/// A desired overall stat floor: satisfied when the profile reaches
/// `minimum` (equality counts).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatTarget {
    pub stat: Stat,
    pub minimum: f64,
}

/// Target profile for one character: desired main stats per slot (missing or
/// empty list = any main stat accepted), desired set bonuses, desired stat
/// floors, and the currently equipped artifacts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Build {
    pub id: String,
    pub name: String,
    pub desired_main_stats: HashMap<SlotKind, Vec<Stat>>,
    pub desired_set_bonuses: Vec<DesiredSetBonus>,
    pub desired_stats: Vec<StatTarget>,
    pub equipped: HashMap<SlotKind, Artifact>,
}

impl Build {
    /// Total piece count across every desired set bonus.
    pub fn desired_piece_total(&self) -> usize {
        self.desired_set_bonuses
            .iter()
            .map(|bonus| bonus.piece_count)
            .sum()
    }

    pub fn desires_set(&self, set_id: &str) -> bool {
        self.desired_set_bonuses
            .iter()
            .any(|bonus| bonus.set_id == set_id)
    }

    /// Substat totals over the currently equipped artifacts.
    pub fn substat_profile(&self) -> StatProfile {
        StatProfile::from_artifacts(self.equipped.values())
    }

    /// Substat totals with `replacement` occupying its slot in place of
    /// whatever is equipped there. The build itself is not modified; this is
    /// how the metrics driver scores a simulated artifact.
    pub fn substat_profile_with(&self, replacement: &Artifact) -> StatProfile {
        let mut profile = StatProfile::from_artifacts(
            self.equipped
                .iter()
                .filter(|(slot, _)| **slot != replacement.slot)
                .map(|(_, artifact)| artifact),
        );
        for entry in &replacement.substats {
            profile.add(entry.stat, entry.value);
        }
        profile
    }
}

/// Aggregated stat totals, summed from artifact substats.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatProfile {
    totals: HashMap<Stat, f64>,
}

impl StatProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_artifacts<'a>(artifacts: impl IntoIterator<Item = &'a Artifact>) -> Self {
        let mut profile = Self::new();
        for artifact in artifacts {
            for entry in &artifact.substats {
                profile.add(entry.stat, entry.value);
            }
        }
        profile
    }

    pub fn add(&mut self, stat: Stat, value: f64) {
        *self.totals.entry(stat).or_insert(0.0) += value;
    }

    /// Total for `stat`, 0 when the profile has never seen it.
    pub fn get(&self, stat: Stat) -> f64 {
        self.totals.get(&stat).copied().unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}
