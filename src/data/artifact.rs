//! Artifact and substat value types.
//!
//! An artifact's main stat is fixed at creation and never re-rolled; its
//! substats are distinct stats, at most the table maximum, each carrying a
//! running total of its rolled increments. Metric results do NOT live on the
//! artifact: they belong to the caller-owned [crate::metrics::MetricsTable].

use serde::{Deserialize, Serialize};

use crate::data::stats::{Rarity, SlotKind, Stat};

/// One (stat, accumulated value) pair on an artifact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatValue {
    pub stat: Stat,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    pub id: String,
    pub set_id: String,
    pub slot: SlotKind,
    pub rarity: Rarity,
    pub level: u8,
    pub locked: bool,
    pub main_stat: Stat,
    pub substats: Vec<StatValue>,
}

impl Artifact {
    /// The stats currently present as substats, in roll order.
    pub fn substat_stats(&self) -> Vec<Stat> {
        self.substats.iter().map(|entry| entry.stat).collect()
    }

    pub fn has_substat(&self, stat: Stat) -> bool {
        self.substats.iter().any(|entry| entry.stat == stat)
    }

    /// Accumulated substat value for `stat`, 0 when absent.
    pub fn substat_total(&self, stat: Stat) -> f64 {
        self.substats
            .iter()
            .filter(|entry| entry.stat == stat)
            .map(|entry| entry.value)
            .sum()
    }
}
