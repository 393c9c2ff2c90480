//! Read-only odds and level-curve tables the simulator draws from.
//!
//! The engine consumes the [OddsTable] trait only; it never owns or
//! validates the game data behind it. Every lookup for an undefined key
//! fails fast with a data-integrity error instead of defaulting.
//! [StaticOddsTable] is the canonical in-memory implementation for hosts
//! that load their tables from JSON.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::data::stats::{Rarity, SlotKind, Stat};
use crate::error::{SimError, SimResult};

/// One candidate in a weighted draw. Entry order is load order and is part
/// of the sampling contract: cumulative walks never re-sort.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightedStat {
    pub stat: Stat,
    pub weight: f64,
}

/// One bucket of the initial substat-count distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CountOdds {
    pub count: u8,
    pub odds: f64,
}

/// Narrow query interface over the static game-data tables.
pub trait OddsTable {
    /// Maximum artifact level for a rarity.
    fn max_level(&self, rarity: Rarity) -> SimResult<u8>;

    /// Levels between consecutive substat-roll events for a rarity.
    fn levels_per_roll(&self, rarity: Rarity) -> SimResult<u8>;

    /// Initial substat-count distribution for a freshly dropped artifact.
    fn initial_substat_odds(&self, rarity: Rarity) -> SimResult<&[CountOdds]>;

    /// Maximum number of substats an artifact can carry.
    fn max_substats(&self) -> usize;

    /// Legal main stats for a slot with their drop probabilities, in table
    /// order. Probabilities sum to 1 per slot by construction.
    fn main_stat_weights(&self, slot: SlotKind) -> SimResult<&[WeightedStat]>;

    /// Drop probability of one specific (slot, stat) main-stat pairing.
    fn main_stat_weight(&self, slot: SlotKind, stat: Stat) -> SimResult<f64> {
        self.main_stat_weights(slot)?
            .iter()
            .find(|entry| entry.stat == stat)
            .map(|entry| entry.weight)
            .ok_or_else(|| SimError::MissingEntry {
                table: "main_stat_weights",
                key: format!("{}/{}", slot.name(), stat.name()),
            })
    }

    /// Relative substat likelihood table (weights, not probabilities).
    fn substat_weights(&self) -> SimResult<&[WeightedStat]>;

    /// Discrete per-roll increments for a (rarity, stat) pairing.
    fn roll_values(&self, rarity: Rarity, stat: Stat) -> SimResult<&[f64]>;
}

/// Per-rarity level curve and roll-value tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RarityCurve {
    pub max_level: u8,
    pub levels_per_roll: u8,
    pub initial_substat_odds: Vec<CountOdds>,
    pub roll_values: HashMap<Stat, Vec<f64>>,
}

/// In-memory odds tables, deserializable from the host's JSON game data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StaticOddsTable {
    pub rarities: HashMap<Rarity, RarityCurve>,
    pub main_stats: HashMap<SlotKind, Vec<WeightedStat>>,
    pub substats: Vec<WeightedStat>,
    pub max_substats: usize,
}

impl StaticOddsTable {
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    fn curve(&self, rarity: Rarity) -> SimResult<&RarityCurve> {
        self.rarities.get(&rarity).ok_or_else(|| SimError::MissingEntry {
            table: "rarities",
            key: rarity.name().to_string(),
        })
    }
}

impl OddsTable for StaticOddsTable {
    fn max_level(&self, rarity: Rarity) -> SimResult<u8> {
        Ok(self.curve(rarity)?.max_level)
    }

    fn levels_per_roll(&self, rarity: Rarity) -> SimResult<u8> {
        Ok(self.curve(rarity)?.levels_per_roll)
    }

    fn initial_substat_odds(&self, rarity: Rarity) -> SimResult<&[CountOdds]> {
        Ok(&self.curve(rarity)?.initial_substat_odds)
    }

    fn max_substats(&self) -> usize {
        self.max_substats
    }

    fn main_stat_weights(&self, slot: SlotKind) -> SimResult<&[WeightedStat]> {
        self.main_stats
            .get(&slot)
            .map(Vec::as_slice)
            .ok_or_else(|| SimError::MissingEntry {
                table: "main_stats",
                key: slot.name().to_string(),
            })
    }

    fn substat_weights(&self) -> SimResult<&[WeightedStat]> {
        Ok(&self.substats)
    }

    fn roll_values(&self, rarity: Rarity, stat: Stat) -> SimResult<&[f64]> {
        self.curve(rarity)?
            .roll_values
            .get(&stat)
            .map(Vec::as_slice)
            .ok_or_else(|| SimError::MissingEntry {
                table: "roll_values",
                key: format!("{}/{}", rarity.name(), stat.name()),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_table() -> StaticOddsTable {
        let mut rarities = HashMap::new();
        rarities.insert(
            Rarity::FiveStar,
            RarityCurve {
                max_level: 20,
                levels_per_roll: 4,
                initial_substat_odds: vec![
                    CountOdds {
                        count: 3,
                        odds: 0.8,
                    },
                    CountOdds {
                        count: 4,
                        odds: 0.2,
                    },
                ],
                roll_values: HashMap::from([(Stat::CritRate, vec![2.7, 3.1, 3.5, 3.9])]),
            },
        );
        let mut main_stats = HashMap::new();
        main_stats.insert(
            SlotKind::Plume,
            vec![WeightedStat {
                stat: Stat::AtkFlat,
                weight: 1.0,
            }],
        );
        StaticOddsTable {
            rarities,
            main_stats,
            substats: vec![
                WeightedStat {
                    stat: Stat::CritRate,
                    weight: 3.0,
                },
                WeightedStat {
                    stat: Stat::CritDamage,
                    weight: 3.0,
                },
            ],
            max_substats: 4,
        }
    }

    #[test]
    fn lookups_resolve_defined_keys() {
        let table = small_table();
        assert_eq!(table.max_level(Rarity::FiveStar).unwrap(), 20);
        assert_eq!(table.levels_per_roll(Rarity::FiveStar).unwrap(), 4);
        assert_eq!(
            table.main_stat_weight(SlotKind::Plume, Stat::AtkFlat).unwrap(),
            1.0
        );
        assert_eq!(
            table.roll_values(Rarity::FiveStar, Stat::CritRate).unwrap().len(),
            4
        );
    }

    #[test]
    fn undefined_keys_fail_fast_as_data_errors() {
        let table = small_table();
        let missing_rarity = table.max_level(Rarity::FourStar).unwrap_err();
        let missing_slot = table.main_stat_weights(SlotKind::Sands).unwrap_err();
        let missing_stat = table
            .main_stat_weight(SlotKind::Plume, Stat::CritRate)
            .unwrap_err();
        let missing_roll = table
            .roll_values(Rarity::FiveStar, Stat::HpFlat)
            .unwrap_err();
        for err in [missing_rarity, missing_slot, missing_stat, missing_roll] {
            assert!(err.is_data_error(), "{err}");
        }
    }

    #[test]
    fn json_round_trip_preserves_table_order() {
        let table = small_table();
        let raw = serde_json::to_string(&table).expect("serialize");
        let back = StaticOddsTable::from_json(&raw).expect("parse");
        assert_eq!(back, table);
        // Weighted entries keep their cumulative-walk order through serde.
        assert_eq!(back.substats[0].stat, Stat::CritRate);
    }
}
