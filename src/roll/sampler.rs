//! Weighted stat sampling over the odds tables.
//!
//! Both sampling policies walk a cumulative distribution in table order:
//! main stats use the per-slot drop probabilities (optionally filtered to a
//! caller whitelist), new substats use the relative-likelihood table minus
//! the main stat and the substats already present.

use crate::data::odds::{OddsTable, WeightedStat};
use crate::data::stats::{Rarity, SlotKind, Stat};
use crate::error::{SimError, SimResult};
use crate::roll::rng::RandomSource;

/// Cumulative walk over `pool` using `unit * total_weight` as the
/// threshold. Accumulated rounding can leave the threshold just past the
/// final bucket; the last candidate is returned deterministically so the
/// draw stays total.
pub(crate) fn weighted_pick(
    pool: &[WeightedStat],
    unit: f64,
    context: &'static str,
) -> SimResult<Stat> {
    let total: f64 = pool.iter().map(|entry| entry.weight).sum();
    if pool.is_empty() || total <= 0.0 {
        return Err(SimError::EmptyCandidatePool { context });
    }
    let threshold = unit * total;
    let mut cumulative = 0.0;
    for entry in pool {
        cumulative += entry.weight;
        if threshold < cumulative {
            return Ok(entry.stat);
        }
    }
    Ok(pool[pool.len() - 1].stat)
}

/// Draw a main stat for `slot`. `allowed` narrows the legal mains to a
/// whitelist; relative weights between the surviving candidates are kept
/// as-is, the cumulative walk scales to whatever total survives.
pub fn random_main_stat<T: OddsTable + ?Sized>(
    tables: &T,
    slot: SlotKind,
    allowed: Option<&[Stat]>,
    rng: &mut impl RandomSource,
) -> SimResult<Stat> {
    let weights = tables.main_stat_weights(slot)?;
    match allowed {
        None => weighted_pick(weights, rng.unit_f64(), "main stat pool"),
        Some(list) => {
            let filtered: Vec<WeightedStat> = weights
                .iter()
                .filter(|entry| list.contains(&entry.stat))
                .copied()
                .collect();
            weighted_pick(&filtered, rng.unit_f64(), "filtered main stat pool")
        }
    }
}

/// Draw a substat not yet on the artifact. The main stat and every stat in
/// `existing` are excluded; weights come from the relative-likelihood table,
/// not the main-stat odds.
pub fn random_new_substat<T: OddsTable + ?Sized>(
    tables: &T,
    main_stat: Stat,
    existing: &[Stat],
    rng: &mut impl RandomSource,
) -> SimResult<Stat> {
    let pool: Vec<WeightedStat> = tables
        .substat_weights()?
        .iter()
        .filter(|entry| entry.stat != main_stat && !existing.contains(&entry.stat))
        .copied()
        .collect();
    weighted_pick(&pool, rng.unit_f64(), "substat pool")
}

/// Draw the substat count of a freshly dropped artifact from the per-rarity
/// distribution. This draw is strict: the listed odds must accumulate past
/// the sample, otherwise the table is malformed and the draw fails instead
/// of falling back.
pub fn initial_substat_count<T: OddsTable + ?Sized>(
    tables: &T,
    rarity: Rarity,
    rng: &mut impl RandomSource,
) -> SimResult<usize> {
    let odds = tables.initial_substat_odds(rarity)?;
    if odds.is_empty() {
        return Err(SimError::EmptyCandidatePool {
            context: "initial substat count distribution",
        });
    }
    let sample = rng.unit_f64();
    let mut cumulative = 0.0;
    for entry in odds {
        cumulative += entry.odds;
        if sample < cumulative {
            return Ok(usize::from(entry.count));
        }
    }
    Err(SimError::MalformedDistribution {
        table: "initial_substat_odds",
        key: rarity.name().to_string(),
    })
}
