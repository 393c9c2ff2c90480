//! Levels an artifact to its rarity cap, rolling substats along the way.
//!
//! The roller never mutates its input: every simulation iteration starts
//! from the caller's artifact and produces a fresh maxed-out value. Substat
//! growth is stochastic, so a partially leveled artifact is re-rolled to
//! completion on every iteration.

use crate::data::artifact::{Artifact, StatValue};
use crate::data::odds::OddsTable;
use crate::data::stats::{Rarity, SlotKind, Stat};
use crate::error::{SimError, SimResult};
use crate::roll::rng::RandomSource;
use crate::roll::sampler::{initial_substat_count, random_main_stat, random_new_substat};

/// Substat-roll events left between the artifact's current level and its
/// rarity cap: `ceil((max_level - level) / levels_per_roll)`.
pub fn roll_events_remaining<T: OddsTable + ?Sized>(
    tables: &T,
    artifact: &Artifact,
) -> SimResult<u32> {
    let max_level = tables.max_level(artifact.rarity)?;
    let per_roll = tables.levels_per_roll(artifact.rarity)?;
    if per_roll == 0 {
        return Err(SimError::MalformedDistribution {
            table: "levels_per_roll",
            key: artifact.rarity.name().to_string(),
        });
    }
    let remaining = u32::from(max_level.saturating_sub(artifact.level));
    Ok(remaining.div_ceil(u32::from(per_roll)))
}

/// One per-roll increment for a (rarity, stat) pairing, drawn uniformly from
/// the discrete roll-value table.
pub fn roll_value<T: OddsTable + ?Sized>(
    tables: &T,
    rarity: Rarity,
    stat: Stat,
    rng: &mut impl RandomSource,
) -> SimResult<f64> {
    let values = tables.roll_values(rarity, stat)?;
    if values.is_empty() {
        return Err(SimError::MalformedDistribution {
            table: "roll_values",
            key: format!("{}/{}", rarity.name(), stat.name()),
        });
    }
    Ok(values[rng.pick_index(values.len())])
}

/// Simulate the artifact's remaining level-ups and return the maxed-out
/// result. Below the substat cap each roll event introduces a new substat
/// with its first value; at the cap it reinforces an existing substat chosen
/// uniformly. Identity fields (id, set, slot, rarity, main stat, lock flag)
/// are copied unchanged.
pub fn roll_to_max<T: OddsTable + ?Sized>(
    tables: &T,
    artifact: &Artifact,
    rng: &mut impl RandomSource,
) -> SimResult<Artifact> {
    let events = roll_events_remaining(tables, artifact)?;
    let cap = tables.max_substats();

    let mut rolled = artifact.clone();
    rolled.level = tables.max_level(artifact.rarity)?;

    for _ in 0..events {
        if rolled.substats.len() < cap {
            let existing = rolled.substat_stats();
            let stat = random_new_substat(tables, rolled.main_stat, &existing, rng)?;
            let value = roll_value(tables, rolled.rarity, stat, rng)?;
            rolled.substats.push(StatValue { stat, value });
        } else {
            let index = rng.pick_index(rolled.substats.len());
            let stat = rolled.substats[index].stat;
            rolled.substats[index].value += roll_value(tables, rolled.rarity, stat, rng)?;
        }
    }

    Ok(rolled)
}

/// Generate a freshly dropped level-0 artifact: main stat via the main-stat
/// sampling policy, substat count via the per-rarity distribution, then that
/// many distinct substats each with one rolled value.
pub fn generate_artifact<T: OddsTable + ?Sized>(
    tables: &T,
    id: &str,
    set_id: &str,
    slot: SlotKind,
    rarity: Rarity,
    allowed_main: Option<&[Stat]>,
    rng: &mut impl RandomSource,
) -> SimResult<Artifact> {
    let main_stat = random_main_stat(tables, slot, allowed_main, rng)?;
    let count = initial_substat_count(tables, rarity, rng)?.min(tables.max_substats());

    let mut artifact = Artifact {
        id: id.to_string(),
        set_id: set_id.to_string(),
        slot,
        rarity,
        level: 0,
        locked: false,
        main_stat,
        substats: Vec::with_capacity(count),
    };
    for _ in 0..count {
        let existing = artifact.substat_stats();
        let stat = random_new_substat(tables, main_stat, &existing, rng)?;
        let value = roll_value(tables, rarity, stat, rng)?;
        artifact.substats.push(StatValue { stat, value });
    }
    Ok(artifact)
}
