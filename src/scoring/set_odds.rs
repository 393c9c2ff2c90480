//! Slot combinatorics and on-set acquisition odds.
//!
//! `slot_combinations` enumerates the subsets of equipment slots a desired
//! set bonus could occupy; `on_set_odds` prices the chance of acquiring a
//! given subset fully on-set and main-stat-compatible before drawing a
//! non-matching piece; `weighted_set_factor` turns those prices into the
//! satisfaction penalty of an off-set artifact.

use std::collections::HashMap;

use crate::data::artifact::Artifact;
use crate::data::build::Build;
use crate::data::odds::OddsTable;
use crate::data::stats::{SlotKind, Stat, SLOT_DROP_ODDS};
use crate::error::{SimError, SimResult};

/// Every `size`-combination of `slots`, in lexicographic order of the input
/// ordering. `size == 0` yields exactly one empty combination; `size`
/// beyond the slot count is an invariant violation.
pub fn slot_combinations(slots: &[SlotKind], size: usize) -> SimResult<Vec<Vec<SlotKind>>> {
    if size > slots.len() {
        return Err(SimError::SubsetTooLarge {
            requested: size,
            available: slots.len(),
        });
    }
    Ok(combine(slots, size))
}

/// Pure recursion: each call returns freshly constructed lists, so no
/// accumulator is shared across branches.
fn combine(slots: &[SlotKind], size: usize) -> Vec<Vec<SlotKind>> {
    if size == 0 {
        return vec![Vec::new()];
    }
    if size > slots.len() {
        return Vec::new();
    }
    let first = slots[0];
    let rest = &slots[1..];
    let mut combinations = Vec::new();
    for tail in combine(rest, size - 1) {
        let mut combination = Vec::with_capacity(size);
        combination.push(first);
        combination.extend(tail);
        combinations.push(combination);
    }
    combinations.extend(combine(rest, size));
    combinations
}

fn factorial(n: usize) -> f64 {
    (1..=n).fold(1.0, |acc, i| acc * i as f64)
}

/// Probability of acquiring exactly the given slots on-set and main-stat
/// compatible, in any arrival order, before a non-matching drop:
/// `∏ mainStatOdds(slot) × (1/5)^n × n!`. Slots without a declared desired
/// main stat accept anything and contribute a main-stat factor of 1;
/// declared stats are priced by summing the slot's table probabilities over
/// the whitelist, each lookup failing fast on an undefined (slot, stat) key.
pub fn on_set_odds<T: OddsTable + ?Sized>(
    tables: &T,
    slots: &[SlotKind],
    desired_main_stats: &HashMap<SlotKind, Vec<Stat>>,
) -> SimResult<f64> {
    let mut odds = factorial(slots.len());
    for &slot in slots {
        odds *= SLOT_DROP_ODDS;
        let Some(allowed) = desired_main_stats.get(&slot) else {
            continue;
        };
        if allowed.is_empty() {
            continue;
        }
        let mut acceptable = 0.0;
        for &stat in allowed {
            acceptable += tables.main_stat_weight(slot, stat)?;
        }
        odds *= acceptable;
    }
    Ok(odds)
}

/// Set-bonus weighting for one artifact against one build, in [0, 1].
///
/// An artifact whose set matches any desired bonus never takes a penalty
/// (factor 1), as does any artifact when the build desires no bonus at all.
/// Otherwise the factor is the share of on-set acquisition odds left to
/// combinations that exclude the artifact's slot, over combinations of size
/// equal to the build's total desired piece count.
pub fn weighted_set_factor<T: OddsTable + ?Sized>(
    tables: &T,
    artifact: &Artifact,
    build: &Build,
) -> SimResult<f64> {
    if build.desired_set_bonuses.is_empty() || build.desires_set(&artifact.set_id) {
        return Ok(1.0);
    }
    let size = build.desired_piece_total();
    let combinations = slot_combinations(&SlotKind::ALL, size)?;

    let mut total = 0.0;
    let mut excluding = 0.0;
    for combination in &combinations {
        let odds = on_set_odds(tables, combination, &build.desired_main_stats)?;
        total += odds;
        if !combination.contains(&artifact.slot) {
            excluding += odds;
        }
    }
    if total <= 0.0 {
        // Degenerate whitelists can zero every combination; no information
        // means no penalty.
        return Ok(1.0);
    }
    Ok(excluding / total)
}
