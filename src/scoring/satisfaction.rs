//! Build satisfaction checks: desired stat floors, main stats, set bonuses.
//!
//! Each check is a pure function returning an overall boolean plus per-item
//! detail; `build_satisfaction` is the logical AND of all three.

use serde::Serialize;

use crate::data::build::{Build, StatProfile, StatTarget};
use crate::data::stats::{SlotKind, Stat};

/// What to do with a slot that declares a main-stat whitelist but has no
/// artifact equipped. The check itself has no opinion; callers do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptySlotPolicy {
    /// Skip the slot entirely.
    Ignore,
    /// Count the slot as a failed check.
    Fail,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatTargetCheck {
    pub stat: Stat,
    pub current: f64,
    pub target: f64,
    pub satisfied: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetStatsSatisfaction {
    pub satisfied: bool,
    pub checks: Vec<StatTargetCheck>,
}

/// Every desired floor must be reached; equality satisfies. An empty target
/// list is trivially satisfied with zero checks.
pub fn target_stats_satisfaction(
    profile: &StatProfile,
    targets: &[StatTarget],
) -> TargetStatsSatisfaction {
    let checks: Vec<StatTargetCheck> = targets
        .iter()
        .map(|target| {
            let current = profile.get(target.stat);
            StatTargetCheck {
                stat: target.stat,
                current,
                target: target.minimum,
                satisfied: current >= target.minimum,
            }
        })
        .collect();
    TargetStatsSatisfaction {
        satisfied: checks.iter().all(|check| check.satisfied),
        checks,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MainStatCheck {
    pub slot: SlotKind,
    /// Main stat of the equipped artifact, None for an empty slot.
    pub equipped_main: Option<Stat>,
    pub satisfied: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MainStatsSatisfaction {
    pub satisfied: bool,
    pub checks: Vec<MainStatCheck>,
}

/// Slots with a non-empty whitelist must carry an artifact whose main stat
/// is whitelisted. Slots without a whitelist are never checked; empty slots
/// follow `policy`. Checks come out in canonical slot order.
pub fn main_stats_satisfaction(build: &Build, policy: EmptySlotPolicy) -> MainStatsSatisfaction {
    let mut checks = Vec::new();
    for slot in SlotKind::ALL {
        let Some(allowed) = build.desired_main_stats.get(&slot) else {
            continue;
        };
        if allowed.is_empty() {
            continue;
        }
        match build.equipped.get(&slot) {
            Some(artifact) => checks.push(MainStatCheck {
                slot,
                equipped_main: Some(artifact.main_stat),
                satisfied: allowed.contains(&artifact.main_stat),
            }),
            None => {
                if policy == EmptySlotPolicy::Fail {
                    checks.push(MainStatCheck {
                        slot,
                        equipped_main: None,
                        satisfied: false,
                    });
                }
            }
        }
    }
    MainStatsSatisfaction {
        satisfied: checks.iter().all(|check| check.satisfied),
        checks,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SetBonusCheck {
    pub set_id: String,
    pub required: usize,
    pub equipped: usize,
    pub satisfied: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SetBonusSatisfaction {
    pub satisfied: bool,
    pub checks: Vec<SetBonusCheck>,
}

/// Each desired (set, count) needs at least `count` equipped pieces from
/// that set.
pub fn set_bonus_satisfaction(build: &Build) -> SetBonusSatisfaction {
    let checks: Vec<SetBonusCheck> = build
        .desired_set_bonuses
        .iter()
        .map(|bonus| {
            let equipped = build
                .equipped
                .values()
                .filter(|artifact| artifact.set_id == bonus.set_id)
                .count();
            SetBonusCheck {
                set_id: bonus.set_id.clone(),
                required: bonus.piece_count,
                equipped,
                satisfied: equipped >= bonus.piece_count,
            }
        })
        .collect();
    SetBonusSatisfaction {
        satisfied: checks.iter().all(|check| check.satisfied),
        checks,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildSatisfaction {
    pub satisfied: bool,
    pub target_stats: TargetStatsSatisfaction,
    pub main_stats: MainStatsSatisfaction,
    pub set_bonuses: SetBonusSatisfaction,
}

/// All three checks against one profile. The profile is passed in rather
/// than recomputed so callers can score simulated equipment states.
pub fn build_satisfaction(
    build: &Build,
    profile: &StatProfile,
    policy: EmptySlotPolicy,
) -> BuildSatisfaction {
    let target_stats = target_stats_satisfaction(profile, &build.desired_stats);
    let main_stats = main_stats_satisfaction(build, policy);
    let set_bonuses = set_bonus_satisfaction(build);
    BuildSatisfaction {
        satisfied: target_stats.satisfied && main_stats.satisfied && set_bonuses.satisfied,
        target_stats,
        main_stats,
        set_bonuses,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::artifact::Artifact;
    use crate::data::build::DesiredSetBonus;
    use crate::data::stats::Rarity;

    fn equipped(slot: SlotKind, set_id: &str, main_stat: Stat) -> Artifact {
        Artifact {
            id: format!("{}-{set_id}", slot.name()),
            set_id: set_id.to_string(),
            slot,
            rarity: Rarity::FiveStar,
            level: 20,
            locked: false,
            main_stat,
            substats: Vec::new(),
        }
    }

    #[test]
    fn empty_target_list_is_trivially_satisfied() {
        let result = target_stats_satisfaction(&StatProfile::new(), &[]);
        assert!(result.satisfied);
        assert!(result.checks.is_empty());
    }

    #[test]
    fn equal_value_satisfies_the_floor() {
        let mut profile = StatProfile::new();
        profile.add(Stat::CritRate, 30.0);
        let targets = [StatTarget {
            stat: Stat::CritRate,
            minimum: 30.0,
        }];
        assert!(target_stats_satisfaction(&profile, &targets).satisfied);

        let stricter = [StatTarget {
            stat: Stat::CritRate,
            minimum: 30.1,
        }];
        let result = target_stats_satisfaction(&profile, &stricter);
        assert!(!result.satisfied);
        assert_eq!(result.checks.len(), 1);
        assert!(!result.checks[0].satisfied);
    }

    #[test]
    fn main_stat_check_honors_the_whitelist() {
        let mut build = Build::default();
        build
            .desired_main_stats
            .insert(SlotKind::Goblet, vec![Stat::ElementalDamageBonus]);
        build.equipped.insert(
            SlotKind::Goblet,
            equipped(SlotKind::Goblet, "x", Stat::AtkPercent),
        );

        let result = main_stats_satisfaction(&build, EmptySlotPolicy::Ignore);
        assert!(!result.satisfied);
        assert_eq!(result.checks[0].equipped_main, Some(Stat::AtkPercent));
    }

    #[test]
    fn empty_slot_policy_decides_unequipped_whitelisted_slots() {
        let mut build = Build::default();
        build
            .desired_main_stats
            .insert(SlotKind::Circlet, vec![Stat::CritRate]);

        let ignored = main_stats_satisfaction(&build, EmptySlotPolicy::Ignore);
        assert!(ignored.satisfied);
        assert!(ignored.checks.is_empty());

        let failed = main_stats_satisfaction(&build, EmptySlotPolicy::Fail);
        assert!(!failed.satisfied);
        assert_eq!(failed.checks[0].equipped_main, None);
    }

    #[test]
    fn slots_without_whitelist_are_never_checked() {
        let mut build = Build::default();
        build.desired_main_stats.insert(SlotKind::Sands, Vec::new());
        build
            .equipped
            .insert(SlotKind::Sands, equipped(SlotKind::Sands, "x", Stat::HpPercent));
        let result = main_stats_satisfaction(&build, EmptySlotPolicy::Fail);
        assert!(result.satisfied);
        assert!(result.checks.is_empty());
    }

    #[test]
    fn set_bonus_counts_equipped_pieces() {
        let mut build = Build {
            desired_set_bonuses: vec![DesiredSetBonus {
                set_id: "emblem".to_string(),
                piece_count: 2,
            }],
            ..Build::default()
        };
        build
            .equipped
            .insert(SlotKind::Flower, equipped(SlotKind::Flower, "emblem", Stat::HpFlat));
        let short = set_bonus_satisfaction(&build);
        assert!(!short.satisfied);
        assert_eq!(short.checks[0].equipped, 1);

        build
            .equipped
            .insert(SlotKind::Plume, equipped(SlotKind::Plume, "emblem", Stat::AtkFlat));
        assert!(set_bonus_satisfaction(&build).satisfied);
    }

    #[test]
    fn overall_satisfaction_is_the_conjunction() {
        let mut build = Build {
            desired_stats: vec![StatTarget {
                stat: Stat::CritDamage,
                minimum: 10.0,
            }],
            desired_set_bonuses: vec![DesiredSetBonus {
                set_id: "emblem".to_string(),
                piece_count: 1,
            }],
            ..Build::default()
        };
        build
            .equipped
            .insert(SlotKind::Flower, equipped(SlotKind::Flower, "emblem", Stat::HpFlat));

        let mut profile = StatProfile::new();
        profile.add(Stat::CritDamage, 10.0);
        let result = build_satisfaction(&build, &profile, EmptySlotPolicy::Ignore);
        assert!(result.satisfied);

        let empty = StatProfile::new();
        let result = build_satisfaction(&build, &empty, EmptySlotPolicy::Ignore);
        assert!(!result.satisfied);
        assert!(!result.target_stats.satisfied);
        assert!(result.set_bonuses.satisfied);
    }
}
