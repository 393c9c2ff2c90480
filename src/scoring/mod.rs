//! Satisfaction scorers and set-bonus odds.

pub mod satisfaction;
pub mod set_odds;

pub use satisfaction::{
    build_satisfaction, main_stats_satisfaction, set_bonus_satisfaction,
    target_stats_satisfaction, BuildSatisfaction, EmptySlotPolicy, MainStatCheck,
    MainStatsSatisfaction, SetBonusCheck, SetBonusSatisfaction, StatTargetCheck,
    TargetStatsSatisfaction,
};
pub use set_odds::{on_set_odds, slot_combinations, weighted_set_factor};
