//! Stat, slot, and rarity catalogs. These identifiers are fixed by game
//! data; the engine never invents or validates new ones.

use serde::{Deserialize, Serialize};

/// One entry of the stat catalog. Main stats and substats draw from the same
/// catalog; the odds tables decide which stats are legal where.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Stat {
    HpFlat,
    HpPercent,
    AtkFlat,
    AtkPercent,
    DefFlat,
    DefPercent,
    ElementalMastery,
    EnergyRecharge,
    CritRate,
    CritDamage,
    HealingBonus,
    PhysicalDamageBonus,
    ElementalDamageBonus,
}

impl Stat {
    pub const fn name(self) -> &'static str {
        match self {
            Self::HpFlat => "hp_flat",
            Self::HpPercent => "hp_percent",
            Self::AtkFlat => "atk_flat",
            Self::AtkPercent => "atk_percent",
            Self::DefFlat => "def_flat",
            Self::DefPercent => "def_percent",
            Self::ElementalMastery => "elemental_mastery",
            Self::EnergyRecharge => "energy_recharge",
            Self::CritRate => "crit_rate",
            Self::CritDamage => "crit_damage",
            Self::HealingBonus => "healing_bonus",
            Self::PhysicalDamageBonus => "physical_damage_bonus",
            Self::ElementalDamageBonus => "elemental_damage_bonus",
        }
    }
}

/// The five equipment slots. `ALL` fixes the canonical ordering used by
/// combination enumeration and every deterministic per-slot walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SlotKind {
    Flower,
    Plume,
    Sands,
    Goblet,
    Circlet,
}

impl SlotKind {
    pub const COUNT: usize = 5;

    pub const ALL: [SlotKind; Self::COUNT] = [
        Self::Flower,
        Self::Plume,
        Self::Sands,
        Self::Goblet,
        Self::Circlet,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Flower => "flower",
            Self::Plume => "plume",
            Self::Sands => "sands",
            Self::Goblet => "goblet",
            Self::Circlet => "circlet",
        }
    }
}

/// Base odds that a single drop occupies any one given slot (one in five).
pub const SLOT_DROP_ODDS: f64 = 1.0 / 5.0;

/// Rarity tier. Max level, roll values, and the initial substat-count
/// distribution all key off this through the odds tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rarity {
    OneStar,
    TwoStar,
    ThreeStar,
    FourStar,
    FiveStar,
}

impl Rarity {
    pub const ALL: [Rarity; 5] = [
        Self::OneStar,
        Self::TwoStar,
        Self::ThreeStar,
        Self::FourStar,
        Self::FiveStar,
    ];

    pub const fn stars(self) -> u8 {
        match self {
            Self::OneStar => 1,
            Self::TwoStar => 2,
            Self::ThreeStar => 3,
            Self::FourStar => 4,
            Self::FiveStar => 5,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::OneStar => "one_star",
            Self::TwoStar => "two_star",
            Self::ThreeStar => "three_star",
            Self::FourStar => "four_star",
            Self::FiveStar => "five_star",
        }
    }
}
