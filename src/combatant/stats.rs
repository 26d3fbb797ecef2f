use crate::battle::rng::TurnRng;
use schema::SpeciesDefinition;
use serde::{Deserialize, Serialize};

pub const MAX_INDIVIDUAL_VALUE: u8 = 31;

/// Fixed per-species (or per-character) numbers before any scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BaseStats {
    pub health: u16,
    pub attack: u16,
    pub defense: u16,
    pub speed: u16,
    pub experience: u16,
}

impl BaseStats {
    pub fn new(health: u16, attack: u16, defense: u16, speed: u16, experience: u16) -> Self {
        Self {
            health,
            attack,
            defense,
            speed,
            experience,
        }
    }
}

impl From<&SpeciesDefinition> for BaseStats {
    fn from(definition: &SpeciesDefinition) -> Self {
        Self::new(
            definition.base_health,
            definition.base_attack,
            definition.base_defense,
            definition.base_speed,
            definition.base_experience,
        )
    }
}

/// Per-instance bonuses in `0..=31`, rolled once when a wild combatant is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IndividualValues {
    pub health: u8,
    pub attack: u8,
    pub defense: u8,
    pub speed: u8,
}

impl IndividualValues {
    /// Values above 31 are clamped.
    pub fn new(health: u8, attack: u8, defense: u8, speed: u8) -> Self {
        Self {
            health: health.min(MAX_INDIVIDUAL_VALUE),
            attack: attack.min(MAX_INDIVIDUAL_VALUE),
            defense: defense.min(MAX_INDIVIDUAL_VALUE),
            speed: speed.min(MAX_INDIVIDUAL_VALUE),
        }
    }

    pub fn roll(rng: &mut TurnRng) -> Self {
        Self::new(
            rng.roll_individual_value("health IV"),
            rng.roll_individual_value("attack IV"),
            rng.roll_individual_value("defense IV"),
            rng.roll_individual_value("speed IV"),
        )
    }
}

/// Stats derived from base + level (+ IVs) (+ equipment). Never stored apart from their sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DerivedStats {
    pub max_health: u16,
    pub attack: u16,
    pub defense: u16,
    pub speed: u16,
}

/// Flat additions applied after the level formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatBonus {
    pub attack: u16,
    pub defense: u16,
}

/// `floor((2 * base + iv) * level / 100) + level + 10`
pub fn max_health(base: u16, iv: u8, level: u8) -> u16 {
    let scaled = scaled_stat(base, iv, level);
    clamp_to_stat(scaled + level as u32 + 10)
}

/// `floor((2 * base + iv) * level / 100) + 5`
pub fn other_stat(base: u16, iv: u8, level: u8) -> u16 {
    clamp_to_stat(scaled_stat(base, iv, level) + 5)
}

fn scaled_stat(base: u16, iv: u8, level: u8) -> u32 {
    (2 * base as u32 + iv as u32) * level as u32 / 100
}

fn clamp_to_stat(value: u32) -> u16 {
    value.min(u16::MAX as u32) as u16
}

pub fn calculate_stats(
    base: &BaseStats,
    ivs: &IndividualValues,
    level: u8,
    bonus: StatBonus,
) -> DerivedStats {
    DerivedStats {
        max_health: max_health(base.health, ivs.health, level),
        attack: other_stat(base.attack, ivs.attack, level).saturating_add(bonus.attack),
        defense: other_stat(base.defense, ivs.defense, level).saturating_add(bonus.defense),
        speed: other_stat(base.speed, ivs.speed, level),
    }
}
