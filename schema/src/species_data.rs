use crate::Element;
use serde::{Deserialize, Serialize};

/// A move table entry: `"Ember": (element: Fire, base_power: 40)`.
///
/// The original game's JSON spelling (`type`, `basePower`) is accepted too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveDefinition {
    #[serde(alias = "type")]
    pub element: Element,
    #[serde(alias = "basePower")]
    pub base_power: u16,
}

/// A species table entry. Base stats are fixed per species; everything a
/// battle needs beyond them is derived at creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesDefinition {
    #[serde(alias = "baseHealth")]
    pub base_health: u16,
    #[serde(alias = "baseAttack")]
    pub base_attack: u16,
    #[serde(alias = "baseDefense")]
    pub base_defense: u16,
    #[serde(alias = "baseSpeed")]
    pub base_speed: u16,
    #[serde(alias = "baseExperience")]
    pub base_experience: u16,
    #[serde(alias = "type")]
    pub element: Element,
    #[serde(default, alias = "starterMoves")]
    pub starter_moves: Vec<String>,
}
