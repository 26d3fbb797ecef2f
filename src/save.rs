use crate::combatant::stats::BaseStats;
use crate::combatant::{Combatant, MAX_MOVES};
use crate::equipment::{Equipment, Inventory, Loadout};
use crate::errors::{SaveError, SaveResult};
use crate::moves::{Move, MoveBook};
use schema::{Direction, Element, SpeciesDefinition};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Where a new game puts the player on the starting map.
pub const START_POSITION: Position = Position { x: 7, y: 5 };

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

/// The player's persisted key-value record.
///
/// Only sources are stored: derived stats are rebuilt from base stats, level
/// and equipment on restore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSave {
    pub position: Position,
    #[serde(default)]
    pub inventory: Vec<Equipment>,
    #[serde(default)]
    pub direction: Direction,
    pub level: u8,
    pub name: String,
    pub base_health: u16,
    pub base_attack: u16,
    pub base_defense: u16,
    pub base_speed: u16,
    pub base_experience: u16,
    #[serde(default)]
    pub weapon: Option<Equipment>,
    #[serde(default)]
    pub armor: Option<Equipment>,
    #[serde(default, alias = "type")]
    pub element: Element,
    #[serde(default)]
    pub moves: Vec<String>,
    #[serde(default)]
    pub experience: Option<u32>,
}

impl PlayerSave {
    /// A fresh save for a starter species at `level`.
    pub fn new_game(name: impl Into<String>, species: &SpeciesDefinition, level: u8) -> Self {
        Self {
            position: START_POSITION,
            inventory: Vec::new(),
            direction: Direction::default(),
            level: level.max(1),
            name: name.into(),
            base_health: species.base_health,
            base_attack: species.base_attack,
            base_defense: species.base_defense,
            base_speed: species.base_speed,
            base_experience: species.base_experience,
            weapon: None,
            armor: None,
            element: species.element,
            moves: species.starter_moves.iter().take(MAX_MOVES).cloned().collect(),
            experience: None,
        }
    }

    pub fn base_stats(&self) -> BaseStats {
        BaseStats::new(
            self.base_health,
            self.base_attack,
            self.base_defense,
            self.base_speed,
            self.base_experience,
        )
    }

    /// Rebuild the player combatant. Health starts full; experience sits at the
    /// level floor unless a total was saved.
    pub fn restore(&self, moves: &MoveBook) -> Combatant {
        let loadout = Loadout::new(self.weapon.clone(), self.armor.clone());
        let mut player = Combatant::player(
            self.name.clone(),
            self.element,
            self.level,
            self.base_stats(),
            moves.resolve_all(&self.moves, MAX_MOVES),
            loadout,
        );

        if let Some(experience) = self.experience {
            player.restore_experience(experience);
        }
        player
    }

    pub fn inventory(&self) -> Inventory {
        Inventory::from_items(self.inventory.iter().cloned())
    }

    /// Snapshot a player combatant and its surroundings.
    pub fn capture(
        player: &Combatant,
        position: Position,
        direction: Direction,
        inventory: &Inventory,
    ) -> Self {
        let base = player.base_stats();
        let (weapon, armor) = player
            .loadout()
            .map(|loadout| (loadout.weapon.clone(), loadout.armor.clone()))
            .unwrap_or_default();

        Self {
            position,
            inventory: inventory.items(),
            direction,
            level: player.level(),
            name: player.name().to_string(),
            base_health: base.health,
            base_attack: base.attack,
            base_defense: base.defense,
            base_speed: base.speed,
            base_experience: base.experience,
            weapon,
            armor,
            element: player.element(),
            moves: player.moves().iter().map(Move::name).map(str::to_string).collect(),
            experience: Some(player.experience().current()),
        }
    }

    pub fn to_json(&self) -> SaveResult<String> {
        serde_json::to_string_pretty(self).map_err(|err| SaveError::Json(err.to_string()))
    }

    pub fn from_json(json: &str) -> SaveResult<Self> {
        serde_json::from_str(json).map_err(|err| SaveError::Json(err.to_string()))
    }

    pub fn to_bytes(&self) -> SaveResult<Vec<u8>> {
        postcard::to_allocvec(self).map_err(|err| SaveError::Binary(err.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> SaveResult<Self> {
        postcard::from_bytes(bytes).map_err(|err| SaveError::Binary(err.to_string()))
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> SaveResult<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?).map_err(|err| io_error(path, err))?;
        info!(path = %path.display(), name = %self.name, level = self.level, "player saved");
        Ok(())
    }

    /// `Ok(None)` when there is no save yet.
    pub fn read_json(path: impl AsRef<Path>) -> SaveResult<Option<Self>> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(None);
        }
        let json = std::fs::read_to_string(path).map_err(|err| io_error(path, err))?;
        Self::from_json(&json).map(Some)
    }
}

fn io_error(path: &Path, err: std::io::Error) -> SaveError {
    SaveError::Io {
        path: path.display().to_string(),
        details: err.to_string(),
    }
}
