// In: src/lib.rs

//! Pokemon Encounter Battle Core
//!
//! Turn-based battles between the player's combatant and wild opponents:
//! stat derivation, type effectiveness, damage, turn order, a steppable
//! round state machine, experience and level-ups, plus the data tables,
//! random encounters and player saves around them.

// --- MODULE DECLARATIONS ---
pub mod battle;
pub mod combatant;
pub mod config;
pub mod data;
pub mod encounter;
pub mod equipment;
pub mod errors;
pub mod experience;
pub mod moves;
pub mod save;
pub mod species;
pub mod type_chart;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
pub use schema::{Direction, Element, EquipmentKind, MoveDefinition, SpeciesDefinition};

// --- From this crate's modules (`src/`) ---

// Battle engine.
pub use battle::controller::{BattleTurnController, RoundReport};
pub use battle::damage::{calculate_damage, resolve_attack, DamageOutcome};
pub use battle::rng::TurnRng;
pub use battle::state::{
    BattleEvent, BattleOutcome, EventBus, RoundOutcome, RoundPhase, Side,
};
pub use battle::turn_order::determine_order;

// Combatants and their models.
pub use combatant::stats::{BaseStats, DerivedStats, IndividualValues};
pub use combatant::{Combatant, CombatantKind, LevelUp};
pub use equipment::{Equipment, Inventory, Loadout};
pub use experience::{experience_for_level, experience_to_award, ExperienceTrack};
pub use moves::{Move, MoveBook};
pub use type_chart::{Effectiveness, TypeChart};

// Data, config and persistence.
pub use config::{BattleRules, EncounterConfig, GameConfig};
pub use data::GameData;
pub use encounter::EncounterTable;
pub use save::{PlayerSave, Position};
pub use species::SpeciesBook;

// Crate-specific error and result types.
pub use errors::{
    ActionError, ActionResult, BattleEngineError, BattleResult, ConfigError, ConfigResult,
    DataError, DataResult, SaveError, SaveResult,
};
