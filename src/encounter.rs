use crate::battle::rng::TurnRng;
use crate::combatant::Combatant;
use crate::config::EncounterConfig;
use crate::errors::{DataError, DataResult};
use crate::moves::MoveBook;
use crate::species::SpeciesBook;
use tracing::{info, warn};

/// Random wild encounters on tall grass.
#[derive(Debug, Clone, PartialEq)]
pub struct EncounterTable {
    chance: f64,
    min_level: u8,
    max_level: u8,
    pool: Vec<String>,
}

impl EncounterTable {
    /// Build the spawn pool from config. Configured names the species table
    /// does not know are dropped with a warning; an empty list means every species.
    pub fn new(config: &EncounterConfig, species: &SpeciesBook) -> DataResult<Self> {
        let pool: Vec<String> = if config.species.is_empty() {
            species.names()
        } else {
            config
                .species
                .iter()
                .filter(|name| {
                    let known = species.contains(name);
                    if !known {
                        warn!(species = %name, "unknown species in encounter pool, skipping");
                    }
                    known
                })
                .cloned()
                .collect()
        };

        if pool.is_empty() {
            return Err(DataError::EmptySpeciesPool);
        }

        Ok(Self {
            chance: config.chance,
            min_level: config.min_level.min(config.max_level),
            max_level: config.max_level.max(config.min_level),
            pool,
        })
    }

    pub fn pool(&self) -> &[String] {
        &self.pool
    }

    pub fn level_range(&self) -> (u8, u8) {
        (self.min_level, self.max_level)
    }

    /// Roll once for a step on tall grass.
    pub fn check_for_encounter(&self, rng: &mut TurnRng) -> bool {
        rng.chance(self.chance, "encounter check")
    }

    /// A wild opponent: uniform species from the pool, uniform level in range.
    pub fn spawn(
        &self,
        species: &SpeciesBook,
        moves: &MoveBook,
        rng: &mut TurnRng,
    ) -> DataResult<Combatant> {
        let index = rng.pick_index(self.pool.len(), "encounter species");
        let name = &self.pool[index];
        let level = rng.roll_between(self.min_level, self.max_level, "encounter level");

        let wild = species.create_wild(name, level, moves, rng)?;
        info!(species = %name, level, "wild encounter");
        Ok(wild)
    }
}
