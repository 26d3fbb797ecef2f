use crate::battle::rng::TurnRng;
use crate::combatant::stats::BaseStats;
use crate::combatant::{Combatant, MAX_MOVES};
use crate::errors::{DataError, DataResult};
use crate::moves::MoveBook;
use schema::SpeciesDefinition;
use std::collections::HashMap;
use tracing::debug;

/// Species a new game can start with.
pub const STARTERS: [&str; 3] = ["Bulbasaur", "Charmander", "Squirtle"];

/// Read-only species table, keyed by species name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpeciesBook {
    definitions: HashMap<String, SpeciesDefinition>,
}

impl SpeciesBook {
    pub fn new(definitions: HashMap<String, SpeciesDefinition>) -> Self {
        Self { definitions }
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    pub fn get(&self, name: &str) -> DataResult<&SpeciesDefinition> {
        self.definitions
            .get(name)
            .ok_or_else(|| DataError::SpeciesNotFound(name.to_string()))
    }

    /// Every species name, sorted so random picks are reproducible under a seed.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.definitions.keys().cloned().collect();
        names.sort();
        names
    }

    /// A wild combatant at full health with freshly rolled IVs and its starter moves.
    pub fn create_wild(
        &self,
        name: &str,
        level: u8,
        moves: &MoveBook,
        rng: &mut TurnRng,
    ) -> DataResult<Combatant> {
        let definition = self.get(name)?;
        let starter_moves = moves.resolve_all(&definition.starter_moves, MAX_MOVES);

        let wild = Combatant::wild(
            name,
            definition.element,
            level,
            BaseStats::from(definition),
            starter_moves,
            rng,
        );
        debug!(species = name, level, ivs = ?wild.individual_values(), "wild combatant created");
        Ok(wild)
    }

    /// Pick one of the starters that this table actually defines.
    pub fn pick_starter(&self, rng: &mut TurnRng) -> DataResult<&str> {
        let available: Vec<&str> = STARTERS
            .iter()
            .copied()
            .filter(|name| self.contains(name))
            .collect();

        if available.is_empty() {
            return Err(DataError::EmptySpeciesPool);
        }
        let index = rng.pick_index(available.len(), "starter");
        Ok(available[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combatant::stats::IndividualValues;
    use pretty_assertions::assert_eq;
    use schema::{Element, MoveDefinition};

    fn books() -> (SpeciesBook, MoveBook) {
        let mut species = HashMap::new();
        species.insert(
            "Bulbasaur".to_string(),
            SpeciesDefinition {
                base_health: 45,
                base_attack: 49,
                base_defense: 49,
                base_speed: 45,
                base_experience: 64,
                element: Element::Grass,
                starter_moves: vec!["Tackle".to_string(), "Vine Whip".to_string(), "Solar Beam".to_string()],
            },
        );

        let mut moves = HashMap::new();
        moves.insert(
            "Tackle".to_string(),
            MoveDefinition {
                element: Element::Normal,
                base_power: 40,
            },
        );
        moves.insert(
            "Vine Whip".to_string(),
            MoveDefinition {
                element: Element::Grass,
                base_power: 45,
            },
        );

        (SpeciesBook::new(species), MoveBook::new(moves))
    }

    #[test]
    fn test_create_wild_rolls_ivs_and_resolves_moves() {
        let (species, moves) = books();
        let mut rng = TurnRng::new_for_test(vec![10, 20, 31, 40]);

        let bulbasaur = species.create_wild("Bulbasaur", 5, &moves, &mut rng).unwrap();

        assert_eq!(bulbasaur.individual_values(), IndividualValues::new(10, 20, 31, 8));
        assert_eq!(bulbasaur.current_health(), bulbasaur.max_health());
        assert_eq!(bulbasaur.element(), Element::Grass);

        let names: Vec<&str> = bulbasaur.moves().iter().map(|m| m.name()).collect();
        assert_eq!(names, vec!["Tackle", "Vine Whip", "Tackle"]);
    }

    #[test]
    fn test_unknown_species_is_an_error() {
        let (species, moves) = books();
        let mut rng = TurnRng::new_for_test(vec![]);

        assert_eq!(
            species.create_wild("Mew", 5, &moves, &mut rng),
            Err(DataError::SpeciesNotFound("Mew".to_string()))
        );
    }

    #[test]
    fn test_pick_starter_only_offers_defined_species() {
        let (species, _) = books();
        let mut rng = TurnRng::new_for_test(vec![99]);
        assert_eq!(species.pick_starter(&mut rng), Ok("Bulbasaur"));

        let empty = SpeciesBook::default();
        assert_eq!(empty.pick_starter(&mut rng), Err(DataError::EmptySpeciesPool));
    }
}
