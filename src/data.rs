use crate::errors::{DataError, DataResult};
use crate::moves::MoveBook;
use crate::species::SpeciesBook;
use crate::type_chart::TypeChart;
use schema::{MoveDefinition, SpeciesDefinition};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

const BUILTIN_SPECIES: &str = include_str!("../data/species.ron");
const BUILTIN_MOVES: &str = include_str!("../data/moves.ron");
const BUILTIN_TYPE_CHART: &str = include_str!("../data/type_chart.ron");

/// The read-only tables every battle draws from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameData {
    pub species: SpeciesBook,
    pub moves: MoveBook,
    pub type_chart: TypeChart,
}

impl GameData {
    /// The tables shipped inside the binary.
    pub fn builtin() -> DataResult<Self> {
        let species: HashMap<String, SpeciesDefinition> =
            parse_ron("builtin species.ron", BUILTIN_SPECIES)?;
        let moves: HashMap<String, MoveDefinition> = parse_ron("builtin moves.ron", BUILTIN_MOVES)?;
        let type_chart: TypeChart = parse_ron("builtin type_chart.ron", BUILTIN_TYPE_CHART)?;

        Ok(Self {
            species: SpeciesBook::new(species),
            moves: MoveBook::new(moves),
            type_chart,
        })
    }

    /// Load `species` and `moves` tables (`.ron`, or the original `.json` shape)
    /// from `dir`. `type_chart.ron` is optional; the built-in chart is used without it.
    pub fn load(dir: impl AsRef<Path>) -> DataResult<Self> {
        let dir = dir.as_ref();

        let species: HashMap<String, SpeciesDefinition> = load_table(dir, "species")?;
        let moves: HashMap<String, MoveDefinition> = load_table(dir, "moves")?;

        let chart_path = dir.join("type_chart.ron");
        let type_chart = if chart_path.exists() {
            parse_ron(&chart_path.display().to_string(), &read(&chart_path)?)?
        } else {
            TypeChart::default()
        };

        info!(
            dir = %dir.display(),
            species = species.len(),
            moves = moves.len(),
            "game data loaded"
        );

        Ok(Self {
            species: SpeciesBook::new(species),
            moves: MoveBook::new(moves),
            type_chart,
        })
    }
}

fn load_table<T: DeserializeOwned>(dir: &Path, stem: &str) -> DataResult<T> {
    let ron_path = dir.join(format!("{}.ron", stem));
    if ron_path.exists() {
        return parse_ron(&ron_path.display().to_string(), &read(&ron_path)?);
    }

    let json_path = dir.join(format!("{}.json", stem));
    parse_json(&json_path.display().to_string(), &read(&json_path)?)
}

fn read(path: &Path) -> DataResult<String> {
    std::fs::read_to_string(path).map_err(|err| DataError::Io {
        path: path.display().to_string(),
        details: err.to_string(),
    })
}

fn parse_ron<T: DeserializeOwned>(source: &str, text: &str) -> DataResult<T> {
    ron::from_str(text).map_err(|err| DataError::MalformedData {
        source: source.to_string(),
        details: err.to_string(),
    })
}

fn parse_json<T: DeserializeOwned>(source: &str, text: &str) -> DataResult<T> {
    serde_json::from_str(text).map_err(|err| DataError::MalformedData {
        source: source.to_string(),
        details: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::species::STARTERS;
    use pretty_assertions::assert_eq;
    use schema::Element;
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("pokemon-encounter-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_builtin_tables_parse() {
        let data = GameData::builtin().unwrap();

        assert_eq!(data.species.len(), 8);
        assert_eq!(data.moves.len(), 12);
        assert_eq!(data.type_chart, TypeChart::default());
        for starter in STARTERS {
            assert!(data.species.contains(starter), "{} missing", starter);
        }
    }

    #[test]
    fn test_every_builtin_starter_move_exists() {
        let data = GameData::builtin().unwrap();
        for name in data.species.names() {
            let definition = data.species.get(&name).unwrap();
            for move_name in &definition.starter_moves {
                assert!(data.moves.get(move_name).is_some(), "{} knows unknown {}", name, move_name);
            }
        }
    }

    #[test]
    fn test_load_accepts_original_json_shape() {
        let dir = scratch_dir("json");
        std::fs::write(
            dir.join("species.json"),
            r#"{"Pikachu": {"baseHealth": 35, "baseAttack": 55, "baseDefense": 40,
                "baseSpeed": 90, "baseExperience": 112, "type": "Electric",
                "starterMoves": ["Thunder Shock"]}}"#,
        )
        .unwrap();
        std::fs::write(
            dir.join("moves.json"),
            r#"{"Thunder Shock": {"type": "Electric", "basePower": 40}}"#,
        )
        .unwrap();

        let data = GameData::load(&dir).unwrap();
        let pikachu = data.species.get("Pikachu").unwrap();
        assert_eq!(pikachu.base_speed, 90);
        assert_eq!(pikachu.element, Element::Electric);
        assert_eq!(data.moves.resolve("Thunder Shock").base_power(), 40);
        assert_eq!(data.type_chart, TypeChart::default());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_and_malformed_tables() {
        let dir = scratch_dir("broken");
        assert!(matches!(GameData::load(&dir), Err(DataError::Io { .. })));

        std::fs::write(dir.join("species.ron"), "{ \"Pidgey\": (base_health: ) }").unwrap();
        assert!(matches!(
            GameData::load(&dir),
            Err(DataError::MalformedData { .. })
        ));

        std::fs::remove_dir_all(&dir).ok();
    }
}
