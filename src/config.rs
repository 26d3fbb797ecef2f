use crate::errors::{ConfigError, ConfigResult};
use crate::experience::DEFAULT_MAX_LEVEL;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub data_dir: PathBuf,
    pub save_path: PathBuf,
    /// Fixed seed for a reproducible session. OS-random when absent.
    pub seed: Option<u64>,
    pub tick_ms: u64,
    pub encounter: EncounterConfig,
    pub battle: BattleRules,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct EncounterConfig {
    /// Probability of an encounter per step on tall grass.
    pub chance: f64,
    pub min_level: u8,
    pub max_level: u8,
    /// Species names wild opponents are drawn from. Empty means every loaded species.
    pub species: Vec<String>,
}

/// Tunables the battle controller reads.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct BattleRules {
    pub mercy_threshold: u8,
    pub mercy_per_act: u8,
    pub max_level: u8,
    pub low_health_threshold: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            data_dir: PathBuf::from("data"),
            save_path: PathBuf::from("save.json"),
            seed: None,
            tick_ms: 16,
            encounter: EncounterConfig::default(),
            battle: BattleRules::default(),
        }
    }
}

impl Default for EncounterConfig {
    fn default() -> Self {
        EncounterConfig {
            chance: 0.075,
            min_level: 2,
            max_level: 5,
            species: Vec::new(),
        }
    }
}

impl Default for BattleRules {
    fn default() -> Self {
        BattleRules {
            mercy_threshold: 100,
            mercy_per_act: 25,
            max_level: DEFAULT_MAX_LEVEL,
            low_health_threshold: 0.25,
        }
    }
}

impl GameConfig {
    /// Parse a RON config. Missing fields take their defaults.
    pub fn from_ron_str(source: &str) -> ConfigResult<Self> {
        let config: GameConfig =
            ron::from_str(source).map_err(|err| ConfigError::Malformed(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|err| ConfigError::Io {
            path: path.display().to_string(),
            details: err.to_string(),
        })?;
        Self::from_ron_str(&source)
    }

    /// Defaults, then `ENCOUNTER_CONFIG` (a RON file) if set, then single-value overrides.
    pub fn from_env() -> ConfigResult<Self> {
        // Load .env file if available
        dotenv::dotenv().ok();

        let mut config = match env::var("ENCOUNTER_CONFIG") {
            Ok(path) => Self::from_file(path)?,
            Err(_) => GameConfig::default(),
        };

        if let Ok(data_dir) = env::var("ENCOUNTER_DATA_DIR") {
            config.data_dir = PathBuf::from(data_dir);
        }

        if let Ok(save_path) = env::var("ENCOUNTER_SAVE_PATH") {
            config.save_path = PathBuf::from(save_path);
        }

        if let Ok(seed) = env::var("ENCOUNTER_SEED") {
            if let Ok(seed) = seed.parse::<u64>() {
                config.seed = Some(seed);
            }
        }

        if let Ok(tick_ms) = env::var("ENCOUNTER_TICK_MS") {
            if let Ok(tick_ms) = tick_ms.parse::<u64>() {
                config.tick_ms = tick_ms;
            }
        }

        config.validate()?;
        info!("Configuration loaded: {:?}", config);
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        let encounter = &self.encounter;
        if !(0.0..=1.0).contains(&encounter.chance) {
            return Err(invalid("encounter.chance", format!("{} is not in [0, 1]", encounter.chance)));
        }
        if encounter.min_level == 0 {
            return Err(invalid("encounter.min_level", "must be at least 1".to_string()));
        }
        if encounter.min_level > encounter.max_level {
            return Err(invalid(
                "encounter.max_level",
                format!("{} is below min_level {}", encounter.max_level, encounter.min_level),
            ));
        }

        let battle = &self.battle;
        if battle.mercy_threshold == 0 {
            return Err(invalid("battle.mercy_threshold", "must be positive".to_string()));
        }
        if battle.max_level == 0 {
            return Err(invalid("battle.max_level", "must be positive".to_string()));
        }
        if !(0.0..=1.0).contains(&battle.low_health_threshold) {
            return Err(invalid(
                "battle.low_health_threshold",
                format!("{} is not in [0, 1]", battle.low_health_threshold),
            ));
        }
        if self.tick_ms == 0 {
            return Err(invalid("tick_ms", "must be positive".to_string()));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, details: String) -> ConfigError {
    ConfigError::InvalidValue { field, details }
}
