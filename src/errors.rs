use crate::battle::state::RoundPhase;
use schema::EquipmentKind;
use std::fmt;

/// Main error type for the Pokemon Encounter battle core
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BattleEngineError {
    /// Error related to species/move/type-chart tables
    Data(DataError),
    /// Error related to loading or validating configuration
    Config(ConfigError),
    /// Error related to encoding or decoding a player save
    Save(SaveError),
    /// Error related to invalid battle or equipment actions
    Action(ActionError),
}

/// Errors related to data table operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    /// A data file could not be read
    Io { path: String, details: String },
    /// A data file (or embedded table) is malformed
    MalformedData { source: String, details: String },
    /// The requested species is not in the species table
    SpeciesNotFound(String),
    /// An encounter pool resolved to zero species
    EmptySpeciesPool,
}

/// Errors related to configuration loading
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The config file could not be read
    Io { path: String, details: String },
    /// The config file is not valid RON
    Malformed(String),
    /// A config value is outside its allowed range
    InvalidValue { field: &'static str, details: String },
}

/// Errors related to player save blobs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveError {
    /// The save file could not be read or written
    Io { path: String, details: String },
    /// JSON save could not be encoded or decoded
    Json(String),
    /// Binary save could not be encoded or decoded
    Binary(String),
}

/// Errors related to actions issued against a battle or a combatant
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// Move index is out of bounds for a non-empty move list
    InvalidMoveIndex(usize),
    /// The controller is mid-round and cannot accept a new action
    NotAcceptingActions(RoundPhase),
    /// The battle already reached a terminal outcome
    BattleOver,
    /// Only player combatants carry equipment
    EquipmentNotSupported(String),
    /// Key items and plain items cannot be equipped
    NotEquippable { item: String, kind: EquipmentKind },
}

impl fmt::Display for BattleEngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattleEngineError::Data(err) => write!(f, "Data error: {}", err),
            BattleEngineError::Config(err) => write!(f, "Config error: {}", err),
            BattleEngineError::Save(err) => write!(f, "Save error: {}", err),
            BattleEngineError::Action(err) => write!(f, "Action error: {}", err),
        }
    }
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataError::Io { path, details } => write!(f, "Cannot read {}: {}", path, details),
            DataError::MalformedData { source, details } => {
                write!(f, "Malformed data in {}: {}", source, details)
            }
            DataError::SpeciesNotFound(name) => write!(f, "Species not found: {}", name),
            DataError::EmptySpeciesPool => write!(f, "Encounter species pool is empty"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, details } => write!(f, "Cannot read {}: {}", path, details),
            ConfigError::Malformed(details) => write!(f, "Malformed config: {}", details),
            ConfigError::InvalidValue { field, details } => {
                write!(f, "Invalid value for {}: {}", field, details)
            }
        }
    }
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveError::Io { path, details } => write!(f, "Cannot access {}: {}", path, details),
            SaveError::Json(details) => write!(f, "JSON save: {}", details),
            SaveError::Binary(details) => write!(f, "Binary save: {}", details),
        }
    }
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::InvalidMoveIndex(index) => write!(f, "Invalid move index: {}", index),
            ActionError::NotAcceptingActions(phase) => {
                write!(f, "Cannot act while the round is in {:?}", phase)
            }
            ActionError::BattleOver => write!(f, "The battle has already ended"),
            ActionError::EquipmentNotSupported(name) => {
                write!(f, "{} cannot carry equipment", name)
            }
            ActionError::NotEquippable { item, kind } => {
                write!(f, "{} is a {} and cannot be equipped", item, kind)
            }
        }
    }
}

impl std::error::Error for BattleEngineError {}
impl std::error::Error for DataError {}
impl std::error::Error for ConfigError {}
impl std::error::Error for SaveError {}
impl std::error::Error for ActionError {}

impl From<DataError> for BattleEngineError {
    fn from(err: DataError) -> Self {
        BattleEngineError::Data(err)
    }
}

impl From<ConfigError> for BattleEngineError {
    fn from(err: ConfigError) -> Self {
        BattleEngineError::Config(err)
    }
}

impl From<SaveError> for BattleEngineError {
    fn from(err: SaveError) -> Self {
        BattleEngineError::Save(err)
    }
}

impl From<ActionError> for BattleEngineError {
    fn from(err: ActionError) -> Self {
        BattleEngineError::Action(err)
    }
}

/// Type alias for Results using BattleEngineError
pub type BattleResult<T> = Result<T, BattleEngineError>;

/// Type alias for Results using DataError
pub type DataResult<T> = Result<T, DataError>;

/// Type alias for Results using ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Type alias for Results using SaveError
pub type SaveResult<T> = Result<T, SaveError>;

/// Type alias for Results using ActionError
pub type ActionResult<T> = Result<T, ActionError>;
