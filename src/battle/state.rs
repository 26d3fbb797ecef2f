use crate::combatant::stats::DerivedStats;
use crate::type_chart::Effectiveness;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }
}

/// How a battle ended.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleOutcome {
    Victory,
    Defeat,
    Spared,
}

/// What the caller does after a round: pick the next moves, or leave the battle.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    Continue,
    Victory,
    Defeat,
    Spared,
}

impl From<BattleOutcome> for RoundOutcome {
    fn from(outcome: BattleOutcome) -> Self {
        match outcome {
            BattleOutcome::Victory => RoundOutcome::Victory,
            BattleOutcome::Defeat => RoundOutcome::Defeat,
            BattleOutcome::Spared => RoundOutcome::Spared,
        }
    }
}

/// Named states of one round. Each `step` moves exactly one state forward.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    SelectingMoves,
    ResolvingFirstAttack,
    CheckEndAfterFirst,
    ResolvingSecondAttack,
    CheckEndAfterSecond,
    RoundComplete,
    Finished(BattleOutcome),
}

impl RoundPhase {
    pub fn is_finished(&self) -> bool {
        matches!(self, RoundPhase::Finished(_))
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        match self {
            RoundPhase::Finished(outcome) => Some(*outcome),
            _ => None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum BattleEvent {
    // Battle Start
    WildAppeared {
        opponent: String,
    },
    SentOut {
        name: String,
    },

    // Round Management
    RoundStarted {
        round: u32,
    },
    RoundEnded,

    // Attacks
    MoveUsed {
        side: Side,
        attacker: String,
        move_name: String,
    },
    DamageDealt {
        side: Side,
        target: String,
        damage: u16,
        remaining_health: u16,
    },
    HealthBarTarget {
        side: Side,
        health: u16,
        max_health: u16,
    },
    AttackEffectiveness {
        effectiveness: Effectiveness,
    },
    Fainted {
        side: Side,
        name: String,
    },

    // Battle End
    Victory,
    Defeat {
        name: String,
    },
    ExperienceGained {
        name: String,
        amount: u32,
    },
    ExperienceBarTarget {
        progress: u32,
        span: u32,
    },
    LevelUp {
        name: String,
        level: u8,
    },
    StatsChanged {
        previous: DerivedStats,
        current: DerivedStats,
    },

    // Mercy
    ActedSilly {
        opponent: String,
        mercy_meter: u8,
    },
    Spared {
        opponent: String,
    },
    SpareRefused {
        opponent: String,
    },
}

impl BattleEvent {
    /// Formats the event into a human-readable line.
    /// Returns None for silent events that only drive UI bars.
    pub fn format(&self) -> Option<String> {
        match self {
            BattleEvent::WildAppeared { opponent } => {
                Some(format!("A wild {} appeared!", opponent))
            }
            BattleEvent::SentOut { name } => Some(format!("Go {}!", name)),
            BattleEvent::RoundStarted { round } => Some(format!("=== Round {} ===", round)),
            BattleEvent::RoundEnded => None,

            BattleEvent::MoveUsed {
                attacker, move_name, ..
            } => Some(format!("{} used {}!", attacker, move_name)),
            BattleEvent::DamageDealt { .. } => None,
            BattleEvent::HealthBarTarget { .. } => None,
            BattleEvent::AttackEffectiveness { effectiveness } => match effectiveness {
                Effectiveness::SuperEffective => Some("It's super effective!".to_string()),
                Effectiveness::NotVeryEffective => Some("It's not very effective...".to_string()),
                Effectiveness::Neutral => None,
            },
            BattleEvent::Fainted { name, .. } => Some(format!("{} fainted!", name)),

            BattleEvent::Victory => Some("You won!".to_string()),
            BattleEvent::Defeat { .. } => None, // the faint line already says it
            BattleEvent::ExperienceGained { name, amount } => {
                Some(format!("{} earned {} experience points!", name, amount))
            }
            BattleEvent::ExperienceBarTarget { .. } => None,
            BattleEvent::LevelUp { name, level } => {
                Some(format!("{} grew to LV. {}!", name, level))
            }
            BattleEvent::StatsChanged { previous, current } => Some(format!(
                "Health: {} -> {},  Attack: {} -> {}  Defense: {} -> {},  Speed: {} -> {}",
                previous.max_health,
                current.max_health,
                previous.attack,
                current.attack,
                previous.defense,
                current.defense,
                previous.speed,
                current.speed
            )),

            BattleEvent::ActedSilly { opponent, .. } => {
                Some(format!("You did something silly, {} liked that", opponent))
            }
            BattleEvent::Spared { opponent } => Some(format!("You spared {}!", opponent)),
            BattleEvent::SpareRefused { opponent } => Some(format!("{} growls at you", opponent)),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EventBus {
    events: Vec<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    /// Move every buffered event out, leaving the bus empty.
    pub fn drain(&mut self) -> Vec<BattleEvent> {
        std::mem::take(&mut self.events)
    }

    /// Every non-silent event as narration text, in order.
    pub fn narration(&self) -> Vec<String> {
        self.events.iter().filter_map(BattleEvent::format).collect()
    }

    /// Return true if the event bus contains no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Return the number of events in the bus.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl std::fmt::Display for EventBus {
    /// Format the EventBus for printing. Shows debug format of all events.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for event in &self.events {
            writeln!(f, "  {:?}", event)?;
        }
        Ok(())
    }
}
