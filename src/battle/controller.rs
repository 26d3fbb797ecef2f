use crate::battle::damage::resolve_attack;
use crate::battle::rng::TurnRng;
use crate::battle::state::{
    BattleEvent, BattleOutcome, EventBus, RoundOutcome, RoundPhase, Side,
};
use crate::battle::turn_order::determine_order;
use crate::combatant::Combatant;
use crate::config::BattleRules;
use crate::errors::{ActionError, ActionResult, BattleResult};
use crate::moves::{Move, DEFAULT_MOVE_NAME};
use crate::type_chart::TypeChart;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Everything one synchronous round produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundReport {
    pub events: Vec<BattleEvent>,
    pub outcome: RoundOutcome,
}

/// Runs one player-vs-wild battle, one round at a time.
///
/// A round is a fixed walk through [`RoundPhase`]: both attacks resolve strictly
/// in order and the end check after each attack decides whether the second
/// attacker gets to act at all. Frame-driven callers drive it with
/// [`begin_round`](Self::begin_round) and [`step`](Self::step); everyone else
/// calls [`resolve_round`](Self::resolve_round).
#[derive(Debug, Clone)]
pub struct BattleTurnController {
    player: Combatant,
    opponent: Combatant,
    chart: TypeChart,
    rng: TurnRng,
    rules: BattleRules,
    phase: RoundPhase,
    round: u32,
    order: [Side; 2],
    player_move: Option<Move>,
    opponent_move: Option<Move>,
}

impl BattleTurnController {
    pub fn new(
        player: Combatant,
        opponent: Combatant,
        chart: TypeChart,
        rng: TurnRng,
        rules: BattleRules,
    ) -> Self {
        Self {
            player,
            opponent,
            chart,
            rng,
            rules,
            phase: RoundPhase::SelectingMoves,
            round: 0,
            order: [Side::Player, Side::Opponent],
            player_move: None,
            opponent_move: None,
        }
    }

    pub fn player(&self) -> &Combatant {
        &self.player
    }

    pub fn opponent(&self) -> &Combatant {
        &self.opponent
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    /// Attack order of the current (or last) round.
    pub fn turn_order(&self) -> [Side; 2] {
        self.order
    }

    pub fn rules(&self) -> &BattleRules {
        &self.rules
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        self.phase.outcome()
    }

    /// Hand both combatants back to the exploration layer.
    pub fn into_combatants(self) -> (Combatant, Combatant) {
        (self.player, self.opponent)
    }

    /// Opening lines of the encounter.
    pub fn introduce(&self, bus: &mut EventBus) {
        bus.push(BattleEvent::WildAppeared {
            opponent: self.opponent.name().to_string(),
        });
        bus.push(BattleEvent::SentOut {
            name: self.player.name().to_string(),
        });
    }

    fn ensure_selecting(&self) -> ActionResult<()> {
        match self.phase {
            RoundPhase::SelectingMoves => Ok(()),
            RoundPhase::Finished(_) => Err(ActionError::BattleOver),
            phase => Err(ActionError::NotAcceptingActions(phase)),
        }
    }

    /// Lock in the player's move, pick the opponent's and decide the order.
    ///
    /// Draws from the random source in that order: opponent move (only when it
    /// has moves), then the speed tie-break (only on equal speed).
    pub fn begin_round(&mut self, move_index: usize) -> ActionResult<()> {
        self.ensure_selecting()?;

        let player_move = self.player.move_at(move_index)?;
        let opponent_move = self.opponent.random_move(&mut self.rng);
        self.order = determine_order(&self.player, &self.opponent, &mut self.rng);

        self.player_move = Some(player_move);
        self.opponent_move = Some(opponent_move);
        self.round += 1;
        self.phase = RoundPhase::ResolvingFirstAttack;

        debug!(round = self.round, first = ?self.order[0], "round started");
        Ok(())
    }

    /// Advance exactly one named state and return the new one.
    ///
    /// A no-op while selecting moves or after the battle has finished.
    pub fn step(&mut self, bus: &mut EventBus) -> RoundPhase {
        self.phase = match self.phase {
            RoundPhase::SelectingMoves => RoundPhase::SelectingMoves,
            RoundPhase::ResolvingFirstAttack => {
                bus.push(BattleEvent::RoundStarted { round: self.round });
                self.attack(self.order[0], bus);
                RoundPhase::CheckEndAfterFirst
            }
            RoundPhase::CheckEndAfterFirst => match self.check_end(bus) {
                Some(outcome) => RoundPhase::Finished(outcome),
                None => RoundPhase::ResolvingSecondAttack,
            },
            RoundPhase::ResolvingSecondAttack => {
                self.attack(self.order[1], bus);
                RoundPhase::CheckEndAfterSecond
            }
            RoundPhase::CheckEndAfterSecond => match self.check_end(bus) {
                Some(outcome) => RoundPhase::Finished(outcome),
                None => RoundPhase::RoundComplete,
            },
            RoundPhase::RoundComplete => {
                bus.push(BattleEvent::RoundEnded);
                RoundPhase::SelectingMoves
            }
            finished @ RoundPhase::Finished(_) => finished,
        };
        self.phase
    }

    /// Run a whole round synchronously.
    pub fn resolve_round(&mut self, move_index: usize) -> BattleResult<RoundReport> {
        self.begin_round(move_index)?;

        let mut bus = EventBus::new();
        let outcome = loop {
            match self.step(&mut bus) {
                RoundPhase::SelectingMoves => break RoundOutcome::Continue,
                RoundPhase::Finished(outcome) => break outcome.into(),
                _ => {}
            }
        };

        Ok(RoundReport {
            events: bus.drain(),
            outcome,
        })
    }

    /// Do something silly: raises the opponent's mercy meter without using the round.
    pub fn act(&mut self, bus: &mut EventBus) -> ActionResult<u8> {
        self.ensure_selecting()?;

        let meter = self
            .opponent
            .add_mercy(self.rules.mercy_per_act, self.rules.mercy_threshold)
            .unwrap_or(0);

        bus.push(BattleEvent::ActedSilly {
            opponent: self.opponent.name().to_string(),
            mercy_meter: meter,
        });
        Ok(meter)
    }

    /// Try to end the battle peacefully. Only works once the mercy meter is full.
    pub fn spare(&mut self, bus: &mut EventBus) -> ActionResult<RoundOutcome> {
        self.ensure_selecting()?;

        let opponent = self.opponent.name().to_string();
        if !self.opponent.can_be_spared(self.rules.mercy_threshold) {
            bus.push(BattleEvent::SpareRefused { opponent });
            return Ok(RoundOutcome::Continue);
        }

        self.opponent.mark_spared();
        info!(opponent = %opponent, "opponent spared");
        bus.push(BattleEvent::Spared { opponent });
        self.phase = RoundPhase::Finished(BattleOutcome::Spared);
        Ok(RoundOutcome::Spared)
    }

    fn attack(&mut self, side: Side, bus: &mut EventBus) {
        let (attacker, defender, move_used) = match side {
            Side::Player => (&self.player, &mut self.opponent, self.player_move.as_ref()),
            Side::Opponent => (&self.opponent, &mut self.player, self.opponent_move.as_ref()),
        };

        let move_name = move_used.map_or(DEFAULT_MOVE_NAME, Move::name);
        bus.push(BattleEvent::MoveUsed {
            side,
            attacker: attacker.name().to_string(),
            move_name: move_name.to_string(),
        });

        let outcome = resolve_attack(attacker, defender, move_used, &self.chart);

        bus.push(BattleEvent::DamageDealt {
            side: side.opponent(),
            target: defender.name().to_string(),
            damage: outcome.damage,
            remaining_health: outcome.remaining_health,
        });
        bus.push(BattleEvent::HealthBarTarget {
            side: side.opponent(),
            health: outcome.remaining_health,
            max_health: defender.max_health(),
        });
        bus.push(BattleEvent::AttackEffectiveness {
            effectiveness: outcome.effectiveness,
        });
    }

    /// Player defeat is checked before opponent defeat.
    fn check_end(&mut self, bus: &mut EventBus) -> Option<BattleOutcome> {
        if self.player.is_defeated() {
            self.player.mark_fainted();
            let name = self.player.name().to_string();

            info!(player = %name, round = self.round, "battle lost");
            bus.push(BattleEvent::Fainted {
                side: Side::Player,
                name: name.clone(),
            });
            bus.push(BattleEvent::Defeat { name });
            return Some(BattleOutcome::Defeat);
        }

        if self.opponent.is_defeated() {
            info!(opponent = %self.opponent.name(), round = self.round, "battle won");
            bus.push(BattleEvent::Fainted {
                side: Side::Opponent,
                name: self.opponent.name().to_string(),
            });
            bus.push(BattleEvent::Victory);
            self.award_experience(bus);
            return Some(BattleOutcome::Victory);
        }

        None
    }

    fn award_experience(&mut self, bus: &mut EventBus) {
        let amount = self.opponent.experience_yield();
        let before = *self.player.experience();

        bus.push(BattleEvent::ExperienceGained {
            name: self.player.name().to_string(),
            amount,
        });
        bus.push(BattleEvent::ExperienceBarTarget {
            progress: before.progress().saturating_add(amount).min(before.span()),
            span: before.span(),
        });

        let level_ups = self
            .player
            .gain_experience_capped(amount, self.rules.max_level);

        for level_up in level_ups {
            bus.push(BattleEvent::LevelUp {
                name: self.player.name().to_string(),
                level: level_up.level,
            });
            bus.push(BattleEvent::StatsChanged {
                previous: level_up.previous,
                current: level_up.current,
            });
        }

        let after = self.player.experience();
        if after.level_floor() != before.level_floor() {
            bus.push(BattleEvent::HealthBarTarget {
                side: Side::Player,
                health: self.player.current_health(),
                max_health: self.player.max_health(),
            });
            bus.push(BattleEvent::ExperienceBarTarget {
                progress: after.progress(),
                span: after.span(),
            });
        }
    }
}
