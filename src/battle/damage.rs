use crate::combatant::Combatant;
use crate::moves::Move;
use crate::type_chart::{Effectiveness, TypeChart};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// What one attack did to its target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DamageOutcome {
    pub damage: u16,
    pub multiplier: f64,
    pub effectiveness: Effectiveness,
    pub remaining_health: u16,
    pub defeated: bool,
}

/// Pure damage formula.
///
/// `floor(((2 * level / 5 + 2) * power * attack / defense) / 50 + 2)`, scaled by
/// the type multiplier, floored again and never below 1. A zero defense is
/// treated as 1.
pub fn calculate_damage(level: u8, attack: u16, defense: u16, power: u16, multiplier: f64) -> u16 {
    let level = level as f64;
    let attack = attack as f64;
    let defense = defense.max(1) as f64;
    let power = power as f64;

    let base = ((2.0 * level / 5.0 + 2.0) * power * (attack / defense)) / 50.0 + 2.0;
    let scaled = (base.floor() * multiplier.max(0.0)).floor();

    scaled.clamp(1.0, u16::MAX as f64) as u16
}

/// Resolve one attack and apply it to `defender`.
///
/// With no move supplied the default move (Normal, power 40) is used.
pub fn resolve_attack(
    attacker: &Combatant,
    defender: &mut Combatant,
    move_used: Option<&Move>,
    chart: &TypeChart,
) -> DamageOutcome {
    let fallback = Move::default_move();
    let move_used = move_used.unwrap_or(&fallback);

    let multiplier = chart.multiplier(move_used.element(), defender.element());
    let damage = calculate_damage(
        attacker.level(),
        attacker.attack(),
        defender.defense(),
        move_used.base_power(),
        multiplier,
    );
    let defeated = defender.take_damage(damage);

    debug!(
        attacker = attacker.name(),
        defender = defender.name(),
        move_name = move_used.name(),
        damage,
        multiplier,
        remaining = defender.current_health(),
        "attack resolved"
    );

    DamageOutcome {
        damage,
        multiplier,
        effectiveness: Effectiveness::from_multiplier(multiplier),
        remaining_health: defender.current_health(),
        defeated,
    }
}
