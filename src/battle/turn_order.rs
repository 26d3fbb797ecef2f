use crate::battle::rng::TurnRng;
use crate::battle::state::Side;
use crate::combatant::Combatant;
use tracing::debug;

/// Decide who acts first this round.
///
/// Strictly higher speed goes first without touching the random source. Equal
/// speeds are settled with a coin flip; heads means the player leads.
pub fn determine_order(player: &Combatant, opponent: &Combatant, rng: &mut TurnRng) -> [Side; 2] {
    let player_speed = player.speed();
    let opponent_speed = opponent.speed();

    let order = if player_speed > opponent_speed {
        [Side::Player, Side::Opponent]
    } else if opponent_speed > player_speed {
        [Side::Opponent, Side::Player]
    } else if rng.coin_flip("speed tie") {
        [Side::Player, Side::Opponent]
    } else {
        [Side::Opponent, Side::Player]
    };

    debug!(player_speed, opponent_speed, first = ?order[0], "turn order decided");
    order
}
