use pokemon_encounter::{
    BattleOutcome, BattleResult, BattleTurnController, Combatant, Direction, EncounterTable,
    EventBus, GameConfig, GameData, Inventory, PlayerSave, Position, RoundPhase, TurnRng,
};
use tokio::time::{self, Duration};
use tracing::{debug, error, info, warn};

const BATTLES_PER_SESSION: u32 = 3;
const STARTER_LEVEL: u8 = 5;
const MAX_STEPS_PER_ENCOUNTER: u32 = 1_000;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = match GameConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("Error loading configuration: {}", err);
            std::process::exit(1);
        }
    };

    if let Err(err) = run_session(config).await {
        error!("Session failed: {}", err);
        std::process::exit(1);
    }
}

async fn run_session(config: GameConfig) -> BattleResult<()> {
    let data = GameData::load(&config.data_dir).or_else(|err| {
        warn!("Falling back to built-in data: {}", err);
        GameData::builtin()
    })?;
    let mut rng = TurnRng::from_seed(config.seed);

    let save = match PlayerSave::read_json(&config.save_path)? {
        Some(save) => save,
        None => {
            let starter = data.species.pick_starter(&mut rng)?;
            info!(starter, "starting a new game");
            PlayerSave::new_game(starter, data.species.get(starter)?, STARTER_LEVEL)
        }
    };
    let inventory = save.inventory();
    let mut position = save.position;
    let direction = save.direction;
    let mut player = save.restore(&data.moves);
    let encounters = EncounterTable::new(&config.encounter, &data.species)?;

    // Stands in for the host's animation-frame scheduler.
    let mut ticker = time::interval(Duration::from_millis(config.tick_ms));

    for battle_number in 1..=BATTLES_PER_SESSION {
        let mut steps = 0;
        loop {
            ticker.tick().await;
            position.x += 1;
            steps += 1;
            if encounters.check_for_encounter(&mut rng) {
                break;
            }
            if steps >= MAX_STEPS_PER_ENCOUNTER {
                warn!(steps, "no encounter, ending session early");
                return save_player(&player, position, direction, &inventory, &config);
            }
        }

        let opponent = encounters.spawn(&data.species, &data.moves, &mut rng)?;
        let battle_rng = TurnRng::from_seed(config.seed.map(|seed| seed.wrapping_add(battle_number as u64)));
        let mut controller = BattleTurnController::new(
            player,
            opponent,
            data.type_chart.clone(),
            battle_rng,
            config.battle,
        );

        let mut bus = EventBus::new();
        controller.introduce(&mut bus);
        narrate(&mut bus);

        let outcome = loop {
            ticker.tick().await;
            match controller.phase() {
                RoundPhase::SelectingMoves => choose_action(&mut controller, &mut bus, &mut rng)?,
                RoundPhase::Finished(outcome) => break outcome,
                _ => {
                    controller.step(&mut bus);
                }
            }
            narrate(&mut bus);
        };

        info!(battle_number, ?outcome, rounds = controller.round(), "battle finished");
        let (returned, _) = controller.into_combatants();
        player = returned;

        if outcome == BattleOutcome::Defeat {
            player.revive();
            println!("{} was healed back to {}.", player.name(), player.health_meter());
        }
    }

    save_player(&player, position, direction, &inventory, &config)
}

/// Auto-play: fight normally, but try for mercy when health runs low.
fn choose_action(
    controller: &mut BattleTurnController,
    bus: &mut EventBus,
    rng: &mut TurnRng,
) -> BattleResult<()> {
    let threshold = controller.rules().mercy_threshold;
    let low_health = controller
        .player()
        .is_low_health_with(controller.rules().low_health_threshold);

    if low_health && controller.opponent().can_be_spared(threshold) {
        controller.spare(bus)?;
    } else if low_health && controller.opponent().mercy_meter().is_some() {
        controller.act(bus)?;
    } else {
        let move_count = controller.player().moves().len().max(1);
        let index = rng.pick_index(move_count, "player move");
        controller.begin_round(index)?;
    }
    Ok(())
}

fn narrate(bus: &mut EventBus) {
    if bus.is_empty() {
        return;
    }
    debug!("battle events:\n{}", bus);
    for line in bus.narration() {
        println!("{}", line);
    }
    bus.drain();
}

fn save_player(
    player: &Combatant,
    position: Position,
    direction: Direction,
    inventory: &Inventory,
    config: &GameConfig,
) -> BattleResult<()> {
    PlayerSave::capture(player, position, direction, inventory).write_json(&config.save_path)?;
    Ok(())
}
