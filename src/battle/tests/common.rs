use crate::battle::controller::BattleTurnController;
use crate::battle::rng::TurnRng;
use crate::combatant::stats::{BaseStats, IndividualValues};
use crate::combatant::Combatant;
use crate::config::BattleRules;
use crate::equipment::Loadout;
use crate::errors::BattleResult;
use crate::moves::Move;
use crate::type_chart::TypeChart;
use schema::Element;

/// A builder for creating test combatants with common defaults.
///
/// # Example
/// ```
/// let player = TestCombatantBuilder::player("Red", 5)
///     .with_base(BaseStats::new(20, 10, 10, 10, 50))
///     .with_moves(vec![Move::new("Punch", Element::Normal, 50)])
///     .build();
/// ```
pub struct TestCombatantBuilder {
    name: String,
    element: Element,
    level: u8,
    base: BaseStats,
    moves: Vec<Move>,
    wild: bool,
    ivs: IndividualValues,
    loadout: Loadout,
    current_health: Option<u16>,
}

impl TestCombatantBuilder {
    fn new(name: &str, level: u8, wild: bool) -> Self {
        Self {
            name: name.to_string(),
            element: Element::Normal,
            level,
            base: BaseStats::new(20, 10, 10, 10, 50),
            moves: Vec::new(),
            wild,
            ivs: IndividualValues::default(),
            loadout: Loadout::default(),
            current_health: None,
        }
    }

    /// A player-side combatant.
    pub fn player(name: &str, level: u8) -> Self {
        Self::new(name, level, false)
    }

    /// A wild combatant with zero IVs unless `with_ivs` is used.
    pub fn wild(name: &str, level: u8) -> Self {
        Self::new(name, level, true)
    }

    pub fn with_element(mut self, element: Element) -> Self {
        self.element = element;
        self
    }

    pub fn with_base(mut self, base: BaseStats) -> Self {
        self.base = base;
        self
    }

    /// Base speed only, keeping the other base stats.
    pub fn with_base_speed(mut self, speed: u16) -> Self {
        self.base.speed = speed;
        self
    }

    pub fn with_moves(mut self, moves: Vec<Move>) -> Self {
        self.moves = moves;
        self
    }

    pub fn with_ivs(mut self, ivs: IndividualValues) -> Self {
        self.ivs = ivs;
        self
    }

    pub fn with_loadout(mut self, loadout: Loadout) -> Self {
        self.loadout = loadout;
        self
    }

    /// Sets the current health. If not set, health will be max.
    pub fn with_health(mut self, health: u16) -> Self {
        self.current_health = Some(health);
        self
    }

    pub fn build(self) -> Combatant {
        let mut combatant = if self.wild {
            Combatant::wild_with_ivs(
                self.name,
                self.element,
                self.level,
                self.base,
                self.moves,
                self.ivs,
            )
        } else {
            Combatant::player(
                self.name,
                self.element,
                self.level,
                self.base,
                self.moves,
                self.loadout,
            )
        };

        if let Some(health) = self.current_health {
            combatant.set_health(health);
        }
        combatant
    }
}

/// A controller over the default type chart and default rules.
pub fn create_test_controller(
    player: Combatant,
    opponent: Combatant,
    rng: TurnRng,
) -> BattleTurnController {
    BattleTurnController::new(
        player,
        opponent,
        TypeChart::default(),
        rng,
        BattleRules::default(),
    )
}

/// Creates a `TurnRng` instance with a long list of default values (50).
/// Useful for tests where the specific RNG outcome is not important, preventing panics from exhaustion.
pub fn predictable_rng() -> TurnRng {
    TurnRng::new_for_test(vec![50; 100])
}

/// Helper function to assert that a Result is Ok and return the value.
pub fn assert_ok<T>(result: BattleResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("Expected Ok but got error: {}", err),
    }
}
