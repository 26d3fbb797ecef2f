#[cfg(test)]
mod tests {
    use crate::battle::controller::BattleTurnController;
    use crate::battle::rng::TurnRng;
    use crate::battle::state::{BattleEvent, BattleOutcome, RoundOutcome, Side};
    use crate::battle::tests::common::{
        assert_ok, create_test_controller, predictable_rng, TestCombatantBuilder,
    };
    use crate::combatant::stats::BaseStats;
    use crate::config::BattleRules;
    use crate::errors::{ActionError, BattleEngineError};
    use crate::moves::Move;
    use crate::type_chart::TypeChart;
    use pretty_assertions::assert_eq;
    use schema::Element;

    #[test]
    fn test_knockout_awards_experience_without_level_up() {
        let player = TestCombatantBuilder::player("Red", 5)
            .with_moves(vec![Move::new("Punch", Element::Normal, 50)])
            .build();
        let opponent = TestCombatantBuilder::wild("Rattata", 3)
            .with_base(BaseStats::new(30, 10, 10, 10, 50))
            .with_moves(vec![Move::new("Scratch", Element::Normal, 40)])
            .with_health(6)
            .build();

        let mut controller = create_test_controller(player, opponent, predictable_rng());
        let report = assert_ok(controller.resolve_round(0));

        assert_eq!(report.outcome, RoundOutcome::Victory);
        assert_eq!(controller.outcome(), Some(BattleOutcome::Victory));

        // round(50 * 3 / 7) = 21; level 5 starts at 125 and the band is 91 wide.
        assert_eq!(
            report.events[5..].to_vec(),
            vec![
                BattleEvent::Fainted {
                    side: Side::Opponent,
                    name: "Rattata".to_string(),
                },
                BattleEvent::Victory,
                BattleEvent::ExperienceGained {
                    name: "Red".to_string(),
                    amount: 21,
                },
                BattleEvent::ExperienceBarTarget {
                    progress: 21,
                    span: 91,
                },
            ]
        );
        assert_eq!(controller.player().level(), 5);
        assert_eq!(controller.player().experience().current(), 146);

        let narration: Vec<String> = report.events.iter().filter_map(BattleEvent::format).collect();
        assert_eq!(
            narration,
            vec![
                "=== Round 1 ===".to_string(),
                "Red used Punch!".to_string(),
                "Rattata fainted!".to_string(),
                "You won!".to_string(),
                "Red earned 21 experience points!".to_string(),
            ]
        );
    }

    fn cascade_controller(player_health: Option<u16>) -> BattleTurnController {
        let mut player = TestCombatantBuilder::player("Red", 2).with_base_speed(100);
        if let Some(health) = player_health {
            player = player.with_health(health);
        }
        let opponent = TestCombatantBuilder::wild("Raticate", 10)
            .with_base(BaseStats::new(20, 10, 10, 10, 100))
            .with_health(1)
            .build();

        create_test_controller(player.build(), opponent, TurnRng::new_for_test(vec![]))
    }

    #[test]
    fn test_award_crossing_several_thresholds_cascades() {
        let mut controller = cascade_controller(None);
        assert_eq!(controller.player().experience().current(), 8);

        let report = assert_ok(controller.resolve_round(0));
        assert_eq!(report.outcome, RoundOutcome::Victory);

        // round(100 * 10 / 7) = 143; 8 + 143 = 151 crosses 27, 64 and 125 but not 216.
        let levels: Vec<u8> = report
            .events
            .iter()
            .filter_map(|event| match event {
                BattleEvent::LevelUp { level, .. } => Some(*level),
                _ => None,
            })
            .collect();
        assert_eq!(levels, vec![3, 4, 5]);

        let stat_panels = report
            .events
            .iter()
            .filter(|event| matches!(event, BattleEvent::StatsChanged { .. }))
            .count();
        assert_eq!(stat_panels, 3);

        let player = controller.player();
        assert_eq!(player.level(), 5);
        assert_eq!(player.experience().current(), 151);
        assert_eq!(player.experience().level_floor(), 125);
        assert_eq!(player.experience().target(), 216);
        assert!(player.experience().current() < player.experience().target());
        assert_eq!(player.current_health(), player.max_health());

        assert!(report
            .events
            .iter()
            .filter_map(BattleEvent::format)
            .any(|line| line == "Red grew to LV. 5!"));
    }

    #[test]
    fn test_level_up_keeps_player_damage() {
        // Max health goes 12 -> 14 -> 15 -> 17; a player at 5 ends at 5 + 5.
        let mut controller = cascade_controller(Some(5));
        assert_eq!(controller.player().max_health(), 12);

        assert_ok(controller.resolve_round(0));

        assert_eq!(controller.player().max_health(), 17);
        assert_eq!(controller.player().current_health(), 10);
        assert_eq!(
            controller.player().experience().current(),
            151
        );
    }

    #[test]
    fn test_rules_cap_level_ups() {
        let player = TestCombatantBuilder::player("Red", 2).with_base_speed(100).build();
        let opponent = TestCombatantBuilder::wild("Raticate", 10)
            .with_base(BaseStats::new(20, 10, 10, 10, 100))
            .with_health(1)
            .build();
        let rules = BattleRules {
            max_level: 3,
            ..BattleRules::default()
        };

        let mut controller = BattleTurnController::new(
            player,
            opponent,
            TypeChart::default(),
            TurnRng::new_for_test(vec![]),
            rules,
        );
        assert_ok(controller.resolve_round(0));

        assert_eq!(controller.player().level(), 3);
        assert_eq!(controller.player().experience().current(), 151);
    }

    #[test]
    fn test_no_actions_after_victory() {
        let mut controller = cascade_controller(None);
        assert_ok(controller.resolve_round(0));

        assert_eq!(
            controller.resolve_round(0),
            Err(BattleEngineError::Action(ActionError::BattleOver))
        );
        let (player, opponent) = controller.into_combatants();
        assert!(opponent.is_defeated());
        assert_eq!(player.level(), 5);
    }
}
