pub mod stats;

use crate::battle::rng::TurnRng;
use crate::equipment::{Equipment, Loadout};
use crate::errors::{ActionError, ActionResult};
use crate::experience::{self, ExperienceTrack, DEFAULT_MAX_LEVEL};
use crate::moves::Move;
use schema::{Element, EquipmentKind};
use serde::{Deserialize, Serialize};
use stats::{calculate_stats, BaseStats, DerivedStats, IndividualValues, StatBonus};
use tracing::info;

pub const MAX_MOVES: usize = 4;
pub const LOW_HEALTH_THRESHOLD: f64 = 0.25;

/// Player-only state: equipped items and the fainted flag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerTraits {
    pub loadout: Loadout,
    pub fainted: bool,
}

/// Wild-only state: the IV roll and the spare mechanic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WildTraits {
    pub ivs: IndividualValues,
    pub mercy_meter: u8,
    pub spared: bool,
}

/// The two kinds of combatant. Both share every formula; they differ only in
/// which capabilities they report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CombatantKind {
    Player(PlayerTraits),
    Wild(WildTraits),
}

impl CombatantKind {
    pub fn has_equipment_bonus(&self) -> bool {
        matches!(self, CombatantKind::Player(_))
    }

    /// Wild combatants always (re)enter battle at full health for their level.
    pub fn resets_health_on_recompute(&self) -> bool {
        matches!(self, CombatantKind::Wild(_))
    }
}

/// Stats before and after one level-up, for the post-battle stat panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelUp {
    pub level: u8,
    pub previous: DerivedStats,
    pub current: DerivedStats,
}

/// Anything that can take part in a battle round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    name: String,
    element: Element,
    level: u8,
    experience: ExperienceTrack,
    base: BaseStats,
    stats: DerivedStats,
    previous_stats: DerivedStats,
    current_health: u16,
    moves: Vec<Move>,
    kind: CombatantKind,
}

impl Combatant {
    fn build(
        name: String,
        element: Element,
        level: u8,
        base: BaseStats,
        moves: Vec<Move>,
        kind: CombatantKind,
    ) -> Self {
        let level = level.max(1);
        let mut moves = moves;
        moves.truncate(MAX_MOVES);

        let mut combatant = Self {
            name,
            element,
            level,
            experience: ExperienceTrack::at_level(level),
            base,
            stats: DerivedStats::default(),
            previous_stats: DerivedStats::default(),
            current_health: 0,
            moves,
            kind,
        };
        combatant.stats = combatant.compute_stats();
        combatant.previous_stats = combatant.stats;
        combatant.current_health = combatant.stats.max_health;
        combatant
    }

    /// A player-side combatant. No IVs; equipment feeds attack and defense.
    pub fn player(
        name: impl Into<String>,
        element: Element,
        level: u8,
        base: BaseStats,
        moves: Vec<Move>,
        loadout: Loadout,
    ) -> Self {
        let traits = PlayerTraits {
            loadout,
            fainted: false,
        };
        Self::build(
            name.into(),
            element,
            level,
            base,
            moves,
            CombatantKind::Player(traits),
        )
    }

    /// A wild combatant with a fresh IV roll.
    pub fn wild(
        name: impl Into<String>,
        element: Element,
        level: u8,
        base: BaseStats,
        moves: Vec<Move>,
        rng: &mut TurnRng,
    ) -> Self {
        let ivs = IndividualValues::roll(rng);
        Self::wild_with_ivs(name, element, level, base, moves, ivs)
    }

    pub fn wild_with_ivs(
        name: impl Into<String>,
        element: Element,
        level: u8,
        base: BaseStats,
        moves: Vec<Move>,
        ivs: IndividualValues,
    ) -> Self {
        let traits = WildTraits {
            ivs,
            mercy_meter: 0,
            spared: false,
        };
        Self::build(
            name.into(),
            element,
            level,
            base,
            moves,
            CombatantKind::Wild(traits),
        )
    }

    // --- Identity & progression ---

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn element(&self) -> Element {
        self.element
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn kind(&self) -> &CombatantKind {
        &self.kind
    }

    pub fn is_player(&self) -> bool {
        matches!(self.kind, CombatantKind::Player(_))
    }

    pub fn experience(&self) -> &ExperienceTrack {
        &self.experience
    }

    pub fn base_stats(&self) -> &BaseStats {
        &self.base
    }

    pub fn individual_values(&self) -> IndividualValues {
        match &self.kind {
            CombatantKind::Wild(traits) => traits.ivs,
            CombatantKind::Player(_) => IndividualValues::default(),
        }
    }

    // --- Derived stats ---

    pub fn stats(&self) -> &DerivedStats {
        &self.stats
    }

    /// Stats as they were before the most recent recompute.
    pub fn previous_stats(&self) -> &DerivedStats {
        &self.previous_stats
    }

    pub fn max_health(&self) -> u16 {
        self.stats.max_health
    }

    pub fn attack(&self) -> u16 {
        self.stats.attack
    }

    pub fn defense(&self) -> u16 {
        self.stats.defense
    }

    pub fn speed(&self) -> u16 {
        self.stats.speed
    }

    fn stat_bonus(&self) -> StatBonus {
        match &self.kind {
            CombatantKind::Player(traits) => StatBonus {
                attack: traits.loadout.attack_bonus(),
                defense: traits.loadout.defense_bonus(),
            },
            CombatantKind::Wild(_) => StatBonus::default(),
        }
    }

    fn compute_stats(&self) -> DerivedStats {
        calculate_stats(
            &self.base,
            &self.individual_values(),
            self.level,
            self.stat_bonus(),
        )
    }

    /// Re-derive every stat from its sources.
    ///
    /// Wild combatants reset to the new max health. Players keep their damage:
    /// current health moves by the change in max health, clamped to `[0, max]`.
    /// Experience is never touched here.
    pub fn recalculate_stats(&mut self) {
        let old = self.stats;
        let new = self.compute_stats();

        self.previous_stats = old;
        self.stats = new;

        if self.kind.resets_health_on_recompute() {
            self.current_health = new.max_health;
        } else {
            let shifted =
                self.current_health as i32 + new.max_health as i32 - old.max_health as i32;
            self.current_health = shifted.clamp(0, new.max_health as i32) as u16;
        }
    }

    // --- Health ---

    pub fn current_health(&self) -> u16 {
        self.current_health
    }

    /// Clamp-set current health. Used by the exploration layer and tests.
    pub fn set_health(&mut self, health: u16) {
        self.current_health = health.min(self.stats.max_health);
    }

    /// Remove health, never going below zero. Returns true if this left the combatant defeated.
    pub fn take_damage(&mut self, damage: u16) -> bool {
        self.current_health = self.current_health.saturating_sub(damage);
        self.is_defeated()
    }

    pub fn heal(&mut self, amount: u16) {
        self.current_health = self
            .current_health
            .saturating_add(amount)
            .min(self.stats.max_health);
    }

    pub fn heal_full(&mut self) {
        self.current_health = self.stats.max_health;
    }

    pub fn is_defeated(&self) -> bool {
        self.current_health == 0
    }

    pub fn health_fraction(&self) -> f64 {
        if self.stats.max_health == 0 {
            return 0.0;
        }
        self.current_health as f64 / self.stats.max_health as f64
    }

    pub fn is_low_health(&self) -> bool {
        self.is_low_health_with(LOW_HEALTH_THRESHOLD)
    }

    pub fn is_low_health_with(&self, threshold: f64) -> bool {
        let fraction = self.health_fraction();
        fraction > 0.0 && fraction <= threshold
    }

    pub fn health_meter(&self) -> String {
        format!("{} / {}", self.current_health, self.stats.max_health)
    }

    // --- Moves ---

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// The move in `index`, or the default move when the move list is empty.
    pub fn move_at(&self, index: usize) -> ActionResult<Move> {
        if self.moves.is_empty() {
            return Ok(Move::default_move());
        }
        self.moves
            .get(index)
            .cloned()
            .ok_or(ActionError::InvalidMoveIndex(index))
    }

    /// Uniform pick from the move list; the default move when there is none.
    pub fn random_move(&self, rng: &mut TurnRng) -> Move {
        if self.moves.is_empty() {
            return Move::default_move();
        }
        let index = rng.pick_index(self.moves.len(), "opponent move selection");
        self.moves[index].clone()
    }

    /// Add a move if a slot is free. Returns false when all slots are taken.
    pub fn learn_move(&mut self, move_: Move) -> bool {
        if self.moves.len() >= MAX_MOVES {
            return false;
        }
        self.moves.push(move_);
        true
    }

    // --- Experience ---

    /// Advance one level, re-anchor the experience band and recompute stats.
    pub fn level_up(&mut self) -> LevelUp {
        self.level = self.level.saturating_add(1);
        self.experience.advance_to(self.level);
        self.recalculate_stats();

        info!(name = %self.name, level = self.level, "level up");

        LevelUp {
            level: self.level,
            previous: self.previous_stats,
            current: self.stats,
        }
    }

    /// Add experience and process every level-up it unlocks, in order.
    pub fn gain_experience(&mut self, amount: u32) -> Vec<LevelUp> {
        self.gain_experience_capped(amount, DEFAULT_MAX_LEVEL)
    }

    /// As [`gain_experience`](Self::gain_experience), stopping at `max_level`.
    pub fn gain_experience_capped(&mut self, amount: u32, max_level: u8) -> Vec<LevelUp> {
        self.experience.add(amount);

        let mut level_ups = Vec::new();
        while self.experience.threshold_reached() && self.level < max_level {
            level_ups.push(self.level_up());
        }
        level_ups
    }

    /// Restore a saved experience total without triggering level-ups.
    pub fn restore_experience(&mut self, current: u32) {
        self.experience = ExperienceTrack::with_current(self.level, current);
    }

    /// What defeating this combatant is worth.
    pub fn experience_yield(&self) -> u32 {
        experience::experience_to_award(self.base.experience, self.level)
    }

    // --- Player capabilities ---

    pub fn loadout(&self) -> Option<&Loadout> {
        match &self.kind {
            CombatantKind::Player(traits) => Some(&traits.loadout),
            CombatantKind::Wild(_) => None,
        }
    }

    /// Put `item` in its slot and recompute. Returns whatever was in that slot.
    pub fn equip(&mut self, item: Equipment) -> ActionResult<Option<Equipment>> {
        let CombatantKind::Player(traits) = &mut self.kind else {
            return Err(ActionError::EquipmentNotSupported(self.name.clone()));
        };

        if !item.kind.is_equippable() {
            return Err(ActionError::NotEquippable {
                item: item.name,
                kind: item.kind,
            });
        }

        let slot = match item.kind {
            EquipmentKind::Weapon => &mut traits.loadout.weapon,
            _ => &mut traits.loadout.armor,
        };
        let previous = slot.replace(item);

        self.recalculate_stats();
        Ok(previous)
    }

    pub fn unequip(&mut self, kind: EquipmentKind) -> ActionResult<Option<Equipment>> {
        let CombatantKind::Player(traits) = &mut self.kind else {
            return Err(ActionError::EquipmentNotSupported(self.name.clone()));
        };

        let removed = match kind {
            EquipmentKind::Weapon => traits.loadout.weapon.take(),
            EquipmentKind::Armor => traits.loadout.armor.take(),
            _ => None,
        };

        self.recalculate_stats();
        Ok(removed)
    }

    pub fn is_fainted(&self) -> bool {
        match &self.kind {
            CombatantKind::Player(traits) => traits.fainted,
            CombatantKind::Wild(_) => self.is_defeated(),
        }
    }

    pub fn mark_fainted(&mut self) {
        if let CombatantKind::Player(traits) = &mut self.kind {
            traits.fainted = true;
        }
    }

    /// Clear the fainted flag and heal to full.
    pub fn revive(&mut self) {
        if let CombatantKind::Player(traits) = &mut self.kind {
            traits.fainted = false;
        }
        self.heal_full();
    }

    // --- Wild capabilities ---

    pub fn mercy_meter(&self) -> Option<u8> {
        match &self.kind {
            CombatantKind::Wild(traits) => Some(traits.mercy_meter),
            CombatantKind::Player(_) => None,
        }
    }

    /// Raise the mercy meter, capped at `cap`. Returns the new value, or None for players.
    pub fn add_mercy(&mut self, amount: u8, cap: u8) -> Option<u8> {
        match &mut self.kind {
            CombatantKind::Wild(traits) => {
                traits.mercy_meter = traits.mercy_meter.saturating_add(amount).min(cap);
                Some(traits.mercy_meter)
            }
            CombatantKind::Player(_) => None,
        }
    }

    pub fn can_be_spared(&self, threshold: u8) -> bool {
        self.mercy_meter().is_some_and(|meter| meter >= threshold)
    }

    pub fn is_spared(&self) -> bool {
        matches!(&self.kind, CombatantKind::Wild(traits) if traits.spared)
    }

    pub fn mark_spared(&mut self) {
        if let CombatantKind::Wild(traits) = &mut self.kind {
            traits.spared = true;
        }
    }
}
