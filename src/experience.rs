//! Medium-Fast experience curve and victory rewards.

use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_LEVEL: u8 = 100;

/// Cumulative experience needed to reach `level`: 0 at level 1, `level^3` after that.
pub fn experience_for_level(level: u8) -> u32 {
    if level <= 1 {
        0
    } else {
        (level as u32).pow(3)
    }
}

/// `round(base_experience * level / 7)` for a defeated combatant.
pub fn experience_to_award(base_experience: u16, level: u8) -> u32 {
    (base_experience as f64 * level as f64 / 7.0).round() as u32
}

/// Where a combatant sits on the curve.
///
/// Invariant: `level_floor <= current`. `current` stays below `target` except at
/// the max level, where it may grow past `target` without further level-ups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceTrack {
    current: u32,
    level_floor: u32,
    target: u32,
}

impl ExperienceTrack {
    /// A track sitting exactly at the start of `level`.
    pub fn at_level(level: u8) -> Self {
        let floor = experience_for_level(level);
        Self {
            current: floor,
            level_floor: floor,
            target: experience_for_level(level.saturating_add(1)),
        }
    }

    /// A track for `level` with a saved total, raised to the level floor if short.
    /// Totals past `target` are kept as saved.
    pub fn with_current(level: u8, current: u32) -> Self {
        let mut track = Self::at_level(level);
        track.current = current.max(track.level_floor);
        track
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn level_floor(&self) -> u32 {
        self.level_floor
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    /// Progress within the current level, what the experience bar shows.
    pub fn progress(&self) -> u32 {
        self.current - self.level_floor
    }

    /// Width of the current level's band.
    pub fn span(&self) -> u32 {
        self.target - self.level_floor
    }

    pub fn add(&mut self, amount: u32) {
        self.current = self.current.saturating_add(amount);
    }

    pub fn threshold_reached(&self) -> bool {
        self.current >= self.target
    }

    /// Re-anchor floor and target for a freshly reached level. `current` is untouched.
    pub fn advance_to(&mut self, level: u8) {
        self.level_floor = experience_for_level(level);
        self.target = experience_for_level(level.saturating_add(1));
    }
}
