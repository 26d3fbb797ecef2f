use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// The random source injected into every battle decision.
///
/// Outcomes are percentages in `1..=100`. A seeded source is reproducible; a
/// scripted source replays a fixed list and panics when it runs dry, which
/// makes unexpected rolls loud in tests.
#[derive(Debug, Clone)]
pub struct TurnRng {
    source: RngSource,
}

#[derive(Debug, Clone)]
enum RngSource {
    Seeded(StdRng),
    Scripted { outcomes: Vec<u8>, index: usize },
}

impl TurnRng {
    pub fn new_for_test(outcomes: Vec<u8>) -> Self {
        Self {
            source: RngSource::Scripted { outcomes, index: 0 },
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            source: RngSource::Seeded(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn new_random() -> Self {
        Self::seeded(rand::random())
    }

    /// Seeded when a seed is configured, OS-random otherwise.
    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::new_random, Self::seeded)
    }

    pub fn next_outcome(&mut self, reason: &str) -> u8 {
        match &mut self.source {
            RngSource::Seeded(rng) => rng.random_range(1..=100),
            RngSource::Scripted { outcomes, index } => {
                if *index >= outcomes.len() {
                    panic!(
                        "TurnRng exhausted! Tried to get a value for: '{}'. Need more random values.",
                        reason
                    );
                }
                let outcome = outcomes[*index];

                #[cfg(test)]
                println!("[RNG] Consumed {} for: {}", outcome, reason);

                *index += 1;
                outcome
            }
        }
    }

    /// 50/50 choice. Scripted outcomes of 50 or less come up true.
    pub fn coin_flip(&mut self, reason: &str) -> bool {
        self.next_outcome(reason) <= 50
    }

    /// True with probability `chance` (clamped to `[0, 1]`).
    pub fn chance(&mut self, chance: f64, reason: &str) -> bool {
        let chance = chance.clamp(0.0, 1.0);
        if let RngSource::Seeded(rng) = &mut self.source {
            return rng.random_bool(chance);
        }
        (self.next_outcome(reason) as f64) <= chance * 100.0
    }

    /// Uniform index into a collection of `len` items. `len` must be non-zero.
    ///
    /// Scripted outcomes map onto equal percentage buckets: with four items,
    /// 1-25 picks index 0 and 76-100 picks index 3.
    pub fn pick_index(&mut self, len: usize, reason: &str) -> usize {
        debug_assert!(len > 0, "pick_index called with an empty collection");
        let len = len.max(1);
        if let RngSource::Seeded(rng) = &mut self.source {
            return rng.random_range(0..len);
        }
        let outcome = self.next_outcome(reason).clamp(1, 100) as usize;
        ((outcome - 1) * len / 100).min(len - 1)
    }

    /// Inclusive range roll, used for encounter levels.
    pub fn roll_between(&mut self, low: u8, high: u8, reason: &str) -> u8 {
        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        let span = (high - low) as usize + 1;
        low + self.pick_index(span, reason) as u8
    }

    /// Individual value in `0..=31`. Scripted outcomes are taken modulo 32.
    pub fn roll_individual_value(&mut self, reason: &str) -> u8 {
        if let RngSource::Seeded(rng) = &mut self.source {
            return rng.random_range(0..=31);
        }
        self.next_outcome(reason) % 32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_scripted_outcomes_replay_in_order() {
        let mut rng = TurnRng::new_for_test(vec![10, 90, 50]);
        assert!(rng.coin_flip("first"));
        assert!(!rng.coin_flip("second"));
        assert!(rng.coin_flip("third"));
    }

    #[test]
    #[should_panic(expected = "TurnRng exhausted")]
    fn test_scripted_rng_panics_when_exhausted() {
        let mut rng = TurnRng::new_for_test(vec![]);
        rng.next_outcome("nothing left");
    }

    #[test]
    fn test_scripted_pick_index_buckets() {
        let mut rng = TurnRng::new_for_test(vec![1, 25, 26, 100, 50]);
        assert_eq!(rng.pick_index(4, "a"), 0);
        assert_eq!(rng.pick_index(4, "b"), 0);
        assert_eq!(rng.pick_index(4, "c"), 1);
        assert_eq!(rng.pick_index(4, "d"), 3);
        assert_eq!(rng.pick_index(1, "e"), 0);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = TurnRng::seeded(42);
        let mut b = TurnRng::seeded(42);
        let left: Vec<u8> = (0..32).map(|_| a.next_outcome("a")).collect();
        let right: Vec<u8> = (0..32).map(|_| b.next_outcome("b")).collect();
        assert_eq!(left, right);
        assert!(left.iter().all(|outcome| (1..=100).contains(outcome)));
    }

    #[test]
    fn test_seeded_rolls_stay_in_range() {
        let mut rng = TurnRng::seeded(7);
        for _ in 0..1000 {
            assert!(rng.roll_individual_value("iv") <= 31);
            let level = rng.roll_between(2, 5, "level");
            assert!((2..=5).contains(&level));
            assert!(rng.pick_index(3, "move") < 3);
        }
    }

    #[test]
    fn test_chance_extremes() {
        let mut rng = TurnRng::seeded(3);
        for _ in 0..100 {
            assert!(!rng.chance(0.0, "never"));
            assert!(rng.chance(1.0, "always"));
        }

        let mut scripted = TurnRng::new_for_test(vec![7, 8]);
        assert!(scripted.chance(0.075, "7 <= 7.5"));
        assert!(!scripted.chance(0.075, "8 > 7.5"));
    }
}
