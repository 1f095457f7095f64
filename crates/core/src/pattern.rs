//! Pattern module - per-round challenge generation
//!
//! A pattern is one round's target: an ordered sequence of grid indices plus
//! the timing parameters the reveal and the countdown run with. Generation is
//! deterministic given the RNG, so a seeded game replays identically.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pattern_pulse_types::{
    Difficulty, GRID_SIZE, MIN_DISPLAY_SPEED_SECS, MIN_TIME_LIMIT_SECS,
};

use crate::rng::SimpleRng;

/// One round's challenge. Immutable once created; owned by the session
/// that generated it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    pub id: Uuid,
    /// Grid indices in reveal order. Duplicates are allowed.
    pub sequence: Vec<usize>,
    /// Seconds each card stays face-up during the reveal.
    pub display_speed: f64,
    /// Seconds allotted for the player's response.
    pub time_limit: f64,
    pub difficulty: Difficulty,
}

impl Pattern {
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

/// Pattern length for a level: the difficulty base plus one extra card
/// every three levels. Grows without bound.
pub fn pattern_length(level: u32, difficulty: Difficulty) -> usize {
    difficulty.base_length() + (level / 3) as usize
}

/// Seconds each card is shown, shrinking 0.05s per level down to the floor.
pub fn display_speed(level: u32, difficulty: Difficulty) -> f64 {
    let speed = difficulty.base_speed() - f64::from(level) * 0.05;
    speed.max(MIN_DISPLAY_SPEED_SECS)
}

/// Response window in seconds, shrinking 0.5s per level down to the floor.
pub fn time_limit(level: u32, difficulty: Difficulty) -> f64 {
    let limit = difficulty.base_time() - f64::from(level) * 0.5;
    limit.max(MIN_TIME_LIMIT_SECS)
}

/// Generate the pattern for a level.
///
/// Each element is drawn uniformly from the grid **with replacement**;
/// consecutive repeats are part of the game, not filtered out.
pub fn generate(level: u32, difficulty: Difficulty, rng: &mut SimpleRng) -> Pattern {
    let length = pattern_length(level, difficulty);
    let mut sequence = Vec::with_capacity(length);
    while sequence.len() < length {
        sequence.push(rng.next_range(GRID_SIZE as u32) as usize);
    }

    Pattern {
        id: Uuid::new_v4(),
        sequence,
        display_speed: display_speed(level, difficulty),
        time_limit: time_limit(level, difficulty),
        difficulty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_length_formula() {
        // base + level / 3 for every difficulty
        for (d, base) in [
            (Difficulty::Easy, 2),
            (Difficulty::Medium, 3),
            (Difficulty::Hard, 4),
        ] {
            for level in 0..30 {
                assert_eq!(pattern_length(level, d), base + (level / 3) as usize);
            }
        }
    }

    #[test]
    fn test_pattern_length_monotonic() {
        for d in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            let mut prev = pattern_length(0, d);
            for level in 1..100 {
                let len = pattern_length(level, d);
                assert!(len >= prev);
                prev = len;
            }
        }
    }

    #[test]
    fn test_display_speed_floor() {
        for d in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            for level in 0..200 {
                assert!(display_speed(level, d) >= MIN_DISPLAY_SPEED_SECS);
            }
        }
        // High levels pin to the floor exactly.
        assert_eq!(display_speed(100, Difficulty::Hard), MIN_DISPLAY_SPEED_SECS);
    }

    #[test]
    fn test_time_limit_floor() {
        for d in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            for level in 0..200 {
                assert!(time_limit(level, d) >= MIN_TIME_LIMIT_SECS);
            }
        }
        assert_eq!(time_limit(100, Difficulty::Easy), MIN_TIME_LIMIT_SECS);
    }

    #[test]
    fn test_level_one_easy_parameters() {
        assert_eq!(pattern_length(1, Difficulty::Easy), 2);
        assert!((display_speed(1, Difficulty::Easy) - 1.15).abs() < 1e-9);
        assert!((time_limit(1, Difficulty::Easy) - 29.5).abs() < 1e-9);
    }

    #[test]
    fn test_generate_respects_grid_bounds() {
        let mut rng = SimpleRng::new(42);
        for level in 1..20 {
            let p = generate(level, Difficulty::Hard, &mut rng);
            assert_eq!(p.len(), pattern_length(level, Difficulty::Hard));
            assert!(p.sequence.iter().all(|&i| i < GRID_SIZE));
        }
    }

    #[test]
    fn test_generate_deterministic_from_seed() {
        let mut rng1 = SimpleRng::new(777);
        let mut rng2 = SimpleRng::new(777);
        let p1 = generate(5, Difficulty::Medium, &mut rng1);
        let p2 = generate(5, Difficulty::Medium, &mut rng2);
        assert_eq!(p1.sequence, p2.sequence);
    }

    #[test]
    fn test_generate_allows_repeats() {
        // With replacement, long sequences on a 9-cell grid must repeat.
        let mut rng = SimpleRng::new(3);
        let p = generate(30, Difficulty::Hard, &mut rng);
        assert!(p.len() > GRID_SIZE);
        let mut seen = [false; GRID_SIZE];
        let mut repeat = false;
        for &i in &p.sequence {
            if seen[i] {
                repeat = true;
            }
            seen[i] = true;
        }
        assert!(repeat);
    }
}
