//! Bloom level integrator.

/// Level gained per smiling frame.
pub const BLOOM_RISE: f64 = 0.03;

/// Level lost per non-smiling frame.
///
/// Decay is slower than rise so a momentary false negative fades the flower
/// gently instead of flickering it shut. Both rates are part of the contract:
/// they fix time-to-full-bloom (34 frames) and time-to-wilt (40 frames).
pub const BLOOM_DECAY: f64 = 0.025;

/// The controller's sole persistent mutable state: the bloom level.
///
/// Single-writer: only the detection loop updates it, exactly once per
/// iteration. Reset only by starting a fresh controller.
#[derive(Debug, Clone, Default)]
pub struct BloomState {
    level: f64,
}

impl BloomState {
    /// Start fully wilted.
    pub fn new() -> Self {
        Self { level: 0.0 }
    }

    /// Current level, always in [0,1].
    pub fn level(&self) -> f64 {
        self.level
    }

    /// Apply one frame's smile decision and return the new level.
    pub fn update(&mut self, is_smiling: bool) -> f64 {
        let delta = if is_smiling { BLOOM_RISE } else { -BLOOM_DECAY };
        self.level = (self.level + delta).clamp(0.0, 1.0);
        self.level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_stays_clamped() {
        let mut state = BloomState::new();

        // Arbitrary alternating input must never escape [0,1]
        for i in 0..500 {
            let level = state.update(i % 7 != 0);
            assert!((0.0..=1.0).contains(&level), "level {level} out of range");
        }

        for _ in 0..100 {
            state.update(false);
            assert!(state.level() >= 0.0);
        }
    }

    #[test]
    fn test_sustained_smiling_fills_in_34_updates() {
        let mut state = BloomState::new();
        for _ in 0..33 {
            state.update(true);
            assert!(state.level() < 1.0);
        }
        state.update(true);
        assert_eq!(state.level(), 1.0);
    }

    #[test]
    fn test_sustained_neutral_wilts_in_40_updates() {
        let mut state = BloomState::new();
        for _ in 0..40 {
            state.update(true);
        }
        assert_eq!(state.level(), 1.0);

        for _ in 0..39 {
            state.update(false);
            assert!(state.level() > 0.0);
        }
        state.update(false);
        assert!(state.level().abs() < 1e-9);
    }

    #[test]
    fn test_full_bloom_stays_clamped_while_smiling() {
        let mut state = BloomState::new();
        for _ in 0..50 {
            state.update(true);
        }
        assert_eq!(state.level(), 1.0);
    }
}
