//! Level math. Levels are fixed-width buckets of experience.

use serde::{Deserialize, Serialize};

/// Experience needed to advance one level.
pub const XP_PER_LEVEL: u64 = 100;

/// Level for a cumulative experience total. Level 1 starts at 0 XP.
pub fn level_for(experience: u64) -> u64 {
    experience / XP_PER_LEVEL + 1
}

/// Where a learner stands inside their current level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelProgress {
    /// Current level
    pub level: u64,

    /// Experience earned since reaching the current level
    pub xp_into_level: u64,

    /// Experience still missing for the next level
    pub xp_to_next_level: u64,

    /// Completion of the current level (0-100)
    pub percentage: f32,
}

impl LevelProgress {
    /// Compute level progress from an experience total.
    pub fn from_experience(experience: u64) -> Self {
        let xp_into_level = experience % XP_PER_LEVEL;
        Self {
            level: level_for(experience),
            xp_into_level,
            xp_to_next_level: XP_PER_LEVEL - xp_into_level,
            percentage: (xp_into_level as f32 / XP_PER_LEVEL as f32) * 100.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_boundaries() {
        assert_eq!(level_for(0), 1);
        assert_eq!(level_for(99), 1);
        assert_eq!(level_for(100), 2);
        assert_eq!(level_for(250), 3);
    }

    #[test]
    fn test_level_matches_floor_division() {
        for xp in (0..5_000).step_by(7) {
            assert_eq!(level_for(xp), xp / 100 + 1);
        }
        assert_eq!(level_for(u64::MAX), u64::MAX / 100 + 1);
    }

    #[test]
    fn test_level_progress() {
        let progress = LevelProgress::from_experience(250);
        assert_eq!(progress.level, 3);
        assert_eq!(progress.xp_into_level, 50);
        assert_eq!(progress.xp_to_next_level, 50);
        assert!((progress.percentage - 50.0).abs() < f32::EPSILON);

        let fresh = LevelProgress::from_experience(0);
        assert_eq!(fresh.level, 1);
        assert_eq!(fresh.xp_to_next_level, 100);
        assert_eq!(fresh.percentage, 0.0);
    }
}
