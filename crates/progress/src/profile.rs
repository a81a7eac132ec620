//! Profile summary for display surfaces.

use bassline_core::UserProgress;
use serde::Serialize;

/// Read-only snapshot of everything a profile view shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileSummary {
    /// Current level
    pub level: u64,
    /// Cumulative experience
    pub experience: u64,
    /// Experience earned inside the current level
    pub xp_into_level: u64,
    /// Experience missing for the next level
    pub xp_to_next_level: u64,
    /// Completion of the current level (0-100)
    pub level_percentage: f32,
    /// Consecutive activation days
    pub streak: u64,
    /// Earned badges, sorted
    pub badges: Vec<String>,
    /// Number of completed lessons
    pub lessons_completed: usize,
    /// Songs learned
    pub songs_learned: u64,
    /// Covers uploaded
    pub covers_uploaded: u64,
    /// Likes received
    pub total_likes: u64,
    /// Followers
    pub followers: u64,
}

impl From<&UserProgress> for ProfileSummary {
    fn from(progress: &UserProgress) -> Self {
        let level = progress.level_progress();
        Self {
            level: level.level,
            experience: progress.experience(),
            xp_into_level: level.xp_into_level,
            xp_to_next_level: level.xp_to_next_level,
            level_percentage: level.percentage,
            streak: progress.streak(),
            badges: progress.badges().iter().map(|b| b.to_string()).collect(),
            lessons_completed: progress.completed_lessons().len(),
            songs_learned: progress.songs_learned(),
            covers_uploaded: progress.covers_uploaded(),
            total_likes: progress.total_likes(),
            followers: progress.followers(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bassline_core::{BadgeName, LessonId};

    #[test]
    fn test_summary_from_progress() {
        let mut progress = UserProgress::default();
        progress.grant_experience(130);
        progress.complete_lesson(LessonId::parse("lesson-1").unwrap());
        progress.grant_badge(BadgeName::parse("Groove Keeper").unwrap());
        progress.add_followers(7);

        let summary = ProfileSummary::from(&progress);
        assert_eq!(summary.level, 2);
        assert_eq!(summary.xp_into_level, 30);
        assert_eq!(summary.xp_to_next_level, 70);
        assert_eq!(summary.lessons_completed, 1);
        assert_eq!(summary.badges, vec!["Groove Keeper", "New Bass Rookie"]);
        assert_eq!(summary.followers, 7);
    }
}
