//! Lesson catalog - the practice timeline and its unlock chain.

use serde::{Deserialize, Serialize};

use crate::id::LessonId;
use crate::user_progress::UserProgress;

/// A practice lesson.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    /// Stable identifier
    pub id: LessonId,

    /// Lesson title
    pub title: String,

    /// Short description
    pub description: String,

    /// Experience granted on first completion
    pub xp_reward: u64,

    /// Difficulty tier
    pub difficulty: Difficulty,

    /// Lesson that must be completed before this one unlocks
    pub requires: Option<LessonId>,

    /// Titles of the content units, in viewing order
    #[serde(default)]
    pub units: Vec<String>,
}

impl Lesson {
    /// Whether the learner may start this lesson.
    pub fn is_unlocked(&self, progress: &UserProgress) -> bool {
        match &self.requires {
            Some(required) => progress.has_completed(required.as_str()),
            None => true,
        }
    }

    /// Index of the unit that finishes the lesson. A lesson without listed
    /// units is a single unit.
    pub fn final_unit(&self) -> usize {
        self.units.len().saturating_sub(1)
    }
}

/// Lesson difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    /// First steps
    Beginner,
    /// Full songs
    Intermediate,
    /// Technique-heavy material
    Advanced,
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        };
        f.pad(name)
    }
}

/// Ordered list of lessons.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessonCatalog {
    lessons: Vec<Lesson>,
}

impl LessonCatalog {
    /// Build a catalog from lessons in timeline order.
    pub fn new(lessons: Vec<Lesson>) -> Self {
        Self { lessons }
    }

    /// Look up a lesson by id.
    pub fn get(&self, id: &str) -> Option<&Lesson> {
        self.lessons.iter().find(|l| l.id.as_str() == id)
    }

    /// Lessons in timeline order.
    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    /// First lesson that is unlocked and not yet completed.
    pub fn next_up(&self, progress: &UserProgress) -> Option<&Lesson> {
        self.lessons
            .iter()
            .find(|l| l.is_unlocked(progress) && !progress.has_completed(l.id.as_str()))
    }
}

impl Default for LessonCatalog {
    fn default() -> Self {
        let basics = LessonId::from_static("lesson-1");
        let rhythm = LessonId::from_static("lesson-2");
        let bassline = LessonId::from_static("lesson-3");

        Self::new(vec![
            Lesson {
                id: basics.clone(),
                title: "Bass Basics: Your First Steps".to_string(),
                description: "Learn the fundamentals of holding and playing the bass guitar"
                    .to_string(),
                xp_reward: 50,
                difficulty: Difficulty::Beginner,
                requires: None,
                units: vec![
                    "Introduction to Bass".to_string(),
                    "Holding Your Bass".to_string(),
                    "Your First Notes".to_string(),
                    "Practice Together".to_string(),
                ],
            },
            Lesson {
                id: rhythm.clone(),
                title: "Rhythm and Timing".to_string(),
                description: "Master the foundation of all bass playing".to_string(),
                xp_reward: 75,
                difficulty: Difficulty::Beginner,
                requires: Some(basics),
                units: Vec::new(),
            },
            Lesson {
                id: bassline,
                title: "Your First Bassline".to_string(),
                description: "Play a complete song from start to finish".to_string(),
                xp_reward: 100,
                difficulty: Difficulty::Intermediate,
                requires: Some(rhythm),
                units: Vec::new(),
            },
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_unlock_chain() {
        let catalog = LessonCatalog::default();
        let mut progress = UserProgress::default();

        let first = catalog.get("lesson-1").unwrap();
        let second = catalog.get("lesson-2").unwrap();
        assert!(first.is_unlocked(&progress));
        assert!(!second.is_unlocked(&progress));
        assert_eq!(catalog.next_up(&progress).unwrap().id, first.id);

        progress.complete_lesson(first.id.clone());
        assert!(second.is_unlocked(&progress));
        assert_eq!(catalog.next_up(&progress).unwrap().id, second.id);
    }

    #[test]
    fn test_rewards() {
        let catalog = LessonCatalog::default();
        let rewards: Vec<u64> = catalog.lessons().iter().map(|l| l.xp_reward).collect();
        assert_eq!(rewards, vec![50, 75, 100]);
        assert!(catalog.get("lesson-9").is_none());
    }

    #[test]
    fn test_final_unit() {
        let catalog = LessonCatalog::default();
        let basics = catalog.get("lesson-1").unwrap();
        assert_eq!(basics.units.len(), 4);
        assert_eq!(basics.final_unit(), 3);
        assert_eq!(catalog.get("lesson-2").unwrap().final_unit(), 0);
    }
}
