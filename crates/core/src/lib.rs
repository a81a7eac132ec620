//! Bassline core data models.
//!
//! This crate defines the learner's progress record and the pure rules
//! that govern it: level math, daily streaks and the lesson timeline.

#![warn(missing_docs)]

mod clock;
mod id;
mod lesson;
mod level;
mod streak;
mod user_progress;

pub use clock::{Clock, FixedClock, LocalClock};
pub use id::{BadgeName, IdError, LessonId};
pub use lesson::{Difficulty, Lesson, LessonCatalog};
pub use level::{level_for, LevelProgress, XP_PER_LEVEL};
pub use streak::{classify, next_streak, StreakTransition};
pub use user_progress::UserProgress;

/// Badge granted to every learner at first run.
pub const DEFAULT_BADGE: &str = "New Bass Rookie";
