//! Finishing lessons.
//!
//! A lesson's reward is paid on its first completion only. Replaying a
//! finished lesson counts as a review and grants nothing. A
//! [`LessonSession`] walks the lesson's units and only finishes on the last.

use bassline_core::Lesson;
use bassline_storage::ProgressRepository;
use tracing::info;

use crate::store::ProgressStore;

/// Errors from the lesson flow.
#[derive(Debug, thiserror::Error)]
pub enum LessonError {
    /// The prerequisite lesson has not been completed
    #[error("lesson {lesson} is locked until {requires} is completed")]
    Locked {
        /// Lesson that was attempted
        lesson: String,
        /// Lesson that unlocks it
        requires: String,
    },

    /// Finishing was attempted before the final unit
    #[error("lesson {lesson} is on unit {unit} of {total}")]
    NotOnFinalUnit {
        /// Lesson being viewed
        lesson: String,
        /// Current unit, 1-based
        unit: usize,
        /// Number of units
        total: usize,
    },
}

/// Result of finishing a lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LessonOutcome {
    /// First completion; the reward was granted
    FirstCompletion {
        /// Experience granted
        xp_awarded: u64,
        /// New level, if the reward crossed a level boundary
        new_level: Option<u64>,
    },
    /// The lesson was already complete
    Reviewed,
}

/// Complete `lesson` and grant its reward if this is the first completion.
pub async fn finish_lesson<R: ProgressRepository>(
    store: &mut ProgressStore<R>,
    lesson: &Lesson,
) -> Result<LessonOutcome, LessonError> {
    if !lesson.is_unlocked(store.progress()) {
        return Err(LessonError::Locked {
            lesson: lesson.id.to_string(),
            requires: lesson
                .requires
                .as_ref()
                .map(|r| r.to_string())
                .unwrap_or_default(),
        });
    }

    if !store.complete_lesson(lesson.id.as_str()).await {
        info!("Reviewed lesson {}", lesson.id);
        return Ok(LessonOutcome::Reviewed);
    }

    let level_before = store.level();
    store.grant_experience(lesson.xp_reward).await;
    let level_after = store.level();

    Ok(LessonOutcome::FirstCompletion {
        xp_awarded: lesson.xp_reward,
        new_level: (level_after > level_before).then_some(level_after),
    })
}

/// A learner's pass through one lesson's units.
pub struct LessonSession<'a> {
    lesson: &'a Lesson,
    unit: usize,
}

impl<'a> LessonSession<'a> {
    /// Start at the first unit.
    pub fn start(lesson: &'a Lesson) -> Self {
        Self { lesson, unit: 0 }
    }

    /// The lesson being viewed.
    pub fn lesson(&self) -> &'a Lesson {
        self.lesson
    }

    /// Current unit index.
    pub fn unit(&self) -> usize {
        self.unit
    }

    /// Title of the current unit, if the lesson lists units.
    pub fn unit_title(&self) -> Option<&'a str> {
        self.lesson.units.get(self.unit).map(String::as_str)
    }

    /// Whether the current unit is the last one.
    pub fn is_on_final_unit(&self) -> bool {
        self.unit == self.lesson.final_unit()
    }

    /// Move to the next unit. Stays put on the last unit.
    pub fn next_unit(&mut self) -> bool {
        if self.is_on_final_unit() {
            return false;
        }
        self.unit += 1;
        true
    }

    /// Move to the previous unit. Stays put on the first unit.
    pub fn previous_unit(&mut self) -> bool {
        if self.unit == 0 {
            return false;
        }
        self.unit -= 1;
        true
    }

    /// Finish the lesson from its final unit.
    pub async fn finish<R: ProgressRepository>(
        &self,
        store: &mut ProgressStore<R>,
    ) -> Result<LessonOutcome, LessonError> {
        if !self.is_on_final_unit() {
            return Err(LessonError::NotOnFinalUnit {
                lesson: self.lesson.id.to_string(),
                unit: self.unit + 1,
                total: self.lesson.final_unit() + 1,
            });
        }
        finish_lesson(store, self.lesson).await
    }
}
