//! User progress record - experience, streak, lessons, badges and counters.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::id::{BadgeName, LessonId};
use crate::level::{level_for, LevelProgress};
use crate::streak::{classify, next_streak, StreakTransition};

/// The learner's durable progress.
///
/// Fields are private so every change goes through a method that keeps the
/// record consistent: the level is always derived from experience, the sets
/// never hold duplicates, and counters only grow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ProgressDocument", into = "ProgressDocument")]
pub struct UserProgress {
    experience: u64,
    streak: u64,
    last_activation: Option<NaiveDate>,
    completed_lessons: BTreeSet<LessonId>,
    badges: BTreeSet<BadgeName>,
    songs_learned: u64,
    covers_uploaded: u64,
    total_likes: u64,
    followers: u64,
}

impl UserProgress {
    /// A fresh record holding only the given starting badge.
    pub fn new(starting_badge: BadgeName) -> Self {
        Self {
            experience: 0,
            streak: 0,
            last_activation: None,
            completed_lessons: BTreeSet::new(),
            badges: BTreeSet::from([starting_badge]),
            songs_learned: 0,
            covers_uploaded: 0,
            total_likes: 0,
            followers: 0,
        }
    }

    // === Reads ===

    /// Cumulative experience.
    pub fn experience(&self) -> u64 {
        self.experience
    }

    /// Current level, derived from experience.
    pub fn level(&self) -> u64 {
        level_for(self.experience)
    }

    /// Progress inside the current level.
    pub fn level_progress(&self) -> LevelProgress {
        LevelProgress::from_experience(self.experience)
    }

    /// Consecutive activation days.
    pub fn streak(&self) -> u64 {
        self.streak
    }

    /// Date of the most recent streak-qualifying activation.
    pub fn last_activation(&self) -> Option<NaiveDate> {
        self.last_activation
    }

    /// Completed lessons.
    pub fn completed_lessons(&self) -> &BTreeSet<LessonId> {
        &self.completed_lessons
    }

    /// Whether the lesson has been completed.
    pub fn has_completed(&self, lesson: &str) -> bool {
        self.completed_lessons.contains(lesson)
    }

    /// Earned badges.
    pub fn badges(&self) -> &BTreeSet<BadgeName> {
        &self.badges
    }

    /// Whether the badge has been earned.
    pub fn has_badge(&self, badge: &str) -> bool {
        self.badges.contains(badge)
    }

    /// Songs learned.
    pub fn songs_learned(&self) -> u64 {
        self.songs_learned
    }

    /// Covers uploaded.
    pub fn covers_uploaded(&self) -> u64 {
        self.covers_uploaded
    }

    /// Likes received across all covers.
    pub fn total_likes(&self) -> u64 {
        self.total_likes
    }

    /// Follower count.
    pub fn followers(&self) -> u64 {
        self.followers
    }

    // === Mutations ===

    /// Add experience. Saturates instead of overflowing.
    pub fn grant_experience(&mut self, amount: u64) {
        self.experience = self.experience.saturating_add(amount);
    }

    /// Mark a lesson complete. Returns `true` if it was not complete before.
    pub fn complete_lesson(&mut self, lesson: LessonId) -> bool {
        self.completed_lessons.insert(lesson)
    }

    /// Add a badge. Returns `true` if it was not held before.
    pub fn grant_badge(&mut self, badge: BadgeName) -> bool {
        self.badges.insert(badge)
    }

    /// Apply an activation on `today` to the streak.
    pub fn refresh_streak(&mut self, today: NaiveDate) -> StreakTransition {
        let transition = classify(self.last_activation, today);
        if transition != StreakTransition::SameDay {
            self.streak = next_streak(self.streak, transition);
            self.last_activation = Some(today);
        }
        transition
    }

    /// Count one more learned song.
    pub fn increment_songs_learned(&mut self) {
        self.songs_learned = self.songs_learned.saturating_add(1);
    }

    /// Count one more uploaded cover.
    pub fn increment_covers_uploaded(&mut self) {
        self.covers_uploaded = self.covers_uploaded.saturating_add(1);
    }

    /// Add received likes.
    pub fn add_likes(&mut self, amount: u64) {
        self.total_likes = self.total_likes.saturating_add(amount);
    }

    /// Add followers.
    pub fn add_followers(&mut self, amount: u64) {
        self.followers = self.followers.saturating_add(amount);
    }
}

impl Default for UserProgress {
    fn default() -> Self {
        Self::new(BadgeName::rookie())
    }
}

/// On-disk layout of [`UserProgress`].
///
/// `level` is written for readers of the raw document and ignored on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProgressDocument {
    experience: u64,
    #[serde(default)]
    level: u64,
    #[serde(default)]
    streak: u64,
    #[serde(default)]
    last_activation_date: Option<NaiveDate>,
    #[serde(default)]
    completed_lessons: BTreeSet<LessonId>,
    #[serde(default)]
    badges: BTreeSet<BadgeName>,
    #[serde(default)]
    songs_learned_count: u64,
    #[serde(default)]
    covers_uploaded_count: u64,
    #[serde(default)]
    total_likes: u64,
    #[serde(default)]
    follower_count: u64,
}

impl From<ProgressDocument> for UserProgress {
    fn from(doc: ProgressDocument) -> Self {
        Self {
            experience: doc.experience,
            streak: doc.streak,
            last_activation: doc.last_activation_date,
            completed_lessons: doc.completed_lessons,
            badges: doc.badges,
            songs_learned: doc.songs_learned_count,
            covers_uploaded: doc.covers_uploaded_count,
            total_likes: doc.total_likes,
            followers: doc.follower_count,
        }
    }
}

impl From<UserProgress> for ProgressDocument {
    fn from(progress: UserProgress) -> Self {
        Self {
            level: progress.level(),
            experience: progress.experience,
            streak: progress.streak,
            last_activation_date: progress.last_activation,
            completed_lessons: progress.completed_lessons,
            badges: progress.badges,
            songs_learned_count: progress.songs_learned,
            covers_uploaded_count: progress.covers_uploaded,
            total_likes: progress.total_likes,
            follower_count: progress.followers,
        }
    }
}
