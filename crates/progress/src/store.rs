//! Progress store - single owner of the learner's record.

use std::sync::Arc;

use bassline_core::{BadgeName, Clock, LessonId, LevelProgress, StreakTransition, UserProgress};
use bassline_storage::{ProgressRepository, Result};
use tracing::{debug, info, warn};

/// Store configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Badge a brand new record starts with
    pub starting_badge: BadgeName,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            starting_badge: BadgeName::rookie(),
        }
    }
}

/// Owns the [`UserProgress`] record and persists it after every mutation.
///
/// Mutations never fail. A failed write is logged, the in-memory record is
/// kept, and the write is retried on the next mutation or on [`flush`].
///
/// [`flush`]: ProgressStore::flush
pub struct ProgressStore<R: ProgressRepository> {
    repository: R,
    clock: Arc<dyn Clock>,
    config: StoreConfig,
    progress: UserProgress,
    dirty: bool,
}

impl<R: ProgressRepository> ProgressStore<R> {
    /// Load the record from `repository`, or start fresh.
    ///
    /// An unreadable repository degrades to a fresh record.
    pub async fn open(repository: R, clock: Arc<dyn Clock>, config: StoreConfig) -> Self {
        let progress = match repository.load_progress().await {
            Ok(Some(progress)) => {
                debug!(
                    "Loaded progress: {} XP, streak {}",
                    progress.experience(),
                    progress.streak()
                );
                progress
            }
            Ok(None) => {
                info!("No saved progress, starting fresh");
                UserProgress::new(config.starting_badge.clone())
            }
            Err(e) => {
                warn!("Could not read saved progress, starting fresh: {}", e);
                UserProgress::new(config.starting_badge.clone())
            }
        };

        Self {
            repository,
            clock,
            config,
            progress,
            dirty: false,
        }
    }

    // === Reads ===

    /// Read-only view of the record.
    pub fn progress(&self) -> &UserProgress {
        &self.progress
    }

    /// Current level.
    pub fn level(&self) -> u64 {
        self.progress.level()
    }

    /// Progress towards the next level.
    pub fn level_progress(&self) -> LevelProgress {
        self.progress.level_progress()
    }

    /// Whether a lesson is complete.
    pub fn has_completed_lesson(&self, lesson: &str) -> bool {
        self.progress.has_completed(lesson)
    }

    /// Whether a badge is held.
    pub fn has_badge(&self, badge: &str) -> bool {
        self.progress.has_badge(badge)
    }

    /// Badge new records start with.
    pub fn starting_badge(&self) -> &BadgeName {
        &self.config.starting_badge
    }

    /// Whether the latest state has not reached storage yet.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The repository backing this store.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    // === Mutations ===

    /// Add experience. Zero is ignored.
    pub async fn grant_experience(&mut self, amount: u64) {
        if amount == 0 {
            debug!("Ignoring zero experience grant");
            return self.retry_if_dirty().await;
        }
        let before = self.progress.level();
        self.progress.grant_experience(amount);
        let after = self.progress.level();
        if after > before {
            info!("Level up: {} -> {}", before, after);
        }
        self.persist().await;
    }

    /// Mark a lesson complete. Returns `true` only for a new completion.
    ///
    /// Never grants experience; the caller decides whether a completion is
    /// worth a reward.
    pub async fn complete_lesson(&mut self, lesson: &str) -> bool {
        let lesson = match LessonId::parse(lesson) {
            Ok(id) => id,
            Err(e) => {
                warn!("Rejected lesson completion: {}", e);
                return false;
            }
        };
        if !self.progress.complete_lesson(lesson.clone()) {
            debug!("Lesson {} already complete", lesson);
            self.retry_if_dirty().await;
            return false;
        }
        info!("Completed lesson {}", lesson);
        self.persist().await;
        true
    }

    /// Apply today's activation to the streak.
    ///
    /// Call once per activation before reading the streak.
    pub async fn refresh_daily_streak(&mut self) -> StreakTransition {
        let today = self.clock.today();
        let transition = self.progress.refresh_streak(today);
        match transition {
            StreakTransition::SameDay => {
                debug!("Already active on {}", today);
                self.retry_if_dirty().await;
            }
            StreakTransition::Continued | StreakTransition::Reset => {
                info!(
                    "Streak {:?}: {} day(s) as of {}",
                    transition,
                    self.progress.streak(),
                    today
                );
                self.persist().await;
            }
        }
        transition
    }

    /// Add a badge. Returns `true` only if it was not held before.
    pub async fn grant_badge(&mut self, badge: &str) -> bool {
        let badge = match BadgeName::parse(badge) {
            Ok(name) => name,
            Err(e) => {
                warn!("Rejected badge grant: {}", e);
                return false;
            }
        };
        if !self.progress.grant_badge(badge.clone()) {
            debug!("Badge {} already held", badge);
            self.retry_if_dirty().await;
            return false;
        }
        info!("Earned badge {}", badge);
        self.persist().await;
        true
    }

    /// Count a learned song.
    pub async fn increment_songs_learned(&mut self) {
        self.progress.increment_songs_learned();
        self.persist().await;
    }

    /// Count an uploaded cover.
    pub async fn increment_covers_uploaded(&mut self) {
        self.progress.increment_covers_uploaded();
        self.persist().await;
    }

    /// Add received likes. Zero is ignored.
    pub async fn add_likes(&mut self, amount: u64) {
        if amount == 0 {
            return self.retry_if_dirty().await;
        }
        self.progress.add_likes(amount);
        self.persist().await;
    }

    /// Add followers. Zero is ignored.
    pub async fn add_followers(&mut self, amount: u64) {
        if amount == 0 {
            return self.retry_if_dirty().await;
        }
        self.progress.add_followers(amount);
        self.persist().await;
    }

    /// Write the record now if an earlier write failed.
    pub async fn flush(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        self.repository.save_progress(&self.progress).await?;
        self.dirty = false;
        info!("Pending progress written");
        Ok(())
    }

    async fn persist(&mut self) {
        match self.repository.save_progress(&self.progress).await {
            Ok(()) => self.dirty = false,
            Err(e) => {
                warn!("Failed to save progress, will retry: {}", e);
                self.dirty = true;
            }
        }
    }

    async fn retry_if_dirty(&mut self) {
        if self.dirty {
            self.persist().await;
        }
    }
}
