//! Application activation and first-run onboarding.

use bassline_core::StreakTransition;
use bassline_storage::{FlagRepository, ProgressRepository};
use tracing::{info, warn};

use crate::store::ProgressStore;

/// Flag recording that onboarding has been completed.
pub const ONBOARDING_FLAG: &str = "has-completed-onboarding";

/// Start of an application activation. Refreshes the daily streak so that
/// anything rendered afterwards sees the current value.
pub async fn activate<R: ProgressRepository>(store: &mut ProgressStore<R>) -> StreakTransition {
    store.refresh_daily_streak().await
}

/// Guards the one-time onboarding reward.
///
/// The completion flag lives in its own repository entry and is not part of
/// the progress record.
pub struct OnboardingGate<F: FlagRepository> {
    flags: F,
    completed: bool,
}

impl<F: FlagRepository> OnboardingGate<F> {
    /// Read the onboarding flag. An unreadable flag counts as not completed.
    pub async fn open(flags: F) -> Self {
        let completed = match flags.load_flag(ONBOARDING_FLAG).await {
            Ok(value) => value,
            Err(e) => {
                warn!("Could not read onboarding flag: {}", e);
                false
            }
        };
        Self { flags, completed }
    }

    /// Whether onboarding has already been completed.
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Finish onboarding. The starting badge is granted only the first time.
    ///
    /// Returns `true` if this call completed onboarding.
    pub async fn complete<R: ProgressRepository>(&mut self, store: &mut ProgressStore<R>) -> bool {
        if self.completed {
            return false;
        }

        let badge = store.starting_badge().clone();
        store.grant_badge(badge.as_str()).await;

        self.completed = true;
        if let Err(e) = self.flags.save_flag(ONBOARDING_FLAG, true).await {
            warn!("Failed to save onboarding flag: {}", e);
        }
        info!("Onboarding completed");
        true
    }
}
