//! Daily streak transition.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Which branch a daily refresh took.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StreakTransition {
    /// Already activated today; nothing changed
    SameDay,
    /// Last activation was yesterday; streak grew by one
    Continued,
    /// First activation, a gap, or a last date in the future; streak is 1
    Reset,
}

/// Classify an activation on `today` given the last activation date.
///
/// The three outcomes are exhaustive. A last date after `today` (clock skew)
/// counts as a gap.
pub fn classify(last_activation: Option<NaiveDate>, today: NaiveDate) -> StreakTransition {
    match last_activation {
        Some(last) if last == today => StreakTransition::SameDay,
        Some(last) if today.pred_opt() == Some(last) => StreakTransition::Continued,
        _ => StreakTransition::Reset,
    }
}

/// Streak value after `transition` is applied to `current`.
pub fn next_streak(current: u64, transition: StreakTransition) -> u64 {
    match transition {
        StreakTransition::SameDay => current,
        StreakTransition::Continued => current.saturating_add(1),
        StreakTransition::Reset => 1,
    }
}
