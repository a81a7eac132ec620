//! Progress tracking
//!
//! The progress store and the flows built on it: activation, onboarding,
//! lesson completion and the profile summary.

#![warn(missing_docs)]

pub mod store;
pub mod lesson_flow;
pub mod activation;
pub mod profile;

pub use store::{ProgressStore, StoreConfig};
pub use lesson_flow::{finish_lesson, LessonError, LessonOutcome, LessonSession};
pub use activation::{activate, OnboardingGate, ONBOARDING_FLAG};
pub use profile::ProfileSummary;
