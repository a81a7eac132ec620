//! Bassline CLI - bass practice progress from the terminal.
//!
//! Every invocation is one activation: the daily streak is refreshed before
//! the command runs.

use std::sync::Arc;

use anyhow::Result;
use bassline_core::{Clock, FixedClock, LessonCatalog, LocalClock, StreakTransition};
use bassline_progress::{
    activate, finish_lesson, LessonOutcome, OnboardingGate, ProfileSummary, ProgressStore,
    StoreConfig,
};
use bassline_storage::{FlagRepository, JsonStorage, ProgressRepository};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bassline")]
#[command(about = "Bass guitar practice progress tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory holding saved progress
    #[arg(short, long, default_value = ".bassline")]
    data_dir: std::path::PathBuf,

    /// Treat this date (YYYY-MM-DD) as today
    #[arg(long)]
    today: Option<NaiveDate>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the profile summary
    Status,
    /// List lessons and their state
    Lessons,
    /// Finish a lesson and collect its reward
    Finish {
        /// Lesson ID
        lesson: String,
    },
    /// Grant experience points
    Xp {
        /// Amount of XP
        amount: u64,
    },
    /// Grant a badge
    Badge {
        /// Badge name
        name: String,
    },
    /// Complete onboarding
    Onboard,
    /// Record a learned song
    Song,
    /// Record an uploaded cover
    Cover,
    /// Add received likes
    Likes {
        /// Number of likes
        amount: u64,
    },
    /// Add followers
    Followers {
        /// Number of followers
        amount: u64,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let storage = JsonStorage::new(&cli.data_dir).await?;
    let clock: Arc<dyn Clock> = match cli.today {
        Some(date) => Arc::new(FixedClock::new(date)),
        None => Arc::new(LocalClock),
    };

    let mut store = ProgressStore::open(storage.clone(), clock, StoreConfig::default()).await;
    match activate(&mut store).await {
        StreakTransition::Continued => println!("🔥 {} day streak!", store.progress().streak()),
        StreakTransition::Reset => println!("Welcome back! Streak started."),
        StreakTransition::SameDay => {}
    }

    let outcome = execute(cli.command, &mut store, storage).await;
    if outcome.is_ok() {
        info!("Progress saved to {}", cli.data_dir.display());
    }
    outcome
}

/// Run one command, then make sure every pending write reaches storage,
/// including when the command itself failed.
async fn execute<R, F>(command: Commands, store: &mut ProgressStore<R>, flags: F) -> Result<()>
where
    R: ProgressRepository,
    F: FlagRepository,
{
    let outcome = run_command(command, store, flags).await;
    let flushed = store.flush().await;
    outcome?;
    flushed?;
    Ok(())
}

async fn run_command<R, F>(command: Commands, store: &mut ProgressStore<R>, flags: F) -> Result<()>
where
    R: ProgressRepository,
    F: FlagRepository,
{
    let catalog = LessonCatalog::default();

    match command {
        Commands::Status => print_summary(&ProfileSummary::from(store.progress())),
        Commands::Lessons => {
            for lesson in catalog.lessons() {
                let state = if store.has_completed_lesson(lesson.id.as_str()) {
                    "DONE"
                } else if lesson.is_unlocked(store.progress()) {
                    "OPEN"
                } else {
                    "LOCKED"
                };
                println!(
                    "  {} | {:6} | {:12} | {:3} XP | {}",
                    lesson.id, state, lesson.difficulty, lesson.xp_reward, lesson.title
                );
            }
        }
        Commands::Finish { lesson } => {
            let Some(lesson) = catalog.get(lesson.trim()) else {
                anyhow::bail!("Unknown lesson: {}", lesson);
            };
            match finish_lesson(store, lesson).await? {
                LessonOutcome::FirstCompletion {
                    xp_awarded,
                    new_level,
                } => {
                    println!("Lesson complete! You earned {} XP", xp_awarded);
                    if let Some(level) = new_level {
                        println!("Level up! You are now level {}", level);
                    }
                }
                LessonOutcome::Reviewed => println!("Lesson reviewed (already completed)"),
            }
        }
        Commands::Xp { amount } => {
            store.grant_experience(amount).await;
            println!("{} XP, level {}", store.progress().experience(), store.level());
        }
        Commands::Badge { name } => {
            if store.grant_badge(&name).await {
                println!("Badge earned: {}", name.trim());
            } else {
                println!("Badge not added: {}", name);
            }
        }
        Commands::Onboard => {
            let mut gate = OnboardingGate::open(flags).await;
            if gate.complete(store).await {
                println!("Welcome aboard, {}!", store.starting_badge());
            } else {
                println!("Onboarding already completed");
            }
        }
        Commands::Song => {
            store.increment_songs_learned().await;
            println!("Songs learned: {}", store.progress().songs_learned());
        }
        Commands::Cover => {
            store.increment_covers_uploaded().await;
            println!("Covers uploaded: {}", store.progress().covers_uploaded());
        }
        Commands::Likes { amount } => {
            store.add_likes(amount).await;
            println!("Total likes: {}", store.progress().total_likes());
        }
        Commands::Followers { amount } => {
            store.add_followers(amount).await;
            println!("Followers: {}", store.progress().followers());
        }
    }
    Ok(())
}

fn print_summary(summary: &ProfileSummary) {
    println!("Bassline Profile");
    println!("  Level: {} ({} XP)", summary.level, summary.experience);
    println!(
        "  Next level: {} XP to go ({:.0}%)",
        summary.xp_to_next_level, summary.level_percentage
    );
    println!("  Streak: {} days", summary.streak);
    println!("  Lessons completed: {}", summary.lessons_completed);
    println!("  Songs learned: {}", summary.songs_learned);
    println!("  Covers shared: {}", summary.covers_uploaded);
    println!("  Total likes: {}", summary.total_likes);
    println!("  Followers: {}", summary.followers);
    println!("  Badges:");
    for badge in &summary.badges {
        println!("    - {}", badge);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bassline_storage::MemoryStorage;

    async fn store_with_pending_write(storage: &MemoryStorage) -> ProgressStore<MemoryStorage> {
        let clock = Arc::new(FixedClock::new(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()));
        let mut store = ProgressStore::open(storage.clone(), clock, StoreConfig::default()).await;
        storage.set_fail_writes(true).await;
        activate(&mut store).await;
        storage.set_fail_writes(false).await;
        assert!(store.is_dirty());
        store
    }

    #[tokio::test]
    async fn test_unknown_lesson_still_flushes() {
        let storage = MemoryStorage::new();
        let mut store = store_with_pending_write(&storage).await;

        let finish = Commands::Finish {
            lesson: "lesson-9".to_string(),
        };
        let err = execute(finish, &mut store, storage.clone()).await.unwrap_err();
        assert!(err.to_string().contains("lesson-9"));

        assert!(!store.is_dirty());
        let saved = storage.stored_progress().await.unwrap();
        assert_eq!(saved.streak(), 1);
    }

    #[tokio::test]
    async fn test_locked_lesson_still_flushes() {
        let storage = MemoryStorage::new();
        let mut store = store_with_pending_write(&storage).await;

        let finish = Commands::Finish {
            lesson: "lesson-2".to_string(),
        };
        assert!(execute(finish, &mut store, storage.clone()).await.is_err());

        assert!(!store.is_dirty());
        assert_eq!(storage.save_count().await, 1);
        assert!(storage.stored_progress().await.unwrap().completed_lessons().is_empty());
    }

    #[tokio::test]
    async fn test_finish_rewards_and_saves() {
        let storage = MemoryStorage::new();
        let clock = Arc::new(FixedClock::new(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()));
        let mut store = ProgressStore::open(storage.clone(), clock, StoreConfig::default()).await;

        let finish = Commands::Finish {
            lesson: " lesson-1 ".to_string(),
        };
        execute(finish, &mut store, storage.clone()).await.unwrap();
        assert_eq!(storage.stored_progress().await.unwrap().experience(), 50);
    }
}
