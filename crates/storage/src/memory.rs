//! In-memory storage for tests and ephemeral sessions.
//!
//! Clones share state, so a test can keep a handle after moving the storage
//! into a store and inspect or sabotage it from outside.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bassline_core::UserProgress;
use tokio::sync::Mutex;

use super::{FlagRepository, ProgressRepository, Result, StorageError};

#[derive(Debug, Default)]
struct State {
    progress: Option<UserProgress>,
    flags: HashMap<String, bool>,
    fail_reads: bool,
    fail_writes: bool,
    saves: usize,
}

/// Volatile storage backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    state: Arc<Mutex<State>>,
}

impl MemoryStorage {
    /// Empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with a record, as if saved by an earlier run.
    pub fn with_progress(progress: UserProgress) -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                progress: Some(progress),
                ..State::default()
            })),
        }
    }

    /// Make subsequent reads fail.
    pub async fn set_fail_reads(&self, fail: bool) {
        self.state.lock().await.fail_reads = fail;
    }

    /// Make subsequent writes fail.
    pub async fn set_fail_writes(&self, fail: bool) {
        self.state.lock().await.fail_writes = fail;
    }

    /// The last successfully saved record.
    pub async fn stored_progress(&self) -> Option<UserProgress> {
        self.state.lock().await.progress.clone()
    }

    /// Number of successful progress saves.
    pub async fn save_count(&self) -> usize {
        self.state.lock().await.saves
    }
}

#[async_trait]
impl ProgressRepository for MemoryStorage {
    async fn load_progress(&self) -> Result<Option<UserProgress>> {
        let state = self.state.lock().await;
        if state.fail_reads {
            return Err(StorageError::Other("storage unavailable".to_string()));
        }
        Ok(state.progress.clone())
    }

    async fn save_progress(&mut self, progress: &UserProgress) -> Result<()> {
        let mut state = self.state.lock().await;
        if state.fail_writes {
            return Err(StorageError::Other("write rejected".to_string()));
        }
        state.progress = Some(progress.clone());
        state.saves += 1;
        Ok(())
    }
}

#[async_trait]
impl FlagRepository for MemoryStorage {
    async fn load_flag(&self, name: &str) -> Result<bool> {
        let state = self.state.lock().await;
        if state.fail_reads {
            return Err(StorageError::Other("storage unavailable".to_string()));
        }
        Ok(state.flags.get(name).copied().unwrap_or(false))
    }

    async fn save_flag(&mut self, name: &str, value: bool) -> Result<()> {
        let mut state = self.state.lock().await;
        if state.fail_writes {
            return Err(StorageError::Other("write rejected".to_string()));
        }
        state.flags.insert(name.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_clones_share_state() {
        let storage = MemoryStorage::new();
        let mut writer = storage.clone();

        let mut progress = UserProgress::default();
        progress.grant_experience(30);
        writer.save_progress(&progress).await.unwrap();

        assert_eq!(storage.stored_progress().await, Some(progress));
        assert_eq!(storage.save_count().await, 1);
    }

    #[tokio::test]
    async fn test_failure_switches() {
        let mut storage = MemoryStorage::with_progress(UserProgress::default());
        storage.set_fail_reads(true).await;
        assert!(storage.load_progress().await.is_err());

        storage.set_fail_reads(false).await;
        assert!(storage.load_progress().await.unwrap().is_some());

        storage.set_fail_writes(true).await;
        assert!(storage.save_progress(&UserProgress::default()).await.is_err());
        assert!(storage.save_flag("x", true).await.is_err());
        assert_eq!(storage.save_count().await, 0);
    }
}
