//! JSON file storage implementation.
//!
//! Each key is one pretty-printed JSON document in the data directory
//! (`user-progress.json`, `has-completed-onboarding.json`, ...). Writes go
//! to a sibling `.tmp` file that is renamed over the target, so an
//! interrupted write leaves the previous document in place. A progress
//! document that cannot be read is moved to `user-progress.json.corrupt`
//! before anything can overwrite it.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bassline_core::UserProgress;
use serde::{de::DeserializeOwned, Serialize};
use tokio::fs;
use tracing::{debug, warn};

use super::{FlagRepository, ProgressRepository, Result};

/// Storage key of the progress record.
pub const PROGRESS_KEY: &str = "user-progress";

/// File-based JSON storage backend.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    root: PathBuf,
}

impl JsonStorage {
    /// Open storage rooted at `root`, creating the directory if needed.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    /// Directory holding the documents.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn document_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    async fn write_document<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let path = self.document_path(key);
        let tmp = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(value)?;
        fs::write(&tmp, json.as_bytes()).await?;
        fs::rename(&tmp, &path).await?;
        debug!("Wrote {}", path.display());
        Ok(())
    }

    /// Move an unreadable document out of the way of future writes.
    async fn set_aside(&self, path: &Path) {
        let backup = path.with_extension("json.corrupt");
        match fs::rename(path, &backup).await {
            Ok(()) => warn!("Moved unreadable {} to {}", path.display(), backup.display()),
            Err(e) => warn!("Could not set aside {}: {}", path.display(), e),
        }
    }
}

#[async_trait]
impl ProgressRepository for JsonStorage {
    async fn load_progress(&self) -> Result<Option<UserProgress>> {
        let path = self.document_path(PROGRESS_KEY);
        match read_json(&path).await {
            Err(e) => {
                self.set_aside(&path).await;
                Err(e)
            }
            loaded => loaded,
        }
    }

    async fn save_progress(&mut self, progress: &UserProgress) -> Result<()> {
        self.write_document(PROGRESS_KEY, progress).await
    }
}

#[async_trait]
impl FlagRepository for JsonStorage {
    async fn load_flag(&self, name: &str) -> Result<bool> {
        Ok(read_json(&self.document_path(name)).await?.unwrap_or(false))
    }

    async fn save_flag(&mut self, name: &str, value: bool) -> Result<()> {
        self.write_document(name, &value).await
    }
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match fs::read_to_string(path).await {
        Ok(json) => {
            let value = serde_json::from_str(&json)?;
            Ok(Some(value))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}
