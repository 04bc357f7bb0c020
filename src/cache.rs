//! File-backed snapshot cache with a freshness gate.
//!
//! The filesystem modification time is the freshness oracle. `get` refuses
//! entries older than the caller's threshold; `force_get` ignores age and
//! exists so the fetch orchestration can fall back to a stale-but-coherent
//! snapshot when a fresh one cannot be assembled.

use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

/// Persists and retrieves a single blob per logical key under one root
/// directory. None of its operations surface I/O errors to the caller: reads
/// degrade to `None` and writes are fire-and-forget (logged only).
#[derive(Debug, Clone)]
pub struct SnapshotCache {
    root: PathBuf,
}

impl SnapshotCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }

    /// Returns the stored blob for `key` iff its last-modified timestamp is
    /// within `max_age` of now. Stale or unreadable entries are a miss.
    pub async fn get(&self, key: &str, max_age: Duration) -> Option<String> {
        let path = self.path(key);
        let age = match modification_age(&path).await {
            Some(age) => age,
            None => {
                debug!("Cache miss: no entry at {}", path.display());
                return None;
            }
        };
        if age > max_age {
            debug!(
                "Cache miss: entry at {} is {}s old (threshold {}s)",
                path.display(),
                age.as_secs(),
                max_age.as_secs()
            );
            return None;
        }
        read_or_none(&path).await
    }

    /// Returns the stored blob for `key` regardless of age; `None` if absent
    /// or unreadable.
    pub async fn force_get(&self, key: &str) -> Option<String> {
        read_or_none(&self.path(key)).await
    }

    /// Overwrites the stored blob for `key`, creating the storage location if
    /// needed. Failures are logged, not surfaced.
    pub async fn set(&self, key: &str, value: &str) {
        let path = self.path(key);
        if let Err(e) = tokio::fs::create_dir_all(&self.root).await {
            warn!("Unable to create cache directory {}: {e}", self.root.display());
            return;
        }
        match tokio::fs::write(&path, value).await {
            Ok(()) => debug!("Saved cache entry at {}", path.display()),
            Err(e) => warn!("Unable to write cache entry at {}: {e}", path.display()),
        }
    }
}

/// The age of the file at `path`, or `None` if it cannot be determined. A
/// modification time in the future counts as age zero.
async fn modification_age(path: &Path) -> Option<Duration> {
    let metadata = match tokio::fs::metadata(path).await {
        Ok(m) => m,
        Err(_) => return None,
    };
    let modified = match metadata.modified() {
        Ok(m) => m,
        Err(e) => {
            warn!("Unable to read modification time of {}: {e}", path.display());
            return None;
        }
    };
    Some(modified.elapsed().unwrap_or_default())
}

async fn read_or_none(path: &Path) -> Option<String> {
    match tokio::fs::read_to_string(path).await {
        Ok(contents) => Some(contents),
        Err(e) => {
            debug!("Unable to read cache entry at {}: {e}", path.display());
            None
        }
    }
}
