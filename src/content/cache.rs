//! Disk snapshot of the last known-good content payload.
//!
//! When the record store is unreachable the content endpoint serves the
//! snapshot instead of dropping straight to the defaults. Writes happen
//! after every successful load or save; readers treat any failure as a
//! cache miss.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::{debug, warn};

use super::model::{Portal, SiteContent};

const SITE_FILE: &str = "site.json";
const PORTALS_FILE: &str = "portals.json";

/// Cache errors
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type CacheResult<T> = Result<T, CacheError>;

/// Reconciled content as served, both halves together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentSnapshot {
    pub site: SiteContent,
    pub portals: Vec<Portal>,
}

/// File-backed snapshot store. One file per entry under a single
/// directory, created on first write.
#[derive(Debug, Clone)]
pub struct SnapshotCache {
    dir: PathBuf,
}

impl SnapshotCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Build from `SNAPSHOT_CACHE_DIR`, defaulting to `cache/` next to
    /// the server binary. Under test this points into a per-process
    /// scratch directory instead, so suites neither read leftover
    /// snapshots from the working directory nor write into it.
    pub fn from_env() -> Self {
        #[cfg(test)]
        {
            return Self::new(test_scratch_dir());
        }
        #[cfg(not(test))]
        {
            let dir = std::env::var("SNAPSHOT_CACHE_DIR").unwrap_or_else(|_| "cache".to_string());
            Self::new(dir)
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Read the snapshot back. Missing files, unreadable files, and
    /// unparseable JSON all count as a miss.
    pub async fn get(&self) -> Option<ContentSnapshot> {
        let site = self.read_entry::<SiteContent>(SITE_FILE).await?;
        let portals = self.read_entry::<Vec<Portal>>(PORTALS_FILE).await?;
        debug!("Serving content snapshot from {:?}", self.dir);
        Some(ContentSnapshot { site, portals })
    }

    /// Persist both entries. The caller decides whether a failure is
    /// worth more than a log line.
    pub async fn put(&self, snapshot: &ContentSnapshot) -> CacheResult<()> {
        fs::create_dir_all(&self.dir).await?;
        self.write_entry(SITE_FILE, &snapshot.site).await?;
        self.write_entry(PORTALS_FILE, &snapshot.portals).await?;
        debug!("Wrote content snapshot to {:?}", self.dir);
        Ok(())
    }

    /// Health probe: confirm the cache directory exists and accepts
    /// writes without touching the real entries. Each probe uses its own
    /// file so concurrent checks never collide.
    pub async fn verify_writable(&self) -> CacheResult<()> {
        fs::create_dir_all(&self.dir).await?;
        let probe = self.dir.join(format!(".probe-{}", uuid::Uuid::new_v4()));
        fs::write(&probe, b"ok").await?;
        fs::remove_file(&probe).await?;
        Ok(())
    }

    async fn read_entry<T: serde::de::DeserializeOwned>(&self, file: &str) -> Option<T> {
        let path = self.dir.join(file);
        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) => {
                debug!("Snapshot cache miss for {:?}: {}", path, e);
                return None;
            }
        };
        match serde_json::from_str(&content) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Discarding unreadable snapshot entry {:?}: {}", path, e);
                None
            }
        }
    }

    /// Entries are staged to a sibling file and renamed into place, so an
    /// interrupted write leaves the previous entry intact instead of a
    /// torn one.
    async fn write_entry<T: Serialize>(&self, file: &str, value: &T) -> CacheResult<()> {
        let path = self.dir.join(file);
        let staging = self.dir.join(format!(".{file}.{}", uuid::Uuid::new_v4()));
        let json = serde_json::to_string_pretty(value)?;
        fs::write(&staging, json).await?;
        if let Err(e) = fs::rename(&staging, &path).await {
            let _ = fs::remove_file(&staging).await;
            return Err(e.into());
        }
        Ok(())
    }
}

#[cfg(test)]
fn test_scratch_dir() -> PathBuf {
    use once_cell::sync::Lazy;
    static DIR: Lazy<tempfile::TempDir> =
        Lazy::new(|| tempfile::tempdir().expect("scratch cache dir"));
    DIR.path().to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{defaults, reconcile};

    fn sample_snapshot() -> ContentSnapshot {
        ContentSnapshot {
            site: defaults::default_site(),
            portals: reconcile::reconcile_portals(Vec::new()),
        }
    }

    #[tokio::test]
    async fn test_put_then_get_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SnapshotCache::new(dir.path());

        let snapshot = sample_snapshot();
        cache.put(&snapshot).await.unwrap();

        let loaded = cache.get().await.unwrap();
        assert_eq!(loaded, snapshot);
    }

    #[tokio::test]
    async fn test_empty_directory_is_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SnapshotCache::new(dir.path());
        assert!(cache.get().await.is_none());
    }

    #[tokio::test]
    async fn test_corrupt_entry_is_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SnapshotCache::new(dir.path());

        cache.put(&sample_snapshot()).await.unwrap();
        tokio::fs::write(dir.path().join(SITE_FILE), "{not json")
            .await
            .unwrap();

        assert!(cache.get().await.is_none());
    }

    #[tokio::test]
    async fn test_missing_portals_entry_is_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SnapshotCache::new(dir.path());

        cache.put(&sample_snapshot()).await.unwrap();
        tokio::fs::remove_file(dir.path().join(PORTALS_FILE))
            .await
            .unwrap();

        assert!(cache.get().await.is_none());
    }

    #[tokio::test]
    async fn test_put_creates_the_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested").join("cache");
        let cache = SnapshotCache::new(&nested);

        cache.put(&sample_snapshot()).await.unwrap();
        assert!(nested.join(SITE_FILE).exists());
    }

    #[tokio::test]
    async fn test_verify_writable_succeeds_on_fresh_dir() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SnapshotCache::new(dir.path().join("probe-target"));
        cache.verify_writable().await.unwrap();
    }

    #[tokio::test]
    async fn test_put_leaves_no_staging_files_behind() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SnapshotCache::new(dir.path());
        cache.put(&sample_snapshot()).await.unwrap();
        cache.put(&sample_snapshot()).await.unwrap();

        let mut names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec![PORTALS_FILE, SITE_FILE]);
    }

    #[tokio::test]
    async fn test_env_cache_is_redirected_to_a_scratch_dir() {
        let cache = SnapshotCache::from_env();
        assert_ne!(cache.dir(), Path::new("cache"));
        assert!(cache.dir().is_absolute());
        // Every build in the process shares the same scratch directory.
        assert_eq!(SnapshotCache::from_env().dir(), cache.dir());
        cache.verify_writable().await.unwrap();
    }
}
