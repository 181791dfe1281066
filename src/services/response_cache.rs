//! On-disk HTTP response cache
//!
//! Responses are keyed by the full request URL (query string included) and
//! expire a fixed duration after they were fetched. Expired entries are
//! purged when the cache is opened, so they are gone before the first lookup
//! of a run.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A cached registry response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedResponse {
    pub status: u16,
    pub body: String,
    pub fetched_at: DateTime<Utc>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CacheFile {
    #[serde(default)]
    entries: BTreeMap<String, CachedResponse>,
}

/// Response cache owned by the description resolver for one run
#[derive(Debug)]
pub struct ResponseCache {
    path: Option<PathBuf>,
    expire_after: Duration,
    entries: BTreeMap<String, CachedResponse>,
}

impl ResponseCache {
    /// Open the cache stored at `path`, purging expired entries
    ///
    /// A missing file starts an empty cache. An unreadable cache file is
    /// discarded rather than failing the run.
    pub fn open(path: impl Into<PathBuf>, expire_after: Duration) -> Result<Self> {
        Self::open_at(path, expire_after, Utc::now())
    }

    /// Like [`ResponseCache::open`], with an explicit current time
    pub fn open_at(
        path: impl Into<PathBuf>,
        expire_after: Duration,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let path = path.into();

        let entries = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read cache file {}", path.display()))?;
            match serde_json::from_str::<CacheFile>(&content) {
                Ok(file) => file.entries,
                Err(e) => {
                    warn!("Discarding unreadable cache {}: {}", path.display(), e);
                    BTreeMap::new()
                }
            }
        } else {
            BTreeMap::new()
        };

        let mut cache = Self {
            path: Some(path),
            expire_after,
            entries,
        };

        let purged = cache.purge_expired(now);
        if purged > 0 {
            debug!("Purged {} expired cache entries", purged);
            cache.save()?;
        }

        Ok(cache)
    }

    /// A cache that is never written to disk
    pub fn in_memory(expire_after: Duration) -> Self {
        Self {
            path: None,
            expire_after,
            entries: BTreeMap::new(),
        }
    }

    /// Remove entries older than the expiry, returning how many were removed
    pub fn purge_expired(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.entries.len();
        let expire_after = self.expire_after;
        self.entries
            .retain(|_, entry| now - entry.fetched_at < expire_after);
        before - self.entries.len()
    }

    /// Fresh cached response for a request key
    pub fn get(&self, key: &str, now: DateTime<Utc>) -> Option<&CachedResponse> {
        self.entries
            .get(key)
            .filter(|entry| now - entry.fetched_at < self.expire_after)
    }

    /// Store a response and persist the cache
    pub fn insert(&mut self, key: impl Into<String>, response: CachedResponse) -> Result<()> {
        self.entries.insert(key.into(), response);
        self.save()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create cache directory {}", parent.display()))?;
        }

        let file = CacheFile {
            entries: self.entries.clone(),
        };
        let content = serde_json::to_string(&file).context("Failed to serialize cache")?;

        // Atomic write
        let temp_path = path.with_extension("json.tmp");
        std::fs::write(&temp_path, content)
            .with_context(|| format!("Failed to write cache file {}", temp_path.display()))?;
        std::fs::rename(&temp_path, path)
            .with_context(|| format!("Failed to replace cache file {}", path.display()))?;

        Ok(())
    }
}
