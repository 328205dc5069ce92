//! Time-based response cache with explicit invalidation.
//!
//! Replaces the implicit process-global caching the sheet export would
//! otherwise need: an explicit object owning a directory of JSON
//! entries, a TTL, and a `clear` operation.

use crate::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::env;
use std::fs;
use std::hash::{Hash, Hasher};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, warn};

/// Default time-to-live for cached responses (one hour).
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

/// A cached HTTP response body persisted as a JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheEntry {
    url: String,
    fetched_at: DateTime<Utc>,
    body: String,
}

/// Disk-backed response cache keyed by URL.
#[derive(Debug, Clone)]
pub struct ResponseCache {
    dir: PathBuf,
    ttl: Duration,
}

impl ResponseCache {
    /// Create a cache over a specific directory with the given TTL.
    pub fn new(dir: PathBuf, ttl: Duration) -> Self {
        Self { dir, ttl }
    }

    /// Create a cache at the default directory with the default TTL.
    pub fn with_defaults() -> Self {
        Self::new(Self::default_dir(), DEFAULT_TTL)
    }

    /// Get the default cache directory.
    ///
    /// Can be overridden with the `PORTFOLIO_TRACKER_CACHE_DIR`
    /// environment variable.
    pub fn default_dir() -> PathBuf {
        if let Ok(dir) = env::var("PORTFOLIO_TRACKER_CACHE_DIR") {
            return PathBuf::from(dir);
        }

        directories::BaseDirs::new()
            .map(|dirs| dirs.cache_dir().join("portfolio-tracker"))
            .unwrap_or_else(|| PathBuf::from(".portfolio-tracker-cache"))
    }

    /// The directory entries are stored under.
    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }

    /// The configured time-to-live.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Look up a fresh cached body for a URL. Expired, corrupt, or
    /// absent entries read as a miss.
    pub fn get(&self, url: &str) -> Option<String> {
        let path = self.entry_path(url);
        let content = fs::read_to_string(&path).ok()?;
        let entry: CacheEntry = match serde_json::from_str(&content) {
            Ok(entry) => entry,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "discarding corrupt cache entry");
                return None;
            }
        };

        // Hash collision guard
        if entry.url != url {
            return None;
        }

        let age = Utc::now().signed_duration_since(entry.fetched_at);
        if age.num_seconds() < 0 || age.num_seconds() as u64 >= self.ttl.as_secs() {
            debug!(url, age_secs = age.num_seconds(), "cache entry expired");
            return None;
        }

        debug!(url, "cache hit");
        Some(entry.body)
    }

    /// Store a response body for a URL.
    pub fn put(&self, url: &str, body: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;

        let entry = CacheEntry {
            url: url.to_string(),
            fetched_at: Utc::now(),
            body: body.to_string(),
        };
        let content = serde_json::to_string_pretty(&entry)?;
        fs::write(self.entry_path(url), content)?;
        Ok(())
    }

    /// Remove every cache entry. Returns how many were removed.
    pub fn clear(&self) -> Result<usize> {
        if !self.dir.exists() {
            return Ok(0);
        }

        let mut removed = 0;
        for dir_entry in fs::read_dir(&self.dir)? {
            let path = dir_entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                if let Err(e) = fs::remove_file(&path) {
                    warn!(path = %path.display(), error = %e, "failed to remove cache entry");
                } else {
                    removed += 1;
                }
            }
        }

        debug!(removed, "cache cleared");
        Ok(removed)
    }

    fn entry_path(&self, url: &str) -> PathBuf {
        let mut hasher = DefaultHasher::new();
        url.hash(&mut hasher);
        self.dir.join(format!("{:016x}.json", hasher.finish()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_put_get_roundtrip() {
        let dir = tempdir().unwrap();
        let cache = ResponseCache::new(dir.path().to_path_buf(), Duration::from_secs(60));

        cache.put("https://example.com/a", "body-a").unwrap();

        assert_eq!(cache.get("https://example.com/a").as_deref(), Some("body-a"));
        assert_eq!(cache.get("https://example.com/b"), None);
    }

    #[test]
    fn test_zero_ttl_always_misses() {
        let dir = tempdir().unwrap();
        let cache = ResponseCache::new(dir.path().to_path_buf(), Duration::ZERO);

        cache.put("https://example.com/a", "body-a").unwrap();

        assert_eq!(cache.get("https://example.com/a"), None);
    }

    #[test]
    fn test_clear_removes_entries() {
        let dir = tempdir().unwrap();
        let cache = ResponseCache::new(dir.path().to_path_buf(), Duration::from_secs(60));

        cache.put("https://example.com/a", "a").unwrap();
        cache.put("https://example.com/b", "b").unwrap();

        assert_eq!(cache.clear().unwrap(), 2);
        assert_eq!(cache.get("https://example.com/a"), None);
        assert_eq!(cache.clear().unwrap(), 0);
    }

    #[test]
    fn test_clear_missing_dir_is_ok() {
        let dir = tempdir().unwrap();
        let cache = ResponseCache::new(dir.path().join("never-created"), Duration::from_secs(60));

        assert_eq!(cache.clear().unwrap(), 0);
    }

    #[test]
    fn test_corrupt_entry_reads_as_miss() {
        let dir = tempdir().unwrap();
        let cache = ResponseCache::new(dir.path().to_path_buf(), Duration::from_secs(60));

        cache.put("https://example.com/a", "a").unwrap();
        let path = cache.entry_path("https://example.com/a");
        fs::write(&path, "not json").unwrap();

        assert_eq!(cache.get("https://example.com/a"), None);
    }

    #[test]
    fn test_overwrite_refreshes_body() {
        let dir = tempdir().unwrap();
        let cache = ResponseCache::new(dir.path().to_path_buf(), Duration::from_secs(60));

        cache.put("https://example.com/a", "old").unwrap();
        cache.put("https://example.com/a", "new").unwrap();

        assert_eq!(cache.get("https://example.com/a").as_deref(), Some("new"));
    }
}
