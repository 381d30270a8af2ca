//! EOP disk caching
//!
//! Keeps the most recently downloaded EOP table on disk so the
//! high-precision service can run offline.

use chrono::{DateTime, Duration, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use super::types::EopTable;
use crate::config::EopConfig;

const CACHE_FILE: &str = "eop.json";

/// Serialized cache entry stored as JSON on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedEop {
    pub source_url: String,
    pub fetched_at: DateTime<Utc>,
    pub table: EopTable,
}

/// EOP disk cache manager
pub struct EopCache {
    cache_dir: PathBuf,
    expiration_days: i64,
}

impl EopCache {
    /// Create a new EOP cache with the specified expiration threshold in days
    ///
    /// Resolves platform-specific cache directory:
    /// - macOS: ~/Library/Caches/earthframes/eop/
    /// - Linux: ~/.cache/earthframes/eop/
    /// - Windows: %LOCALAPPDATA%\earthframes\eop\
    pub fn new(expiration_days: i64) -> Result<Self, anyhow::Error> {
        let proj_dirs = ProjectDirs::from("", "", "earthframes")
            .ok_or_else(|| anyhow::anyhow!("Failed to resolve cache directory"))?;

        let cache_dir = proj_dirs.cache_dir().join("eop");
        Self::new_in_dir(cache_dir, expiration_days)
    }

    /// Platform cache with the configured expiration threshold
    pub fn from_config(config: &EopConfig) -> Result<Self, anyhow::Error> {
        Self::new(config.cache_expiration_days)
    }

    /// Create a new EOP cache rooted at a specific directory
    pub fn new_in_dir(cache_dir: PathBuf, expiration_days: i64) -> Result<Self, anyhow::Error> {
        fs::create_dir_all(&cache_dir)?;

        Ok(Self {
            cache_dir,
            expiration_days,
        })
    }

    /// Read the cached table
    ///
    /// Returns Ok(None) on a cache miss, Err if the file exists but cannot be
    /// read or parsed.
    pub fn read(&self) -> Result<Option<CachedEop>, anyhow::Error> {
        let path = self.cache_path();

        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&path)?;
        let cached: CachedEop = serde_json::from_str(&contents)?;

        Ok(Some(cached))
    }

    /// Write (or overwrite) the cached table
    pub fn write(&self, entry: &CachedEop) -> Result<(), anyhow::Error> {
        let contents = serde_json::to_string(entry)?;
        fs::write(self.cache_path(), contents)?;
        Ok(())
    }

    /// True while the entry is younger than the expiration threshold
    pub fn is_valid(&self, entry: &CachedEop) -> bool {
        let age = Utc::now().signed_duration_since(entry.fetched_at);
        age < Duration::days(self.expiration_days)
    }

    /// Cached table for `url`, fresh or stale. Entries from another source
    /// are ignored.
    pub fn table_for(&self, url: &str) -> Result<Option<EopTable>, anyhow::Error> {
        Ok(self
            .read()?
            .filter(|entry| entry.source_url == url)
            .map(|entry| entry.table))
    }

    fn cache_path(&self) -> PathBuf {
        self.cache_dir.join(CACHE_FILE)
    }
}
