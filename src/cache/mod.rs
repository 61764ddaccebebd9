use anyhow::{Context, Result};
use dashmap::DashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::config::unwrap_prior_result;
use crate::core::result::AnalyzerQueryResult;

/// Persisted results keyed by `(analyzer name, identifier)`.
///
/// A failed read is reported as an error so the driver can log it, but the
/// driver always treats it as a miss. Writes are last-write-wins; no locking
/// is performed around concurrent writers.
pub trait CacheStore {
    fn get(&self, analyzer_name: &str, identifier: &str) -> Result<Option<AnalyzerQueryResult>>;
    fn put(
        &self,
        analyzer_name: &str,
        identifier: &str,
        result: &AnalyzerQueryResult,
    ) -> Result<()>;
}

/// In-memory cache store for tests and embedding.
#[derive(Default)]
pub struct MemoryCacheStore {
    entries: DashMap<(String, String), AnalyzerQueryResult>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CacheStore for MemoryCacheStore {
    fn get(&self, analyzer_name: &str, identifier: &str) -> Result<Option<AnalyzerQueryResult>> {
        Ok(self
            .entries
            .get(&(analyzer_name.to_string(), identifier.to_string()))
            .map(|entry| entry.clone()))
    }

    fn put(
        &self,
        analyzer_name: &str,
        identifier: &str,
        result: &AnalyzerQueryResult,
    ) -> Result<()> {
        self.entries.insert(
            (analyzer_name.to_string(), identifier.to_string()),
            result.clone(),
        );
        Ok(())
    }
}

/// Disk-backed cache store with a memory front.
///
/// One JSON file per key; results are persisted in the canonical
/// `AnalyzerQueryResult` shape so callers can feed them back in as
/// `targetProjectResult` / `referenceProjectResult`.
pub struct DiskCacheStore {
    memory: DashMap<(String, String), AnalyzerQueryResult>,
    cache_dir: Option<PathBuf>,
}

impl DiskCacheStore {
    pub fn new(cache_dir: Option<PathBuf>) -> Self {
        let resolved_dir =
            cache_dir.unwrap_or_else(|| std::env::temp_dir().join("pairscan_cache"));
        let cache_dir = match fs::create_dir_all(&resolved_dir) {
            Ok(()) => Some(resolved_dir),
            Err(err) => {
                eprintln!(
                    "Warning: Failed to initialize disk cache at {}: {err}",
                    resolved_dir.display()
                );
                None
            }
        };

        Self {
            memory: DashMap::new(),
            cache_dir,
        }
    }

    /// Build an in-memory-only store without touching the filesystem.
    pub fn in_memory_only() -> Self {
        Self {
            memory: DashMap::new(),
            cache_dir: None,
        }
    }

    fn entry_path(&self, analyzer_name: &str, identifier: &str) -> Option<PathBuf> {
        self.cache_dir
            .as_ref()
            .map(|dir| dir.join(format!("{analyzer_name}-{identifier}.json")))
    }

    fn load_from_disk(&self, entry_path: &Path) -> Result<AnalyzerQueryResult> {
        let raw = fs::read_to_string(entry_path)
            .with_context(|| format!("failed to read cache entry {}", entry_path.display()))?;
        let value: serde_json::Value = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse cache entry {}", entry_path.display()))?;
        unwrap_prior_result(&value)
    }
}

impl CacheStore for DiskCacheStore {
    fn get(&self, analyzer_name: &str, identifier: &str) -> Result<Option<AnalyzerQueryResult>> {
        let key = (analyzer_name.to_string(), identifier.to_string());
        if let Some(entry) = self.memory.get(&key) {
            return Ok(Some(entry.clone()));
        }

        if let Some(entry_path) = self.entry_path(analyzer_name, identifier) {
            if entry_path.exists() {
                let result = self.load_from_disk(&entry_path)?;
                self.memory.insert(key, result.clone());
                return Ok(Some(result));
            }
        }

        Ok(None)
    }

    fn put(
        &self,
        analyzer_name: &str,
        identifier: &str,
        result: &AnalyzerQueryResult,
    ) -> Result<()> {
        self.memory.insert(
            (analyzer_name.to_string(), identifier.to_string()),
            result.clone(),
        );

        if let Some(entry_path) = self.entry_path(analyzer_name, identifier) {
            let data = serde_json::to_vec(result)?;
            fs::write(&entry_path, data)
                .with_context(|| format!("failed to write cache entry {}", entry_path.display()))?;
        }

        Ok(())
    }
}
