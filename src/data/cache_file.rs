use std::fs::File;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

#[cfg(debug_assertions)]
use crate::config::debug::PRINT_SERDE;
use crate::config::{CACHE_VERSION, cache_filename};
use crate::data::prepare::{PrepareConfig, PreparedTable};
#[cfg(debug_assertions)]
use crate::utils::time_utils::how_many_seconds_ago;
use crate::utils::time_utils::local_now_as_timestamp_ms;

/// Identity of an uploaded file's content. Used as the memo and cache key.
pub fn fingerprint(bytes: &[u8]) -> u64 {
    let mut hasher = DefaultHasher::new();
    bytes.hash(&mut hasher);
    hasher.finish()
}

/// Key for one prepared table: the content fingerprint plus every setting that
/// changes what `prepare_csv` produces for that content.
pub fn cache_key(bytes: &[u8], config: &PrepareConfig) -> u64 {
    let mut hasher = DefaultHasher::new();
    fingerprint(bytes).hash(&mut hasher);
    config.hash(&mut hasher);
    hasher.finish()
}

/// Serialized prepared-table wrapper.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CacheFile {
    pub version: f64,
    pub timestamp_ms: i64,
    pub fingerprint: u64,
    pub data: PreparedTable,
}

impl CacheFile {
    pub fn new(fingerprint: u64, data: PreparedTable, version: f64) -> Self {
        Self {
            version,
            timestamp_ms: local_now_as_timestamp_ms(),
            fingerprint,
            data,
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let file = File::open(path).context(format!("Failed to open cache file: {:?}", path))?;
        let mut reader = BufReader::new(file);
        let cache = bincode::deserialize_from(&mut reader)
            .context(format!("Failed to deserialize cache: {:?}", path))?;
        Ok(cache)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .context(format!("Failed to create directory: {}", parent.display()))?;
        }
        let file =
            File::create(path).context(format!("Failed to create file: {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        bincode::serialize_into(&mut writer, self)
            .context(format!("Failed to serialize cache to: {}", path.display()))
    }

    pub fn cache_path(dir: &Path, fingerprint: u64) -> PathBuf {
        dir.join(cache_filename(fingerprint))
    }
}

/// Loads the prepared table for `fingerprint` (see [`cache_key`]) from `dir`.
/// Any mismatch (version, fingerprint) is an error, which callers treat as a miss.
pub fn load_cached_table(dir: &Path, fingerprint: u64) -> Result<PreparedTable> {
    let full_path = CacheFile::cache_path(dir, fingerprint);

    #[cfg(debug_assertions)]
    if PRINT_SERDE {
        log::info!("Checking local cache at {:?}...", full_path);
    }
    let cache = CacheFile::load_from_path(&full_path)?;

    if cache.version != CACHE_VERSION {
        bail!(
            "Cache version mismatch: file v{} vs required v{}",
            cache.version,
            CACHE_VERSION
        );
    }

    if cache.fingerprint != fingerprint {
        bail!(
            "Cache fingerprint mismatch: file has {:016x}, expected {:016x}",
            cache.fingerprint,
            fingerprint
        );
    }

    #[cfg(debug_assertions)]
    if PRINT_SERDE {
        log::info!(
            "✅ Cache valid: v{}, {}s old, {} rows",
            cache.version,
            how_many_seconds_ago(cache.timestamp_ms),
            cache.data.table.len()
        );
    }

    Ok(cache.data)
}

/// Writes a prepared table to `dir`, keyed by `fingerprint`.
pub fn write_cached_table(dir: &Path, fingerprint: u64, prepared: &PreparedTable) -> Result<()> {
    let full_path = CacheFile::cache_path(dir, fingerprint);

    #[cfg(debug_assertions)]
    let start_time = PRINT_SERDE.then(|| {
        log::info!("Writing cache to disk: {:?}...", full_path);
        std::time::Instant::now()
    });

    let cache = CacheFile::new(fingerprint, prepared.clone(), CACHE_VERSION);
    cache.save_to_path(&full_path)?;

    #[cfg(debug_assertions)]
    if let Some(start) = start_time {
        log::info!(
            "✅ Cache written: {:?} in {:.3}s",
            full_path,
            start.elapsed().as_secs_f64()
        );
    }

    Ok(())
}
