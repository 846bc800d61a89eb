//! Disk-backed cache store with ring-tracked admissions.

use crate::cache::path::{blob_directory, blob_path};
use crate::cache::ring::SlotRing;
use crate::cache::types::{CacheError, Timestamp};
use crate::config::Config;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Fraction of the flash capacity an admission may fill before a full
/// eviction is forced. Leaves headroom for filesystem metadata on small
/// flash partitions.
const HIGH_WATER_FRACTION: f64 = 0.9;

/// Bounded key-to-blob store on a capacity-constrained storage root.
///
/// Blob files named after their timestamp key live under `<root>/cache/`;
/// file presence is the source of truth for lookups. A fixed [`SlotRing`]
/// tracks admissions so the store knows when one replay window's worth of
/// frames has cycled through, and a high-water check against the configured
/// flash capacity triggers bulk eviction before space runs out.
pub struct CacheStore {
    root: PathBuf,
    flash_capacity_bytes: u64,
    ring: SlotRing,
}

impl CacheStore {
    /// Create a store rooted at `root`.
    ///
    /// Validates the ring geometry (`display_count` must not exceed
    /// `cache_capacity`) but does not touch the filesystem; call
    /// [`initialize`](Self::initialize) before use.
    pub fn new(root: impl Into<PathBuf>, config: &Config) -> Result<Self, CacheError> {
        Ok(Self {
            root: root.into(),
            flash_capacity_bytes: config.flash_capacity_bytes,
            ring: SlotRing::new(config.cache_capacity, config.display_count)?,
        })
    }

    /// Mount the storage root, reformatting once if the first attempt fails.
    ///
    /// A reformat deletes the entire storage root before recreating it, so
    /// it destroys all prior on-disk state. A successful plain mount leaves
    /// existing blob files in place; only the ring metadata is reset.
    pub fn initialize(&mut self) -> Result<(), CacheError> {
        if let Err(mount_err) = self.mount() {
            warn!(
                root = %self.root.display(),
                error = %mount_err,
                "storage mount failed, attempting format"
            );
            self.format().map_err(|source| CacheError::MountFailed {
                path: self.root.clone(),
                source,
            })?;
            self.mount().map_err(|source| CacheError::MountFailed {
                path: self.root.clone(),
                source,
            })?;
        }

        self.ring.clear();

        info!(
            root = %self.root.display(),
            total_bytes = self.flash_capacity_bytes,
            used_bytes = self.used_bytes(),
            "cache storage mounted"
        );
        Ok(())
    }

    /// The path a blob for `key` lives at, creating the blob directory if
    /// it is absent. Safe to call repeatedly.
    pub fn path_for(&self, key: &Timestamp) -> Result<PathBuf, CacheError> {
        fs::create_dir_all(blob_directory(&self.root))?;
        Ok(blob_path(&self.root, key))
    }

    /// Whether a blob for `key` is present on disk.
    ///
    /// Independent of ring metadata: a key displaced from the ring still
    /// exists until an eviction removes its file.
    pub fn exists(&self, key: &Timestamp) -> bool {
        blob_path(&self.root, key).exists()
    }

    /// Write a blob for `key` and record it in the ring.
    ///
    /// Empty payloads are rejected before anything else so a bad call can
    /// never trigger the destructive space check. If the projected used
    /// space would cross the high-water mark, every cached blob is evicted
    /// first. A short write is a total failure; the partial file is not
    /// rolled back and must not be assumed usable.
    pub fn admit(&mut self, key: &Timestamp, bytes: &[u8]) -> Result<(), CacheError> {
        if bytes.is_empty() {
            return Err(CacheError::EmptyPayload(key.clone()));
        }

        let high_water = (self.flash_capacity_bytes as f64 * HIGH_WATER_FRACTION) as u64;
        if self.used_bytes() + bytes.len() as u64 > high_water {
            let removed = self.evict_all();
            info!(removed, "storage high-water mark reached, cache evicted");
        }

        let path = self.path_for(key)?;
        let mut file = File::create(&path)?;
        file.write_all(bytes)?;

        if let Some(displaced) = self.ring.record(key.clone()) {
            debug!(key = %displaced, "ring slot reassigned");
        }
        debug!(key = %key, bytes = bytes.len(), "cached image");
        Ok(())
    }

    /// Read the blob for `key` into a freshly allocated buffer.
    ///
    /// Returns `Ok(None)` without allocating when the blob file is absent.
    /// Allocation failure after a successful open is reported as
    /// [`CacheError::Allocation`], distinct from a miss.
    pub fn fetch(&self, key: &Timestamp) -> Result<Option<Vec<u8>>, CacheError> {
        let path = blob_path(&self.root, key);
        if !path.exists() {
            return Ok(None);
        }

        let mut file = File::open(&path)?;
        let len = file.metadata()?.len() as usize;

        let mut buf = Vec::new();
        buf.try_reserve_exact(len)
            .map_err(|_| CacheError::Allocation { bytes: len })?;
        file.read_to_end(&mut buf)?;

        Ok(Some(buf))
    }

    /// Delete every blob in the cache directory and reset the ring.
    ///
    /// Scoped strictly to the blob directory; unrelated files elsewhere in
    /// the storage root are left alone. A failed deletion is logged and
    /// skipped. Returns the number of files successfully removed.
    pub fn evict_all(&mut self) -> usize {
        let mut removed = 0;

        match fs::read_dir(blob_directory(&self.root)) {
            Ok(entries) => {
                for entry in entries.flatten() {
                    let path = entry.path();
                    if path.is_dir() {
                        continue;
                    }
                    match fs::remove_file(&path) {
                        Ok(()) => {
                            removed += 1;
                            debug!(path = %path.display(), "removed cached file");
                        }
                        Err(e) => {
                            warn!(path = %path.display(), error = %e, "failed to remove cached file");
                        }
                    }
                }
            }
            Err(e) => {
                debug!(error = %e, "cache directory not readable during eviction");
            }
        }

        self.ring.clear();
        info!(removed, "cache eviction complete");
        removed
    }

    /// Bytes currently used under the storage root.
    pub fn used_bytes(&self) -> u64 {
        dir_size(&self.root)
    }

    /// Configured flash capacity in bytes.
    pub fn total_bytes(&self) -> u64 {
        self.flash_capacity_bytes
    }

    /// Admission metadata, exposed for diagnostics.
    pub fn ring(&self) -> &SlotRing {
        &self.ring
    }

    fn mount(&self) -> std::io::Result<()> {
        fs::create_dir_all(blob_directory(&self.root))
    }

    fn format(&self) -> std::io::Result<()> {
        if self.root.exists() {
            fs::remove_dir_all(&self.root)?;
        }
        fs::create_dir_all(&self.root)
    }
}

/// Recursively sum file sizes under `dir`. Unreadable entries count as 0.
fn dir_size(dir: &Path) -> u64 {
    let Ok(entries) = fs::read_dir(dir) else {
        return 0;
    };

    entries
        .flatten()
        .map(|entry| {
            let path = entry.path();
            if path.is_dir() {
                dir_size(&path)
            } else {
                entry.metadata().map(|m| m.len()).unwrap_or(0)
            }
        })
        .sum()
}
