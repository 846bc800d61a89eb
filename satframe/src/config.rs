//! Runtime configuration.

use crate::cache::CacheError;
use crate::satellite::Satellite;
use chrono::Duration as ChronoDuration;
use std::time::Duration;

/// Default display dimensions, matching a 240x240 round TFT panel.
pub const DEFAULT_DISPLAY_WIDTH: u32 = 240;
pub const DEFAULT_DISPLAY_HEIGHT: u32 = 240;

/// Default JPEG quality requested from the resize pipeline.
pub const DEFAULT_JPEG_QUALITY: u8 = 75;

/// Default number of ring slots.
pub const DEFAULT_CACHE_CAPACITY: usize = 144;

/// Default flash partition size budgeted for the cache.
pub const DEFAULT_FLASH_CAPACITY_BYTES: u64 = 2 * 1024 * 1024;

/// Minutes the upstream pipeline lags behind wall-clock time. Requesting
/// the current interval before the image is published yields a 404, so
/// keys are computed this far in the past.
pub const DEFAULT_PUBLICATION_OFFSET_MIN: i64 = 15;

/// Default pause between polling cycles.
pub const DEFAULT_UPDATE_INTERVAL: Duration = Duration::from_secs(600);

/// Complete configuration for the fetch-and-display loop.
#[derive(Debug, Clone)]
pub struct Config {
    /// Imagery source variant.
    pub satellite: Satellite,
    /// CDN endpoint base URL, trailing slash included.
    pub endpoint: String,
    /// Display width in pixels, also the resize target.
    pub display_width: u32,
    /// Display height in pixels, also the resize target.
    pub display_height: u32,
    /// JPEG quality for the resize transform (1 to 100).
    pub jpeg_quality: u8,
    /// Number of slots in the cache ring.
    pub cache_capacity: usize,
    /// Frames per replay window; the write cursor cycles over this many
    /// slots. Must not exceed `cache_capacity`.
    pub display_count: usize,
    /// Flash capacity in bytes budgeted for the storage root.
    pub flash_capacity_bytes: u64,
    /// How far behind wall clock the newest published frame is assumed
    /// to be.
    pub publication_offset: ChronoDuration,
    /// Pause between polling cycles.
    pub update_interval: Duration,
    /// Evict the whole cache right after startup.
    pub clean_on_start: bool,
}

impl Config {
    /// Configuration for the given satellite with variant-appropriate
    /// defaults. The replay count follows the variant's 24 hour cadence.
    pub fn new(satellite: Satellite) -> Self {
        Self {
            satellite,
            endpoint: String::from("https://ik.imagekit.io/satframe/"),
            display_width: DEFAULT_DISPLAY_WIDTH,
            display_height: DEFAULT_DISPLAY_HEIGHT,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            display_count: satellite.replay_count(),
            flash_capacity_bytes: DEFAULT_FLASH_CAPACITY_BYTES,
            publication_offset: ChronoDuration::minutes(DEFAULT_PUBLICATION_OFFSET_MIN),
            update_interval: DEFAULT_UPDATE_INTERVAL,
            clean_on_start: false,
        }
    }

    /// Set the CDN endpoint base URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the display dimensions.
    pub fn with_display_size(mut self, width: u32, height: u32) -> Self {
        self.display_width = width;
        self.display_height = height;
        self
    }

    /// Set the number of ring slots.
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Set the replay window length.
    pub fn with_display_count(mut self, count: usize) -> Self {
        self.display_count = count;
        self
    }

    /// Set the flash capacity budget in bytes.
    pub fn with_flash_capacity(mut self, bytes: u64) -> Self {
        self.flash_capacity_bytes = bytes;
        self
    }

    /// Set the pause between polling cycles.
    pub fn with_update_interval(mut self, interval: Duration) -> Self {
        self.update_interval = interval;
        self
    }

    /// Request a full eviction right after startup.
    pub fn with_clean_on_start(mut self, clean: bool) -> Self {
        self.clean_on_start = clean;
        self
    }

    /// Validate cross-field invariants.
    ///
    /// The ring geometry is checked again by [`crate::cache::CacheStore`];
    /// checking here as well surfaces bad configurations before any
    /// storage is touched.
    pub fn validate(&self) -> Result<(), CacheError> {
        if self.display_count == 0 {
            return Err(CacheError::InvalidConfig(
                "display count must be at least 1".to_string(),
            ));
        }
        if self.display_count > self.cache_capacity {
            return Err(CacheError::InvalidConfig(format!(
                "display count {} exceeds cache capacity {}",
                self.display_count, self.cache_capacity
            )));
        }
        if self.jpeg_quality == 0 || self.jpeg_quality > 100 {
            return Err(CacheError::InvalidConfig(format!(
                "jpeg quality {} outside 1..=100",
                self.jpeg_quality
            )));
        }
        if self.endpoint.is_empty() {
            return Err(CacheError::InvalidConfig(
                "endpoint must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Satellite::ElektroL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_follows_variant_cadence() {
        let config = Config::new(Satellite::ElektroL);
        assert_eq!(config.display_count, 48);

        let config = Config::new(Satellite::GoesEast);
        assert_eq!(config.display_count, 72);
    }

    #[test]
    fn test_default_values() {
        let config = Config::default();

        assert_eq!(config.satellite, Satellite::ElektroL);
        assert_eq!(config.display_width, 240);
        assert_eq!(config.display_height, 240);
        assert_eq!(config.jpeg_quality, 75);
        assert_eq!(config.cache_capacity, 144);
        assert_eq!(config.flash_capacity_bytes, 2 * 1024 * 1024);
        assert!(!config.clean_on_start);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_chain() {
        let config = Config::new(Satellite::GoesWest)
            .with_endpoint("https://example.test/img/")
            .with_display_size(480, 480)
            .with_cache_capacity(32)
            .with_display_count(16)
            .with_flash_capacity(4 * 1024 * 1024)
            .with_update_interval(Duration::from_secs(60))
            .with_clean_on_start(true);

        assert_eq!(config.endpoint, "https://example.test/img/");
        assert_eq!(config.display_width, 480);
        assert_eq!(config.cache_capacity, 32);
        assert_eq!(config.display_count, 16);
        assert_eq!(config.flash_capacity_bytes, 4 * 1024 * 1024);
        assert_eq!(config.update_interval, Duration::from_secs(60));
        assert!(config.clean_on_start);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_oversized_display_count() {
        let config = Config::new(Satellite::ElektroL)
            .with_cache_capacity(10)
            .with_display_count(11);

        assert!(matches!(
            config.validate(),
            Err(CacheError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_validate_rejects_empty_endpoint() {
        let config = Config::default().with_endpoint("");
        assert!(config.validate().is_err());
    }
}
