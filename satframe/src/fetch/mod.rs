//! Fetch coordination: cache-first resolution and replay.
//!
//! The [`Fetcher`] resolves a timestamp key to image bytes, preferring
//! the cache and falling back to the network. Downloaded frames are
//! admitted into the cache on the way through; a frame that cannot be
//! cached is still returned for display. [`Fetcher::replay_window`]
//! drives one pass of the trailing-history animation.

mod http;

pub use http::{HttpClient, HttpResponse, ReqwestClient};

use crate::cache::{CacheStore, Timestamp};
use crate::clock::Clock;
use crate::config::Config;
use crate::display::DisplaySink;
use chrono::Duration as ChronoDuration;
use std::io::Read;
use thiserror::Error;
use tracing::{debug, warn};

/// Fetch-related errors.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level HTTP failure
    #[error("HTTP error: {0}")]
    Http(String),

    /// Server answered with a non-success status
    #[error("HTTP status {status} for {url}")]
    Status { status: u16, url: String },

    /// The request or body read exceeded the client timeout
    #[error("network read timed out")]
    TimedOut,

    /// The server did not declare a body length
    #[error("response missing content length")]
    UnknownLength,

    /// The body ended before the declared length was consumed
    #[error("short body: {got} of {expected} bytes")]
    ShortBody { got: usize, expected: usize },

    /// Buffer allocation for the body failed
    #[error("allocation of {bytes} bytes failed")]
    Allocation { bytes: usize },

    /// The time source has not synchronized yet
    #[error("time source not yet synchronized")]
    ClockNotReady,
}

/// Resolves timestamp keys to image bytes, cache first.
///
/// Owns the cache store and the network client; each call runs to
/// completion before the next begins, so no internal state outlives a
/// single resolution.
pub struct Fetcher<C: HttpClient, K: Clock> {
    cache: CacheStore,
    http: C,
    clock: K,
    config: Config,
}

impl<C: HttpClient, K: Clock> Fetcher<C, K> {
    /// Create a fetcher over an initialized cache store.
    pub fn new(cache: CacheStore, http: C, clock: K, config: Config) -> Self {
        Self {
            cache,
            http,
            clock,
            config,
        }
    }

    /// Resolve `key` to image bytes.
    ///
    /// The cache takes priority even though the network could supply the
    /// same frame; keys are time-quantized and immutable once published.
    /// On a miss the frame is downloaded and admitted into the cache;
    /// an admission failure is logged but does not fail the resolve,
    /// since the in-memory frame is still usable for display.
    pub fn resolve(&mut self, key: &Timestamp) -> Result<Vec<u8>, FetchError> {
        match self.cache.fetch(key) {
            Ok(Some(bytes)) => {
                debug!(key = %key, bytes = bytes.len(), "cache hit");
                return Ok(bytes);
            }
            Ok(None) => {}
            Err(e) => {
                warn!(key = %key, error = %e, "cache read failed, falling back to network");
            }
        }

        let bytes = self.download(key)?;

        if let Err(e) = self.cache.admit(key, &bytes) {
            warn!(key = %key, error = %e, "failed to cache downloaded frame");
        }
        Ok(bytes)
    }

    /// Key for the newest frame assumed published, or `None` while the
    /// clock has not synchronized.
    pub fn current_key(&self) -> Option<Timestamp> {
        let now = self.clock.now()?;
        let adjusted = now - self.config.publication_offset;
        Some(self.config.satellite.format_key(adjusted))
    }

    /// Resolve the newest published frame.
    pub fn resolve_latest(&mut self) -> Result<(Timestamp, Vec<u8>), FetchError> {
        let key = self.current_key().ok_or(FetchError::ClockNotReady)?;
        let bytes = self.resolve(&key)?;
        Ok((key, bytes))
    }

    /// Replay the trailing window through `sink`, oldest frame first.
    ///
    /// Issues `display_count` sequential resolves for consecutive
    /// quantized intervals ending at the newest published frame. A failed
    /// resolve or a rejected frame is skipped; the pass always runs to
    /// the end of the window.
    pub fn replay_window(&mut self, sink: &mut dyn DisplaySink) {
        let Some(now) = self.clock.now() else {
            warn!("time source not ready, skipping replay");
            return;
        };

        let satellite = self.config.satellite;
        let count = self.config.display_count;
        let interval = ChronoDuration::minutes(i64::from(satellite.interval_minutes()));
        let end = now - self.config.publication_offset;
        let mut t = end - interval * (count as i32 - 1);

        for frame in 1..=count {
            let key = satellite.format_key(t);
            match self.resolve(&key) {
                Ok(bytes) => {
                    if let Err(e) = sink.present(&key, &bytes) {
                        warn!(key = %key, error = %e, "display sink rejected frame");
                    }
                }
                Err(e) => {
                    debug!(frame, total = count, key = %key, error = %e, "skipping frame");
                }
            }
            t = t + interval;
        }
    }

    /// The underlying cache store.
    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    /// The underlying HTTP client.
    pub fn http_client(&self) -> &C {
        &self.http
    }

    /// Mutable access to the cache store, for startup cleanup.
    pub fn cache_mut(&mut self) -> &mut CacheStore {
        &mut self.cache
    }

    fn download(&mut self, key: &Timestamp) -> Result<Vec<u8>, FetchError> {
        let url = self.config.satellite.image_url(
            &self.config.endpoint,
            key,
            self.config.display_width,
            self.config.display_height,
            self.config.jpeg_quality,
        );
        debug!(url = %url, "downloading frame");

        let response = self.http.get(&url)?;
        if !(200..300).contains(&response.status) {
            return Err(FetchError::Status {
                status: response.status,
                url,
            });
        }

        let expected = response.content_length.ok_or(FetchError::UnknownLength)? as usize;

        let mut buf = Vec::new();
        buf.try_reserve_exact(expected)
            .map_err(|_| FetchError::Allocation { bytes: expected })?;

        let mut body = response.body.take(expected as u64);
        body.read_to_end(&mut buf).map_err(|e| {
            if matches!(
                e.kind(),
                std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock
            ) {
                FetchError::TimedOut
            } else {
                FetchError::Http(format!("body read failed: {}", e))
            }
        })?;

        if buf.len() != expected {
            return Err(FetchError::ShortBody {
                got: buf.len(),
                expected,
            });
        }

        debug!(key = %key, bytes = buf.len(), "download complete");
        Ok(buf)
    }
}
