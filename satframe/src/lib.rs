//! Satframe - bounded satellite image cache and display loop
//!
//! This library fetches full-disk imagery from geostationary weather
//! satellites (GOES-16/18, Elektro-L), caches each frame in a bounded
//! flash-style store keyed by quantized timestamp, and replays the cached
//! history as an animation through a pluggable display sink.
//!
//! # High-Level API
//!
//! ```ignore
//! use satframe::cache::CacheStore;
//! use satframe::clock::SystemClock;
//! use satframe::config::Config;
//! use satframe::fetch::{Fetcher, ReqwestClient};
//! use satframe::satellite::Satellite;
//!
//! let config = Config::new(Satellite::ElektroL);
//! let mut store = CacheStore::new("data", &config)?;
//! store.initialize()?;
//!
//! let mut fetcher = Fetcher::new(store, ReqwestClient::new()?, SystemClock, config);
//! let (key, jpeg) = fetcher.resolve_latest()?;
//! ```

pub mod cache;
pub mod clock;
pub mod config;
pub mod display;
pub mod fetch;
pub mod logging;
pub mod satellite;

/// Version of the satframe library and CLI.
///
/// This is synchronized across all components in the workspace.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
