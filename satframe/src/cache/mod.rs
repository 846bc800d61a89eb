//! Bounded key-to-blob cache on a small flash-style storage root.
//!
//! Provides a disk-backed store with ring-tracked admissions, bulk
//! eviction under space pressure, and deterministic per-key blob paths.

mod path;
mod ring;
mod store;
mod types;

pub use path::{blob_directory, blob_path, BLOB_DIR, BLOB_EXT};
pub use ring::SlotRing;
pub use store::CacheStore;
pub use types::{CacheError, Timestamp};
