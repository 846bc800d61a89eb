//! Blob path construction and filename handling.

use crate::cache::types::Timestamp;
use std::path::{Path, PathBuf};

/// Subdirectory under the storage root holding cached blobs.
pub const BLOB_DIR: &str = "cache";

/// File extension for cached frames.
pub const BLOB_EXT: &str = "jpg";

/// Construct the full path for a cached frame.
///
/// The layout is flat: `<root>/cache/<key>.jpg`. The path is a pure
/// function of the key; existence of the file at this path is the source
/// of truth for whether the key is retrievable.
///
/// # Example
///
/// ```
/// use std::path::{Path, PathBuf};
/// use satframe::cache::{blob_path, Timestamp};
///
/// let path = blob_path(Path::new("/data"), &Timestamp::new("20250109-0630"));
/// assert_eq!(path, PathBuf::from("/data/cache/20250109-0630.jpg"));
/// ```
pub fn blob_path(root: &Path, key: &Timestamp) -> PathBuf {
    root.join(BLOB_DIR)
        .join(format!("{}.{}", key.as_str(), BLOB_EXT))
}

/// The directory holding all cached blobs under `root`.
pub fn blob_directory(root: &Path) -> PathBuf {
    root.join(BLOB_DIR)
}
