//! Core types for the cache subsystem.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Cache key identifying one time-quantized satellite frame.
///
/// The string layout is satellite-specific: GOES keys use `YYYYDDDHHMM`
/// (day-of-year) while Elektro-L keys use `YYYYMMDD-HHMM`. Keys are
/// immutable once formed; a given key always refers to the same upstream
/// image.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Timestamp(String);

impl Timestamp {
    /// Create a new timestamp key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The raw key string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Timestamp {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Timestamp {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

/// Cache-related errors.
///
/// A missing blob is not an error; lookups report misses through
/// `Option` so callers can distinguish "not cached" from real failures.
#[derive(Debug, Error)]
pub enum CacheError {
    /// I/O error during cache operations
    #[error("cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Storage root could not be mounted, even after a reformat
    #[error("storage mount failed at {path}: {source}")]
    MountFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Buffer allocation for a blob failed
    #[error("allocation of {bytes} bytes failed")]
    Allocation { bytes: usize },

    /// Refused to admit a zero-length payload
    #[error("refusing to admit empty payload for {0}")]
    EmptyPayload(Timestamp),

    /// Invalid cache configuration
    #[error("invalid cache configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_round_trips_string() {
        let key = Timestamp::new("20250109-0630");
        assert_eq!(key.as_str(), "20250109-0630");
        assert_eq!(key.to_string(), "20250109-0630");
    }

    #[test]
    fn test_timestamp_equality() {
        let a = Timestamp::new("20250090630");
        let b = Timestamp::from("20250090630");
        let c = Timestamp::new("20250090640");

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_empty_payload_error_names_key() {
        let err = CacheError::EmptyPayload(Timestamp::new("20250109-0630"));
        assert!(err.to_string().contains("20250109-0630"));
    }
}
