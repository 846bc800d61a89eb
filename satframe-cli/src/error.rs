//! CLI error handling with user-friendly messages.

use satframe::cache::CacheError;
use satframe::fetch::FetchError;
use std::fmt;
use std::process;

/// CLI-specific errors raised during startup.
///
/// The polling loop itself never exits on failure; only startup problems
/// surface here.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration rejected before any storage was touched
    Config(CacheError),
    /// Cache storage could not be mounted
    CacheInit(CacheError),
    /// HTTP client could not be constructed
    HttpClient(FetchError),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        if let CliError::CacheInit(_) = self {
            eprintln!();
            eprintln!("The storage root could not be mounted even after a reformat.");
            eprintln!("Check that the path is writable and has free space.");
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "failed to initialize logging: {}", msg),
            CliError::Config(e) => write!(f, "configuration error: {}", e),
            CliError::CacheInit(e) => write!(f, "failed to initialize cache: {}", e),
            CliError::HttpClient(e) => write!(f, "failed to create HTTP client: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(e) | CliError::CacheInit(e) => Some(e),
            CliError::HttpClient(e) => Some(e),
            CliError::LoggingInit(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_failure() {
        let err = CliError::LoggingInit("disk full".to_string());
        assert_eq!(
            err.to_string(),
            "failed to initialize logging: disk full"
        );
    }

    #[test]
    fn test_source_chains_cache_errors() {
        use std::error::Error;

        let err = CliError::CacheInit(CacheError::InvalidConfig("bad ring".to_string()));
        assert!(err.source().is_some());
    }
}
