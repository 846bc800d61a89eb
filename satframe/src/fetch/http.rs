//! HTTP client abstraction for testability.

use crate::fetch::FetchError;
use std::io::Read;
use std::time::Duration;

/// User-Agent sent with every request. Some CDNs reject requests without
/// one.
const DEFAULT_USER_AGENT: &str = concat!("satframe/", env!("CARGO_PKG_VERSION"));

/// Default request timeout, covering connect and body read.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// One HTTP response: status code, declared body length, and the body
/// byte stream.
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Declared `Content-Length`, if the server sent one.
    pub content_length: Option<u64>,
    /// Body byte stream. Reads past the declared length are undefined;
    /// consumers read exactly `content_length` bytes.
    pub body: Box<dyn Read>,
}

impl HttpResponse {
    /// A fully buffered response; the declared length matches the body.
    ///
    /// Handy for tests and canned responses.
    pub fn from_bytes(status: u16, body: Vec<u8>) -> Self {
        Self {
            status,
            content_length: Some(body.len() as u64),
            body: Box::new(std::io::Cursor::new(body)),
        }
    }
}

/// Trait for blocking HTTP GET operations.
///
/// This abstraction allows dependency injection and easier testing by
/// enabling mock clients in tests.
pub trait HttpClient {
    /// Perform an HTTP GET request.
    ///
    /// Transport failures are errors; a non-success status code is not,
    /// and is reported through [`HttpResponse::status`] for the caller to
    /// judge.
    fn get(&self, url: &str) -> Result<HttpResponse, FetchError>;
}

/// Real HTTP client implementation using reqwest.
#[derive(Clone)]
pub struct ReqwestClient {
    client: reqwest::blocking::Client,
}

impl ReqwestClient {
    /// Create a client with the default timeout.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_timeout(DEFAULT_TIMEOUT_SECS)
    }

    /// Create a client with a custom timeout in seconds.
    ///
    /// The timeout bounds the whole request including the body read, so a
    /// stalled connection can never block the fetch loop indefinitely.
    pub fn with_timeout(timeout_secs: u64) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(DEFAULT_USER_AGENT)
            .build()
            .map_err(|e| FetchError::Http(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        let response = self.client.get(url).send().map_err(|e| {
            if e.is_timeout() {
                FetchError::TimedOut
            } else {
                FetchError::Http(format!("request failed: {}", e))
            }
        })?;

        Ok(HttpResponse {
            status: response.status().as_u16(),
            content_length: response.content_length(),
            body: Box::new(response),
        })
    }
}
