//! Client configuration

use std::time::Duration;

/// Public collection endpoint of the Art Institute of Chicago API.
pub const DEFAULT_ENDPOINT: &str = "https://api.artic.edu/api/v1/artworks";

/// Configuration for [`ArticClient`](crate::ArticClient).
///
/// No timeout is applied by default; a hung request stays pending until the
/// transport gives up.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use artic_lib::ClientConfig;
///
/// let config = ClientConfig::default()
///     .with_endpoint("http://localhost:8080/artworks")
///     .with_timeout(Duration::from_secs(10));
///
/// assert_eq!(config.endpoint, "http://localhost:8080/artworks");
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Collection endpoint that pages are requested from.
    ///
    /// Default: [`DEFAULT_ENDPOINT`]
    pub endpoint: String,

    /// Per-request timeout.
    ///
    /// Default: none
    pub timeout: Option<Duration>,

    /// Connection timeout, applied when the HTTP client is built.
    ///
    /// Default: none
    pub connect_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: None,
            connect_timeout: None,
        }
    }
}

impl ClientConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }
}
