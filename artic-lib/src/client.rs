//! Main ArticClient

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::api::query;
use crate::api::PageSource;
use crate::api::PageWindow;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::error::Error;

/// HTTP client for the artwork collection API.
///
/// This client is cheap to clone (uses `Arc` internally) and can be shared
/// across tasks safely.
///
/// # Example
///
/// ```ignore
/// use artic_lib::ArticClient;
///
/// let client = ArticClient::builder().build()?;
/// let page = client.fetch_page(1, 12).await?;
/// println!("{} of {} artworks", page.len(), page.total());
/// ```
#[derive(Clone)]
pub struct ArticClient {
    inner: Arc<ArticClientInner>,
}

struct ArticClientInner {
    endpoint: Url,
    http_client: Client,
    timeout: Option<Duration>,
}

impl ArticClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> ArticClientBuilder {
        ArticClientBuilder::new()
    }

    /// Creates a client from a config.
    pub fn from_config(config: ClientConfig) -> Result<Self, Error> {
        ArticClientBuilder::from_config(config).build()
    }

    /// Returns the collection endpoint.
    pub fn endpoint(&self) -> &Url {
        &self.inner.endpoint
    }

    /// Fetches one page of artworks.
    ///
    /// Transport failures map to [`ApiError::Network`], non-2xx responses to
    /// [`ApiError::Http`] and malformed bodies to [`ApiError::Parse`]. There is
    /// no retry.
    pub async fn fetch_page(&self, page: u32, limit: u32) -> Result<PageWindow, Error> {
        let url = query::page_url(&self.inner.endpoint, page, limit);
        log::debug!("GET {}", url);

        let mut request = self.inner.http_client.get(url);

        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(ApiError::from)?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api(ApiError::http(status.as_u16(), body)));
        }

        let body = response.text().await.map_err(ApiError::from)?;
        let window: PageWindow = serde_json::from_str(&body)
            .map_err(|e| ApiError::parse_with_body(e.to_string(), body.clone()))?;

        log::debug!(
            "Fetched page {} ({} records, {} total)",
            window.page_number(),
            window.len(),
            window.total()
        );
        Ok(window)
    }
}

#[async_trait]
impl PageSource for ArticClient {
    async fn fetch_page(&self, page: u32, limit: u32) -> Result<PageWindow, Error> {
        ArticClient::fetch_page(self, page, limit).await
    }
}

impl std::fmt::Debug for ArticClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArticClient")
            .field("endpoint", &self.inner.endpoint.as_str())
            .field("timeout", &self.inner.timeout)
            .finish()
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Builder for constructing an [`ArticClient`].
///
/// Every field has a default, so `ArticClient::builder().build()` talks to
/// the public API.
///
/// # Example
///
/// ```ignore
/// let client = ArticClient::builder()
///     .endpoint("http://localhost:8080/artworks")
///     .timeout(Duration::from_secs(30))
///     .build()?;
/// ```
pub struct ArticClientBuilder {
    config: ClientConfig,
    http_client: Option<Client>,
}

impl ArticClientBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::from_config(ClientConfig::default())
    }

    /// Creates a builder seeded from a config.
    pub fn from_config(config: ClientConfig) -> Self {
        Self {
            config,
            http_client: None,
        }
    }

    /// Sets the collection endpoint.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.endpoint = endpoint.into();
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// If not set, a default client will be created.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Builds the [`ArticClient`].
    ///
    /// Fails if the endpoint is not an absolute HTTP(S) URL or the HTTP client
    /// cannot be constructed.
    pub fn build(self) -> Result<ArticClient, Error> {
        let endpoint = query::parse_endpoint(&self.config.endpoint)?;

        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.config.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder.build().map_err(ApiError::from)?
            }
        };

        Ok(ArticClient {
            inner: Arc::new(ArticClientInner {
                endpoint,
                http_client,
                timeout: self.config.timeout,
            }),
        })
    }
}

impl Default for ArticClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
