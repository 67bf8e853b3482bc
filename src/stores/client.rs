//! HTTP client for store requests using wreq for TLS fingerprint emulation.

use crate::config::Config;
use crate::ean::Ean;
use crate::stores::registry::{self, RequestSpec, Store};
use anyhow::{Context, Result};
use async_trait::async_trait;
use rand::RngExt;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use wreq::Client;
use wreq_util::Emulation;

/// Why a store request produced no document.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("request failed with status {0}")]
    Status(u16),
    #[error("transport error: {0}")]
    Transport(String),
}

/// Trait for fetching one store's search document - enables mocking for tests.
#[async_trait]
pub trait StoreFetch: Send + Sync {
    /// Fetches the response body for a product code at one store.
    async fn fetch(&self, store: Store, ean: &Ean) -> Result<String, FetchError>;
}

/// Store HTTP client with browser impersonation and anti-bot measures.
///
/// Holds two inner clients because redirect policy is fixed at build time:
/// one follows redirects for stores whose search resolves into a product
/// page, one refuses them for stores that bounce anonymous sessions to a
/// region chooser.
pub struct StoreClient {
    following: Client,
    direct: Client,
    delay_ms: u64,
    delay_jitter_ms: u64,
    base_url: Option<String>,
}

impl StoreClient {
    /// Creates a new store client with the given configuration.
    pub async fn new(config: &Config) -> Result<Self> {
        Self::with_base_url(config, None).await
    }

    /// Creates a new store client with an optional base URL override that
    /// replaces every store's base (for testing).
    pub async fn with_base_url(config: &Config, base_url: Option<String>) -> Result<Self> {
        let following =
            Self::builder(config)?.build().context("Failed to build HTTP client")?;
        let direct = Self::builder(config)?
            .redirect(wreq::redirect::Policy::none())
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            following,
            direct,
            delay_ms: config.delay_ms,
            delay_jitter_ms: config.delay_jitter_ms,
            base_url,
        })
    }

    fn builder(config: &Config) -> Result<wreq::ClientBuilder> {
        let mut builder = Client::builder()
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10));

        if let Some(proxy_url) = &config.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = wreq::Proxy::all(proxy_url).context("Failed to configure proxy")?;
            builder = builder.proxy(proxy);
        }

        Ok(builder)
    }

    /// Returns the base URL for a store (custom override for testing, or the
    /// store's production base).
    fn base_for(&self, store: Store) -> String {
        self.base_url.clone().unwrap_or_else(|| store.base_url().to_string())
    }

    /// Performs a GET request for a prepared request spec.
    async fn get(&self, spec: &RequestSpec) -> Result<String, FetchError> {
        // Human-like delay with jitter
        self.delay().await;

        debug!("GET {}", spec.url);

        let client = if spec.follow_redirects { &self.following } else { &self.direct };

        let mut request = client
            .get(&spec.url)
            .emulation(Emulation::Chrome131)
            .header("User-Agent", registry::USER_AGENT)
            .header(
                "Accept",
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8",
            )
            .header("Accept-Language", registry::ACCEPT_LANGUAGE)
            .header("Accept-Encoding", "gzip, deflate, br")
            .header("Upgrade-Insecure-Requests", "1");

        if !spec.cookies.is_empty() {
            request = request.header("Cookie", cookie_header(spec.cookies));
        }

        let response = request.send().await.map_err(classify)?;

        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        response.text().await.map_err(classify)
    }

    /// Adds a random delay to mimic human behavior.
    async fn delay(&self) {
        if self.delay_ms == 0 {
            return;
        }

        let jitter = if self.delay_jitter_ms > 0 {
            rand::rng().random_range(0..=self.delay_jitter_ms)
        } else {
            0
        };

        let total_delay = self.delay_ms + jitter;
        debug!("Delaying {}ms", total_delay);
        tokio::time::sleep(Duration::from_millis(total_delay)).await;
    }
}

#[async_trait]
impl StoreFetch for StoreClient {
    async fn fetch(&self, store: Store, ean: &Ean) -> Result<String, FetchError> {
        let spec = store.request(&self.base_for(store), ean);
        self.get(&spec).await
    }
}

fn cookie_header(cookies: &[(&str, &str)]) -> String {
    cookies.iter().map(|(k, v)| format!("{}={}", k, v)).collect::<Vec<_>>().join("; ")
}

fn classify(err: wreq::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout
    } else if err.is_connect() {
        FetchError::Connect(err.to_string())
    } else {
        FetchError::Transport(err.to_string())
    }
}
