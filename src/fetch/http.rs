// src/fetch/http.rs
// =============================================================================
// This module downloads pages for the crawl workers.
//
// Key functionality:
// - Makes HTTP GET requests with a browser-like User-Agent
// - Follows redirects and reports the final URL, so the worker can tell
//   when a page bounced it off the domain
// - Turns every failure (DNS, timeout, 4xx/5xx, bad body) into FetchError
//
// The worker does not care WHY a fetch failed, only that it did: the link is
// skipped and never retried. The variants exist for the log line.
//
// Rust concepts:
// - Traits: Fetcher is the seam between the crawl core and the network
// - async-trait: Lets us put async fns in a trait used as Arc<dyn Fetcher>
// - thiserror: Derives Display/Error for our error enum
// =============================================================================

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

// Some sites refuse obvious bots, so we identify as a desktop Chrome
pub const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
                              (KHTML, like Gecko) Chrome/94.0.4606.71 Safari/537.36";

/// A successfully downloaded page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// The decoded response body
    pub body: String,
    /// Where the request ended up after following redirects
    pub final_url: String,
}

/// Everything that can go wrong while fetching a page
#[derive(Debug, Error)]
pub enum FetchError {
    /// The HTTP client itself could not be built
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// The request never produced a response (bad URL, DNS, connect, timeout, ...)
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-2xx status
    #[error("request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// The response body could not be read or decoded
    #[error("failed to read body of {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

// The contract the crawl workers fetch through
//
// Implementations must be safe to share between all workers.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;
}

// The real fetcher, backed by one pooled reqwest client
//
// Client is cheap to clone (it's an Arc internally), but we never need to:
// every worker shares this struct through an Arc<dyn Fetcher>.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    // Creates a fetcher whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(FetchError::ClientBuild)?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        // response.url() is the URL after redirects, read it before text()
        // consumes the response
        let final_url = response.url().to_string();

        let body = response.text().await.map_err(|source| FetchError::Body {
            url: url.to_string(),
            source,
        })?;

        Ok(FetchedPage { body, final_url })
    }
}
