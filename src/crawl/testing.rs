// src/crawl/testing.rs
// =============================================================================
// An in-memory website for crawl tests.
//
// FakeSite implements Fetcher from a fixed table of URL -> response and
// records every URL it was asked for, in order. Unknown URLs answer 404.
// =============================================================================

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use crate::fetch::{FetchError, FetchedPage, Fetcher};

#[derive(Debug, Clone)]
enum Response {
    Page(FetchedPage),
    ServerError,
}

#[derive(Debug, Default)]
pub struct FakeSite {
    responses: HashMap<String, Response>,
    requests: Mutex<Vec<String>>,
    latency: Duration,
}

impl FakeSite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(self, url: &str, body: &str) -> Self {
        self.redirect(url, url, body)
    }

    pub fn redirect(mut self, url: &str, final_url: &str, body: &str) -> Self {
        let page = FetchedPage {
            body: body.to_string(),
            final_url: final_url.to_string(),
        };
        self.responses.insert(url.to_string(), Response::Page(page));
        self
    }

    pub fn failing(mut self, url: &str) -> Self {
        self.responses.insert(url.to_string(), Response::ServerError);
        self
    }

    // Every fetch sleeps this long first (on tokio's clock)
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Fetcher for FakeSite {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        self.requests.lock().unwrap().push(url.to_string());

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        match self.responses.get(url) {
            Some(Response::Page(page)) => Ok(page.clone()),
            Some(Response::ServerError) => Err(FetchError::Status {
                url: url.to_string(),
                status: 500,
            }),
            None => Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}
