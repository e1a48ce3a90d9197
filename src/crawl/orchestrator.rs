// src/crawl/orchestrator.rs
// =============================================================================
// This module starts a crawl and waits for it to finish.
//
// How it works:
// 1. Validate the seed URL and derive the target domain from its host
// 2. Put the seed in the frontier
// 3. Spawn N workers that share the frontier, domain, fetcher and stats
// 4. Wait until every worker has stopped on its own
//
// There is no "stop" message. Each worker ends when it has been idle long
// enough and sees an empty frontier, so the crawl ends when the last one
// does.
//
// Rust concepts:
// - Arc: Shared ownership of the frontier/context across tasks
// - tokio::spawn: Runs each worker on the runtime's thread pool
// - join_all: Waits for a whole Vec of futures
// =============================================================================

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use thiserror::Error;
use tokio::time::Instant;
use url::Url;

use super::frontier::SharedFrontier;
use super::stats::{CrawlStats, CrawlSummary};
use super::worker::{CrawlContext, Worker};
use crate::fetch::{AnchorExtractor, Fetcher};
use crate::link::Domain;

/// Reasons a crawl can't even start
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("invalid seed URL '{url}': {source}")]
    InvalidSeed {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("seed URL has no host: {0}")]
    SeedWithoutHost(String),

    #[error("worker count must be at least 1")]
    NoWorkers,
}

// Knobs for one crawl run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlConfig {
    /// Number of concurrent workers
    pub workers: usize,
    /// Idle ticks in a row before a worker may stop
    pub idle_threshold: u32,
    /// Length of one idle tick
    pub idle_tick: Duration,
    /// Print every claimed link to stdout as it is processed
    pub announce: bool,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            workers: 1,
            idle_threshold: 30,
            idle_tick: Duration::from_secs(1),
            announce: true,
        }
    }
}

pub struct Crawler {
    frontier: Arc<SharedFrontier>,
    fetcher: Arc<dyn Fetcher>,
    extractor: Arc<dyn AnchorExtractor>,
    config: CrawlConfig,
}

impl Crawler {
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        extractor: Arc<dyn AnchorExtractor>,
        config: CrawlConfig,
    ) -> Self {
        Self::with_frontier(SharedFrontier::new(), fetcher, extractor, config)
    }

    /// Builds a crawler around a given frontier, e.g. one whose ledger uses another digest
    pub fn with_frontier(
        frontier: SharedFrontier,
        fetcher: Arc<dyn Fetcher>,
        extractor: Arc<dyn AnchorExtractor>,
        config: CrawlConfig,
    ) -> Self {
        Self {
            frontier: Arc::new(frontier),
            fetcher,
            extractor,
            config,
        }
    }

    // Crawls everything reachable from `seed_url` on the seed's domain
    //
    // Returns once every worker has terminated. Individual page failures
    // never surface here; they only show up in the summary counters.
    pub async fn run(&self, seed_url: &str) -> Result<CrawlSummary, CrawlError> {
        if self.config.workers == 0 {
            return Err(CrawlError::NoWorkers);
        }

        let seed = Url::parse(seed_url).map_err(|source| CrawlError::InvalidSeed {
            url: seed_url.to_string(),
            source,
        })?;
        let host = seed
            .host_str()
            .ok_or_else(|| CrawlError::SeedWithoutHost(seed_url.to_string()))?;
        let domain = Domain::from_host(host);

        tracing::info!(
            "Crawling {} (domain {}) with {} worker(s)",
            seed_url,
            domain,
            self.config.workers
        );

        // The seed goes in as written (apart from normalization), not as
        // Url's re-serialized form
        self.frontier.push(seed_url);

        let stats = Arc::new(CrawlStats::default());
        let ctx = Arc::new(CrawlContext {
            frontier: self.frontier.clone(),
            domain,
            fetcher: self.fetcher.clone(),
            extractor: self.extractor.clone(),
            stats: stats.clone(),
            idle_threshold: self.config.idle_threshold,
            idle_tick: self.config.idle_tick,
            announce: self.config.announce,
        });

        let started = Instant::now();
        let handles: Vec<_> = (0..self.config.workers)
            .map(|id| tokio::spawn(Worker::new(id, ctx.clone()).run()))
            .collect();

        for (id, result) in join_all(handles).await.into_iter().enumerate() {
            if let Err(e) = result {
                tracing::error!("Worker {} panicked: {}", id, e);
            }
        }

        let summary = stats.snapshot(self.config.workers, started.elapsed());
        tracing::info!(
            "Crawl finished: {} link(s) in the ledger, {} fetch failure(s)",
            self.frontier.committed_count(),
            summary.fetch_failed
        );
        Ok(summary)
    }
}
