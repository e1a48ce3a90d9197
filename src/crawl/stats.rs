// src/crawl/stats.rs
// =============================================================================
// Aggregate counters for a crawl run.
//
// Failures are silent on stdout (only claimed links are printed), so these
// counters are the one place where "how many pages failed?" is answered.
// Every worker bumps them through a shared reference; atomics avoid yet
// another lock next to the frontier's.
// =============================================================================

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

#[derive(Debug, Default)]
pub struct CrawlStats {
    committed: AtomicUsize,
    duplicate_pops: AtomicUsize,
    fetched: AtomicUsize,
    fetch_failed: AtomicUsize,
    redirected_off_domain: AtomicUsize,
    links_extracted: AtomicUsize,
    links_out_of_scope: AtomicUsize,
    links_enqueued: AtomicUsize,
    worker_terminations: AtomicUsize,
}

// Counters are independent, so Relaxed ordering is enough
fn bump(counter: &AtomicUsize, by: usize) {
    counter.fetch_add(by, Ordering::Relaxed);
}

impl CrawlStats {
    pub fn record_commit(&self) {
        bump(&self.committed, 1);
    }

    pub fn record_duplicate_pop(&self) {
        bump(&self.duplicate_pops, 1);
    }

    pub fn record_fetched(&self) {
        bump(&self.fetched, 1);
    }

    pub fn record_fetch_failed(&self) {
        bump(&self.fetch_failed, 1);
    }

    pub fn record_redirected_off_domain(&self) {
        bump(&self.redirected_off_domain, 1);
    }

    // One page's worth of link filtering
    pub fn record_links(&self, extracted: usize, out_of_scope: usize, enqueued: usize) {
        bump(&self.links_extracted, extracted);
        bump(&self.links_out_of_scope, out_of_scope);
        bump(&self.links_enqueued, enqueued);
    }

    pub fn record_termination(&self) {
        bump(&self.worker_terminations, 1);
    }

    pub fn snapshot(&self, workers: usize, elapsed: Duration) -> CrawlSummary {
        let load = |counter: &AtomicUsize| counter.load(Ordering::Relaxed);

        CrawlSummary {
            workers,
            committed: load(&self.committed),
            duplicate_pops: load(&self.duplicate_pops),
            fetched: load(&self.fetched),
            fetch_failed: load(&self.fetch_failed),
            redirected_off_domain: load(&self.redirected_off_domain),
            links_extracted: load(&self.links_extracted),
            links_out_of_scope: load(&self.links_out_of_scope),
            links_enqueued: load(&self.links_enqueued),
            worker_terminations: load(&self.worker_terminations),
            elapsed_secs: elapsed.as_secs_f64(),
        }
    }
}

/// Point-in-time copy of the counters, printed as JSON with --stats
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrawlSummary {
    pub workers: usize,
    /// Links claimed for processing (each printed once)
    pub committed: usize,
    /// Pops that found their link already claimed
    pub duplicate_pops: usize,
    pub fetched: usize,
    pub fetch_failed: usize,
    /// Pages discarded because a redirect left the domain
    pub redirected_off_domain: usize,
    pub links_extracted: usize,
    pub links_out_of_scope: usize,
    pub links_enqueued: usize,
    pub worker_terminations: usize,
    pub elapsed_secs: f64,
}
