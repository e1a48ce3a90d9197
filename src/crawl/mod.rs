// src/crawl/mod.rs
// =============================================================================
// This module is the concurrent crawl engine.
//
// Features:
// - A shared frontier (FIFO queue + dedup ledger behind one lock)
// - N workers pulling from it in parallel
// - Same-domain restriction (never leaves the seed's registrable domain)
// - Every link is fetched at most once per run
// - Workers stop on their own after being idle for a while
//
// Submodules:
// - ledger: MD5 fingerprints of claimed links
// - frontier: The shared work queue
// - worker: The per-worker state machine
// - orchestrator: Seeds the frontier, spawns and joins the workers
// - stats: Counters reported at the end of a run
// =============================================================================

mod frontier;
mod ledger;
mod orchestrator;
mod stats;
mod worker;

#[cfg(test)]
mod testing;

pub use orchestrator::{CrawlConfig, CrawlError, Crawler};
pub use stats::CrawlSummary;
