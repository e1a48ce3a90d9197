// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// The surface is deliberately small:
//   domain-crawler [OPTIONS] <URL>
//
// Only the seed URL is required. Everything else has a default, and there
// is no config file: what you pass here is the whole configuration.
// =============================================================================

use clap::Parser;
use std::time::Duration;

use crate::crawl::CrawlConfig;

#[derive(Parser, Debug)]
#[command(
    name = "domain-crawler",
    version,
    about = "Crawl every page on a website's domain, printing each URL as it is visited",
    long_about = "domain-crawler starts at a seed URL and follows every <a href> link that stays on \
                  the seed's domain (subdomains and a www. prefix included), visiting each page \
                  at most once. Visited URLs are printed to stdout as they are processed; logs go \
                  to stderr. The crawl ends when every worker has found no work for a while."
)]
pub struct Cli {
    /// Seed URL to start crawling from (e.g., https://example.com)
    pub url: String,

    /// Number of concurrent crawl workers
    #[arg(short = 'n', long = "workers", default_value_t = 1,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub workers: u32,

    /// Seconds a worker may find no work before it stops
    #[arg(long, default_value_t = 30)]
    pub idle_seconds: u32,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,

    /// Print a JSON summary of the crawl to stderr when it finishes
    #[arg(long)]
    pub stats: bool,

    /// Increase log verbosity (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn crawl_config(&self) -> CrawlConfig {
        CrawlConfig {
            workers: self.workers as usize,
            idle_threshold: self.idle_seconds,
            idle_tick: Duration::from_secs(1),
            announce: true,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    // Default filter when RUST_LOG is not set
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
