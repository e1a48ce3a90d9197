// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (stderr only, stdout is reserved for visited URLs)
// 3. Build the HTTP fetcher and the crawler, then run the crawl
// 4. Exit with proper code (0 = crawl finished, 2 = could not start)
//
// A crawl never fails half-way: broken pages are skipped and counted, so
// once it has started it always ends with exit code 0.
// =============================================================================

mod cli;   // src/cli.rs - command-line parsing
mod crawl; // src/crawl/ - frontier, workers, orchestrator
mod fetch; // src/fetch/ - HTTP fetching and <a href> extraction
mod link;  // src/link/ - link normalization and domain matching

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use crawl::{CrawlSummary, Crawler};
use fetch::{HtmlAnchorExtractor, HttpFetcher};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    let exit_code = match run(&cli).await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Logs go to stderr; RUST_LOG wins over -v flags when set
fn init_logging(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: &Cli) -> Result<()> {
    let fetcher = HttpFetcher::new(cli.request_timeout())
        .context("could not set up the HTTP client")?;

    let crawler = Crawler::new(
        Arc::new(fetcher),
        Arc::new(HtmlAnchorExtractor),
        cli.crawl_config(),
    );

    let summary = crawler
        .run(&cli.url)
        .await
        .with_context(|| format!("could not crawl {}", cli.url))?;

    if cli.stats {
        print_summary(&summary)?;
    }
    Ok(())
}

fn print_summary(summary: &CrawlSummary) -> Result<()> {
    let json = serde_json::to_string_pretty(summary)?;
    eprintln!("{}", json);
    Ok(())
}
