// src/fetch/mod.rs
// =============================================================================
// This module talks to the outside world on behalf of the crawl workers.
//
// Submodules:
// - http: Downloads a page and reports where redirects ended up
// - html: Pulls the href of every <a> tag out of a page
//
// Both are exposed as traits (Fetcher, AnchorExtractor) so the crawl core
// can be driven by in-memory fakes in tests and by reqwest/scraper for real.
// =============================================================================

mod html;
mod http;

pub use html::{AnchorExtractor, HtmlAnchorExtractor};
pub use http::{FetchError, FetchedPage, Fetcher, HttpFetcher};
