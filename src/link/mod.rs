// src/link/mod.rs
// =============================================================================
// This module holds the pure string logic the crawler applies to links.
//
// Submodules:
// - domain: Decides whether a link belongs to the domain being crawled
// - normalize: Rewrites scheme-relative links ("//host/path") to absolute ones
//
// Nothing in here touches the network; every function is a plain
// string-in, value-out helper that the crawl workers call.
// =============================================================================

mod domain;
mod normalize;

pub use domain::{domains_match, Domain};
pub use normalize::normalize_link;
