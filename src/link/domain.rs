// src/link/domain.rs
// =============================================================================
// This module decides whether a link stays inside the crawl.
//
// How it works:
// 1. Pull the host out of the link ("http://blog.example.com/x" -> "blog.example.com")
// 2. Strip a leading "www." label
// 3. Keep only the last two dot-separated labels ("example.com")
// 4. Compare that with the same two labels of the crawl's domain
//
// The "last two labels" rule is a cheap stand-in for a public suffix list.
// It treats every subdomain of example.com as example.com, and it will
// happily treat foo.co.uk and bar.co.uk as the same site. That trade-off is
// accepted here.
//
// Rust concepts:
// - Newtype: Domain wraps a String so a raw link can't be passed by mistake
// - Slices: We compare &str views into the host, no allocations needed
// =============================================================================

use std::fmt;
use url::Url;

// The crawl's target domain, already stripped of any "www." prefix
//
// Built once from the seed URL and shared (read-only) by every worker.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Domain(String);

impl Domain {
    /// Builds the target domain from a host name ("www.example.com" -> "example.com")
    pub fn from_host(host: &str) -> Self {
        Self(normalize_domain(host).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Strips a leading "www." label
//
// The prefix is only removed when something is left afterwards, so the
// host "www." stays "www.".
pub fn normalize_domain(host: &str) -> &str {
    match host.strip_prefix("www.") {
        Some(rest) if !rest.is_empty() => rest,
        _ => host,
    }
}

// Returns true if `link` is on the same registrable domain as `domain`
//
// `link` must be an absolute URL with a host. Anything else (relative
// paths, "mailto:" links, garbage) counts as "not on our domain" rather
// than as an error: one malformed href must never stop a crawl.
//
// Only the link side is normalized here. `domain` is expected to come
// from Domain::from_host, which already did it once for the seed.
pub fn domains_match(link: &str, domain: &Domain) -> bool {
    let url = match Url::parse(link) {
        Ok(url) => url,
        Err(e) => {
            tracing::trace!("Not matching unparseable link '{}': {}", link, e);
            return false;
        }
    };

    let host = match url.host_str() {
        Some(host) => host,
        None => return false,
    };

    registrable_suffix(normalize_domain(host)) == registrable_suffix(domain.as_str())
}

// Keeps the last two dot-separated labels of a host
//
// "a.b.example.com" -> "example.com"
// "example.com"     -> "example.com"
// "localhost"       -> "localhost"
fn registrable_suffix(host: &str) -> &str {
    match host.rmatch_indices('.').nth(1) {
        Some((index, _)) => &host[index + 1..],
        None => host,
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why does "//example.com/a" not match?
//    - Url::parse needs a scheme; without a base URL it rejects the link
//    - Callers run normalize_link() first, which adds "http:"
//
// 2. What does rmatch_indices do?
//    - It yields the positions of '.' scanning from the END of the string
//    - .nth(1) is the second dot from the right, the start of "example.com"
// -----------------------------------------------------------------------------
