// src/crawl/ledger.rs
// =============================================================================
// The dedup ledger: the set of links that have already been claimed.
//
// We don't store the links themselves, only a 16-byte MD5 fingerprint of
// each (normalized) link string. Memory stays flat no matter how long the
// URLs get. The price is that two different links with the same digest
// count as one, and the second is never visited. With MD5 that is rare
// enough to ignore, and tests can swap in a weaker digest to force it.
//
// The ledger only ever grows. It is NOT thread-safe on its own: the
// frontier owns it and only touches it under the frontier's lock.
// =============================================================================

use md5::{Digest, Md5};
use std::collections::HashSet;

/// Fixed-length digest of a normalized link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint([u8; 16]);

impl From<[u8; 16]> for Fingerprint {
    fn from(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }
}

// The digest function the ledger uses
pub type DigestFn = fn(&str) -> Fingerprint;

// MD5 of the UTF-8 bytes of the link
pub fn fingerprint(link: &str) -> Fingerprint {
    let digest = Md5::digest(link.as_bytes());
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&digest);
    Fingerprint(bytes)
}

#[derive(Debug)]
pub struct DedupLedger {
    committed: HashSet<Fingerprint>,
    digest: DigestFn,
}

impl DedupLedger {
    pub fn new() -> Self {
        Self::with_digest(fingerprint)
    }

    /// Creates a ledger keyed by a custom digest function
    pub fn with_digest(digest: DigestFn) -> Self {
        Self {
            committed: HashSet::new(),
            digest,
        }
    }

    pub fn fingerprint(&self, link: &str) -> Fingerprint {
        (self.digest)(link)
    }

    pub fn contains(&self, link: &str) -> bool {
        self.committed.contains(&self.fingerprint(link))
    }

    // Claims `link` for processing
    //
    // Returns true only for the call that actually inserted the
    // fingerprint; every later call for the same (or colliding) link
    // returns false.
    pub fn try_commit(&mut self, link: &str) -> bool {
        let fingerprint = self.fingerprint(link);
        self.committed.insert(fingerprint)
    }

    pub fn len(&self) -> usize {
        self.committed.len()
    }
}

impl Default for DedupLedger {
    fn default() -> Self {
        Self::new()
    }
}
