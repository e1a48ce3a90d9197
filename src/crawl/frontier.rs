// src/crawl/frontier.rs
// =============================================================================
// The shared frontier: the work queue every crawl worker pulls from.
//
// It bundles two things behind ONE mutex:
// - a FIFO queue of links that were discovered but not yet processed
// - the dedup ledger of links that were already claimed
//
// Keeping them under the same lock is what makes "pop a link and claim it"
// a single atomic step. Two workers can never both walk away with the same
// link, even if it sits in the queue twice.
//
// The enqueue-time ledger check is only there to keep the queue short. The
// real guarantee comes from the commit at pop time.
//
// The lock is a plain std Mutex: every critical section is a few queue and
// hash-set operations, and it is never held across an .await.
// =============================================================================

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::ledger::DedupLedger;
use crate::link::normalize_link;

/// What a worker got when it asked the frontier for work
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pop {
    /// The link was popped and this worker now owns it
    Claimed(String),
    /// The link was popped but someone else had already claimed it
    AlreadyCommitted(String),
    /// Nothing in the queue
    Empty,
}

#[derive(Debug)]
struct FrontierState {
    queue: VecDeque<String>,
    ledger: DedupLedger,
}

#[derive(Debug)]
pub struct SharedFrontier {
    state: Mutex<FrontierState>,
}

impl Default for SharedFrontier {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedFrontier {
    pub fn new() -> Self {
        Self::with_ledger(DedupLedger::new())
    }

    /// Creates a frontier whose ledger uses the given ledger (and its digest)
    pub fn with_ledger(ledger: DedupLedger) -> Self {
        Self {
            state: Mutex::new(FrontierState {
                queue: VecDeque::new(),
                ledger,
            }),
        }
    }

    // A worker that panicked mid-push can't leave the queue or ledger
    // half-updated (each step is a single std collection call), so a
    // poisoned lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, FrontierState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // Enqueues one link
    //
    // The link is normalized first so the ledger only ever sees normalized
    // strings. Returns false if the link was skipped because it is already
    // committed.
    pub fn push(&self, link: &str) -> bool {
        let link = normalize_link(link);
        let mut state = self.lock();

        if state.ledger.contains(&link) {
            return false;
        }
        state.queue.push_back(link);
        true
    }

    // Enqueues a batch of links under a single lock
    //
    // Returns how many were actually added to the queue.
    pub fn push_all<I, S>(&self, links: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let links: Vec<String> = links
            .into_iter()
            .map(|link| normalize_link(link.as_ref()))
            .collect();

        let mut state = self.lock();
        let mut added = 0;
        for link in links {
            if !state.ledger.contains(&link) {
                state.queue.push_back(link);
                added += 1;
            }
        }
        added
    }

    // Pops the oldest link and tries to claim it, all under one lock
    //
    // Never blocks waiting for work: an empty queue is reported straight away.
    pub fn try_pop(&self) -> Pop {
        let mut state = self.lock();

        let link = match state.queue.pop_front() {
            Some(link) => link,
            None => return Pop::Empty,
        };

        if state.ledger.try_commit(&link) {
            Pop::Claimed(link)
        } else {
            Pop::AlreadyCommitted(link)
        }
    }

    // Snapshot only: another worker may push right after this returns
    pub fn is_empty(&self) -> bool {
        self.lock().queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lock().queue.len()
    }

    pub fn committed_count(&self) -> usize {
        self.lock().ledger.len()
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why one Mutex for two collections?
//    - With two locks, a worker could pop a link, get descheduled, and
//      another worker could pop a duplicate copy before the first commits
//    - One lock makes "pop + commit" indivisible
//
// 2. What is a MutexGuard?
//    - lock() returns a guard; the lock is released when it is dropped
//    - That's why try_pop() never needs an explicit unlock
//
// 3. Why &self and not &mut self?
//    - Many workers hold the same Arc<SharedFrontier> at once
//    - Mutation goes through the Mutex ("interior mutability")
// -----------------------------------------------------------------------------
